//! # Key Envelope Demo
//!
//! Walks through generating a password-protected keypair, signing,
//! verifying, rekeying and the failure cases.
//!
//! ## Run
//!
//! ```bash
//! RUST_LOG=keyseal=debug cargo run --example envelope_demo
//! ```

use keyseal::{keypair, signing, Error, KdfCost, SecretKey};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "keyseal=info".into()),
        )
        .init();

    println!("=== keyseal: Key Envelope Demo ===\n");

    // Step 1: Generate a protected keypair
    println!("Step 1: Generating a password-protected keypair...");

    let cost = KdfCost::default();
    println!(
        "  scrypt cost: N=2^{}, r={}, p={} (~{} KiB)",
        cost.log_n(),
        cost.r(),
        cost.p(),
        cost.memory_bytes() / 1024
    );

    let (public, secret) = keypair::generate(Some(b"correct horse"), cost)?;
    println!("  Fingerprint: {}", public.fingerprint());
    println!("  Public key ({} bytes): {}", public.to_bytes().len(), public.to_hex());
    println!("  Secret key: {} bytes", secret.to_bytes().len());
    println!();

    // Step 2: Layout
    println!("Step 2: Envelope layouts");
    println!();
    println!("  ┌─────────────────────────────────────────────────────────────┐");
    println!("  │  Public key  (42)  \"Ed\" | fingerprint | verifying key     │");
    println!("  │  Secret key (112)  \"Ed\" \"SK\" | N r p | salt | check      │");
    println!("  │                    | fingerprint | encrypted key            │");
    println!("  │  Signature   (74)  \"Ed\" | fingerprint | Ed25519 signature │");
    println!("  └─────────────────────────────────────────────────────────────┘");
    println!();

    // Step 3: Sign and verify
    println!("Step 3: Signing \"Hello world!\"...");

    let message = b"Hello world!";
    let sig = signing::sign(Some(b"correct horse"), &secret, message)?;
    println!("  Signature: {}...", &sig.to_hex()[..32]);

    match signing::verify(&public, &sig, message) {
        Ok(()) => println!("  [OK] Signature is valid"),
        Err(e) => println!("  [FAILED] {}", e),
    }
    println!();

    // Step 4: Failure cases
    println!("Step 4: Failure cases...");

    match signing::sign(Some(b"battery staple"), &secret, message) {
        Err(Error::Authentication) => println!("  [OK] Wrong password rejected"),
        other => println!("  [FAILED] Unexpected: {:?}", other.map(|s| s.to_hex())),
    }

    match signing::verify(&public, &sig, b"Hello world?") {
        Err(Error::SignatureInvalid) => println!("  [OK] Tampered message detected"),
        other => println!("  [FAILED] Unexpected: {:?}", other),
    }

    let (stranger, _) = keypair::generate(None, cost)?;
    match signing::verify(&stranger, &sig, message) {
        Err(Error::WrongKey) => println!("  [OK] Different key detected by fingerprint"),
        other => println!("  [FAILED] Unexpected: {:?}", other),
    }
    println!();

    // Step 5: Rekey
    println!("Step 5: Changing the password...");

    let stored = secret.to_bytes();
    let restored = SecretKey::from_bytes(&stored)?;
    let rekeyed = keypair::rekey(Some(b"correct horse"), Some(b"battery staple"), cost, &restored)?;

    println!("  Fingerprint preserved: {}", rekeyed.fingerprint() == secret.fingerprint());
    println!("  Salt changed: {}", rekeyed.salt() != secret.salt());

    let sig2 = signing::sign(Some(b"battery staple"), &rekeyed, message)?;
    println!("  Same signature after rekey: {}", sig2 == sig);
    println!();

    println!("=== Example Complete ===");
    Ok(())
}
