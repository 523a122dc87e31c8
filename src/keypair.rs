//! # Keypair Manager
//!
//! Generates signing keypairs, encrypts the secret half under an optional
//! password, and re-encrypts existing secret keys.
//!
//! ## Generation
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         KEY GENERATION                                  │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │   OsRng ──► fingerprint (8)  ───────────────┬───────────────┐           │
//! │   OsRng ──► salt (16)                       │               │           │
//! │   Ed25519 ──► (verifying key, raw key)      │               │           │
//! │                    │          │             ▼               ▼           │
//! │                    │          │       ┌───────────┐  ┌────────────┐     │
//! │                    └──────────┼──────►│ PublicKey │  │ SecretKey  │     │
//! │                               │       └───────────┘  └────────────┘     │
//! │                               │                            ▲            │
//! │                               ├─► SHA-512[..8] ─► check ───┤            │
//! │                               │                            │            │
//! │   password ─► scrypt ─► keystream ──► XOR ─► encrypted ────┘            │
//! │   (none)  ─────────────► zeros                                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rekeying
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            REKEY                                        │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │   SecretKey(old) ──► keystream(old password, stored cost, stored salt) │
//! │                  ──► XOR ──► raw key ──► check digest (constant time)  │
//! │                                             │                           │
//! │                          mismatch ◄─────────┤                           │
//! │                       Authentication        ▼                           │
//! │                                  keystream(new password, new cost,     │
//! │                                            fresh salt)                  │
//! │                                  ──► XOR ──► SecretKey(new)            │
//! │                                                                         │
//! │   Preserved: fingerprint, raw key                                      │
//! │   Replaced:  salt, cost, encrypted field                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::crypto::{ct_eq, ed25519, KdfCost};
use crate::envelope::{Fingerprint, PublicKey, SecretKey, Signature};
use crate::error::Result;

/// Generate a new keypair
///
/// When `password` is `Some`, the secret key is encrypted with an scrypt
/// keystream at `cost`; when `None`, `cost` is ignored and the key is stored
/// unprotected.
///
/// Fails with `InvalidArgument` if scrypt rejects `cost` (unsupported
/// combination or too much memory for this platform). No key material is
/// returned on failure.
///
/// ## Example
///
/// ```
/// use keyseal::{keypair, KdfCost};
///
/// let (public, secret) = keypair::generate(Some(b"pw"), KdfCost::new(4, 8, 1)?)?;
/// assert_eq!(public.fingerprint(), secret.fingerprint());
/// # Ok::<(), keyseal::Error>(())
/// ```
pub fn generate(password: Option<&[u8]>, cost: KdfCost) -> Result<(PublicKey, SecretKey)> {
    let fingerprint = Fingerprint::generate()?;
    let (verifying_key, raw) = ed25519::keypair()?;

    let secret = SecretKey::seal(&raw, password, cost, fingerprint)?;
    let public = PublicKey::new(fingerprint, verifying_key);

    tracing::debug!(
        fingerprint = %fingerprint,
        protected = secret.protection().is_protected(),
        "Generated keypair"
    );

    Ok((public, secret))
}

/// Re-encrypt a secret key under a new password and cost
///
/// The old key is decrypted with `old_password` using its own stored cost
/// and salt (an unprotected key needs no password; any supplied one is
/// ignored). The raw key is authenticated against the stored digest before
/// anything is written. The result keeps the fingerprint and raw key and
/// carries a fresh salt.
///
/// - `InvalidArgument`: KDF rejected the old or new parameters
/// - `Authentication`: wrong old password, or the key was tampered with
pub fn rekey(
    old_password: Option<&[u8]>,
    new_password: Option<&[u8]>,
    cost: KdfCost,
    secret_key: &SecretKey,
) -> Result<SecretKey> {
    let raw = secret_key.unseal(old_password).map_err(|e| {
        tracing::debug!(fingerprint = %secret_key.fingerprint(), "Rekey rejected: {}", e);
        e
    })?;

    let rekeyed = SecretKey::seal(&raw, new_password, cost, secret_key.fingerprint())?;

    tracing::debug!(
        fingerprint = %rekeyed.fingerprint(),
        was_protected = secret_key.protection().is_protected(),
        protected = rekeyed.protection().is_protected(),
        "Rekeyed secret key"
    );

    Ok(rekeyed)
}

/// Fingerprint of a public key blob
///
/// A pure structural read after tag validation.
pub fn public_key_fingerprint(public_key: &[u8]) -> Result<Fingerprint> {
    PublicKey::from_bytes(public_key).map(|pk| pk.fingerprint())
}

/// Fingerprint of a secret key blob
///
/// Only the length and both tags are checked; the KDF parameters are not
/// decoded.
pub fn secret_key_fingerprint(secret_key: &[u8]) -> Result<Fingerprint> {
    SecretKey::read_fingerprint(secret_key)
}

/// Fingerprint of a signature blob
pub fn signature_fingerprint(signature: &[u8]) -> Result<Fingerprint> {
    Signature::from_bytes(signature).map(|sig| sig.fingerprint())
}

/// Check whether a public and secret key were generated together
///
/// Compares fingerprints in constant time; does not decrypt anything.
pub fn is_pair(public_key: &PublicKey, secret_key: &SecretKey) -> bool {
    ct_eq(public_key.fingerprint().as_bytes(), secret_key.fingerprint().as_bytes())
}

// ============================================================================
// TESTS
// ============================================================================
