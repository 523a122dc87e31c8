//! # Signing Engine
//!
//! Produces and checks signature envelopes.
//!
//! ## Hash-then-sign
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           SIGN                                          │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │   SecretKey ──unseal(password)──► raw key                              │
//! │                                      │                                  │
//! │   message ──► SHA-512 ──► digest ───►│ Ed25519 sign                    │
//! │                                      ▼                                  │
//! │                          Signature { fingerprint(sk), sig }            │
//! │                                                                         │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                           VERIFY                                        │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │   fingerprint(pk) == fingerprint(sig) ?  ──no──► WrongKey              │
//! │          │ yes                                                          │
//! │          ▼                                                              │
//! │   message ──► SHA-512 ──► digest ──► Ed25519 verify(pk, sig)           │
//! │                                          │                              │
//! │                               reject ◄───┴───► Ok(())                   │
//! │                          SignatureInvalid                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The message is always hashed first, so arbitrarily long messages cost one
//! streaming digest plus a fixed-size Ed25519 operation. Verification never
//! touches secret material and is available to anyone holding the public key.

use zeroize::Zeroizing;

use crate::crypto::{ed25519, hash};
use crate::envelope::{PublicKey, SecretKey, Signature};
use crate::error::{Error, Result};

/// Sign a message
///
/// Decrypts and authenticates the secret key with `password`, then signs
/// the SHA-512 digest of `message`. The returned signature carries the
/// secret key's fingerprint.
///
/// - `Authentication`: wrong password, or the secret key was tampered with
/// - `InvalidArgument`: the stored KDF parameters were rejected
///
/// ## Example
///
/// ```
/// use keyseal::{keypair, signing, KdfCost};
///
/// let (public, secret) = keypair::generate(None, KdfCost::default())?;
/// let sig = signing::sign(None, &secret, b"Hello world!")?;
/// signing::verify(&public, &sig, b"Hello world!")?;
/// # Ok::<(), keyseal::Error>(())
/// ```
pub fn sign(password: Option<&[u8]>, secret_key: &SecretKey, message: &[u8]) -> Result<Signature> {
    let raw = secret_key.unseal(password)?;
    let digest = Zeroizing::new(hash::digest(message));
    let detached = ed25519::sign(&raw, &digest[..])?;

    tracing::debug!(
        fingerprint = %secret_key.fingerprint(),
        message_len = message.len(),
        "Signed message"
    );

    Ok(Signature::new(secret_key.fingerprint(), detached))
}

/// Verify a signature over a message
///
/// The fingerprint check runs first and is constant-time; a mismatch is
/// reported as `WrongKey` without doing any curve arithmetic.
pub fn verify(public_key: &PublicKey, signature: &Signature, message: &[u8]) -> Result<()> {
    if !public_key.fingerprint().ct_eq(&signature.fingerprint()) {
        tracing::debug!(
            expected = %public_key.fingerprint(),
            found = %signature.fingerprint(),
            "Signature made by a different key"
        );
        return Err(Error::WrongKey);
    }

    let digest = hash::digest(message);
    if !ed25519::verify(public_key.verifying_key(), signature.detached(), &digest) {
        tracing::debug!(fingerprint = %public_key.fingerprint(), "Signature rejected");
        return Err(Error::SignatureInvalid);
    }

    tracing::debug!(
        fingerprint = %public_key.fingerprint(),
        message_len = message.len(),
        "Verified signature"
    );
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
