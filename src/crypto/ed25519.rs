//! # Ed25519 Primitive
//!
//! Thin wrapper over `ed25519-dalek` exposing the three operations the
//! envelope layer needs, in terms of raw byte arrays.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        RAW KEY FORMAT                                   │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Raw secret key (64 bytes)                                             │
//! │  ┌──────────────────────────────┬──────────────────────────────┐       │
//! │  │  seed (32)                   │  verifying key (32)          │       │
//! │  └──────────────────────────────┴──────────────────────────────┘       │
//! │                                                                         │
//! │  Verifying key (32 bytes): compressed Edwards point                    │
//! │  Detached signature (64 bytes): R ‖ s                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use ed25519_dalek::{Signature as Ed25519Signature, Signer, SigningKey, Verifier, VerifyingKey};
use zeroize::Zeroizing;

use crate::crypto::random;
use crate::crypto::secret::SecretKeyBytes;
use crate::error::{Error, Result};

/// Size of an Ed25519 verifying key in bytes
pub const VERIFYING_KEY_SIZE: usize = 32;

/// Size of an Ed25519 detached signature in bytes
pub const DETACHED_SIGNATURE_SIZE: usize = 64;

/// Generate a fresh keypair from the OS random source
///
/// Returns the verifying key and the 64-byte raw secret key.
pub fn keypair() -> Result<([u8; VERIFYING_KEY_SIZE], SecretKeyBytes)> {
    let seed = Zeroizing::new(random::array::<32>()?);
    // ed25519_dalek::SigningKey handles its own zeroization
    let secret = SigningKey::from_bytes(&seed);
    let raw = SecretKeyBytes::new(secret.to_keypair_bytes());
    Ok((secret.verifying_key().to_bytes(), raw))
}

/// Sign `data` with a raw secret key
///
/// The raw key must be internally consistent (its second half must be the
/// verifying key of its first half); a key that fails this check was not
/// produced by [`keypair`] and is reported as `Internal`.
pub fn sign(raw: &SecretKeyBytes, data: &[u8]) -> Result<[u8; DETACHED_SIGNATURE_SIZE]> {
    let secret = SigningKey::from_keypair_bytes(raw.as_bytes())
        .map_err(|e| Error::Internal(format!("Inconsistent secret key: {}", e)))?;
    Ok(secret.sign(data).to_bytes())
}

/// Verify a detached signature over `data`
///
/// A verifying key that does not decode to a curve point cannot have
/// produced any signature and simply fails verification.
pub fn verify(
    verifying_key: &[u8; VERIFYING_KEY_SIZE],
    signature: &[u8; DETACHED_SIGNATURE_SIZE],
    data: &[u8],
) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(verifying_key) else {
        return false;
    };
    let sig = Ed25519Signature::from_bytes(signature);
    verifying_key.verify(data, &sig).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypair_generation() {
        let (vk1, raw1) = keypair().unwrap();
        let (vk2, raw2) = keypair().unwrap();

        assert_ne!(vk1, vk2);
        assert_ne!(raw1.as_bytes(), raw2.as_bytes());
        // Second half of the raw key is the verifying key
        assert_eq!(&raw1.as_bytes()[32..], &vk1[..]);
    }

    #[test]
    fn test_sign_verify() {
        let (vk, raw) = keypair().unwrap();
        let sig = sign(&raw, b"Hello, World!").unwrap();

        assert!(verify(&vk, &sig, b"Hello, World!"));
        assert!(!verify(&vk, &sig, b"Wrong message!"));
    }

    #[test]
    fn test_verify_wrong_key_fails() {
        let (_, raw1) = keypair().unwrap();
        let (vk2, _) = keypair().unwrap();
        let sig = sign(&raw1, b"msg").unwrap();

        assert!(!verify(&vk2, &sig, b"msg"));
    }

    #[test]
    fn test_deterministic_signatures() {
        let (_, raw) = keypair().unwrap();
        assert_eq!(sign(&raw, b"same").unwrap(), sign(&raw, b"same").unwrap());
    }

    #[test]
    fn test_sign_rejects_inconsistent_key() {
        let (_, raw) = keypair().unwrap();
        let mut bytes = *raw.as_bytes();
        bytes[40] ^= 0x01;
        let err = sign(&SecretKeyBytes::new(bytes), b"msg").unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
    }
}
