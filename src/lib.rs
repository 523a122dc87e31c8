//! # keyseal
//!
//! Ed25519 signing keys in compact, self-describing binary envelopes, with
//! optional password protection of the secret half.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          KEYSEAL MODULES                                │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────┐  ┌─────────────────────┐  ┌────────────────┐  │
//! │  │      keypair        │  │      signing        │  │      raw       │  │
//! │  │                     │  │                     │  │                │  │
//! │  │ - generate          │  │ - sign              │  │ - *_into       │  │
//! │  │ - rekey             │  │ - verify            │  │ - verify_slices│  │
//! │  │ - fingerprints      │  │                     │  │                │  │
//! │  └──────────┬──────────┘  └──────────┬──────────┘  └───────┬────────┘  │
//! │             │                        │                     │           │
//! │             └────────────────────────┴─────────────────────┘           │
//! │                                      │                                  │
//! │  ┌───────────────────────────────────▼───────────────────────────────┐ │
//! │  │                           envelope                                 │ │
//! │  │   PublicKey (42)   SecretKey (112)   Signature (74)   Fingerprint  │ │
//! │  └───────────────────────────────────┬───────────────────────────────┘ │
//! │                                      │                                  │
//! │  ┌───────────────────────────────────▼───────────────────────────────┐ │
//! │  │                            crypto                                  │ │
//! │  │   ed25519   SHA-512   scrypt   OsRng   constant-time utilities     │ │
//! │  └────────────────────────────────────────────────────────────────────┘ │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Hierarchy
//!
//! - [`error`] - Error taxonomy with stable numeric codes
//! - [`crypto`] - Primitive wrappers and constant-time helpers
//! - [`envelope`] - Binary formats for keys and signatures
//! - [`keypair`] - Key generation, rekeying and fingerprint extraction
//! - [`signing`] - Hash-then-sign and verification
//! - [`raw`] - Byte-slice entry points that blank outputs on failure
//!
//! ## Security Model
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          SECURITY PROPERTIES                            │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Secret key at rest                                                    │
//! │  ──────────────────                                                     │
//! │  raw key XOR scrypt(password, salt, N, r, p). A fresh random salt is  │
//! │  drawn for every encryption. With no password the keystream is zero.  │
//! │                                                                         │
//! │  Password check                                                        │
//! │  ──────────────                                                         │
//! │  An 8-byte truncated SHA-512 of the raw key is stored alongside and   │
//! │  compared in constant time after decryption.                          │
//! │                                                                         │
//! │  Key material lifetime                                                 │
//! │  ─────────────────────                                                  │
//! │  Raw keys, keystreams and message digests are wiped on drop, on every │
//! │  success and failure path.                                             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use keyseal::{keypair, signing, KdfCost};
//!
//! let cost = KdfCost::new(10, 8, 1)?;
//! let (public, secret) = keypair::generate(Some(b"correct horse"), cost)?;
//!
//! let sig = signing::sign(Some(b"correct horse"), &secret, b"Hello world!")?;
//! signing::verify(&public, &sig, b"Hello world!")?;
//! # Ok::<(), keyseal::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod crypto;
pub mod envelope;
pub mod error;
pub mod keypair;
pub mod raw;
pub mod signing;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use crypto::{ct_eq, le32_decode, le32_encode, wipe, KdfCost, Protection};
pub use envelope::{
    Fingerprint, PublicKey, SecretKey, Signature, FINGERPRINT_BYTES, PUBLIC_KEY_BYTES,
    SECRET_KEY_BYTES, SIGNATURE_BYTES,
};
pub use error::{Error, Result};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Returns the version of keyseal
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_blob_sizes() {
        assert_eq!(PUBLIC_KEY_BYTES, 42);
        assert_eq!(SECRET_KEY_BYTES, 112);
        assert_eq!(SIGNATURE_BYTES, 74);
        assert_eq!(FINGERPRINT_BYTES, 8);
    }
}
