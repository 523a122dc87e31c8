//! # Error Handling
//!
//! Error types for keyseal.
//!
//! ## Error Taxonomy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ERROR TAXONOMY                                │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Error                                                                 │
//! │  │                                                                      │
//! │  ├── Internal (1)          - Unexpected primitive or RNG failure       │
//! │  ├── InvalidArgument (2)   - Bad length, bad tag, bad KDF cost         │
//! │  ├── Authentication (3)    - Wrong password / tampered key digest      │
//! │  ├── WrongKey (4)          - Signature made by a different key         │
//! │  └── SignatureInvalid (5)  - Ed25519 verification rejected             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Check Ordering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  length ──► tags ──► fingerprint ──► KDF ──► digest ──► Ed25519        │
//! │  (cheap, no secrets)                 (expensive, touches secrets)      │
//! │                                                                         │
//! │  Parsing failures are always reported before any cryptographic work.  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for keyseal operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for keyseal
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Internal error (a primitive failed in a way the caller cannot fix)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Malformed input: wrong length, wrong tag, or rejected KDF parameters
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The secret key did not decrypt to its recorded key-check digest
    #[error("Authentication failed: wrong password or corrupted secret key")]
    Authentication,

    /// The signature carries a different fingerprint than the public key
    #[error("Signature was not produced by this public key")]
    WrongKey,

    /// Ed25519 verification rejected the signature
    #[error("Signature verification failed")]
    SignatureInvalid,
}

impl Error {
    /// Numeric error code
    ///
    /// `0` is reserved for success at the slice boundary, so every
    /// variant maps to a non-zero value.
    pub fn code(&self) -> i32 {
        match self {
            Error::Internal(_) => 1,
            Error::InvalidArgument(_) => 2,
            Error::Authentication => 3,
            Error::WrongKey => 4,
            Error::SignatureInvalid => 5,
        }
    }

    /// Check if this error requires user action (re-entering a password)
    pub fn requires_user_action(&self) -> bool {
        matches!(self, Error::Authentication)
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}

impl From<hex::FromHexError> for Error {
    fn from(err: hex::FromHexError) -> Self {
        Error::InvalidArgument(format!("Invalid hex: {}", err))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::Internal("x".into()).code(), 1);
        assert_eq!(Error::InvalidArgument("x".into()).code(), 2);
        assert_eq!(Error::Authentication.code(), 3);
        assert_eq!(Error::WrongKey.code(), 4);
        assert_eq!(Error::SignatureInvalid.code(), 5);
    }

    #[test]
    fn test_requires_user_action() {
        assert!(Error::Authentication.requires_user_action());
        assert!(!Error::WrongKey.requires_user_action());
        assert!(!Error::InvalidArgument("tag".into()).requires_user_action());
    }

    #[test]
    fn test_hex_error_conversion() {
        let err: Error = hex::decode("zz").unwrap_err().into();
        assert_eq!(err.code(), 2);
    }
}
