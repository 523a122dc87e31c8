//! # Key Envelope Codec
//!
//! Fixed-size binary formats for public keys, secret keys and signatures.
//!
//! ## Wire Formats
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ENVELOPE LAYOUTS                                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  PUBLIC KEY (42 bytes)                                                 │
//! │  ┌──────┬──────────────┬──────────────────────────────┐                │
//! │  │ "Ed" │ fingerprint  │ verifying key                │                │
//! │  │  2   │      8       │            32                │                │
//! │  └──────┴──────────────┴──────────────────────────────┘                │
//! │                                                                         │
//! │  SECRET KEY (112 bytes)                                                │
//! │  ┌──────┬──────┬────┬────┬────┬────────┬────────┬────────┬──────────┐  │
//! │  │ "Ed" │ "SK" │ N  │ r  │ p  │  salt  │ check  │  fpr   │ enc key  │  │
//! │  │  2   │  2   │ 4  │ 4  │ 4  │   16   │   8    │   8    │   64     │  │
//! │  └──────┴──────┴────┴────┴────┴────────┴────────┴────────┴──────────┘  │
//! │  N, r, p little-endian; (0, 0, 0) = no password                        │
//! │                                                                         │
//! │  SIGNATURE (74 bytes)                                                  │
//! │  ┌──────┬──────────────┬──────────────────────────────────────────┐    │
//! │  │ "Ed" │ fingerprint  │ Ed25519 detached signature               │    │
//! │  │  2   │      8       │                  64                      │    │
//! │  └──────┴──────────────┴──────────────────────────────────────────┘    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Parsing checks the length, then the tags (algorithm first, then KDF),
//! before any other field is read.

mod fingerprint;
mod public_key;
mod secret_key;
mod signature;

pub use fingerprint::{Fingerprint, FINGERPRINT_BYTES};
pub use public_key::{PublicKey, PUBLIC_KEY_BYTES};
pub use secret_key::{SecretKey, SECRET_KEY_BYTES};
pub use signature::{Signature, SIGNATURE_BYTES};

use crate::error::{Error, Result};

/// Algorithm tag carried by every envelope
pub const ALGORITHM_TAG: [u8; 2] = *b"Ed";

/// KDF tag carried by secret keys
pub const KDF_TAG: [u8; 2] = *b"SK";

/// Check that `bytes` is exactly `N` long and borrow it as an array
pub(crate) fn fixed<'a, const N: usize>(bytes: &'a [u8], what: &str) -> Result<&'a [u8; N]> {
    bytes.try_into().map_err(|_| {
        Error::invalid(format!("{} must be {} bytes, got {}", what, N, bytes.len()))
    })
}

/// Check a 2-byte tag at the start of `bytes`
pub(crate) fn check_tag(bytes: &[u8], expected: &[u8; 2], what: &str) -> Result<()> {
    if bytes.get(..2) != Some(&expected[..]) {
        return Err(Error::invalid(format!(
            "{}: expected tag {:?}",
            what,
            String::from_utf8_lossy(expected)
        )));
    }
    Ok(())
}

/// Copy `N` bytes starting at `offset` out of a blob whose length has
/// already been checked.
pub(crate) fn field<const N: usize>(blob: &[u8], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&blob[offset..offset + N]);
    out
}

/// Serde helper for byte arrays as hex
pub(crate) mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S, const N: usize>(bytes: &[u8; N], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[u8; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(&s).map_err(serde::de::Error::custom)?;
        bytes.try_into().map_err(|_| serde::de::Error::custom("Invalid length"))
    }
}

/// Serialize a whole envelope as the hex encoding of its blob
macro_rules! impl_blob_serde {
    ($ty:ty) => {
        impl serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                <$ty>::from_hex(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}
pub(crate) use impl_blob_serde;
