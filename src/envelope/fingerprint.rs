use std::fmt;

use serde::{Deserialize, Serialize};

use crate::crypto::{ct_eq, random};
use crate::error::{Error, Result};

/// Size of a key fingerprint in bytes
pub const FINGERPRINT_BYTES: usize = 8;

/// A random 8-byte label minted when a keypair is generated
///
/// The fingerprint is copied unchanged into the public key, the secret key
/// and every signature made with that key. It is a matching aid, not a
/// commitment to key content.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(#[serde(with = "crate::envelope::hex_bytes")] [u8; FINGERPRINT_BYTES]);

impl Fingerprint {
    /// Draw a fresh fingerprint from the secure random source
    pub fn generate() -> Result<Self> {
        Ok(Self(random::array()?))
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; FINGERPRINT_BYTES]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; FINGERPRINT_BYTES] {
        &self.0
    }

    /// Compare against another fingerprint in constant time
    pub fn ct_eq(&self, other: &Fingerprint) -> bool {
        ct_eq(&self.0, &other.0)
    }

    /// Encode as hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Decode from hex string
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let bytes = hex::decode(hex_str)?;
        let bytes: [u8; FINGERPRINT_BYTES] = bytes.try_into().map_err(|_| {
            Error::invalid(format!("Fingerprint must be {} bytes", FINGERPRINT_BYTES))
        })?;
        Ok(Self(bytes))
    }
}

impl AsRef<[u8]> for Fingerprint {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.to_hex())
    }
}
