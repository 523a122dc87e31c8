use crate::crypto::ed25519::VERIFYING_KEY_SIZE;
use crate::envelope::{check_tag, field, fixed, impl_blob_serde, Fingerprint, ALGORITHM_TAG};
use crate::error::Result;

/// Size of a serialized public key in bytes
pub const PUBLIC_KEY_BYTES: usize = 2 + 8 + VERIFYING_KEY_SIZE;

const FINGERPRINT_OFFSET: usize = 2;
const VERIFYING_KEY_OFFSET: usize = 10;

/// A public key envelope
///
/// Contains only public information and can be serialized, transmitted
/// and stored without security concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    fingerprint: Fingerprint,
    verifying_key: [u8; VERIFYING_KEY_SIZE],
}

impl PublicKey {
    pub(crate) fn new(fingerprint: Fingerprint, verifying_key: [u8; VERIFYING_KEY_SIZE]) -> Self {
        Self {
            fingerprint,
            verifying_key,
        }
    }

    /// Parse a 42-byte public key blob
    ///
    /// Fails with `InvalidArgument` on a wrong length or a wrong algorithm
    /// tag; nothing after the tag is read in that case.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let blob = fixed::<PUBLIC_KEY_BYTES>(bytes, "Public key")?;
        check_tag(blob, &ALGORITHM_TAG, "Public key")?;

        Ok(Self {
            fingerprint: Fingerprint::from_bytes(field(blob, FINGERPRINT_OFFSET)),
            verifying_key: field(blob, VERIFYING_KEY_OFFSET),
        })
    }

    /// Serialize to the 42-byte blob
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_BYTES] {
        let mut out = [0u8; PUBLIC_KEY_BYTES];
        out[..FINGERPRINT_OFFSET].copy_from_slice(&ALGORITHM_TAG);
        out[FINGERPRINT_OFFSET..VERIFYING_KEY_OFFSET].copy_from_slice(self.fingerprint.as_bytes());
        out[VERIFYING_KEY_OFFSET..].copy_from_slice(&self.verifying_key);
        out
    }

    /// The key's fingerprint
    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    /// The raw Ed25519 verifying key
    pub fn verifying_key(&self) -> &[u8; VERIFYING_KEY_SIZE] {
        &self.verifying_key
    }

    /// Encode as hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Decode from hex string
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        Self::from_bytes(&hex::decode(hex_str)?)
    }
}

impl_blob_serde!(PublicKey);
