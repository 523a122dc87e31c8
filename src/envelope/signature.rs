use crate::crypto::ed25519::DETACHED_SIGNATURE_SIZE;
use crate::envelope::{check_tag, field, fixed, impl_blob_serde, Fingerprint, ALGORITHM_TAG};
use crate::error::Result;

/// Size of a serialized signature in bytes
pub const SIGNATURE_BYTES: usize = 2 + 8 + DETACHED_SIGNATURE_SIZE;

const FINGERPRINT_OFFSET: usize = 2;
const SIGNATURE_OFFSET: usize = 10;

/// A signature envelope
///
/// Binds a detached Ed25519 signature to the fingerprint of the key that
/// made it. Signatures are never modified after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    fingerprint: Fingerprint,
    signature: [u8; DETACHED_SIGNATURE_SIZE],
}

impl Signature {
    pub(crate) fn new(fingerprint: Fingerprint, signature: [u8; DETACHED_SIGNATURE_SIZE]) -> Self {
        Self {
            fingerprint,
            signature,
        }
    }

    /// Parse a 74-byte signature blob
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let blob = fixed::<SIGNATURE_BYTES>(bytes, "Signature")?;
        check_tag(blob, &ALGORITHM_TAG, "Signature")?;

        Ok(Self {
            fingerprint: Fingerprint::from_bytes(field(blob, FINGERPRINT_OFFSET)),
            signature: field(blob, SIGNATURE_OFFSET),
        })
    }

    /// Serialize to the 74-byte blob
    pub fn to_bytes(&self) -> [u8; SIGNATURE_BYTES] {
        let mut out = [0u8; SIGNATURE_BYTES];
        out[..FINGERPRINT_OFFSET].copy_from_slice(&ALGORITHM_TAG);
        out[FINGERPRINT_OFFSET..SIGNATURE_OFFSET].copy_from_slice(self.fingerprint.as_bytes());
        out[SIGNATURE_OFFSET..].copy_from_slice(&self.signature);
        out
    }

    /// Fingerprint of the key that made this signature
    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    /// The raw 64-byte Ed25519 signature
    pub fn detached(&self) -> &[u8; DETACHED_SIGNATURE_SIZE] {
        &self.signature
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

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.signature
    }
}

impl_blob_serde!(Signature);

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Signature {
        Signature::new(Fingerprint::from_bytes([3; 8]), [0xEE; DETACHED_SIGNATURE_SIZE])
    }

    #[test]
    fn test_layout() {
        let bytes = sample().to_bytes();
        assert_eq!(bytes.len(), 74);
        assert_eq!(&bytes[0..2], b"Ed");
        assert_eq!(&bytes[2..10], &[3; 8]);
        assert_eq!(&bytes[10..74], &[0xEE; 64][..]);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Signature::from_bytes(&sample().to_bytes()).unwrap(), sample());
    }

    #[test]
    fn test_parse_rejects_bad_tag_and_length() {
        let mut bytes = sample().to_bytes();
        bytes[0] = 0;
        assert_eq!(Signature::from_bytes(&bytes).unwrap_err().code(), 2);
        assert!(Signature::from_bytes(&sample().to_bytes()[..73]).is_err());
    }

    #[test]
    fn test_hex_and_serde() {
        let sig = sample();
        assert_eq!(Signature::from_hex(&sig.to_hex()).unwrap(), sig);

        let json = serde_json::to_string(&sig).unwrap();
        let restored: Signature = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, sig);
    }
}
