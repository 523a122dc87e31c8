use std::fmt;

use zeroize::Zeroize;

use crate::crypto::hash::{self, KEY_CHECK_SIZE};
use crate::crypto::{ct_eq, le32_decode, le32_encode, random, Protection, SecretKeyBytes};
use crate::crypto::{KdfCost, RAW_SECRET_KEY_SIZE, SALT_SIZE};
use crate::envelope::{check_tag, field, fixed, Fingerprint, ALGORITHM_TAG, KDF_TAG};
use crate::error::{Error, Result};

/// Size of a serialized secret key in bytes
pub const SECRET_KEY_BYTES: usize = 2 + 2 + 4 * 3 + SALT_SIZE + KEY_CHECK_SIZE + 8 + RAW_SECRET_KEY_SIZE;

const KDF_TAG_OFFSET: usize = 2;
const N_OFFSET: usize = 4;
const R_OFFSET: usize = 8;
const P_OFFSET: usize = 12;
const SALT_OFFSET: usize = 16;
const CHECK_OFFSET: usize = 32;
const FINGERPRINT_OFFSET: usize = 40;
const KEY_OFFSET: usize = 48;

/// A secret key envelope
///
/// Holds the raw Ed25519 key XORed with a password-derived keystream (or
/// stored as-is when unprotected), plus everything needed to decrypt and
/// authenticate it.
///
/// ## Security
///
/// For an unprotected key the encrypted field *is* the raw key, so this
/// type is wiped on drop and its `Debug` output omits the key field.
#[derive(Clone)]
pub struct SecretKey {
    protection: Protection,
    salt: [u8; SALT_SIZE],
    key_check: [u8; KEY_CHECK_SIZE],
    fingerprint: Fingerprint,
    encrypted_key: [u8; RAW_SECRET_KEY_SIZE],
}

impl SecretKey {
    /// Encrypt a raw key into a new envelope
    ///
    /// Draws a fresh salt, derives the keystream for `password` under
    /// `cost` (or uses the zero keystream when there is no password) and
    /// records the key-check digest of `raw`.
    pub(crate) fn seal(
        raw: &SecretKeyBytes,
        password: Option<&[u8]>,
        cost: KdfCost,
        fingerprint: Fingerprint,
    ) -> Result<Self> {
        let salt: [u8; SALT_SIZE] = random::array()?;
        let protection = Protection::for_password(password, cost);
        let keystream = protection.keystream(password, &salt)?;

        Ok(Self {
            protection,
            salt,
            key_check: hash::key_check(raw.as_bytes()),
            fingerprint,
            encrypted_key: raw.encrypt(&keystream),
        })
    }

    /// Decrypt and authenticate the raw key
    ///
    /// The stored protection decides whether the KDF runs: an unprotected
    /// key ignores `password`, a protected key with no password is decrypted
    /// with the zero keystream and fails the check. The recovered key's
    /// digest is compared in constant time; a mismatch is `Authentication`.
    pub(crate) fn unseal(&self, password: Option<&[u8]>) -> Result<SecretKeyBytes> {
        let keystream = self.protection.keystream(password, &self.salt)?;
        let raw = SecretKeyBytes::decrypt(&self.encrypted_key, &keystream);

        if !ct_eq(&hash::key_check(raw.as_bytes()), &self.key_check) {
            return Err(Error::Authentication);
        }
        Ok(raw)
    }

    /// Parse a 112-byte secret key blob
    ///
    /// Checks length, then the algorithm tag, then the KDF tag, stopping at
    /// the first failure. A KDF triple with some but not all fields zero is
    /// rejected as malformed.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let blob = fixed::<SECRET_KEY_BYTES>(bytes, "Secret key")?;
        check_tag(blob, &ALGORITHM_TAG, "Secret key")?;
        check_tag(&blob[KDF_TAG_OFFSET..], &KDF_TAG, "Secret key KDF")?;

        let protection = Protection::from_wire(
            le32_decode(field(blob, N_OFFSET)),
            le32_decode(field(blob, R_OFFSET)),
            le32_decode(field(blob, P_OFFSET)),
        )?;

        Ok(Self {
            protection,
            salt: field(blob, SALT_OFFSET),
            key_check: field(blob, CHECK_OFFSET),
            fingerprint: Fingerprint::from_bytes(field(blob, FINGERPRINT_OFFSET)),
            encrypted_key: field(blob, KEY_OFFSET),
        })
    }

    /// Read the fingerprint out of a 112-byte blob
    ///
    /// Checks length and both tags, nothing else. The KDF triple is left
    /// undecoded, so a blob `from_bytes` would reject for its cost fields
    /// still yields a fingerprint.
    pub(crate) fn read_fingerprint(bytes: &[u8]) -> Result<Fingerprint> {
        let blob = fixed::<SECRET_KEY_BYTES>(bytes, "Secret key")?;
        check_tag(blob, &ALGORITHM_TAG, "Secret key")?;
        check_tag(&blob[KDF_TAG_OFFSET..], &KDF_TAG, "Secret key KDF")?;
        Ok(Fingerprint::from_bytes(field(blob, FINGERPRINT_OFFSET)))
    }

    /// Serialize to the 112-byte blob
    ///
    /// ## Security Warning
    ///
    /// For an unprotected key the output contains the raw secret key.
    pub fn to_bytes(&self) -> [u8; SECRET_KEY_BYTES] {
        let (n, r, p) = self.protection.to_wire();

        let mut out = [0u8; SECRET_KEY_BYTES];
        out[..KDF_TAG_OFFSET].copy_from_slice(&ALGORITHM_TAG);
        out[KDF_TAG_OFFSET..N_OFFSET].copy_from_slice(&KDF_TAG);
        out[N_OFFSET..R_OFFSET].copy_from_slice(&le32_encode(n));
        out[R_OFFSET..P_OFFSET].copy_from_slice(&le32_encode(r));
        out[P_OFFSET..SALT_OFFSET].copy_from_slice(&le32_encode(p));
        out[SALT_OFFSET..CHECK_OFFSET].copy_from_slice(&self.salt);
        out[CHECK_OFFSET..FINGERPRINT_OFFSET].copy_from_slice(&self.key_check);
        out[FINGERPRINT_OFFSET..KEY_OFFSET].copy_from_slice(self.fingerprint.as_bytes());
        out[KEY_OFFSET..].copy_from_slice(&self.encrypted_key);
        out
    }

    /// The key's fingerprint (same as its public key's)
    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    /// Whether this key is protected by a password, and at what cost
    pub fn protection(&self) -> Protection {
        self.protection
    }

    /// Salt used for the current encryption
    pub fn salt(&self) -> &[u8; SALT_SIZE] {
        &self.salt
    }

    /// Truncated digest of the raw key
    pub fn key_check(&self) -> &[u8; KEY_CHECK_SIZE] {
        &self.key_check
    }

    /// Encode as hex string
    pub fn to_hex(&self) -> String {
        let mut bytes = self.to_bytes();
        let hex = hex::encode(bytes);
        bytes.zeroize();
        hex
    }

    /// Decode from hex string
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let bytes = zeroize::Zeroizing::new(hex::decode(hex_str)?);
        Self::from_bytes(&bytes)
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.encrypted_key.zeroize();
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("protection", &self.protection)
            .field("fingerprint", &self.fingerprint)
            .finish_non_exhaustive()
    }
}
