//! Wipe-on-drop containers for raw key material.
//!
//! Every function that materializes a plaintext secret key or a KDF
//! keystream holds it in one of these types. Dropping the value (including
//! on an early `?` return) zeroizes the bytes.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::util::xor_in_place;

/// Size of a raw Ed25519 secret key (seed followed by public key)
pub const RAW_SECRET_KEY_SIZE: usize = 64;

/// A plaintext 64-byte Ed25519 secret key
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretKeyBytes([u8; RAW_SECRET_KEY_SIZE]);

impl SecretKeyBytes {
    /// Take ownership of raw key bytes
    pub fn new(bytes: [u8; RAW_SECRET_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes
    ///
    /// ## Security Warning
    ///
    /// Never log or persist these bytes without encrypting them first.
    pub fn as_bytes(&self) -> &[u8; RAW_SECRET_KEY_SIZE] {
        &self.0
    }

    /// Recover a raw key from an encrypted field and its keystream
    pub fn decrypt(encrypted: &[u8; RAW_SECRET_KEY_SIZE], keystream: &Keystream) -> Self {
        let mut raw = Self(*encrypted);
        xor_in_place(&mut raw.0, keystream.as_bytes());
        raw
    }

    /// Encrypt under `keystream`, producing the stored key field
    pub fn encrypt(&self, keystream: &Keystream) -> [u8; RAW_SECRET_KEY_SIZE] {
        let mut out = *keystream.as_bytes();
        xor_in_place(&mut out, &self.0);
        out
    }
}

impl fmt::Debug for SecretKeyBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKeyBytes(..)")
    }
}

/// A 64-byte keystream: the KDF output, or all zeros when unprotected
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Keystream([u8; RAW_SECRET_KEY_SIZE]);

impl Keystream {
    /// The all-zero keystream used for unprotected keys
    pub fn zero() -> Self {
        Self([0u8; RAW_SECRET_KEY_SIZE])
    }

    pub(crate) fn as_mut_bytes(&mut self) -> &mut [u8; RAW_SECRET_KEY_SIZE] {
        &mut self.0
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; RAW_SECRET_KEY_SIZE] {
        &self.0
    }

    /// Check whether this is the all-zero keystream
    pub fn is_zero(&self) -> bool {
        self.0.iter().fold(0u8, |acc, b| acc | b) == 0
    }
}

impl fmt::Debug for Keystream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Keystream(..)")
    }
}
