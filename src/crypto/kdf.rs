//! # Password Key Derivation
//!
//! Secret keys are encrypted at rest by XOR with a 64-byte keystream
//! derived from the user's password with scrypt.
//!
//! ## Keystream Derivation
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    KEYSTREAM DERIVATION                                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Protected(KdfCost { log_n, r, p })                                    │
//! │  ──────────────────────────────────                                     │
//! │                                                                         │
//! │    scrypt(                                                             │
//! │      password,                                                         │
//! │      salt   = 16 random bytes (fresh per encryption),                  │
//! │      N      = 2^log_n,                                                 │
//! │      r, p,                                                             │
//! │      dkLen  = 64                                                       │
//! │    )                                                                   │
//! │    → 64-byte keystream                                                 │
//! │                                                                         │
//! │  Unprotected                                                           │
//! │  ───────────                                                           │
//! │                                                                         │
//! │    keystream = [0; 64]   (stored key = raw key)                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Cost Parameters
//!
//! | Field | Meaning | Memory / time effect |
//! |-------|---------|----------------------|
//! | `log_n` | log2 of the scrypt work factor | memory ≈ 128 · r · 2^log_n |
//! | `r` | block size | scales memory and time |
//! | `p` | parallelism | scales time only |
//!
//! The default (14, 8, 1) costs about 16 MiB per derivation.
//!
//! On the wire, an unprotected key stores the triple (0, 0, 0). Inside the
//! crate that sentinel only exists as [`Protection::Unprotected`]; a
//! [`KdfCost`] can never hold a zero field.

use serde::{Deserialize, Serialize};

use crate::crypto::secret::Keystream;
use crate::error::{Error, Result};

/// Size of the per-encryption salt in bytes
pub const SALT_SIZE: usize = 16;

/// Largest scrypt working set (1 GiB) a derivation may allocate
pub const MAX_MEMORY_BYTES: u64 = 1 << 30;

/// Default log2 work factor
pub const DEFAULT_LOG_N: u32 = 14;

/// Default scrypt block size
pub const DEFAULT_R: u32 = 8;

/// Default scrypt parallelism
pub const DEFAULT_P: u32 = 1;

/// scrypt cost parameters for a password-protected key
///
/// All three fields are strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawKdfCost", into = "RawKdfCost")]
pub struct KdfCost {
    log_n: u32,
    r: u32,
    p: u32,
}

impl KdfCost {
    /// Create a cost triple
    ///
    /// Fails with `InvalidArgument` if any field is zero or if `log_n` is
    /// too large to describe a work factor. Combinations scrypt itself
    /// rejects (for example `log_n >= 16 * r`) are reported at derivation
    /// time.
    pub fn new(log_n: u32, r: u32, p: u32) -> Result<Self> {
        if log_n == 0 || r == 0 || p == 0 {
            return Err(Error::invalid(format!(
                "KDF cost fields must be positive, got N={} r={} p={}",
                log_n, r, p
            )));
        }
        if log_n >= 64 {
            return Err(Error::invalid(format!("KDF log2 work factor {} out of range", log_n)));
        }
        Ok(Self { log_n, r, p })
    }

    /// log2 of the scrypt work factor
    pub fn log_n(&self) -> u32 {
        self.log_n
    }

    /// scrypt block size
    pub fn r(&self) -> u32 {
        self.r
    }

    /// scrypt parallelism
    pub fn p(&self) -> u32 {
        self.p
    }

    /// Approximate scrypt working-set size in bytes (128 · r · 2^log_n)
    ///
    /// Saturates at `u64::MAX` for absurd parameters.
    pub fn memory_bytes(&self) -> u64 {
        1u64.checked_shl(self.log_n)
            .and_then(|n| n.checked_mul(128))
            .and_then(|v| v.checked_mul(self.r as u64))
            .unwrap_or(u64::MAX)
    }

    /// Size of the `p` parallel mixing blocks (128 · r · p)
    ///
    /// Saturates like [`memory_bytes`](Self::memory_bytes).
    pub fn block_bytes(&self) -> u64 {
        (128 * self.r as u64).saturating_mul(self.p as u64)
    }

    fn check_memory(&self) -> Result<()> {
        let needed = self.memory_bytes().saturating_add(self.block_bytes());
        if needed > MAX_MEMORY_BYTES {
            return Err(Error::invalid(format!(
                "KDF cost N=2^{} r={} p={} needs {} bytes, limit is {}",
                self.log_n, self.r, self.p, needed, MAX_MEMORY_BYTES
            )));
        }
        Ok(())
    }
}

impl Default for KdfCost {
    fn default() -> Self {
        Self {
            log_n: DEFAULT_LOG_N,
            r: DEFAULT_R,
            p: DEFAULT_P,
        }
    }
}

/// Unvalidated wire form used by serde
#[derive(Serialize, Deserialize)]
struct RawKdfCost {
    log_n: u32,
    r: u32,
    p: u32,
}

impl TryFrom<RawKdfCost> for KdfCost {
    type Error = Error;

    fn try_from(raw: RawKdfCost) -> Result<Self> {
        KdfCost::new(raw.log_n, raw.r, raw.p)
    }
}

impl From<KdfCost> for RawKdfCost {
    fn from(cost: KdfCost) -> Self {
        Self {
            log_n: cost.log_n,
            r: cost.r,
            p: cost.p,
        }
    }
}

/// Whether a secret key is encrypted under a password
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protection {
    /// Stored key equals the raw key
    Unprotected,
    /// Stored key is the raw key XOR an scrypt keystream
    Protected(KdfCost),
}

impl Protection {
    /// Choose the protection for a new or rekeyed secret key
    ///
    /// Cost parameters only matter when a password is supplied.
    pub fn for_password(password: Option<&[u8]>, cost: KdfCost) -> Self {
        match password {
            Some(_) => Protection::Protected(cost),
            None => Protection::Unprotected,
        }
    }

    /// Decode the on-wire triple
    ///
    /// `(0, 0, 0)` is the only encoding of an unprotected key; a triple with
    /// some but not all fields zero is malformed.
    pub fn from_wire(log_n: u32, r: u32, p: u32) -> Result<Self> {
        if log_n == 0 && r == 0 && p == 0 {
            return Ok(Protection::Unprotected);
        }
        KdfCost::new(log_n, r, p).map(Protection::Protected)
    }

    /// Encode as the on-wire triple
    pub fn to_wire(&self) -> (u32, u32, u32) {
        match self {
            Protection::Unprotected => (0, 0, 0),
            Protection::Protected(cost) => (cost.log_n, cost.r, cost.p),
        }
    }

    /// Check whether a password is needed to decrypt
    pub fn is_protected(&self) -> bool {
        matches!(self, Protection::Protected(_))
    }

    /// Produce the keystream for this protection state
    ///
    /// A protected key with no password gets the zero keystream, which then
    /// fails the key-check digest as a wrong password would.
    pub fn keystream(&self, password: Option<&[u8]>, salt: &[u8; SALT_SIZE]) -> Result<Keystream> {
        match (self, password) {
            (Protection::Protected(cost), Some(password)) => derive_keystream(password, salt, cost),
            _ => Ok(Keystream::zero()),
        }
    }
}

/// Derive a 64-byte keystream from a password with scrypt
///
/// Any rejection by scrypt (unsupported parameter combination, parameters
/// too large for this platform) is reported as `InvalidArgument`, as is a
/// cost whose working set exceeds [`MAX_MEMORY_BYTES`]. The memory check
/// runs before anything is allocated.
pub fn derive_keystream(password: &[u8], salt: &[u8; SALT_SIZE], cost: &KdfCost) -> Result<Keystream> {
    cost.check_memory()?;

    let log_n = u8::try_from(cost.log_n)
        .map_err(|_| Error::invalid(format!("KDF log2 work factor {} out of range", cost.log_n)))?;

    let mut keystream = Keystream::zero();
    let params = scrypt::Params::new(log_n, cost.r, cost.p, keystream.as_bytes().len())
        .map_err(|e| Error::invalid(format!("KDF rejected cost parameters: {}", e)))?;

    tracing::debug!(
        log_n = cost.log_n,
        r = cost.r,
        p = cost.p,
        memory_bytes = cost.memory_bytes(),
        "Deriving keystream"
    );

    scrypt::scrypt(password, salt, &params, keystream.as_mut_bytes())
        .map_err(|e| Error::invalid(format!("KDF failed: {}", e)))?;

    Ok(keystream)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> KdfCost {
        KdfCost::new(4, 8, 1).unwrap()
    }

    #[test]
    fn test_cost_rejects_zero_fields() {
        assert!(KdfCost::new(0, 8, 1).is_err());
        assert!(KdfCost::new(14, 0, 1).is_err());
        assert!(KdfCost::new(14, 8, 0).is_err());
        assert!(KdfCost::new(64, 8, 1).is_err());
        assert!(KdfCost::new(14, 8, 1).is_ok());
    }

    #[test]
    fn test_default_cost() {
        let cost = KdfCost::default();
        assert_eq!((cost.log_n(), cost.r(), cost.p()), (14, 8, 1));
        assert_eq!(cost.memory_bytes(), 16 * 1024 * 1024);
    }

    #[test]
    fn test_wire_sentinel() {
        assert_eq!(Protection::from_wire(0, 0, 0).unwrap(), Protection::Unprotected);
        assert_eq!(Protection::Unprotected.to_wire(), (0, 0, 0));

        let protected = Protection::from_wire(14, 8, 1).unwrap();
        assert!(protected.is_protected());
        assert_eq!(protected.to_wire(), (14, 8, 1));
    }

    #[test]
    fn test_wire_partial_zero_is_malformed() {
        let err = Protection::from_wire(14, 0, 1).unwrap_err();
        assert_eq!(err.code(), 2);
        assert!(Protection::from_wire(0, 8, 1).is_err());
    }

    #[test]
    fn test_for_password() {
        assert_eq!(Protection::for_password(None, cheap()), Protection::Unprotected);
        assert_eq!(
            Protection::for_password(Some(b"pw"), cheap()),
            Protection::Protected(cheap())
        );
    }

    #[test]
    fn test_derive_deterministic() {
        let salt = [0x42u8; SALT_SIZE];
        let k1 = derive_keystream(b"my passphrase", &salt, &cheap()).unwrap();
        let k2 = derive_keystream(b"my passphrase", &salt, &cheap()).unwrap();
        assert_eq!(k1.as_bytes(), k2.as_bytes());
        assert!(!k1.is_zero());
    }

    #[test]
    fn test_derive_different_password_or_salt() {
        let k1 = derive_keystream(b"pass1", &[1u8; SALT_SIZE], &cheap()).unwrap();
        let k2 = derive_keystream(b"pass2", &[1u8; SALT_SIZE], &cheap()).unwrap();
        let k3 = derive_keystream(b"pass1", &[2u8; SALT_SIZE], &cheap()).unwrap();
        assert_ne!(k1.as_bytes(), k2.as_bytes());
        assert_ne!(k1.as_bytes(), k3.as_bytes());
    }

    #[test]
    fn test_derive_rejects_unsupported_combination() {
        // scrypt requires log_n < 16 * r
        let cost = KdfCost::new(20, 1, 1).unwrap();
        let err = derive_keystream(b"pw", &[0u8; SALT_SIZE], &cost).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_derive_rejects_oversized_memory() {
        // 2^40 · 128 · 8 bytes; scrypt itself accepts this combination
        let cost = KdfCost::new(40, 8, 1).unwrap();
        let err = derive_keystream(b"pw", &[0u8; SALT_SIZE], &cost).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        // Parallel blocks count toward the limit too
        let wide = KdfCost::new(4, 8, 1 << 20).unwrap();
        assert!(wide.memory_bytes() < MAX_MEMORY_BYTES);
        assert_eq!(derive_keystream(b"pw", &[0u8; SALT_SIZE], &wide).unwrap_err().code(), 2);
    }

    #[test]
    fn test_default_cost_within_limit() {
        let cost = KdfCost::default();
        assert!(cost.memory_bytes() + cost.block_bytes() <= MAX_MEMORY_BYTES);
    }

    #[test]
    fn test_keystream_without_password_is_zero() {
        let salt = [3u8; SALT_SIZE];
        let protected = Protection::Protected(cheap());
        assert!(protected.keystream(None, &salt).unwrap().is_zero());
        assert!(Protection::Unprotected.keystream(Some(b"ignored"), &salt).unwrap().is_zero());
        assert!(!protected.keystream(Some(b"pw"), &salt).unwrap().is_zero());
    }

    #[test]
    fn test_cost_serde() {
        let json = serde_json::to_string(&KdfCost::default()).unwrap();
        assert_eq!(json, r#"{"log_n":14,"r":8,"p":1}"#);

        let restored: KdfCost = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, KdfCost::default());

        assert!(serde_json::from_str::<KdfCost>(r#"{"log_n":0,"r":8,"p":1}"#).is_err());
    }
}
