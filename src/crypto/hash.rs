//! SHA-512 hashing for key-check digests and hash-then-sign.

use sha2::digest::generic_array::GenericArray;
use sha2::{Digest, Sha512};
use zeroize::Zeroizing;

/// Size of a full hash digest in bytes
pub const DIGEST_SIZE: usize = 64;

/// Size of the truncated key-check digest stored in a secret key
pub const KEY_CHECK_SIZE: usize = 8;

/// Hash arbitrary data to a 64-byte digest
pub fn digest(data: &[u8]) -> [u8; DIGEST_SIZE] {
    let mut out = [0u8; DIGEST_SIZE];
    out.copy_from_slice(&Sha512::digest(data));
    out
}

/// Compute the truncated digest recorded alongside an encrypted key
///
/// The full digest is computed over the raw secret key and only the first
/// eight bytes are kept; the full value never leaves this function.
pub fn key_check(raw_key: &[u8]) -> [u8; KEY_CHECK_SIZE] {
    let mut full = Zeroizing::new([0u8; DIGEST_SIZE]);
    let mut hasher = Sha512::new();
    hasher.update(raw_key);
    hasher.finalize_into_reset(GenericArray::from_mut_slice(&mut full[..]));

    // sha2 keeps a partial block buffered and cannot zeroize itself.
    // Fill the buffer with zeros (one byte short of a block, so it is
    // copied in rather than compressed straight from the input).
    hasher.update([0u8; SCRUB_LEN]);

    let mut out = [0u8; KEY_CHECK_SIZE];
    out.copy_from_slice(&full[..KEY_CHECK_SIZE]);
    out
}

/// SHA-512 block size minus one
const SCRUB_LEN: usize = 127;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_known_vector() {
        // SHA-512("abc")
        let expected = hex::decode(
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f",
        )
        .unwrap();
        assert_eq!(digest(b"abc").to_vec(), expected);
    }

    #[test]
    fn test_key_check_is_digest_prefix() {
        let raw = [9u8; 64];
        assert_eq!(key_check(&raw)[..], digest(&raw)[..KEY_CHECK_SIZE]);
    }

    #[test]
    fn test_key_check_differs_per_key() {
        assert_ne!(key_check(&[1u8; 64]), key_check(&[2u8; 64]));
    }
}
