//! Constant-time helpers and the little-endian integer codec.
//!
//! Comparisons in this module never exit early on content, so the time
//! they take does not reveal where two values first differ.

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// Compare two byte strings in constant time.
///
/// Inputs of different lengths compare unequal; lengths in this crate
/// are fixed by the envelope layouts and are never secret.
#[must_use]
pub fn ct_eq(x: &[u8], y: &[u8]) -> bool {
    if x.len() != y.len() {
        return false;
    }
    x.ct_eq(y).into()
}

/// Overwrite `buf` with zeros in a way the optimizer cannot remove.
pub fn wipe(buf: &mut [u8]) {
    buf.zeroize();
}

/// XOR `src` into `dst` in place.
///
/// Used to apply a keystream to key material in both directions.
pub(crate) fn xor_in_place(dst: &mut [u8], src: &[u8]) {
    debug_assert_eq!(dst.len(), src.len());
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d ^= *s;
    }
}

/// Encode a u32 as 4 little-endian bytes.
pub fn le32_encode(x: u32) -> [u8; 4] {
    x.to_le_bytes()
}

/// Decode 4 little-endian bytes into a u32.
pub fn le32_decode(bytes: [u8; 4]) -> u32 {
    u32::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ct_eq() {
        assert!(ct_eq(b"fingerpr", b"fingerpr"));
        assert!(!ct_eq(b"fingerpr", b"fingerpX"));
        assert!(!ct_eq(b"Xingerpr", b"fingerpr"));
        assert!(!ct_eq(b"short", b"longer"));
        assert!(ct_eq(b"", b""));
    }

    #[test]
    fn test_wipe() {
        let mut buf = [0xA5u8; 64];
        wipe(&mut buf);
        assert_eq!(buf, [0u8; 64]);
    }

    #[test]
    fn test_xor_in_place_is_involution() {
        let original = [0x11u8, 0x22, 0x33, 0x44];
        let stream = [0xFFu8, 0x00, 0x0F, 0xF0];

        let mut buf = original;
        xor_in_place(&mut buf, &stream);
        assert_eq!(buf, [0xEE, 0x22, 0x3C, 0xB4]);

        xor_in_place(&mut buf, &stream);
        assert_eq!(buf, original);
    }

    #[test]
    fn test_le32_layout() {
        assert_eq!(le32_encode(14), [14, 0, 0, 0]);
        assert_eq!(le32_encode(0x0102_0304), [0x04, 0x03, 0x02, 0x01]);
        assert_eq!(le32_decode([0x04, 0x03, 0x02, 0x01]), 0x0102_0304);
        assert_eq!(le32_decode(le32_encode(u32::MAX)), u32::MAX);
    }
}
