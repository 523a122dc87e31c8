//! # Slice Boundary
//!
//! Buffer-oriented entry points for callers that hold keys and signatures
//! as plain byte slices (FFI shims, storage layers, wire handlers).
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SLICE BOUNDARY RULES                             │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Inputs    exact blob length required, else InvalidArgument            │
//! │  Outputs   at least the blob length; only the prefix is written        │
//! │  Failure   every output buffer is wiped to zeros before returning      │
//! │  Success   Ok(()), i.e. code 0 at a C boundary                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing partially written ever survives a failed call, so a caller that
//! ignores the error still sees an all-zero buffer rather than half a key.

use zeroize::Zeroizing;

use crate::crypto::{wipe, KdfCost};
use crate::envelope::{
    PublicKey, SecretKey, Signature, FINGERPRINT_BYTES, PUBLIC_KEY_BYTES, SECRET_KEY_BYTES,
    SIGNATURE_BYTES,
};
use crate::error::{Error, Result};
use crate::{keypair, signing};

fn check_output(out: &[u8], len: usize, what: &str) -> Result<()> {
    if out.len() < len {
        return Err(Error::invalid(format!(
            "{} buffer too small: {} < {}",
            what,
            out.len(),
            len
        )));
    }
    Ok(())
}

/// Run `f` and wipe `out` if it fails
fn blank_on_error<T>(out: &mut [u8], f: impl FnOnce(&mut [u8]) -> Result<T>) -> Result<T> {
    let result = f(out);
    if result.is_err() {
        wipe(out);
    }
    result
}

/// Generate a keypair into caller-owned buffers
///
/// Writes a 42-byte public key to `public_out` and a 112-byte secret key to
/// `secret_out`. On any failure both buffers are zeroed.
pub fn generate_into(
    public_out: &mut [u8],
    secret_out: &mut [u8],
    password: Option<&[u8]>,
    cost: KdfCost,
) -> Result<()> {
    let result = (|| {
        check_output(public_out, PUBLIC_KEY_BYTES, "Public key")?;
        check_output(secret_out, SECRET_KEY_BYTES, "Secret key")?;

        let (pk, sk) = keypair::generate(password, cost)?;
        let sk_bytes = Zeroizing::new(sk.to_bytes());

        public_out[..PUBLIC_KEY_BYTES].copy_from_slice(&pk.to_bytes());
        secret_out[..SECRET_KEY_BYTES].copy_from_slice(&sk_bytes[..]);
        Ok(())
    })();

    if result.is_err() {
        wipe(public_out);
        wipe(secret_out);
    }
    result
}

/// Re-encrypt a 112-byte secret key into `secret_out`
///
/// `secret_out` may not alias `secret_in`; the borrow checker enforces it.
pub fn rekey_into(
    secret_out: &mut [u8],
    secret_in: &[u8],
    old_password: Option<&[u8]>,
    new_password: Option<&[u8]>,
    cost: KdfCost,
) -> Result<()> {
    blank_on_error(secret_out, |out| {
        check_output(out, SECRET_KEY_BYTES, "Secret key")?;
        let old = SecretKey::from_bytes(secret_in)?;
        let rekeyed = keypair::rekey(old_password, new_password, cost, &old)?;
        out[..SECRET_KEY_BYTES].copy_from_slice(&Zeroizing::new(rekeyed.to_bytes())[..]);
        Ok(())
    })
}

/// Sign `message` with a 112-byte secret key, writing a 74-byte signature
pub fn sign_into(
    signature_out: &mut [u8],
    secret_key: &[u8],
    password: Option<&[u8]>,
    message: &[u8],
) -> Result<()> {
    blank_on_error(signature_out, |out| {
        check_output(out, SIGNATURE_BYTES, "Signature")?;
        let sk = SecretKey::from_bytes(secret_key)?;
        let sig = signing::sign(password, &sk, message)?;
        out[..SIGNATURE_BYTES].copy_from_slice(&sig.to_bytes());
        Ok(())
    })
}

/// Verify a 74-byte signature against a 42-byte public key
pub fn verify_slices(public_key: &[u8], signature: &[u8], message: &[u8]) -> Result<()> {
    let pk = PublicKey::from_bytes(public_key)?;
    let sig = Signature::from_bytes(signature)?;
    signing::verify(&pk, &sig, message)
}

fn fingerprint_into(
    out: &mut [u8],
    read: impl FnOnce() -> Result<crate::envelope::Fingerprint>,
) -> Result<()> {
    blank_on_error(out, |out| {
        check_output(out, FINGERPRINT_BYTES, "Fingerprint")?;
        out[..FINGERPRINT_BYTES].copy_from_slice(read()?.as_bytes());
        Ok(())
    })
}

/// Copy a public key's fingerprint into `out`
pub fn public_key_fingerprint_into(out: &mut [u8], public_key: &[u8]) -> Result<()> {
    fingerprint_into(out, || keypair::public_key_fingerprint(public_key))
}

/// Copy a secret key's fingerprint into `out`
pub fn secret_key_fingerprint_into(out: &mut [u8], secret_key: &[u8]) -> Result<()> {
    fingerprint_into(out, || keypair::secret_key_fingerprint(secret_key))
}

/// Copy a signature's fingerprint into `out`
pub fn signature_fingerprint_into(out: &mut [u8], signature: &[u8]) -> Result<()> {
    fingerprint_into(out, || keypair::signature_fingerprint(signature))
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

    fn generated(password: Option<&[u8]>) -> ([u8; PUBLIC_KEY_BYTES], [u8; SECRET_KEY_BYTES]) {
        let mut pk = [0u8; PUBLIC_KEY_BYTES];
        let mut sk = [0u8; SECRET_KEY_BYTES];
        generate_into(&mut pk, &mut sk, password, cheap()).unwrap();
        (pk, sk)
    }

    #[test]
    fn test_full_flow() {
        let (pk, sk) = generated(Some(b"pw"));
        let mut sig = [0u8; SIGNATURE_BYTES];
        sign_into(&mut sig, &sk, Some(b"pw"), b"Hello world!").unwrap();
        assert!(verify_slices(&pk, &sig, b"Hello world!").is_ok());

        let mut fp_pk = [0u8; FINGERPRINT_BYTES];
        let mut fp_sk = [0u8; FINGERPRINT_BYTES];
        let mut fp_sig = [0u8; FINGERPRINT_BYTES];
        public_key_fingerprint_into(&mut fp_pk, &pk).unwrap();
        secret_key_fingerprint_into(&mut fp_sk, &sk).unwrap();
        signature_fingerprint_into(&mut fp_sig, &sig).unwrap();
        assert_eq!(fp_pk, fp_sk);
        assert_eq!(fp_pk, fp_sig);
        assert_eq!(&fp_pk, &pk[2..10]);
    }

    #[test]
    fn test_generate_into_short_buffers() {
        let mut pk = [0xFFu8; PUBLIC_KEY_BYTES - 1];
        let mut sk = [0xFFu8; SECRET_KEY_BYTES];
        let err = generate_into(&mut pk, &mut sk, None, cheap()).unwrap_err();

        assert_eq!(err.code(), 2);
        assert_eq!(pk, [0u8; PUBLIC_KEY_BYTES - 1]);
        assert_eq!(sk, [0u8; SECRET_KEY_BYTES]);
    }

    #[test]
    fn test_generate_into_kdf_failure_blanks_outputs() {
        let mut pk = [0xFFu8; PUBLIC_KEY_BYTES];
        let mut sk = [0xFFu8; SECRET_KEY_BYTES];
        let cost = KdfCost::new(20, 1, 1).unwrap();
        let err = generate_into(&mut pk, &mut sk, Some(b"pw"), cost).unwrap_err();

        assert_eq!(err.code(), 2);
        assert_eq!(pk, [0u8; PUBLIC_KEY_BYTES]);
        assert_eq!(sk, [0u8; SECRET_KEY_BYTES]);
    }

    #[test]
    fn test_generate_into_larger_buffers() {
        let mut pk = [0xAAu8; 64];
        let mut sk = [0xAAu8; 128];
        generate_into(&mut pk, &mut sk, None, cheap()).unwrap();

        assert_eq!(&pk[..2], b"Ed");
        assert_eq!(&pk[PUBLIC_KEY_BYTES..], &[0xAA; 64 - PUBLIC_KEY_BYTES]);
        assert_eq!(&sk[SECRET_KEY_BYTES..], &[0xAA; 128 - SECRET_KEY_BYTES]);
    }

    #[test]
    fn test_rekey_into() {
        let (pk, sk) = generated(Some(b"pw1"));
        let mut rekeyed = [0u8; SECRET_KEY_BYTES];
        rekey_into(&mut rekeyed, &sk, Some(b"pw1"), Some(b"pw2"), cheap()).unwrap();

        let mut sig = [0u8; SIGNATURE_BYTES];
        sign_into(&mut sig, &rekeyed, Some(b"pw2"), b"msg").unwrap();
        assert!(verify_slices(&pk, &sig, b"msg").is_ok());
    }

    #[test]
    fn test_rekey_into_wrong_password_blanks_output() {
        let (_, sk) = generated(Some(b"pw1"));
        let mut out = [0xFFu8; SECRET_KEY_BYTES];
        let err = rekey_into(&mut out, &sk, Some(b"bad"), None, cheap()).unwrap_err();

        assert_eq!(err, Error::Authentication);
        assert_eq!(out, [0u8; SECRET_KEY_BYTES]);
    }

    #[test]
    fn test_sign_into_wrong_password_blanks_output() {
        let (_, sk) = generated(Some(b"pw"));
        let mut sig = [0xFFu8; SIGNATURE_BYTES];
        let err = sign_into(&mut sig, &sk, Some(b"nope"), b"msg").unwrap_err();

        assert_eq!(err.code(), 3);
        assert_eq!(sig, [0u8; SIGNATURE_BYTES]);
    }

    #[test]
    fn test_sign_into_bad_secret_key() {
        let mut sig = [0xFFu8; SIGNATURE_BYTES];
        let err = sign_into(&mut sig, &[0u8; SECRET_KEY_BYTES], None, b"msg").unwrap_err();

        assert_eq!(err.code(), 2);
        assert_eq!(sig, [0u8; SIGNATURE_BYTES]);
    }

    #[test]
    fn test_verify_slices_errors() {
        let (pk, sk) = generated(None);
        let (other_pk, _) = generated(None);
        let mut sig = [0u8; SIGNATURE_BYTES];
        sign_into(&mut sig, &sk, None, b"msg").unwrap();

        assert_eq!(verify_slices(&other_pk, &sig, b"msg").unwrap_err().code(), 4);
        assert_eq!(verify_slices(&pk, &sig, b"other").unwrap_err().code(), 5);
        assert_eq!(verify_slices(&pk[..41], &sig, b"msg").unwrap_err().code(), 2);
        assert_eq!(verify_slices(&pk, &sig[..73], b"msg").unwrap_err().code(), 2);
    }

    #[test]
    fn test_secret_key_fingerprint_into_skips_kdf_fields() {
        let (pk, mut sk) = generated(Some(b"pw"));
        sk[8..12].copy_from_slice(&[0, 0, 0, 0]);

        let mut out = [0u8; FINGERPRINT_BYTES];
        secret_key_fingerprint_into(&mut out, &sk).unwrap();
        assert_eq!(&out, &pk[2..10]);
    }

    #[test]
    fn test_fingerprint_into_errors_blank_output() {
        let mut out = [0xFFu8; FINGERPRINT_BYTES];
        let err = public_key_fingerprint_into(&mut out, &[0u8; PUBLIC_KEY_BYTES]).unwrap_err();
        assert_eq!(err.code(), 2);
        assert_eq!(out, [0u8; FINGERPRINT_BYTES]);

        let (pk, _) = generated(None);
        let mut short = [0xFFu8; FINGERPRINT_BYTES - 1];
        assert!(public_key_fingerprint_into(&mut short, &pk).is_err());
        assert_eq!(short, [0u8; FINGERPRINT_BYTES - 1]);
    }
}
