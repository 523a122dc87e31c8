//! Secure random bytes from the operating system.
//!
//! `OsRng` opens whatever OS handle it needs lazily, once per process, and
//! shares it read-only afterwards. Transient failures (an entropy pool that
//! is not ready yet, an interrupted read) are retried with a short linear
//! backoff before giving up.

use std::thread;
use std::time::Duration;

use rand::rngs::OsRng;
use rand_core::RngCore;

use crate::error::{Error, Result};

/// Number of attempts before a random read is reported as failed
const MAX_ATTEMPTS: u32 = 8;

/// Backoff step between attempts
const BACKOFF_STEP: Duration = Duration::from_millis(25);

/// Fill `buf` with cryptographically secure random bytes
pub fn fill(buf: &mut [u8]) -> Result<()> {
    if buf.is_empty() {
        return Ok(());
    }

    let mut attempt = 1;
    loop {
        match OsRng.try_fill_bytes(buf) {
            Ok(()) => return Ok(()),
            Err(e) if attempt < MAX_ATTEMPTS => {
                tracing::warn!(attempt, "Random source not ready, retrying: {}", e);
                thread::sleep(BACKOFF_STEP * attempt);
                attempt += 1;
            }
            Err(e) => {
                return Err(Error::Internal(format!("Random source unavailable: {}", e)));
            }
        }
    }
}

/// Draw a fixed-size array of random bytes
pub fn array<const N: usize>() -> Result<[u8; N]> {
    let mut out = [0u8; N];
    fill(&mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_produces_distinct_values() {
        let a: [u8; 16] = array().unwrap();
        let b: [u8; 16] = array().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_fill_empty_is_noop() {
        let mut buf: [u8; 0] = [];
        assert!(fill(&mut buf).is_ok());
    }

    #[test]
    fn test_fill_large_buffer() {
        let mut buf = vec![0u8; 4096];
        fill(&mut buf).unwrap();
        assert!(buf.iter().any(|&b| b != 0));
    }
}
