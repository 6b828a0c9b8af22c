//! Checksum utilities for stored source files

use crate::error::{CommonError, Result};
use sha2::{Digest, Sha256};

/// Compute the lowercase hex SHA-256 digest of an in-memory buffer
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Verify a buffer against an expected SHA-256 digest
pub fn verify_sha256(data: &[u8], expected: &str) -> Result<()> {
    let actual = sha256_hex(data);
    if actual.eq_ignore_ascii_case(expected) {
        Ok(())
    } else {
        Err(CommonError::ChecksumMismatch {
            expected: expected.to_string(),
            actual,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const HELLO_WORLD_SHA256: &str =
        "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    #[test]
    fn test_sha256_hex() {
        assert_eq!(sha256_hex(b"hello world"), HELLO_WORLD_SHA256);
    }

    #[test]
    fn test_verify_sha256_accepts_any_case() {
        assert!(verify_sha256(b"hello world", HELLO_WORLD_SHA256).is_ok());
        assert!(verify_sha256(b"hello world", &HELLO_WORLD_SHA256.to_uppercase()).is_ok());
    }

    #[test]
    fn test_verify_sha256_mismatch() {
        let err = verify_sha256(b"hello", HELLO_WORLD_SHA256).unwrap_err();
        match err {
            CommonError::ChecksumMismatch { expected, actual } => {
                assert_eq!(expected, HELLO_WORLD_SHA256);
                assert_eq!(actual, sha256_hex(b"hello"));
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
