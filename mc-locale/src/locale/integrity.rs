//! Content integrity verification using SHA-1 hashes
//!
//! The upstream asset store is content-addressed by SHA-1, so the hash of a
//! cached file is both its freshness marker and its download address.

use ring::digest::{Context, SHA1_FOR_LEGACY_USE_ONLY};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use thiserror::Error;

/// Length of a hex-encoded SHA-1 digest
const SHA1_HEX_LEN: usize = 40;

/// Compute the SHA-1 of content as lowercase hex
///
/// # Example
/// ```
/// use mc_locale::locale::compute_sha1;
///
/// let hash = compute_sha1(b"hello world");
/// assert_eq!(hash, "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed");
/// ```
pub fn compute_sha1(data: &[u8]) -> String {
    let mut context = Context::new(&SHA1_FOR_LEGACY_USE_ONLY);
    context.update(data);
    hex::encode(context.finish().as_ref())
}

/// Compute the SHA-1 of a file without loading it into memory
pub fn compute_file_sha1(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut context = Context::new(&SHA1_FOR_LEGACY_USE_ONLY);
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        context.update(&buf[..n]);
    }
    Ok(hex::encode(context.finish().as_ref()))
}

/// Verify content against an expected SHA-1 hex digest
///
/// Comparison is case-insensitive.
pub fn verify_sha1(data: &[u8], expected: &str) -> Result<(), IntegrityError> {
    if expected.len() != SHA1_HEX_LEN || !expected.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(IntegrityError::InvalidFormat(expected.to_string()));
    }

    let actual = compute_sha1(data);
    if actual.eq_ignore_ascii_case(expected) {
        Ok(())
    } else {
        Err(IntegrityError::HashMismatch {
            expected: expected.to_lowercase(),
            actual,
        })
    }
}

/// Errors that can occur during integrity verification
#[derive(Debug, Error)]
pub enum IntegrityError {
    /// Hash is not 40 hex characters
    #[error("Invalid SHA-1 format: {0:?}")]
    InvalidFormat(String),

    /// Computed hash doesn't match expected hash
    #[error("Hash mismatch: expected {expected}, got {actual}")]
    HashMismatch {
        /// Expected hash
        expected: String,
        /// Actual computed hash
        actual: String,
    },
}
