//! Checksum calculation for artifact verification

use crate::domain::Result;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Calculate SHA-256 checksum of raw bytes
///
/// Returns a hex-encoded SHA-256 checksum string (64 characters).
///
/// # Examples
///
/// ```
/// use morphex::core::verification::checksum::calculate_checksum_bytes;
///
/// let checksum = calculate_checksum_bytes(b"<svg/>");
/// assert_eq!(checksum.len(), 64);
/// ```
pub fn calculate_checksum_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    format!("{result:x}")
}

/// Calculate SHA-256 checksum of a file's contents
pub fn calculate_file_checksum(path: &Path) -> Result<String> {
    let data = fs::read(path)?;
    Ok(calculate_checksum_bytes(&data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_checksum_bytes_known_value() {
        assert_eq!(
            calculate_checksum_bytes(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_checksum_different_content() {
        assert_ne!(
            calculate_checksum_bytes(b"<svg/>"),
            calculate_checksum_bytes(b"<svg />")
        );
    }

    #[test]
    fn test_file_checksum_matches_bytes() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"var library = {};").unwrap();

        let from_file = calculate_file_checksum(file.path()).unwrap();
        assert_eq!(from_file, calculate_checksum_bytes(b"var library = {};"));
    }

    #[test]
    fn test_file_checksum_missing_file() {
        assert!(calculate_file_checksum(Path::new("/nonexistent/3.svg")).is_err());
    }
}
