//! Source file hashing for change detection.

use std::fs::File;
use std::io;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{PersistenceError, Result};

/// SHA-256 of a file's bytes as lowercase hex.
pub fn compute_file_hash(path: &Path) -> Result<String> {
    let read_error = |source| PersistenceError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(read_error)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher).map_err(read_error)?;
    Ok(hex::encode(hasher.finalize()))
}

/// Whether the file still has the recorded hash.
pub fn verify_file_hash(path: &Path, expected_hash: &str) -> Result<bool> {
    compute_file_hash(path).map(|actual| actual.eq_ignore_ascii_case(expected_hash))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn hashes_file_contents() {
        let mut sheet = NamedTempFile::new().unwrap();
        sheet.write_all(b"Hello, World!").unwrap();
        sheet.flush().unwrap();

        let hash = compute_file_hash(sheet.path()).unwrap();
        assert_eq!(
            hash,
            "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f"
        );
        assert!(verify_file_hash(sheet.path(), &hash.to_uppercase()).unwrap());
        assert!(!verify_file_hash(sheet.path(), "00").unwrap());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let result = compute_file_hash(Path::new("/nonexistent/uitslagen.csv"));
        assert!(matches!(
            result,
            Err(PersistenceError::Io {
                operation: "read",
                ..
            })
        ));
    }
}
