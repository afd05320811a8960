//! Atomic JSON file writes and tolerant reads.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{PersistenceError, Result};

fn io_error(
    operation: &'static str,
    path: &Path,
) -> impl FnOnce(io::Error) -> PersistenceError + use<> {
    let path = path.to_path_buf();
    move |source| PersistenceError::Io {
        operation,
        path,
        source,
    }
}

/// Write `bytes` to `path` through a sibling temp file and rename.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error("create directory", parent))?;
    }

    let staging = path.with_extension("json.tmp");
    let mut file = File::create(&staging).map_err(io_error("create", &staging))?;
    file.write_all(bytes)
        .and_then(|()| file.sync_all())
        .map_err(io_error("write", &staging))?;
    drop(file);

    fs::rename(&staging, path).map_err(|source| PersistenceError::AtomicWriteFailed {
        target_path: path.to_path_buf(),
        temp_path: staging,
        source,
    })
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_vec_pretty(value).map_err(|e| PersistenceError::Serialization {
        path: path.to_path_buf(),
        source: e,
    })?;
    write_atomic(path, &json)
}

/// Read a JSON document; a missing file is `Ok(None)`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let contents = match fs::read(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_error("read", path)(e)),
    };
    serde_json::from_slice(&contents)
        .map(Some)
        .map_err(|e| PersistenceError::Deserialization {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Remove a file; `Ok(false)` when it did not exist.
pub fn remove_file(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(io_error("delete", path)(e)),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn write_leaves_no_staging_file() {
        let store = tempdir().unwrap();
        let path = store.path().join("nested").join("mapping.json");
        write_json(&path, &["Naam", "Ranking"]).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
        let back: Option<Vec<String>> = read_json(&path).unwrap();
        assert_eq!(back, Some(vec!["Naam".to_string(), "Ranking".to_string()]));
    }

    #[test]
    fn missing_file_reads_as_none() {
        let store = tempdir().unwrap();
        let back: Option<Vec<String>> = read_json(&store.path().join("absent.json")).unwrap();
        assert!(back.is_none());
        assert!(!remove_file(&store.path().join("absent.json")).unwrap());
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let store = tempdir().unwrap();
        let path = store.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();
        let result: Result<Option<Vec<String>>> = read_json(&path);
        assert!(matches!(
            result,
            Err(PersistenceError::Deserialization { .. })
        ));
    }
}
