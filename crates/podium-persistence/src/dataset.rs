//! Imported dataset snapshots.
//!
//! Each snapshot is one JSON file named after its key inside the store
//! directory. The source file's SHA-256 is recorded at import so a later
//! run can tell whether the sheet changed on disk.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use podium_model::{Dataset, Row, Schema};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{PersistenceError, Result};
use crate::io::{compute_file_hash, read_json, remove_file, write_json};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub path: PathBuf,
    pub hash: String,
}

impl SourceInfo {
    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            hash: compute_file_hash(path)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSnapshot {
    pub version: u32,
    pub imported_at: DateTime<Utc>,
    pub source: Option<SourceInfo>,
    pub schema: Schema,
    pub rows: Vec<Row>,
}

impl DatasetSnapshot {
    pub fn new(dataset: &Dataset, source: Option<SourceInfo>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            imported_at: Utc::now(),
            source,
            schema: dataset.schema().clone(),
            rows: dataset.rows().to_vec(),
        }
    }

    /// Rebuild the dataset, checking every row against the schema width.
    pub fn into_dataset(self, path: &Path) -> Result<Dataset> {
        Dataset::new(self.schema, self.rows).map_err(|source| PersistenceError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Whether the recorded source still matches the file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStatus {
    Unchanged,
    Changed,
    Missing,
    /// No source was recorded.
    Unknown,
}

pub fn verify_source(snapshot: &DatasetSnapshot) -> Result<SourceStatus> {
    let Some(source) = &snapshot.source else {
        return Ok(SourceStatus::Unknown);
    };
    if !source.path.exists() {
        warn!(path = %source.path.display(), "source file missing");
        return Ok(SourceStatus::Missing);
    }
    if compute_file_hash(&source.path)? == source.hash {
        Ok(SourceStatus::Unchanged)
    } else {
        warn!(path = %source.path.display(), "source file modified since import");
        Ok(SourceStatus::Changed)
    }
}

/// Directory of dataset snapshots keyed by name.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    base_dir: PathBuf,
}

impl DatasetStore {
    /// Open a store, creating the directory when needed.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).map_err(|e| PersistenceError::Io {
            operation: "create directory",
            path: base_dir.clone(),
            source: e,
        })?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", normalize_key(key)))
    }

    pub fn save(&self, key: &str, snapshot: &DatasetSnapshot) -> Result<PathBuf> {
        let path = self.path_for(key);
        write_json(&path, snapshot)?;
        info!(
            path = %path.display(),
            rows = snapshot.rows.len(),
            "dataset snapshot saved"
        );
        Ok(path)
    }

    pub fn load(&self, key: &str) -> Result<Option<DatasetSnapshot>> {
        let path = self.path_for(key);
        let Some(snapshot) = read_json::<DatasetSnapshot>(&path)? else {
            return Ok(None);
        };
        if snapshot.version > SNAPSHOT_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: snapshot.version,
                max_supported: SNAPSHOT_VERSION,
                path,
            });
        }
        info!(path = %path.display(), rows = snapshot.rows.len(), "dataset snapshot loaded");
        Ok(Some(snapshot))
    }

    /// Load and rebuild the dataset stored under `key`.
    pub fn load_dataset(&self, key: &str) -> Result<Option<Dataset>> {
        let path = self.path_for(key);
        self.load(key)?
            .map(|snapshot| snapshot.into_dataset(&path))
            .transpose()
    }

    pub fn delete(&self, key: &str) -> Result<bool> {
        remove_file(&self.path_for(key))
    }

    /// Stored keys, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.base_dir).map_err(|e| PersistenceError::Io {
            operation: "list",
            path: self.base_dir.clone(),
            source: e,
        })?;
        let mut keys: Vec<String> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| path.file_stem()?.to_str().map(str::to_string))
            .collect();
        keys.sort();
        Ok(keys)
    }
}

/// Keep keys usable as file names.
fn normalize_key(key: &str) -> String {
    let cleaned: String = key
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "dataset".to_string()
    } else {
        cleaned
    }
}
