//! Persisted column mapping.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use podium_model::PartialMapping;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{PersistenceError, Result};
use crate::io::{read_json, remove_file, write_json};

/// Format version written by this build.
pub const MAPPING_VERSION: u32 = 1;

/// Mapping file contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMapping {
    #[serde(default = "default_version")]
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub mapping: PartialMapping,
}

fn default_version() -> u32 {
    MAPPING_VERSION
}

impl StoredMapping {
    pub fn new(mapping: PartialMapping) -> Self {
        Self {
            version: MAPPING_VERSION,
            saved_at: Utc::now(),
            mapping,
        }
    }
}

/// A `role -> column` mapping kept in one JSON file.
#[derive(Debug, Clone)]
pub struct MappingStore {
    path: PathBuf,
}

impl MappingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, mapping: &PartialMapping) -> Result<StoredMapping> {
        let stored = StoredMapping::new(mapping.clone());
        write_json(&self.path, &stored)?;
        info!(path = %self.path.display(), roles = mapping.len(), "mapping saved");
        Ok(stored)
    }

    pub fn load_stored(&self) -> Result<Option<StoredMapping>> {
        let Some(stored) = read_json::<StoredMapping>(&self.path)? else {
            return Ok(None);
        };
        if stored.version > MAPPING_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: stored.version,
                max_supported: MAPPING_VERSION,
                path: self.path.clone(),
            });
        }
        Ok(Some(stored))
    }

    /// The saved mapping, or an empty one when nothing was saved yet.
    pub fn load(&self) -> Result<PartialMapping> {
        Ok(self
            .load_stored()?
            .map(|stored| stored.mapping)
            .unwrap_or_default())
    }

    pub fn clear(&self) -> Result<bool> {
        remove_file(&self.path)
    }
}
