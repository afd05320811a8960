//! Persistence error types.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while reading or writing the store.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Filesystem call on a store file failed.
    #[error("failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Value could not be encoded as JSON.
    #[error("failed to serialize {path}")]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Stored JSON does not decode into the expected type.
    #[error("failed to parse {path}")]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Written by a newer format version.
    #[error("stored file version {found} is not supported (maximum: {max_supported})")]
    UnsupportedVersion {
        found: u32,
        max_supported: u32,
        path: PathBuf,
    },

    /// Snapshot rows do not match its schema.
    #[error("stored dataset {path} is inconsistent")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: podium_model::ModelError,
    },

    /// Rename of the staging file over the target failed.
    #[error("failed to complete save to {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistenceError {
    /// Hint shown next to the error in the CLI.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Io { operation, .. } if *operation == "read" => {
                Some("check that the file exists and is readable")
            }
            Self::Io { .. } | Self::AtomicWriteFailed { .. } => {
                Some("check disk space and write permission for the store directory")
            }
            Self::UnsupportedVersion { .. } => Some("re-import the source sheet"),
            Self::Deserialization { .. } | Self::Corrupt { .. } => {
                Some("delete the stored file and import again")
            }
            Self::Serialization { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PersistenceError>;
