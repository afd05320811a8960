//! Error types for mapping configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading mapper configuration.
#[derive(Debug, Error)]
pub enum MapError {
    /// Config file could not be read.
    #[error("failed to read synonym config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON or has the wrong shape.
    #[error("failed to parse synonym config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, MapError>;
