//! Error types for result sheet ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a result sheet.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Path does not exist.
    #[error("no such file: {path}")]
    FileNotFound { path: PathBuf },

    /// File exists but could not be read.
    #[error("cannot read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("file {path} is {size} bytes, limit is {max_size}")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// UTF-16 or another non-UTF-8 encoding.
    #[error("unsupported encoding {encoding} in {path}, save the file as UTF-8")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    /// Extension other than `.csv` or `.json`.
    #[error("unsupported file type '{extension}' for {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// CSV reader rejected the file.
    #[error("{path} is not valid CSV: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// JSON is malformed or not an array of objects.
    #[error("{path} is not a valid JSON sheet: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Header present but no rows.
    #[error("no data rows in {path}")]
    NoRows { path: PathBuf },

    /// A header cell is blank.
    #[error("empty column name in {path}")]
    EmptyColumnName { path: PathBuf },

    /// Polars failed while inferring or converting columns.
    #[error("column typing failed: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// Decoded rows do not fit the header.
    #[error(transparent)]
    Model(#[from] podium_model::ModelError),
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
