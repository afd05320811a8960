//! Loading result sheets into a [`podium_model::Dataset`].
//!
//! Sheets arrive either as CSV (read through Polars with schema inference)
//! or as a JSON array of decoded spreadsheet rows.

pub mod csv;
pub mod error;
pub mod json;

use std::path::Path;

use podium_model::Dataset;

pub use crate::csv::{
    MAX_CSV_FILE_SIZE, any_to_cell, check_file_size, check_file_size_with_limit,
    frame_to_dataset, read_csv, read_csv_frame, validate_dataframe_shape, validate_encoding,
};
pub use error::{IngestError, Result};
pub use json::{json_to_cell, parse_records, read_json};

/// Load a sheet, picking the reader from the file extension.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let extension = path
        .extension()
        .and_then(std::ffi::OsStr::to_str)
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "csv" | "txt" => read_csv(path),
        "json" => read_json(path),
        _ => Err(IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        }),
    }
}
