//! CSV loading through Polars.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use podium_model::{CellValue, Dataset, Row, Schema};
use polars::prelude::*;
use tracing::{info, warn};

use crate::error::{IngestError, Result};

/// Maximum file size for CSV loading (500 MB).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Rows inspected when inferring column types.
const INFER_SCHEMA_ROWS: usize = 100;

fn open_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Reject UTF-16 files. A UTF-8 byte order mark is accepted.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }
    Ok(())
}

/// Checks for:
/// - Empty DataFrame (no rows)
/// - Empty column names
pub fn validate_dataframe_shape(df: &DataFrame, path: &Path) -> Result<()> {
    if df.height() == 0 {
        return Err(IngestError::NoRows {
            path: path.to_path_buf(),
        });
    }
    if df.width() > 500 {
        warn!(
            path = %path.display(),
            columns = df.width(),
            "sheet has more than 500 columns"
        );
    }
    if df
        .get_column_names()
        .iter()
        .any(|name| clean_header(name.as_str()).is_empty())
    {
        return Err(IngestError::EmptyColumnName {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Read a CSV file with a single header row into a DataFrame.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Load a CSV result sheet.
pub fn read_csv(path: &Path) -> Result<Dataset> {
    check_file_size(path)?;
    validate_encoding(path)?;
    let df = read_csv_frame(path)?;
    validate_dataframe_shape(&df, path)?;
    let dataset = frame_to_dataset(&df)?;
    info!(
        path = %path.display(),
        rows = dataset.height(),
        columns = dataset.width(),
        "CSV loaded"
    );
    Ok(dataset)
}

/// Convert every cell of a DataFrame. Column order is preserved.
pub fn frame_to_dataset(df: &DataFrame) -> Result<Dataset> {
    let columns = df.get_columns();
    let schema = Schema::new(columns.iter().map(|c| clean_header(c.name().as_str())));

    let mut rows = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let cells = columns
            .iter()
            .map(|col| col.get(row_idx).map(any_to_cell))
            .collect::<PolarsResult<Vec<_>>>()?;
        rows.push(Row::new(cells));
    }
    Ok(Dataset::new(schema, rows)?)
}

/// Map a Polars value onto a cell. Nulls become [`CellValue::Empty`].
pub fn any_to_cell(value: AnyValue<'_>) -> CellValue {
    match value {
        AnyValue::Null => CellValue::Empty,
        AnyValue::Int8(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int16(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int32(v) => CellValue::Number(f64::from(v)),
        AnyValue::Int64(v) => CellValue::Number(v as f64),
        AnyValue::UInt8(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt16(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt32(v) => CellValue::Number(f64::from(v)),
        AnyValue::UInt64(v) => CellValue::Number(v as f64),
        AnyValue::Float32(v) => finite(f64::from(v)),
        AnyValue::Float64(v) => finite(v),
        AnyValue::String(s) => CellValue::Text(s.to_string()),
        AnyValue::StringOwned(s) => CellValue::Text(s.to_string()),
        AnyValue::Boolean(b) => CellValue::Text(b.to_string()),
        other => {
            let s = other.to_string();
            let s = s
                .strip_prefix('"')
                .and_then(|inner| inner.strip_suffix('"'))
                .unwrap_or(&s);
            CellValue::Text(s.to_string())
        }
    }
}

fn finite(v: f64) -> CellValue {
    if v.is_finite() {
        CellValue::Number(v)
    } else {
        CellValue::Empty
    }
}

/// Trim a header and drop a leading byte order mark.
fn clean_header(name: &str) -> String {
    name.trim_start_matches('\u{feff}').trim().to_string()
}
