//! JSON record arrays: `[{"Naam": "A", "Ranking": 1}, ...]`.

use std::path::Path;

use podium_model::{CellValue, Dataset};
use serde_json::{Map, Value};
use tracing::info;

use crate::csv::check_file_size;
use crate::error::{IngestError, Result};

/// Load a JSON array of flat objects. Key order of the first record that
/// names a key decides column order.
pub fn read_json(path: &Path) -> Result<Dataset> {
    check_file_size(path)?;
    let text = std::fs::read_to_string(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let dataset = parse_records(&text).map_err(|source| IngestError::JsonParse {
        path: path.to_path_buf(),
        source,
    })?;
    if dataset.is_empty() {
        return Err(IngestError::NoRows {
            path: path.to_path_buf(),
        });
    }
    info!(
        path = %path.display(),
        rows = dataset.height(),
        columns = dataset.width(),
        "JSON records loaded"
    );
    Ok(dataset)
}

/// Parse record JSON from memory.
pub fn parse_records(text: &str) -> serde_json::Result<Dataset> {
    let text = text.trim_start_matches('\u{feff}');
    let records: Vec<Map<String, Value>> = serde_json::from_str(text)?;
    Ok(Dataset::from_records(records.into_iter().map(|record| {
        record
            .into_iter()
            .map(|(key, value)| (key.trim().to_string(), json_to_cell(value)))
            .collect::<Vec<_>>()
    })))
}

pub fn json_to_cell(value: Value) -> CellValue {
    match value {
        Value::Null => CellValue::Empty,
        Value::String(s) if s.is_empty() => CellValue::Empty,
        Value::String(s) => CellValue::Text(s),
        Value::Number(n) => n.as_f64().map_or(CellValue::Empty, CellValue::Number),
        Value::Bool(b) => CellValue::Text(b.to_string()),
        other => CellValue::Text(other.to_string()),
    }
}
