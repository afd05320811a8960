//! Single-rule predicates.

use podium_model::{CellValue, Operator};
use podium_normalize::{duration_to_seconds, parse_number, to_number};

/// Evaluate one operator against a cell.
///
/// Malformed comparison values make the predicate false.
pub fn test_cell(cell: &CellValue, operator: Operator, value: &str) -> bool {
    let a = cell.trimmed();
    let b = value.trim();
    match operator {
        Operator::Empty => a.is_empty(),
        Operator::NotEmpty => !a.is_empty(),
        Operator::Contains => a.to_lowercase().contains(&b.to_lowercase()),
        Operator::Equals => a.to_lowercase() == b.to_lowercase(),
        Operator::Starts => a.to_lowercase().starts_with(&b.to_lowercase()),
        Operator::Ends => a.to_lowercase().ends_with(&b.to_lowercase()),
        Operator::Gt => compare(cell, b, |x, y| x > y),
        Operator::Gte => compare(cell, b, |x, y| x >= y),
        Operator::Lt => compare(cell, b, |x, y| x < y),
        Operator::Lte => compare(cell, b, |x, y| x <= y),
        Operator::Between => between(cell, b),
    }
}

/// Numeric view of a cell: plain number first, then duration in seconds.
pub fn numeric_value(cell: &CellValue) -> Option<f64> {
    to_number(cell)
        .or_else(|| duration_to_seconds(cell))
        .filter(|v| v.is_finite())
}

fn compare(cell: &CellValue, value: &str, op: impl Fn(f64, f64) -> bool) -> bool {
    match (numeric_value(cell), parse_number(value)) {
        (Some(x), Some(y)) => op(x, y),
        _ => false,
    }
}

/// Parse `lo..hi` into an inclusive range.
pub fn parse_range(value: &str) -> Option<(f64, f64)> {
    let parts: Vec<&str> = value.split("..").collect();
    let [lo, hi] = parts.as_slice() else {
        return None;
    };
    Some((parse_number(lo)?, parse_number(hi)?))
}

fn between(cell: &CellValue, value: &str) -> bool {
    match (numeric_value(cell), parse_range(value)) {
        (Some(x), Some((lo, hi))) => x >= lo && x <= hi,
        _ => false,
    }
}
