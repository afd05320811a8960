//! Race times: parsing to seconds and formatting back to clock form.
//!
//! Accepted inputs:
//! - Numbers in `(0, 1)`: a fraction of a 24-hour day (spreadsheet time cells)
//! - Other numbers: seconds
//! - Numeric text: seconds (`"41,25"` -> 41.25)
//! - Clock text: `SS.sss`, `M:SS.sss` or `H:MM:SS.sss`

use podium_model::CellValue;

use crate::numeric::{is_plain_decimal, parse_number};

/// Marker shown for durations that cannot be displayed.
pub const UNAVAILABLE: &str = "—";

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Interpret a cell as a duration in seconds.
pub fn duration_to_seconds(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Number(v) => number_to_seconds(*v),
        CellValue::Text(s) => parse_duration(s),
        CellValue::Empty | CellValue::Date(_) => None,
    }
}

fn number_to_seconds(v: f64) -> Option<f64> {
    if !v.is_finite() {
        None
    } else if v > 0.0 && v < 1.0 {
        Some(v * SECONDS_PER_DAY)
    } else {
        Some(v)
    }
}

/// Parse duration text into seconds.
pub fn parse_duration(value: &str) -> Option<f64> {
    let cleaned = value.trim().replacen(',', ".", 1);
    if cleaned.is_empty() {
        return None;
    }
    if let Some(seconds) = parse_number(&cleaned) {
        return Some(seconds);
    }

    let parts: Vec<&str> = cleaned.split(':').map(str::trim).collect();
    let (last, leading) = parts.split_last()?;
    if !is_plain_decimal(last) || last.starts_with('-') {
        return None;
    }
    let seconds: f64 = last.parse().ok()?;
    let whole = |s: &str| -> Option<f64> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse().ok()
    };

    match leading {
        [] => Some(seconds),
        [m] => Some(whole(m)? * 60.0 + seconds),
        [h, m] => Some(whole(h)? * 3600.0 + whole(m)? * 60.0 + seconds),
        _ => None,
    }
}

/// Format seconds as `H:MM:SS.sss` (hours > 0) or `M:SS.sss`.
///
/// Negative and non-finite input formats as [`UNAVAILABLE`].
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return UNAVAILABLE.to_string();
    }
    let total_ms = (seconds * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms / 60_000) % 60;
    let millis = total_ms % 60_000;
    let secs = format!("{:02}.{:03}", millis / 1000, millis % 1000);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs}")
    } else {
        format!("{minutes}:{secs}")
    }
}
