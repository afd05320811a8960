//! Raw cell values as they arrive from a decoded sheet or file.

use std::borrow::Cow;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// A single raw cell.
///
/// Cells keep the type the decoder produced. Interpretation (numbers,
/// durations, dates) happens on demand in the normalizer, never at import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDateTime),
}

impl CellValue {
    /// The raw string form used for comparisons and display.
    ///
    /// Numbers are printed without trailing zeros and dates as
    /// `YYYY-MM-DD`, with a `THH:MM:SS` suffix only when a time is set.
    pub fn as_raw(&self) -> Cow<'_, str> {
        match self {
            Self::Empty => Cow::Borrowed(""),
            Self::Text(s) => Cow::Borrowed(s.as_str()),
            Self::Number(v) => Cow::Owned(format_numeric(*v)),
            Self::Date(dt) => Cow::Owned(format_datetime(dt)),
        }
    }

    /// Trimmed raw string.
    pub fn trimmed(&self) -> Cow<'_, str> {
        match self.as_raw() {
            Cow::Borrowed(s) => Cow::Borrowed(s.trim()),
            Cow::Owned(s) => Cow::Owned(s.trim().to_string()),
        }
    }

    /// True when the cell is empty or only whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) | Self::Date(_) => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_raw())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value.and_time(NaiveTime::MIN))
    }
}

impl<T> From<Option<T>> for CellValue
where
    T: Into<CellValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// Formats a floating-point number without trailing zeros after the decimal point.
///
/// Integer-valued floats like `40.0` are formatted as `"40"`.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

fn format_datetime(dt: &NaiveDateTime) -> String {
    let time = dt.time();
    if time.hour() == 0 && time.minute() == 0 && time.second() == 0 {
        dt.format("%Y-%m-%d").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_numeric() {
        assert_eq!(format_numeric(1.0), "1");
        assert_eq!(format_numeric(1.50), "1.5");
        assert_eq!(format_numeric(40.0), "40");
        assert_eq!(format_numeric(62.345), "62.345");
        assert_eq!(format_numeric(-3.0), "-3");
    }

    #[test]
    fn test_raw_forms() {
        assert_eq!(CellValue::Empty.as_raw(), "");
        assert_eq!(CellValue::from("  Jan ").trimmed(), "Jan");
        assert_eq!(CellValue::from(3.0).as_raw(), "3");
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert_eq!(CellValue::from(date).as_raw(), "2020-01-01");
        let dt = date.and_hms_opt(12, 30, 0).unwrap();
        assert_eq!(CellValue::from(dt).as_raw(), "2020-01-01T12:30:00");
    }

    #[test]
    fn test_blank() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::from("   ").is_blank());
        assert!(!CellValue::from(0.0).is_blank());
        assert!(!CellValue::from("x").is_blank());
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&CellValue::from(2.5)).unwrap();
        assert_eq!(json, r#"{"kind":"number","value":2.5}"#);
        let back: CellValue = serde_json::from_str(r#"{"kind":"empty"}"#).unwrap();
        assert_eq!(back, CellValue::Empty);
    }
}
