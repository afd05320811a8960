//! Date parsing for result dates.
//!
//! Supports:
//! - Native date cells
//! - Spreadsheet serial numbers (1900 date system, epoch 1899-12-30)
//! - Day-first text: `dd-mm-yyyy`, `dd/mm/yyyy`, two-digit years as 20yy
//! - ISO-like text: `yyyy-mm-dd`, with optional time, RFC 3339

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use podium_model::CellValue;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

/// Interpret a cell as a date. Unparseable input yields `None`.
pub fn parse_date(value: &CellValue) -> Option<NaiveDateTime> {
    match value {
        CellValue::Date(dt) => Some(*dt),
        CellValue::Number(v) => serial_to_datetime(*v),
        CellValue::Text(s) => parse_date_str(s),
        CellValue::Empty => None,
    }
}

/// Convert a spreadsheet serial day number.
///
/// Uses the 1899-12-30 epoch as-is, including the 1900 leap-year quirk
/// it inherits. Fractional days become the time of day.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_time(NaiveTime::MIN);
    let millis = (serial * MILLIS_PER_DAY).round();
    if millis.abs() > i64::MAX as f64 {
        return None;
    }
    epoch.checked_add_signed(TimeDelta::try_milliseconds(millis as i64)?)
}

/// Parse date text.
pub fn parse_date_str(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(date) = parse_day_first(trimmed) {
        return Some(date.and_time(NaiveTime::MIN));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date.and_time(NaiveTime::MIN));
        }
    }
    None
}

/// `d{1,2}[-/]d{1,2}[-/]d{2,4}`, day first.
fn parse_day_first(value: &str) -> Option<NaiveDate> {
    let mut parts = value.split(['-', '/']);
    let day = digits(parts.next()?, 1, 2)?;
    let month = digits(parts.next()?, 1, 2)?;
    let year_text = parts.next()?;
    let year = digits(year_text, 2, 4)?;
    if parts.next().is_some() {
        return None;
    }
    let year = if year < 100 { 2000 + year } else { year };
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

fn digits(value: &str, min: usize, max: usize) -> Option<u32> {
    if value.len() < min || value.len() > max || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    fn ymd(dt: NaiveDateTime) -> (i32, u32, u32) {
        (dt.year(), dt.month(), dt.day())
    }

    #[test]
    fn test_day_first() {
        assert_eq!(ymd(parse_date_str("02-11-2019").unwrap()), (2019, 11, 2));
        assert_eq!(ymd(parse_date_str("2/11/2019").unwrap()), (2019, 11, 2));
        assert_eq!(ymd(parse_date_str("02-11-19").unwrap()), (2019, 11, 2));
        assert_eq!(parse_date_str("31-02-2020"), None);
        assert_eq!(parse_date_str("02-11-2019-1"), None);
    }

    #[test]
    fn test_iso_like() {
        assert_eq!(ymd(parse_date_str("2019-11-02").unwrap()), (2019, 11, 2));
        let dt = parse_date_str("2019-11-02T14:30:00").unwrap();
        assert_eq!((dt.hour(), dt.minute()), (14, 30));
        assert_eq!(ymd(parse_date_str("2019-11-02T14:30:00Z").unwrap()), (2019, 11, 2));
    }

    #[test]
    fn test_serial() {
        let dt = serial_to_datetime(43831.0).unwrap();
        assert_eq!(ymd(dt), (2020, 1, 1));
        let dt = serial_to_datetime(43831.5).unwrap();
        assert_eq!(dt.hour(), 12);
        assert_eq!(ymd(serial_to_datetime(1.0).unwrap()), (1899, 12, 31));
        assert_eq!(serial_to_datetime(f64::NAN), None);
        assert_eq!(serial_to_datetime(1e300), None);
    }

    #[test]
    fn test_cells() {
        assert!(parse_date(&CellValue::from(43831.0)).is_some());
        assert!(parse_date(&CellValue::from("garbage")).is_none());
        assert!(parse_date(&CellValue::Empty).is_none());
    }
}
