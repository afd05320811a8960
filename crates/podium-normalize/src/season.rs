//! Season year extraction (`"1991/1992"`, `"2019-2020"`, `2020`, serials).

use std::collections::BTreeSet;

use chrono::Datelike;
use podium_model::CellValue;

use crate::datetime::{parse_date_str, serial_to_datetime};
use crate::numeric::parse_number;

const PLAIN_YEAR_RANGE: std::ops::RangeInclusive<f64> = 1900.0..=2100.0;
const SERIAL_RANGE: std::ops::RangeInclusive<f64> = 20_000.0..=60_000.0;

/// All candidate years a season cell refers to.
pub fn extract_season_years(value: &CellValue) -> BTreeSet<i32> {
    match value {
        CellValue::Number(v) => years_from_number(*v),
        CellValue::Date(dt) => BTreeSet::from([dt.year()]),
        CellValue::Text(s) => years_from_text(s),
        CellValue::Empty => BTreeSet::new(),
    }
}

/// The year a season is displayed as: the latest candidate.
pub fn display_year(value: &CellValue) -> Option<i32> {
    extract_season_years(value).last().copied()
}

fn years_from_number(v: f64) -> BTreeSet<i32> {
    if PLAIN_YEAR_RANGE.contains(&v) {
        return BTreeSet::from([v.trunc() as i32]);
    }
    if SERIAL_RANGE.contains(&v) {
        return serial_to_datetime(v)
            .map(|dt| BTreeSet::from([dt.year()]))
            .unwrap_or_default();
    }
    BTreeSet::new()
}

/// Every `19xx`/`20xx` digit group, scanned left to right without overlap.
fn year_tokens(text: &str) -> BTreeSet<i32> {
    let bytes = text.as_bytes();
    let mut years = BTreeSet::new();
    let mut at = 0;
    while let Some(window) = bytes.get(at..at + 4) {
        let is_year = window.iter().all(u8::is_ascii_digit)
            && (window.starts_with(b"19") || window.starts_with(b"20"));
        if is_year {
            years.insert(
                window
                    .iter()
                    .fold(0, |acc, digit| acc * 10 + i32::from(digit - b'0')),
            );
            at += 4;
        } else {
            at += 1;
        }
    }
    years
}

fn years_from_text(text: &str) -> BTreeSet<i32> {
    let years = year_tokens(text);
    if !years.is_empty() {
        return years;
    }
    if let Some(v) = parse_number(text) {
        return years_from_number(v);
    }
    parse_date_str(text)
        .map(|dt| BTreeSet::from([dt.year()]))
        .unwrap_or_default()
}
