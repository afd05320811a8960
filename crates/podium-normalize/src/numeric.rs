//! Locale-tolerant number parsing.
//!
//! Accepts a decimal comma (`"1,5"`) and nothing else: no thousands
//! separators, no exponents, no signs other than a leading minus.

use podium_model::CellValue;

/// Parse a plain decimal number.
///
/// The first `,` is treated as the decimal separator. The remaining text must
/// be `-?digits(.digits)?`.
pub fn parse_number(value: &str) -> Option<f64> {
    let cleaned = value.trim().replacen(',', ".", 1);
    if !is_plain_decimal(&cleaned) {
        return None;
    }
    cleaned.parse().ok()
}

/// Interpret a cell as a number. Non-finite numbers read as `None`.
pub fn to_number(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Number(v) if v.is_finite() => Some(*v),
        CellValue::Text(s) => parse_number(s),
        _ => None,
    }
}

/// `-?\d+(\.\d+)?`
pub(crate) fn is_plain_decimal(value: &str) -> bool {
    let unsigned = value.strip_prefix('-').unwrap_or(value);
    let (int, frac) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(int) && frac.is_none_or(all_digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_integer() {
        assert_eq!(parse_number("123"), Some(123.0));
        assert_eq!(parse_number("-456"), Some(-456.0));
    }

    #[test]
    fn test_decimal_comma() {
        assert_eq!(parse_number("1,5"), Some(1.5));
        assert_eq!(parse_number(" 41,250 "), Some(41.25));
        assert_eq!(parse_number("1,234,567"), None);
    }

    #[test]
    fn test_rejects_loose_formats() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("1e5"), None);
        assert_eq!(parse_number("+3"), None);
        assert_eq!(parse_number(".5"), None);
        assert_eq!(parse_number("5."), None);
        assert_eq!(parse_number("1:02.3"), None);
        assert_eq!(parse_number("DNF"), None);
    }

    #[test]
    fn test_cells() {
        assert_eq!(to_number(&CellValue::from(3.0)), Some(3.0));
        assert_eq!(to_number(&CellValue::from(f64::NAN)), None);
        assert_eq!(to_number(&CellValue::from("2")), Some(2.0));
        assert_eq!(to_number(&CellValue::Empty), None);
    }
}
