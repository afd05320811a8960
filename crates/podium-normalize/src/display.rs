//! Display precision for aggregate values.

use podium_model::format_numeric;

use crate::duration::UNAVAILABLE;

/// Decimal places used for `v`: 0 from 1000, 1 from 100, 2 from 10, else 3.
pub fn display_decimals(v: f64) -> u32 {
    let magnitude = v.abs();
    if magnitude >= 1000.0 {
        0
    } else if magnitude >= 100.0 {
        1
    } else if magnitude >= 10.0 {
        2
    } else {
        3
    }
}

/// Round `v` to its display precision. Non-finite values pass through.
pub fn round_for_display(v: f64) -> f64 {
    if !v.is_finite() {
        return v;
    }
    let factor = 10f64.powi(display_decimals(v) as i32);
    (v * factor).round() / factor
}

/// Rounded display text without trailing zeros.
pub fn format_for_display(v: f64) -> String {
    if v.is_finite() {
        format_numeric(round_for_display(v))
    } else {
        UNAVAILABLE.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_bands() {
        assert_eq!(round_for_display(1234.567), 1235.0);
        assert_eq!(round_for_display(123.456), 123.5);
        assert_eq!(round_for_display(12.3456), 12.35);
        assert_eq!(round_for_display(1.23456), 1.235);
        assert_eq!(round_for_display(-1234.4), -1234.0);
    }

    #[test]
    fn test_format() {
        assert_eq!(format_for_display(2.5), "2.5");
        assert_eq!(format_for_display(1000.4), "1000");
        assert_eq!(format_for_display(f64::NAN), UNAVAILABLE);
    }
}
