//! FILENAME: core/engine/src/number_format.rs
//! PURPOSE: Number formatting used for numeric columns and aggregate values.
//! CONTEXT: Profiler timings and counts are shown as whole numbers with
//! thousands separators ("1,325"). Fractions are rounded away.

/// Formats `value` as a decimal integer. Rounds half away from zero, strips
/// any fractional part and comma separates the digits every 3 characters.
/// Non-finite values render as "NaN", "Infinity" or "-Infinity".
pub fn format_number_as_text(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    // Adding 0.0 turns -0.0 into 0.0 so "-0" never shows up.
    let rounded = format!("{:.0}", value.round() + 0.0);
    add_thousands_separator(&rounded)
}

/// Add thousands separators to an integer string.
fn add_thousands_separator(s: &str) -> String {
    let negative = s.starts_with('-');
    let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut result = String::new();
    let len = digits.len();

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    if negative {
        result = format!("-{}", result);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_as_text() {
        assert_eq!(format_number_as_text(0.0), "0");
        assert_eq!(format_number_as_text(7.0), "7");
        assert_eq!(format_number_as_text(1325.0), "1,325");
        assert_eq!(format_number_as_text(1234567.0), "1,234,567");
        assert_eq!(format_number_as_text(-1234.0), "-1,234");
        assert_eq!(format_number_as_text(-123.0), "-123");
    }

    #[test]
    fn test_format_number_rounds_half_away_from_zero() {
        assert_eq!(format_number_as_text(2.5), "3");
        assert_eq!(format_number_as_text(999.4), "999");
        assert_eq!(format_number_as_text(999.5), "1,000");
        assert_eq!(format_number_as_text(-0.4), "0");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_number_as_text(f64::NAN), "NaN");
        assert_eq!(format_number_as_text(f64::INFINITY), "Infinity");
        assert_eq!(format_number_as_text(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_thousands_separator() {
        assert_eq!(add_thousands_separator("1234567"), "1,234,567");
        assert_eq!(add_thousands_separator("123"), "123");
        assert_eq!(add_thousands_separator("-1234"), "-1,234");
    }
}
