//! Lenient number handling compatible with pasted spreadsheet data.
//!
//! Numbers typed or pasted by users are never rejected: text that does not
//! start with a number becomes `NaN` and flows through calculations and
//! display unchanged. Parsing, rounding and display follow the browser's
//! `parseFloat`, `Math.round` and `Number#toString` so that output matches
//! what the tool has always shown.

/// Parse the longest leading decimal number in `text`.
///
/// Leading whitespace is skipped. Returns `NaN` when no number prefix exists.
///
/// ```
/// use areakit_core::number::parse_float;
///
/// assert_eq!(parse_float("65"), 65.0);
/// assert_eq!(parse_float("  0.5ha"), 0.5);
/// assert!(parse_float("1.11.2a").eq(&1.11));
/// assert!(parse_float("ha").is_nan());
/// ```
pub fn parse_float(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    if s[end..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Round to the nearest integer, halves towards positive infinity.
///
/// `NaN` and infinities pass through.
pub fn js_round(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Display a number the way a browser prints it.
///
/// ```
/// use areakit_core::number::format_number;
///
/// assert_eq!(format_number(1.0), "1");
/// assert_eq!(format_number(0.15), "0.15");
/// assert_eq!(format_number(f64::NAN), "NaN");
/// assert_eq!(format_number(1.5e-7), "1.5e-7");
/// assert_eq!(format_number(1e21), "1e+21");
/// ```
pub fn format_number(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }

    let magnitude = x.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{x}");
    }

    let formatted = format!("{x:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_float_plain() {
        assert_eq!(parse_float("0.002374634"), 0.002_374_634);
        assert_eq!(parse_float("100"), 100.0);
        assert_eq!(parse_float("-3.5"), -3.5);
        assert_eq!(parse_float("+2"), 2.0);
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float("65abc"), 65.0);
        assert_eq!(parse_float("1.11.2a"), 1.11);
        assert_eq!(parse_float("12/30"), 12.0);
        assert_eq!(parse_float("\t 7"), 7.0);
    }

    #[test]
    fn test_parse_float_fraction_forms() {
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("5."), 5.0);
        assert!(parse_float(".").is_nan());
        assert!(parse_float("-.").is_nan());
    }

    #[test]
    fn test_parse_float_exponent() {
        assert_eq!(parse_float("1e3"), 1000.0);
        assert_eq!(parse_float("2.5E-2"), 0.025);
        assert_eq!(parse_float("1e"), 1.0);
        assert_eq!(parse_float("1e+"), 1.0);
    }

    #[test]
    fn test_parse_float_infinity() {
        assert_eq!(parse_float("Infinity"), f64::INFINITY);
        assert_eq!(parse_float("-Infinityx"), f64::NEG_INFINITY);
        assert!(parse_float("inf").is_nan());
    }

    #[test]
    fn test_parse_float_nan() {
        assert!(parse_float("").is_nan());
        assert!(parse_float("   ").is_nan());
        assert!(parse_float("RE").is_nan());
        assert!(parse_float("-").is_nan());
    }

    #[test]
    fn test_js_round_halves_up() {
        assert_eq!(js_round(2.5), 3.0);
        assert_eq!(js_round(-2.5), -2.0);
        assert_eq!(js_round(2.4), 2.0);
        assert_eq!(js_round(-2.6), -3.0);
        assert_eq!(js_round(0.499_999_999_999_999_94), 0.0);
    }

    #[test]
    fn test_js_round_non_finite() {
        assert!(js_round(f64::NAN).is_nan());
        assert_eq!(js_round(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_format_number_special() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_format_number_decimal() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(0.001_543_512_1), "0.0015435121");
        assert_eq!(format_number(0.000_001), "0.000001");
        assert_eq!(format_number(-12.75), "-12.75");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }

    #[test]
    fn test_format_number_exponent() {
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(-2.5e-9), "-2.5e-9");
        assert_eq!(format_number(1.5e22), "1.5e+22");
    }

    proptest! {
        #[test]
        fn prop_format_then_parse_roundtrips(x in -1e12f64..1e12) {
            let text = format_number(x);
            prop_assert_eq!(parse_float(&text), x);
        }

        #[test]
        fn prop_js_round_is_integral(x in -1e9f64..1e9) {
            let r = js_round(x);
            prop_assert_eq!(r.fract(), 0.0);
            prop_assert!((r - x).abs() <= 0.5);
        }
    }
}
