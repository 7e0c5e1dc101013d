//! # Angle Helpers
//!
//! Small conversions used by presentation layers: degrees to radians for
//! drawing idler geometry, and pulling a trough angle out of a free-text
//! descriptor such as a dropdown entry (`"35° trough"`, `"3-roll 45 deg"`).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::units::{Degrees, Radians};

/// Trough angle assumed when a label carries no number
pub const DEFAULT_TROUGH_DEG: f64 = 20.0;

// `\d` is Unicode-aware: it matches any decimal digit (Nd), not only ASCII
static FIRST_NUMBER: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"(\d+(\.\d+)?)").ok());
static DECIMAL_DIGIT: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^\d$").ok());

/// Convert degrees to radians.
///
/// ```rust
/// use conveyor_core::labels::deg2rad;
///
/// assert!((deg2rad(90.0) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
/// ```
pub fn deg2rad(degrees: f64) -> f64 {
    Radians::from(Degrees(degrees)).value()
}

/// Extract the first number in `label` as an angle in degrees.
///
/// Returns `default_deg` when the label is absent, empty, or has no numeric
/// token. Never fails.
///
/// ```rust
/// use conveyor_core::labels::parse_trough_label;
///
/// assert_eq!(parse_trough_label(Some("20° trough"), 99.0), 20.0);
/// assert_eq!(parse_trough_label(Some("Flat"), 0.0), 0.0);
/// assert_eq!(parse_trough_label(None, 99.0), 99.0);
/// ```
pub fn parse_trough_label(label: Option<&str>, default_deg: f64) -> f64 {
    let Some(label) = label.filter(|l| !l.is_empty()) else {
        return default_deg;
    };
    let Some(pattern) = FIRST_NUMBER.as_ref() else {
        return default_deg;
    };

    pattern
        .captures(label)
        .and_then(|caps| caps.get(1))
        .and_then(|m| to_ascii_number(m.as_str()))
        .and_then(|number| number.parse::<f64>().ok())
        .unwrap_or(default_deg)
}

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DECIMAL_DIGIT
        .as_ref()
        .is_some_and(|re| re.is_match(c.encode_utf8(&mut buf)))
}

/// Value of a Unicode decimal digit.
///
/// Decimal digits are encoded in contiguous runs of ten starting at zero, so
/// the offset from the start of the surrounding run, modulo ten, is the value.
fn decimal_value(c: char) -> Option<u32> {
    if c.is_ascii_digit() {
        return c.to_digit(10);
    }
    if !is_decimal_digit(c) {
        return None;
    }
    let code = c as u32;
    let run_start = (1..=code)
        .map(|back| code - back)
        .take_while(|&p| char::from_u32(p).is_some_and(is_decimal_digit))
        .last()
        .unwrap_or(code);
    Some((code - run_start) % 10)
}

/// Rewrite a matched number with ASCII digits so `f64::from_str` accepts it.
fn to_ascii_number(matched: &str) -> Option<String> {
    matched
        .chars()
        .map(|c| match c {
            '.' => Some('.'),
            _ => decimal_value(c).and_then(|d| char::from_digit(d, 10)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deg2rad() {
        assert_eq!(deg2rad(0.0), 0.0);
        assert!((deg2rad(180.0) - std::f64::consts::PI).abs() < 1e-12);
        assert!((deg2rad(-45.0) + std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn test_parse_first_number() {
        assert_eq!(parse_trough_label(Some("20° trough"), 99.0), 20.0);
        assert_eq!(parse_trough_label(Some("Trough 35 deg"), 99.0), 35.0);
        assert_eq!(parse_trough_label(Some("17.5°"), 99.0), 17.5);
        // First match wins
        assert_eq!(parse_trough_label(Some("3-roll 45°"), 99.0), 3.0);
    }

    #[test]
    fn test_parse_fallbacks() {
        assert_eq!(parse_trough_label(Some(""), 99.0), 99.0);
        assert_eq!(parse_trough_label(None, 99.0), 99.0);
        assert_eq!(parse_trough_label(Some("flat belt"), 99.0), 99.0);
        assert_eq!(parse_trough_label(Some("°"), DEFAULT_TROUGH_DEG), 20.0);
    }

    #[test]
    fn test_minus_sign_is_not_part_of_number() {
        assert_eq!(parse_trough_label(Some("-30"), 99.0), 30.0);
    }

    #[test]
    fn test_non_ascii_digits() {
        assert_eq!(parse_trough_label(Some("٢٠° trough"), 99.0), 20.0);
        assert_eq!(parse_trough_label(Some("２０ / 35° trough"), 99.0), 20.0);
        assert_eq!(parse_trough_label(Some("३५.५°"), 99.0), 35.5);
        // Mathematical digit sets sit back to back
        assert_eq!(parse_trough_label(Some("\u{1D7DA}\u{1D7E2}"), 99.0), 20.0);
    }

    #[test]
    fn test_decimal_value() {
        assert_eq!(decimal_value('7'), Some(7));
        assert_eq!(decimal_value('٩'), Some(9));
        assert_eq!(decimal_value('０'), Some(0));
        assert_eq!(decimal_value('x'), None);
    }

    #[test]
    fn test_trailing_dot_without_fraction() {
        assert_eq!(parse_trough_label(Some("25. deg"), 99.0), 25.0);
    }
}
