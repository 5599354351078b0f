//! Decimal input parsing and display formatting
//!
//! Uses `ryu` for shortest round-trip output. A fixed number of decimal
//! places is produced by rounding those shortest digits half-up, so a
//! decimal tie such as `2.675` rounds the way it reads rather than the way
//! its binary approximation falls.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{BitsError, Result};

/// Largest useful number of decimal places for an f64 (smallest subnormal is 2^-1074)
pub const MAX_DECIMAL_PLACES: usize = 1074;

/// Decimal places used when nothing else is configured
pub const DEFAULT_DECIMAL_PLACES: usize = 2;

/// How a decoded double is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PrecisionRepr", into = "PrecisionRepr")]
pub enum Precision {
    /// Exactly this many digits after the decimal point
    Fixed(usize),
    /// Shortest representation that parses back to the same value
    Shortest,
}

impl Default for Precision {
    fn default() -> Self {
        Self::Fixed(DEFAULT_DECIMAL_PLACES)
    }
}

impl FromStr for Precision {
    type Err = BitsError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("shortest") {
            return Ok(Self::Shortest);
        }
        let places: usize = s
            .parse()
            .map_err(|_| BitsError::invalid_decimal_places(format!("'{}' is not a number", s)))?;
        Self::fixed(places)
    }
}

impl Precision {
    /// Fixed precision, rejecting counts above `MAX_DECIMAL_PLACES`
    pub fn fixed(places: usize) -> Result<Self> {
        if places > MAX_DECIMAL_PLACES {
            return Err(BitsError::invalid_decimal_places(format!(
                "{} exceeds maximum of {}",
                places, MAX_DECIMAL_PLACES
            )));
        }
        Ok(Self::Fixed(places))
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(places) => write!(f, "{}", places),
            Self::Shortest => f.write_str("shortest"),
        }
    }
}

/// Wire form of `Precision`: an integer or the word "shortest"
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum PrecisionRepr {
    Places(usize),
    Text(String),
}

impl TryFrom<PrecisionRepr> for Precision {
    type Error = BitsError;

    fn try_from(repr: PrecisionRepr) -> Result<Self> {
        match repr {
            PrecisionRepr::Places(places) => Self::fixed(places),
            PrecisionRepr::Text(text) => text.parse(),
        }
    }
}

impl From<Precision> for PrecisionRepr {
    fn from(precision: Precision) -> Self {
        match precision {
            Precision::Fixed(places) => Self::Places(places),
            Precision::Shortest => Self::Text("shortest".to_string()),
        }
    }
}

/// Parse decimal text typed by a user
///
/// Surrounding whitespace is ignored. Besides `Infinity` and `NaN`, any
/// letter case of `inf`, `infinity` and `nan` is accepted.
pub fn parse_decimal(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    trimmed
        .parse::<f64>()
        .map_err(|_| BitsError::parse(format!("'{}' is not a valid number", trimmed)))
}

/// Format a double for display
///
/// `Fixed` rounds the shortest round-trip digits half-up, so `0.125` at two
/// places is `0.13` and `2.5` at zero places is `3`. Non-finite values ignore
/// the precision and render as `NaN`, `Infinity`, `-Infinity`.
pub fn format_decimal(value: f64, precision: Precision) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let sign = if value.is_sign_negative() { "-" } else { "" };
        return format!("{}Infinity", sign);
    }

    let mut buffer = ryu::Buffer::new();
    let shortest = buffer.format_finite(value);
    match precision {
        Precision::Fixed(places) => round_half_up(shortest, places),
        Precision::Shortest => shortest.to_string(),
    }
}

/// Shortest digits of a ryu rendering and the decimal point position
///
/// The value is `0.d1d2d3... * 10^point`. Zero has no digits.
fn decimal_digits(shortest: &str) -> (Vec<u8>, i32) {
    let (mantissa, exponent) = match shortest.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (shortest, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let mut digits: Vec<u8> = int_part.bytes().chain(frac_part.bytes()).collect();
    let mut point = int_part.len() as i32 + exponent;

    let leading = digits.iter().take_while(|&&d| d == b'0').count();
    digits.drain(..leading);
    point -= leading as i32;

    if digits.is_empty() {
        return (digits, 0);
    }
    (digits, point)
}

/// Fixed-point rendering of ryu output, ties rounded away from zero
fn round_half_up(shortest: &str, places: usize) -> String {
    let negative = shortest.starts_with('-');
    let (digits, point) = decimal_digits(shortest.trim_start_matches('-'));

    // Digits of |value| * 10^places before the rounding position
    let keep = point + places as i32;
    let mut scaled: Vec<u8> = if keep <= 0 {
        Vec::new()
    } else {
        let keep = keep as usize;
        let mut kept: Vec<u8> = digits.iter().copied().take(keep).collect();
        kept.resize(keep, b'0');
        kept
    };

    let round_up = keep >= 0 && digits.get(keep as usize).is_some_and(|&d| d >= b'5');
    if round_up {
        increment(&mut scaled);
    }

    if scaled.len() < places + 1 {
        let mut padded = vec![b'0'; places + 1 - scaled.len()];
        padded.extend_from_slice(&scaled);
        scaled = padded;
    }

    let split = scaled.len() - places;
    let mut text = String::with_capacity(scaled.len() + 2);
    if negative {
        text.push('-');
    }
    text.extend(scaled[..split].iter().map(|&d| d as char));
    if places > 0 {
        text.push('.');
        text.extend(scaled[split..].iter().map(|&d| d as char));
    }
    text
}

/// Add one to a big-endian ASCII digit string
fn increment(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_common_values() {
        assert_eq!(parse_decimal("1").unwrap(), 1.0);
        assert_eq!(parse_decimal("-5.25").unwrap(), -5.25);
        assert_eq!(parse_decimal("  42.5 \n").unwrap(), 42.5);
        assert_eq!(parse_decimal("1e3").unwrap(), 1000.0);
        assert_eq!(parse_decimal(".5").unwrap(), 0.5);
    }

    #[test]
    fn test_parse_decimal_special_values() {
        assert!(parse_decimal("NaN").unwrap().is_nan());
        assert_eq!(parse_decimal("inf").unwrap(), f64::INFINITY);
        assert_eq!(parse_decimal("-Infinity").unwrap(), f64::NEG_INFINITY);
        assert_eq!(parse_decimal("Infinity").unwrap(), f64::INFINITY);
        assert_eq!(parse_decimal("INF").unwrap(), f64::INFINITY);
        assert!(parse_decimal("nan").unwrap().is_nan());
        assert!(parse_decimal("-0").unwrap().is_sign_negative());
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        for input in ["", "   ", "abc", "1.2.3", "0x10", "Error"] {
            let err = parse_decimal(input).unwrap_err();
            assert!(matches!(err, BitsError::Parse(_)), "input {:?}", input);
        }
    }

    #[test]
    fn test_precision_from_str() {
        assert_eq!("2".parse::<Precision>().unwrap(), Precision::Fixed(2));
        assert_eq!(" 0 ".parse::<Precision>().unwrap(), Precision::Fixed(0));
        assert_eq!("Shortest".parse::<Precision>().unwrap(), Precision::Shortest);
        assert!("-1".parse::<Precision>().is_err());
        assert!("two".parse::<Precision>().is_err());
        assert!("1075".parse::<Precision>().is_err());
        assert_eq!("1074".parse::<Precision>().unwrap(), Precision::Fixed(1074));
    }

    #[test]
    fn test_precision_default() {
        assert_eq!(Precision::default(), Precision::Fixed(2));
    }

    #[test]
    fn test_precision_serde() {
        let fixed: Precision = serde_json::from_str("4").unwrap();
        assert_eq!(fixed, Precision::Fixed(4));
        let shortest: Precision = serde_json::from_str("\"shortest\"").unwrap();
        assert_eq!(shortest, Precision::Shortest);
        let text: Precision = serde_json::from_str("\"6\"").unwrap();
        assert_eq!(text, Precision::Fixed(6));
        assert!(serde_json::from_str::<Precision>("\"many\"").is_err());

        assert_eq!(serde_json::to_string(&Precision::Fixed(3)).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&Precision::Shortest).unwrap(),
            "\"shortest\""
        );
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_decimal(1.0, Precision::Fixed(2)), "1.00");
        assert_eq!(format_decimal(-5.0, Precision::Fixed(0)), "-5");
        assert_eq!(format_decimal(0.125, Precision::Fixed(4)), "0.1250");
        assert_eq!(format_decimal(-0.0, Precision::Fixed(2)), "-0.00");
    }

    #[test]
    fn test_format_fixed_rounds_ties_up() {
        let test_cases = [
            (0.125, 2, "0.13"),
            (2.675, 2, "2.68"),
            (1.005, 2, "1.01"),
            (0.5, 0, "1"),
            (2.5, 0, "3"),
            (-2.5, 0, "-3"),
            (9.995, 2, "10.00"),
            (0.0005, 3, "0.001"),
            (1.5e-7, 7, "0.0000002"),
        ];
        for (value, places, expected) in test_cases {
            assert_eq!(
                format_decimal(value, Precision::Fixed(places)),
                expected,
                "{} at {} places",
                value,
                places
            );
        }
    }

    #[test]
    fn test_format_fixed_exponent_forms() {
        assert_eq!(
            format_decimal(1e21, Precision::Fixed(2)),
            "1000000000000000000000.00"
        );
        assert_eq!(format_decimal(5e-324, Precision::Fixed(2)), "0.00");
        assert_eq!(format_decimal(-5e-324, Precision::Fixed(0)), "-0");
        assert_eq!(format_decimal(0.001, Precision::Fixed(5)), "0.00100");
        assert_eq!(format_decimal(123.456, Precision::Fixed(1)), "123.5");
    }

    #[test]
    fn test_format_shortest() {
        assert_eq!(format_decimal(0.1, Precision::Shortest), "0.1");
        assert_eq!(format_decimal(220.0, Precision::Shortest), "220.0");
        assert_eq!(format_decimal(-123.456, Precision::Shortest), "-123.456");
    }

    #[test]
    fn test_format_shortest_round_trips() {
        for value in [std::f64::consts::PI, f64::MAX, f64::MIN_POSITIVE, 5e-324, 1e21] {
            let text = format_decimal(value, Precision::Shortest);
            assert_eq!(parse_decimal(&text).unwrap(), value, "{}", text);
        }
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_decimal(f64::NAN, Precision::Fixed(2)), "NaN");
        assert_eq!(format_decimal(f64::INFINITY, Precision::Shortest), "Infinity");
        assert_eq!(
            format_decimal(f64::NEG_INFINITY, Precision::Fixed(5)),
            "-Infinity"
        );
        for value in [f64::INFINITY, f64::NEG_INFINITY] {
            let text = format_decimal(value, Precision::Fixed(2));
            assert_eq!(parse_decimal(&text).unwrap(), value);
        }
    }
}
