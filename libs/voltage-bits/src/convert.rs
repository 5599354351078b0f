//! Conversion between `f64` and its 64-character IEEE-754 binary string
//!
//! Bit order is big-endian: character 0 is the sign bit, characters 1-11 the
//! exponent and characters 12-63 the mantissa.

use crate::error::{BitsError, Result};

/// Width of an IEEE-754 double in bits
pub const BIT_WIDTH: usize = 64;

/// Encode a double as its 64-character binary string
///
/// Every bit pattern is accepted, including NaN payloads which are kept as-is.
/// Example: `1.0` -> `"0011111111110000...0000"`
pub fn to_binary_string(value: f64) -> String {
    format!("{:064b}", value.to_bits())
}

/// Decode a 64-character binary string into a double
///
/// The length is checked before the digits, so `"101"` reports
/// `InvalidLength` rather than anything about its contents.
pub fn from_binary_string(binary: &str) -> Result<f64> {
    let actual = binary.chars().count();
    if actual != BIT_WIDTH {
        return Err(BitsError::invalid_length(BIT_WIDTH, actual));
    }

    let mut bits = 0u64;
    for (position, c) in binary.chars().enumerate() {
        let bit = match c {
            '0' => 0,
            '1' => 1,
            other => return Err(BitsError::invalid_digit(position, other)),
        };
        bits = (bits << 1) | bit;
    }

    Ok(f64::from_bits(bits))
}

/// First character of a binary string: `"0"` non-negative, `"1"` negative
///
/// The input is not validated. An empty string yields an empty string.
pub fn sign_bit(binary: &str) -> &str {
    binary
        .char_indices()
        .nth(1)
        .map_or(binary, |(end, _)| &binary[..end])
}

/// Whether `text` is exactly 64 characters of '0'/'1'
pub fn is_binary_string(text: &str) -> bool {
    text.len() == BIT_WIDTH && text.bytes().all(|b| b == b'0' || b == b'1')
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;

    const ONE: &str = "0011111111110000000000000000000000000000000000000000000000000000";
    const NEG_ZERO: &str = "1000000000000000000000000000000000000000000000000000000000000000";

    #[test]
    fn test_to_binary_one() {
        assert_eq!(to_binary_string(1.0), ONE);
    }

    #[test]
    fn test_to_binary_zero_is_padded() {
        assert_eq!(to_binary_string(0.0), "0".repeat(64));
    }

    #[test]
    fn test_to_binary_negative_zero() {
        assert_eq!(to_binary_string(-0.0), NEG_ZERO);
    }

    #[test]
    fn test_to_binary_special_values_have_full_width() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, f64::MIN_POSITIVE, 5e-324] {
            assert_eq!(to_binary_string(value).len(), BIT_WIDTH, "{}", value);
        }
        assert_eq!(
            to_binary_string(f64::INFINITY),
            format!("0{}{}", "1".repeat(11), "0".repeat(52))
        );
    }

    #[test]
    fn test_from_binary_one() {
        assert_eq!(from_binary_string(ONE).unwrap(), 1.0);
    }

    #[test]
    fn test_from_binary_negative_zero() {
        let value = from_binary_string(NEG_ZERO).unwrap();
        assert_eq!(value, 0.0);
        assert!(value.is_sign_negative());
        assert_eq!(sign_bit(NEG_ZERO), "1");
    }

    #[test]
    fn test_from_binary_short_input() {
        assert_eq!(
            from_binary_string("101"),
            Err(BitsError::invalid_length(64, 3))
        );
    }

    #[test]
    fn test_from_binary_long_input() {
        let input = "0".repeat(65);
        assert_eq!(
            from_binary_string(&input),
            Err(BitsError::invalid_length(64, 65))
        );
    }

    #[test]
    fn test_from_binary_rejects_non_binary_digit() {
        let mut input = "0".repeat(64);
        input.replace_range(10..11, "2");
        assert_eq!(
            from_binary_string(&input),
            Err(BitsError::invalid_digit(10, '2'))
        );
    }

    #[test]
    fn test_from_binary_rejects_sign_prefix() {
        let input = format!("+{}", "1".repeat(63));
        assert_eq!(
            from_binary_string(&input),
            Err(BitsError::invalid_digit(0, '+'))
        );
    }

    #[test]
    fn test_from_binary_counts_characters_not_bytes() {
        // 63 ASCII digits plus one two-byte character is 64 characters
        let input = format!("{}é", "0".repeat(63));
        assert_eq!(
            from_binary_string(&input),
            Err(BitsError::invalid_digit(63, 'é'))
        );
    }

    #[test]
    fn test_sign_bit() {
        assert_eq!(sign_bit(&to_binary_string(-5.0)), "1");
        assert_eq!(sign_bit(&to_binary_string(5.0)), "0");
        assert_eq!(sign_bit(""), "");
        assert_eq!(sign_bit("1"), "1");
    }

    #[test]
    fn test_is_binary_string() {
        assert!(is_binary_string(ONE));
        assert!(!is_binary_string("101"));
        assert!(!is_binary_string(&"2".repeat(64)));
        assert!(!is_binary_string("1.00"));
    }
}
