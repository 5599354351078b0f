//! Error types for voltage-bits

use thiserror::Error;

/// Conversion errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitsError {
    #[error("Binary string must be {expected} bits long, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid binary digit '{found}' at position {position}")]
    InvalidDigit { position: usize, found: char },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid decimal places: {0}")]
    InvalidDecimalPlaces(String),
}

impl BitsError {
    pub fn invalid_length(expected: usize, actual: usize) -> Self {
        Self::InvalidLength { expected, actual }
    }

    pub fn invalid_digit(position: usize, found: char) -> Self {
        Self::InvalidDigit { position, found }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn invalid_decimal_places(msg: impl Into<String>) -> Self {
        Self::InvalidDecimalPlaces(msg.into())
    }

    /// True for errors caused by a malformed binary string
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::InvalidLength { .. } | Self::InvalidDigit { .. })
    }
}

pub type Result<T> = std::result::Result<T, BitsError>;
