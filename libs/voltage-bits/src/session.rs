//! Calculator session - request/response front for the conversion utility
//!
//! Holds the last displayed output and the display precision. Every action is
//! an explicit `Request`; there is no pending-operation state between calls.

use tracing::{debug, warn};

use crate::convert::{from_binary_string, is_binary_string, sign_bit, to_binary_string};
use crate::error::BitsError;
use crate::format::{format_decimal, parse_decimal, Precision};

/// Generic failure indication shown instead of error details
pub const ERROR_DISPLAY: &str = "Error";

pub const NO_RESULT_MESSAGE: &str = "No result to display sign bit for.";
pub const INVALID_OUTPUT_MESSAGE: &str = "Invalid output.";
pub const INVALID_PLACES_MESSAGE: &str = "Invalid input. Please enter a valid number.";

/// Conversion direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Decimal text to 64-character binary string
    DecimalToBinary,
    /// 64-character binary string to decimal text
    BinaryToDecimal,
}

/// Calculator action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Convert { direction: Direction, input: String },
    /// Sign bit of the last output
    SignBit,
    SetDecimalPlaces(String),
    Clear,
}

impl Request {
    pub fn to_binary(input: impl Into<String>) -> Self {
        Self::Convert {
            direction: Direction::DecimalToBinary,
            input: input.into(),
        }
    }

    pub fn to_decimal(input: impl Into<String>) -> Self {
        Self::Convert {
            direction: Direction::BinaryToDecimal,
            input: input.into(),
        }
    }
}

/// Result of handling a request
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// New output text
    Output(String),
    /// Conversion failed; the display shows `ERROR_DISPLAY`
    Failed(BitsError),
    /// Sign bit ("0" or "1")
    Sign(String),
    /// Informational text for the user
    Message(String),
    /// Precision changed
    PrecisionSet(Precision),
    Cleared,
}

impl Response {
    /// Text a front-end shows for this response
    pub fn display_text(&self) -> String {
        match self {
            Self::Output(text) | Self::Sign(text) | Self::Message(text) => text.clone(),
            Self::Failed(_) => ERROR_DISPLAY.to_string(),
            Self::PrecisionSet(precision) => format!("Decimal places: {}", precision),
            Self::Cleared => String::new(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Calculator state driven by `Request`s
#[derive(Debug, Clone, Default)]
pub struct CalculatorSession {
    precision: Precision,
    output: Option<String>,
}

impl CalculatorSession {
    pub fn new(precision: Precision) -> Self {
        Self {
            precision,
            output: None,
        }
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Currently displayed output, `Some("Error")` after a failed conversion
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn handle(&mut self, request: Request) -> Response {
        debug!(?request, "handling request");
        match request {
            Request::Convert { direction, input } => self.convert(direction, &input),
            Request::SignBit => self.sign_bit(),
            Request::SetDecimalPlaces(text) => self.set_decimal_places(&text),
            Request::Clear => {
                self.output = None;
                Response::Cleared
            },
        }
    }

    fn convert(&mut self, direction: Direction, input: &str) -> Response {
        let result = match direction {
            Direction::DecimalToBinary => parse_decimal(input).map(to_binary_string),
            Direction::BinaryToDecimal => from_binary_string(input.trim())
                .map(|value| format_decimal(value, self.precision)),
        };

        match result {
            Ok(text) => {
                debug!(?direction, output = %text, "conversion done");
                self.output = Some(text.clone());
                Response::Output(text)
            },
            Err(e) => {
                warn!(?direction, "conversion failed: {}", e);
                self.output = Some(ERROR_DISPLAY.to_string());
                Response::Failed(e)
            },
        }
    }

    /// Binary output gives its first bit directly; decimal output is
    /// converted back to binary first.
    fn sign_bit(&self) -> Response {
        let output = match self.output.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => return Response::Message(NO_RESULT_MESSAGE.to_string()),
        };

        if is_binary_string(output) {
            return Response::Sign(sign_bit(output).to_string());
        }

        match parse_decimal(output) {
            Ok(value) => {
                let binary = to_binary_string(value);
                Response::Sign(sign_bit(&binary).to_string())
            },
            Err(e) => {
                debug!("sign bit unavailable: {}", e);
                Response::Message(INVALID_OUTPUT_MESSAGE.to_string())
            },
        }
    }

    fn set_decimal_places(&mut self, text: &str) -> Response {
        match text.parse::<Precision>() {
            Ok(precision) => {
                debug!(%precision, "decimal places changed");
                self.precision = precision;
                Response::PrecisionSet(precision)
            },
            Err(e) => {
                warn!("rejected decimal places: {}", e);
                Response::Message(INVALID_PLACES_MESSAGE.to_string())
            },
        }
    }
}
