//! voltage-bits - IEEE-754 double-precision bit conversion for VoltageEMS tools
//!
//! Converts between decimal numbers and their 64-bit binary representation.
//!
//! # Features
//!
//! - **Bit conversion**: `to_binary_string()`, `from_binary_string()`, `sign_bit()`
//! - **Decimal I/O**: `parse_decimal()`, `format_decimal()` with fixed or shortest precision
//! - **Field decomposition**: sign / exponent / mantissa and value class
//! - **Session**: calculator behaviour as explicit `Request` -> `Response` calls
//!
//! # Example
//!
//! ```rust
//! use voltage_bits::{from_binary_string, sign_bit, to_binary_string};
//!
//! let binary = to_binary_string(1.0);
//! assert_eq!(
//!     binary,
//!     "0011111111110000000000000000000000000000000000000000000000000000"
//! );
//! assert_eq!(from_binary_string(&binary).unwrap(), 1.0);
//!
//! assert_eq!(sign_bit(&to_binary_string(-5.0)), "1");
//! assert!(from_binary_string("101").is_err());
//! ```
//!
//! # Binary layout
//!
//! | Characters | Field | Width |
//! |------------|-------|-------|
//! | 0 | sign | 1 |
//! | 1-11 | biased exponent | 11 |
//! | 12-63 | mantissa | 52 |

pub mod convert;
pub mod error;
pub mod fields;
pub mod format;
pub mod session;

// Re-exports for convenience
pub use convert::{from_binary_string, is_binary_string, sign_bit, to_binary_string, BIT_WIDTH};
pub use error::{BitsError, Result};
pub use fields::{FloatClass, Ieee754Fields};
pub use format::{format_decimal, parse_decimal, Precision};
pub use session::{CalculatorSession, Direction, Request, Response};
