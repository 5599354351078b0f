//! IEEE-754 double-precision field decomposition
//!
//! Splits a bit pattern into sign (1 bit), biased exponent (11 bits) and
//! mantissa (52 bits), and classifies the value.

use std::fmt;

use crate::convert::from_binary_string;
use crate::error::Result;

const SIGN_MASK: u64 = 0x8000_0000_0000_0000;
const EXP_MASK: u64 = 0x7FF0_0000_0000_0000;
const MANT_MASK: u64 = 0x000F_FFFF_FFFF_FFFF;
const MANTISSA_BITS: u32 = 52;

/// Exponent bias of the double-precision format
pub const EXPONENT_BIAS: i32 = 1023;

/// Biased exponent value reserved for infinities and NaN
pub const EXPONENT_SPECIAL: u16 = 0x7FF;

/// Category of a double-precision bit pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatClass {
    Zero,
    Subnormal,
    Normal,
    Infinite,
    Nan,
}

impl fmt::Display for FloatClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Zero => "zero",
            Self::Subnormal => "subnormal",
            Self::Normal => "normal",
            Self::Infinite => "infinite",
            Self::Nan => "NaN",
        };
        f.write_str(name)
    }
}

/// Sign, exponent and mantissa of a double
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ieee754Fields {
    /// 0 = non-negative, 1 = negative
    pub sign: u8,
    /// Biased exponent (11 bits)
    pub exponent: u16,
    /// Fraction without the implied leading bit (52 bits)
    pub mantissa: u64,
}

impl Ieee754Fields {
    pub fn from_bits(bits: u64) -> Self {
        Self {
            sign: ((bits & SIGN_MASK) >> 63) as u8,
            exponent: ((bits & EXP_MASK) >> MANTISSA_BITS) as u16,
            mantissa: bits & MANT_MASK,
        }
    }

    pub fn from_f64(value: f64) -> Self {
        Self::from_bits(value.to_bits())
    }

    /// Decompose a 64-character binary string
    pub fn from_binary_string(binary: &str) -> Result<Self> {
        from_binary_string(binary).map(Self::from_f64)
    }

    /// Reassemble the bit pattern
    ///
    /// Fields wider than their slots are masked.
    pub fn to_bits(&self) -> u64 {
        ((u64::from(self.sign) & 1) << 63)
            | ((u64::from(self.exponent) << MANTISSA_BITS) & EXP_MASK)
            | (self.mantissa & MANT_MASK)
    }

    pub fn to_f64(&self) -> f64 {
        f64::from_bits(self.to_bits())
    }

    pub fn class(&self) -> FloatClass {
        match (self.exponent, self.mantissa) {
            (0, 0) => FloatClass::Zero,
            (0, _) => FloatClass::Subnormal,
            (EXPONENT_SPECIAL, 0) => FloatClass::Infinite,
            (EXPONENT_SPECIAL, _) => FloatClass::Nan,
            _ => FloatClass::Normal,
        }
    }

    /// Exponent with the bias removed; `None` for infinities and NaN
    ///
    /// Zero and subnormals share the minimum exponent of -1022.
    pub fn unbiased_exponent(&self) -> Option<i32> {
        match self.class() {
            FloatClass::Infinite | FloatClass::Nan => None,
            FloatClass::Zero | FloatClass::Subnormal => Some(1 - EXPONENT_BIAS),
            FloatClass::Normal => Some(i32::from(self.exponent) - EXPONENT_BIAS),
        }
    }

    pub fn is_negative(&self) -> bool {
        self.sign == 1
    }
}

impl fmt::Display for Ieee754Fields {
    /// `sign | exponent | mantissa` as binary groups of 1, 11 and 52 digits
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:01b} | {:011b} | {:052b}",
            self.sign & 1,
            self.exponent & EXPONENT_SPECIAL,
            self.mantissa & MANT_MASK
        )
    }
}
