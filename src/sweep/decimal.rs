//! Exact decimal values for range sweeps
//!
//! Range boundaries such as `0.1:0.1:0.3` must step exactly, so values are held
//! as scaled integers rather than binary floating point. Scale is preserved the
//! way the value was written (`0.50` stays `0.50`) while comparisons are numeric.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use crate::error::SweepError;

/// An arbitrary-precision decimal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExactDecimal(Decimal);

impl ExactDecimal {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Parse a decimal literal, accepting plain (`-0.25`) and scientific (`2.5e-1`) forms.
    ///
    /// # Examples
    ///
    /// ```
    /// use sweepcase_rs::sweep::ExactDecimal;
    ///
    /// let a = ExactDecimal::parse("0.1").unwrap();
    /// let b = ExactDecimal::parse("0.2").unwrap();
    /// assert_eq!(a + b, ExactDecimal::parse("0.3").unwrap());
    /// ```
    pub fn parse(text: &str) -> Result<Self, SweepError> {
        let text = text.trim();
        let parsed = if text.contains(['e', 'E']) {
            Decimal::from_scientific(text)
        } else {
            Decimal::from_str_exact(text)
        };
        parsed
            .map(Self)
            .map_err(|e| SweepError::InvalidArgument(format!("'{}' is not a decimal: {}", text, e)))
    }

    /// Absolute value.
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Checked addition, `None` on overflow.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Checked subtraction, `None` on overflow.
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Underlying `rust_decimal` value.
    pub fn inner(self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for ExactDecimal {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<i64> for ExactDecimal {
    fn from(value: i64) -> Self {
        Self(Decimal::from(value))
    }
}

impl FromStr for ExactDecimal {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ExactDecimal {
    type Error = SweepError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ExactDecimal> for String {
    fn from(value: ExactDecimal) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ExactDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for ExactDecimal {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for ExactDecimal {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for ExactDecimal {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}
