//! Exact rational prices.
//!
//! A [`Price`] is `numerator / denominator` (quote token per base token).
//! Keeping it rational lets the sqrt‑price and tick conversions stay in
//! integer arithmetic; `f64` appears only in [`Price::to_f64`] for display.

use crate::error::{Error, MathError, StateError};
use crate::math::math_helpers::u256_to_f64;
use alloy_primitives::U256;
use std::fmt;
use std::str::FromStr;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Price {
    numerator: U256,
    denominator: U256,
}

impl Price {
    pub const ONE: Self = Self {
        numerator: U256::ONE,
        denominator: U256::ONE,
    };

    /// Creates the price `numerator / denominator`.
    ///
    /// A zero denominator is not a price and yields `StateError::InvalidPrice`.
    pub fn new(numerator: U256, denominator: U256) -> Result<Self, StateError> {
        if denominator.is_zero() {
            return Err(StateError::InvalidPrice);
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    #[inline]
    pub fn from_integer(value: U256) -> Self {
        Self {
            numerator: value,
            denominator: U256::ONE,
        }
    }

    #[inline]
    pub fn numerator(&self) -> U256 {
        self.numerator
    }

    #[inline]
    pub fn denominator(&self) -> U256 {
        self.denominator
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    /// Human‑readable approximation of the price. Not authoritative.
    pub fn to_f64(&self) -> f64 {
        u256_to_f64(self.numerator) / u256_to_f64(self.denominator)
    }
}

impl From<u64> for Price {
    fn from(value: u64) -> Self {
        Self::from_integer(U256::from(value))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == U256::ONE {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

fn parse_digits(digits: &str) -> Result<U256, Error> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StateError::InvalidPrice.into());
    }
    U256::from_str_radix(digits, 10).map_err(|_| MathError::Overflow.into())
}

impl FromStr for Price {
    type Err = Error;

    /// Parses `"5000"`, `"0.5"`, `"4545.25"` or `"3/2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some((numerator, denominator)) = s.split_once('/') {
            return Ok(Self::new(
                parse_digits(numerator.trim())?,
                parse_digits(denominator.trim())?,
            )?);
        }

        let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
        if fraction.is_empty() && s.ends_with('.') {
            return Err(StateError::InvalidPrice.into());
        }

        let whole = if whole.is_empty() && !fraction.is_empty() {
            "0"
        } else {
            whole
        };

        let scale = u32::try_from(fraction.len()).map_err(|_| MathError::Overflow)?;
        let denominator = U256::from(10u8)
            .checked_pow(U256::from(scale))
            .ok_or(MathError::Overflow)?;

        let numerator = if fraction.is_empty() {
            parse_digits(whole)?
        } else {
            parse_digits(&format!("{whole}{fraction}"))?
        };

        Ok(Self::new(numerator, denominator)?)
    }
}
