//! Fixed-point money amounts.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are stored as an integer count of minor currency units (cents), so
//! sums of transactions are exact. Decimal strings are parsed and printed with
//! `rust_decimal`.
//!
//! Operators saturate at the `i64` bounds instead of panicking or wrapping.
//! Sums accumulate in `i128`, so they are exact whenever the total fits.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Number of fractional digits an amount carries.
pub const MINOR_UNIT_SCALE: u32 = 2;

/// A signed monetary amount in minor currency units (e.g. cents).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

/// Errors produced when parsing an amount from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountParseError {
    /// Not a decimal number.
    #[error("invalid amount: {0}")]
    Invalid(String),

    /// More fractional digits than the minor unit allows.
    #[error("amount has more than two decimal places: {0}")]
    TooPrecise(String),

    /// Does not fit in the minor-unit range.
    #[error("amount out of range: {0}")]
    OutOfRange(String),
}

impl Amount {
    /// The zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from minor units (`1234` is `12.34`).
    #[must_use]
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Creates an amount from whole major units (`12` is `12.00`).
    ///
    /// Returns `None` if the amount does not fit in minor units.
    #[must_use]
    pub const fn from_major(major: i64) -> Option<Self> {
        match major.checked_mul(100) {
            Some(minor) => Some(Self(minor)),
            None => None,
        }
    }

    /// Clamps a wide minor-unit total into the representable range.
    #[must_use]
    pub fn saturating_from_wide(minor: i128) -> Self {
        i64::try_from(minor).map_or(
            if minor < 0 { Self(i64::MIN) } else { Self(i64::MAX) },
            Self,
        )
    }

    /// Returns the amount in minor units.
    #[must_use]
    pub const fn minor_units(self) -> i64 {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Returns the amount in minor units, widened for accumulation.
    #[must_use]
    pub fn wide_minor_units(self) -> i128 {
        i128::from(self.0)
    }

    /// Adds, returning `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.0.checked_add(rhs.0) {
            Some(minor) => Some(Self(minor)),
            None => None,
        }
    }

    /// Subtracts, returning `None` on overflow.
    #[must_use]
    pub const fn checked_sub(self, rhs: Self) -> Option<Self> {
        match self.0.checked_sub(rhs.0) {
            Some(minor) => Some(Self(minor)),
            None => None,
        }
    }

    /// Returns the absolute value, saturating at `i64::MAX`.
    #[must_use]
    pub const fn saturating_abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Returns the amount as a decimal with two fractional digits.
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, MINOR_UNIT_SCALE)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountParseError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        let normalized = value.normalize();
        if normalized.scale() > MINOR_UNIT_SCALE {
            return Err(AmountParseError::TooPrecise(value.to_string()));
        }

        normalized
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|minor| minor.to_i64())
            .map(Self)
            .ok_or_else(|| AmountParseError::OutOfRange(value.to_string()))
    }
}

impl FromStr for Amount {
    type Err = AmountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let decimal = Decimal::from_str(trimmed)
            .map_err(|_| AmountParseError::Invalid(trimmed.to_string()))?;
        Self::try_from(decimal)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(self.0.saturating_neg())
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self::saturating_from_wide(iter.map(Self::wide_minor_units).sum())
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
