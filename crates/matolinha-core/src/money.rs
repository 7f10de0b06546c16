//! # Money Module
//!
//! Bread prices and sale totals as whole centavos.
//!
//! ## Amount Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  "--preco 5,50" ──FromStr──►  Money(550)  ──Display──►  "5.50"          │
//! │                                   │                                     │
//! │                     × quantidade  │  multiply_quantity (exact)          │
//! │                                   ▼                                     │
//! │  stored 5.5 ◄──Serialize──   Money(1650)   ──Deserialize◄── 0.300..04   │
//! │                                              (rounded to the centavo)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stored Representation
//! The sales array is stored as JSON with amounts as decimal numbers in major
//! units (`5.5` = 5 MZN 50 centavos). `Money` serializes to and from that form;
//! conversion to floating point happens only at that boundary.
//!
//! ## Usage
//! ```rust
//! use matolinha_core::money::Money;
//!
//! let price: Money = "5.50".parse().unwrap();
//! assert_eq!(price.cents(), 550);
//!
//! let total = price.multiply_quantity(3);
//! assert_eq!(total.to_string(), "16.50");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use std::str::FromStr;

use crate::error::ValidationError;

/// Number of minor units (centavos) in one major unit.
const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (centavos for MZN).
///
/// Signed so that parsing `-2.25` is representable; validation keeps sale
/// amounts positive. Serde uses a decimal number in major units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    ///
    /// ## Example
    /// ```rust
    /// use matolinha_core::money::Money;
    ///
    /// let price = Money::from_cents(500); // 5.00 MZN
    /// assert_eq!(price.cents(), 500);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole meticais, truncated toward zero.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Centavo part, 0-99.
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Line total for `qty` loaves at this unit price.
    ///
    /// ## Example
    /// ```rust
    /// use matolinha_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(550);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 1650);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, quantity: i64) -> Self {
        Money(self.0 * quantity)
    }

    /// Value in major units as a float, for the stored JSON layout only.
    fn as_major_f64(&self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    /// Converts a decimal major-unit amount read from storage.
    ///
    /// Amounts written by the browser app can carry float noise
    /// (`0.30000000000000004`), so the value is rounded to the nearest centavo.
    fn from_major_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let cents = (value * MINOR_PER_MAJOR as f64).round();
        if cents.abs() > i64::MAX as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses a decimal amount such as `5`, `5.5`, `5.50` or `5,50`.
///
/// Parsing is exact: no floating point is involved, and more than two
/// decimal places is rejected rather than rounded.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let s = s.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (major_str, minor_str) = match digits.split_once(|c: char| c == '.' || c == ',') {
            Some((major, minor)) => (major, minor),
            None => (digits, ""),
        };

        if major_str.is_empty() && minor_str.is_empty() {
            return Err(invalid("must be a number like 5.00"));
        }
        if !major_str.chars().all(|c| c.is_ascii_digit())
            || !minor_str.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid("must be a number like 5.00"));
        }
        if minor_str.len() > 2 {
            return Err(invalid("at most two decimal places"));
        }

        let major: i64 = if major_str.is_empty() {
            0
        } else {
            major_str
                .parse()
                .map_err(|_| invalid("amount is too large"))?
        };
        let minor: i64 = match minor_str.len() {
            0 => 0,
            1 => minor_str.parse::<i64>().map_err(|_| invalid("bad decimals"))? * 10,
            _ => minor_str.parse().map_err(|_| invalid("bad decimals"))?,
        };

        let cents = major
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| invalid("amount is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount with two decimals and no currency (`16.50`).
/// The currency code is appended by whoever renders it.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_major_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::from_major_f64(value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid amount: {value}")))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, quantity: i64) -> Self {
        self.multiply_quantity(quantity)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
