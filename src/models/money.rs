//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) so that sums never drift the way
//! binary floating point does. Formatting to two decimal places only happens
//! at display or export time.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
///
/// Arithmetic saturates at the bounds of `i64` instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use bizledger::models::Money;
    /// let amount = Money::from_cents(4550); // $45.50
    /// assert_eq!(amount.to_string(), "$45.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole units, truncated toward zero
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// The cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Convert a floating point amount to the nearest cent
    pub fn from_f64(value: f64) -> Result<Self, MoneyParseError> {
        if !value.is_finite() {
            return Err(MoneyParseError::InvalidFormat(value.to_string()));
        }
        let cents = (value * 100.0).round();
        if cents.abs() >= i64::MAX as f64 {
            return Err(MoneyParseError::OutOfRange(value.to_string()));
        }
        Ok(Self(cents as i64))
    }

    /// Parse a money amount from a string
    ///
    /// Accepts "45.50", "-45.50", "$45.50", "45", "45.5". More than two
    /// fractional digits is rejected rather than silently truncated.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s;
        let s = s.trim();

        let (negative, s) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s),
        };
        let s = s.strip_prefix('$').unwrap_or(s).trim();

        let invalid = || MoneyParseError::InvalidFormat(original.trim().to_string());

        if s.is_empty() {
            return Err(invalid());
        }

        let (units_str, cents_str) = match s.split_once('.') {
            Some((units, cents)) => (units, cents),
            None => (s, ""),
        };

        if !units_str.chars().all(|c| c.is_ascii_digit())
            || !cents_str.chars().all(|c| c.is_ascii_digit())
            || (units_str.is_empty() && cents_str.is_empty())
        {
            return Err(invalid());
        }
        if cents_str.len() > 2 {
            return Err(MoneyParseError::TooPrecise(original.trim().to_string()));
        }

        let units: i64 = if units_str.is_empty() {
            0
        } else {
            units_str
                .parse()
                .map_err(|_| MoneyParseError::OutOfRange(original.trim().to_string()))?
        };
        let cents: i64 = match cents_str.len() {
            0 => 0,
            1 => cents_str.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => cents_str.parse().map_err(|_| invalid())?,
        };

        let total = units
            .checked_mul(100)
            .and_then(|u| u.checked_add(cents))
            .ok_or_else(|| MoneyParseError::OutOfRange(original.trim().to_string()))?;

        Ok(Self(if negative { -total } else { total }))
    }

    /// Plain decimal representation without a currency symbol ("-45.50")
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.units().abs(), self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, self.units(), self.cents_part())
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_decimal_string())
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount such as \"45.50\" or 45.5")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        Money::parse(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(100)
            .map(Money::from_cents)
            .ok_or_else(|| E::custom(MoneyParseError::OutOfRange(v.to_string())))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        i64::try_from(v)
            .map_err(|_| E::custom(MoneyParseError::OutOfRange(v.to_string())))
            .and_then(|v| self.visit_i64(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Money::from_f64(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    TooPrecise(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::TooPrecise(s) => {
                write!(f, "More than two decimal places: {}", s)
            }
            MoneyParseError::OutOfRange(s) => write!(f, "Amount out of range: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
