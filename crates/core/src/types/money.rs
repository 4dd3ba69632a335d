//! Monetary amounts using decimal arithmetic.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount in the store currency (BRL).
///
/// Backed by [`Decimal`] so cart totals and frozen order snapshots never
/// accumulate float error. Single-currency on purpose: the store sells in
/// one currency and order totals are immutable snapshots, so no currency
/// code travels with the amount.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a money value from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a money value from an amount in cents (e.g., `1050` -> 10.50).
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R$ {:.2}", self.0)
    }
}

impl std::str::FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Decimal>().map(Self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        assert_eq!(Money::from_cents(1050).to_string(), "R$ 10.50");
        assert_eq!(Money::from_cents(0), Money::ZERO);
    }

    #[test]
    fn test_line_arithmetic() {
        // 10.00 x 2 + 5.00 x 3 = 35.00
        let total = Money::from_cents(1000) * 2 + Money::from_cents(500) * 3;
        assert_eq!(total, Money::from_cents(3500));
    }

    #[test]
    fn test_sum_empty_is_zero() {
        let total: Money = std::iter::empty::<Money>().sum();
        assert!(total.is_zero());
    }

    #[test]
    fn test_display_two_decimal_places() {
        assert_eq!(Money::from_cents(500).to_string(), "R$ 5.00");
        assert_eq!("35".parse::<Money>().unwrap().to_string(), "R$ 35.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!("10.50".parse::<Money>().unwrap(), Money::from_cents(1050));
        assert!("abc".parse::<Money>().is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let price = Money::from_cents(1999);
        let json = serde_json::to_string(&price).unwrap();
        let parsed: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, price);
    }
}
