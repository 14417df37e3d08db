//! Money with exact two-decimal precision
//!
//! Every stored or returned amount in the system is a whole number of cents.
//! `Money` enforces that by rounding to 2 decimal places on construction using
//! round-half-away-from-zero, which matches how cash amounts are quoted at the
//! counter. Arithmetic re-rounds after every operation so residue can never
//! accumulate.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};
use thiserror::Error;

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    /// The input carried more than two decimal places
    #[error("Amount {0} has more than 2 decimal places")]
    ExcessPrecision(Decimal),
}

/// A monetary amount, always normalized to 2 decimal places
///
/// `Money` is signed: order totals and payments are positive, while ledger
/// credits and corrective adjustments may be negative. Construction via
/// [`Money::new`] rounds half away from zero; [`Money::parse_exact`] is the
/// strict boundary constructor that rejects over-precise input instead of
/// rounding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Money(Decimal);

impl Money {
    /// Creates a Money value, rounding to the nearest cent
    /// (half away from zero)
    pub fn new(amount: Decimal) -> Self {
        Self(amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }

    /// Creates Money from an integer number of cents
    pub fn from_minor(minor_units: i64) -> Self {
        Self(Decimal::new(minor_units, 2))
    }

    /// The zero amount
    pub fn zero() -> Self {
        Self(dec!(0))
    }

    /// Converts a raw float to Money, coercing NaN and infinities to zero
    ///
    /// This is the tolerant path for values that originate outside the typed
    /// boundary (legacy imports, spreadsheet dumps). Binary representation
    /// error such as `0.1 + 0.2` is absorbed by the cent rounding.
    pub fn from_f64_lossy(value: f64) -> Self {
        let amount = Decimal::from_f64_retain(value).unwrap_or(Decimal::ZERO);
        Self::new(amount)
    }

    /// Strict constructor: accepts at most two decimal places
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::ExcessPrecision`] when the input carries
    /// sub-cent precision. Used at the API boundary so over-precise payment
    /// amounts are rejected rather than silently truncated.
    pub fn parse_exact(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.normalize().scale() > 2 {
            return Err(MoneyError::ExcessPrecision(amount));
        }
        Ok(Self::new(amount))
    }

    /// Returns the underlying decimal amount
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Returns the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Returns the smaller of two amounts
    pub fn min(self, other: Self) -> Self {
        if self <= other {
            self
        } else {
            other
        }
    }

    /// Multiplies by a scalar (e.g. quantity * rate), rounding the result
    pub fn multiply(&self, factor: Decimal) -> Self {
        Self::new(self.0 * factor)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.0 - other.0)
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;

    fn mul(self, factor: Decimal) -> Self {
        self.multiply(factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Always emit two decimal places on the wire, even for whole amounts
        serializer.collect_str(&format_args!("{:.2}", self.0))
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Qualified call: rust_decimal has an inherent `deserialize([u8; 16])`
        // that would otherwise shadow the serde trait method
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Ok(Money::new(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rounds_half_away_from_zero() {
        assert_eq!(Money::new(dec!(10.125)).amount(), dec!(10.13));
        assert_eq!(Money::new(dec!(-10.125)).amount(), dec!(-10.13));
        assert_eq!(Money::new(dec!(10.124)).amount(), dec!(10.12));
    }

    #[test]
    fn test_float_residue_is_absorbed() {
        let m = Money::from_f64_lossy(0.1 + 0.2);
        assert_eq!(m.amount(), dec!(0.30));
    }

    #[test]
    fn test_lossy_coerces_bad_input_to_zero() {
        assert_eq!(Money::from_f64_lossy(f64::NAN), Money::zero());
        assert_eq!(Money::from_f64_lossy(f64::INFINITY), Money::zero());
    }

    #[test]
    fn test_parse_exact_rejects_sub_cent_precision() {
        assert_eq!(
            Money::parse_exact(dec!(10.123)),
            Err(MoneyError::ExcessPrecision(dec!(10.123)))
        );
        assert_eq!(Money::parse_exact(dec!(10.12)), Ok(Money::new(dec!(10.12))));
        // Trailing zeros are not precision
        assert_eq!(Money::parse_exact(dec!(10.1200)), Ok(Money::new(dec!(10.12))));
    }

    #[test]
    fn test_arithmetic_rerounds() {
        let a = Money::new(dec!(0.10));
        let b = Money::new(dec!(0.20));
        assert_eq!((a + b).amount(), dec!(0.30));
        assert_eq!((a - b).amount(), dec!(-0.10));
    }

    #[test]
    fn test_multiply_rounds() {
        let rate = Money::new(dec!(33.34));
        assert_eq!(rate.multiply(dec!(3)).amount(), dec!(100.02));
        // 0.33 * 0.5 = 0.165, half rounds away from zero
        let odd = Money::new(dec!(0.33));
        assert_eq!(odd.multiply(dec!(0.5)).amount(), dec!(0.17));
    }

    #[test]
    fn test_min() {
        let a = Money::new(dec!(5));
        let b = Money::new(dec!(3));
        assert_eq!(a.min(b), b);
        assert_eq!(b.min(a), b);
    }

    #[test]
    fn test_display_always_two_decimals() {
        assert_eq!(Money::new(dec!(5)).to_string(), "5.00");
        assert_eq!(Money::new(dec!(5.1)).to_string(), "5.10");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn construction_is_always_cent_precise(cents in -1_000_000_000i64..1_000_000_000i64) {
            let m = Money::from_minor(cents);
            prop_assert!(m.amount().scale() <= 2);
            prop_assert_eq!(m.amount() * dec!(100), Decimal::from(cents));
        }

        #[test]
        fn addition_is_associative(
            a in -1_000_000i64..1_000_000i64,
            b in -1_000_000i64..1_000_000i64,
            c in -1_000_000i64..1_000_000i64
        ) {
            let ma = Money::from_minor(a);
            let mb = Money::from_minor(b);
            let mc = Money::from_minor(c);
            prop_assert_eq!((ma + mb) + mc, ma + (mb + mc));
        }

        #[test]
        fn from_f64_matches_cent_rounding(cents in -100_000_000i64..100_000_000i64) {
            // Any value that is a whole number of cents survives the f64 trip
            let m = Money::from_f64_lossy(cents as f64 / 100.0);
            prop_assert_eq!(m, Money::from_minor(cents));
        }
    }
}
