//! Currency amounts
//!
//! Amounts are held as whole cents in an `i64`. On disk they are plain JSON
//! numbers in currency units (`45.5`, `3000`), and anything unreadable in an
//! amount position loads as zero rather than failing the whole ledger.
//!
//! Arithmetic saturates at `i64::MIN`/`i64::MAX` cents, so totals over huge
//! amounts pin at the extreme instead of wrapping.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// An amount of money in cents
///
/// ```
/// use pocket_budget::models::Money;
///
/// let groceries = Money::normalize("400") - Money::normalize("165.00");
/// assert_eq!(groceries.to_string(), "$235.00");
/// assert_eq!(Money::normalize("lots"), Money::zero());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Whole currency units, e.g. `from_units(3000)` is 3000.00
    pub const fn from_units(units: i64) -> Self {
        Self(units.saturating_mul(100))
    }

    /// Round a fractional number of currency units to the nearest cent
    ///
    /// NaN and infinities become zero.
    pub fn from_units_f64(units: f64) -> Self {
        if units.is_finite() {
            Self((units * 100.0).round() as i64)
        } else {
            Self(0)
        }
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parse an amount typed by a user: `45`, `45.5`, `-12.30`, `$1200`
    ///
    /// Digits past the second decimal place are dropped.
    pub fn parse(input: &str) -> Result<Self, MoneyParseError> {
        let text = input.trim();
        let err = || MoneyParseError::InvalidFormat(text.to_string());

        let (sign, rest) = match text.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, text),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);
        let (units, fraction) = rest.split_once('.').unwrap_or((rest, ""));

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if units.is_empty() || !all_digits(units) || !all_digits(fraction) {
            return Err(err());
        }

        let mut cents_text: String = fraction.chars().take(2).collect();
        while cents_text.len() < 2 {
            cents_text.push('0');
        }

        let units: i64 = units.parse().map_err(|_| err())?;
        let cents: i64 = cents_text.parse().map_err(|_| err())?;
        units
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .map(|c| Self(sign * c))
            .ok_or_else(err)
    }

    /// Turn free-form input into an amount, treating anything non-numeric as zero
    pub fn normalize(input: &str) -> Self {
        Self::parse(input).unwrap_or_default()
    }

    /// Render with the given currency symbol, e.g. `-€12.30`
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        format!("{}{}{}.{:02}", sign, symbol, cents / 100, cents % 100)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.format_with_symbol("$"))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 % 100 {
            0 => serializer.serialize_i64(self.0 / 100),
            _ => serializer.serialize_f64(self.0 as f64 / 100.0),
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LenientAmount)
    }
}

/// Accepts numbers and numeric strings; every other value reads as zero
struct LenientAmount;

impl<'de> Visitor<'de> for LenientAmount {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an amount in currency units")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        Ok(Money(v.saturating_mul(100)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        let units = i64::try_from(v).unwrap_or(i64::MAX);
        Ok(Money(units.saturating_mul(100)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Ok(Money::from_units_f64(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        Ok(Money::normalize(v))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Money, E> {
        Ok(Money::zero())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Money, E> {
        Ok(Money::zero())
    }

    fn visit_none<E: de::Error>(self) -> Result<Money, E> {
        Ok(Money::zero())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Money, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |total, m| total + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

/// A string that is not an amount
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "'{}' is not an amount", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatting() {
        assert_eq!(Money::from_units(3000).to_string(), "$3000.00");
        assert_eq!(Money::from_cents(-6500).to_string(), "-$65.00");
        assert_eq!(Money::from_cents(7).to_string(), "$0.07");
        assert_eq!(Money::from_cents(-5).format_with_symbol("€"), "-€0.05");
        assert_eq!(format!("{:>8}", Money::from_cents(100)), "   $1.00");
    }

    #[test]
    fn test_remaining_can_go_negative() {
        let budgeted = Money::from_units(400);
        let spent: Money = [12000, 45000].iter().map(|&c| Money::from_cents(c)).sum();
        let remaining = budgeted - spent;

        assert!(remaining.is_negative());
        assert_eq!(remaining, -Money::from_cents(17000));
    }

    #[test]
    fn test_huge_amounts_saturate() {
        let huge = Money::normalize("92233720368547758");
        let spent: Money = [huge, huge].into_iter().sum();
        assert_eq!(spent, Money::from_cents(i64::MAX));

        let income = serde_json::from_str::<Money>("1e300").unwrap();
        let budgeted = serde_json::from_str::<Money>("-1e300").unwrap();
        assert_eq!(income - budgeted, Money::from_cents(i64::MAX));
        assert_eq!(budgeted - income, Money::from_cents(i64::MIN));
        assert_eq!(-Money::from_cents(i64::MIN), Money::from_cents(i64::MAX));
        assert_eq!(
            Money::from_cents(i64::MIN).to_string(),
            "-$92233720368547758.08"
        );
    }

    #[test]
    fn test_parse_user_input() {
        let cents = |s: &str| Money::parse(s).unwrap().cents();
        assert_eq!(cents("45"), 4500);
        assert_eq!(cents("45.5"), 4550);
        assert_eq!(cents("45."), 4500);
        assert_eq!(cents(" $1200.00 "), 120000);
        assert_eq!(cents("-12.30"), -1230);
        assert_eq!(cents("0.05"), 5);
        assert_eq!(cents("12.349"), 1234);
    }

    #[test]
    fn test_parse_rejects_non_amounts() {
        for input in ["", "abc", "1.2.3", "1.é", ".50", "$", "12a", "99999999999999999999"] {
            assert!(Money::parse(input).is_err(), "{:?} parsed", input);
        }
    }

    #[test]
    fn test_normalize_falls_back_to_zero() {
        assert_eq!(Money::normalize("lots"), Money::zero());
        assert_eq!(Money::normalize(""), Money::zero());
        assert_eq!(Money::normalize(" 42.10 "), Money::from_cents(4210));
    }

    #[test]
    fn test_from_units_f64_rounds_to_cents() {
        assert_eq!(Money::from_units_f64(0.1 + 0.2), Money::from_cents(30));
        assert_eq!(Money::from_units_f64(-45.5), Money::from_cents(-4550));
        assert_eq!(Money::from_units_f64(f64::NAN), Money::zero());
        assert_eq!(Money::from_units_f64(f64::NEG_INFINITY), Money::zero());
    }

    #[test]
    fn test_serializes_as_currency_units() {
        let json = |m: Money| serde_json::to_string(&m).unwrap();
        assert_eq!(json(Money::from_units(3000)), "3000");
        assert_eq!(json(Money::from_cents(4550)), "45.5");
        assert_eq!(json(Money::from_cents(-1)), "-0.01");
    }

    #[test]
    fn test_deserializes_loose_values() {
        let read = |json: &str| serde_json::from_str::<Money>(json).unwrap();
        assert_eq!(read("3000"), Money::from_units(3000));
        assert_eq!(read("45.5"), Money::from_cents(4550));
        assert_eq!(read("\"120\""), Money::from_units(120));
        assert_eq!(read("\"not a number\""), Money::zero());
        assert_eq!(read("true"), Money::zero());
        assert_eq!(read("null"), Money::zero());
    }
}
