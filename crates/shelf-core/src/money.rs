//! # Money Module
//!
//! Provides the `Money` type for prices and revenue.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With f64 prices:                                                       │
//! │    10.99 × 3 = 32.970000000000006  ❌ WRONG!                            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1099 cents × 3 = 3297 cents → "32.97"                               │
//! │                                                                         │
//! │  Inventory files carry decimal text ("10.99"), which is parsed         │
//! │  straight into cents without ever passing through a float.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shelf_core::money::Money;
//!
//! let price = Money::parse_decimal("10.99").unwrap();
//! assert_eq!(price.cents(), 1099);
//!
//! let revenue = price.multiply_quantity(3);
//! assert_eq!(revenue.to_string(), "32.97");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use std::str::FromStr;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// Product.price ──► price × units_sold ──► revenue_for(variant, month, year)
///                                                   │
///                                                   └──► "Book revenue: 10.99"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use shelf_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole units portion.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the fractional portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a sold quantity, saturating at the `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use shelf_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(1099);
    /// assert_eq!(unit_price.multiply_quantity(2).cents(), 2198);
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: u64) -> Self {
        let qty = i64::try_from(qty).unwrap_or(i64::MAX);
        Money(self.0.saturating_mul(qty))
    }

    /// Parses decimal text such as `"10.99"`, `"10.5"`, `"10"` or `"1.5e1"`
    /// into cents.
    ///
    /// ## Rules
    /// - Optional leading `+` or `-`
    /// - Digits with at most one `.`, at least one digit overall (`"10."`
    ///   and `".99"` are fine)
    /// - Optional exponent: `e` or `E`, optional sign, digits
    /// - Anything past the second fraction digit is rounded half-up on the
    ///   magnitude: `"10.995"` is 1100 cents, `"10.994"` is 1099
    ///
    /// No float is involved; the digits are shifted and rounded as text.
    ///
    /// ## Example
    /// ```rust
    /// use shelf_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("10.99").unwrap().cents(), 1099);
    /// assert_eq!(Money::parse_decimal("10.5").unwrap().cents(), 1050);
    /// assert_eq!(Money::parse_decimal("7").unwrap().cents(), 700);
    /// assert_eq!(Money::parse_decimal("10.999").unwrap().cents(), 1100);
    /// assert_eq!(Money::parse_decimal("1e1").unwrap().cents(), 1000);
    /// assert!(Money::parse_decimal("ten").is_err());
    /// ```
    pub fn parse_decimal(text: &str) -> Result<Self, ValidationError> {
        let text = text.trim();
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: format!("'{}' {}", text, reason),
        };

        let (negative, unsigned) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            Some(_) => (false, text),
            None => {
                return Err(ValidationError::Required {
                    field: "price".to_string(),
                })
            }
        };

        let (mantissa, exponent) = match unsigned.split_once(|c: char| c == 'e' || c == 'E') {
            Some((mantissa, exponent)) => {
                let exponent =
                    parse_exponent(exponent).ok_or_else(|| invalid("has an invalid exponent"))?;
                (mantissa, exponent)
            }
            None => (unsigned, 0),
        };

        let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.len() + fraction.len() == 0 || !all_digits(whole) || !all_digits(fraction) {
            return Err(invalid("is not a decimal amount"));
        }

        // Value = digits × 10^(exponent - fraction.len()); cents shift by two more.
        let digits = format!("{whole}{fraction}");
        let digits = digits.trim_start_matches('0');
        let shift = exponent + 2 - fraction.len() as i64;

        let cents = if shift >= 0 {
            let shift = shift.unsigned_abs() as usize;
            if digits.is_empty() {
                Some(0)
            } else if digits.len() + shift > 19 {
                None
            } else {
                digits
                    .parse::<i64>()
                    .ok()
                    .and_then(|d| 10_i64.checked_pow(shift as u32).and_then(|p| d.checked_mul(p)))
            }
        } else {
            let dropped = usize::try_from(-shift).unwrap_or(usize::MAX);
            if dropped > digits.len() {
                Some(0)
            } else {
                let (kept, rest) = digits.split_at(digits.len() - dropped);
                let round_up = rest.as_bytes().first().is_some_and(|&b| b >= b'5');
                let kept = if kept.is_empty() { Some(0) } else { kept.parse::<i64>().ok() };
                kept.and_then(|k| k.checked_add(i64::from(round_up)))
            }
        }
        .ok_or_else(|| invalid("is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

/// Exponent digits with an optional sign, bounded so that shifting stays sane.
fn parse_exponent(text: &str) -> Option<i64> {
    let digits = text.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<i64>().ok().filter(|e| e.abs() <= 1_000)
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal with two fraction digits, no currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse_decimal(s)
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
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Mul<u64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.units(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse_decimal("10.99").unwrap().cents(), 1099);
        assert_eq!(Money::parse_decimal(" 12.05 ").unwrap().cents(), 1205);
        assert_eq!(Money::parse_decimal("0.5").unwrap().cents(), 50);
        assert_eq!(Money::parse_decimal("+3").unwrap().cents(), 300);
        assert_eq!(Money::parse_decimal("-2.25").unwrap().cents(), -225);
        assert_eq!(Money::parse_decimal("10.").unwrap().cents(), 1000);
        assert_eq!(Money::parse_decimal(".99").unwrap().cents(), 99);
    }

    #[test]
    fn test_parse_decimal_rounds_half_up_to_cents() {
        assert_eq!(Money::parse_decimal("10.999").unwrap().cents(), 1100);
        assert_eq!(Money::parse_decimal("10.995").unwrap().cents(), 1100);
        assert_eq!(Money::parse_decimal("10.994").unwrap().cents(), 1099);
        assert_eq!(Money::parse_decimal("10.9949999").unwrap().cents(), 1099);
        assert_eq!(Money::parse_decimal("-10.995").unwrap().cents(), -1100);
        assert_eq!(Money::parse_decimal("0.004").unwrap().cents(), 0);
        assert_eq!(Money::parse_decimal("0.005").unwrap().cents(), 1);
        assert_eq!(Money::parse_decimal("0.0000000000000000000000009").unwrap().cents(), 0);
    }

    #[test]
    fn test_parse_decimal_exponent_form() {
        assert_eq!(Money::parse_decimal("1e1").unwrap().cents(), 1000);
        assert_eq!(Money::parse_decimal("1.5E2").unwrap().cents(), 15000);
        assert_eq!(Money::parse_decimal("1099e-2").unwrap().cents(), 1099);
        assert_eq!(Money::parse_decimal("1.0995e+1").unwrap().cents(), 1100);
        assert_eq!(Money::parse_decimal("5e-3").unwrap().cents(), 1);
        assert!(Money::parse_decimal("1e30").is_err());
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        assert!(matches!(
            Money::parse_decimal(""),
            Err(ValidationError::Required { .. })
        ));
        for bad in ["abc", ".", "10,99", "--1", "1e", "e5", "1e+", "1.2.3", "NaN", "Infinity", "99999999999999999999"] {
            assert!(
                matches!(Money::parse_decimal(bad), Err(ValidationError::InvalidFormat { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(99);

        assert_eq!((a + b).cents(), 1099);
        assert_eq!((b * 3).cents(), 297);

        let total: Money = [a, b, Money::zero()].into_iter().sum();
        assert_eq!(total.cents(), 1099);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let big = Money::from_cents(i64::MAX - 1);
        assert_eq!(big.multiply_quantity(3).cents(), i64::MAX);
        assert_eq!(Money::from_cents(1099).multiply_quantity(u64::MAX).cents(), i64::MAX);
        assert_eq!(Money::zero().multiply_quantity(u64::MAX), Money::zero());
        assert_eq!(Money::from_cents(-5).multiply_quantity(u64::MAX).cents(), i64::MIN);

        let mut total = big + Money::from_cents(10);
        assert_eq!(total.cents(), i64::MAX);
        total += Money::from_cents(1);
        assert_eq!(total.cents(), i64::MAX);
    }

    #[test]
    fn test_serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(1099)).unwrap();
        assert_eq!(json, "1099");
    }
}
