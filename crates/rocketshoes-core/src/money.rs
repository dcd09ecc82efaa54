//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The catalog sends prices as JSON numbers: "price": 139.9               │
//! │  Multiplying the float: 139.9 × 3 = 419.70000000000005  ❌              │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Read the decimal TEXT "139.9" → 13990 cents                          │
//! │    13990 × 3 = 41970 cents = R$ 419,70  ✅                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rocketshoes_core::money::Money;
//!
//! let price = Money::parse_decimal("139.9").unwrap();
//! assert_eq!(price.cents(), 13990);
//!
//! let line_total = price * 3;
//! assert_eq!(line_total.to_string(), "R$ 419,70");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (centavos).
///
/// ## Where Money is Used
/// ```text
/// entry.display["price"] ──► Money (unit) ──► × amount ──► line total
///                                                           │
///                                   Σ line totals ◄─────────┘
///                                        │
///                                        ▼
///                                 CartTotals.subtotal
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a decimal string such as `"139.9"` or `"-5.50"` without going
    /// through floating point.
    ///
    /// Digits past the second fraction digit round half-up on the third.
    ///
    /// ## Example
    /// ```rust
    /// use rocketshoes_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("10").unwrap().cents(), 1000);
    /// assert_eq!(Money::parse_decimal("0.125").unwrap().cents(), 13);
    /// assert!(Money::parse_decimal("1e3").is_err());
    /// ```
    pub fn parse_decimal(text: &str) -> CoreResult<Self> {
        let invalid = |reason: &str| CoreError::InvalidPrice {
            value: text.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = text.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (major, minor) = digits.split_once('.').unwrap_or((digits, ""));

        if major.is_empty() && minor.is_empty() {
            return Err(invalid("no digits"));
        }
        if !major.bytes().all(|b| b.is_ascii_digit()) || !minor.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid("expected a plain decimal number"));
        }

        let major_value: i64 = if major.is_empty() {
            0
        } else {
            major.parse().map_err(|_| invalid("value too large"))?
        };

        let mut fraction = minor.bytes().map(|b| i64::from(b - b'0'));
        let tenths = fraction.next().unwrap_or(0);
        let hundredths = fraction.next().unwrap_or(0);
        let round_up = fraction.next().is_some_and(|d| d >= 5);

        let cents = major_value
            .checked_mul(100)
            .and_then(|c| c.checked_add(tenths * 10 + hundredths + i64::from(round_up)))
            .ok_or_else(|| invalid("value too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Reads a JSON number (or numeric string) as money.
    pub fn from_json(value: &Value) -> CoreResult<Self> {
        match value {
            Value::Number(n) => Money::parse_decimal(&n.to_string()),
            Value::String(s) => Money::parse_decimal(s),
            other => Err(CoreError::InvalidPrice {
                value: other.to_string(),
                reason: "not a number".to_string(),
            }),
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (reais) portion.
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies money by an entry amount, saturating at the `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use rocketshoes_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Brazilian real formatting: `R$ 1234,56`.
///
/// ## Note
/// No thousands separator. Frontends doing full localization should format
/// `cents()` themselves.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}R$ {},{:02}",
            sign,
            self.reais().abs(),
            self.cents_part()
        )
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

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
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
