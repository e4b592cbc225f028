//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing prices as floats:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Matching a product by (name, price) as floats:                         │
//! │    9.99 stored, 9.990000001 sent   → no match, duplicate row           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Prices are cents (i64) in memory and in the database.               │
//! │    Sums are checked; an overflow is an error, never a wrap.            │
//! │    Only the JSON boundary speaks decimals (see [`decimal`]).           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let total = price.checked_add(Money::from_cents(500)).unwrap();
//! assert_eq!(total.cents(), 1599);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: non-negativity of prices is a validation rule,
///   not a type rule
/// - **No operator overloads**: only checked addition is offered
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **sqlx transparent**: stored as a plain INTEGER column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from a decimal amount, rounding to the nearest cent.
    ///
    /// Only the JSON boundary should call this. Returns `None` for NaN,
    /// infinities and amounts that do not fit in i64 cents.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(9.99).unwrap().cents(), 999);
    /// assert_eq!(Money::from_decimal(0.005).unwrap().cents(), 1);
    /// assert!(Money::from_decimal(f64::NAN).is_none());
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }

        let cents = (amount * 100.0).round();
        if cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
            return None;
        }

        Some(Money(cents as i64))
    }

    /// Returns the amount as a decimal number of major units.
    ///
    /// For serialization and display only; never feed this back into math.
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).dollars(), 10);
    /// assert_eq!(Money::from_cents(-550).dollars(), -5);
    /// ```
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `$D.CC`. Debugging and logs only.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Checked Arithmetic
// =============================================================================

impl Money {
    /// Adds two amounts, returning `None` on i64 overflow.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let total = Money::from_cents(1099).checked_add(Money::from_cents(500));
    /// assert_eq!(total, Some(Money::from_cents(1599)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
    /// ```
    #[inline]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Sums amounts, returning `None` as soon as the running total overflows.
    ///
    /// An empty iterator sums to zero.
    pub fn checked_sum<I>(amounts: I) -> Option<Self>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |total, amount| total.checked_add(amount))
    }
}

// =============================================================================
// Decimal Serde Adapter
// =============================================================================

/// Serde adapter that moves `Money` across JSON as a decimal number.
///
/// ## Wire Format
/// ```text
/// Rust: Money::from_cents(999)   ◄──►   JSON: 9.99
/// ```
///
/// ## Usage
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use storefront_core::money::Money;
///
/// #[derive(Serialize, Deserialize)]
/// struct Line {
///     #[serde(with = "storefront_core::money::decimal")]
///     price: Money,
/// }
/// ```
pub mod decimal {
    use super::Money;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = f64::deserialize(deserializer)?;
        Money::from_decimal(amount)
            .ok_or_else(|| D::Error::custom(format!("invalid monetary amount: {}", amount)))
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
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_checked_add() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!(a.checked_add(b), Some(Money::from_cents(1500)));
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
        assert_eq!(
            Money::from_cents(i64::MAX).checked_add(Money::zero()),
            Some(Money::from_cents(i64::MAX))
        );
    }

    #[test]
    fn test_checked_sum_of_prices() {
        let prices = vec![Money::from_cents(999), Money::from_cents(500)];

        assert_eq!(Money::checked_sum(prices), Some(Money::from_cents(1499)));
        assert_eq!(Money::checked_sum(Vec::new()), Some(Money::zero()));
    }

    #[test]
    fn test_checked_sum_overflow() {
        let huge = Money::from_cents(6_000_000_000_000_000_000);
        assert_eq!(Money::checked_sum([huge, huge]), None);
    }

    #[test]
    fn test_from_decimal_rounds_to_cents() {
        assert_eq!(Money::from_decimal(9.99).map(|m| m.cents()), Some(999));
        assert_eq!(Money::from_decimal(5.0).map(|m| m.cents()), Some(500));
        // 0.1 + 0.2 lands on 30 cents, not 30.000000000000004
        assert_eq!(Money::from_decimal(0.1 + 0.2).map(|m| m.cents()), Some(30));
        assert_eq!(Money::from_decimal(-1.25).map(|m| m.cents()), Some(-125));
    }

    #[test]
    fn test_from_decimal_rejects_non_finite() {
        assert!(Money::from_decimal(f64::NAN).is_none());
        assert!(Money::from_decimal(f64::INFINITY).is_none());
        assert!(Money::from_decimal(f64::MAX).is_none());
    }

    #[test]
    fn test_decimal_serde_adapter() {
        #[derive(Serialize, Deserialize)]
        struct Priced {
            #[serde(with = "decimal")]
            price: Money,
        }

        let json = serde_json::to_string(&Priced {
            price: Money::from_cents(1499),
        })
        .unwrap();
        assert_eq!(json, r#"{"price":14.99}"#);

        let parsed: Priced = serde_json::from_str(r#"{"price":9.99}"#).unwrap();
        assert_eq!(parsed.price.cents(), 999);

        let integer: Priced = serde_json::from_str(r#"{"price":5}"#).unwrap();
        assert_eq!(integer.price.cents(), 500);

        assert!(serde_json::from_str::<Priced>(r#"{"price":"cheap"}"#).is_err());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_negative());
        assert_eq!(Money::default(), zero);
        assert!(Money::from_cents(-100).is_negative());
    }
}
