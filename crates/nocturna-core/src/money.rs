//! # Money Module
//!
//! Provides the `Money` type for purchase prices, serving prices and revenue.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  A bottle's revenue is servings × price:                               │
//! │    7 × 0.1 + 7 × 0.2 ≠ 7 × 0.3 in binary floating point  ❌            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    7 × 300 cents = 2100 cents, exactly, every time                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use nocturna_core::money::Money;
//!
//! let glass = Money::from_cents(300);     // €3.00
//! let bottle = Money::from_cents(1000);   // €10.00
//!
//! let revenue = glass.checked_multiply_servings(7).unwrap();
//! assert_eq!((revenue - bottle).cents(), 1100);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;
use ts_rs::TS;

/// Currency symbol used by `Display`. Hosts may pick another one through
/// [`crate::config::PricingSettings::currency_symbol`].
pub const DEFAULT_CURRENCY_SYMBOL: &str = "€";

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: unit profit goes negative when a bottle loses money
/// - **Single field tuple struct**: zero-cost abstraction over i64
///
/// ## Where Money is Used
/// ```text
/// purchase_price ──────────────────────────────┐
///                                              ▼
/// sale_price × real_servings ──► revenue ──► unit_profit ──► margin %
///
/// glass_price × servings ──► glass revenue ─┐
///                                           ├──► recommended channel
/// vip_bottle_price ─────────► VIP revenue ──┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use nocturna_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // €10.99
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

    /// Returns the major unit (euros) portion.
    #[inline]
    pub const fn units(&self) -> i64 {
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

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies a per-serving price by a serving count.
    ///
    /// Returns `None` when the product does not fit in i64 cents.
    ///
    /// ```rust
    /// use nocturna_core::money::Money;
    ///
    /// let glass = Money::from_cents(300);
    /// assert_eq!(glass.checked_multiply_servings(7), Some(Money::from_cents(2100)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_multiply_servings(2), None);
    /// ```
    pub fn checked_multiply_servings(&self, servings: u64) -> Option<Money> {
        let servings = i64::try_from(servings).ok()?;
        self.0.checked_mul(servings).map(Money)
    }

    /// Checked subtraction, `None` on overflow.
    #[inline]
    pub fn checked_sub(&self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Returns `self` as a percentage of `base`, or `None` when `base` is zero.
    ///
    /// The multiplication by 100 happens in integers before the division so
    /// that whole percentages come out exact (1100 of 1000 is 110.0, not
    /// 110.00000000000001).
    ///
    /// ```rust
    /// use nocturna_core::money::Money;
    ///
    /// let profit = Money::from_cents(1100);
    /// assert_eq!(profit.percent_of(Money::from_cents(1000)), Some(110.0));
    /// assert_eq!(profit.percent_of(Money::zero()), None);
    /// ```
    pub fn percent_of(&self, base: Money) -> Option<f64> {
        if base.is_zero() {
            return None;
        }
        Some((self.0 as i128 * 100) as f64 / base.0 as f64)
    }

    /// Formats the amount with an explicit currency symbol.
    ///
    /// ```rust
    /// use nocturna_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-550).format_with("$"), "-$5.50");
    /// ```
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.units().abs(),
            self.cents_part()
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display uses [`DEFAULT_CURRENCY_SYMBOL`]. For debugging and logs; hosts
/// localize for the UI.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(DEFAULT_CURRENCY_SYMBOL))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
