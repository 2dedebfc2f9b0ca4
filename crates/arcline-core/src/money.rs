//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  On an invoice:                                                         │
//! │    $100.00 × 8.25% tax = $8.250000000000001  → Which cent do we bill?  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    10000 cents × 825 bps = 825 cents, exactly                          │
//! │    Rounding happens once, explicitly, at the half-cent                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use arcline_core::money::Money;
//!
//! // Create from cents (preferred)
//! let rate = Money::from_cents(8500); // $85.00/h call-out rate
//!
//! // Arithmetic operations
//! let total = rate + Money::from_cents(1500); // $100.00
//!
//! // NEVER do this:
//! // let bad = Money::from_float(85.00); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::types::{Quantity, TaxRate};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for credits and corrections
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// JobItem.unit_price ──► JobItem.total_price (× quantity)
///        │
///        ▼
/// Document subtotal ──► Tax calculation ──► Document total
/// ```
/// Every monetary value on a customer-facing document flows through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use arcline_core::money::Money;
    ///
    /// let rate = Money::from_cents(8500); // Represents $85.00
    /// assert_eq!(rate.cents(), 8500);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use arcline_core::money::Money;
    ///
    /// let rate = Money::from_major_minor(85, 50); // $85.50
    /// assert_eq!(rate.cents(), 8550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -$5.50, not -$4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
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

    /// Calculates the tax amount for this value at the given rate.
    ///
    /// ## Implementation
    /// Integer math throughout: `(amount_cents * bps + 5000) / 10000`.
    /// The +5000 rounds the half-cent up (5000/10000 = 0.5). i128 keeps the
    /// intermediate product from overflowing on large amounts.
    ///
    /// ## Example
    /// ```rust
    /// use arcline_core::money::Money;
    /// use arcline_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(10000); // $100.00
    /// let rate = TaxRate::from_bps(825);       // 8.25%
    ///
    /// // $100.00 × 8.25% = $8.25 exactly
    /// assert_eq!(subtotal.calculate_tax(rate).cents(), 825);
    ///
    /// // $10.00 × 8.25% = $0.825 → rounds to $0.83
    /// assert_eq!(Money::from_cents(1000).calculate_tax(rate).cents(), 83);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// Computes a line total: this unit price times a (possibly fractional)
    /// quantity, rounded half-up to the cent.
    ///
    /// ## Example
    /// ```rust
    /// use arcline_core::money::Money;
    /// use arcline_core::types::Quantity;
    ///
    /// let rate = Money::from_cents(8000);     // $80.00/h
    /// let hours = Quantity::from_milli(2500); // 2.5 h
    /// assert_eq!(rate.line_total(hours).cents(), 20000); // $200.00
    /// ```
    pub fn line_total(&self, quantity: Quantity) -> Money {
        let cents = (self.0 as i128 * quantity.milli() as i128 + 500) / 1000;
        Money::from_cents(cents as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and debugging. Use frontend formatting for actual UI
/// display to handle localization properly.
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

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Summation over an iterator of Money values (used by the aggregator).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
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
        let money = Money::from_cents(8550);
        assert_eq!(money.cents(), 8550);
        assert_eq!(money.dollars(), 85);
        assert_eq!(money.cents_part(), 50);
    }

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(85, 50);
        assert_eq!(money.cents(), 8550);

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(8550)), "$85.50");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 375]
            .into_iter()
            .map(Money::from_cents)
            .sum();
        assert_eq!(total.cents(), 725);

        let empty: Money = std::iter::empty::<Money>().sum();
        assert_eq!(empty, Money::zero());
    }

    #[test]
    fn test_tax_calculation_basic() {
        // $100.00 at 10% = $10.00
        let amount = Money::from_cents(10000);
        let rate = TaxRate::from_bps(1000);
        assert_eq!(amount.calculate_tax(rate).cents(), 1000);
    }

    #[test]
    fn test_tax_calculation_with_rounding() {
        // $10.00 at 8.25% = $0.825 → $0.83 (half-up)
        let amount = Money::from_cents(1000);
        let rate = TaxRate::from_bps(825);
        assert_eq!(amount.calculate_tax(rate).cents(), 83);
    }

    #[test]
    fn test_tax_at_zero_rate() {
        let amount = Money::from_cents(9999);
        assert_eq!(amount.calculate_tax(TaxRate::zero()), Money::zero());
    }

    #[test]
    fn test_line_total_whole_quantity() {
        // 3 × $2.99 = $8.97
        let unit = Money::from_cents(299);
        assert_eq!(unit.line_total(Quantity::from_whole(3)).cents(), 897);
    }

    #[test]
    fn test_line_total_fractional_quantity() {
        // 2.5 h × $80.00 = $200.00
        let unit = Money::from_cents(8000);
        assert_eq!(unit.line_total(Quantity::from_milli(2500)).cents(), 20000);

        // 1.333 × $1.00 = $1.333 → $1.33
        let unit = Money::from_cents(100);
        assert_eq!(unit.line_total(Quantity::from_milli(1333)).cents(), 133);

        // 0.005 × $1.00 = $0.005 → rounds up to $0.01
        assert_eq!(unit.line_total(Quantity::from_milli(5)).cents(), 1);
    }
}
