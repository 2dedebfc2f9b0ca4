//! # Document Totals
//!
//! Subtotal aggregation and tax/total derivation for estimates and invoices.
//!
//! ## Where Totals Come From
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Job line items (ordered by creation time)                              │
//! │    "Panel upgrade"        1 × $1,200.00  =  $1,200.00                  │
//! │    "Labour"             4.5 × $85.00     =    $382.50                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  subtotal(items)                         =  $1,582.50                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  DocumentTotals::compute(subtotal, 8.25%)                              │
//! │    tax_amount = $130.56                                                │
//! │    total      = $1,713.06                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariant
//! After any mutation that supplies both a subtotal and a tax rate, the
//! persisted document satisfies `tax_amount == subtotal.calculate_tax(rate)`
//! and `total == subtotal + tax_amount`. Repositories get all three values
//! from one [`DocumentTotals::compute`] call so the invariant cannot drift.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{JobItem, TaxRate};

// =============================================================================
// Line-Item Aggregation
// =============================================================================

/// Sums the line totals of a job's items into a document subtotal.
///
/// An empty slice yields `Money::zero()`: a job with no items priced yet is a
/// valid (if useless) thing to estimate.
///
/// ## Example
/// ```rust
/// use arcline_core::totals::subtotal;
///
/// assert_eq!(subtotal(&[]), arcline_core::Money::zero());
/// ```
pub fn subtotal(items: &[JobItem]) -> Money {
    items.iter().map(|item| item.total_price()).sum()
}

// =============================================================================
// Tax & Total Calculation
// =============================================================================

/// The three derived money columns of a document, computed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DocumentTotals {
    pub subtotal: Money,
    pub tax_amount: Money,
    pub total: Money,
}

impl DocumentTotals {
    /// Derives tax amount and grand total from a subtotal and tax rate.
    ///
    /// ## Example
    /// ```rust
    /// use arcline_core::money::Money;
    /// use arcline_core::totals::DocumentTotals;
    /// use arcline_core::types::TaxRate;
    ///
    /// let t = DocumentTotals::compute(Money::from_cents(10000), TaxRate::from_bps(1000));
    /// assert_eq!(t.tax_amount.cents(), 1000); // $100.00 at 10% → $10.00
    /// assert_eq!(t.total.cents(), 11000);     // $110.00
    /// ```
    pub fn compute(subtotal: Money, rate: TaxRate) -> Self {
        let tax_amount = subtotal.calculate_tax(rate);
        DocumentTotals {
            subtotal,
            tax_amount,
            total: subtotal + tax_amount,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::types::Quantity;

    fn item(quantity_milli: i64, unit_price_cents: i64) -> JobItem {
        let now = Utc::now();
        let unit_price = Money::from_cents(unit_price_cents);
        JobItem {
            id: "item".to_string(),
            job_id: "job".to_string(),
            description: "Labour".to_string(),
            quantity_milli,
            unit_price_cents,
            total_price_cents: unit_price
                .line_total(Quantity::from_milli(quantity_milli))
                .cents(),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_subtotal_of_empty_list_is_zero() {
        assert_eq!(subtotal(&[]), Money::zero());
    }

    #[test]
    fn test_subtotal_sums_line_totals() {
        // 1 × $1,200.00 + 4.5 × $85.00 = $1,582.50
        let items = vec![item(1000, 120_000), item(4500, 8500)];
        assert_eq!(subtotal(&items).cents(), 158_250);
    }

    #[test]
    fn test_compute_basic() {
        let t = DocumentTotals::compute(Money::from_cents(10000), TaxRate::from_bps(1000));
        assert_eq!(t.subtotal.cents(), 10000);
        assert_eq!(t.tax_amount.cents(), 1000);
        assert_eq!(t.total.cents(), 11000);
    }

    #[test]
    fn test_compute_invariant_holds_across_rates() {
        for bps in [0u32, 1, 500, 825, 1000, 10000] {
            let rate = TaxRate::from_bps(bps);
            for cents in [0i64, 1, 99, 10000, 158_250] {
                let sub = Money::from_cents(cents);
                let t = DocumentTotals::compute(sub, rate);
                assert_eq!(t.tax_amount, sub.calculate_tax(rate));
                assert_eq!(t.total, sub + t.tax_amount);
            }
        }
    }

    #[test]
    fn test_compute_zero_rate() {
        let t = DocumentTotals::compute(Money::from_cents(9999), TaxRate::zero());
        assert_eq!(t.tax_amount, Money::zero());
        assert_eq!(t.total.cents(), 9999);
    }
}
