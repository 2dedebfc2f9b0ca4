//! # Domain Types
//!
//! Core domain types used throughout Arcline.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │──►│      Job        │──►│    JobItem      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name           │   │  customer_id    │   │  job_id (FK)    │       │
//! │  │  email/phone    │   │  title, status  │   │  qty × price    │       │
//! │  └─────────────────┘   └───────┬─────────┘   └─────────────────┘       │
//! │                                │                                        │
//! │                 ┌──────────────┴──────────────┐                        │
//! │                 ▼                             ▼                        │
//! │  ┌─────────────────┐            ┌─────────────────┐                    │
//! │  │    Estimate     │ ─convert─► │    Invoice      │                    │
//! │  │  EST-date-seq   │            │  INV-date-seq   │                    │
//! │  │  draft..expired │            │  draft..paid    │                    │
//! │  └─────────────────┘            └─────────────────┘                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business ID where one exists (estimate_number, invoice_number) -
//!   human-readable, unique, printed on the customer-facing document

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 825 bps = 8.25% (e.g., Texas sales tax)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Quantity
// =============================================================================

/// Quantity in thousandths of a unit.
///
/// ## Why Thousandths?
/// Line items bill fractional quantities (2.5 h of labour, 12.75 m of cable).
/// Storing thousandths keeps the arithmetic in integers, same as [`Money`]:
/// 2500 milli = 2.5 units. Three decimal places cover every unit the trade
/// bills in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Quantity(i64);

impl Quantity {
    /// Creates a quantity from thousandths of a unit.
    #[inline]
    pub const fn from_milli(milli: i64) -> Self {
        Quantity(milli)
    }

    /// Creates a whole-unit quantity.
    #[inline]
    pub const fn from_whole(units: i64) -> Self {
        Quantity(units * 1000)
    }

    /// Returns the quantity in thousandths.
    #[inline]
    pub const fn milli(&self) -> i64 {
        self.0
    }

    /// Returns the quantity in units (for display only).
    #[inline]
    pub fn units(&self) -> f64 {
        self.0 as f64 / 1000.0
    }

    /// Checks if the quantity is positive (> 0).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer of the business.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Job
// =============================================================================

/// The status of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Job is booked but work has not started.
    Pending,
    /// Work is underway.
    InProgress,
    /// Work is done; the job can be estimated/invoiced at any point.
    Completed,
    /// Job was called off.
    Cancelled,
}

impl Default for JobStatus {
    fn default() -> Self {
        JobStatus::Pending
    }
}

/// A unit of work performed for a customer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Job {
    pub id: String,
    pub customer_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: JobStatus,
    #[ts(as = "Option<String>")]
    pub scheduled_date: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub completed_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Job Item
// =============================================================================

/// A billable line item on a job.
///
/// ## Derived Total
/// `total_price_cents` is always `unit_price × quantity`, rounded half-up to
/// the cent. It is computed when the item is added and recomputed only when an
/// update supplies BOTH quantity and unit price; it is never edited directly.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct JobItem {
    pub id: String,
    pub job_id: String,
    /// What was done or supplied ("Install 20A outlet", "14/2 NM-B cable").
    pub description: String,
    /// Quantity in thousandths of a unit (2500 = 2.5).
    pub quantity_milli: i64,
    /// Unit price in cents at the time the item was added.
    pub unit_price_cents: i64,
    /// Derived line total in cents.
    pub total_price_cents: i64,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl JobItem {
    /// Returns the quantity.
    #[inline]
    pub fn quantity(&self) -> Quantity {
        Quantity::from_milli(self.quantity_milli)
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }
}

// =============================================================================
// Estimate
// =============================================================================

/// The status of an estimate.
///
/// `Draft` is the initial state. `Accepted` is the only status from which a
/// derived invoice is produced (conversion sets it). No transition table is
/// structurally enforced; accepted/rejected/expired are terminal by business
/// convention only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum EstimateStatus {
    Draft,
    Sent,
    Accepted,
    Rejected,
    Expired,
}

impl Default for EstimateStatus {
    fn default() -> Self {
        EstimateStatus::Draft
    }
}

/// A priced offer for a job, derived from its line items.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Estimate {
    pub id: String,
    pub job_id: String,
    /// Business identifier, `EST-YYYYMMDD-NNNN`, unique.
    pub estimate_number: String,
    #[ts(as = "String")]
    pub issue_date: NaiveDate,
    #[ts(as = "String")]
    pub expiry_date: NaiveDate,
    pub status: EstimateStatus,
    pub subtotal_cents: i64,
    pub tax_rate_bps: u32,
    pub tax_amount_cents: i64,
    pub total_amount_cents: i64,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Estimate {
    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    /// Returns the tax rate.
    #[inline]
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    /// Returns the tax amount as Money.
    #[inline]
    pub fn tax_amount(&self) -> Money {
        Money::from_cents(self.tax_amount_cents)
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_cents(self.total_amount_cents)
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// The status of an invoice.
///
/// `Draft` is the initial state. Any status value may be set directly; there
/// is no structural transition enforcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Draft
    }
}

/// A bill for a job, either created directly or converted from an estimate.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Invoice {
    pub id: String,
    pub job_id: String,
    /// Business identifier, `INV-YYYYMMDD-NNNN`, unique.
    pub invoice_number: String,
    #[ts(as = "String")]
    pub issue_date: NaiveDate,
    #[ts(as = "String")]
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub subtotal_cents: i64,
    pub tax_rate_bps: u32,
    pub tax_amount_cents: i64,
    pub total_amount_cents: i64,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    /// Returns the tax rate.
    #[inline]
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    /// Returns the tax amount as Money.
    #[inline]
    pub fn tax_amount(&self) -> Money {
        Money::from_cents(self.tax_amount_cents)
    }

    /// Returns the grand total as Money.
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_cents(self.total_amount_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(825);
        assert_eq!(rate.bps(), 825);
        assert!((rate.percentage() - 8.25).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        let rate = TaxRate::from_percentage(8.25);
        assert_eq!(rate.bps(), 825);
    }

    #[test]
    fn test_quantity_conversions() {
        assert_eq!(Quantity::from_whole(3).milli(), 3000);
        assert_eq!(Quantity::from_milli(2500).units(), 2.5);
        assert!(Quantity::from_milli(1).is_positive());
        assert!(!Quantity::from_milli(0).is_positive());
    }

    #[test]
    fn test_status_defaults() {
        assert_eq!(JobStatus::default(), JobStatus::Pending);
        assert_eq!(EstimateStatus::default(), EstimateStatus::Draft);
        assert_eq!(InvoiceStatus::default(), InvoiceStatus::Draft);
    }

    #[test]
    fn test_status_serde_names() {
        // Stored/wire names are snake_case strings
        let s = serde_json::to_string(&JobStatus::InProgress).unwrap();
        assert_eq!(s, "\"in_progress\"");
        let s = serde_json::to_string(&EstimateStatus::Accepted).unwrap();
        assert_eq!(s, "\"accepted\"");
    }
}
