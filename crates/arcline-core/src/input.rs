//! # Service-Boundary Inputs
//!
//! Typed input schemas for everything a caller can submit.
//!
//! ## Why Not Loose Maps?
//! Form submissions arrive as JSON. Deserializing into these structs gives an
//! explicit field list with required/optional markers, and `validate()` runs
//! the field rules before any SQL does. Malformed input dies here with a
//! `ValidationError`, not halfway through a write.
//!
//! ## Patch Semantics
//! `*Patch` structs follow the partial-update convention: `None` means "leave
//! the column as stored", `Some(value)` means "write this value". Optional
//! *columns* (notes, email) therefore cannot be cleared back to NULL through a
//! patch; clearing is a frontend concern handled by sending an empty string.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{EstimateStatus, InvoiceStatus, JobStatus};
use crate::validation::{
    validate_cents, validate_notes, validate_optional_text, validate_quantity_milli,
    validate_required_text, validate_tax_rate_bps, validate_uuid,
};

// =============================================================================
// Customers
// =============================================================================

/// Input for creating a customer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewCustomer {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub notes: Option<String>,
}

impl NewCustomer {
    /// Checks field rules; runs before any store call.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_required_text("name", &self.name)?;
        validate_optional_text("email", self.email.as_deref())?;
        validate_optional_text("phone", self.phone.as_deref())?;
        validate_optional_text("address", self.address.as_deref())?;
        validate_optional_text("city", self.city.as_deref())?;
        validate_optional_text("state", self.state.as_deref())?;
        validate_optional_text("zip", self.zip.as_deref())?;
        validate_notes(self.notes.as_deref())
    }
}

/// Partial update for a customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub notes: Option<String>,
}

impl CustomerPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            validate_required_text("name", name)?;
        }
        validate_optional_text("email", self.email.as_deref())?;
        validate_optional_text("phone", self.phone.as_deref())?;
        validate_optional_text("address", self.address.as_deref())?;
        validate_optional_text("city", self.city.as_deref())?;
        validate_optional_text("state", self.state.as_deref())?;
        validate_optional_text("zip", self.zip.as_deref())?;
        validate_notes(self.notes.as_deref())
    }
}

// =============================================================================
// Jobs
// =============================================================================

/// Input for creating a job.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewJob {
    pub customer_id: String,
    pub title: String,
    pub description: Option<String>,
    /// Defaults to `Pending` when omitted.
    pub status: Option<JobStatus>,
    #[ts(as = "Option<String>")]
    pub scheduled_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl NewJob {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_uuid("customer_id", &self.customer_id)?;
        validate_required_text("title", &self.title)?;
        validate_optional_text("description", self.description.as_deref())?;
        validate_optional_text("location", self.location.as_deref())?;
        validate_notes(self.notes.as_deref())
    }
}

/// Partial update for a job.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct JobPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<JobStatus>,
    #[ts(as = "Option<String>")]
    pub scheduled_date: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub completed_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl JobPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_required_text("title", title)?;
        }
        validate_optional_text("description", self.description.as_deref())?;
        validate_optional_text("location", self.location.as_deref())?;
        validate_notes(self.notes.as_deref())
    }
}

// =============================================================================
// Job Items
// =============================================================================

/// Input for adding a line item to a job.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewJobItem {
    pub job_id: String,
    pub description: String,
    /// Quantity in thousandths of a unit (2500 = 2.5).
    pub quantity_milli: i64,
    /// Unit price in cents.
    pub unit_price_cents: i64,
    pub notes: Option<String>,
}

impl NewJobItem {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_uuid("job_id", &self.job_id)?;
        validate_required_text("description", &self.description)?;
        validate_quantity_milli(self.quantity_milli)?;
        validate_cents("unit_price", self.unit_price_cents)?;
        validate_notes(self.notes.as_deref())
    }
}

/// Partial update for a line item.
///
/// The derived line total is recomputed only when BOTH `quantity_milli` and
/// `unit_price_cents` are present; a patch carrying one of the pair writes
/// that column and leaves the stored total untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct JobItemPatch {
    pub description: Option<String>,
    pub quantity_milli: Option<i64>,
    pub unit_price_cents: Option<i64>,
    pub notes: Option<String>,
}

impl JobItemPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(description) = &self.description {
            validate_required_text("description", description)?;
        }
        if let Some(milli) = self.quantity_milli {
            validate_quantity_milli(milli)?;
        }
        if let Some(cents) = self.unit_price_cents {
            validate_cents("unit_price", cents)?;
        }
        validate_notes(self.notes.as_deref())
    }
}

// =============================================================================
// Documents
// =============================================================================

/// Input for creating an estimate from a job's line items.
///
/// Subtotal, tax amount, and total are derived, never supplied; the document
/// number is generated, never supplied.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewEstimate {
    pub job_id: String,
    #[ts(as = "String")]
    pub issue_date: NaiveDate,
    #[ts(as = "String")]
    pub expiry_date: NaiveDate,
    pub tax_rate_bps: u32,
    pub notes: Option<String>,
}

impl NewEstimate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_uuid("job_id", &self.job_id)?;
        validate_tax_rate_bps(self.tax_rate_bps)?;
        validate_notes(self.notes.as_deref())
    }
}

/// Input for creating an invoice from a job's line items.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewInvoice {
    pub job_id: String,
    #[ts(as = "String")]
    pub issue_date: NaiveDate,
    #[ts(as = "String")]
    pub due_date: NaiveDate,
    pub tax_rate_bps: u32,
    pub notes: Option<String>,
}

impl NewInvoice {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_uuid("job_id", &self.job_id)?;
        validate_tax_rate_bps(self.tax_rate_bps)?;
        validate_notes(self.notes.as_deref())
    }
}

/// Partial update for an estimate.
///
/// Derived totals are rewritten only when the patch carries BOTH
/// `subtotal_cents` and `tax_rate_bps`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EstimatePatch {
    #[ts(as = "Option<String>")]
    pub issue_date: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub expiry_date: Option<NaiveDate>,
    pub status: Option<EstimateStatus>,
    pub subtotal_cents: Option<i64>,
    pub tax_rate_bps: Option<u32>,
    pub notes: Option<String>,
}

impl EstimatePatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(cents) = self.subtotal_cents {
            validate_cents("subtotal", cents)?;
        }
        if let Some(bps) = self.tax_rate_bps {
            validate_tax_rate_bps(bps)?;
        }
        validate_notes(self.notes.as_deref())
    }
}

/// Partial update for an invoice. Same derived-total rule as estimates.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoicePatch {
    #[ts(as = "Option<String>")]
    pub issue_date: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub due_date: Option<NaiveDate>,
    pub status: Option<InvoiceStatus>,
    pub subtotal_cents: Option<i64>,
    pub tax_rate_bps: Option<u32>,
    pub notes: Option<String>,
}

impl InvoicePatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(cents) = self.subtotal_cents {
            validate_cents("subtotal", cents)?;
        }
        if let Some(bps) = self.tax_rate_bps {
            validate_tax_rate_bps(bps)?;
        }
        validate_notes(self.notes.as_deref())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn uuid() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    #[test]
    fn test_new_customer_requires_name() {
        let input = NewCustomer {
            name: "  ".to_string(),
            email: None,
            phone: None,
            address: None,
            city: None,
            state: None,
            zip: None,
            notes: None,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_new_job_item_rules() {
        let mut input = NewJobItem {
            job_id: uuid(),
            description: "Install 20A outlet".to_string(),
            quantity_milli: 2000,
            unit_price_cents: 4500,
            notes: None,
        };
        assert!(input.validate().is_ok());

        input.quantity_milli = 0;
        assert!(input.validate().is_err());

        input.quantity_milli = 2000;
        input.unit_price_cents = -1;
        assert!(input.validate().is_err());

        input.unit_price_cents = 0; // no-charge line is fine
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_new_estimate_rejects_bad_job_id_and_rate() {
        let mut input = NewEstimate {
            job_id: "nope".to_string(),
            issue_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            expiry_date: NaiveDate::from_ymd_opt(2024, 4, 14).unwrap(),
            tax_rate_bps: 825,
            notes: None,
        };
        assert!(input.validate().is_err());

        input.job_id = uuid();
        assert!(input.validate().is_ok());

        input.tax_rate_bps = 10001;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_empty_patch_is_valid() {
        assert!(CustomerPatch::default().validate().is_ok());
        assert!(JobItemPatch::default().validate().is_ok());
        assert!(EstimatePatch::default().validate().is_ok());
        assert!(InvoicePatch::default().validate().is_ok());
    }
}
