//! # Invoice Repository
//!
//! Database operations for invoices.
//!
//! Invoices come into being two ways: directly from a job's line items
//! (`create_from_job`, here) or by converting an accepted estimate
//! (`EstimateRepository::convert_to_invoice`). Either way the row is a draft
//! with a freshly generated `INV-YYYYMMDD-NNNN` number; invoice numbers run on
//! their own daily sequence, independent of estimates.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repository::estimate::latest_document_number;
use arcline_core::docnum::{self, DocumentPrefix};
use arcline_core::{
    DocumentTotals, Invoice, InvoicePatch, InvoiceStatus, JobItem, NewInvoice, TaxRate, totals,
};

/// Every column of the invoices table, in insert order.
const COLUMNS: &str = "id, job_id, invoice_number, issue_date, due_date, status, \
                       subtotal_cents, tax_rate_bps, tax_amount_cents, total_amount_cents, \
                       notes, created_at, updated_at";

/// Retry budget for number collisions; see the estimate repository.
const MAX_NUMBER_ATTEMPTS: u32 = 3;

/// Repository for invoice database operations.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceRepository { pool }
    }

    /// Gets all invoices, most recently issued first.
    pub async fn get_all(&self) -> DbResult<Vec<Invoice>> {
        let invoices = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {COLUMNS} FROM invoices ORDER BY issue_date DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(invoices)
    }

    /// Gets all invoices for a job, most recently issued first.
    pub async fn get_by_job(&self, job_id: &str) -> DbResult<Vec<Invoice>> {
        let invoices = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {COLUMNS} FROM invoices WHERE job_id = ?1 ORDER BY issue_date DESC"
        ))
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(invoices)
    }

    /// Gets an invoice by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Invoice>> {
        let invoice = sqlx::query_as::<_, Invoice>(&format!(
            "SELECT {COLUMNS} FROM invoices WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invoice)
    }

    /// Previews the next invoice number for today without reserving it.
    pub async fn next_number(&self) -> DbResult<String> {
        let today = Utc::now().date_naive();
        let latest = latest_document_number(&self.pool, DocumentPrefix::Inv, today).await?;
        Ok(docnum::next_number(
            DocumentPrefix::Inv,
            today,
            latest.as_deref(),
        )?)
    }

    /// Creates a draft invoice from a job's line items.
    ///
    /// Same shape as `EstimateRepository::create_from_job`: validate, then in
    /// one transaction check the job, aggregate its items, derive the totals,
    /// generate the day's next `INV` number, and insert as Draft; retry on a
    /// number collision.
    pub async fn create_from_job(&self, input: &NewInvoice) -> DbResult<Invoice> {
        input.validate()?;

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.try_create(input).await {
                Err(e) if e.is_unique_violation() && attempt < MAX_NUMBER_ATTEMPTS => {
                    debug!(attempt, "Invoice number collided, regenerating");
                }
                result => return result,
            }
        }
    }

    /// One create attempt inside a single transaction.
    async fn try_create(&self, input: &NewInvoice) -> DbResult<Invoice> {
        let now = Utc::now();
        let today = now.date_naive();

        let mut tx = self.pool.begin().await?;

        let job_exists: Option<String> = sqlx::query_scalar("SELECT id FROM jobs WHERE id = ?1")
            .bind(&input.job_id)
            .fetch_optional(&mut *tx)
            .await?;
        if job_exists.is_none() {
            return Err(DbError::not_found("Job", &input.job_id));
        }

        let items = sqlx::query_as::<_, JobItem>(
            "SELECT id, job_id, description, quantity_milli, unit_price_cents, \
                    total_price_cents, notes, created_at, updated_at \
             FROM job_items WHERE job_id = ?1 ORDER BY created_at",
        )
        .bind(&input.job_id)
        .fetch_all(&mut *tx)
        .await?;

        let derived = DocumentTotals::compute(
            totals::subtotal(&items),
            TaxRate::from_bps(input.tax_rate_bps),
        );

        let latest = latest_document_number(&mut *tx, DocumentPrefix::Inv, today).await?;
        let number = docnum::next_number(DocumentPrefix::Inv, today, latest.as_deref())?;

        let invoice = Invoice {
            id: Uuid::new_v4().to_string(),
            job_id: input.job_id.clone(),
            invoice_number: number,
            issue_date: input.issue_date,
            due_date: input.due_date,
            status: InvoiceStatus::Draft,
            subtotal_cents: derived.subtotal.cents(),
            tax_rate_bps: input.tax_rate_bps,
            tax_amount_cents: derived.tax_amount.cents(),
            total_amount_cents: derived.total.cents(),
            notes: input.notes.clone(),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(&format!(
            "INSERT INTO invoices ({COLUMNS}) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"
        ))
        .bind(&invoice.id)
        .bind(&invoice.job_id)
        .bind(&invoice.invoice_number)
        .bind(invoice.issue_date)
        .bind(invoice.due_date)
        .bind(invoice.status)
        .bind(invoice.subtotal_cents)
        .bind(invoice.tax_rate_bps)
        .bind(invoice.tax_amount_cents)
        .bind(invoice.total_amount_cents)
        .bind(&invoice.notes)
        .bind(invoice.created_at)
        .bind(invoice.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            id = %invoice.id,
            number = %invoice.invoice_number,
            total = %invoice.total_amount(),
            "Invoice created"
        );

        Ok(invoice)
    }

    /// Updates an invoice with the fields of a patch.
    ///
    /// Derived totals are rewritten only when the patch carries BOTH
    /// `subtotal_cents` and `tax_rate_bps`. `updated_at` is always refreshed.
    pub async fn update(&self, id: &str, patch: &InvoicePatch) -> DbResult<Invoice> {
        patch.validate()?;

        let mut invoice = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Invoice", id))?;

        if let Some(issue_date) = patch.issue_date {
            invoice.issue_date = issue_date;
        }
        if let Some(due_date) = patch.due_date {
            invoice.due_date = due_date;
        }
        if let Some(status) = patch.status {
            invoice.status = status;
        }
        if let Some(cents) = patch.subtotal_cents {
            invoice.subtotal_cents = cents;
        }
        if let Some(bps) = patch.tax_rate_bps {
            invoice.tax_rate_bps = bps;
        }
        if let Some(notes) = &patch.notes {
            invoice.notes = Some(notes.clone());
        }

        if let (Some(cents), Some(bps)) = (patch.subtotal_cents, patch.tax_rate_bps) {
            let derived = DocumentTotals::compute(
                arcline_core::Money::from_cents(cents),
                TaxRate::from_bps(bps),
            );
            invoice.tax_amount_cents = derived.tax_amount.cents();
            invoice.total_amount_cents = derived.total.cents();
        }
        invoice.updated_at = Utc::now();

        debug!(id = %id, "Updating invoice");

        sqlx::query(
            "UPDATE invoices SET \
                issue_date = ?2, due_date = ?3, status = ?4, subtotal_cents = ?5, \
                tax_rate_bps = ?6, tax_amount_cents = ?7, total_amount_cents = ?8, \
                notes = ?9, updated_at = ?10 \
             WHERE id = ?1",
        )
        .bind(id)
        .bind(invoice.issue_date)
        .bind(invoice.due_date)
        .bind(invoice.status)
        .bind(invoice.subtotal_cents)
        .bind(invoice.tax_rate_bps)
        .bind(invoice.tax_amount_cents)
        .bind(invoice.total_amount_cents)
        .bind(&invoice.notes)
        .bind(invoice.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(invoice)
    }

    /// Overwrites the status field and refreshes `updated_at`.
    ///
    /// No transition table is enforced. A missing id is `DbError::NotFound`
    /// and mutates nothing.
    pub async fn update_status(&self, id: &str, status: InvoiceStatus) -> DbResult<()> {
        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE invoices SET status = ?2, updated_at = ?3 WHERE id = ?1",
        )
        .bind(id)
        .bind(status)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Invoice", id));
        }

        debug!(id = %id, status = ?status, "Invoice status updated");

        Ok(())
    }

    /// Deletes an invoice. Explicit and terminal; never cascaded from job
    /// deletion.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting invoice");

        sqlx::query("DELETE FROM invoices WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
