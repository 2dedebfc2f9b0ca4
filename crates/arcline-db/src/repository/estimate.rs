//! # Estimate Repository
//!
//! Database operations for estimates, including the estimate→invoice
//! conversion.
//!
//! ## Estimate Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Estimate Lifecycle                                 │
//! │                                                                         │
//! │  1. CREATE FROM JOB                                                    │
//! │     └── create_from_job() → aggregate items, derive totals,            │
//! │         generate EST-YYYYMMDD-NNNN, insert as Draft                    │
//! │         (one transaction, retried on a number collision)               │
//! │                                                                         │
//! │  2. EDIT / SEND                                                        │
//! │     └── update() / update_status() → no transition table;              │
//! │         accepted/rejected/expired are terminal by convention only      │
//! │                                                                         │
//! │  3. CONVERT                                                            │
//! │     └── convert_to_invoice() → insert draft invoice copying the        │
//! │         totals verbatim, then mark THIS estimate accepted.             │
//! │         Insert happens-before the status write; both share one         │
//! │         transaction so a partial result cannot be committed.           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use arcline_core::docnum::{self, DocumentPrefix};
use arcline_core::{
    DocumentTotals, Estimate, EstimatePatch, EstimateStatus, InvoiceStatus, JobItem, NewEstimate,
    TaxRate, totals,
};

/// Every column of the estimates table, in insert order.
const COLUMNS: &str = "id, job_id, estimate_number, issue_date, expiry_date, status, \
                       subtotal_cents, tax_rate_bps, tax_amount_cents, total_amount_cents, \
                       notes, created_at, updated_at";

/// How many times a create/convert regenerates its document number after a
/// UNIQUE collision before giving up. Collisions need two writers in the same
/// day hitting the same sequence, so one retry almost always suffices.
const MAX_NUMBER_ATTEMPTS: u32 = 3;

/// Repository for estimate database operations.
#[derive(Debug, Clone)]
pub struct EstimateRepository {
    pool: SqlitePool,
}

impl EstimateRepository {
    /// Creates a new EstimateRepository.
    pub fn new(pool: SqlitePool) -> Self {
        EstimateRepository { pool }
    }

    /// Gets all estimates, most recently issued first.
    pub async fn get_all(&self) -> DbResult<Vec<Estimate>> {
        let estimates = sqlx::query_as::<_, Estimate>(&format!(
            "SELECT {COLUMNS} FROM estimates ORDER BY issue_date DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(estimates)
    }

    /// Gets all estimates for a job, most recently issued first.
    pub async fn get_by_job(&self, job_id: &str) -> DbResult<Vec<Estimate>> {
        let estimates = sqlx::query_as::<_, Estimate>(&format!(
            "SELECT {COLUMNS} FROM estimates WHERE job_id = ?1 ORDER BY issue_date DESC"
        ))
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(estimates)
    }

    /// Gets an estimate by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Estimate>> {
        let estimate = sqlx::query_as::<_, Estimate>(&format!(
            "SELECT {COLUMNS} FROM estimates WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(estimate)
    }

    /// Previews the next estimate number for today without reserving it.
    ///
    /// The number actually assigned by [`create_from_job`] is generated again
    /// inside the insert transaction, so this is a display hint, not a
    /// reservation.
    ///
    /// [`create_from_job`]: EstimateRepository::create_from_job
    pub async fn next_number(&self) -> DbResult<String> {
        let today = Utc::now().date_naive();
        let latest = latest_document_number(&self.pool, DocumentPrefix::Est, today).await?;
        Ok(docnum::next_number(
            DocumentPrefix::Est,
            today,
            latest.as_deref(),
        )?)
    }

    /// Creates a draft estimate from a job's line items.
    ///
    /// ## What This Does
    /// 1. Validates the input
    /// 2. In one transaction: checks the job exists, aggregates its items,
    ///    derives subtotal/tax/total, generates the day's next number,
    ///    inserts with status Draft
    /// 3. On a number collision (concurrent creator won the insert), retries
    ///    the whole transaction with a fresh number
    ///
    /// A job with zero items is valid and yields a $0.00 estimate; a missing
    /// job is `DbError::NotFound`.
    pub async fn create_from_job(&self, input: &NewEstimate) -> DbResult<Estimate> {
        input.validate()?;

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.try_create(input).await {
                Err(e) if e.is_unique_violation() && attempt < MAX_NUMBER_ATTEMPTS => {
                    debug!(attempt, "Estimate number collided, regenerating");
                }
                result => return result,
            }
        }
    }

    /// One create attempt: the whole read-aggregate-number-insert sequence
    /// inside a single transaction.
    async fn try_create(&self, input: &NewEstimate) -> DbResult<Estimate> {
        let now = Utc::now();
        let today = now.date_naive();

        let mut tx = self.pool.begin().await?;

        // The job must exist; its items may be empty
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

        let latest = latest_document_number(&mut *tx, DocumentPrefix::Est, today).await?;
        let number = docnum::next_number(DocumentPrefix::Est, today, latest.as_deref())?;

        let estimate = Estimate {
            id: Uuid::new_v4().to_string(),
            job_id: input.job_id.clone(),
            estimate_number: number,
            issue_date: input.issue_date,
            expiry_date: input.expiry_date,
            status: EstimateStatus::Draft,
            subtotal_cents: derived.subtotal.cents(),
            tax_rate_bps: input.tax_rate_bps,
            tax_amount_cents: derived.tax_amount.cents(),
            total_amount_cents: derived.total.cents(),
            notes: input.notes.clone(),
            created_at: now,
            updated_at: now,
        };

        insert_estimate(&mut tx, &estimate).await?;
        tx.commit().await?;

        info!(
            id = %estimate.id,
            number = %estimate.estimate_number,
            total = %estimate.total_amount(),
            "Estimate created"
        );

        Ok(estimate)
    }

    /// Updates an estimate with the fields of a patch.
    ///
    /// Derived totals are rewritten only when the patch carries BOTH
    /// `subtotal_cents` and `tax_rate_bps`; a patch with one of the pair
    /// writes that column and leaves the stored tax/total alone.
    /// `updated_at` is always refreshed.
    pub async fn update(&self, id: &str, patch: &EstimatePatch) -> DbResult<Estimate> {
        patch.validate()?;

        let mut estimate = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Estimate", id))?;

        if let Some(issue_date) = patch.issue_date {
            estimate.issue_date = issue_date;
        }
        if let Some(expiry_date) = patch.expiry_date {
            estimate.expiry_date = expiry_date;
        }
        if let Some(status) = patch.status {
            estimate.status = status;
        }
        if let Some(cents) = patch.subtotal_cents {
            estimate.subtotal_cents = cents;
        }
        if let Some(bps) = patch.tax_rate_bps {
            estimate.tax_rate_bps = bps;
        }
        if let Some(notes) = &patch.notes {
            estimate.notes = Some(notes.clone());
        }

        // Derived columns refresh only when the full subtotal × rate pair
        // arrived together
        if let (Some(cents), Some(bps)) = (patch.subtotal_cents, patch.tax_rate_bps) {
            let derived = DocumentTotals::compute(
                arcline_core::Money::from_cents(cents),
                TaxRate::from_bps(bps),
            );
            estimate.tax_amount_cents = derived.tax_amount.cents();
            estimate.total_amount_cents = derived.total.cents();
        }
        estimate.updated_at = Utc::now();

        debug!(id = %id, "Updating estimate");

        sqlx::query(
            "UPDATE estimates SET \
                issue_date = ?2, expiry_date = ?3, status = ?4, subtotal_cents = ?5, \
                tax_rate_bps = ?6, tax_amount_cents = ?7, total_amount_cents = ?8, \
                notes = ?9, updated_at = ?10 \
             WHERE id = ?1",
        )
        .bind(id)
        .bind(estimate.issue_date)
        .bind(estimate.expiry_date)
        .bind(estimate.status)
        .bind(estimate.subtotal_cents)
        .bind(estimate.tax_rate_bps)
        .bind(estimate.tax_amount_cents)
        .bind(estimate.total_amount_cents)
        .bind(&estimate.notes)
        .bind(estimate.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(estimate)
    }

    /// Overwrites the status field and refreshes `updated_at`.
    ///
    /// No transition table is enforced. A missing id is `DbError::NotFound`
    /// and mutates nothing.
    pub async fn update_status(&self, id: &str, status: EstimateStatus) -> DbResult<()> {
        let now = Utc::now();

        let result = sqlx::query(
            "UPDATE estimates SET status = ?2, updated_at = ?3 WHERE id = ?1",
        )
        .bind(id)
        .bind(status)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Estimate", id));
        }

        debug!(id = %id, status = ?status, "Estimate status updated");

        Ok(())
    }

    /// Deletes an estimate. Explicit and terminal; never cascaded from job
    /// deletion.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting estimate");

        sqlx::query("DELETE FROM estimates WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Converts an estimate into a draft invoice.
    ///
    /// ## What This Does
    /// 1. Loads the estimate (`NotFound` if absent)
    /// 2. Inserts an invoice carrying the estimate's subtotal, tax rate, tax
    ///    amount, and total verbatim (not recomputed), issued today, due on
    ///    `due_date`, numbered `INV-YYYYMMDD-NNNN`, with a provenance note
    ///    referencing the source estimate number
    /// 3. Marks the estimate Accepted
    ///
    /// The insert happens-before the status write and both share one
    /// transaction, so the caller either sees the full conversion or none of
    /// it. The status write is unconditional: conversion means the customer
    /// said yes, whatever the estimate's previous status was.
    ///
    /// ## Returns
    /// The new invoice's id.
    pub async fn convert_to_invoice(
        &self,
        estimate_id: &str,
        due_date: NaiveDate,
    ) -> DbResult<String> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.try_convert(estimate_id, due_date).await {
                Err(e) if e.is_unique_violation() && attempt < MAX_NUMBER_ATTEMPTS => {
                    debug!(attempt, "Invoice number collided, regenerating");
                }
                result => return result,
            }
        }
    }

    /// One conversion attempt inside a single transaction.
    async fn try_convert(&self, estimate_id: &str, due_date: NaiveDate) -> DbResult<String> {
        let now = Utc::now();
        let today = now.date_naive();

        let mut tx = self.pool.begin().await?;

        let estimate = sqlx::query_as::<_, Estimate>(&format!(
            "SELECT {COLUMNS} FROM estimates WHERE id = ?1"
        ))
        .bind(estimate_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("Estimate", estimate_id))?;

        let latest = latest_document_number(&mut *tx, DocumentPrefix::Inv, today).await?;
        let invoice_number = docnum::next_number(DocumentPrefix::Inv, today, latest.as_deref())?;

        // Provenance note: the conversion trail survives on the invoice even
        // if the estimate is later deleted
        let provenance = format!("Converted from estimate {}.", estimate.estimate_number);
        let notes = match &estimate.notes {
            Some(existing) => format!("{provenance} {existing}"),
            None => provenance,
        };

        let invoice_id = Uuid::new_v4().to_string();

        sqlx::query(
            "INSERT INTO invoices ( \
                id, job_id, invoice_number, issue_date, due_date, status, \
                subtotal_cents, tax_rate_bps, tax_amount_cents, total_amount_cents, \
                notes, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        )
        .bind(&invoice_id)
        .bind(&estimate.job_id)
        .bind(&invoice_number)
        .bind(today)
        .bind(due_date)
        .bind(InvoiceStatus::Draft)
        .bind(estimate.subtotal_cents)
        .bind(estimate.tax_rate_bps)
        .bind(estimate.tax_amount_cents)
        .bind(estimate.total_amount_cents)
        .bind(&notes)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        // Status write comes second; the shared transaction keeps the pair
        // atomic
        sqlx::query("UPDATE estimates SET status = ?2, updated_at = ?3 WHERE id = ?1")
            .bind(estimate_id)
            .bind(EstimateStatus::Accepted)
            .bind(now)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(
            estimate_id = %estimate_id,
            invoice_id = %invoice_id,
            number = %invoice_number,
            "Estimate converted to invoice"
        );

        Ok(invoice_id)
    }
}

/// Fetches the highest existing document number for a prefix and day.
///
/// Shared with the invoice repository, which runs the same query against its
/// own table. SQLite's LIKE is case-insensitive for ASCII, and descending
/// lexicographic order is descending numeric order while the suffix width is
/// constant.
pub(crate) async fn latest_document_number<'e, E>(
    executor: E,
    prefix: DocumentPrefix,
    date: NaiveDate,
) -> DbResult<Option<String>>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let (table, column) = match prefix {
        DocumentPrefix::Est => ("estimates", "estimate_number"),
        DocumentPrefix::Inv => ("invoices", "invoice_number"),
    };
    let pattern = format!("{}-{}-%", prefix.as_str(), date.format("%Y%m%d"));

    let latest: Option<String> = sqlx::query_scalar(&format!(
        "SELECT {column} FROM {table} WHERE {column} LIKE ?1 \
         ORDER BY {column} DESC LIMIT 1"
    ))
    .bind(&pattern)
    .fetch_optional(executor)
    .await?;

    Ok(latest)
}

/// Inserts a fully-built estimate row.
async fn insert_estimate(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    estimate: &Estimate,
) -> DbResult<()> {
    sqlx::query(&format!(
        "INSERT INTO estimates ({COLUMNS}) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"
    ))
    .bind(&estimate.id)
    .bind(&estimate.job_id)
    .bind(&estimate.estimate_number)
    .bind(estimate.issue_date)
    .bind(estimate.expiry_date)
    .bind(estimate.status)
    .bind(estimate.subtotal_cents)
    .bind(estimate.tax_rate_bps)
    .bind(estimate.tax_amount_cents)
    .bind(estimate.total_amount_cents)
    .bind(&estimate.notes)
    .bind(estimate.created_at)
    .bind(estimate.updated_at)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use arcline_core::{NewCustomer, NewJob, NewJobItem};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    /// Seeds customer → job → two items (1 × $1,000.00 + 2.5 × $85.00),
    /// returning the job id. Subtotal: $1,212.50.
    async fn seed_job_with_items(db: &Database) -> String {
        let customer = db
            .customers()
            .create(&NewCustomer {
                name: "Ada Marsh".to_string(),
                email: None,
                phone: None,
                address: None,
                city: None,
                state: None,
                zip: None,
                notes: None,
            })
            .await
            .unwrap();

        let job = db
            .jobs()
            .create(&NewJob {
                customer_id: customer.id,
                title: "Panel upgrade".to_string(),
                description: None,
                status: None,
                scheduled_date: None,
                location: None,
                notes: None,
            })
            .await
            .unwrap();

        for (milli, cents) in [(1000, 100_000), (2500, 8500)] {
            db.jobs()
                .add_item(&NewJobItem {
                    job_id: job.id.clone(),
                    description: "Line".to_string(),
                    quantity_milli: milli,
                    unit_price_cents: cents,
                    notes: None,
                })
                .await
                .unwrap();
        }

        job.id
    }

    fn new_estimate(job_id: &str, tax_rate_bps: u32) -> NewEstimate {
        NewEstimate {
            job_id: job_id.to_string(),
            issue_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            expiry_date: NaiveDate::from_ymd_opt(2024, 4, 14).unwrap(),
            tax_rate_bps,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_from_job_derives_totals() {
        let db = test_db().await;
        let job_id = seed_job_with_items(&db).await;

        // Subtotal $1,212.50 at 10% → tax $121.25, total $1,333.75
        let estimate = db
            .estimates()
            .create_from_job(&new_estimate(&job_id, 1000))
            .await
            .unwrap();

        assert_eq!(estimate.status, EstimateStatus::Draft);
        assert_eq!(estimate.subtotal_cents, 121_250);
        assert_eq!(estimate.tax_amount_cents, 12_125);
        assert_eq!(estimate.total_amount_cents, 133_375);
        assert!(docnum::is_valid_number(
            DocumentPrefix::Est,
            &estimate.estimate_number
        ));
    }

    #[tokio::test]
    async fn test_numbers_are_sequential_within_a_day() {
        let db = test_db().await;
        let job_id = seed_job_with_items(&db).await;

        let first = db
            .estimates()
            .create_from_job(&new_estimate(&job_id, 1000))
            .await
            .unwrap();
        let second = db
            .estimates()
            .create_from_job(&new_estimate(&job_id, 1000))
            .await
            .unwrap();

        assert!(first.estimate_number.ends_with("-0001"));
        assert!(second.estimate_number.ends_with("-0002"));
    }

    #[tokio::test]
    async fn test_next_number_previews_without_reserving() {
        let db = test_db().await;
        let job_id = seed_job_with_items(&db).await;

        assert!(db.estimates().next_number().await.unwrap().ends_with("-0001"));
        // Still -0001: the preview reserved nothing
        assert!(db.estimates().next_number().await.unwrap().ends_with("-0001"));

        db.estimates()
            .create_from_job(&new_estimate(&job_id, 1000))
            .await
            .unwrap();
        assert!(db.estimates().next_number().await.unwrap().ends_with("-0002"));
    }

    #[tokio::test]
    async fn test_create_for_missing_job_is_not_found() {
        let db = test_db().await;

        let result = db
            .estimates()
            .create_from_job(&new_estimate(&Uuid::new_v4().to_string(), 1000))
            .await;
        assert!(matches!(result, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_create_for_itemless_job_yields_zero_totals() {
        let db = test_db().await;
        let job_id = seed_job_with_items(&db).await;
        // Fresh job without items
        let job = db
            .jobs()
            .get_by_id(&job_id)
            .await
            .unwrap()
            .unwrap();
        let empty_job = db
            .jobs()
            .create(&NewJob {
                customer_id: job.customer_id,
                title: "Walk-through only".to_string(),
                description: None,
                status: None,
                scheduled_date: None,
                location: None,
                notes: None,
            })
            .await
            .unwrap();

        let estimate = db
            .estimates()
            .create_from_job(&new_estimate(&empty_job.id, 825))
            .await
            .unwrap();

        assert_eq!(estimate.subtotal_cents, 0);
        assert_eq!(estimate.tax_amount_cents, 0);
        assert_eq!(estimate.total_amount_cents, 0);
    }

    #[tokio::test]
    async fn test_update_with_subtotal_alone_keeps_derived_columns() {
        let db = test_db().await;
        let job_id = seed_job_with_items(&db).await;
        let estimate = db
            .estimates()
            .create_from_job(&new_estimate(&job_id, 1000))
            .await
            .unwrap();

        let patch = EstimatePatch {
            subtotal_cents: Some(50_000),
            ..Default::default()
        };
        let updated = db.estimates().update(&estimate.id, &patch).await.unwrap();

        // Subtotal moved, derived columns deliberately did not
        assert_eq!(updated.subtotal_cents, 50_000);
        assert_eq!(updated.tax_amount_cents, estimate.tax_amount_cents);
        assert_eq!(updated.total_amount_cents, estimate.total_amount_cents);
    }

    #[tokio::test]
    async fn test_update_with_both_recomputes_derived_columns() {
        let db = test_db().await;
        let job_id = seed_job_with_items(&db).await;
        let estimate = db
            .estimates()
            .create_from_job(&new_estimate(&job_id, 1000))
            .await
            .unwrap();

        let patch = EstimatePatch {
            subtotal_cents: Some(10_000),
            tax_rate_bps: Some(825),
            ..Default::default()
        };
        let updated = db.estimates().update(&estimate.id, &patch).await.unwrap();

        assert_eq!(updated.subtotal_cents, 10_000);
        assert_eq!(updated.tax_amount_cents, 825);
        assert_eq!(updated.total_amount_cents, 10_825);

        let fetched = db.estimates().get_by_id(&estimate.id).await.unwrap().unwrap();
        assert_eq!(fetched.total_amount_cents, 10_825);
    }

    #[tokio::test]
    async fn test_update_status_overwrites_unconditionally() {
        let db = test_db().await;
        let job_id = seed_job_with_items(&db).await;
        let estimate = db
            .estimates()
            .create_from_job(&new_estimate(&job_id, 1000))
            .await
            .unwrap();

        db.estimates()
            .update_status(&estimate.id, EstimateStatus::Rejected)
            .await
            .unwrap();
        // Rejected → Sent is nonsense by convention, but not structurally
        // enforced
        db.estimates()
            .update_status(&estimate.id, EstimateStatus::Sent)
            .await
            .unwrap();

        let fetched = db.estimates().get_by_id(&estimate.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, EstimateStatus::Sent);
    }

    #[tokio::test]
    async fn test_update_status_missing_is_not_found() {
        let db = test_db().await;

        let result = db
            .estimates()
            .update_status(&Uuid::new_v4().to_string(), EstimateStatus::Sent)
            .await;
        assert!(matches!(result, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_then_get_returns_none() {
        let db = test_db().await;
        let job_id = seed_job_with_items(&db).await;
        let estimate = db
            .estimates()
            .create_from_job(&new_estimate(&job_id, 1000))
            .await
            .unwrap();

        db.estimates().delete(&estimate.id).await.unwrap();
        assert!(db.estimates().get_by_id(&estimate.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_convert_copies_totals_and_accepts_estimate() {
        let db = test_db().await;
        let job_id = seed_job_with_items(&db).await;

        // Force the round numbers from the conversion contract:
        // subtotal $100.00 at 10% → tax $10.00, total $110.00
        let estimate = db
            .estimates()
            .create_from_job(&new_estimate(&job_id, 1000))
            .await
            .unwrap();
        let estimate = db
            .estimates()
            .update(
                &estimate.id,
                &EstimatePatch {
                    subtotal_cents: Some(10_000),
                    tax_rate_bps: Some(1000),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let due = NaiveDate::from_ymd_opt(2024, 4, 30).unwrap();
        let invoice_id = db
            .estimates()
            .convert_to_invoice(&estimate.id, due)
            .await
            .unwrap();

        let invoice = db.invoices().get_by_id(&invoice_id).await.unwrap().unwrap();
        assert_eq!(invoice.job_id, estimate.job_id);
        assert_eq!(invoice.status, InvoiceStatus::Draft);
        assert_eq!(invoice.subtotal_cents, 10_000);
        assert_eq!(invoice.tax_amount_cents, 1000);
        assert_eq!(invoice.total_amount_cents, 11_000);
        assert_eq!(invoice.due_date, due);
        assert!(docnum::is_valid_number(
            DocumentPrefix::Inv,
            &invoice.invoice_number
        ));
        assert_eq!(
            invoice.notes.as_deref(),
            Some(format!("Converted from estimate {}.", estimate.estimate_number).as_str())
        );

        let source = db.estimates().get_by_id(&estimate.id).await.unwrap().unwrap();
        assert_eq!(source.status, EstimateStatus::Accepted);
    }

    #[tokio::test]
    async fn test_convert_prefixes_existing_notes() {
        let db = test_db().await;
        let job_id = seed_job_with_items(&db).await;

        let mut input = new_estimate(&job_id, 1000);
        input.notes = Some("Customer prefers mornings.".to_string());
        let estimate = db.estimates().create_from_job(&input).await.unwrap();

        let invoice_id = db
            .estimates()
            .convert_to_invoice(&estimate.id, NaiveDate::from_ymd_opt(2024, 4, 30).unwrap())
            .await
            .unwrap();

        let invoice = db.invoices().get_by_id(&invoice_id).await.unwrap().unwrap();
        assert_eq!(
            invoice.notes.as_deref(),
            Some(
                format!(
                    "Converted from estimate {}. Customer prefers mornings.",
                    estimate.estimate_number
                )
                .as_str()
            )
        );
    }

    #[tokio::test]
    async fn test_convert_missing_is_not_found() {
        let db = test_db().await;

        let result = db
            .estimates()
            .convert_to_invoice(
                &Uuid::new_v4().to_string(),
                NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
            )
            .await;
        assert!(matches!(result, Err(DbError::NotFound { .. })));
    }
}
