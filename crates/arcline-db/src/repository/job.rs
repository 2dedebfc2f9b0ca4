//! # Job Repository
//!
//! Database operations for jobs and their line items.
//!
//! ## Job/Item Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Job Lifecycle                                     │
//! │                                                                         │
//! │  1. CREATE                                                             │
//! │     └── create() → Job { status: Pending }                             │
//! │                                                                         │
//! │  2. PRICE THE WORK                                                     │
//! │     └── add_item() → total_price = quantity × unit_price               │
//! │     └── add_item() → ...                                               │
//! │                                                                         │
//! │  3. DOCUMENT                                                           │
//! │     └── estimates/invoices are created FROM these items                │
//! │         (see EstimateRepository / InvoiceRepository)                   │
//! │                                                                         │
//! │  4. DELETE                                                             │
//! │     └── delete() removes the job's items, then the job, in one         │
//! │         transaction. Documents are never cascade-deleted.              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use arcline_core::{Job, JobItem, JobItemPatch, JobPatch, NewJob, NewJobItem, Quantity};

/// Every column of the jobs table, in insert order.
const JOB_COLUMNS: &str = "id, customer_id, title, description, status, scheduled_date, \
                           completed_date, location, notes, created_at, updated_at";

/// Every column of the job_items table, in insert order.
const ITEM_COLUMNS: &str = "id, job_id, description, quantity_milli, unit_price_cents, \
                            total_price_cents, notes, created_at, updated_at";

/// Repository for job and job-item database operations.
#[derive(Debug, Clone)]
pub struct JobRepository {
    pool: SqlitePool,
}

impl JobRepository {
    /// Creates a new JobRepository.
    pub fn new(pool: SqlitePool) -> Self {
        JobRepository { pool }
    }

    // =========================================================================
    // Jobs
    // =========================================================================

    /// Gets all jobs, newest first.
    pub async fn get_all(&self) -> DbResult<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(jobs)
    }

    /// Gets all jobs for a customer, newest first.
    pub async fn get_by_customer(&self, customer_id: &str) -> DbResult<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE customer_id = ?1 ORDER BY created_at DESC"
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(jobs)
    }

    /// Gets a job by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(job)
    }

    /// Creates a new job. Status defaults to `Pending` when the input omits
    /// it; a missing customer surfaces as a foreign-key violation.
    pub async fn create(&self, input: &NewJob) -> DbResult<Job> {
        input.validate()?;

        let now = Utc::now();
        let job = Job {
            id: Uuid::new_v4().to_string(),
            customer_id: input.customer_id.clone(),
            title: input.title.trim().to_string(),
            description: input.description.clone(),
            status: input.status.unwrap_or_default(),
            scheduled_date: input.scheduled_date,
            completed_date: None,
            location: input.location.clone(),
            notes: input.notes.clone(),
            created_at: now,
            updated_at: now,
        };

        debug!(id = %job.id, customer_id = %job.customer_id, "Creating job");

        sqlx::query(&format!(
            "INSERT INTO jobs ({JOB_COLUMNS}) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
        ))
        .bind(&job.id)
        .bind(&job.customer_id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(job.status)
        .bind(job.scheduled_date)
        .bind(job.completed_date)
        .bind(&job.location)
        .bind(&job.notes)
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(job)
    }

    /// Updates a job with the fields of a patch; `updated_at` is always
    /// refreshed.
    pub async fn update(&self, id: &str, patch: &JobPatch) -> DbResult<Job> {
        patch.validate()?;

        let mut job = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Job", id))?;

        if let Some(title) = &patch.title {
            job.title = title.trim().to_string();
        }
        if let Some(description) = &patch.description {
            job.description = Some(description.clone());
        }
        if let Some(status) = patch.status {
            job.status = status;
        }
        if let Some(scheduled_date) = patch.scheduled_date {
            job.scheduled_date = Some(scheduled_date);
        }
        if let Some(completed_date) = patch.completed_date {
            job.completed_date = Some(completed_date);
        }
        if let Some(location) = &patch.location {
            job.location = Some(location.clone());
        }
        if let Some(notes) = &patch.notes {
            job.notes = Some(notes.clone());
        }
        job.updated_at = Utc::now();

        debug!(id = %id, status = ?job.status, "Updating job");

        sqlx::query(
            "UPDATE jobs SET \
                title = ?2, description = ?3, status = ?4, scheduled_date = ?5, \
                completed_date = ?6, location = ?7, notes = ?8, updated_at = ?9 \
             WHERE id = ?1",
        )
        .bind(id)
        .bind(&job.title)
        .bind(&job.description)
        .bind(job.status)
        .bind(job.scheduled_date)
        .bind(job.completed_date)
        .bind(&job.location)
        .bind(&job.notes)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(job)
    }

    /// Deletes a job and its line items in one transaction.
    ///
    /// Items first, then the job; documents referencing the job are left
    /// alone. Unconditional: a missing id is a no-op.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting job and its items");

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM job_items WHERE job_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM jobs WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    // =========================================================================
    // Job Items
    // =========================================================================

    /// Gets all items for a job, oldest first.
    ///
    /// This is the order documents aggregate in, so a printed estimate lists
    /// lines the way they were entered.
    pub async fn get_items(&self, job_id: &str) -> DbResult<Vec<JobItem>> {
        let items = sqlx::query_as::<_, JobItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM job_items WHERE job_id = ?1 ORDER BY created_at"
        ))
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Adds a line item to a job.
    ///
    /// The line total is derived here (`unit_price × quantity`, half-up to
    /// the cent) and never accepted from the caller.
    pub async fn add_item(&self, input: &NewJobItem) -> DbResult<JobItem> {
        input.validate()?;

        let now = Utc::now();
        let total_price = arcline_core::Money::from_cents(input.unit_price_cents)
            .line_total(Quantity::from_milli(input.quantity_milli));

        let item = JobItem {
            id: Uuid::new_v4().to_string(),
            job_id: input.job_id.clone(),
            description: input.description.trim().to_string(),
            quantity_milli: input.quantity_milli,
            unit_price_cents: input.unit_price_cents,
            total_price_cents: total_price.cents(),
            notes: input.notes.clone(),
            created_at: now,
            updated_at: now,
        };

        debug!(
            job_id = %item.job_id,
            total = %total_price,
            "Adding job item"
        );

        sqlx::query(&format!(
            "INSERT INTO job_items ({ITEM_COLUMNS}) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
        ))
        .bind(&item.id)
        .bind(&item.job_id)
        .bind(&item.description)
        .bind(item.quantity_milli)
        .bind(item.unit_price_cents)
        .bind(item.total_price_cents)
        .bind(&item.notes)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(item)
    }

    /// Updates a line item.
    ///
    /// The stored line total is recomputed only when the patch carries BOTH
    /// quantity and unit price; a patch with one of the pair writes that
    /// column and leaves the total as stored.
    pub async fn update_item(&self, id: &str, patch: &JobItemPatch) -> DbResult<JobItem> {
        patch.validate()?;

        let mut item = sqlx::query_as::<_, JobItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM job_items WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Job item", id))?;

        if let Some(description) = &patch.description {
            item.description = description.trim().to_string();
        }
        if let Some(milli) = patch.quantity_milli {
            item.quantity_milli = milli;
        }
        if let Some(cents) = patch.unit_price_cents {
            item.unit_price_cents = cents;
        }
        if let Some(notes) = &patch.notes {
            item.notes = Some(notes.clone());
        }

        // Recompute only when the patch supplies the full qty × price pair
        if let (Some(milli), Some(cents)) = (patch.quantity_milli, patch.unit_price_cents) {
            item.total_price_cents = arcline_core::Money::from_cents(cents)
                .line_total(Quantity::from_milli(milli))
                .cents();
        }
        item.updated_at = Utc::now();

        debug!(id = %id, "Updating job item");

        sqlx::query(
            "UPDATE job_items SET \
                description = ?2, quantity_milli = ?3, unit_price_cents = ?4, \
                total_price_cents = ?5, notes = ?6, updated_at = ?7 \
             WHERE id = ?1",
        )
        .bind(id)
        .bind(&item.description)
        .bind(item.quantity_milli)
        .bind(item.unit_price_cents)
        .bind(item.total_price_cents)
        .bind(&item.notes)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(item)
    }

    /// Deletes a line item. Unconditional: a missing id is a no-op.
    pub async fn delete_item(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting job item");

        sqlx::query("DELETE FROM job_items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use arcline_core::{JobStatus, NewCustomer};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_customer(db: &Database) -> String {
        db.customers()
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
            .unwrap()
            .id
    }

    fn new_job(customer_id: &str, title: &str) -> NewJob {
        NewJob {
            customer_id: customer_id.to_string(),
            title: title.to_string(),
            description: None,
            status: None,
            scheduled_date: None,
            location: Some("814 Cedar St".to_string()),
            notes: None,
        }
    }

    fn new_item(job_id: &str, quantity_milli: i64, unit_price_cents: i64) -> NewJobItem {
        NewJobItem {
            job_id: job_id.to_string(),
            description: "Labour".to_string(),
            quantity_milli,
            unit_price_cents,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_defaults_to_pending() {
        let db = test_db().await;
        let customer_id = seed_customer(&db).await;

        let job = db
            .jobs()
            .create(&new_job(&customer_id, "Panel upgrade"))
            .await
            .unwrap();

        assert_eq!(job.status, JobStatus::Pending);
        let fetched = db.jobs().get_by_id(&job.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "Panel upgrade");
    }

    #[tokio::test]
    async fn test_create_for_missing_customer_is_fk_violation() {
        let db = test_db().await;

        let result = db
            .jobs()
            .create(&new_job(&Uuid::new_v4().to_string(), "Panel upgrade"))
            .await;

        assert!(matches!(result, Err(DbError::ForeignKeyViolation { .. })));
    }

    #[tokio::test]
    async fn test_get_by_customer() {
        let db = test_db().await;
        let ada = seed_customer(&db).await;

        db.jobs().create(&new_job(&ada, "Panel upgrade")).await.unwrap();
        db.jobs().create(&new_job(&ada, "Add outlets")).await.unwrap();

        let jobs = db.jobs().get_by_customer(&ada).await.unwrap();
        assert_eq!(jobs.len(), 2);
        assert!(db
            .jobs()
            .get_by_customer(&Uuid::new_v4().to_string())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_update_status_via_patch() {
        let db = test_db().await;
        let customer_id = seed_customer(&db).await;
        let job = db
            .jobs()
            .create(&new_job(&customer_id, "Panel upgrade"))
            .await
            .unwrap();

        let patch = JobPatch {
            status: Some(JobStatus::InProgress),
            ..Default::default()
        };
        let updated = db.jobs().update(&job.id, &patch).await.unwrap();

        assert_eq!(updated.status, JobStatus::InProgress);
        assert_eq!(updated.title, "Panel upgrade");
    }

    #[tokio::test]
    async fn test_add_item_derives_total() {
        let db = test_db().await;
        let customer_id = seed_customer(&db).await;
        let job = db
            .jobs()
            .create(&new_job(&customer_id, "Panel upgrade"))
            .await
            .unwrap();

        // 2.5 h × $85.00 = $212.50
        let item = db.jobs().add_item(&new_item(&job.id, 2500, 8500)).await.unwrap();
        assert_eq!(item.total_price_cents, 21250);
    }

    #[tokio::test]
    async fn test_items_come_back_in_entry_order() {
        let db = test_db().await;
        let customer_id = seed_customer(&db).await;
        let job = db
            .jobs()
            .create(&new_job(&customer_id, "Panel upgrade"))
            .await
            .unwrap();

        let first = db.jobs().add_item(&new_item(&job.id, 1000, 100)).await.unwrap();
        let second = db.jobs().add_item(&new_item(&job.id, 1000, 200)).await.unwrap();

        let items = db.jobs().get_items(&job.id).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, first.id);
        assert_eq!(items[1].id, second.id);
    }

    #[tokio::test]
    async fn test_update_item_with_both_recomputes_total() {
        let db = test_db().await;
        let customer_id = seed_customer(&db).await;
        let job = db
            .jobs()
            .create(&new_job(&customer_id, "Panel upgrade"))
            .await
            .unwrap();
        let item = db.jobs().add_item(&new_item(&job.id, 1000, 8500)).await.unwrap();

        let patch = JobItemPatch {
            quantity_milli: Some(3000),
            unit_price_cents: Some(9000),
            ..Default::default()
        };
        let updated = db.jobs().update_item(&item.id, &patch).await.unwrap();

        assert_eq!(updated.total_price_cents, 27000);
    }

    #[tokio::test]
    async fn test_update_item_with_quantity_alone_keeps_stored_total() {
        let db = test_db().await;
        let customer_id = seed_customer(&db).await;
        let job = db
            .jobs()
            .create(&new_job(&customer_id, "Panel upgrade"))
            .await
            .unwrap();
        let item = db.jobs().add_item(&new_item(&job.id, 1000, 8500)).await.unwrap();

        let patch = JobItemPatch {
            quantity_milli: Some(3000),
            ..Default::default()
        };
        let updated = db.jobs().update_item(&item.id, &patch).await.unwrap();

        // Quantity changed, total deliberately did not
        assert_eq!(updated.quantity_milli, 3000);
        assert_eq!(updated.total_price_cents, 8500);
    }

    #[tokio::test]
    async fn test_delete_job_removes_items() {
        let db = test_db().await;
        let customer_id = seed_customer(&db).await;
        let job = db
            .jobs()
            .create(&new_job(&customer_id, "Panel upgrade"))
            .await
            .unwrap();
        db.jobs().add_item(&new_item(&job.id, 1000, 8500)).await.unwrap();

        db.jobs().delete(&job.id).await.unwrap();

        assert!(db.jobs().get_by_id(&job.id).await.unwrap().is_none());
        assert!(db.jobs().get_items(&job.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_item_is_not_found() {
        let db = test_db().await;

        let result = db
            .jobs()
            .update_item(&Uuid::new_v4().to_string(), &JobItemPatch::default())
            .await;
        assert!(matches!(result, Err(DbError::NotFound { .. })));
    }
}
