//! # Customer Repository
//!
//! Database operations for customers.
//!
//! ## Key Operations
//! - CRUD with validated inputs
//! - Case-insensitive search across name, email, and phone

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use arcline_core::{Customer, CustomerPatch, NewCustomer};

/// Every column of the customers table, in insert order.
const COLUMNS: &str = "id, name, email, phone, address, city, state, zip, notes, \
                       created_at, updated_at";

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Gets all customers, ordered by name.
    pub async fn get_all(&self) -> DbResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {COLUMNS} FROM customers ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    /// Gets a customer by ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Customer))` - Customer found
    /// * `Ok(None)` - Customer not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {COLUMNS} FROM customers WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Creates a new customer.
    ///
    /// Input is validated before any SQL runs; both timestamps are set to now.
    pub async fn create(&self, input: &NewCustomer) -> DbResult<Customer> {
        input.validate()?;

        let now = Utc::now();
        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: input.name.trim().to_string(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            address: input.address.clone(),
            city: input.city.clone(),
            state: input.state.clone(),
            zip: input.zip.clone(),
            notes: input.notes.clone(),
            created_at: now,
            updated_at: now,
        };

        debug!(id = %customer.id, name = %customer.name, "Creating customer");

        sqlx::query(&format!(
            "INSERT INTO customers ({COLUMNS}) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
        ))
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(&customer.city)
        .bind(&customer.state)
        .bind(&customer.zip)
        .bind(&customer.notes)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Updates a customer with the non-empty fields of a patch.
    ///
    /// `updated_at` is always refreshed, even for an all-`None` patch.
    ///
    /// ## Returns
    /// The updated customer, or `DbError::NotFound` when the id doesn't
    /// resolve.
    pub async fn update(&self, id: &str, patch: &CustomerPatch) -> DbResult<Customer> {
        patch.validate()?;

        let mut customer = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Customer", id))?;

        if let Some(name) = &patch.name {
            customer.name = name.trim().to_string();
        }
        if let Some(email) = &patch.email {
            customer.email = Some(email.clone());
        }
        if let Some(phone) = &patch.phone {
            customer.phone = Some(phone.clone());
        }
        if let Some(address) = &patch.address {
            customer.address = Some(address.clone());
        }
        if let Some(city) = &patch.city {
            customer.city = Some(city.clone());
        }
        if let Some(state) = &patch.state {
            customer.state = Some(state.clone());
        }
        if let Some(zip) = &patch.zip {
            customer.zip = Some(zip.clone());
        }
        if let Some(notes) = &patch.notes {
            customer.notes = Some(notes.clone());
        }
        customer.updated_at = Utc::now();

        debug!(id = %id, "Updating customer");

        sqlx::query(
            "UPDATE customers SET \
                name = ?2, email = ?3, phone = ?4, address = ?5, city = ?6, \
                state = ?7, zip = ?8, notes = ?9, updated_at = ?10 \
             WHERE id = ?1",
        )
        .bind(id)
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(&customer.city)
        .bind(&customer.state)
        .bind(&customer.zip)
        .bind(&customer.notes)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Deletes a customer. Unconditional: deleting an id that doesn't resolve
    /// is a no-op, not an error.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting customer");

        sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Searches customers by name, email, or phone (case-insensitive),
    /// ordered by name.
    pub async fn search(&self, query: &str) -> DbResult<Vec<Customer>> {
        let pattern = format!("%{}%", query.trim());

        debug!(query = %query, "Searching customers");

        let customers = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {COLUMNS} FROM customers \
             WHERE name LIKE ?1 OR email LIKE ?1 OR phone LIKE ?1 \
             ORDER BY name"
        ))
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
