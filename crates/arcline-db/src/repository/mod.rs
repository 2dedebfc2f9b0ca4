//! # Repository Module
//!
//! Database repository implementations for Arcline.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Caller                                                                │
//! │       │                                                                 │
//! │       │  db.estimates().create_from_job(&input)                        │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  EstimateRepository                                                    │
//! │  ├── validate input (arcline-core)                                     │
//! │  ├── aggregate + derive totals (arcline-core)                          │
//! │  └── SQL, inside a transaction where the operation is multi-step       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • SQL is isolated in one place                                        │
//! │  • Business math stays pure and testable in arcline-core               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`customer::CustomerRepository`] - Customer CRUD and search
//! - [`job::JobRepository`] - Jobs and their line items
//! - [`estimate::EstimateRepository`] - Estimates and estimate→invoice conversion
//! - [`invoice::InvoiceRepository`] - Invoices

pub mod customer;
pub mod estimate;
pub mod invoice;
pub mod job;
