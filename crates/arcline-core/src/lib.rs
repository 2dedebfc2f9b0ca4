//! # arcline-core: Pure Business Logic for Arcline
//!
//! This crate is the **heart** of Arcline. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Arcline Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (React)                             │   │
//! │  │    Customers ──► Jobs ──► Estimates ──► Invoices               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON (shapes from ts-rs bindings)      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ arcline-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  docnum   │  │ validation│  │   │
//! │  │   │  Customer │  │   Money   │  │ numbering │  │   rules   │  │   │
//! │  │   │  Estimate │  │  TaxCalc  │  │ sequences │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    arcline-db (Database Layer)                  │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, Job, Estimate, Invoice, etc.)
//! - [`input`] - Validated input schemas for the service boundary
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`totals`] - Line-item aggregation and tax/total derivation
//! - [`docnum`] - Document number generation and parsing
//! - [`error`] - Domain error types
//! - [`validation`] - Field-level validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use arcline_core::money::Money;
//! use arcline_core::totals::DocumentTotals;
//! use arcline_core::types::TaxRate;
//!
//! // Create money from cents (never from floats!)
//! let subtotal = Money::from_cents(158_250); // $1,582.50
//!
//! // Derive the document's tax and total together
//! let totals = DocumentTotals::compute(subtotal, TaxRate::from_bps(825));
//!
//! assert_eq!(totals.tax_amount.cents(), 13_056); // $130.56
//! assert_eq!(totals.total.cents(), 171_306);     // $1,713.06
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod docnum;
pub mod error;
pub mod input;
pub mod money;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use arcline_core::Money` instead of
// `use arcline_core::money::Money`

pub use docnum::DocumentPrefix;
pub use error::{CoreError, ValidationError};
pub use input::*;
pub use money::Money;
pub use totals::DocumentTotals;
pub use types::*;
