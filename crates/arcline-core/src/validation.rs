//! # Validation Module
//!
//! Input validation utilities for Arcline.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Service boundary (Rust)                                      │
//! │  ├── Typed input structs (input.rs)                                    │
//! │  └── THIS MODULE: field rules, run before any SQL                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints (document numbers)                             │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted short text field (names, titles, addresses).
pub const MAX_TEXT_LEN: usize = 200;

/// Longest accepted free-form notes field.
pub const MAX_NOTES_LEN: usize = 2000;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required text field.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most `MAX_TEXT_LEN` characters
///
/// ## Example
/// ```rust
/// use arcline_core::validation::validate_required_text;
///
/// assert!(validate_required_text("name", "Ada Marsh").is_ok());
/// assert!(validate_required_text("name", "  ").is_err());
/// ```
pub fn validate_required_text(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_LEN,
        });
    }

    Ok(())
}

/// Validates an optional text field (length only; absent/empty is fine).
pub fn validate_optional_text(field: &str, value: Option<&str>) -> ValidationResult<()> {
    if let Some(value) = value {
        if value.len() > MAX_TEXT_LEN {
            return Err(ValidationError::TooLong {
                field: field.to_string(),
                max: MAX_TEXT_LEN,
            });
        }
    }

    Ok(())
}

/// Validates a free-form notes field.
pub fn validate_notes(value: Option<&str>) -> ValidationResult<()> {
    if let Some(value) = value {
        if value.len() > MAX_NOTES_LEN {
            return Err(ValidationError::TooLong {
                field: "notes".to_string(),
                max: MAX_NOTES_LEN,
            });
        }
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line-item quantity in thousandths.
///
/// ## Rules
/// - Must be positive (> 0); zero-quantity lines are data-entry mistakes
pub fn validate_quantity_milli(milli: i64) -> ValidationResult<()> {
    if milli <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a money amount in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (no-charge lines, zero subtotals)
///
/// ## Example
/// ```rust
/// use arcline_core::validation::validate_cents;
///
/// assert!(validate_cents("unit_price", 8500).is_ok());
/// assert!(validate_cents("unit_price", 0).is_ok());
/// assert!(validate_cents("unit_price", -100).is_err());
/// ```
pub fn validate_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use arcline_core::validation::validate_uuid;
///
/// assert!(validate_uuid("job_id", "550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("job_id", "not-a-uuid").is_err());
/// ```
pub fn validate_uuid(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_text() {
        assert!(validate_required_text("name", "Ada Marsh").is_ok());
        assert!(validate_required_text("name", "").is_err());
        assert!(validate_required_text("name", "   ").is_err());
        assert!(validate_required_text("name", &"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_optional_text() {
        assert!(validate_optional_text("city", None).is_ok());
        assert!(validate_optional_text("city", Some("Austin")).is_ok());
        assert!(validate_optional_text("city", Some(&"A".repeat(300))).is_err());
    }

    #[test]
    fn test_validate_quantity_milli() {
        assert!(validate_quantity_milli(1).is_ok());
        assert!(validate_quantity_milli(2500).is_ok());
        assert!(validate_quantity_milli(0).is_err());
        assert!(validate_quantity_milli(-1000).is_err());
    }

    #[test]
    fn test_validate_cents() {
        assert!(validate_cents("unit_price", 0).is_ok());
        assert!(validate_cents("unit_price", 8500).is_ok());
        assert!(validate_cents("unit_price", -1).is_err());
    }

    #[test]
    fn test_validate_tax_rate_bps() {
        assert!(validate_tax_rate_bps(0).is_ok());
        assert!(validate_tax_rate_bps(825).is_ok());
        assert!(validate_tax_rate_bps(10000).is_ok());
        assert!(validate_tax_rate_bps(10001).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("id", "550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("id", "").is_err());
        assert!(validate_uuid("id", "not-a-uuid").is_err());
    }
}
