//! # Document Numbering
//!
//! Human-readable, collision-resistant identifiers for customer-facing
//! documents.
//!
//! ## Number Anatomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     EST-20240315-0001                                   │
//! │                     ─── ──────── ────                                   │
//! │                      │      │      │                                    │
//! │    document prefix ──┘      │      └── sequence suffix, zero-padded     │
//! │    (EST or INV)             │          to 4 digits, resets daily        │
//! │                             │          per prefix                       │
//! │    issue day as YYYYMMDD ───┘                                           │
//! │                                                                         │
//! │  Wire format: ^(EST|INV)-\d{8}-\d{4,}$                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Division of Labour
//! This module is the pure half: parsing, sequencing, formatting. The store
//! half lives in the repositories, which fetch the latest number for a day
//! (`LIKE 'EST-20240315-%' ORDER BY ... DESC LIMIT 1`) and pass it here.
//!
//! ## Sequence Overflow
//! A day with more than 9999 documents widens the suffix to 5 digits
//! (`-10000`). The padding is a floor, not a ceiling; lexicographic ordering
//! within a day holds up to 9999 and the UNIQUE index keeps correctness
//! beyond it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// Width the sequence suffix is zero-padded to.
const SEQUENCE_PAD: usize = 4;

// =============================================================================
// Document Prefix
// =============================================================================

/// The prefix segment of a document number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentPrefix {
    /// Estimates: `EST-YYYYMMDD-NNNN`.
    Est,
    /// Invoices: `INV-YYYYMMDD-NNNN`.
    Inv,
}

impl DocumentPrefix {
    /// Returns the prefix as it appears in a document number.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            DocumentPrefix::Est => "EST",
            DocumentPrefix::Inv => "INV",
        }
    }
}

impl fmt::Display for DocumentPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Formatting & Sequencing
// =============================================================================

/// Formats a document number from its parts.
///
/// ## Example
/// ```rust
/// use arcline_core::docnum::{format_number, DocumentPrefix};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// assert_eq!(format_number(DocumentPrefix::Est, date, 1), "EST-20240315-0001");
/// assert_eq!(format_number(DocumentPrefix::Inv, date, 42), "INV-20240315-0042");
/// ```
pub fn format_number(prefix: DocumentPrefix, date: NaiveDate, sequence: u32) -> String {
    format!(
        "{}-{}-{:0pad$}",
        prefix.as_str(),
        date.format("%Y%m%d"),
        sequence,
        pad = SEQUENCE_PAD
    )
}

/// Returns the sequence number that follows `latest`.
///
/// ## Arguments
/// * `latest` - The highest existing number for the day and prefix, or `None`
///   when the day has no documents yet.
///
/// ## Returns
/// * `Ok(1)` - No prior number
/// * `Ok(n + 1)` - `latest` carried sequence suffix `n`
/// * `Err(CoreError::BadDocumentNumber)` - `latest` is not in the expected
///   shape; failing loudly beats restarting the day's sequence at 1 and
///   colliding with the UNIQUE index
///
/// ## Example
/// ```rust
/// use arcline_core::docnum::next_sequence;
///
/// assert_eq!(next_sequence(None).unwrap(), 1);
/// assert_eq!(next_sequence(Some("EST-20240315-0007")).unwrap(), 8);
/// ```
pub fn next_sequence(latest: Option<&str>) -> CoreResult<u32> {
    let Some(latest) = latest else {
        return Ok(1);
    };

    // Third hyphen-delimited segment is the sequence suffix.
    let suffix = latest
        .split('-')
        .nth(2)
        .ok_or_else(|| CoreError::BadDocumentNumber {
            value: latest.to_string(),
            reason: "expected three hyphen-separated segments".to_string(),
        })?;

    let sequence: u32 = suffix.parse().map_err(|_| CoreError::BadDocumentNumber {
        value: latest.to_string(),
        reason: "sequence suffix is not a number".to_string(),
    })?;

    Ok(sequence + 1)
}

/// Produces the next document number for a day, given the latest existing one.
///
/// Convenience wrapper for the repositories: `next_sequence` + `format_number`
/// in one call.
pub fn next_number(
    prefix: DocumentPrefix,
    date: NaiveDate,
    latest: Option<&str>,
) -> CoreResult<String> {
    Ok(format_number(prefix, date, next_sequence(latest)?))
}

/// Checks a string against the wire format `PREFIX-\d{8}-\d{4,}`.
///
/// ## Example
/// ```rust
/// use arcline_core::docnum::{is_valid_number, DocumentPrefix};
///
/// assert!(is_valid_number(DocumentPrefix::Est, "EST-20240315-0001"));
/// assert!(is_valid_number(DocumentPrefix::Inv, "INV-20240315-10000"));
/// assert!(!is_valid_number(DocumentPrefix::Est, "EST-2024-0001"));
/// assert!(!is_valid_number(DocumentPrefix::Est, "INV-20240315-0001"));
/// ```
pub fn is_valid_number(prefix: DocumentPrefix, number: &str) -> bool {
    let mut parts = number.split('-');

    let (Some(p), Some(date), Some(seq), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    p == prefix.as_str()
        && date.len() == 8
        && date.bytes().all(|b| b.is_ascii_digit())
        && seq.len() >= SEQUENCE_PAD
        && seq.bytes().all(|b| b.is_ascii_digit())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_first_number_of_day() {
        let number = next_number(DocumentPrefix::Est, day(), None).unwrap();
        assert_eq!(number, "EST-20240315-0001");
    }

    #[test]
    fn test_sequence_increments() {
        let number =
            next_number(DocumentPrefix::Est, day(), Some("EST-20240315-0007")).unwrap();
        assert_eq!(number, "EST-20240315-0008");
    }

    #[test]
    fn test_invoice_prefix() {
        let number =
            next_number(DocumentPrefix::Inv, day(), Some("INV-20240315-0041")).unwrap();
        assert_eq!(number, "INV-20240315-0042");
    }

    #[test]
    fn test_overflow_widens_past_9999() {
        // 4-digit pad is a floor: the suffix silently widens to 5 digits
        let number =
            next_number(DocumentPrefix::Est, day(), Some("EST-20240315-9999")).unwrap();
        assert_eq!(number, "EST-20240315-10000");

        let number =
            next_number(DocumentPrefix::Est, day(), Some("EST-20240315-10000")).unwrap();
        assert_eq!(number, "EST-20240315-10001");
    }

    #[test]
    fn test_malformed_latest_is_an_error() {
        assert!(matches!(
            next_sequence(Some("EST-20240315")),
            Err(CoreError::BadDocumentNumber { .. })
        ));
        assert!(matches!(
            next_sequence(Some("EST-20240315-00x7")),
            Err(CoreError::BadDocumentNumber { .. })
        ));
    }

    #[test]
    fn test_wire_format_validation() {
        assert!(is_valid_number(DocumentPrefix::Est, "EST-20240315-0001"));
        assert!(is_valid_number(DocumentPrefix::Inv, "INV-20240315-0042"));
        assert!(is_valid_number(DocumentPrefix::Est, "EST-20240315-10000"));

        // Wrong prefix, short date, short suffix, trailing garbage
        assert!(!is_valid_number(DocumentPrefix::Est, "INV-20240315-0001"));
        assert!(!is_valid_number(DocumentPrefix::Est, "EST-2024-0001"));
        assert!(!is_valid_number(DocumentPrefix::Est, "EST-20240315-001"));
        assert!(!is_valid_number(DocumentPrefix::Est, "EST-20240315-0001-x"));
        assert!(!is_valid_number(DocumentPrefix::Est, "est-20240315-0001"));
    }

    #[test]
    fn test_generated_numbers_are_valid() {
        for seq in [1, 99, 9999, 10000] {
            let n = format_number(DocumentPrefix::Inv, day(), seq);
            assert!(is_valid_number(DocumentPrefix::Inv, &n), "{n}");
        }
    }
}
