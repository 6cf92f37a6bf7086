//! Error types for ledger ingestion
//!
//! Scoring itself never fails. Errors only arise while turning raw ledger
//! JSON into [`ContributionRecord`](crate::ContributionRecord)s:
//! - Whole-input failures (unreadable JSON, wrong top-level shape) abort the load
//! - Per-record failures become [`LedgerWarning`]s and the record is skipped

use spark_document::UnknownRoleError;
use std::fmt;

/// Errors while reading a contribution ledger
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Date is not an ISO-8601 calendar date
    #[error("invalid date: '{value}'")]
    InvalidDate { value: String },

    /// Role is not scout, designer or builder
    #[error(transparent)]
    UnknownRole(#[from] UnknownRoleError),

    /// Required field absent or of the wrong type
    #[error("missing field: '{field}'")]
    MissingField { field: &'static str },

    /// Score is negative, NaN or infinite
    #[error("invalid score: {value}")]
    InvalidScore { value: String },

    /// Input is not valid JSON
    #[error("malformed ledger: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Top-level value is not an array of contributors
    #[error("ledger must be an array of contributors")]
    NotAnArray,
}

impl LedgerError {
    /// Create invalid date error
    pub fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
        }
    }

    /// Create missing field error
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Create invalid score error
    pub fn invalid_score(value: impl fmt::Display) -> Self {
        Self::InvalidScore {
            value: value.to_string(),
        }
    }
}

/// A tuning parameter outside `0..=1`
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field} must be between 0 and 1, got {value}")]
pub struct RangeError {
    /// Parameter name
    pub field: &'static str,
    /// Rejected value
    pub value: f64,
}

/// Check that `value` is a finite fraction in `0..=1`
///
/// # Errors
///
/// Returns [`RangeError`] naming `field` otherwise.
pub fn check_fraction(field: &'static str, value: f64) -> Result<(), RangeError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(RangeError { field, value })
    }
}

/// A ledger entry or record skipped during loading
#[derive(Debug)]
pub struct LedgerWarning {
    /// Contributor the record belongs to, if known
    pub contributor: Option<String>,
    /// Position of the entry (no contributor) or of the record within the contributor
    pub index: usize,
    /// Why it was skipped
    pub error: LedgerError,
}

impl fmt::Display for LedgerWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.contributor {
            Some(contributor) => write!(
                f,
                "{contributor}: contribution #{} skipped: {}",
                self.index, self.error
            ),
            None => write!(f, "entry #{} skipped: {}", self.index, self.error),
        }
    }
}
