//! Contribution ledger
//!
//! The ledger is append-only and grouped by contributor in first-seen order.
//! JSON input has the shape
//!
//! ```json
//! [{"username": "@ivan", "contributions": [{"date": "2026-01-10", "role": "designer", "cs": 15}]}]
//! ```
//!
//! Loading validates each record on its own; a bad record is skipped with a
//! [`LedgerWarning`] and the rest of the batch still loads.

use crate::error::{LedgerError, LedgerWarning};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use spark_document::Role;

/// One dated contribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionRecord {
    /// Contributor identifier
    pub contributor_id: String,
    /// Calendar date of the contribution
    pub date: NaiveDate,
    /// Role credited
    pub role: Role,
    /// Contribution score earned
    pub cs_earned: f64,
}

impl ContributionRecord {
    /// Create record
    pub fn new(contributor_id: impl Into<String>, date: NaiveDate, role: Role, cs_earned: f64) -> Self {
        Self {
            contributor_id: contributor_id.into(),
            date,
            role,
            cs_earned,
        }
    }
}

/// Records grouped by contributor, in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    contributors: IndexMap<String, Vec<ContributionRecord>>,
}

impl Ledger {
    /// Create empty ledger
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from records, grouping by contributor
    pub fn from_records(records: impl IntoIterator<Item = ContributionRecord>) -> Self {
        let mut ledger = Self::new();
        for record in records {
            ledger.push(record);
        }
        ledger
    }

    /// Append a record
    pub fn push(&mut self, record: ContributionRecord) {
        self.contributors
            .entry(record.contributor_id.clone())
            .or_default()
            .push(record);
    }

    /// Register a contributor with no records yet
    pub fn add_contributor(&mut self, username: impl Into<String>) {
        self.contributors.entry(username.into()).or_default();
    }

    /// Records for one contributor
    #[must_use]
    pub fn records(&self, username: &str) -> Option<&[ContributionRecord]> {
        self.contributors.get(username).map(Vec::as_slice)
    }

    /// Contributors and their records, in first-seen order
    pub fn contributors(&self) -> impl Iterator<Item = (&str, &[ContributionRecord])> {
        self.contributors
            .iter()
            .map(|(name, records)| (name.as_str(), records.as_slice()))
    }

    /// Number of contributors
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.contributors.len()
    }

    /// Whether the ledger has no contributors
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contributors.is_empty()
    }

    /// Total number of records
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.contributors.values().map(Vec::len).sum()
    }

    /// Load ledger JSON
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Malformed`] for invalid JSON and
    /// [`LedgerError::NotAnArray`] when the top-level value is not an array.
    /// Problems inside individual entries are reported as warnings.
    pub fn from_json_str(json: &str) -> Result<LedgerLoad, LedgerError> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Array(entries) = value else {
            return Err(LedgerError::NotAnArray);
        };

        let mut load = LedgerLoad::default();
        for (index, entry) in entries.iter().enumerate() {
            let Some(username) = entry.get("username").and_then(Value::as_str) else {
                load.skip(None, index, LedgerError::missing_field("username"));
                continue;
            };
            load.ledger.add_contributor(username);

            let contributions = entry
                .get("contributions")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();

            for (position, raw) in contributions.iter().enumerate() {
                match parse_record(username, raw) {
                    Ok(record) => load.ledger.push(record),
                    Err(error) => load.skip(Some(username), position, error),
                }
            }
        }

        tracing::debug!(
            contributors = load.ledger.len(),
            records = load.ledger.record_count(),
            skipped = load.warnings.len(),
            "ledger loaded"
        );
        Ok(load)
    }
}

/// Ledger plus the records skipped while loading it
#[derive(Debug, Default)]
pub struct LedgerLoad {
    /// Valid records
    pub ledger: Ledger,
    /// Skipped entries and records
    pub warnings: Vec<LedgerWarning>,
}

impl LedgerLoad {
    fn skip(&mut self, contributor: Option<&str>, index: usize, error: LedgerError) {
        let warning = LedgerWarning {
            contributor: contributor.map(str::to_string),
            index,
            error,
        };
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }
}

/// Parse `YYYY-MM-DD`, also accepting a datetime whose date part comes first
///
/// # Errors
///
/// Returns [`LedgerError::InvalidDate`] when no calendar date can be read.
pub fn parse_date(value: &str) -> Result<NaiveDate, LedgerError> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }

    let has_time = matches!(value.as_bytes().get(10), Some(b'T' | b' '));
    value
        .get(..10)
        .filter(|_| has_time)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .ok_or_else(|| LedgerError::invalid_date(value))
}

fn parse_record(username: &str, raw: &Value) -> Result<ContributionRecord, LedgerError> {
    let date = raw
        .get("date")
        .and_then(Value::as_str)
        .ok_or_else(|| LedgerError::missing_field("date"))
        .and_then(parse_date)?;

    let role: Role = raw
        .get("role")
        .and_then(Value::as_str)
        .ok_or_else(|| LedgerError::missing_field("role"))?
        .parse()?;

    let cs = match raw.get("cs") {
        Some(Value::Number(number)) => number
            .as_f64()
            .ok_or_else(|| LedgerError::invalid_score(number))?,
        Some(other) => return Err(LedgerError::invalid_score(other)),
        None => return Err(LedgerError::missing_field("cs")),
    };
    if !cs.is_finite() || cs < 0.0 {
        return Err(LedgerError::invalid_score(cs));
    }

    Ok(ContributionRecord::new(username, date, role, cs))
}
