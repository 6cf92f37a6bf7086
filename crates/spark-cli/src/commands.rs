//! Subcommand implementations
//!
//! Each command returns its output as a string so that `main` decides where
//! it goes and the commands stay testable without a process.

use crate::config::ScribeConfig;
use crate::error::{Result, ScribeError};
use crate::source;
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::Serialize;
use spark_audit::{AuditReport, Scribe};
use spark_document::{ENHANCED_TEMPLATE, LEGACY_TEMPLATE};
use spark_reputation::{simulation, ContributorScore, FarmerFlag, FarmingConfig, LedgerLoad};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// One audited file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditedFile {
    /// Source path
    pub path: PathBuf,
    /// Resolved document name
    pub name: String,
    /// Audit report
    pub report: AuditReport,
}

/// Result of the `audit` command
#[derive(Debug, Clone, PartialEq)]
pub struct AuditOutcome {
    /// Audited files, in input order
    pub files: Vec<AuditedFile>,
}

impl AuditOutcome {
    /// Whether every document reached at least one stable unit
    #[must_use]
    pub fn all_valid(&self) -> bool {
        self.files.iter().all(|file| file.report.is_valid())
    }

    /// Reports as JSON
    ///
    /// # Errors
    ///
    /// Returns [`ScribeError::Serialize`].
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.files)?)
    }

    /// Reports as text, one block per file
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for file in &self.files {
            let _ = writeln!(out, "File: {}", file.path.display());
            out.push_str(&file.report.render_text(&file.name));
            out.push('\n');
        }
        out
    }
}

/// Audit documents in parallel
///
/// # Errors
///
/// Returns [`ScribeError::InputUnreadable`] for the first file that cannot be read.
pub fn audit(scribe: &Scribe, paths: &[PathBuf]) -> Result<AuditOutcome> {
    let files = paths
        .par_iter()
        .map(|path| {
            let text = source::read_text(path)?;
            let (document, report) = scribe.audit(&text);
            tracing::debug!(path = %path.display(), status = %report.status, "audited");
            Ok(AuditedFile {
                path: path.clone(),
                name: document.name,
                report,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::info!(files = files.len(), "audit complete");
    Ok(AuditOutcome { files })
}

/// Full evaluation envelope for one document
///
/// # Errors
///
/// Returns [`ScribeError::InputUnreadable`] or [`ScribeError::Serialize`].
pub fn evaluate(scribe: &Scribe, path: &Path, pretty: bool) -> Result<String> {
    let text = source::read_text(path)?;
    let envelope = scribe.evaluate(&text).envelope();
    let json = if pretty {
        serde_json::to_string_pretty(&envelope)?
    } else {
        serde_json::to_string(&envelope)?
    };
    Ok(json)
}

/// A ledger record skipped during loading
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    /// Contributor, when the entry had one
    pub contributor: Option<String>,
    /// Entry or record position
    pub index: usize,
    /// Reason
    pub reason: String,
}

/// Output of the `reputation` command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReputationReport {
    /// Evaluation date
    pub as_of: NaiveDate,
    /// Scores, highest active first
    pub scores: Vec<ContributorScore>,
    /// Possible point farmers
    pub flagged: Vec<FarmerFlag>,
    /// Records that failed validation
    pub skipped: Vec<SkippedRecord>,
}

/// Score a loaded ledger
///
/// # Errors
///
/// Returns [`ScribeError::InvalidArgument`] for a threshold outside `0..=1`.
pub fn reputation(
    config: &ScribeConfig,
    load: &LedgerLoad,
    as_of: NaiveDate,
    threshold: Option<f64>,
) -> Result<ReputationReport> {
    let mut farming: FarmingConfig = config.farming;
    if let Some(threshold) = threshold {
        farming = farming.with_threshold_ratio(threshold);
        farming
            .validate()
            .map_err(|e| ScribeError::InvalidArgument(e.to_string()))?;
    }

    let engine = config.decay_engine();
    let detector = config.farming_detector().with_config(farming);

    Ok(ReputationReport {
        as_of,
        scores: engine.score_ledger(&load.ledger, as_of),
        flagged: detector.detect(&load.ledger, as_of),
        skipped: load
            .warnings
            .iter()
            .map(|warning| SkippedRecord {
                contributor: warning.contributor.clone(),
                index: warning.index,
                reason: warning.error.to_string(),
            })
            .collect(),
    })
}

/// Sample ledger report as text tables
///
/// # Errors
///
/// Returns [`ScribeError::Ledger`] if the embedded sample fails to load.
pub fn simulate() -> Result<String> {
    Ok(simulation::run()?.render_table())
}

/// Blank document template
#[must_use]
pub fn template(enhanced: bool) -> &'static str {
    if enhanced {
        ENHANCED_TEMPLATE
    } else {
        LEGACY_TEMPLATE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spark_reputation::Ledger;

    #[test]
    fn threshold_is_range_checked() {
        let load = Ledger::from_json_str("[]").unwrap();
        let as_of = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let error = reputation(&ScribeConfig::default(), &load, as_of, Some(1.5)).unwrap_err();
        assert!(matches!(error, ScribeError::InvalidArgument(_)));
        assert!(reputation(&ScribeConfig::default(), &load, as_of, Some(0.4)).is_ok());
    }

    #[test]
    fn templates_differ_by_format() {
        assert!(template(true).starts_with("---"));
        assert!(template(false).contains("Phase 1"));
    }

    #[test]
    fn simulate_renders_table() {
        let table = simulate().unwrap();
        assert!(table.contains("Voting Weight"));
        assert!(table.contains("@DevDevon"));
    }
}
