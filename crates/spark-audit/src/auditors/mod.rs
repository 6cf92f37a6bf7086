//! Auditor strategies
//!
//! Provides the [`Auditor`] trait and the two format-specific implementations:
//! - [`PhaseAuditor`]: legacy three-phase documents
//! - [`SectionAuditor`]: enhanced numbered-section documents
//!
//! [`AuditorSet`] selects the implementation from the document's format tag.

mod phase;
mod section;

pub use phase::PhaseAuditor;
pub use section::{SectionAuditor, SectionThresholds};

use crate::report::AuditReport;
use spark_document::{DocumentFormat, SparkDocument};

/// Completeness auditor for one document format
///
/// Audits are total: any document yields a well-formed report.
pub trait Auditor: Send + Sync + std::fmt::Debug {
    /// Audit a parsed document
    fn audit(&self, document: &SparkDocument) -> AuditReport;

    /// Format this auditor understands
    fn format(&self) -> DocumentFormat;

    /// Auditor name (for logging)
    fn name(&self) -> &'static str;
}

/// One auditor per document format
#[derive(Debug, Clone, Default)]
pub struct AuditorSet {
    legacy: PhaseAuditor,
    enhanced: SectionAuditor,
}

impl AuditorSet {
    /// Create set with default auditors
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the enhanced-format auditor
    #[inline]
    #[must_use]
    pub fn with_section_auditor(mut self, auditor: SectionAuditor) -> Self {
        self.enhanced = auditor;
        self
    }

    /// Auditor for a format
    #[must_use]
    pub fn select(&self, format: DocumentFormat) -> &dyn Auditor {
        match format {
            DocumentFormat::Legacy => &self.legacy,
            DocumentFormat::Enhanced => &self.enhanced,
        }
    }

    /// Audit with the auditor matching the document's format
    #[must_use]
    pub fn audit(&self, document: &SparkDocument) -> AuditReport {
        let auditor = self.select(document.format);
        let report = auditor.audit(document);
        tracing::debug!(
            auditor = auditor.name(),
            id = %document.id,
            status = %report.status,
            completion = report.completion_level,
            "audit complete"
        );
        report
    }
}
