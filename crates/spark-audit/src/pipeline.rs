//! Evaluation pipeline
//!
//! Wires parsing, auditing and advisory into one call and shapes the result
//! into the JSON envelope consumed by serving layers.
//!
//! ```text
//! text ──► SparkParser ──► SparkDocument ──► AuditorSet ──► AuditReport ──► GovernanceAdvisor ──► Advisory
//! ```

use crate::advisor::{Advisory, Confidence, GovernanceAdvisor, Recommendation};
use crate::auditors::AuditorSet;
use crate::report::{AuditChecks, AuditReport, AuditStatus};
use serde::Serialize;
use spark_document::{DocumentFormat, Phase, PhaseContent, SparkDocument, SparkParser};
use std::collections::BTreeMap;

/// Full evaluation pipeline
#[derive(Debug, Clone, Default)]
pub struct Scribe {
    parser: SparkParser,
    auditors: AuditorSet,
    advisor: GovernanceAdvisor,
}

impl Scribe {
    /// Create pipeline with default components
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set auditors
    #[inline]
    #[must_use]
    pub fn with_auditors(mut self, auditors: AuditorSet) -> Self {
        self.auditors = auditors;
        self
    }

    /// Set advisor
    #[inline]
    #[must_use]
    pub fn with_advisor(mut self, advisor: GovernanceAdvisor) -> Self {
        self.advisor = advisor;
        self
    }

    /// Parse and audit only
    #[must_use]
    pub fn audit(&self, text: &str) -> (SparkDocument, AuditReport) {
        let document = self.parser.parse(text);
        let report = self.auditors.audit(&document);
        (document, report)
    }

    /// Parse, audit and advise
    #[must_use]
    pub fn evaluate(&self, text: &str) -> Evaluation {
        self.evaluate_document(self.parser.parse(text))
    }

    /// Audit and advise an already parsed document
    #[must_use]
    pub fn evaluate_document(&self, document: SparkDocument) -> Evaluation {
        let mut decision_path = vec![format!(
            "parse: {} format",
            match document.format {
                DocumentFormat::Legacy => "legacy",
                DocumentFormat::Enhanced => "enhanced",
            }
        )];

        let auditor = self.auditors.select(document.format);
        let report = auditor.audit(&document);
        decision_path.push(format!(
            "audit: {} auditor, {} of 3 stable",
            auditor.name(),
            report.completion_level
        ));
        decision_path.push(format!("status: {}", report.status));

        let advisory = self.advisor.advise(&report);
        decision_path.push(format!(
            "advise: {} ({} merit entries)",
            advisory.recommendation,
            advisory.merit_plan.len()
        ));

        tracing::info!(
            id = %document.id,
            status = %report.status,
            recommendation = %advisory.recommendation,
            "spark evaluated"
        );

        Evaluation {
            document,
            report,
            advisory,
            decision_path,
        }
    }
}

/// Result of one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Parsed document
    pub document: SparkDocument,
    /// Audit report
    pub report: AuditReport,
    /// Advisory derived from the report
    pub advisory: Advisory,
    /// Ordered pipeline steps taken
    pub decision_path: Vec<String>,
}

impl Evaluation {
    /// Serializable output envelope
    #[must_use]
    pub fn envelope(&self) -> EvaluationEnvelope {
        let document = &self.document;
        let report = &self.report;

        let content = match document.format {
            DocumentFormat::Legacy => ContentView::Legacy {
                phases: Phase::ALL
                    .into_iter()
                    .map(|phase| {
                        let fields = document
                            .phase(phase)
                            .cloned()
                            .unwrap_or_else(|| PhaseContent::empty(phase));
                        let view = PhaseView {
                            is_stable: fields.is_stable() && document.phase(phase).is_some(),
                            fields,
                        };
                        (phase, view)
                    })
                    .collect(),
            },
            DocumentFormat::Enhanced => ContentView::Enhanced {
                sections: document.sections.clone(),
            },
        };

        EvaluationEnvelope {
            spark_info: SparkInfo {
                id: document.id.clone(),
                name: document.name.clone(),
                format: document.format,
                stability_score: report.completion_level,
            },
            content,
            audit: AuditView {
                status: report.status,
                scribe_report: report.scribe_report(),
                recommendation: self.advisory.recommendation,
                confidence_level: self.advisory.confidence,
                novelty_score: report.novelty_score,
                critical_flaws: report.critical_flaws.clone(),
                warnings: report.warnings.clone(),
                recommendations: report.recommendations.clone(),
                checks: report.checks,
            },
            merit_plan: self
                .advisory
                .merit_plan
                .iter()
                .map(|entry| MeritLine {
                    handle: format!("@{}", entry.handle),
                    role: entry.role.title().to_string(),
                    reward: entry.reward_label(),
                    base_reward: entry.base_reward,
                    bonus_reward: entry.bonus_reward,
                })
                .collect(),
            governance_notes: self.advisory.notes.clone(),
            decision_path: self.decision_path.clone(),
        }
    }
}

/// JSON envelope for one evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationEnvelope {
    /// Identity and stability count
    pub spark_info: SparkInfo,
    /// Extracted content
    pub content: ContentView,
    /// Audit verdict
    pub audit: AuditView,
    /// Rewards
    pub merit_plan: Vec<MeritLine>,
    /// Governance notes
    pub governance_notes: String,
    /// Ordered pipeline steps taken
    pub decision_path: Vec<String>,
}

/// Document identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SparkInfo {
    /// Document id
    pub id: String,
    /// Display name
    pub name: String,
    /// Detected format
    pub format: DocumentFormat,
    /// Number of stable units
    pub stability_score: u8,
}

/// Extracted content, shaped by format
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContentView {
    /// Legacy phases
    Legacy {
        /// Per-phase fields and stability
        phases: BTreeMap<Phase, PhaseView>,
    },
    /// Enhanced sections
    Enhanced {
        /// Raw section text by number
        sections: BTreeMap<u8, String>,
    },
}

/// One phase's fields and stability
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseView {
    /// Whether the phase is present and stable
    pub is_stable: bool,
    /// Extracted fields
    pub fields: PhaseContent,
}

/// Audit portion of the envelope
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditView {
    /// Overall verdict
    pub status: AuditStatus,
    /// One-line summary
    pub scribe_report: String,
    /// Recommended action
    pub recommendation: Recommendation,
    /// Confidence in the recommendation
    pub confidence_level: Confidence,
    /// Novelty score (legacy only)
    pub novelty_score: Option<f64>,
    /// Structural problems
    pub critical_flaws: Vec<String>,
    /// Non-blocking problems
    pub warnings: Vec<String>,
    /// Suggested next steps
    pub recommendations: Vec<String>,
    /// Boolean checks
    pub checks: AuditChecks,
}

/// One merit plan line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeritLine {
    /// `@handle`
    pub handle: String,
    /// Capitalised role
    pub role: String,
    /// Display reward, e.g. `+25 CS (+10 Prototype bonus)`
    pub reward: String,
    /// Base reward
    pub base_reward: u32,
    /// Bonus reward
    pub bonus_reward: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_path_records_each_step() {
        let evaluation = Scribe::new().evaluate("");
        assert_eq!(
            evaluation.decision_path,
            vec![
                "parse: legacy format",
                "audit: phase auditor, 0 of 3 stable",
                "status: RED",
                "advise: Reject (0 merit entries)",
            ]
        );
    }

    #[test]
    fn envelope_for_empty_document() {
        let envelope = Scribe::new().evaluate("").envelope();
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["spark_info"]["name"], "Untitled Spark");
        assert_eq!(json["spark_info"]["stability_score"], 0);
        assert_eq!(json["audit"]["status"], "RED");
        assert_eq!(json["audit"]["recommendation"], "Reject");
        assert_eq!(json["audit"]["confidence_level"], "low");
        assert_eq!(json["content"]["phases"]["spark"]["is_stable"], false);
        assert!(json["merit_plan"].as_array().unwrap().is_empty());
    }
}
