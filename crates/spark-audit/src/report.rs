//! Audit report types
//!
//! [`AuditReport`] is the shared output of both auditor strategies. It is
//! rebuilt from the document on every audit and carries everything the
//! governance advisor needs, so the advisor never re-reads the document.

use serde::{Deserialize, Serialize};
use spark_document::{DocumentFormat, Role};
use std::fmt::{self, Write as _};

/// Overall stability verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditStatus {
    /// Every auditable unit is stable
    Green,
    /// Partially stable
    Yellow,
    /// Nothing stable
    Red,
}

impl AuditStatus {
    /// Wire spelling
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Green => "GREEN",
            Self::Yellow => "YELLOW",
            Self::Red => "RED",
        }
    }
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stability of one auditable unit (a legacy phase or an enhanced section group)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageStatus {
    /// Display label, e.g. `Phase 2 (Design)`
    pub label: String,
    /// Role credited for this unit
    pub role: Role,
    /// Whether the unit appears in the document
    pub present: bool,
    /// Whether the unit is complete enough to build on
    pub stable: bool,
    /// Contributor handle, without `@`
    pub handle: Option<String>,
    /// Labels of missing sub-fields
    pub missing: Vec<String>,
}

/// Boolean checks exposed alongside the status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditChecks {
    /// First unit stable
    pub spark_complete: bool,
    /// Second unit stable
    pub design_complete: bool,
    /// Third unit stable
    pub logic_complete: bool,
    /// Design declares how it snaps into the ecosystem
    pub interface_snappable: bool,
    /// Logic declares a verification test
    pub logic_testable: bool,
}

/// Result of auditing one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    /// Format of the audited document
    pub format: DocumentFormat,
    /// Overall verdict
    pub status: AuditStatus,
    /// Number of stable units (0-3)
    pub completion_level: u8,
    /// Novelty score 0-100; legacy documents only
    pub novelty_score: Option<f64>,
    /// Per-unit stability, in order
    pub stages: Vec<StageStatus>,
    /// Boolean checks
    pub checks: AuditChecks,
    /// Structural problems
    pub critical_flaws: Vec<String>,
    /// Non-blocking problems
    pub warnings: Vec<String>,
    /// Suggested next steps
    pub recommendations: Vec<String>,
}

impl AuditReport {
    /// At least one unit is stable
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.completion_level >= 1
    }

    /// Stage credited to a role
    #[must_use]
    pub fn stage(&self, role: Role) -> Option<&StageStatus> {
        self.stages.iter().find(|stage| stage.role == role)
    }

    /// Whether the stage credited to a role is stable
    #[inline]
    #[must_use]
    pub fn is_stage_stable(&self, role: Role) -> bool {
        self.stage(role).is_some_and(|stage| stage.stable)
    }

    /// One-line summary keyed by status
    #[must_use]
    pub fn scribe_report(&self) -> String {
        let unit = match self.format {
            DocumentFormat::Legacy => "phases",
            DocumentFormat::Enhanced => "section groups",
        };
        match self.status {
            AuditStatus::Green => format!("Fully stable across all three {unit}."),
            AuditStatus::Yellow => {
                let incomplete: Vec<&str> = self
                    .stages
                    .iter()
                    .filter(|stage| !stage.stable)
                    .map(|stage| stage.label.as_str())
                    .collect();
                format!("Needs refinement: {} incomplete.", incomplete.join(", "))
            }
            AuditStatus::Red => "Unstable. Critical phases are missing or empty.".to_string(),
        }
    }

    /// Multi-line human-readable rendering
    #[must_use]
    pub fn render_text(&self, title: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Stability Report: {title}");
        let _ = writeln!(out, "{}", "=".repeat(60));
        let _ = writeln!(
            out,
            "Status: {} ({})",
            if self.is_valid() { "Valid" } else { "Invalid" },
            self.status
        );
        let _ = writeln!(out, "Completion Level: {}/3", self.completion_level);
        if let Some(score) = self.novelty_score {
            let _ = writeln!(out, "Novelty Score: {score:.1}/100");
        }

        out.push_str("\nStages:\n");
        for stage in &self.stages {
            let mark = if stage.stable { "[x]" } else { "[ ]" };
            let handle = stage
                .handle
                .as_deref()
                .map(|h| format!(" (@{h})"))
                .unwrap_or_default();
            let _ = writeln!(out, "  {mark} {}{handle}", stage.label);
            for missing in &stage.missing {
                let _ = writeln!(out, "      missing: {missing}");
            }
        }

        for (heading, items) in [
            ("Critical Flaws", &self.critical_flaws),
            ("Warnings", &self.warnings),
            ("Recommendations", &self.recommendations),
        ] {
            if items.is_empty() {
                continue;
            }
            let _ = writeln!(out, "\n{heading}:");
            for item in items {
                let _ = writeln!(out, "  - {item}");
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(label: &str, role: Role, stable: bool) -> StageStatus {
        StageStatus {
            label: label.to_string(),
            role,
            present: true,
            stable,
            handle: None,
            missing: Vec::new(),
        }
    }

    fn report(status: AuditStatus, stages: Vec<StageStatus>) -> AuditReport {
        let completion_level = u8::try_from(stages.iter().filter(|s| s.stable).count()).unwrap();
        AuditReport {
            format: DocumentFormat::Legacy,
            status,
            completion_level,
            novelty_score: Some(72.0),
            stages,
            checks: AuditChecks::default(),
            critical_flaws: vec!["flaw".to_string()],
            warnings: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    #[test]
    fn status_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&AuditStatus::Yellow).unwrap(), "\"YELLOW\"");
    }

    #[test]
    fn yellow_summary_lists_incomplete_stages() {
        let report = report(
            AuditStatus::Yellow,
            vec![
                stage("Phase 1 (Spark)", Role::Scout, true),
                stage("Phase 2 (Design)", Role::Designer, false),
                stage("Phase 3 (Logic)", Role::Builder, false),
            ],
        );
        assert_eq!(
            report.scribe_report(),
            "Needs refinement: Phase 2 (Design), Phase 3 (Logic) incomplete."
        );
        assert!(report.is_valid());
        assert!(report.is_stage_stable(Role::Scout));
        assert!(!report.is_stage_stable(Role::Builder));
    }

    #[test]
    fn render_text_lists_sections() {
        let report = report(AuditStatus::Red, vec![stage("Phase 1 (Spark)", Role::Scout, false)]);
        let text = report.render_text("demo.md");
        assert!(text.starts_with("Stability Report: demo.md\n"));
        assert!(text.contains("Status: Invalid (RED)"));
        assert!(text.contains("Novelty Score: 72.0/100"));
        assert!(text.contains("\nCritical Flaws:\n  - flaw\n"));
        assert!(!text.contains("Warnings:"));
    }
}
