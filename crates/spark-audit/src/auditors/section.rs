//! Enhanced numbered-section auditor
//!
//! Stability here is purely length based. No novelty score is produced for
//! this format.

use super::Auditor;
use crate::report::{AuditChecks, AuditReport, AuditStatus, StageStatus};
use serde::{Deserialize, Serialize};
use spark_document::{DocumentFormat, Role, SparkDocument};

/// Minimum lengths (exclusive, in characters of trimmed text)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionThresholds {
    /// Section 1 (narrative)
    pub narrative: usize,
    /// Section 2 (hypothesis)
    pub hypothesis: usize,
    /// Either of sections 3 and 4 (modeling / evaluation)
    pub plan: usize,
}

impl Default for SectionThresholds {
    fn default() -> Self {
        Self {
            narrative: 50,
            hypothesis: 30,
            plan: 30,
        }
    }
}

/// Auditor for enhanced documents
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionAuditor {
    thresholds: SectionThresholds,
}

impl SectionAuditor {
    /// Create new auditor
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set thresholds
    #[inline]
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: SectionThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    fn length(document: &SparkDocument, number: u8) -> Option<usize> {
        document.section(number).map(|text| text.trim().chars().count())
    }
}

struct Unit {
    label: &'static str,
    role: Role,
    present: bool,
    stable: bool,
    missing: Vec<String>,
}

impl Auditor for SectionAuditor {
    fn audit(&self, document: &SparkDocument) -> AuditReport {
        let t = self.thresholds;
        let narrative = Self::length(document, 1);
        let hypothesis = Self::length(document, 2);
        let modeling = Self::length(document, 3);
        let evaluation = Self::length(document, 4);

        let longer_than = |len: Option<usize>, min: usize| len.is_some_and(|n| n > min);
        let plan_stable = longer_than(modeling, t.plan) || longer_than(evaluation, t.plan);

        let units = [
            Unit {
                label: "Section 1 (Spark Narrative)",
                role: Role::Scout,
                present: narrative.is_some(),
                stable: longer_than(narrative, t.narrative),
                missing: vec!["Spark Narrative".to_string()],
            },
            Unit {
                label: "Section 2 (Hypothesis Formalization)",
                role: Role::Designer,
                present: hypothesis.is_some(),
                stable: longer_than(hypothesis, t.hypothesis),
                missing: vec!["Hypothesis Formalization".to_string()],
            },
            Unit {
                label: "Sections 3-4 (Modeling / Evaluation)",
                role: Role::Builder,
                present: modeling.is_some() || evaluation.is_some(),
                stable: plan_stable,
                missing: vec![
                    "Simulation / Modeling Plan".to_string(),
                    "Evaluation Strategy".to_string(),
                ],
            },
        ];

        let completion_level =
            u8::try_from(units.iter().filter(|unit| unit.stable).count()).unwrap_or(3);
        let status = match completion_level {
            3 => AuditStatus::Green,
            2 => AuditStatus::Yellow,
            _ => AuditStatus::Red,
        };

        let mut critical_flaws = Vec::new();
        match narrative {
            None => critical_flaws.push("Section 1 (Spark Narrative) is missing.".to_string()),
            Some(n) if n <= t.narrative => critical_flaws.push(format!(
                "Section 1 (Spark Narrative) is too brief ({n} characters, needs more than {}).",
                t.narrative
            )),
            Some(_) => {}
        }
        match hypothesis {
            None => critical_flaws
                .push("Section 2 (Hypothesis Formalization) is missing.".to_string()),
            Some(n) if n <= t.hypothesis => critical_flaws.push(format!(
                "Section 2 (Hypothesis Formalization) is too brief ({n} characters, needs more than {}).",
                t.hypothesis
            )),
            Some(_) => {}
        }

        let recommendations = units
            .iter()
            .filter(|unit| !unit.stable)
            .map(|unit| format!("Expand {}.", unit.label))
            .collect();

        let checks = AuditChecks {
            spark_complete: units[0].stable,
            design_complete: units[1].stable,
            logic_complete: units[2].stable,
            interface_snappable: false,
            logic_testable: false,
        };

        let stages = units
            .into_iter()
            .map(|unit| StageStatus {
                label: unit.label.to_string(),
                role: unit.role,
                present: unit.present,
                stable: unit.stable,
                handle: document.handle(unit.role).map(str::to_string),
                missing: if unit.stable { Vec::new() } else { unit.missing },
            })
            .collect();

        AuditReport {
            format: DocumentFormat::Enhanced,
            status,
            completion_level,
            novelty_score: None,
            stages,
            checks,
            critical_flaws,
            warnings: Vec::new(),
            recommendations,
        }
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Enhanced
    }

    fn name(&self) -> &'static str {
        "section"
    }
}
