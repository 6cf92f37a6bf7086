//! Legacy three-phase auditor

use super::Auditor;
use crate::novelty::NoveltyScorer;
use crate::report::{AuditChecks, AuditReport, AuditStatus, StageStatus};
use spark_document::{has_handle, DocumentFormat, Phase, PhaseContent, SparkDocument};

const NO_COMPLETE_PHASES: &str =
    "No complete phases found. Required: at minimum a valid Phase 1 (Spark).";
const NO_HANDLES: &str = "No contributor handles (@username) found.";
const STRENGTHEN_CORE: &str = "Strengthen the Novel Core description with more specific details.";
const CLARIFY_DELTA: &str = "Articulate the 10% delta more clearly against Prior Art.";
const START_WITH_SPARK: &str =
    "Start by completing Phase 1 (Spark) with a clear observation of the gap.";

/// Auditor for legacy documents
///
/// Phases are ordered spark < design < logic; completion is expected to grow
/// in that order.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseAuditor {
    scorer: NoveltyScorer,
}

impl PhaseAuditor {
    /// Create new auditor
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn stage(document: &SparkDocument, phase: Phase) -> StageStatus {
        let content = document.phase(phase);
        StageStatus {
            label: phase.label().to_string(),
            role: phase.role(),
            present: content.is_some(),
            stable: content.is_some_and(PhaseContent::is_stable),
            handle: document.handle(phase.role()).map(str::to_string),
            missing: content
                .map(PhaseContent::missing_fields)
                .unwrap_or_default()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    fn novelty(&self, document: &SparkDocument) -> f64 {
        let text = document.design().map_or("", |design| {
            if design.novel_core.trim().is_empty() {
                design.blueprint.as_str()
            } else {
                design.novel_core.as_str()
            }
        });
        self.scorer.score(text, &document.source)
    }

    fn critical_flaws(document: &SparkDocument, stages: &[(Phase, StageStatus)]) -> Vec<String> {
        let mut flaws = Vec::new();

        let highest_stable = stages
            .iter()
            .filter(|(_, stage)| stage.stable)
            .map(|(phase, _)| phase.order())
            .max();

        match highest_stable {
            None => flaws.push(NO_COMPLETE_PHASES.to_string()),
            Some(highest) => {
                // Only phases below the highest stable one are foundational
                for (phase, stage) in stages {
                    if phase.order() < highest && !stage.stable {
                        flaws.push(format!("Missing foundational phase: {}", phase.label()));
                    }
                }
            }
        }

        if !has_handle(&document.source) {
            flaws.push(NO_HANDLES.to_string());
        }

        flaws
    }

    fn warnings(stages: &[(Phase, StageStatus)]) -> Vec<String> {
        stages
            .iter()
            .filter(|(_, stage)| stage.handle.is_some() && !stage.stable)
            .map(|(_, stage)| {
                format!(
                    "{} is incomplete (missing: {})",
                    stage.label,
                    stage.missing.join(", ")
                )
            })
            .collect()
    }

    fn recommendations(
        stages: &[(Phase, StageStatus)],
        completion_level: u8,
        novelty_score: f64,
        flaws: &[String],
    ) -> Vec<String> {
        let mut recommendations = Vec::new();

        if completion_level < 3 {
            if let Some((phase, _)) = stages.iter().find(|(_, stage)| !stage.stable) {
                recommendations.push(format!("Complete the next phase: {}", phase.label()));
            }
        }
        if novelty_score < 60.0 {
            recommendations.push(STRENGTHEN_CORE.to_string());
        }
        let design_stable = stages
            .iter()
            .any(|(phase, stage)| *phase == Phase::Design && stage.stable);
        if design_stable && novelty_score < 50.0 {
            recommendations.push(CLARIFY_DELTA.to_string());
        }
        if flaws.iter().any(|flaw| flaw == NO_COMPLETE_PHASES) {
            recommendations.push(START_WITH_SPARK.to_string());
        }

        recommendations
    }
}

impl Auditor for PhaseAuditor {
    fn audit(&self, document: &SparkDocument) -> AuditReport {
        let stages: Vec<(Phase, StageStatus)> = Phase::ALL
            .into_iter()
            .map(|phase| (phase, Self::stage(document, phase)))
            .collect();

        let completion_level =
            u8::try_from(stages.iter().filter(|(_, stage)| stage.stable).count()).unwrap_or(3);
        let status = match completion_level {
            0 => AuditStatus::Red,
            3 => AuditStatus::Green,
            _ => AuditStatus::Yellow,
        };

        let novelty_score = self.novelty(document);
        let critical_flaws = Self::critical_flaws(document, &stages);
        let warnings = Self::warnings(&stages);
        let recommendations =
            Self::recommendations(&stages, completion_level, novelty_score, &critical_flaws);

        let checks = AuditChecks {
            spark_complete: document.is_phase_stable(Phase::Spark),
            design_complete: document.is_phase_stable(Phase::Design),
            logic_complete: document.is_phase_stable(Phase::Logic),
            interface_snappable: document
                .design()
                .is_some_and(|design| !design.interface.trim().is_empty()),
            logic_testable: matches!(
                document.phase(Phase::Logic),
                Some(PhaseContent::Logic(logic)) if !logic.test.trim().is_empty()
            ),
        };

        AuditReport {
            format: DocumentFormat::Legacy,
            status,
            completion_level,
            novelty_score: Some(novelty_score),
            stages: stages.into_iter().map(|(_, stage)| stage).collect(),
            checks,
            critical_flaws,
            warnings,
            recommendations,
        }
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Legacy
    }

    fn name(&self) -> &'static str {
        "phase"
    }
}
