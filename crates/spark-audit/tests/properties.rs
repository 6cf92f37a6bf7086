//! Property tests for auditing, novelty and merit computation

use proptest::prelude::*;
use spark_audit::{AuditStatus, Auditor, GovernanceAdvisor, NoveltyScorer, PhaseAuditor, Scribe};
use spark_document::SparkParser;

/// Legacy document with each phase optionally present and optionally complete
fn legacy_document(phases: [(bool, bool); 3]) -> String {
    let mut text = String::from("# Spark: Generated\n\n");
    let [(spark, _), (design, design_full), (logic, logic_full)] = phases;

    if spark {
        text.push_str("## Phase 1: The Intuition (!HUNCH)\n*Scout: @scout*\n* **The Gap:** g\n\n");
    }
    if design {
        text.push_str("## Phase 2: The Imagination (!SHAPE)\n*Designer: @designer*\n* **The Blueprint:** b\n");
        if design_full {
            text.push_str("* **The Interface:** i\n");
        }
        text.push('\n');
    }
    if logic {
        text.push_str("## Phase 3: The Logic (!BUILD)\n*Builder: @builder*\n* **Technical Implementation:** t\n");
        if logic_full {
            text.push_str("* **Clutch Power Test:** c\n");
        }
    }
    text
}

fn phase_flags() -> impl Strategy<Value = [(bool, bool); 3]> {
    prop::array::uniform3((any::<bool>(), any::<bool>()))
}

proptest! {
    #[test]
    fn prop_status_tracks_completion(phases in phase_flags()) {
        let doc = SparkParser::new().parse(&legacy_document(phases));
        let report = PhaseAuditor::new().audit(&doc);

        prop_assert_eq!(report.status == AuditStatus::Red, report.completion_level == 0);
        prop_assert_eq!(report.status == AuditStatus::Green, report.completion_level == 3);
        if (1..=2).contains(&report.completion_level) {
            prop_assert_eq!(report.status, AuditStatus::Yellow);
        }

        let expected = u8::from(phases[0].0)
            + u8::from(phases[1].0 && phases[1].1)
            + u8::from(phases[2].0 && phases[2].1);
        prop_assert_eq!(report.completion_level, expected);
    }

    #[test]
    fn prop_novelty_in_range(text in "\\PC{0,600}", document in "\\PC{0,300}") {
        let score = NoveltyScorer::new().score(&text, &document);
        prop_assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn prop_novelty_in_range_for_any_source(source in "\\PC{0,600}") {
        let (_, report) = Scribe::new().audit(&source);
        if let Some(score) = report.novelty_score {
            prop_assert!((0.0..=100.0).contains(&score));
        }
    }

    #[test]
    fn prop_merit_is_idempotent(phases in phase_flags()) {
        let doc = SparkParser::new().parse(&legacy_document(phases));
        let report = PhaseAuditor::new().audit(&doc);
        let advisor = GovernanceAdvisor::new();

        prop_assert_eq!(advisor.merit_plan(&report), advisor.merit_plan(&report));
        prop_assert_eq!(advisor.advise(&report), advisor.advise(&report));
    }

    #[test]
    fn prop_evaluation_is_deterministic(phases in phase_flags()) {
        let text = legacy_document(phases);
        let scribe = Scribe::new();
        prop_assert_eq!(scribe.evaluate(&text), scribe.evaluate(&text));
    }
}
