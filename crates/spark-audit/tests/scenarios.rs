//! End-to-end evaluation scenarios over fixture documents

use pretty_assertions::assert_eq;
use spark_audit::{AuditStatus, BonusKind, Confidence, Recommendation, Scribe};
use spark_document::Role;
use spark_test_utils::{
    DESIGN_GAP, ENHANCED_FULL, ENHANCED_THIN, FULL_LEGACY, GREEN_LEGACY, LOGIC_ONLY, NO_HANDLES,
    SPARK_ONLY,
};

#[test]
fn spark_only_earns_scout_credit() {
    let evaluation = Scribe::new().evaluate(SPARK_ONLY);
    assert_eq!(evaluation.report.completion_level, 1);
    assert_eq!(evaluation.report.status, AuditStatus::Yellow);
    assert_eq!(evaluation.advisory.recommendation, Recommendation::RequestRefinement);
    assert_eq!(evaluation.advisory.confidence, Confidence::Medium);

    let plan = &evaluation.advisory.merit_plan;
    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].role, Role::Scout);
    assert_eq!(plan[0].handle, "IntuitionIvan");
    assert_eq!(plan[0].reward_label(), "+5 CS");
}

#[test]
fn fully_stable_document_is_locked_with_bonuses() {
    let evaluation = Scribe::new().evaluate(GREEN_LEGACY);
    let report = &evaluation.report;
    assert_eq!(report.status, AuditStatus::Green);
    assert!(report.novelty_score.is_some_and(|score| score >= 60.0));
    assert!(report.critical_flaws.is_empty());
    assert!(report.recommendations.is_empty());

    let advisory = &evaluation.advisory;
    assert_eq!(advisory.recommendation, Recommendation::FinalLock);
    assert_eq!(advisory.confidence, Confidence::High);

    let labels: Vec<String> = advisory
        .merit_plan
        .iter()
        .map(|entry| format!("@{} {}", entry.handle, entry.reward_label()))
        .collect();
    assert_eq!(
        labels,
        vec![
            "@IntuitionIvan +5 CS",
            "@CreativeClara +15 CS (+5 Echo bonus)",
            "@DevDevon +25 CS (+10 Prototype bonus)",
        ]
    );
    assert_eq!(advisory.merit_plan[1].bonus, Some(BonusKind::Echo));
}

#[test]
fn full_legacy_example_is_green() {
    let evaluation = Scribe::new().evaluate(FULL_LEGACY);
    assert_eq!(evaluation.report.status, AuditStatus::Green);
    assert_eq!(evaluation.advisory.merit_plan.len(), 3);
    assert!(evaluation.report.checks.interface_snappable);
    assert!(evaluation.report.checks.logic_testable);
}

#[test]
fn orphan_logic_flags_foundational_phases() {
    let evaluation = Scribe::new().evaluate(LOGIC_ONLY);
    let report = &evaluation.report;
    assert_eq!(report.status, AuditStatus::Yellow);
    assert_eq!(
        report.critical_flaws,
        vec![
            "Missing foundational phase: Phase 1 (Spark)",
            "Missing foundational phase: Phase 2 (Design)",
        ]
    );
    assert_eq!(
        report.recommendations[0],
        "Complete the next phase: Phase 1 (Spark)"
    );

    let plan = &evaluation.advisory.merit_plan;
    assert_eq!(plan.len(), 1);
    assert_eq!(plan[0].reward_label(), "+25 CS");
}

#[test]
fn claimed_but_incomplete_design_warns() {
    let evaluation = Scribe::new().evaluate(DESIGN_GAP);
    let report = &evaluation.report;
    assert_eq!(report.completion_level, 2);
    assert_eq!(
        report.warnings,
        vec!["Phase 2 (Design) is incomplete (missing: The Interface)"]
    );
    assert_eq!(
        report.scribe_report(),
        "Needs refinement: Phase 2 (Design) incomplete."
    );

    // designer is credited without the echo bonus
    let designer = evaluation
        .advisory
        .merit_plan
        .iter()
        .find(|entry| entry.role == Role::Designer)
        .unwrap();
    assert_eq!(designer.reward_label(), "+15 CS");
}

#[test]
fn missing_handles_are_a_critical_flaw() {
    let evaluation = Scribe::new().evaluate(NO_HANDLES);
    assert!(evaluation
        .report
        .critical_flaws
        .contains(&"No contributor handles (@username) found.".to_string()));
    assert!(evaluation.advisory.merit_plan.is_empty());
}

#[test]
fn enhanced_document_has_no_novelty() {
    let evaluation = Scribe::new().evaluate(ENHANCED_FULL);
    assert_eq!(evaluation.report.status, AuditStatus::Green);
    assert_eq!(evaluation.report.novelty_score, None);
    assert_eq!(evaluation.advisory.recommendation, Recommendation::FinalLock);
}

#[test]
fn thin_enhanced_document_is_rejected() {
    let evaluation = Scribe::new().evaluate(ENHANCED_THIN);
    let report = &evaluation.report;
    assert_eq!(report.status, AuditStatus::Red);
    assert_eq!(report.critical_flaws.len(), 2);
    assert!(report.critical_flaws[0].starts_with("Section 1 (Spark Narrative) is too brief"));
    assert_eq!(
        report.critical_flaws[1],
        "Section 2 (Hypothesis Formalization) is missing."
    );
    assert!(!report.is_valid());
}

#[test]
fn envelope_matches_wire_shape() {
    let envelope = Scribe::new().evaluate(GREEN_LEGACY).envelope();
    let json = serde_json::to_value(&envelope).unwrap();

    assert_eq!(json["spark_info"]["id"], "neural-lego-bricks");
    assert_eq!(json["spark_info"]["stability_score"], 3);
    assert_eq!(json["audit"]["status"], "GREEN");
    assert_eq!(json["audit"]["recommendation"], "Final Lock");
    assert_eq!(json["audit"]["confidence_level"], "high");
    assert_eq!(json["audit"]["checks"]["interface_snappable"], true);
    assert_eq!(json["merit_plan"][1]["handle"], "@CreativeClara");
    assert_eq!(json["merit_plan"][1]["role"], "Designer");
    assert_eq!(json["merit_plan"][1]["reward"], "+15 CS (+5 Echo bonus)");
    assert_eq!(json["merit_plan"][2]["bonus_reward"], 10);
    assert_eq!(json["content"]["phases"]["design"]["is_stable"], true);
    assert_eq!(
        json["content"]["phases"]["logic"]["fields"]["test"],
        "Load forty community bricks and confirm every mismatch is rejected."
    );
    assert_eq!(
        json["governance_notes"],
        "Meets all Meritocratic Standards. Ready for Final Lock and community integration."
    );
}

#[test]
fn enhanced_envelope_carries_sections() {
    let json = serde_json::to_value(Scribe::new().evaluate(ENHANCED_FULL).envelope()).unwrap();
    assert_eq!(json["spark_info"]["format"], "enhanced");
    assert!(json["content"]["sections"]["2"]
        .as_str()
        .unwrap()
        .starts_with("**Hypothesis Statement**"));
    assert!(json["audit"]["novelty_score"].is_null());
}
