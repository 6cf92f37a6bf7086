//! Command behaviour against files on disk

use pretty_assertions::assert_eq;
use spark_cli::{commands, source, ScribeConfig, ScribeError};
use spark_test_utils::{date, ledger_json, ENHANCED_THIN, GREEN_LEGACY, SPARK_ONLY};
use std::path::PathBuf;
use tempfile::TempDir;

fn write_docs(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, text) in files {
        std::fs::write(dir.path().join(name), text).unwrap();
    }
    dir
}

#[test]
fn directory_audit_keeps_path_order() {
    let dir = write_docs(&[
        ("c-thin.md", ENHANCED_THIN),
        ("a-green.md", GREEN_LEGACY),
        ("b-spark.md", SPARK_ONLY),
        ("ignored.txt", GREEN_LEGACY),
    ]);
    let paths = source::markdown_files(dir.path()).unwrap();
    let outcome = commands::audit(&ScribeConfig::default().scribe(), &paths).unwrap();

    let statuses: Vec<_> = outcome
        .files
        .iter()
        .map(|file| file.report.status.as_str())
        .collect();
    assert_eq!(statuses, vec!["GREEN", "YELLOW", "RED"]);
    assert!(!outcome.all_valid());

    let json: serde_json::Value = serde_json::from_str(&outcome.to_json().unwrap()).unwrap();
    assert_eq!(json[0]["name"], "Neural Lego Bricks");
    assert_eq!(json[2]["report"]["status"], "RED");

    let text = outcome.to_text();
    assert!(text.contains("Stability Report: Neural Lego Bricks"));
}

#[test]
fn valid_documents_pass_audit() {
    let dir = write_docs(&[("green.md", GREEN_LEGACY), ("spark.md", SPARK_ONLY)]);
    let paths = source::markdown_files(dir.path()).unwrap();
    let outcome = commands::audit(&ScribeConfig::default().scribe(), &paths).unwrap();
    assert!(outcome.all_valid());
}

#[test]
fn unreadable_file_fails_the_batch() {
    let dir = write_docs(&[("green.md", GREEN_LEGACY)]);
    let paths = vec![dir.path().join("green.md"), PathBuf::from("/nonexistent/spark.md")];
    let error = commands::audit(&ScribeConfig::default().scribe(), &paths).unwrap_err();
    assert!(matches!(error, ScribeError::InputUnreadable { .. }));
}

#[test]
fn evaluate_prints_envelope() {
    let dir = write_docs(&[("green.md", GREEN_LEGACY)]);
    let json = commands::evaluate(
        &ScribeConfig::default().scribe(),
        &dir.path().join("green.md"),
        true,
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["audit"]["recommendation"], "Final Lock");
    assert_eq!(value["merit_plan"].as_array().unwrap().len(), 3);
}

#[test]
fn config_file_changes_rewards() {
    let dir = write_docs(&[("scribe.toml", "[merit]\nbuilder = 30\n"), ("green.md", GREEN_LEGACY)]);
    let config = ScribeConfig::load(Some(&dir.path().join("scribe.toml"))).unwrap();
    let json = commands::evaluate(&config.scribe(), &dir.path().join("green.md"), false).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["merit_plan"][2]["reward"], "+30 CS (+10 Prototype bonus)");
}

#[test]
fn bad_config_is_reported_with_path() {
    let dir = write_docs(&[("scribe.toml", "[merit\n")]);
    let error = ScribeConfig::load(Some(&dir.path().join("scribe.toml"))).unwrap_err();
    assert!(matches!(error, ScribeError::Config { .. }));
    assert!(error.to_string().contains("scribe.toml"));
}

#[test]
fn out_of_range_config_is_reported_with_field() {
    let dir = write_docs(&[("scribe.toml", "[decay]\nmonthly_retention = 1.5\n")]);
    let error = ScribeConfig::load(Some(&dir.path().join("scribe.toml"))).unwrap_err();
    assert!(matches!(error, ScribeError::Config { .. }));
    let message = error.to_string();
    assert!(message.contains("scribe.toml"));
    assert!(message.contains("decay.monthly_retention must be between 0 and 1, got 1.5"));
}

#[test]
fn reputation_report_lists_scores_flags_and_skips() {
    let ledger = ledger_json(&[
        ("@devon", &[("2025-12-01", "builder", 25.0)]),
        (
            "@farmer",
            &[
                ("2024-01-01", "scout", 5.0),
                ("2024-02-01", "scout", 5.0),
                ("2024-03-01", "oracle", 5.0),
            ],
        ),
    ]);
    let dir = write_docs(&[("ledger.json", &ledger)]);
    let load = source::read_ledger(&dir.path().join("ledger.json")).unwrap();

    let report =
        commands::reputation(&ScribeConfig::default(), &load, date(2026, 1, 1), None).unwrap();
    assert_eq!(report.scores[0].username, "@devon");
    assert_eq!(report.flagged.len(), 1);
    assert_eq!(report.flagged[0].username, "@farmer");
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].contributor.as_deref(), Some("@farmer"));
    assert_eq!(report.skipped[0].index, 2);

    let output = dir.path().join("scores.json");
    let json = serde_json::to_string_pretty(&report).unwrap();
    source::write_output(Some(&output), &json).unwrap();
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written["as_of"], "2026-01-01");
    assert_eq!(written["scores"][0]["last_calculated"], "2026-01-01");
}

#[test]
fn lenient_threshold_clears_flags() {
    let ledger = ledger_json(&[("@farmer", &[("2024-01-01", "scout", 5.0)])]);
    let load = spark_reputation::Ledger::from_json_str(&ledger).unwrap();
    let as_of = date(2026, 1, 1);

    let strict = commands::reputation(&ScribeConfig::default(), &load, as_of, None).unwrap();
    assert_eq!(strict.flagged.len(), 1);
    let lenient = commands::reputation(&ScribeConfig::default(), &load, as_of, Some(0.0)).unwrap();
    assert!(lenient.flagged.is_empty());
}

#[test]
fn malformed_ledger_is_an_error() {
    let dir = write_docs(&[("ledger.json", "{\"oops\": true")]);
    let error = source::read_ledger(&dir.path().join("ledger.json")).unwrap_err();
    assert!(matches!(error, ScribeError::Ledger(_)));
}
