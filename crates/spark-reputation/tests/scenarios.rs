//! Ledger scoring, farmer detection and the sample simulation

use pretty_assertions::assert_eq;
use serde_json::json;
use spark_reputation::{simulation, DecayEngine, FarmingDetector, Ledger};
use spark_test_utils::{date, ledger_json};

#[test]
fn decayed_scout_only_history_is_flagged() {
    let json = ledger_json(&[
        (
            "@farmer",
            &[
                ("2025-01-01", "scout", 5.0),
                ("2025-03-01", "scout", 5.0),
                ("2025-05-01", "scout", 5.0),
                ("2025-07-01", "scout", 5.0),
                ("2025-09-01", "scout", 5.0),
            ],
        ),
        ("@designer", &[("2025-01-01", "designer", 25.0)]),
    ]);
    let ledger = Ledger::from_json_str(&json).unwrap().ledger;

    let flagged = FarmingDetector::new().detect(&ledger, date(2027, 1, 1));
    assert_eq!(flagged.len(), 1);

    let flag = &flagged[0];
    assert_eq!(flag.username, "@farmer");
    assert_eq!(flag.lifetime_cs, 25.0);
    assert!(flag.active_ratio < 0.3);
    assert_eq!(flag.scout_percentage, 100.0);
    assert_eq!(flag.total_contributions, 5);
}

#[test]
fn flag_serialization_rounds() {
    let json = ledger_json(&[("@f", &[("2024-01-01", "scout", 5.0), ("2024-02-01", "scout", 5.0)])]);
    let ledger = Ledger::from_json_str(&json).unwrap().ledger;
    let flagged = FarmingDetector::new().detect(&ledger, date(2026, 1, 1));
    let value = serde_json::to_value(&flagged[0]).unwrap();

    // months 24 and 23: 5 * (0.9^24 + 0.9^23) = 0.8420
    assert_eq!(value["active_ratio"], json!(0.084));
    assert_eq!(value["scout_percentage"], json!(100.0));
    assert_eq!(value["lifetime_cs"], json!(10.0));
    assert_eq!(value["active_cs"], json!(0.84));
}

#[test]
fn ledger_output_shape() {
    let json = ledger_json(&[
        ("@ivan", &[("2025-11-15", "scout", 5.0), ("2026-01-10", "designer", 15.0)]),
        ("@ghost", &[("not-a-date", "scout", 5.0)]),
    ]);
    let load = Ledger::from_json_str(&json).unwrap();
    assert_eq!(load.warnings.len(), 1);

    let scores = DecayEngine::new().score_ledger(&load.ledger, date(2026, 2, 19));
    let value = serde_json::to_value(&scores).unwrap();
    assert_eq!(
        value,
        json!([
            {
                "username": "@ivan",
                "lifetime_cs": 20.0,
                "active_cs": 20.0,
                "voting_weight": 1.301,
                "last_calculated": "2026-02-19"
            },
            {
                "username": "@ghost",
                "lifetime_cs": 0.0,
                "active_cs": 0.0,
                "voting_weight": 0.0,
                "last_calculated": "2026-02-19"
            }
        ])
    );
}

#[test]
fn simulation_scores_in_active_order() {
    let report = simulation::run().unwrap();
    assert_eq!(report.as_of, date(2026, 2, 19));

    let expected = [
        ("@DevDevon", 60.0),
        ("@IntuitionIvan", 25.0),
        ("@CreativeClara", 24.5),
        ("@Bot-Hunter", 21.87),
        ("@PointFarmer01", 18.225),
    ];
    assert_eq!(report.scores.len(), expected.len());
    for (score, (name, active)) in report.scores.iter().zip(expected) {
        assert_eq!(score.username, name);
        assert!((score.active_cs - active).abs() < 1e-9, "{name}: {}", score.active_cs);
    }

    // three months of decay leaves the scout-only accounts above the 0.4 ratio
    assert!(report.flagged.is_empty());
    assert!(report.render_table().contains("No suspicious accounts detected."));
}

#[test]
fn simulation_flags_scout_only_accounts_a_year_later() {
    let report = simulation::run_at(date(2027, 2, 19)).unwrap();
    let names: Vec<_> = report.flagged.iter().map(|flag| flag.username.as_str()).collect();
    assert_eq!(names, vec!["@PointFarmer01", "@Bot-Hunter"]);

    let table = report.render_table();
    assert!(table.contains("Potential point farmers:"));
    assert!(table.contains("@Bot-Hunter"));
}

#[test]
fn simulation_table_marks_influence() {
    let table = simulation::run().unwrap().render_table();
    let line = |name: &str| {
        table
            .lines()
            .find(|line| line.starts_with(name))
            .unwrap()
            .to_string()
    };
    assert!(line("@DevDevon").ends_with("Active"));
    assert!(line("@PointFarmer01").ends_with("Low Influence"));
    assert!(line("@IntuitionIvan").contains("1.3979"));
}
