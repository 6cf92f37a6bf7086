//! Built-in demonstration ledger
//!
//! Five contributors with distinct histories, scored at a fixed date:
//! a scout whose credit is locked in by later design work, two scout-only
//! accounts, a builder, and a designer who scouted afterwards.

use crate::decay::{ContributorScore, DecayEngine};
use crate::error::LedgerError;
use crate::farming::{FarmerFlag, FarmingConfig, FarmingDetector};
use crate::ledger::{parse_date, Ledger};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write as _;

/// Sample ledger JSON
pub const SAMPLE_LEDGER_JSON: &str = r#"[
  {
    "username": "@IntuitionIvan",
    "contributions": [
      {"date": "2025-11-15", "role": "scout", "cs": 5},
      {"date": "2025-12-01", "role": "scout", "cs": 5},
      {"date": "2026-01-10", "role": "designer", "cs": 15}
    ]
  },
  {
    "username": "@PointFarmer01",
    "contributions": [
      {"date": "2025-11-01", "role": "scout", "cs": 5},
      {"date": "2025-11-05", "role": "scout", "cs": 5},
      {"date": "2025-11-10", "role": "scout", "cs": 5},
      {"date": "2025-11-15", "role": "scout", "cs": 5},
      {"date": "2025-11-20", "role": "scout", "cs": 5}
    ]
  },
  {
    "username": "@DevDevon",
    "contributions": [
      {"date": "2025-12-01", "role": "builder", "cs": 25},
      {"date": "2026-01-15", "role": "builder", "cs": 35}
    ]
  },
  {
    "username": "@Bot-Hunter",
    "contributions": [
      {"date": "2025-11-01", "role": "scout", "cs": 5},
      {"date": "2025-11-02", "role": "scout", "cs": 5},
      {"date": "2025-11-03", "role": "scout", "cs": 5},
      {"date": "2025-11-04", "role": "scout", "cs": 5},
      {"date": "2025-11-05", "role": "scout", "cs": 5},
      {"date": "2025-11-06", "role": "scout", "cs": 5}
    ]
  },
  {
    "username": "@CreativeClara",
    "contributions": [
      {"date": "2025-12-10", "role": "designer", "cs": 20},
      {"date": "2026-01-20", "role": "scout", "cs": 5}
    ]
  }
]"#;

/// Evaluation date of the sample
pub const SIMULATION_DATE: &str = "2026-02-19";

/// Farming threshold used by the sample
pub const SIMULATION_THRESHOLD: f64 = 0.4;

/// Active score at or above which a contributor is listed as active
pub const ACTIVE_STATUS_CS: f64 = 20.0;

/// Scores and flags for a ledger at one date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    /// Evaluation date
    pub as_of: NaiveDate,
    /// Scores, highest active first
    pub scores: Vec<ContributorScore>,
    /// Flagged contributors
    pub flagged: Vec<FarmerFlag>,
}

impl SimulationReport {
    /// Score a ledger and run farmer detection
    #[must_use]
    pub fn build(ledger: &Ledger, as_of: NaiveDate, engine: DecayEngine, farming: FarmingConfig) -> Self {
        let detector = FarmingDetector::new().with_engine(engine).with_config(farming);
        Self {
            as_of,
            scores: engine.score_ledger(ledger, as_of),
            flagged: detector.detect(ledger, as_of),
        }
    }

    /// Plain-text tables
    #[must_use]
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Reputation as of {}", self.as_of);
        let _ = writeln!(
            out,
            "{:<20} {:>12} {:>10} {:>14}  Status",
            "Username", "Lifetime CS", "Active CS", "Voting Weight"
        );
        let _ = writeln!(out, "{}", "-".repeat(72));
        for score in &self.scores {
            let status = if score.active_cs >= ACTIVE_STATUS_CS {
                "Active"
            } else {
                "Low Influence"
            };
            let _ = writeln!(
                out,
                "{:<20} {:>12.2} {:>10.2} {:>14.4}  {status}",
                score.username, score.lifetime_cs, score.active_cs, score.voting_weight
            );
        }

        out.push('\n');
        if self.flagged.is_empty() {
            out.push_str("No suspicious accounts detected.\n");
        } else {
            let _ = writeln!(out, "Potential point farmers:");
            let _ = writeln!(out, "{:<20} {:>12} {:>8}", "Username", "Active Ratio", "Scout %");
            for flag in &self.flagged {
                let _ = writeln!(
                    out,
                    "{:<20} {:>12.3} {:>7.1}%",
                    flag.username, flag.active_ratio, flag.scout_percentage
                );
            }
        }
        out
    }
}

/// Run the sample at its fixed date and threshold
///
/// # Errors
///
/// Only fails if the embedded sample itself is invalid.
pub fn run() -> Result<SimulationReport, LedgerError> {
    run_at(parse_date(SIMULATION_DATE)?)
}

/// Run the sample at another date
///
/// # Errors
///
/// Only fails if the embedded sample itself is invalid.
pub fn run_at(as_of: NaiveDate) -> Result<SimulationReport, LedgerError> {
    let load = Ledger::from_json_str(SAMPLE_LEDGER_JSON)?;
    Ok(SimulationReport::build(
        &load.ledger,
        as_of,
        DecayEngine::new(),
        FarmingConfig::default().with_threshold_ratio(SIMULATION_THRESHOLD),
    ))
}
