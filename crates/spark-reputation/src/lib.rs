//! Contributor reputation
//!
//! Turns a ledger of dated contribution records into decayed scores and
//! logarithmic voting weight, and flags accounts that look like they farm
//! low-tier points.
//!
//! # Core Operations
//!
//! - **Load**: [`Ledger::from_json_str`] validates records one at a time
//! - **Score**: [`DecayEngine`] computes lifetime and active CS
//! - **Detect**: [`FarmingDetector`] flags decayed scout-only histories
//!
//! The evaluation date is always an explicit argument; nothing here reads
//! the clock.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use spark_document::Role;
//! use spark_reputation::{ContributionRecord, DecayEngine};
//!
//! let scouted = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
//! let as_of = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
//! let records = [ContributionRecord::new("@ivan", scouted, Role::Scout, 5.0)];
//!
//! let scores = DecayEngine::new().score_all(&records, as_of);
//! assert!((scores[0].active_cs - 4.5).abs() < 1e-9);
//! assert_eq!(scores[0].lifetime_cs, 5.0);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod decay;
pub mod error;
pub mod farming;
pub mod ledger;
pub mod simulation;

pub use decay::{months_elapsed, voting_weight, ContributorScore, DecayConfig, DecayEngine};
pub use error::{check_fraction, LedgerError, LedgerWarning, RangeError};
pub use farming::{FarmerFlag, FarmingConfig, FarmingDetector};
pub use ledger::{parse_date, ContributionRecord, Ledger, LedgerLoad};
pub use simulation::SimulationReport;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
