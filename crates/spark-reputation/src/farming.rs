//! Point-farmer detection
//!
//! Flags contributors whose score is mostly decayed scouting credit: a low
//! active-to-lifetime ratio combined with an overwhelmingly scout-only
//! history.

use crate::decay::{round1, round2, round3, DecayEngine};
use crate::error::{check_fraction, RangeError};
use crate::ledger::Ledger;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use spark_document::Role;

/// Detection thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FarmingConfig {
    /// Flag when `active_cs / lifetime_cs` is below this
    pub threshold_ratio: f64,
    /// ...and the share of scout records is above this
    pub scout_share: f64,
}

impl Default for FarmingConfig {
    fn default() -> Self {
        Self {
            threshold_ratio: 0.3,
            scout_share: 0.8,
        }
    }
}

impl FarmingConfig {
    /// Set active ratio threshold
    #[inline]
    #[must_use]
    pub fn with_threshold_ratio(mut self, ratio: f64) -> Self {
        self.threshold_ratio = ratio;
        self
    }

    /// Set scout share threshold
    #[inline]
    #[must_use]
    pub fn with_scout_share(mut self, share: f64) -> Self {
        self.scout_share = share;
        self
    }

    /// Check that both thresholds are in `0..=1`
    ///
    /// # Errors
    ///
    /// Returns [`RangeError`] for the first out-of-range field.
    pub fn validate(&self) -> Result<(), RangeError> {
        check_fraction("farming.threshold_ratio", self.threshold_ratio)?;
        check_fraction("farming.scout_share", self.scout_share)
    }
}

/// A flagged contributor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FarmerFlag {
    /// Contributor identifier
    pub username: String,
    /// `active_cs / lifetime_cs`
    #[serde(serialize_with = "round3")]
    pub active_ratio: f64,
    /// Percentage of records that are scout records
    #[serde(serialize_with = "round1")]
    pub scout_percentage: f64,
    /// Number of records
    pub total_contributions: usize,
    /// Active score
    #[serde(serialize_with = "round2")]
    pub active_cs: f64,
    /// Lifetime score
    #[serde(serialize_with = "round2")]
    pub lifetime_cs: f64,
}

/// Point-farmer detector
#[derive(Debug, Clone, Copy, Default)]
pub struct FarmingDetector {
    config: FarmingConfig,
    engine: DecayEngine,
}

impl FarmingDetector {
    /// Create detector with default thresholds
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set thresholds
    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: FarmingConfig) -> Self {
        self.config = config;
        self
    }

    /// Set decay engine used to compute active scores
    #[inline]
    #[must_use]
    pub fn with_engine(mut self, engine: DecayEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Active thresholds
    #[inline]
    #[must_use]
    pub fn config(&self) -> &FarmingConfig {
        &self.config
    }

    /// Flagged contributors, in ledger order
    ///
    /// Contributors with a zero lifetime score are skipped.
    #[must_use]
    pub fn detect(&self, ledger: &Ledger, as_of: NaiveDate) -> Vec<FarmerFlag> {
        let mut flagged = Vec::new();

        for (username, records) in ledger.contributors() {
            let score = self.engine.score_contributor(username, records, as_of);
            let Some(ratio) = score.active_ratio() else {
                continue;
            };

            let scouts = records.iter().filter(|r| r.role == Role::Scout).count();
            #[allow(clippy::cast_precision_loss)]
            let scout_share = scouts as f64 / records.len().max(1) as f64;

            if ratio < self.config.threshold_ratio && scout_share > self.config.scout_share {
                tracing::warn!(
                    username,
                    active_ratio = ratio,
                    scout_share,
                    "possible point farmer"
                );
                flagged.push(FarmerFlag {
                    username: username.to_string(),
                    active_ratio: ratio,
                    scout_percentage: scout_share * 100.0,
                    total_contributions: records.len(),
                    active_cs: score.active_cs,
                    lifetime_cs: score.lifetime_cs,
                });
            }
        }

        flagged
    }
}
