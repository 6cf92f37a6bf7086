//! Time-decayed contribution scores
//!
//! Lifetime CS is the plain sum of every record. Active CS discounts scout
//! records by a fixed retention factor per elapsed calendar month, unless the
//! same contributor later did designer or builder work, which locks the
//! scouting credit in at full value. Higher-tier records never decay.

use crate::error::{check_fraction, RangeError};
use crate::ledger::{ContributionRecord, Ledger};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize, Serializer};

/// Decay parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// Fraction of a scout record's value kept per elapsed month
    pub monthly_retention: f64,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            monthly_retention: 0.9,
        }
    }
}

impl DecayConfig {
    /// Set monthly retention
    #[inline]
    #[must_use]
    pub fn with_monthly_retention(mut self, retention: f64) -> Self {
        self.monthly_retention = retention;
        self
    }

    /// Check that retention is in `0..=1`, which keeps `active_cs <= lifetime_cs`
    ///
    /// # Errors
    ///
    /// Returns [`RangeError`] for `monthly_retention`.
    pub fn validate(&self) -> Result<(), RangeError> {
        check_fraction("decay.monthly_retention", self.monthly_retention)
    }
}

/// Whole calendar months from `from` to `to`, never negative
///
/// Day of month is ignored: 2025-11-30 to 2025-12-01 is one month.
#[must_use]
pub fn months_elapsed(from: NaiveDate, to: NaiveDate) -> u32 {
    let months = 12 * (i64::from(to.year()) - i64::from(from.year()))
        + (i64::from(to.month()) - i64::from(from.month()));
    u32::try_from(months.max(0)).unwrap_or(u32::MAX)
}

/// `log10(active_cs)`, or 0 when there is no active score
#[must_use]
pub fn voting_weight(active_cs: f64) -> f64 {
    if active_cs > 0.0 {
        active_cs.log10()
    } else {
        0.0
    }
}

/// Scores for one contributor
///
/// Values keep full precision in memory and are rounded when serialized
/// (CS to 2 decimals, voting weight to 4).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributorScore {
    /// Contributor identifier
    pub username: String,
    /// Undecayed sum of all records
    #[serde(serialize_with = "round2")]
    pub lifetime_cs: f64,
    /// Sum after decay
    #[serde(serialize_with = "round2")]
    pub active_cs: f64,
    /// Logarithmic voting weight
    #[serde(serialize_with = "round4")]
    pub voting_weight: f64,
    /// Evaluation date
    #[serde(rename = "last_calculated")]
    pub as_of: NaiveDate,
}

impl ContributorScore {
    /// `active_cs / lifetime_cs`, or `None` for a zero lifetime score
    #[must_use]
    pub fn active_ratio(&self) -> Option<f64> {
        (self.lifetime_cs > 0.0).then(|| self.active_cs / self.lifetime_cs)
    }
}

/// Decay engine
#[derive(Debug, Clone, Copy, Default)]
pub struct DecayEngine {
    config: DecayConfig,
}

impl DecayEngine {
    /// Create engine with default retention
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    #[inline]
    #[must_use]
    pub fn with_config(mut self, config: DecayConfig) -> Self {
        self.config = config;
        self
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &DecayConfig {
        &self.config
    }

    /// Active value of one record given the contributor's full history
    #[must_use]
    pub fn record_value(
        &self,
        record: &ContributionRecord,
        history: &[ContributionRecord],
        as_of: NaiveDate,
    ) -> f64 {
        if record.role.is_higher_tier() {
            return record.cs_earned;
        }

        let locked_in = history
            .iter()
            .any(|other| other.role.is_higher_tier() && other.date > record.date);
        if locked_in {
            return record.cs_earned;
        }

        let months = months_elapsed(record.date, as_of);
        let exponent = i32::try_from(months).unwrap_or(i32::MAX);
        record.cs_earned * self.config.monthly_retention.powi(exponent)
    }

    /// Score one contributor's records
    #[must_use]
    pub fn score_contributor(
        &self,
        username: &str,
        records: &[ContributionRecord],
        as_of: NaiveDate,
    ) -> ContributorScore {
        let lifetime_cs: f64 = records.iter().map(|record| record.cs_earned).sum();
        let active_cs: f64 = records
            .iter()
            .map(|record| self.record_value(record, records, as_of))
            .sum();

        ContributorScore {
            username: username.to_string(),
            lifetime_cs,
            active_cs,
            voting_weight: voting_weight(active_cs),
            as_of,
        }
    }

    /// Score every contributor, highest active score first
    ///
    /// Ties keep ledger order.
    #[must_use]
    pub fn score_ledger(&self, ledger: &Ledger, as_of: NaiveDate) -> Vec<ContributorScore> {
        let mut scores: Vec<_> = ledger
            .contributors()
            .map(|(username, records)| self.score_contributor(username, records, as_of))
            .collect();
        scores.sort_by(|a, b| b.active_cs.total_cmp(&a.active_cs));

        tracing::info!(contributors = scores.len(), %as_of, "ledger scored");
        scores
    }

    /// Group flat records by contributor and score them
    #[must_use]
    pub fn score_all(&self, records: &[ContributionRecord], as_of: NaiveDate) -> Vec<ContributorScore> {
        self.score_ledger(&Ledger::from_records(records.iter().cloned()), as_of)
    }
}

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

pub(crate) fn round1<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to(*value, 1))
}

pub(crate) fn round2<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to(*value, 2))
}

pub(crate) fn round3<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to(*value, 3))
}

fn round4<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_to(*value, 4))
}
