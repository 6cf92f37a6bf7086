//! Scribe configuration
//!
//! Loaded from an optional TOML file. Every table and field has a default,
//! so a file only needs to name what it overrides:
//!
//! ```toml
//! [merit]
//! builder = 30
//!
//! [farming]
//! threshold_ratio = 0.25
//! ```

use crate::error::{ConfigError, Result, ScribeError};
use serde::{Deserialize, Serialize};
use spark_audit::{AuditorSet, GovernanceAdvisor, MeritSchedule, Scribe, SectionAuditor, SectionThresholds};
use spark_reputation::{DecayConfig, DecayEngine, FarmingConfig, FarmingDetector};
use std::path::Path;

/// All tunable parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScribeConfig {
    /// Rewards per role
    pub merit: MeritSchedule,
    /// Enhanced-format section length thresholds
    pub sections: SectionThresholds,
    /// Reputation decay
    pub decay: DecayConfig,
    /// Point-farmer thresholds
    pub farming: FarmingConfig,
}

impl ScribeConfig {
    /// Parse and validate TOML
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] when the text does not describe a config
    /// and [`ConfigError::OutOfRange`] for a fraction outside `0..=1`.
    pub fn from_toml_str(text: &str) -> std::result::Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check decay and farming fractions
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] for the first bad field.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.decay.validate()?;
        self.farming.validate()?;
        Ok(())
    }

    /// Load from a file, or defaults when no path is given
    ///
    /// # Errors
    ///
    /// Returns [`ScribeError::InputUnreadable`] or [`ScribeError::Config`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|e| ScribeError::unreadable(path, e))?;
        let config = Self::from_toml_str(&text).map_err(|source| ScribeError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Evaluation pipeline using this config
    #[must_use]
    pub fn scribe(&self) -> Scribe {
        Scribe::new()
            .with_auditors(
                AuditorSet::new()
                    .with_section_auditor(SectionAuditor::new().with_thresholds(self.sections)),
            )
            .with_advisor(GovernanceAdvisor::new().with_schedule(self.merit))
    }

    /// Decay engine using this config
    #[must_use]
    pub fn decay_engine(&self) -> DecayEngine {
        DecayEngine::new().with_config(self.decay)
    }

    /// Farming detector using this config
    #[must_use]
    pub fn farming_detector(&self) -> FarmingDetector {
        FarmingDetector::new()
            .with_engine(self.decay_engine())
            .with_config(self.farming)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let config = ScribeConfig::from_toml_str(
            "[merit]\nbuilder = 30\n\n[farming]\nthreshold_ratio = 0.25\n",
        )
        .unwrap();
        assert_eq!(config.merit.builder, 30);
        assert_eq!(config.merit.scout, 5);
        assert_eq!(config.farming.threshold_ratio, 0.25);
        assert_eq!(config.farming.scout_share, 0.8);
        assert_eq!(config.decay, DecayConfig::default());
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(ScribeConfig::from_toml_str("").unwrap(), ScribeConfig::default());
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert!(matches!(
            ScribeConfig::from_toml_str("[merit]\nscout = \"five\"\n"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn retention_above_one_is_rejected() {
        let error = ScribeConfig::from_toml_str("[decay]\nmonthly_retention = 1.5\n").unwrap_err();
        assert!(matches!(error, ConfigError::OutOfRange(_)));
        assert!(error.to_string().contains("decay.monthly_retention"));
    }

    #[test]
    fn farming_fractions_are_range_checked() {
        assert!(ScribeConfig::from_toml_str("[farming]\nthreshold_ratio = -0.2\n").is_err());
        assert!(ScribeConfig::from_toml_str("[farming]\nscout_share = 2.0\n").is_err());
        assert!(ScribeConfig::from_toml_str("[farming]\nscout_share = 1.0\n").is_ok());
    }
}
