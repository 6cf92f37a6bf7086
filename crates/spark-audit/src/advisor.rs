//! Governance advisory
//!
//! Maps an [`AuditReport`] to a lock recommendation and a merit plan. The
//! advisor reads only the report, so identical reports always produce
//! identical advisories.

use crate::report::{AuditReport, AuditStatus};
use serde::{Deserialize, Serialize};
use spark_document::Role;
use std::fmt;

/// Recommended governance action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    /// Ready to lock and merge
    #[serde(rename = "Final Lock")]
    FinalLock,
    /// Ask contributors to refine
    #[serde(rename = "Request Refinement")]
    RequestRefinement,
    /// Reject until critical flaws are resolved
    #[serde(rename = "Reject")]
    Reject,
}

impl Recommendation {
    /// Wire spelling
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FinalLock => "Final Lock",
            Self::RequestRefinement => "Request Refinement",
            Self::Reject => "Reject",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Confidence in the recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Fully stable document
    High,
    /// Partially stable document
    Medium,
    /// Unstable document
    Low,
}

/// Bonus reward kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BonusKind {
    /// Designer bonus for a stable design in a fully stable document
    Echo,
    /// Builder bonus for a fully stable document
    Prototype,
}

impl BonusKind {
    /// Display name
    #[inline]
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Echo => "Echo",
            Self::Prototype => "Prototype",
        }
    }
}

/// Contribution-score rewards per role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeritSchedule {
    /// Scout base reward
    pub scout: u32,
    /// Designer base reward
    pub designer: u32,
    /// Designer echo bonus
    pub echo_bonus: u32,
    /// Builder base reward
    pub builder: u32,
    /// Builder prototype bonus
    pub prototype_bonus: u32,
}

impl Default for MeritSchedule {
    fn default() -> Self {
        Self {
            scout: 5,
            designer: 15,
            echo_bonus: 5,
            builder: 25,
            prototype_bonus: 10,
        }
    }
}

impl MeritSchedule {
    /// Set scout reward
    #[inline]
    #[must_use]
    pub fn with_scout(mut self, reward: u32) -> Self {
        self.scout = reward;
        self
    }

    /// Set designer reward and echo bonus
    #[inline]
    #[must_use]
    pub fn with_designer(mut self, reward: u32, echo_bonus: u32) -> Self {
        self.designer = reward;
        self.echo_bonus = echo_bonus;
        self
    }

    /// Set builder reward and prototype bonus
    #[inline]
    #[must_use]
    pub fn with_builder(mut self, reward: u32, prototype_bonus: u32) -> Self {
        self.builder = reward;
        self.prototype_bonus = prototype_bonus;
        self
    }
}

/// Reward for one contributor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeritEntry {
    /// Handle without `@`
    pub handle: String,
    /// Role credited
    pub role: Role,
    /// Base contribution score
    pub base_reward: u32,
    /// Bonus contribution score (0 when no bonus applies)
    pub bonus_reward: u32,
    /// Which bonus applied, if any
    pub bonus: Option<BonusKind>,
}

impl MeritEntry {
    /// Display string, e.g. `+15 CS (+5 Echo bonus)`
    #[must_use]
    pub fn reward_label(&self) -> String {
        match self.bonus {
            Some(kind) if self.bonus_reward > 0 => format!(
                "+{} CS (+{} {} bonus)",
                self.base_reward,
                self.bonus_reward,
                kind.title()
            ),
            _ => format!("+{} CS", self.base_reward),
        }
    }

    /// Base plus bonus
    #[inline]
    #[must_use]
    pub fn total(&self) -> u32 {
        self.base_reward + self.bonus_reward
    }
}

/// Advisor output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    /// Recommended action
    pub recommendation: Recommendation,
    /// Confidence level
    pub confidence: Confidence,
    /// Rewards, in role order; roles without a handle are omitted
    pub merit_plan: Vec<MeritEntry>,
    /// Governance notes
    pub notes: String,
}

/// Governance advisor
#[derive(Debug, Clone, Copy, Default)]
pub struct GovernanceAdvisor {
    schedule: MeritSchedule,
}

impl GovernanceAdvisor {
    /// Create advisor with the default schedule
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set merit schedule
    #[inline]
    #[must_use]
    pub fn with_schedule(mut self, schedule: MeritSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Active merit schedule
    #[inline]
    #[must_use]
    pub fn schedule(&self) -> &MeritSchedule {
        &self.schedule
    }

    /// Advise on an audit report
    #[must_use]
    pub fn advise(&self, report: &AuditReport) -> Advisory {
        let (recommendation, confidence) = match report.status {
            AuditStatus::Green => (Recommendation::FinalLock, Confidence::High),
            AuditStatus::Yellow => (Recommendation::RequestRefinement, Confidence::Medium),
            AuditStatus::Red => (Recommendation::Reject, Confidence::Low),
        };

        Advisory {
            recommendation,
            confidence,
            merit_plan: self.merit_plan(report),
            notes: notes(report.status).to_string(),
        }
    }

    /// Merit plan for a report
    #[must_use]
    pub fn merit_plan(&self, report: &AuditReport) -> Vec<MeritEntry> {
        let s = &self.schedule;
        let green = report.status == AuditStatus::Green;
        let mut plan = Vec::new();

        for stage in &report.stages {
            let Some(handle) = stage.handle.clone() else {
                continue;
            };
            let entry = match stage.role {
                Role::Scout if stage.stable => Some((s.scout, None)),
                Role::Scout => None,
                Role::Designer => Some((
                    s.designer,
                    (stage.stable && green).then_some((s.echo_bonus, BonusKind::Echo)),
                )),
                Role::Builder => Some((
                    s.builder,
                    green.then_some((s.prototype_bonus, BonusKind::Prototype)),
                )),
            };

            if let Some((base_reward, bonus)) = entry {
                plan.push(MeritEntry {
                    handle,
                    role: stage.role,
                    base_reward,
                    bonus_reward: bonus.map_or(0, |(reward, _)| reward),
                    bonus: bonus.map(|(_, kind)| kind),
                });
            }
        }

        plan
    }
}

/// Fixed governance notes per status
#[must_use]
pub fn notes(status: AuditStatus) -> &'static str {
    match status {
        AuditStatus::Green => {
            "Meets all Meritocratic Standards. Ready for Final Lock and community integration."
        }
        AuditStatus::Yellow => {
            "Shows promise but requires refinement before merge. Request contributors address feedback."
        }
        AuditStatus::Red => {
            "Does not meet Meritocratic Standards. Recommend rejection until critical flaws are resolved."
        }
    }
}
