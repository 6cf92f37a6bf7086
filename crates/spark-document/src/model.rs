//! Document model
//!
//! Defines the typed shape a raw Spark document is parsed into:
//! - Contributor roles and the ordered authorship phases they own
//! - Per-phase labeled fields with derived stability
//! - The [`SparkDocument`] container for both document formats

use crate::error::UnknownRoleError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Block labels recognised inside phase spans
pub mod labels {
    /// Phase 1 observation block
    pub const OBSERVATION: &str = "The Observation";
    /// Phase 1 gap block
    pub const GAP: &str = "The Gap";
    /// Phase 1 rationale block
    pub const WHY: &str = "The \"Why\"";
    /// Phase 2 novel core block
    pub const NOVEL_CORE: &str = "The Novel Core";
    /// Phase 2 blueprint block
    pub const BLUEPRINT: &str = "The Blueprint";
    /// Phase 2 interface block
    pub const INTERFACE: &str = "The Interface";
    /// Phase 2 prior art block
    pub const PRIOR_ART: &str = "Prior Art";
    /// Phase 3 implementation block
    pub const IMPLEMENTATION: &str = "Technical Implementation";
    /// Alternate phase 3 implementation label
    pub const IMPLEMENTATION_ALT: &str = "The Logic";
    /// Phase 3 test block
    pub const CLUTCH_TEST: &str = "Clutch Power Test";
    /// Phase 3 dependency block
    pub const DEPENDENCIES: &str = "Dependencies";
}

/// Contributor role attached to an authorship phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Spots the gap (phase 1)
    Scout,
    /// Shapes the solution (phase 2)
    Designer,
    /// Builds and tests it (phase 3)
    Builder,
}

impl Role {
    /// All roles in phase order
    pub const ALL: [Role; 3] = [Role::Scout, Role::Designer, Role::Builder];

    /// Wire spelling
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scout => "scout",
            Self::Designer => "designer",
            Self::Builder => "builder",
        }
    }

    /// Capitalised display name
    #[inline]
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Scout => "Scout",
            Self::Designer => "Designer",
            Self::Builder => "Builder",
        }
    }

    /// Designer and builder work locks in earlier scouting credit
    #[inline]
    #[must_use]
    pub fn is_higher_tier(self) -> bool {
        matches!(self, Self::Designer | Self::Builder)
    }

    /// Phase this role authors
    #[inline]
    #[must_use]
    pub fn phase(self) -> Phase {
        match self {
            Self::Scout => Phase::Spark,
            Self::Designer => Phase::Design,
            Self::Builder => Phase::Logic,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scout" => Ok(Self::Scout),
            "designer" => Ok(Self::Designer),
            "builder" => Ok(Self::Builder),
            _ => Err(UnknownRoleError(s.to_string())),
        }
    }
}

/// Ordered authorship phase of a legacy document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Phase 1: the intuition (`!HUNCH`)
    Spark,
    /// Phase 2: the imagination (`!SHAPE`)
    Design,
    /// Phase 3: the logic (`!BUILD`)
    Logic,
}

impl Phase {
    /// All phases in order
    pub const ALL: [Phase; 3] = [Phase::Spark, Phase::Design, Phase::Logic];

    /// 1-based position in the authorship order
    #[inline]
    #[must_use]
    pub fn order(self) -> u8 {
        match self {
            Self::Spark => 1,
            Self::Design => 2,
            Self::Logic => 3,
        }
    }

    /// Phase at a 1-based position
    #[must_use]
    pub fn from_order(order: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.order() == order)
    }

    /// Canonical role for contributors of this phase
    #[inline]
    #[must_use]
    pub fn role(self) -> Role {
        match self {
            Self::Spark => Role::Scout,
            Self::Design => Role::Designer,
            Self::Logic => Role::Builder,
        }
    }

    /// Label used in audit messages
    #[inline]
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Spark => "Phase 1 (Spark)",
            Self::Design => "Phase 2 (Design)",
            Self::Logic => "Phase 3 (Logic)",
        }
    }

    /// Distinctive header tag
    #[inline]
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Spark => "!HUNCH",
            Self::Design => "!SHAPE",
            Self::Logic => "!BUILD",
        }
    }

    /// Full header text written by the renderer
    #[inline]
    #[must_use]
    pub fn heading(self) -> &'static str {
        match self {
            Self::Spark => "🧠 Phase 1: The Intuition (!HUNCH)",
            Self::Design => "🎨 Phase 2: The Imagination (!SHAPE)",
            Self::Logic => "🛠️ Phase 3: The Logic (!BUILD)",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Document format tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// Three ordered phase headers
    Legacy,
    /// Eight numbered sections under a `spark_type` front matter
    Enhanced,
}

/// Phase 1 fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparkFields {
    /// What is missing or feels off
    pub observation: String,
    /// The specific problem
    pub gap: String,
    /// Why it matters
    pub rationale: String,
}

/// Phase 2 fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignFields {
    /// The differentiating delta
    pub novel_core: String,
    /// The design itself
    pub blueprint: String,
    /// How it snaps into the ecosystem
    pub interface: String,
    /// Why existing solutions fall short
    pub prior_art: String,
}

/// Phase 3 fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicFields {
    /// Implementation notes or code
    pub implementation: String,
    /// Verification ("clutch power") test
    pub test: String,
    /// Required sparks or libraries
    pub dependencies: String,
}

/// Extracted content of one legacy phase
///
/// Stability is derived from the fields on every call, so it cannot drift
/// from the content it describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum PhaseContent {
    /// Phase 1 content
    Spark(SparkFields),
    /// Phase 2 content
    Design(DesignFields),
    /// Phase 3 content
    Logic(LogicFields),
}

impl PhaseContent {
    /// Content with every field empty
    #[must_use]
    pub fn empty(phase: Phase) -> Self {
        match phase {
            Phase::Spark => Self::Spark(SparkFields::default()),
            Phase::Design => Self::Design(DesignFields::default()),
            Phase::Logic => Self::Logic(LogicFields::default()),
        }
    }

    /// Phase this content belongs to
    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            Self::Spark(_) => Phase::Spark,
            Self::Design(_) => Phase::Design,
            Self::Logic(_) => Phase::Logic,
        }
    }

    /// Whether the phase is complete enough to build on
    #[inline]
    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Labels of required fields that are still empty
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let required: Vec<(&'static str, &str)> = match self {
            // Phase 1 is stable as soon as it is present
            Self::Spark(_) => Vec::new(),
            Self::Design(d) => vec![
                (labels::BLUEPRINT, d.blueprint.as_str()),
                (labels::INTERFACE, d.interface.as_str()),
            ],
            Self::Logic(l) => vec![
                (labels::IMPLEMENTATION, l.implementation.as_str()),
                (labels::CLUTCH_TEST, l.test.as_str()),
            ],
        };
        required
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(label, _)| label)
            .collect()
    }

    /// Every field as `(label, value)` in template order
    #[must_use]
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        match self {
            Self::Spark(s) => vec![
                (labels::OBSERVATION, s.observation.as_str()),
                (labels::GAP, s.gap.as_str()),
                (labels::WHY, s.rationale.as_str()),
            ],
            Self::Design(d) => vec![
                (labels::NOVEL_CORE, d.novel_core.as_str()),
                (labels::BLUEPRINT, d.blueprint.as_str()),
                (labels::INTERFACE, d.interface.as_str()),
                (labels::PRIOR_ART, d.prior_art.as_str()),
            ],
            Self::Logic(l) => vec![
                (labels::IMPLEMENTATION, l.implementation.as_str()),
                (labels::CLUTCH_TEST, l.test.as_str()),
                (labels::DEPENDENCIES, l.dependencies.as_str()),
            ],
        }
    }
}

/// A parsed Spark document
///
/// Created fresh by every parse call. Only the fields matching `format`
/// are populated: `phases` for legacy documents, `sections` for enhanced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparkDocument {
    /// Front matter id, or a slug of the name
    pub id: String,
    /// Display name
    pub name: String,
    /// Detected format
    pub format: DocumentFormat,
    /// Legacy phase content keyed by phase (present phases only)
    pub phases: BTreeMap<Phase, PhaseContent>,
    /// Enhanced section text keyed by section number 1-8
    pub sections: BTreeMap<u8, String>,
    /// Contributor handle (without `@`) per role
    pub contributors: BTreeMap<Role, String>,
    /// Full source text, kept for document-level heuristics
    pub source: String,
}

impl SparkDocument {
    /// Content of a phase, if its header was present
    #[inline]
    #[must_use]
    pub fn phase(&self, phase: Phase) -> Option<&PhaseContent> {
        self.phases.get(&phase)
    }

    /// Whether a phase is present and stable
    #[inline]
    #[must_use]
    pub fn is_phase_stable(&self, phase: Phase) -> bool {
        self.phase(phase).is_some_and(PhaseContent::is_stable)
    }

    /// Phase 2 fields, if present
    #[must_use]
    pub fn design(&self) -> Option<&DesignFields> {
        match self.phase(Phase::Design) {
            Some(PhaseContent::Design(fields)) => Some(fields),
            _ => None,
        }
    }

    /// Handle recorded for a role
    #[inline]
    #[must_use]
    pub fn handle(&self, role: Role) -> Option<&str> {
        self.contributors.get(&role).map(String::as_str)
    }

    /// Raw text of a numbered section
    #[inline]
    #[must_use]
    pub fn section(&self, number: u8) -> Option<&str> {
        self.sections.get(&number).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("Scout".parse::<Role>().unwrap(), Role::Scout);
        assert_eq!(" BUILDER ".parse::<Role>().unwrap(), Role::Builder);
        assert!("reviewer".parse::<Role>().is_err());
    }

    #[test]
    fn role_and_phase_are_paired() {
        for phase in Phase::ALL {
            assert_eq!(phase.role().phase(), phase);
        }
        assert_eq!(Phase::from_order(2), Some(Phase::Design));
        assert_eq!(Phase::from_order(4), None);
    }

    #[test]
    fn spark_phase_is_stable_when_empty() {
        assert!(PhaseContent::empty(Phase::Spark).is_stable());
    }

    #[test]
    fn design_needs_blueprint_and_interface() {
        let mut fields = DesignFields {
            blueprint: "a plan".to_string(),
            ..DesignFields::default()
        };
        assert_eq!(
            PhaseContent::Design(fields.clone()).missing_fields(),
            vec![labels::INTERFACE]
        );
        fields.interface = "snaps in".to_string();
        assert!(PhaseContent::Design(fields).is_stable());
    }

    #[test]
    fn logic_needs_implementation_and_test() {
        let content = PhaseContent::Logic(LogicFields {
            implementation: "code".to_string(),
            test: "   ".to_string(),
            dependencies: String::new(),
        });
        assert!(!content.is_stable());
        assert_eq!(content.missing_fields(), vec![labels::CLUTCH_TEST]);
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Designer).unwrap();
        assert_eq!(json, "\"designer\"");
    }
}
