//! Error types for the document crate
//!
//! Parsing itself never fails; these cover role spelling and the
//! submission-side validation of documents about to be rendered.

use crate::model::{Phase, Role};

/// A role name outside `scout | designer | builder`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: '{0}'")]
pub struct UnknownRoleError(pub String);

/// Problems that block a document from being submitted
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    /// Name is empty
    #[error("spark name is required")]
    MissingName,

    /// No handle recorded for a role
    #[error("{phase} requires a {role} handle")]
    MissingHandle { phase: Phase, role: Role },

    /// Handle contains characters outside `[A-Za-z0-9-]`
    #[error("invalid {role} handle: '{handle}'")]
    InvalidHandle { role: Role, handle: String },

    /// Required phase fields are empty
    #[error("{phase} must include: {}", missing.join(", "))]
    IncompleteFields {
        phase: Phase,
        missing: Vec<&'static str>,
    },
}

impl SubmissionError {
    /// Create incomplete-fields error
    pub fn incomplete(phase: Phase, missing: Vec<&'static str>) -> Self {
        Self::IncompleteFields { phase, missing }
    }
}
