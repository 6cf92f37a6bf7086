//! Spark audit and governance advisory
//!
//! Consumes parsed [`SparkDocument`](spark_document::SparkDocument)s and
//! produces stability reports, novelty scores, merit plans and lock
//! recommendations.
//!
//! # Core Operations
//!
//! - **Audit**: [`AuditorSet`] picks [`PhaseAuditor`] or [`SectionAuditor`]
//!   from the document's format tag
//! - **Score**: [`NoveltyScorer`] rates legacy design content 0-100
//! - **Advise**: [`GovernanceAdvisor`] maps a report to an [`Advisory`]
//! - **Evaluate**: [`Scribe`] runs the whole pipeline and shapes the JSON
//!   envelope
//!
//! Every operation is a pure function of its inputs and is safe to call
//! from many threads at once.
//!
//! # Example
//!
//! ```
//! use spark_audit::{AuditStatus, Recommendation, Scribe};
//!
//! let evaluation = Scribe::new().evaluate("# Spark: Empty\n");
//! assert_eq!(evaluation.report.status, AuditStatus::Red);
//! assert_eq!(evaluation.advisory.recommendation, Recommendation::Reject);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod advisor;
pub mod auditors;
pub mod novelty;
pub mod pipeline;
pub mod report;

pub use advisor::{
    notes, Advisory, BonusKind, Confidence, GovernanceAdvisor, MeritEntry, MeritSchedule,
    Recommendation,
};
pub use auditors::{Auditor, AuditorSet, PhaseAuditor, SectionAuditor, SectionThresholds};
pub use novelty::{NoveltyBreakdown, NoveltyScorer};
pub use pipeline::{Evaluation, EvaluationEnvelope, Scribe};
pub use report::{AuditChecks, AuditReport, AuditStatus, StageStatus};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
