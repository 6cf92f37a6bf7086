//! Spark document model and parser
//!
//! Foundation crate of the Spark scribe. A Spark is a community contribution
//! document written either in the legacy three-phase format or the enhanced
//! numbered-section format.
//!
//! ## Architecture
//!
//! ```text
//! raw text ──► FrontMatter::split ──► tokenize ──► SparkParser ──► SparkDocument
//!                                        │
//!                                        └── extract_block(text, label)
//! ```
//!
//! ## Example
//!
//! ```
//! use spark_document::{Phase, Role, SparkParser};
//!
//! let doc = SparkParser::new().parse(
//!     "# Spark: Tidal Cache\n\n## Phase 1: The Intuition (!HUNCH)\n*Scout: @ivan*\n* **The Gap:** caches forget\n",
//! );
//! assert_eq!(doc.name, "Tidal Cache");
//! assert_eq!(doc.handle(Role::Scout), Some("ivan"));
//! assert!(doc.is_phase_stable(Phase::Spark));
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod frontmatter;
pub mod model;
pub mod parser;
pub mod render;
pub mod scan;

pub use error::{SubmissionError, UnknownRoleError};
pub use frontmatter::FrontMatter;
pub use model::{
    labels, DesignFields, DocumentFormat, LogicFields, Phase, PhaseContent, Role, SparkDocument,
    SparkFields,
};
pub use parser::{slugify, SparkParser, UNTITLED};
pub use render::{render_legacy, validate_submission, ENHANCED_TEMPLATE, LEGACY_TEMPLATE};
pub use scan::{extract_block, first_handle, has_handle};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
