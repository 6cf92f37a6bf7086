//! `spark-scribe` command-line layer
//!
//! The only crate in the workspace that touches the filesystem, the clock or
//! the process environment. Library crates stay pure; this one reads
//! documents and ledgers, loads [`ScribeConfig`], and formats output.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod source;

pub use commands::{AuditOutcome, AuditedFile, ReputationReport, SkippedRecord};
pub use config::ScribeConfig;
pub use error::{ConfigError, Result, ScribeError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
