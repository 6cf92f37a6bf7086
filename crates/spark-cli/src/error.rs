//! Error types for the command-line layer

use spark_reputation::{LedgerError, RangeError};
use std::path::PathBuf;

/// Errors surfaced by `spark-scribe` commands
#[derive(Debug, thiserror::Error)]
pub enum ScribeError {
    /// File or directory could not be read
    #[error("cannot read {path}: {source}")]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output file could not be written
    #[error("cannot write {path}: {source}")]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not a valid [`ScribeConfig`](crate::ScribeConfig)
    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    /// Ledger could not be loaded
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Bad command-line value
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Output could not be serialized
    #[error("cannot serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Why a configuration was rejected
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Not TOML, or fields of the wrong type
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// A fraction outside `0..=1`
    #[error(transparent)]
    OutOfRange(#[from] RangeError),
}

impl ScribeError {
    /// Create unreadable input error
    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::InputUnreadable {
            path: path.into(),
            source,
        }
    }

    /// Create unwritable output error
    pub fn unwritable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputUnwritable {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, ScribeError>;
