//! Error taxonomy for a scoring run.
//!
//! Only loading and decoding errors reach the caller. Once a resource is
//! decoded, every check produces a grade; selector problems degrade to
//! "matches nothing" inside the matcher.

use std::path::PathBuf;
use thiserror::Error;

/// A document whose (apiVersion, kind) has an adapter but whose body does
/// not fit it.
#[derive(Debug, Clone, Error)]
#[error("failed to decode {api_version}/{kind} from {source_name}: {message}")]
pub struct DecodeError {
    pub kind: String,
    pub api_version: String,
    /// File name (or `<stdin>`) the document came from.
    pub source_name: String,
    pub message: String,
}

/// Errors raised while assembling a check registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("check id '{0}' is registered more than once")]
    DuplicateCheckId(String),
}

/// Run-level failure. A failed run produces no scorecard.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The document is not YAML, or its `apiVersion`/`kind` header is unreadable.
    #[error("failed to parse document in {source_name}: {message}")]
    Parse { source_name: String, message: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Result alias for scoring runs.
pub type Result<T> = std::result::Result<T, ScoreError>;
