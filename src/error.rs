//! Error types for the guide generation pipeline.
//!
//! Every stage returns [`GuideResult`]. Failures are never recovered locally;
//! they bubble up to `main`, which logs them and maps them to a non-zero exit
//! status.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for guide generation operations
pub type GuideResult<T> = Result<T, GuideError>;

/// Errors raised while loading channels, generating or writing the guide.
#[derive(Error, Debug)]
pub enum GuideError {
    /// Channel list missing, unreadable, malformed or invalid
    #[error("configuration error in {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },

    /// Filesystem operation failed
    #[error("I/O error while trying to {op} {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The XML writer rejected an event
    #[error("XML serialization error: {0}")]
    Xml(String),

    /// An XMLTV timestamp could not be parsed
    #[error("invalid XMLTV timestamp {value:?}: {reason}")]
    Timestamp { value: String, reason: String },

    /// Internal invariant broken (e.g. a programme that stops before it starts)
    #[error("internal invariant violated: {0}")]
    Invariant(String),
}

impl GuideError {
    /// Create a configuration error for the given channel file
    pub fn config<R: fmt::Display>(path: &Path, reason: R) -> Self {
        Self::Config {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Create an I/O error tagged with the operation that failed
    pub fn io(op: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Create an XML serialization error
    pub fn xml<E: fmt::Display>(err: E) -> Self {
        Self::Xml(err.to_string())
    }

    /// Short machine-friendly category, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config { .. } => "configuration",
            Self::Io { .. } => "io",
            Self::Xml(_) => "serialization",
            Self::Timestamp { .. } => "timestamp",
            Self::Invariant(_) => "invariant",
        }
    }
}
