//! Session error types.

use std::path::PathBuf;

use graft_graph::Violations;
use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that end a session or refuse one of its steps.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The project file did not parse. No partial graph is kept.
    #[error("parse error: {0}")]
    Parse(#[from] graft_parser::ParseError),

    /// A mutation request failed outside of batch reporting.
    #[error("mutation error: {0}")]
    Mutation(#[from] graft_mutation::MutationError),

    /// Reading or writing a file failed.
    #[error("i/o error on `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Another process holds the advisory lock on the project file.
    #[error("`{path}` is locked by another process")]
    Locked { path: PathBuf },

    /// The graph carries validation errors, so serializing is refused.
    #[error(
        "document has {} validation error(s); refusing to serialize",
        .violations.errors().count()
    )]
    ValidationFailed { violations: Violations },

    /// A plan file could not be decoded into mutation requests.
    #[error("invalid plan: {message}")]
    InvalidPlan { message: String },
}

impl SessionError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn locked(path: impl Into<PathBuf>) -> Self {
        Self::Locked { path: path.into() }
    }

    pub fn validation_failed(violations: Violations) -> Self {
        Self::ValidationFailed { violations }
    }

    pub fn invalid_plan(message: impl Into<String>) -> Self {
        Self::InvalidPlan {
            message: message.into(),
        }
    }
}
