//! Mutation error types.

use graft_core::GraphError;
use thiserror::Error;

/// Result type for mutation operations.
pub type MutationResult<T> = Result<T, MutationError>;

/// Errors that can occur while applying a mutation request.
///
/// Each one fails a single request; in a batch, later requests still run
/// under the continue-on-error policy.
#[derive(Debug, Error)]
pub enum MutationError {
    #[error("No group labeled `{label}` exists")]
    GroupNotFound { label: String },

    #[error("Label `{label}` matches {matches} groups")]
    AmbiguousLabel { label: String, matches: usize },

    #[error("No `{label}` build phase exists to receive a compiled source")]
    PhaseNotFound { label: String },

    #[error("Request has nothing to do: {reason}")]
    EmptyRequest { reason: String },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl MutationError {
    pub fn group_not_found(label: impl Into<String>) -> Self {
        Self::GroupNotFound {
            label: label.into(),
        }
    }

    pub fn ambiguous_label(label: impl Into<String>, matches: usize) -> Self {
        Self::AmbiguousLabel {
            label: label.into(),
            matches,
        }
    }

    pub fn phase_not_found(label: impl Into<String>) -> Self {
        Self::PhaseNotFound {
            label: label.into(),
        }
    }

    pub fn empty_request(reason: impl Into<String>) -> Self {
        Self::EmptyRequest {
            reason: reason.into(),
        }
    }
}
