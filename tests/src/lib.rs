//! Graft Tests
//!
//! Shared fixtures for the integration suite. The scenarios themselves
//! live under `tests/`.

mod fixture;

pub use fixture::*;

/// Everything a scenario file usually needs.
pub mod prelude {
    pub use crate::fixture::*;
    pub use graft_core::{FileKind, GraphError, NodeKind, ObjectId};
    pub use graft_graph::{
        AppendMode, IdAllocator, ProjectGraph, ViolationKind, Violations,
    };
    pub use graft_mutation::{
        BatchPolicy, MutationError, MutationExecutor, MutationOutput, MutationRequest,
    };
    pub use graft_parser::parse_document;
    pub use graft_serializer::serialize;
    pub use graft_session::{Plan, Session, SessionError, SessionState};
}
