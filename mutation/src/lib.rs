//! Graft Mutation
//!
//! Apply edit requests (add-file/add-group/move) to a project graph.
//!
//! Responsibilities:
//! - Resolve group and phase labels to identifiers
//! - Apply each request to a working copy, commit only on success
//! - Wire compiled sources into the Sources build phase
//! - Report per-request outcomes for batches

mod error;
mod executor;
mod request;
mod result;

pub use error::{MutationError, MutationResult};
pub use executor::MutationExecutor;
pub use request::MutationRequest;
pub use result::{
    AddedNodes, BatchPolicy, BatchReport, MovedChildren, MutationOutput, RequestOutcome,
};
