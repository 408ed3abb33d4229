//! Common error types for graft.

use crate::ObjectId;
use thiserror::Error;

/// Errors that can occur during graph operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Text does not have the shape of an identifier.
    #[error("Malformed identifier: {0:?}")]
    MalformedIdentifier(String),

    /// An identifier does not resolve to any node.
    #[error("Unknown identifier: {0}")]
    UnknownIdentifier(ObjectId),

    /// An identifier is already taken. Should be unreachable when the
    /// allocator is used correctly; surfacing it is an internal defect.
    #[error("Duplicate identifier: {0}")]
    DuplicateIdentifier(ObjectId),

    /// The child already belongs to another container.
    #[error("Node {child} is already a child of {parent}")]
    AlreadyParented { child: ObjectId, parent: ObjectId },

    /// The node cannot hold children.
    #[error("Node {0} is not a container")]
    NotAContainer(ObjectId),

    /// The child is not in the container's child list.
    #[error("Node {child} is not a child of {parent}")]
    NotAChild { parent: ObjectId, child: ObjectId },

    /// The child's kind is not allowed in this container.
    #[error("Node {child} cannot be placed under {parent}")]
    InvalidChild { parent: ObjectId, child: ObjectId },

    /// The move would make a container its own ancestor.
    #[error("Placing {child} under {parent} would create a containment cycle")]
    WouldCycle { parent: ObjectId, child: ObjectId },
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
