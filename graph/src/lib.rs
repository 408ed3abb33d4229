//! Graft Graph Model
//!
//! The canonical in-memory representation of a project description file:
//! typed nodes keyed by identifier, the containment tree, and the document
//! layout that lets unmodified regions round-trip byte-for-byte.
//!
//! This crate owns the integrity guarantees:
//! - every referenced identifier resolves to a node
//! - containment is a tree (single parent, no cycles, one root)
//! - compiled sources are linked to exactly one build phase
//! - identifiers are unique and never reused
//!
//! Primitives here are small and defensive; composite workflows live in
//! the mutation crate.

mod alloc;
mod graph;
mod layout;
mod node;
mod validate;
mod violation;

pub use alloc::*;
pub use graph::*;
pub use layout::*;
pub use node::*;
pub use violation::*;
