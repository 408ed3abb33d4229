//! Graft Core Types
//!
//! This crate provides the foundational types used throughout graft:
//! - The identity type (ObjectId, a 24-character hexadecimal token)
//! - Kind tags (NodeKind for graph nodes, FileKind for file content types)
//! - Common error types for graph operations

mod error;
mod id;
mod kind;

pub use error::*;
pub use id::*;
pub use kind::*;
