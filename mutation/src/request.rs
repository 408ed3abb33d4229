//! Mutation request types.
//!
//! A request names its targets the way callers know them: groups and
//! phases by label, files by path, existing nodes by identifier. The
//! executor resolves labels against the graph at application time.

use graft_core::ObjectId;
use std::fmt;

/// One self-contained change to apply to a project graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationRequest {
    /// Add a file under a group; compiled sources are also wired into the
    /// `Sources` build phase.
    AddSourceFile {
        /// Path relative to the containing group.
        path: String,
        /// Display name; defaults to the path basename.
        name: Option<String>,
        /// Label of the group that will hold the file.
        parent_group: String,
    },

    /// Add an empty-or-populated group under a parent group. Initial
    /// children must already exist and be unparented.
    AddGroup {
        name: String,
        parent_group: String,
        children: Vec<ObjectId>,
    },

    /// Move children from one group to another in one step, keeping their
    /// relative order from the source group.
    RelocateChildren {
        children: Vec<ObjectId>,
        from_group: String,
        to_group: String,
    },
}

impl MutationRequest {
    /// The request's short kind token, as used in plan files.
    pub fn kind_name(&self) -> &'static str {
        match self {
            MutationRequest::AddSourceFile { .. } => "add-file",
            MutationRequest::AddGroup { .. } => "add-group",
            MutationRequest::RelocateChildren { .. } => "move",
        }
    }
}

impl fmt::Display for MutationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationRequest::AddSourceFile {
                path, parent_group, ..
            } => {
                write!(f, "add-file {} under `{}`", path, parent_group)
            }
            MutationRequest::AddGroup {
                name,
                parent_group,
                children,
            } => {
                write!(
                    f,
                    "add-group `{}` under `{}` ({} children)",
                    name,
                    parent_group,
                    children.len()
                )
            }
            MutationRequest::RelocateChildren {
                children,
                from_group,
                to_group,
            } => {
                write!(
                    f,
                    "move {} children from `{}` to `{}`",
                    children.len(),
                    from_group,
                    to_group
                )
            }
        }
    }
}
