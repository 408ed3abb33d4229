//! Node variants for project graphs.
//!
//! Four kinds of node exist: leaf files (FileReference), ordered containers
//! (Group), build-phase membership records (BuildFileEntry), and the build
//! phases themselves (BuildPhase). Groups contain files and other groups;
//! phases contain build file entries; nothing else nests.

use graft_core::{basename, FileKind, NodeKind, ObjectId};

/// A leaf file in the project tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    /// Display name, usually the file's basename.
    pub name: String,
    /// Declared content type.
    pub kind: FileKind,
    /// Path relative to the containing group.
    pub path: String,
}

impl FileReference {
    pub fn new(name: impl Into<String>, kind: FileKind, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            path: path.into(),
        }
    }

    /// Build a reference from a path alone: the kind is classified from
    /// the extension and the name defaults to the basename.
    pub fn from_path(path: &str) -> Self {
        Self {
            name: basename(path).to_string(),
            kind: FileKind::from_path(path),
            path: path.to_string(),
        }
    }
}

/// A named container holding an ordered list of children.
///
/// Order is presentation order in the consuming tool and is preserved
/// exactly; it has no build semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub children: Vec<ObjectId>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(name: impl Into<String>, children: Vec<ObjectId>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }
}

/// Membership of one file in a build phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildFileEntry {
    /// The FileReference this entry stands for.
    pub file_ref: ObjectId,
}

impl BuildFileEntry {
    pub fn new(file_ref: ObjectId) -> Self {
        Self { file_ref }
    }
}

/// An ordered processing step over a set of files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPhase {
    pub name: String,
    /// BuildFileEntry identifiers, in processing order.
    pub files: Vec<ObjectId>,
}

impl BuildPhase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
        }
    }

    pub fn with_files(name: impl Into<String>, files: Vec<ObjectId>) -> Self {
        Self {
            name: name.into(),
            files,
        }
    }
}

/// A typed node in the project graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    FileReference(FileReference),
    Group(Group),
    BuildFileEntry(BuildFileEntry),
    BuildPhase(BuildPhase),
}

impl Node {
    /// The kind tag of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::FileReference(_) => NodeKind::FileReference,
            Node::Group(_) => NodeKind::Group,
            Node::BuildFileEntry(_) => NodeKind::BuildFileEntry,
            Node::BuildPhase(_) => NodeKind::BuildPhase,
        }
    }

    /// Returns true if this is a group node.
    pub fn is_group(&self) -> bool {
        matches!(self, Node::Group(_))
    }

    /// Returns true if this is a file reference node.
    pub fn is_file_reference(&self) -> bool {
        matches!(self, Node::FileReference(_))
    }

    /// Get as a FileReference if this is one.
    pub fn as_file_reference(&self) -> Option<&FileReference> {
        match self {
            Node::FileReference(file) => Some(file),
            _ => None,
        }
    }

    /// Get as a Group if this is one.
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Node::Group(group) => Some(group),
            _ => None,
        }
    }

    /// Get as a mutable Group if this is one.
    pub fn as_group_mut(&mut self) -> Option<&mut Group> {
        match self {
            Node::Group(group) => Some(group),
            _ => None,
        }
    }

    /// Get as a BuildFileEntry if this is one.
    pub fn as_build_file_entry(&self) -> Option<&BuildFileEntry> {
        match self {
            Node::BuildFileEntry(entry) => Some(entry),
            _ => None,
        }
    }

    /// Get as a BuildPhase if this is one.
    pub fn as_build_phase(&self) -> Option<&BuildPhase> {
        match self {
            Node::BuildPhase(phase) => Some(phase),
            _ => None,
        }
    }

    /// Get as a mutable BuildPhase if this is one.
    pub fn as_build_phase_mut(&mut self) -> Option<&mut BuildPhase> {
        match self {
            Node::BuildPhase(phase) => Some(phase),
            _ => None,
        }
    }

    /// The node's own human-readable label.
    ///
    /// BuildFileEntries have no label of their own; theirs is derived from
    /// the referenced file and the owning phase (see `ProjectGraph::label_of`).
    pub fn label(&self) -> Option<&str> {
        match self {
            Node::FileReference(file) => Some(&file.name),
            Node::Group(group) => Some(&group.name),
            Node::BuildPhase(phase) => Some(&phase.name),
            Node::BuildFileEntry(_) => None,
        }
    }

    /// The ordered child list for container nodes.
    pub fn child_list(&self) -> Option<&[ObjectId]> {
        match self {
            Node::Group(group) => Some(&group.children),
            Node::BuildPhase(phase) => Some(&phase.files),
            _ => None,
        }
    }

    /// Mutable access to the ordered child list for container nodes.
    pub fn child_list_mut(&mut self) -> Option<&mut Vec<ObjectId>> {
        match self {
            Node::Group(group) => Some(&mut group.children),
            Node::BuildPhase(phase) => Some(&mut phase.files),
            _ => None,
        }
    }

    /// Returns true if a child of the given kind may appear in this node.
    pub fn accepts_child(&self, child_kind: NodeKind) -> bool {
        match self {
            Node::Group(_) => matches!(
                child_kind,
                NodeKind::FileReference | NodeKind::Group
            ),
            Node::BuildPhase(_) => matches!(child_kind, NodeKind::BuildFileEntry),
            _ => false,
        }
    }
}

impl From<FileReference> for Node {
    fn from(file: FileReference) -> Self {
        Node::FileReference(file)
    }
}

impl From<Group> for Node {
    fn from(group: Group) -> Self {
        Node::Group(group)
    }
}

impl From<BuildFileEntry> for Node {
    fn from(entry: BuildFileEntry) -> Self {
        Node::BuildFileEntry(entry)
    }
}

impl From<BuildPhase> for Node {
    fn from(phase: BuildPhase) -> Self {
        Node::BuildPhase(phase)
    }
}
