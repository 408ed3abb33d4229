//! Kind tags for graft nodes and files.
//!
//! `NodeKind` names the four node variants and doubles as the section tag
//! in the textual format. `FileKind` is the declared content type of a
//! FileReference; it decides whether a file participates in compilation.

use std::fmt;

/// The kind of a node, as written in section markers and `isa` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    BuildFileEntry,
    FileReference,
    Group,
    BuildPhase,
}

impl NodeKind {
    /// All kinds, in canonical section order.
    pub fn all() -> [NodeKind; 4] {
        [
            NodeKind::BuildFileEntry,
            NodeKind::FileReference,
            NodeKind::Group,
            NodeKind::BuildPhase,
        ]
    }

    /// The textual tag for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            NodeKind::BuildFileEntry => "BuildFileEntry",
            NodeKind::FileReference => "FileReference",
            NodeKind::Group => "Group",
            NodeKind::BuildPhase => "BuildPhase",
        }
    }

    /// Look up a kind by its textual tag.
    pub fn from_tag(tag: &str) -> Option<NodeKind> {
        match tag {
            "BuildFileEntry" => Some(NodeKind::BuildFileEntry),
            "FileReference" => Some(NodeKind::FileReference),
            "Group" => Some(NodeKind::Group),
            "BuildPhase" => Some(NodeKind::BuildPhase),
            _ => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Declared content type of a file, e.g. `sourcecode.swift` or `text.json`.
///
/// The set of kinds is open: the parser accepts any tag it finds. The
/// classification table below only matters when graft creates a new
/// FileReference and has to pick a kind from the path alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileKind(String);

impl FileKind {
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    /// Classify a path by its extension.
    ///
    /// Unrecognized extensions fall back to the generic `sourcecode` kind:
    /// callers adding files they cannot name more precisely are adding
    /// sources, while known resource extensions opt out of compilation.
    pub fn from_path(path: &str) -> Self {
        let kind = match extension(path) {
            Some("swift") => "sourcecode.swift",
            Some("m") => "sourcecode.c.objc",
            Some("c") => "sourcecode.c.c",
            Some("h") => "sourcecode.c.h",
            Some("cpp") | Some("cc") => "sourcecode.cpp.cpp",
            Some("rs") => "sourcecode.rust",
            Some("json") => "text.json",
            Some("plist") => "text.plist",
            Some("xml") => "text.xml",
            Some("md") | Some("txt") => "text",
            Some("png") => "image.png",
            _ => "sourcecode",
        };
        Self(kind.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if files of this kind are compiled, and therefore need
    /// a BuildFileEntry in a build phase. Headers are source code but are
    /// never compiled on their own.
    pub fn is_source(&self) -> bool {
        self.0.starts_with("sourcecode") && self.0 != "sourcecode.c.h"
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The final path component, used as a display name when none is given.
pub fn basename(path: &str) -> &str {
    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => name,
        _ => path,
    }
}

fn extension(path: &str) -> Option<&str> {
    let name = basename(path);
    match name.rfind('.') {
        // A leading dot names a hidden file, not an extension.
        Some(0) | None => None,
        Some(i) => Some(&name[i + 1..]),
    }
}
