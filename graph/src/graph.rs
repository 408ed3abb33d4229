//! Project graph storage and primitive operations.
//!
//! The graph owns every node, keyed by identifier, plus the document
//! layout. File order (section order, then entry order within a section)
//! is the order that matters externally; the node map itself is only a
//! lookup structure.
//!
//! Primitives here are defensive and atomic: every check runs before the
//! first mutation, so a returned error means the graph is unchanged.

use graft_core::{GraphError, GraphResult, NodeKind, ObjectId};
use indexmap::IndexMap;
use std::collections::HashSet;

use crate::{DocumentLayout, Node, Violations};

/// How `append_child` treats a child that already has a parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendMode {
    /// Reject with `AlreadyParented`. The default for additive operations.
    Strict,
    /// Detach the child from every current parent first. Used by the
    /// relocation workflow, which exists to repair misplaced nodes.
    Relocate,
}

/// Result of a label lookup.
///
/// `matches` counts every node of the kind carrying the label; callers
/// decide whether more than one is a warning or an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelMatch {
    /// The first matching node in file order.
    pub id: ObjectId,
    /// Total number of matching nodes.
    pub matches: usize,
}

#[derive(Debug, Clone, PartialEq)]
struct Stored {
    node: Node,
    /// Exact source text of this entry, trailing newline included.
    /// Cleared when the node is structurally modified; `None` means the
    /// serializer renders the entry canonically.
    raw: Option<String>,
}

/// The canonical in-memory structure of a project description file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectGraph {
    nodes: IndexMap<ObjectId, Stored>,
    layout: DocumentLayout,
}

impl ProjectGraph {
    /// An empty graph with no document layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a graph from parsed parts.
    ///
    /// The parser supplies the layout (with entry order already recorded)
    /// and every node with its raw source text. Duplicate identifiers in
    /// the input are rejected here.
    pub fn assemble(
        layout: DocumentLayout,
        nodes: Vec<(ObjectId, Node, String)>,
    ) -> GraphResult<Self> {
        let mut map = IndexMap::with_capacity(nodes.len());
        for (id, node, raw) in nodes {
            if map.insert(id, Stored { node, raw: Some(raw) }).is_some() {
                return Err(GraphError::DuplicateIdentifier(id));
            }
        }
        Ok(Self { nodes: map, layout })
    }

    // ==================== Lookup ====================

    /// Get a node by identifier.
    pub fn node(&self, id: ObjectId) -> Option<&Node> {
        self.nodes.get(&id).map(|stored| &stored.node)
    }

    /// Returns true if the identifier names a node.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every identifier in the graph. Used to seed the allocator.
    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.nodes.keys().copied()
    }

    /// Nodes in file order: sections in document order, entries in
    /// section order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &Node)> + '_ {
        self.layout
            .sections()
            .flat_map(|section| section.entries.iter())
            .filter_map(move |id| self.node(*id).map(|node| (*id, node)))
    }

    /// Nodes of one kind, in file order.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = (ObjectId, &Node)> + '_ {
        self.iter().filter(move |(_, node)| node.kind() == kind)
    }

    /// The document layout. The serializer walks this.
    pub fn layout(&self) -> &DocumentLayout {
        &self.layout
    }

    /// The recorded source text of an unmodified entry.
    pub fn raw_text(&self, id: ObjectId) -> Option<&str> {
        self.nodes.get(&id).and_then(|stored| stored.raw.as_deref())
    }

    // ==================== Labels ====================

    /// The human-readable label of a node.
    ///
    /// BuildFileEntry labels are derived: `"<file name> in <phase name>"`,
    /// degrading to the file name alone when no phase owns the entry.
    pub fn label_of(&self, id: ObjectId) -> Option<String> {
        let node = self.node(id)?;
        if let Some(label) = node.label() {
            return Some(label.to_string());
        }
        let entry = node.as_build_file_entry()?;
        let file = self.node(entry.file_ref)?.as_file_reference()?;
        match self.owning_phases(id).first().and_then(|phase_id| {
            self.node(*phase_id).and_then(|phase| phase.as_build_phase())
        }) {
            Some(phase) => Some(format!("{} in {}", file.name, phase.name)),
            None => Some(file.name.clone()),
        }
    }

    /// Locate a node of a kind by its label.
    ///
    /// Requests in this domain name groups and phases by label, not by
    /// identifier. Duplicate labels are legal in the format, so the first
    /// node in file order wins and the match count is reported for the
    /// caller's ambiguity policy.
    pub fn find_by_label(&self, kind: NodeKind, label: &str) -> Option<LabelMatch> {
        let mut first = None;
        let mut matches = 0;
        for (id, _) in self.nodes_of_kind(kind) {
            if self.label_of(id).as_deref() == Some(label) {
                matches += 1;
                if first.is_none() {
                    first = Some(id);
                }
            }
        }
        first.map(|id| LabelMatch { id, matches })
    }

    // ==================== Containment ====================

    /// Every group listing this node as a child, in file order.
    pub fn parents_of(&self, child: ObjectId) -> Vec<ObjectId> {
        self.nodes_of_kind(NodeKind::Group)
            .filter(|(_, node)| {
                node.child_list()
                    .map(|children| children.contains(&child))
                    .unwrap_or(false)
            })
            .map(|(id, _)| id)
            .collect()
    }

    /// The containing group of a node, if exactly determinable.
    pub fn parent_of(&self, child: ObjectId) -> Option<ObjectId> {
        self.parents_of(child).first().copied()
    }

    /// Every build phase listing this entry, in file order.
    pub fn owning_phases(&self, entry: ObjectId) -> Vec<ObjectId> {
        self.nodes_of_kind(NodeKind::BuildPhase)
            .filter(|(_, node)| {
                node.child_list()
                    .map(|files| files.contains(&entry))
                    .unwrap_or(false)
            })
            .map(|(id, _)| id)
            .collect()
    }

    /// The distinguished root group: the unique group no other group
    /// contains. `None` when the document has zero or several candidates;
    /// `validate` reports which.
    pub fn root(&self) -> Option<ObjectId> {
        let mut candidates = self
            .nodes_of_kind(NodeKind::Group)
            .map(|(id, _)| id)
            .filter(|id| self.parents_of(*id).is_empty());
        let first = candidates.next()?;
        match candidates.next() {
            None => Some(first),
            Some(_) => None,
        }
    }

    /// Returns true if `ancestor` is on the parent chain above `node`.
    ///
    /// Tolerates corrupted graphs: the walk keeps a visited set so a
    /// containment cycle cannot hang it.
    pub fn is_ancestor(&self, ancestor: ObjectId, node: ObjectId) -> bool {
        let mut visited = HashSet::new();
        let mut current = self.parent_of(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            if !visited.insert(id) {
                return false;
            }
            current = self.parent_of(id);
        }
        false
    }

    // ==================== Primitives ====================

    /// Add a new node under a fresh identifier.
    ///
    /// The identifier must come from the allocator; an occupied identifier
    /// is an internal defect and is rejected, never renamed.
    pub fn insert_node(&mut self, id: ObjectId, node: Node) -> GraphResult<()> {
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateIdentifier(id));
        }
        self.layout.ensure_section(node.kind());
        if let Some(section) = self.layout.section_mut(node.kind()) {
            section.entries.push(id);
        }
        self.nodes.insert(id, Stored { node, raw: None });
        Ok(())
    }

    /// Append a child to a container's ordered list.
    ///
    /// In `Strict` mode a child that already has a parent is rejected; in
    /// `Relocate` mode it is detached from every current parent first, in
    /// the same call, so no zero-parent state is ever observable.
    pub fn append_child(
        &mut self,
        parent: ObjectId,
        child: ObjectId,
        mode: AppendMode,
    ) -> GraphResult<()> {
        let child_kind = self
            .node(child)
            .map(|node| node.kind())
            .ok_or(GraphError::UnknownIdentifier(child))?;
        let parent_node = self
            .node(parent)
            .ok_or(GraphError::UnknownIdentifier(parent))?;

        if parent_node.child_list().is_none() {
            return Err(GraphError::NotAContainer(parent));
        }
        if !parent_node.accepts_child(child_kind) {
            return Err(GraphError::InvalidChild { parent, child });
        }

        // A group placed under its own descendant would close a cycle.
        if child_kind == NodeKind::Group && (child == parent || self.is_ancestor(child, parent)) {
            return Err(GraphError::WouldCycle { parent, child });
        }

        let current_parents = match child_kind {
            NodeKind::BuildFileEntry => self.owning_phases(child),
            _ => self.parents_of(child),
        };
        if !current_parents.is_empty() {
            match mode {
                AppendMode::Strict => {
                    return Err(GraphError::AlreadyParented {
                        child,
                        parent: current_parents[0],
                    });
                }
                AppendMode::Relocate => {
                    for old_parent in current_parents {
                        self.detach(old_parent, child);
                    }
                }
            }
        }

        if let Some(list) = self.child_list_mut(parent) {
            list.push(child);
        }
        self.mark_dirty(parent);
        Ok(())
    }

    /// Remove a child from a container's list. The node itself survives;
    /// only the membership goes away.
    pub fn remove_child(&mut self, parent: ObjectId, child: ObjectId) -> GraphResult<()> {
        let parent_node = self
            .node(parent)
            .ok_or(GraphError::UnknownIdentifier(parent))?;
        let position = parent_node
            .child_list()
            .ok_or(GraphError::NotAContainer(parent))?
            .iter()
            .position(|c| *c == child)
            .ok_or(GraphError::NotAChild { parent, child })?;

        if let Some(list) = self.child_list_mut(parent) {
            list.remove(position);
        }
        self.mark_dirty(parent);
        Ok(())
    }

    /// Validate the whole graph against the structural invariants.
    pub fn validate(&self) -> Violations {
        crate::validate::check_all(self)
    }

    /// Structural equality: same nodes under the same identifiers, in the
    /// same file order. Formatting (raw entry text, verbatim segments) is
    /// not part of the structure.
    pub fn structural_eq(&self, other: &ProjectGraph) -> bool {
        if self.nodes.len() != other.nodes.len() {
            return false;
        }
        let mut a = self.iter();
        let mut b = other.iter();
        loop {
            match (a.next(), b.next()) {
                (None, None) => return true,
                (Some((id_a, node_a)), Some((id_b, node_b))) => {
                    if id_a != id_b || node_a != node_b {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }

    // ==================== Internal helpers ====================

    fn child_list_mut(&mut self, id: ObjectId) -> Option<&mut Vec<ObjectId>> {
        self.nodes
            .get_mut(&id)
            .and_then(|stored| stored.node.child_list_mut())
    }

    /// Drop every occurrence of `child` from `parent`'s list. Removing all
    /// occurrences (not just the first) is what makes relocation usable as
    /// a repair for duplicated memberships.
    fn detach(&mut self, parent: ObjectId, child: ObjectId) {
        if let Some(list) = self.child_list_mut(parent) {
            list.retain(|c| *c != child);
            self.mark_dirty(parent);
        }
    }

    fn mark_dirty(&mut self, id: ObjectId) {
        if let Some(stored) = self.nodes.get_mut(&id) {
            stored.raw = None;
        }
    }
}
