//! Mutation execution.
//!
//! Every request is applied to a working copy of the graph; the live
//! graph is replaced only after the whole request succeeded. A failed
//! request therefore leaves no trace in the graph, though identifiers it
//! drew stay registered with the allocator and are never reissued.

use graft_core::{basename, FileKind, NodeKind, ObjectId};
use graft_graph::{
    AppendMode, BuildFileEntry, FileReference, Group, IdAllocator, ProjectGraph,
};

use crate::error::{MutationError, MutationResult};
use crate::request::MutationRequest;
use crate::result::{AddedNodes, BatchPolicy, BatchReport, MovedChildren, MutationOutput};

/// The build phase that receives compiled sources, matching how the
/// project documents this tool edits name theirs.
const SOURCES_PHASE: &str = "Sources";

/// Applies mutation requests to a project graph.
pub struct MutationExecutor<'a> {
    graph: &'a mut ProjectGraph,
    allocator: &'a mut IdAllocator,
    strict: bool,
}

impl<'a> MutationExecutor<'a> {
    /// Create an executor over a graph and the session's allocator. The
    /// allocator outlives the executor so identifiers stay registered
    /// across batches.
    pub fn new(graph: &'a mut ProjectGraph, allocator: &'a mut IdAllocator) -> Self {
        Self {
            graph,
            allocator,
            strict: false,
        }
    }

    /// In strict mode an ambiguous group label fails the request instead
    /// of resolving to the first match.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Apply one request atomically.
    pub fn execute(&mut self, request: &MutationRequest) -> MutationResult<MutationOutput> {
        tracing::debug!(request = %request, "applying mutation");
        let mut draft = self.graph.clone();
        let result = self.apply(&mut draft, request);
        match &result {
            Ok(_) => {
                *self.graph = draft;
                tracing::info!(request = %request, "mutation applied");
            }
            Err(error) => {
                tracing::warn!(request = %request, error = %error, "mutation rejected");
            }
        }
        result
    }

    /// Apply an ordered batch of requests.
    pub fn execute_batch(
        &mut self,
        requests: &[MutationRequest],
        policy: BatchPolicy,
    ) -> BatchReport {
        let mut report = BatchReport::new();
        for request in requests {
            let result = self.execute(request);
            let failed = result.is_err();
            report.push(request.clone(), result);
            if failed && policy == BatchPolicy::FailFast {
                break;
            }
        }
        report
    }

    fn apply(
        &mut self,
        draft: &mut ProjectGraph,
        request: &MutationRequest,
    ) -> MutationResult<MutationOutput> {
        match request {
            MutationRequest::AddSourceFile {
                path,
                name,
                parent_group,
            } => self.add_source_file(draft, path, name.as_deref(), parent_group),
            MutationRequest::AddGroup {
                name,
                parent_group,
                children,
            } => self.add_group(draft, name, parent_group, children),
            MutationRequest::RelocateChildren {
                children,
                from_group,
                to_group,
            } => self.relocate_children(draft, children, from_group, to_group),
        }
    }

    // ==================== Operations ====================

    fn add_source_file(
        &mut self,
        draft: &mut ProjectGraph,
        path: &str,
        name: Option<&str>,
        parent_group: &str,
    ) -> MutationResult<MutationOutput> {
        if path.is_empty() {
            return Err(MutationError::empty_request("file path is empty"));
        }
        let parent = self.resolve_group(draft, parent_group)?;

        let kind = FileKind::from_path(path);
        let display = name.unwrap_or_else(|| basename(path));
        let file_id = self.allocator.allocate();
        draft.insert_node(file_id, FileReference::new(display, kind.clone(), path).into())?;
        draft.append_child(parent, file_id, AppendMode::Strict)?;

        // Only compiled sources enter the build; resources and headers
        // stop at the tree.
        if !kind.is_source() {
            return Ok(MutationOutput::Added(AddedNodes::file(file_id)));
        }

        let phase = self.resolve_sources_phase(draft)?;
        let entry_id = self.allocator.allocate();
        draft.insert_node(entry_id, BuildFileEntry::new(file_id).into())?;
        draft.append_child(phase, entry_id, AppendMode::Strict)?;

        Ok(MutationOutput::Added(AddedNodes::file_with_entry(
            file_id, entry_id,
        )))
    }

    fn add_group(
        &mut self,
        draft: &mut ProjectGraph,
        name: &str,
        parent_group: &str,
        children: &[ObjectId],
    ) -> MutationResult<MutationOutput> {
        if name.is_empty() {
            return Err(MutationError::empty_request("group name is empty"));
        }
        let parent = self.resolve_group(draft, parent_group)?;

        let group_id = self.allocator.allocate();
        draft.insert_node(group_id, Group::new(name).into())?;
        draft.append_child(parent, group_id, AppendMode::Strict)?;
        for child in children {
            draft.append_child(group_id, *child, AppendMode::Strict)?;
        }

        Ok(MutationOutput::Added(AddedNodes::group(group_id)))
    }

    fn relocate_children(
        &mut self,
        draft: &mut ProjectGraph,
        children: &[ObjectId],
        from_group: &str,
        to_group: &str,
    ) -> MutationResult<MutationOutput> {
        if children.is_empty() {
            return Err(MutationError::empty_request("no children to move"));
        }
        let from = self.resolve_group(draft, from_group)?;
        let to = self.resolve_group(draft, to_group)?;

        // Move in the children's current order in the source group, not
        // request order, so their relative order survives the move.
        let mut ordered = Vec::with_capacity(children.len());
        if let Some(current) = draft.node(from).and_then(|node| node.child_list()) {
            ordered.extend(current.iter().filter(|id| children.contains(id)).copied());
        }
        for child in children {
            if !ordered.contains(child) {
                return Err(graft_core::GraphError::NotAChild {
                    parent: from,
                    child: *child,
                }
                .into());
            }
        }

        for child in &ordered {
            draft.remove_child(from, *child)?;
        }
        for child in &ordered {
            // Relocate mode sweeps any further stale parent, which is the
            // point: this request exists to repair multi-parent damage.
            draft.append_child(to, *child, AppendMode::Relocate)?;
        }

        Ok(MutationOutput::Moved(MovedChildren {
            children: ordered,
            from,
            to,
        }))
    }

    // ==================== Label resolution ====================

    fn resolve_group(
        &self,
        draft: &ProjectGraph,
        label: &str,
    ) -> MutationResult<ObjectId> {
        let found = draft
            .find_by_label(NodeKind::Group, label)
            .ok_or_else(|| MutationError::group_not_found(label))?;
        if found.matches > 1 {
            if self.strict {
                return Err(MutationError::ambiguous_label(label, found.matches));
            }
            tracing::warn!(
                label,
                matches = found.matches,
                "label is ambiguous, using the first group in file order"
            );
        }
        Ok(found.id)
    }

    fn resolve_sources_phase(&self, draft: &ProjectGraph) -> MutationResult<ObjectId> {
        let found = draft
            .find_by_label(NodeKind::BuildPhase, SOURCES_PHASE)
            .ok_or_else(|| MutationError::phase_not_found(SOURCES_PHASE))?;
        if found.matches > 1 {
            tracing::debug!(
                matches = found.matches,
                "several Sources phases, using the first in file order"
            );
        }
        Ok(found.id)
    }
}
