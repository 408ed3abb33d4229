//! Session manager.

use std::fs;
use std::path::{Path, PathBuf};

use graft_graph::{IdAllocator, ProjectGraph, Violations};
use graft_mutation::{
    BatchPolicy, BatchReport, MutationExecutor, MutationOutput, MutationRequest,
};
use graft_parser::parse_document;
use graft_serializer::serialize;

use crate::error::{SessionError, SessionResult};
use crate::lock::ProjectLock;

/// Where a session stands in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Graph parsed, nothing applied yet.
    Loaded,
    /// At least one mutation applied since the last clean validation.
    Mutating,
    /// Validation ran after the last mutation and found no errors.
    Validated,
    /// Output written back to the project file.
    Serialized,
}

/// One editing pass over a project file.
///
/// The session owns the graph and the identifier allocator, so
/// identifiers drawn by requests that later failed stay registered for
/// the whole pass. The file is read once when the session opens and
/// written once by [`Session::write`]; the advisory lock is held in
/// between and released when the session drops.
#[derive(Debug)]
pub struct Session {
    path: PathBuf,
    graph: ProjectGraph,
    allocator: IdAllocator,
    state: SessionState,
    strict: bool,
    // Held for the session lifetime; unlocks on drop.
    _lock: ProjectLock,
}

impl Session {
    /// Lock, read and parse a project file.
    pub fn open(path: impl AsRef<Path>) -> SessionResult<Self> {
        let path = path.as_ref().to_path_buf();
        let lock = ProjectLock::acquire(&path)?;
        let text =
            fs::read_to_string(&path).map_err(|source| SessionError::io(&path, source))?;
        let graph = parse_document(&text)?;
        let allocator = IdAllocator::seeded_from(&graph);
        tracing::debug!(path = %path.display(), nodes = graph.len(), "project loaded");
        Ok(Self {
            path,
            graph,
            allocator,
            state: SessionState::Loaded,
            strict: false,
            _lock: lock,
        })
    }

    /// In strict mode ambiguous group labels fail requests instead of
    /// resolving to the first match.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn graph(&self) -> &ProjectGraph {
        &self.graph
    }

    /// Apply one mutation request.
    pub fn apply(&mut self, request: &MutationRequest) -> SessionResult<MutationOutput> {
        let output = MutationExecutor::new(&mut self.graph, &mut self.allocator)
            .strict(self.strict)
            .execute(request)?;
        self.state = SessionState::Mutating;
        Ok(output)
    }

    /// Apply an ordered batch of requests under a failure policy.
    pub fn apply_batch(
        &mut self,
        requests: &[MutationRequest],
        policy: BatchPolicy,
    ) -> BatchReport {
        let report = MutationExecutor::new(&mut self.graph, &mut self.allocator)
            .strict(self.strict)
            .execute_batch(requests, policy);
        if report.applied_count() > 0 {
            self.state = SessionState::Mutating;
        }
        report
    }

    /// Check every graph invariant. Moves the session to `Validated`
    /// when no errors are found; warnings alone do not hold it back.
    pub fn validate(&mut self) -> Violations {
        let violations = self.graph.validate();
        if !violations.has_errors() {
            self.state = SessionState::Validated;
        }
        violations
    }

    /// Serialize the graph without touching the file. Refuses while
    /// validation reports errors.
    pub fn render(&mut self) -> SessionResult<String> {
        let violations = self.validate();
        if violations.has_errors() {
            return Err(SessionError::validation_failed(violations));
        }
        Ok(serialize(&self.graph))
    }

    /// Serialize and write the project file back. Same validation gate
    /// as [`Session::render`].
    pub fn write(&mut self) -> SessionResult<()> {
        let text = self.render()?;
        fs::write(&self.path, text).map_err(|source| SessionError::io(&self.path, source))?;
        self.state = SessionState::Serialized;
        tracing::info!(path = %self.path.display(), "project written");
        Ok(())
    }
}
