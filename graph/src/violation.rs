//! Structural violation types.
//!
//! `validate` never fails fast; it sweeps the whole graph and reports
//! everything it finds. Errors block serialization, warnings do not.

use graft_core::ObjectId;
use std::fmt;

/// Severity of a structural violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationSeverity {
    /// The graph must not be serialized in this state.
    Error,
    /// Suspicious but serializable.
    Warning,
}

/// The structural rule a violation breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// An identifier is referenced but defines no node.
    DanglingReference,
    /// A node is listed as a child of more than one group.
    MultipleParents,
    /// A build file entry is listed in more than one phase.
    MultiplePhases,
    /// A container lists the same child twice.
    DuplicateMembership,
    /// A container lists a child of a kind it cannot hold.
    WrongChildKind,
    /// No parentless group exists to serve as the root.
    MissingRoot,
    /// Several parentless groups compete for the root position.
    AmbiguousRoot,
    /// A node is not reachable from the root group.
    Unreachable,
    /// A build file entry belongs to no phase and so does nothing.
    OrphanedEntry,
    /// One source file is wired into the build more than once.
    DuplicateEntryForFile,
    /// A compiled source file is wired into no build phase.
    UnwiredSource,
    /// The group containment chain loops back on itself.
    ContainmentCycle,
}

impl ViolationKind {
    /// Short stable token, used in reports and logs.
    pub fn name(&self) -> &'static str {
        match self {
            ViolationKind::DanglingReference => "dangling_reference",
            ViolationKind::MultipleParents => "multiple_parents",
            ViolationKind::MultiplePhases => "multiple_phases",
            ViolationKind::DuplicateMembership => "duplicate_membership",
            ViolationKind::WrongChildKind => "wrong_child_kind",
            ViolationKind::MissingRoot => "missing_root",
            ViolationKind::AmbiguousRoot => "ambiguous_root",
            ViolationKind::Unreachable => "unreachable",
            ViolationKind::OrphanedEntry => "orphaned_entry",
            ViolationKind::DuplicateEntryForFile => "duplicate_entry_for_file",
            ViolationKind::UnwiredSource => "unwired_source",
            ViolationKind::ContainmentCycle => "containment_cycle",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single structural violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The rule that was broken.
    pub kind: ViolationKind,
    /// The severity of the violation.
    pub severity: ViolationSeverity,
    /// Human-readable description.
    pub message: String,
    /// The node the violation is about, when one node is to blame.
    pub subject: Option<ObjectId>,
    /// Other nodes involved, e.g. the competing parents.
    pub related: Vec<ObjectId>,
}

impl Violation {
    /// Create a new violation.
    pub fn new(kind: ViolationKind, severity: ViolationSeverity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            subject: None,
            related: Vec::new(),
        }
    }

    /// Create an error-level violation.
    pub fn error(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self::new(kind, ViolationSeverity::Error, message)
    }

    /// Create a warning-level violation.
    pub fn warning(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self::new(kind, ViolationSeverity::Warning, message)
    }

    /// Attach the node the violation is about.
    pub fn with_subject(mut self, id: ObjectId) -> Self {
        self.subject = Some(id);
        self
    }

    /// Attach a further involved node.
    pub fn with_related(mut self, id: ObjectId) -> Self {
        self.related.push(id);
        self
    }

    /// Check if this is an error-level violation.
    pub fn is_error(&self) -> bool {
        matches!(self.severity, ViolationSeverity::Error)
    }

    /// Check if this is a warning-level violation.
    pub fn is_warning(&self) -> bool {
        matches!(self.severity, ViolationSeverity::Warning)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// Collection of violations from one validation sweep.
#[derive(Debug, Clone, Default)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    /// Create a new empty violations collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a violation.
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Check if there are any violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Check if there are any error-level violations.
    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(|v| v.is_error())
    }

    /// Check if there are only warnings.
    pub fn has_only_warnings(&self) -> bool {
        !self.violations.is_empty() && !self.has_errors()
    }

    /// Get all violations.
    pub fn all(&self) -> &[Violation] {
        &self.violations
    }

    /// Get error-level violations.
    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.is_error())
    }

    /// Get warning-level violations.
    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.is_warning())
    }

    /// Violations of one kind, in report order.
    pub fn of_kind(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.kind == kind)
    }

    /// Get the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Merge another violations collection.
    pub fn merge(&mut self, other: Violations) {
        self.violations.extend(other.violations);
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}
