//! Mutation result and batch report types.

use graft_core::ObjectId;

use crate::{MutationError, MutationRequest};

/// Result of one applied mutation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutput {
    /// Nodes were created.
    Added(AddedNodes),
    /// Existing children changed groups.
    Moved(MovedChildren),
}

impl MutationOutput {
    /// The identifier of a created FileReference, if any.
    pub fn created_file(&self) -> Option<ObjectId> {
        match self {
            MutationOutput::Added(added) => added.file_ref,
            _ => None,
        }
    }

    /// The identifier of a created BuildFileEntry, if any.
    pub fn created_entry(&self) -> Option<ObjectId> {
        match self {
            MutationOutput::Added(added) => added.build_entry,
            _ => None,
        }
    }

    /// The identifier of a created Group, if any.
    pub fn created_group(&self) -> Option<ObjectId> {
        match self {
            MutationOutput::Added(added) => added.group,
            _ => None,
        }
    }

    /// How many children a relocation moved.
    pub fn moved_count(&self) -> usize {
        match self {
            MutationOutput::Moved(moved) => moved.children.len(),
            _ => 0,
        }
    }
}

/// Identifiers created by an additive request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddedNodes {
    /// Created FileReference.
    pub file_ref: Option<ObjectId>,
    /// Created BuildFileEntry, present only for compiled sources.
    pub build_entry: Option<ObjectId>,
    /// Created Group.
    pub group: Option<ObjectId>,
}

impl AddedNodes {
    pub fn file(file_ref: ObjectId) -> Self {
        Self {
            file_ref: Some(file_ref),
            ..Self::default()
        }
    }

    pub fn file_with_entry(file_ref: ObjectId, build_entry: ObjectId) -> Self {
        Self {
            file_ref: Some(file_ref),
            build_entry: Some(build_entry),
            ..Self::default()
        }
    }

    pub fn group(group: ObjectId) -> Self {
        Self {
            group: Some(group),
            ..Self::default()
        }
    }
}

/// Summary of a relocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovedChildren {
    /// The moved children, in the order they now sit in the target group.
    pub children: Vec<ObjectId>,
    pub from: ObjectId,
    pub to: ObjectId,
}

/// What a batch does when one request fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPolicy {
    /// Keep applying later requests; the report carries every failure.
    /// Requests are independent, so one bad label does not poison the rest.
    #[default]
    ContinueOnError,
    /// Stop at the first failure; later requests are never attempted.
    FailFast,
}

/// One request's fate inside a batch.
#[derive(Debug)]
pub struct RequestOutcome {
    pub request: MutationRequest,
    pub result: Result<MutationOutput, MutationError>,
}

impl RequestOutcome {
    pub fn is_applied(&self) -> bool {
        self.result.is_ok()
    }
}

/// Ordered outcomes of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: Vec<RequestOutcome>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, request: MutationRequest, result: Result<MutationOutput, MutationError>) {
        self.outcomes.push(RequestOutcome { request, result });
    }

    pub fn outcomes(&self) -> &[RequestOutcome] {
        &self.outcomes
    }

    pub fn applied_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_applied()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.applied_count()
    }

    /// True when every request in the batch was applied.
    pub fn is_clean(&self) -> bool {
        self.failed_count() == 0
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
