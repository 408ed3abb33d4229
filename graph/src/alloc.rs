//! Identifier allocation with collision tracking.
//!
//! Fresh identifiers are drawn from random generation, checked against
//! every identifier this allocator has ever seen, and registered before
//! they are handed out. Registration is permanent for the allocator's
//! lifetime: an identifier stays burned even if the operation that
//! requested it is rolled back, so a later retry can never collide with
//! a half-applied past.

use graft_core::ObjectId;
use std::collections::HashSet;

use crate::ProjectGraph;

/// Tracks every identifier in circulation and issues fresh ones.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    issued: HashSet<ObjectId>,
}

impl IdAllocator {
    /// An allocator with no identifiers registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// An allocator pre-loaded with every identifier a graph defines.
    pub fn seeded_from(graph: &ProjectGraph) -> Self {
        Self {
            issued: graph.ids().collect(),
        }
    }

    /// Issue a fresh identifier.
    ///
    /// Generation retries until the candidate is unseen. With 96 bits of
    /// randomness a retry is a theoretical case, but the check is what
    /// turns "unlikely" into "guaranteed fresh".
    pub fn allocate(&mut self) -> ObjectId {
        loop {
            let candidate = ObjectId::generate();
            if self.issued.insert(candidate) {
                return candidate;
            }
        }
    }

    /// Register an identifier that entered the graph from outside, e.g.
    /// one read from an existing document. Returns false if it was
    /// already known.
    pub fn reserve(&mut self, id: ObjectId) -> bool {
        self.issued.insert(id)
    }

    /// Check whether an identifier has been issued or reserved.
    pub fn is_issued(&self, id: ObjectId) -> bool {
        self.issued.contains(&id)
    }

    /// Number of identifiers registered.
    pub fn len(&self) -> usize {
        self.issued.len()
    }

    /// Returns true if no identifier has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }
}
