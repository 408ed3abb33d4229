//! Identity type for graft nodes.
//!
//! Every node in a project graph is named by a 24-character uppercase
//! hexadecimal token. Identifiers are:
//! - Unique within their graph
//! - Immutable once assigned
//! - Opaque to external users (the hex digits carry no meaning)
//!
//! Fresh identifiers are derived from v4 UUIDs: the UUID's hex form,
//! uppercased and truncated to 24 characters. Collision checking against
//! the set of known identifiers is the allocator's job, not this type's.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex_lite::Regex;
use uuid::Uuid;

use crate::{GraphError, GraphResult};

/// Number of hexadecimal characters in an identifier.
pub const ID_LEN: usize = 24;

fn id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // The pattern is a compile-time constant; construction cannot fail.
    PATTERN.get_or_init(|| Regex::new("^[0-9A-F]{24}$").expect("identifier pattern"))
}

/// Unique identifier for a node in a project graph.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; ID_LEN]);

impl ObjectId {
    /// Parse an identifier from its textual form.
    ///
    /// Accepts exactly 24 uppercase hexadecimal characters.
    pub fn parse(text: &str) -> GraphResult<Self> {
        if !id_pattern().is_match(text) {
            return Err(GraphError::MalformedIdentifier(text.to_string()));
        }
        let mut bytes = [0u8; ID_LEN];
        bytes.copy_from_slice(text.as_bytes());
        Ok(Self(bytes))
    }

    /// Generate a fresh identifier from a v4 UUID.
    ///
    /// The result is random; callers that need uniqueness against a set of
    /// existing identifiers must verify and retry (see the allocator).
    pub fn generate() -> Self {
        let mut buf = Uuid::encode_buffer();
        let hex = Uuid::new_v4().simple().encode_upper(&mut buf);
        let mut bytes = [0u8; ID_LEN];
        bytes.copy_from_slice(&hex.as_bytes()[..ID_LEN]);
        Self(bytes)
    }

    /// Returns true if the given text is a well-formed identifier.
    pub fn is_valid(text: &str) -> bool {
        id_pattern().is_match(text)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            fmt::Write::write_char(f, b as char)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self)
    }
}

impl FromStr for ObjectId {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
