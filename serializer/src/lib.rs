//! Graft Serializer
//!
//! Turns a project graph back into document text. Pure and deterministic:
//! the same graph always yields the same bytes, and nothing outside the
//! returned string is touched.
//!
//! Untouched regions come back byte-for-byte from their recorded source
//! text; only new or structurally modified entries are rendered in the
//! canonical style.

mod emit;

pub use emit::serialize;
