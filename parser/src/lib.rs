//! Graft Parser
//!
//! This crate reads project description text into the graph model:
//! - Section scanning with byte-exact capture of everything unrecognized
//! - Entry parsing (identifiers, annotations, fields, identifier lists)
//! - Error reporting with line and column information
//!
//! Any malformed input is fatal: the caller gets an error and no graph.

mod error;
mod parser;
mod scanner;

pub use error::*;
pub use parser::{parse_document, Parser};
pub use scanner::Scanner;
