//! Parser error types.
//!
//! A parse failure is fatal to the whole load: no partial graph is ever
//! produced. Every error pinpoints the offending input.

use std::fmt;

use thiserror::Error;

/// Source location for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// A parse error with location information.
#[derive(Debug, Clone, Error)]
#[error("line {}, column {}: {message}", .span.line, .span.column)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
    pub expected: Option<String>,
    pub found: Option<String>,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            expected: None,
            found: None,
        }
    }

    pub fn unexpected_eof(span: Span, expected: &str) -> Self {
        Self {
            message: format!("unexpected end of input, expected {}", expected),
            span,
            expected: Some(expected.to_string()),
            found: Some("end of input".to_string()),
        }
    }

    pub fn unexpected(span: Span, expected: &str, found: impl fmt::Display) -> Self {
        Self {
            message: format!("expected {}, found {}", expected, found),
            span,
            expected: Some(expected.to_string()),
            found: Some(found.to_string()),
        }
    }

    pub fn line(&self) -> usize {
        self.span.line
    }

    pub fn column(&self) -> usize {
        self.span.column
    }
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
