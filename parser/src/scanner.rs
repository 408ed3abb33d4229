//! Low-level positioned scanner over document text.
//!
//! The document format is only structured inside sections; everything else
//! is opaque bytes to preserve. So there is no whole-input tokenizer here:
//! the scanner hands out positioned primitives (lines, words, quoted
//! strings, annotations) and the parser decides which region it is in.

use crate::{ParseError, ParseResult, Span};

/// Characters allowed in a bare (unquoted) word: identifiers, kind tags,
/// and plain file paths.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '/' | '-')
}

pub struct Scanner<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Current byte offset.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Everything not yet consumed.
    pub fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    pub fn at_eof(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    /// A zero-width span at the current position.
    pub fn span_here(&self) -> Span {
        Span::new(self.pos, self.pos, self.line, self.column)
    }

    pub fn span_from(&self, start: usize, start_line: usize, start_column: usize) -> Span {
        Span::new(start, self.pos, start_line, start_column)
    }

    /// Position snapshot for `span_from`.
    pub fn mark(&self) -> (usize, usize, usize) {
        (self.pos, self.line, self.column)
    }

    pub fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    pub fn next_char(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.pos = pos + c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            Some(c)
        } else {
            None
        }
    }

    /// The rest of the current line, newline included, without consuming.
    pub fn peek_line(&self) -> &'a str {
        let rest = &self.input[self.pos..];
        match rest.find('\n') {
            Some(i) => &rest[..=i],
            None => rest,
        }
    }

    /// Consume through the end of the current line and return it, newline
    /// included (the final line of a file may lack one).
    pub fn consume_line(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.next_char() {
            if c == '\n' {
                break;
            }
        }
        &self.input[start..self.pos]
    }

    /// Skip spaces and tabs, staying on the current line.
    pub fn skip_blanks(&mut self) {
        while let Some(c) = self.peek_char() {
            if c == ' ' || c == '\t' {
                self.next_char();
            } else {
                break;
            }
        }
    }

    /// Skip all whitespace, newlines included. Used inside entry bodies,
    /// where line breaks carry no meaning.
    pub fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    pub fn eat_char(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.next_char();
            true
        } else {
            false
        }
    }

    pub fn expect_char(&mut self, expected: char) -> ParseResult<()> {
        match self.peek_char() {
            Some(c) if c == expected => {
                self.next_char();
                Ok(())
            }
            Some(c) => Err(ParseError::unexpected(
                self.span_here(),
                &format!("`{}`", expected),
                format!("`{}`", c),
            )),
            None => Err(ParseError::unexpected_eof(
                self.span_here(),
                &format!("`{}`", expected),
            )),
        }
    }

    /// Scan a bare word. Errors if no word character is present.
    pub fn scan_word(&mut self) -> ParseResult<&'a str> {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if is_word_char(c) {
                self.next_char();
            } else {
                break;
            }
        }
        if self.pos == start {
            return match self.peek_char() {
                Some(c) => Err(ParseError::unexpected(
                    self.span_here(),
                    "a word",
                    format!("`{}`", c),
                )),
                None => Err(ParseError::unexpected_eof(self.span_here(), "a word")),
            };
        }
        Ok(&self.input[start..self.pos])
    }

    /// Scan a double-quoted string, opening quote already consumed.
    pub fn scan_quoted(&mut self, open: (usize, usize, usize)) -> ParseResult<String> {
        let mut value = String::new();
        loop {
            match self.next_char() {
                None => {
                    let (start, line, column) = open;
                    return Err(ParseError::new(
                        "unterminated string",
                        self.span_from(start, line, column),
                    ));
                }
                Some('"') => return Ok(value),
                Some('\\') => {
                    let escaped = match self.next_char() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('"') => '"',
                        Some('\\') => '\\',
                        Some(c) => {
                            return Err(ParseError::new(
                                format!("invalid escape `\\{}`", c),
                                self.span_here(),
                            ));
                        }
                        None => {
                            return Err(ParseError::unexpected_eof(
                                self.span_here(),
                                "escape character",
                            ));
                        }
                    };
                    value.push(escaped);
                }
                Some(c) => value.push(c),
            }
        }
    }

    /// Returns true if an annotation (`/* ... */`) starts here.
    pub fn at_annotation(&self) -> bool {
        self.remaining().starts_with("/*")
    }

    /// Scan an annotation and return its trimmed inner text. The caller
    /// has checked `at_annotation`.
    pub fn scan_annotation(&mut self) -> ParseResult<String> {
        let open = self.mark();
        self.next_char();
        self.next_char();
        let start = self.pos;
        loop {
            if self.remaining().starts_with("*/") {
                let inner = self.input[start..self.pos].trim().to_string();
                self.next_char();
                self.next_char();
                return Ok(inner);
            }
            if self.next_char().is_none() {
                let (start, line, column) = open;
                return Err(ParseError::new(
                    "unterminated annotation",
                    self.span_from(start, line, column),
                ));
            }
        }
    }
}
