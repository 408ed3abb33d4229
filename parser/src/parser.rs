//! Document parser: text in, graph out.
//!
//! Only the four recognized sections are structured. Everything between
//! them (preamble, trailer, sections of unknown kinds) is captured as
//! verbatim segments, and every parsed entry keeps its exact source text,
//! so an untouched document survives a load/serialize round trip
//! byte-for-byte.
//!
//! The parser checks shape, not meaning: identifiers mentioned in child
//! lists may point anywhere. Cross-node integrity is the graph's job.

use graft_core::{basename, FileKind, NodeKind, ObjectId};
use graft_graph::{
    BuildFileEntry, BuildPhase, DocumentLayout, FileReference, Group, Node, ProjectGraph, Section,
    Segment,
};
use std::collections::HashSet;

use crate::{ParseError, ParseResult, Scanner, Span};

/// Parse a complete document into a project graph.
pub fn parse_document(input: &str) -> ParseResult<ProjectGraph> {
    Parser::new(input).parse()
}

/// If the line is a section begin marker, the kind tag between the
/// delimiters. Marker lines carry nothing but the marker.
fn begin_marker(line: &str) -> Option<&str> {
    marker_tag(line, "/* Begin ")
}

/// If the line is a section end marker, the kind tag.
fn end_marker(line: &str) -> Option<&str> {
    marker_tag(line, "/* End ")
}

fn marker_tag<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let tag = line.trim().strip_prefix(prefix)?.strip_suffix(" section */")?;
    (!tag.is_empty() && !tag.contains(' ')).then_some(tag)
}

#[derive(Debug, Clone)]
enum FieldValue {
    Scalar(String),
    List(Vec<ObjectId>),
}

#[derive(Debug, Clone)]
struct Field {
    key: String,
    value: FieldValue,
    span: Span,
}

pub struct Parser<'a> {
    input: &'a str,
    scanner: Scanner<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            scanner: Scanner::new(input),
        }
    }

    /// Consume the whole input and assemble the graph.
    pub fn parse(mut self) -> ParseResult<ProjectGraph> {
        let mut layout = DocumentLayout::new();
        let mut nodes: Vec<(ObjectId, Node, String)> = Vec::new();
        let mut defined: HashSet<ObjectId> = HashSet::new();
        let mut seen_sections: HashSet<NodeKind> = HashSet::new();
        let mut verbatim_start = 0usize;

        while !self.scanner.at_eof() {
            let line = self.scanner.peek_line();
            if let Some(kind) = begin_marker(line).and_then(NodeKind::from_tag) {
                if verbatim_start < self.scanner.pos() {
                    let text = self.input[verbatim_start..self.scanner.pos()].to_string();
                    layout.segments.push(Segment::Verbatim(text));
                }
                if !seen_sections.insert(kind) {
                    return Err(ParseError::new(
                        format!("second {} section", kind.tag()),
                        self.scanner.span_here(),
                    ));
                }
                let section = self.parse_section(kind, &mut nodes, &mut defined)?;
                layout.segments.push(Segment::Section(section));
                verbatim_start = self.scanner.pos();
                continue;
            }
            if end_marker(line).and_then(NodeKind::from_tag).is_some() {
                return Err(ParseError::new(
                    "section end without a matching begin",
                    self.scanner.span_here(),
                ));
            }
            self.scanner.consume_line();
        }

        if verbatim_start < self.scanner.pos() {
            let text = self.input[verbatim_start..self.scanner.pos()].to_string();
            layout.segments.push(Segment::Verbatim(text));
        }

        // Duplicates were rejected above, so assembly cannot fail; the
        // mapping is kept so a defect surfaces as an error, not a panic.
        ProjectGraph::assemble(layout, nodes)
            .map_err(|e| ParseError::new(e.to_string(), Span::new(0, 0, 1, 1)))
    }

    fn parse_section(
        &mut self,
        kind: NodeKind,
        nodes: &mut Vec<(ObjectId, Node, String)>,
        defined: &mut HashSet<ObjectId>,
    ) -> ParseResult<Section> {
        let header = self.scanner.consume_line().to_string();
        let mut entries = Vec::new();

        loop {
            if self.scanner.at_eof() {
                return Err(ParseError::unexpected_eof(
                    self.scanner.span_here(),
                    &format!("`/* End {} section */`", kind.tag()),
                ));
            }
            let line = self.scanner.peek_line();
            if let Some(tag) = end_marker(line) {
                if NodeKind::from_tag(tag) == Some(kind) {
                    let footer = self.scanner.consume_line().to_string();
                    return Ok(Section {
                        kind,
                        header,
                        footer,
                        entries,
                    });
                }
                return Err(ParseError::new(
                    format!("`{}` section end inside the {} section", tag, kind.tag()),
                    self.scanner.span_here(),
                ));
            }
            if begin_marker(line).is_some() {
                return Err(ParseError::new(
                    format!("section begins inside the {} section", kind.tag()),
                    self.scanner.span_here(),
                ));
            }

            let entry_span = self.scanner.span_here();
            let (id, node, raw) = self.parse_entry(kind)?;
            if !defined.insert(id) {
                return Err(ParseError::new(
                    format!("identifier {} is defined twice", id),
                    entry_span,
                ));
            }
            entries.push(id);
            nodes.push((id, node, raw));
        }
    }

    /// One entry, from its indentation through the line end after `};`.
    fn parse_entry(&mut self, kind: NodeKind) -> ParseResult<(ObjectId, Node, String)> {
        let (entry_start, entry_line, entry_column) = self.scanner.mark();
        self.scanner.skip_blanks();
        if matches!(self.scanner.peek_char(), Some('\n')) {
            return Err(ParseError::new(
                "blank line inside section",
                self.scanner.span_here(),
            ));
        }

        let id = self.scan_identifier()?;
        self.scanner.skip_blanks();
        if self.scanner.at_annotation() {
            self.scanner.scan_annotation()?;
            self.scanner.skip_blanks();
        }
        self.scanner.expect_char('=')?;
        self.scanner.skip_whitespace();
        self.scanner.expect_char('{')?;
        let fields = self.parse_fields()?;
        self.scanner.skip_blanks();
        self.scanner.expect_char(';')?;
        self.finish_line()?;

        let entry_span = self.scanner.span_from(entry_start, entry_line, entry_column);
        let node = build_node(kind, &fields, entry_span)?;
        let raw = self.input[entry_start..self.scanner.pos()].to_string();
        Ok((id, node, raw))
    }

    /// The fields of one entry body, through the closing `}`.
    fn parse_fields(&mut self) -> ParseResult<Vec<Field>> {
        let mut fields = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        loop {
            self.scanner.skip_whitespace();
            if self.scanner.eat_char('}') {
                return Ok(fields);
            }
            if self.scanner.at_eof() {
                return Err(ParseError::unexpected_eof(
                    self.scanner.span_here(),
                    "a field or `}`",
                ));
            }

            let (start, line, column) = self.scanner.mark();
            let key = self.scanner.scan_word()?.to_string();
            if !seen.insert(key.clone()) {
                return Err(ParseError::new(
                    format!("field `{}` appears twice", key),
                    self.scanner.span_from(start, line, column),
                ));
            }
            self.scanner.skip_blanks();
            self.scanner.expect_char('=')?;
            self.scanner.skip_whitespace();
            let value = self.parse_value()?;
            self.scanner.skip_blanks();
            if self.scanner.at_annotation() {
                self.scanner.scan_annotation()?;
                self.scanner.skip_blanks();
            }
            self.scanner.expect_char(';')?;
            fields.push(Field {
                key,
                value,
                span: self.scanner.span_from(start, line, column),
            });
        }
    }

    /// A field value: an identifier list in parentheses, a quoted string,
    /// or a bare word.
    fn parse_value(&mut self) -> ParseResult<FieldValue> {
        if self.scanner.eat_char('(') {
            let mut ids = Vec::new();
            loop {
                self.scanner.skip_whitespace();
                if self.scanner.eat_char(')') {
                    return Ok(FieldValue::List(ids));
                }
                ids.push(self.scan_identifier()?);
                self.scanner.skip_blanks();
                if self.scanner.at_annotation() {
                    self.scanner.scan_annotation()?;
                }
                self.scanner.skip_whitespace();
                if self.scanner.eat_char(',') {
                    continue;
                }
                self.scanner.expect_char(')')?;
                return Ok(FieldValue::List(ids));
            }
        }
        let open = self.scanner.mark();
        if self.scanner.eat_char('"') {
            return Ok(FieldValue::Scalar(self.scanner.scan_quoted(open)?));
        }
        Ok(FieldValue::Scalar(self.scanner.scan_word()?.to_string()))
    }

    fn scan_identifier(&mut self) -> ParseResult<ObjectId> {
        let (start, line, column) = self.scanner.mark();
        let word = self.scanner.scan_word()?;
        ObjectId::parse(word).map_err(|_| {
            ParseError::new(
                format!("malformed identifier `{}`", word),
                self.scanner.span_from(start, line, column),
            )
        })
    }

    /// Consume trailing blanks and the newline. The last line of a file
    /// may end at EOF instead.
    fn finish_line(&mut self) -> ParseResult<()> {
        self.scanner.skip_blanks();
        match self.scanner.peek_char() {
            None => Ok(()),
            Some('\n') => {
                self.scanner.next_char();
                Ok(())
            }
            Some(c) => Err(ParseError::unexpected(
                self.scanner.span_here(),
                "end of line",
                format!("`{}`", c),
            )),
        }
    }
}

// ==================== Entry field checking ====================

fn build_node(kind: NodeKind, fields: &[Field], entry_span: Span) -> ParseResult<Node> {
    let isa = fields
        .first()
        .filter(|field| field.key == "isa")
        .ok_or_else(|| {
            ParseError::new("entry must declare `isa` as its first field", entry_span)
        })?;
    let tag = scalar(isa)?;
    if tag != kind.tag() {
        return Err(ParseError::new(
            format!("`isa = {}` inside the {} section", tag, kind.tag()),
            isa.span,
        ));
    }
    let rest = &fields[1..];

    match kind {
        NodeKind::FileReference => {
            check_keys(kind, rest, &["kind", "name", "path"])?;
            let file_kind = FileKind::new(required_scalar(kind, rest, "kind", entry_span)?);
            let path = required_scalar(kind, rest, "path", entry_span)?.to_string();
            let name = match find(rest, "name") {
                Some(field) => scalar(field)?.to_string(),
                None => basename(&path).to_string(),
            };
            Ok(FileReference::new(name, file_kind, path).into())
        }
        NodeKind::Group => {
            check_keys(kind, rest, &["name", "children"])?;
            let name = required_scalar(kind, rest, "name", entry_span)?;
            let children = required_list(kind, rest, "children", entry_span)?;
            Ok(Group::with_children(name, children).into())
        }
        NodeKind::BuildPhase => {
            check_keys(kind, rest, &["name", "files"])?;
            let name = required_scalar(kind, rest, "name", entry_span)?;
            let files = required_list(kind, rest, "files", entry_span)?;
            Ok(BuildPhase::with_files(name, files).into())
        }
        NodeKind::BuildFileEntry => {
            check_keys(kind, rest, &["fileRef"])?;
            let field = require(kind, rest, "fileRef", entry_span)?;
            let file_ref = ObjectId::parse(scalar(field)?).map_err(|_| {
                ParseError::new("field `fileRef` must be an identifier", field.span)
            })?;
            Ok(BuildFileEntry::new(file_ref).into())
        }
    }
}

fn find<'f>(fields: &'f [Field], key: &str) -> Option<&'f Field> {
    fields.iter().find(|field| field.key == key)
}

fn require<'f>(
    kind: NodeKind,
    fields: &'f [Field],
    key: &str,
    entry_span: Span,
) -> ParseResult<&'f Field> {
    find(fields, key).ok_or_else(|| {
        ParseError::new(
            format!("{} entry is missing field `{}`", kind.tag(), key),
            entry_span,
        )
    })
}

fn required_scalar<'f>(
    kind: NodeKind,
    fields: &'f [Field],
    key: &str,
    entry_span: Span,
) -> ParseResult<&'f str> {
    scalar(require(kind, fields, key, entry_span)?)
}

fn required_list(
    kind: NodeKind,
    fields: &[Field],
    key: &str,
    entry_span: Span,
) -> ParseResult<Vec<ObjectId>> {
    match &require(kind, fields, key, entry_span)?.value {
        FieldValue::List(ids) => Ok(ids.clone()),
        FieldValue::Scalar(_) => Err(ParseError::new(
            format!("field `{}` must be a list", key),
            entry_span,
        )),
    }
}

fn scalar(field: &Field) -> ParseResult<&str> {
    match &field.value {
        FieldValue::Scalar(text) => Ok(text),
        FieldValue::List(_) => Err(ParseError::new(
            format!("field `{}` must be a single value", field.key),
            field.span,
        )),
    }
}

/// Unrecognized fields are rejected rather than silently dropped: a typed
/// node could not re-render them after a structural edit.
fn check_keys(kind: NodeKind, fields: &[Field], allowed: &[&str]) -> ParseResult<()> {
    for field in fields {
        if field.key == "isa" {
            return Err(ParseError::new("field `isa` appears twice", field.span));
        }
        if !allowed.contains(&field.key.as_str()) {
            return Err(ParseError::new(
                format!("unknown field `{}` in a {} entry", field.key, kind.tag()),
                field.span,
            ));
        }
    }
    Ok(())
}
