//! Document layout, for re-emitting what was not touched.
//!
//! A parsed document is an alternating run of verbatim text and recognized
//! node sections. Verbatim segments carry everything the engine does not
//! model (the preamble, unrecognized sections, separators, the trailer) and
//! are emitted back byte-for-byte. Sections carry their marker lines and
//! the file order of their entries; the entry text itself lives with the
//! node records.

use graft_core::{NodeKind, ObjectId};

/// One region of the source document, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Unmodeled text, preserved exactly.
    Verbatim(String),
    /// A recognized node section.
    Section(Section),
}

/// A delimited section holding every node of one kind, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub kind: NodeKind,
    /// The exact begin-marker line, newline included.
    pub header: String,
    /// The exact end-marker line, newline included.
    pub footer: String,
    /// Entry identifiers in file order. New entries append.
    pub entries: Vec<ObjectId>,
}

impl Section {
    /// A section in canonical shape, for documents that never had one.
    pub fn synthetic(kind: NodeKind) -> Self {
        Self {
            kind,
            header: format!("/* Begin {} section */\n", kind.tag()),
            footer: format!("/* End {} section */\n", kind.tag()),
            entries: Vec::new(),
        }
    }
}

/// The ordered regions of a document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentLayout {
    pub segments: Vec<Segment>,
}

impl DocumentLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// The section for a kind, if the document has one.
    pub fn section(&self, kind: NodeKind) -> Option<&Section> {
        self.sections().find(|section| section.kind == kind)
    }

    /// Mutable access to the section for a kind.
    pub fn section_mut(&mut self, kind: NodeKind) -> Option<&mut Section> {
        self.segments.iter_mut().find_map(|segment| match segment {
            Segment::Section(section) if section.kind == kind => Some(section),
            _ => None,
        })
    }

    /// Create the section for a kind if the document lacks one.
    ///
    /// A synthetic section is placed after the last existing section so
    /// trailing verbatim text (the document trailer) stays last.
    pub fn ensure_section(&mut self, kind: NodeKind) {
        if self.section(kind).is_none() {
            let at = self
                .segments
                .iter()
                .rposition(|segment| matches!(segment, Segment::Section(_)))
                .map(|i| i + 1)
                .unwrap_or(self.segments.len());
            self.segments.insert(at, Segment::Section(Section::synthetic(kind)));
        }
    }

    /// All sections, in document order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Section(section) => Some(section),
            _ => None,
        })
    }
}
