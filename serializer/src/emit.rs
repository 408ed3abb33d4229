//! Canonical document emission.
//!
//! Layout walk: verbatim segments and section markers come straight from
//! the recorded layout; entries come from their recorded source text when
//! unmodified, or are rendered here when new or changed. New entries were
//! appended to their section's order at insert time, so they land at the
//! end of the section, after everything that was already there.

use graft_core::{basename, ObjectId};
use graft_graph::{Node, ProjectGraph, Segment};
use std::fmt::Write;

/// Serialize the graph to document text.
pub fn serialize(graph: &ProjectGraph) -> String {
    let mut out = String::new();
    for segment in &graph.layout().segments {
        match segment {
            Segment::Verbatim(text) => out.push_str(text),
            Segment::Section(section) => {
                out.push_str(&section.header);
                for id in &section.entries {
                    match graph.raw_text(*id) {
                        Some(raw) => out.push_str(raw),
                        None => {
                            if let Some(node) = graph.node(*id) {
                                render_entry(&mut out, graph, *id, node);
                            }
                        }
                    }
                }
                out.push_str(&section.footer);
            }
        }
    }
    out
}

fn render_entry(out: &mut String, graph: &ProjectGraph, id: ObjectId, node: &Node) {
    match node {
        Node::BuildFileEntry(entry) => {
            let _ = write!(out, "\t\t{}", id);
            annotate(out, graph, id);
            let _ = write!(out, " = {{isa = BuildFileEntry; fileRef = {}", entry.file_ref);
            annotate(out, graph, entry.file_ref);
            out.push_str("; };\n");
        }
        Node::FileReference(file) => {
            let _ = write!(out, "\t\t{}", id);
            write_annotation(out, &file.name);
            let _ = write!(
                out,
                " = {{isa = FileReference; kind = {};",
                value(file.kind.as_str())
            );
            // The name is implied when it matches the path basename; the
            // parser applies the same fallback when loading.
            if file.name != basename(&file.path) {
                let _ = write!(out, " name = {};", value(&file.name));
            }
            let _ = write!(out, " path = {}; }};\n", value(&file.path));
        }
        Node::Group(group) => {
            let _ = write!(out, "\t\t{}", id);
            write_annotation(out, &group.name);
            out.push_str(" = {\n");
            out.push_str("\t\t\tisa = Group;\n");
            let _ = write!(out, "\t\t\tname = {};\n", value(&group.name));
            render_id_list(out, graph, "children", &group.children);
            out.push_str("\t\t};\n");
        }
        Node::BuildPhase(phase) => {
            let _ = write!(out, "\t\t{}", id);
            write_annotation(out, &phase.name);
            out.push_str(" = {\n");
            out.push_str("\t\t\tisa = BuildPhase;\n");
            let _ = write!(out, "\t\t\tname = {};\n", value(&phase.name));
            render_id_list(out, graph, "files", &phase.files);
            out.push_str("\t\t};\n");
        }
    }
}

fn render_id_list(out: &mut String, graph: &ProjectGraph, key: &str, ids: &[ObjectId]) {
    let _ = write!(out, "\t\t\t{} = (\n", key);
    for id in ids {
        let _ = write!(out, "\t\t\t\t{}", id);
        annotate(out, graph, *id);
        out.push_str(",\n");
    }
    out.push_str("\t\t\t);\n");
}

/// Append ` /* label */` when the node has a resolvable label. Dangling
/// identifiers render bare rather than failing: the serializer never
/// refuses, the validation gate upstream does.
fn annotate(out: &mut String, graph: &ProjectGraph, id: ObjectId) {
    if let Some(label) = graph.label_of(id) {
        write_annotation(out, &label);
    }
}

/// Labels that cannot sit inside a comment (a `*/`, a control
/// character) are dropped from the annotation; the quoted name field
/// still carries them in full.
fn write_annotation(out: &mut String, label: &str) {
    if label.contains("*/") || label.chars().any(|c| c.is_control()) {
        return;
    }
    let _ = write!(out, " /* {} */", label);
}

/// Quote a value unless every character is safe to write bare. The bare
/// set matches what the parser accepts as a word.
fn value(text: &str) -> String {
    let bare = !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '/' | '-'));
    if bare {
        return text.to_string();
    }
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
