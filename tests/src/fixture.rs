//! Shared project fixtures.
//!
//! Scenario tests either start from [`standard_project`] (the smallest
//! realistic tree), a deliberately corrupted variant, or [`quirky_text`]
//! (a hand-formatted document for verbatim-preservation checks).

use std::path::PathBuf;

use graft_core::ObjectId;
use graft_graph::{
    AppendMode, BuildFileEntry, BuildPhase, FileReference, Group, ProjectGraph,
};
use graft_serializer::serialize;

/// Root > {Models > existing.swift, Components}, a Sources phase, and
/// the build entry wiring existing.swift into it.
pub struct StandardProject {
    pub graph: ProjectGraph,
    pub root: ObjectId,
    pub models: ObjectId,
    pub components: ObjectId,
    pub sources: ObjectId,
    pub existing_file: ObjectId,
    pub existing_entry: ObjectId,
}

pub fn standard_project() -> StandardProject {
    let mut graph = ProjectGraph::new();
    let root = ObjectId::generate();
    let models = ObjectId::generate();
    let components = ObjectId::generate();
    let sources = ObjectId::generate();
    let existing_file = ObjectId::generate();
    let existing_entry = ObjectId::generate();

    graph
        .insert_node(root, Group::new("Root").into())
        .expect("fresh id");
    graph
        .insert_node(models, Group::new("Models").into())
        .expect("fresh id");
    graph
        .insert_node(components, Group::new("Components").into())
        .expect("fresh id");
    graph
        .insert_node(sources, BuildPhase::new("Sources").into())
        .expect("fresh id");
    graph
        .insert_node(
            existing_file,
            FileReference::from_path("Sources/existing.swift").into(),
        )
        .expect("fresh id");
    graph
        .insert_node(existing_entry, BuildFileEntry::new(existing_file).into())
        .expect("fresh id");

    graph
        .append_child(root, models, AppendMode::Strict)
        .expect("fixture wiring");
    graph
        .append_child(root, components, AppendMode::Strict)
        .expect("fixture wiring");
    graph
        .append_child(models, existing_file, AppendMode::Strict)
        .expect("fixture wiring");
    graph
        .append_child(sources, existing_entry, AppendMode::Strict)
        .expect("fixture wiring");

    StandardProject {
        graph,
        root,
        models,
        components,
        sources,
        existing_file,
        existing_entry,
    }
}

/// Canonical serialized form of [`standard_project`].
pub fn standard_text() -> String {
    serialize(&standard_project().graph)
}

/// A document where existing.swift is listed by both Models and
/// Components. Built from preset child lists, since the guarded
/// primitives refuse to create this shape.
pub fn double_parent_project() -> StandardProject {
    let mut graph = ProjectGraph::new();
    let root = ObjectId::generate();
    let models = ObjectId::generate();
    let components = ObjectId::generate();
    let sources = ObjectId::generate();
    let existing_file = ObjectId::generate();
    let existing_entry = ObjectId::generate();

    graph
        .insert_node(
            root,
            Group::with_children("Root", vec![models, components]).into(),
        )
        .expect("fresh id");
    graph
        .insert_node(
            models,
            Group::with_children("Models", vec![existing_file]).into(),
        )
        .expect("fresh id");
    graph
        .insert_node(
            components,
            Group::with_children("Components", vec![existing_file]).into(),
        )
        .expect("fresh id");
    graph
        .insert_node(
            sources,
            BuildPhase::with_files("Sources", vec![existing_entry]).into(),
        )
        .expect("fresh id");
    graph
        .insert_node(
            existing_file,
            FileReference::from_path("Sources/existing.swift").into(),
        )
        .expect("fresh id");
    graph
        .insert_node(existing_entry, BuildFileEntry::new(existing_file).into())
        .expect("fresh id");

    StandardProject {
        graph,
        root,
        models,
        components,
        sources,
        existing_file,
        existing_entry,
    }
}

pub fn double_parent_text() -> String {
    serialize(&double_parent_project().graph)
}

// Identifiers inside quirky_text, for tests that target its nodes.
pub const QUIRKY_LEGACY_C: &str = "AF3D9E2210B1C44D00E6F5A1";
pub const QUIRKY_NOTES_MD: &str = "AF3D9E2210B1C44D00E6F5A2";
pub const QUIRKY_ROOT: &str = "1B0A44F0229E11D400C7D1B2";
pub const QUIRKY_KERNEL: &str = "1B0A44F0229E11D400C7D1B3";
pub const QUIRKY_ENTRY: &str = "9D00C4E81A22B3F400AA10C5";
pub const QUIRKY_PHASE: &str = "9D00C4E81A22B3F400AA10C6";

/// A hand-formatted document: stray preamble text, an unrecognized
/// section, uneven spacing, an inline entry body and a field annotation.
/// Everything the editor does not touch must survive byte-for-byte.
pub fn quirky_text() -> &'static str {
    "// !$*UTF8*$!\n\
     // archiveVersion 1\n\
     {\n\
     \tobjectVersion = 56;\n\
     \n\
     /* Begin BuildConfiguration section */\n\
     \t\tDEADBEEF00112233DEADBEEF /* Debug */ = {\n\
     \t\t\tisa = BuildConfiguration;\n\
     \t\t\tname = Debug;\n\
     \t\t};\n\
     /* End BuildConfiguration section */\n\
     \n\
     /* Begin FileReference section */\n\
     \t\tAF3D9E2210B1C44D00E6F5A1   /* legacy.c */   = {isa = FileReference;  kind = sourcecode.c;   path = \"Sources/legacy.c\"; };\n\
     \t\tAF3D9E2210B1C44D00E6F5A2 /* notes.md */ = {\n\
     \t\t\tisa = FileReference;\n\
     \t\t\tkind = text;\n\
     \t\t\tpath = docs/notes.md /* relative */;\n\
     \t\t};\n\
     /* End FileReference section */\n\
     \n\
     /* Begin Group section */\n\
     \t\t1B0A44F0229E11D400C7D1B2 /* Root */ = {\n\
     \t\t\tisa = Group;\n\
     \t\t\tname = Root;\n\
     \t\t\tchildren = (\n\
     \t\t\t\t1B0A44F0229E11D400C7D1B3 /* Kernel */,\n\
     \t\t\t\tAF3D9E2210B1C44D00E6F5A2 /* notes.md */,\n\
     \t\t\t);\n\
     \t\t};\n\
     \t\t1B0A44F0229E11D400C7D1B3 /* Kernel */ = {isa = Group; name = Kernel; children = (AF3D9E2210B1C44D00E6F5A1, ); };\n\
     /* End Group section */\n\
     \n\
     /* Begin BuildFileEntry section */\n\
     \t\t9D00C4E81A22B3F400AA10C5 /* legacy.c in Sources */ = {isa = BuildFileEntry; fileRef = AF3D9E2210B1C44D00E6F5A1; };\n\
     /* End BuildFileEntry section */\n\
     \n\
     /* Begin BuildPhase section */\n\
     \t\t9D00C4E81A22B3F400AA10C6 /* Sources */ = {\n\
     \t\t\tisa = BuildPhase;\n\
     \t\t\tname = Sources;\n\
     \t\t\tfiles = (\n\
     \t\t\t\t9D00C4E81A22B3F400AA10C5 /* legacy.c in Sources */,\n\
     \t\t\t);\n\
     \t\t};\n\
     /* End BuildPhase section */\n\
     \n\
     }\n"
}

/// Write `text` into a scratch project file.
pub fn write_temp(text: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("scratch dir");
    let path = dir.path().join("demo.graftproj");
    std::fs::write(&path, text).expect("write fixture");
    (dir, path)
}
