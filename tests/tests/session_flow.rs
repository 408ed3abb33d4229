//! Whole-pipeline scenarios: plan file in, project file out.

use std::fs;

use graft_tests::prelude::*;

#[test]
fn test_plan_batch_end_to_end() {
    // GIVEN the standard project on disk and a three-step plan
    let (_dir, path) = write_temp(&standard_text());
    let plan = Plan::from_toml(
        r#"
[[op]]
kind = "add-group"
name = "RegionFare"
parent = "Root"

[[op]]
kind = "add-file"
path = "Sources/User.model"
group = "Models"

[[op]]
kind = "add-file"
path = "Fixtures/sample.json"
group = "RegionFare"
"#,
    )
    .unwrap();

    // WHEN a session applies it and writes
    let mut session = Session::open(&path).unwrap();
    let report = session.apply_batch(&plan.requests().unwrap(), plan.policy());
    assert!(report.is_clean());
    assert_eq!(session.state(), SessionState::Mutating);
    session.write().unwrap();
    drop(session);

    // THEN the written document carries all three results and is clean
    let written = fs::read_to_string(&path).unwrap();
    let graph = parse_document(&written).unwrap();
    assert!(graph.validate().is_empty());
    assert_eq!(
        graph
            .find_by_label(NodeKind::Group, "RegionFare")
            .unwrap()
            .matches,
        1
    );
    assert!(written.contains("User.model"));
    assert!(written.contains("sample.json"));

    // AND the model file got a build entry while the json did not
    let model = graph
        .find_by_label(NodeKind::FileReference, "User.model")
        .unwrap()
        .id;
    let json = graph
        .find_by_label(NodeKind::FileReference, "sample.json")
        .unwrap()
        .id;
    let entries: Vec<_> = graph
        .nodes_of_kind(NodeKind::BuildFileEntry)
        .filter(|(_, node)| node.as_build_file_entry().unwrap().file_ref == model)
        .collect();
    assert_eq!(entries.len(), 1);
    let json_entries = graph
        .nodes_of_kind(NodeKind::BuildFileEntry)
        .filter(|(_, node)| node.as_build_file_entry().unwrap().file_ref == json)
        .count();
    assert_eq!(json_entries, 0);
}

#[test]
fn test_fail_fast_plan_stops_and_still_writes_the_prefix() {
    // GIVEN a plan whose second step names a missing group
    let (_dir, path) = write_temp(&standard_text());
    let plan = Plan::from_toml(
        r#"
on_error = "fail-fast"

[[op]]
kind = "add-group"
name = "First"
parent = "Root"

[[op]]
kind = "add-group"
name = "Lost"
parent = "DoesNotExist"

[[op]]
kind = "add-group"
name = "Never"
parent = "Root"
"#,
    )
    .unwrap();

    // WHEN
    let mut session = Session::open(&path).unwrap();
    let report = session.apply_batch(&plan.requests().unwrap(), plan.policy());
    session.write().unwrap();
    drop(session);

    // THEN the batch stopped at the failure and only the prefix landed
    assert_eq!(report.len(), 2);
    assert_eq!(report.applied_count(), 1);
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("First"));
    assert!(!written.contains("Never"));
}

#[test]
fn test_corrupted_document_refuses_to_serialize() {
    // GIVEN a double-parent document on disk
    let (_dir, path) = write_temp(&double_parent_text());
    let before = fs::read_to_string(&path).unwrap();

    // WHEN a session tries to write it back
    let mut session = Session::open(&path).unwrap();
    let result = session.write();

    // THEN the gate refuses and the bytes never changed
    match result.unwrap_err() {
        SessionError::ValidationFailed { violations } => {
            assert!(violations
                .of_kind(ViolationKind::MultipleParents)
                .next()
                .is_some());
        }
        other => panic!("expected ValidationFailed, got {other}"),
    }
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn test_concurrent_sessions_are_excluded() {
    // GIVEN one session holding the project
    let (_dir, path) = write_temp(&standard_text());
    let first = Session::open(&path).unwrap();

    // WHEN a second one tries to open the same file
    let second = Session::open(&path);

    // THEN it is turned away until the first session ends
    assert!(matches!(second.unwrap_err(), SessionError::Locked { .. }));
    drop(first);
    assert!(Session::open(&path).is_ok());
}
