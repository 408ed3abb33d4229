//! Mutation scenarios driven from parsed documents.

use graft_tests::prelude::*;

fn parsed_standard() -> (ProjectGraph, IdAllocator) {
    let graph = parse_document(&standard_text()).unwrap();
    let allocator = IdAllocator::seeded_from(&graph);
    (graph, allocator)
}

#[test]
fn test_adding_a_model_wires_file_and_build_entry() {
    // GIVEN the standard project, freshly parsed
    let (mut graph, mut allocator) = parsed_standard();
    let before_len = graph.len();

    // WHEN User.model is added under Models
    let mut executor = MutationExecutor::new(&mut graph, &mut allocator);
    let output = executor
        .execute(&MutationRequest::AddSourceFile {
            path: "Sources/User.model".to_string(),
            name: None,
            parent_group: "Models".to_string(),
        })
        .unwrap();

    // THEN exactly two nodes were created: the file under Models and
    // its entry inside the Sources phase
    assert_eq!(graph.len(), before_len + 2);
    let file = output.created_file().unwrap();
    let entry = output.created_entry().unwrap();
    let models = graph.find_by_label(NodeKind::Group, "Models").unwrap().id;
    let sources = graph
        .find_by_label(NodeKind::BuildPhase, "Sources")
        .unwrap()
        .id;
    assert_eq!(graph.parent_of(file), Some(models));
    assert_eq!(graph.owning_phases(entry), vec![sources]);
    assert!(graph.validate().is_empty());

    // AND the rendered document names both new nodes
    let text = serialize(&graph);
    assert!(text.contains(&format!("{file} /* User.model */")));
    assert!(text.contains(&format!("{entry} /* User.model in Sources */")));
}

#[test]
fn test_relocation_preserves_relative_order() {
    // GIVEN three files under Components and an empty RegionFare group
    let (mut graph, mut allocator) = parsed_standard();
    let mut executor = MutationExecutor::new(&mut graph, &mut allocator);
    let mut moved = Vec::new();
    for path in ["first.json", "second.json", "third.json"] {
        let output = executor
            .execute(&MutationRequest::AddSourceFile {
                path: path.to_string(),
                name: None,
                parent_group: "Components".to_string(),
            })
            .unwrap();
        moved.push(output.created_file().unwrap());
    }
    executor
        .execute(&MutationRequest::AddGroup {
            name: "RegionFare".to_string(),
            parent_group: "Root".to_string(),
            children: Vec::new(),
        })
        .unwrap();

    // WHEN they are moved, listed in reverse order in the request
    let request_order: Vec<ObjectId> = moved.iter().rev().copied().collect();
    executor
        .execute(&MutationRequest::RelocateChildren {
            children: request_order,
            from_group: "Components".to_string(),
            to_group: "RegionFare".to_string(),
        })
        .unwrap();

    // THEN the target holds them in their original relative order and
    // every file has exactly one parent
    let target = graph
        .find_by_label(NodeKind::Group, "RegionFare")
        .unwrap()
        .id;
    let children = graph.node(target).unwrap().as_group().unwrap().children.clone();
    assert_eq!(children, moved);
    for file in &moved {
        assert_eq!(graph.parents_of(*file), vec![target]);
    }
    assert!(graph.validate().is_empty());
}

#[test]
fn test_ambiguous_label_resolution() {
    // GIVEN a second group named Components
    let (mut graph, mut allocator) = parsed_standard();
    let first = graph
        .find_by_label(NodeKind::Group, "Components")
        .unwrap()
        .id;
    let mut executor = MutationExecutor::new(&mut graph, &mut allocator);
    executor
        .execute(&MutationRequest::AddGroup {
            name: "Components".to_string(),
            parent_group: "Root".to_string(),
            children: Vec::new(),
        })
        .unwrap();

    // WHEN a file targets the duplicated label without strict mode
    let output = executor
        .execute(&MutationRequest::AddSourceFile {
            path: "View.json".to_string(),
            name: None,
            parent_group: "Components".to_string(),
        })
        .unwrap();

    // THEN the first group in file order received it
    assert_eq!(graph.parent_of(output.created_file().unwrap()), Some(first));

    // AND strict mode refuses the same label
    let mut strict = MutationExecutor::new(&mut graph, &mut allocator).strict(true);
    let result = strict.execute(&MutationRequest::AddSourceFile {
        path: "View2.json".to_string(),
        name: None,
        parent_group: "Components".to_string(),
    });
    assert!(matches!(
        result.unwrap_err(),
        MutationError::AmbiguousLabel { matches: 2, .. }
    ));
}

#[test]
fn test_rejected_request_changes_no_bytes() {
    // GIVEN
    let (mut graph, mut allocator) = parsed_standard();
    let before = serialize(&graph);

    // WHEN a request names a group that does not exist
    let mut executor = MutationExecutor::new(&mut graph, &mut allocator);
    let result = executor.execute(&MutationRequest::AddGroup {
        name: "Orphans".to_string(),
        parent_group: "DoesNotExist".to_string(),
        children: Vec::new(),
    });

    // THEN the serialized document is byte-identical to before
    assert!(matches!(
        result.unwrap_err(),
        MutationError::GroupNotFound { .. }
    ));
    assert_eq!(serialize(&graph), before);
}

#[test]
fn test_identifiers_burned_by_failures_are_never_reissued() {
    // GIVEN a request that draws an identifier and then fails: the new
    // group is allocated before its initial children are adopted
    let (mut graph, mut allocator) = parsed_standard();
    let existing = graph
        .find_by_label(NodeKind::FileReference, "existing.swift")
        .unwrap()
        .id;
    let before_issued = allocator.len();
    let mut executor = MutationExecutor::new(&mut graph, &mut allocator);
    let result = executor.execute(&MutationRequest::AddGroup {
        name: "Adopted".to_string(),
        parent_group: "Root".to_string(),
        children: vec![existing],
    });
    assert!(matches!(
        result.unwrap_err(),
        MutationError::Graph(GraphError::AlreadyParented { .. })
    ));

    // WHEN the rolled-back request is followed by more allocations
    assert!(graph.find_by_label(NodeKind::Group, "Adopted").is_none());
    assert_eq!(allocator.len(), before_issued + 1);
    let issued: Vec<ObjectId> = (0..64).map(|_| allocator.allocate()).collect();

    // THEN every identifier is distinct; the burned draw is never seen
    let unique: std::collections::HashSet<ObjectId> = issued.iter().copied().collect();
    assert_eq!(unique.len(), issued.len());
    assert!(issued.iter().all(|id| !graph.contains(*id)));
}

#[test]
fn test_repairing_a_double_parent_document() {
    // GIVEN a corrupted document, parsed from text
    let text = double_parent_text();
    let mut graph = parse_document(&text).unwrap();
    assert!(graph
        .validate()
        .of_kind(ViolationKind::MultipleParents)
        .next()
        .is_some());
    let shared = graph
        .find_by_label(NodeKind::FileReference, "existing.swift")
        .unwrap()
        .id;

    // WHEN the shared file is relocated into a single group
    let mut allocator = IdAllocator::seeded_from(&graph);
    let mut executor = MutationExecutor::new(&mut graph, &mut allocator);
    executor
        .execute(&MutationRequest::RelocateChildren {
            children: vec![shared],
            from_group: "Components".to_string(),
            to_group: "Models".to_string(),
        })
        .unwrap();

    // THEN the graph is clean and serializes to a clean document
    assert!(graph.validate().is_empty());
    let repaired = parse_document(&serialize(&graph)).unwrap();
    assert!(repaired.validate().is_empty());
}
