//! Randomized integrity checks.
//!
//! Every request either applies fully or leaves no trace, so the graph
//! must validate cleanly after each step of any edit sequence.

use graft_tests::prelude::*;
use proptest::prelude::*;

const FILE_NAMES: [&str; 8] = [
    "alpha.swift",
    "beta.json",
    "gamma.model",
    "delta.png",
    "epsilon.c",
    "zeta.md",
    "eta.m",
    "theta.plist",
];
const GROUP_NAMES: [&str; 6] = [
    "Kernel",
    "Models",
    "Components",
    "Fixtures",
    "RegionFare",
    "Support",
];

/// An abstract edit; indices are interpreted against the graph as it
/// stands when the edit runs.
#[derive(Debug, Clone)]
enum EditSketch {
    AddFile { name: usize, group: usize },
    AddGroup { name: usize, parent: usize },
    Move { child: usize, from: usize, to: usize },
}

fn edit_strategy() -> impl Strategy<Value = EditSketch> {
    prop_oneof![
        (any::<usize>(), any::<usize>())
            .prop_map(|(name, group)| EditSketch::AddFile { name, group }),
        (any::<usize>(), any::<usize>())
            .prop_map(|(name, parent)| EditSketch::AddGroup { name, parent }),
        (any::<usize>(), any::<usize>(), any::<usize>())
            .prop_map(|(child, from, to)| EditSketch::Move { child, from, to }),
    ]
}

fn group_labels(graph: &ProjectGraph) -> Vec<String> {
    graph
        .nodes_of_kind(NodeKind::Group)
        .filter_map(|(id, _)| graph.label_of(id))
        .collect()
}

/// Turn a sketch into a concrete request, or None when the graph has
/// nothing for it to act on.
fn realize(graph: &ProjectGraph, sketch: EditSketch) -> Option<MutationRequest> {
    let groups = group_labels(graph);
    if groups.is_empty() {
        return None;
    }
    match sketch {
        EditSketch::AddFile { name, group } => Some(MutationRequest::AddSourceFile {
            path: FILE_NAMES[name % FILE_NAMES.len()].to_string(),
            name: None,
            parent_group: groups[group % groups.len()].clone(),
        }),
        EditSketch::AddGroup { name, parent } => Some(MutationRequest::AddGroup {
            name: GROUP_NAMES[name % GROUP_NAMES.len()].to_string(),
            parent_group: groups[parent % groups.len()].clone(),
            children: Vec::new(),
        }),
        EditSketch::Move { child, from, to } => {
            let from_label = groups[from % groups.len()].clone();
            let from_id = graph.find_by_label(NodeKind::Group, &from_label)?.id;
            let list = graph.node(from_id)?.child_list()?;
            if list.is_empty() {
                return None;
            }
            Some(MutationRequest::RelocateChildren {
                children: vec![list[child % list.len()]],
                from_group: from_label,
                to_group: groups[to % groups.len()].clone(),
            })
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn invariants_survive_random_edit_sequences(
        sketches in proptest::collection::vec(edit_strategy(), 1..40)
    ) {
        let mut graph = standard_project().graph;
        let mut allocator = IdAllocator::seeded_from(&graph);

        for sketch in sketches {
            let Some(request) = realize(&graph, sketch) else {
                continue;
            };
            // Rejections are legitimate outcomes here (cycles, labels
            // that stopped resolving); the invariants must hold either
            // way.
            let mut executor = MutationExecutor::new(&mut graph, &mut allocator);
            let _ = executor.execute(&request);
            let violations = graph.validate();
            prop_assert!(
                violations.is_empty(),
                "violations after `{}`: {:?}",
                request,
                violations
            );
        }

        // The final graph still round-trips.
        let text = serialize(&graph);
        let reparsed = parse_document(&text).unwrap();
        prop_assert!(reparsed.structural_eq(&graph));
        prop_assert_eq!(serialize(&reparsed), text);
    }

    #[test]
    fn allocation_never_repeats(extra in 1usize..2000) {
        let fixture = standard_project();
        let mut allocator = IdAllocator::seeded_from(&fixture.graph);
        let mut seen: std::collections::HashSet<ObjectId> =
            fixture.graph.ids().collect();

        for _ in 0..extra {
            let id = allocator.allocate();
            prop_assert!(seen.insert(id), "identifier {} issued twice", id);
        }
    }

    #[test]
    fn group_names_survive_the_text_format(
        name in "[A-Za-z0-9 ()&+.'-]{1,24}"
    ) {
        prop_assume!(!["Root", "Models", "Components"].contains(&name.as_str()));

        // GIVEN a group with an arbitrary printable name
        let mut graph = standard_project().graph;
        let mut allocator = IdAllocator::seeded_from(&graph);
        let mut executor = MutationExecutor::new(&mut graph, &mut allocator);
        executor
            .execute(&MutationRequest::AddGroup {
                name: name.clone(),
                parent_group: "Root".to_string(),
                children: Vec::new(),
            })
            .unwrap();

        // WHEN the document goes through text and back
        let reparsed = parse_document(&serialize(&graph)).unwrap();

        // THEN the name is intact, quoting included
        let found = reparsed.find_by_label(NodeKind::Group, &name);
        prop_assert!(found.is_some(), "group `{}` lost in round-trip", name);
        prop_assert!(reparsed.structural_eq(&graph));
    }
}
