//! Whole-graph structural validation.
//!
//! One sweep, every rule, no early exit: the report carries everything
//! wrong with the graph at once. Checks run in a fixed order and visit
//! nodes in file order, so the report is deterministic.

use graft_core::{NodeKind, ObjectId};
use std::collections::{HashMap, HashSet};

use crate::{ProjectGraph, Violation, ViolationKind, Violations};

pub(crate) fn check_all(graph: &ProjectGraph) -> Violations {
    let mut violations = Violations::new();
    check_references(graph, &mut violations);
    check_memberships(graph, &mut violations);
    check_parent_counts(graph, &mut violations);
    check_build_linkage(graph, &mut violations);
    check_cycles(graph, &mut violations);
    check_root_and_reachability(graph, &mut violations);
    violations
}

/// Every identifier mentioned anywhere must define a node, and a build
/// file entry must point at an actual file reference.
fn check_references(graph: &ProjectGraph, violations: &mut Violations) {
    for (id, node) in graph.iter() {
        if let Some(children) = node.child_list() {
            for child in children {
                if !graph.contains(*child) {
                    violations.push(
                        Violation::error(
                            ViolationKind::DanglingReference,
                            format!("{} {} lists {}, which is not defined", node.kind(), id, child),
                        )
                        .with_subject(id)
                        .with_related(*child),
                    );
                }
            }
        }
        if let Some(entry) = node.as_build_file_entry() {
            match graph.node(entry.file_ref) {
                None => violations.push(
                    Violation::error(
                        ViolationKind::DanglingReference,
                        format!("Entry {} references {}, which is not defined", id, entry.file_ref),
                    )
                    .with_subject(id)
                    .with_related(entry.file_ref),
                ),
                Some(target) if !target.is_file_reference() => violations.push(
                    Violation::error(
                        ViolationKind::WrongChildKind,
                        format!("Entry {} references {}, which is a {}", id, entry.file_ref, target.kind()),
                    )
                    .with_subject(id)
                    .with_related(entry.file_ref),
                ),
                Some(_) => {}
            }
        }
    }
}

/// Containers may only list children of the kinds they hold, and may
/// list each child once.
fn check_memberships(graph: &ProjectGraph, violations: &mut Violations) {
    for (id, node) in graph.iter() {
        let Some(children) = node.child_list() else {
            continue;
        };
        let mut seen = HashSet::new();
        for child in children {
            if !seen.insert(*child) {
                violations.push(
                    Violation::error(
                        ViolationKind::DuplicateMembership,
                        format!("{} {} lists {} more than once", node.kind(), id, child),
                    )
                    .with_subject(id)
                    .with_related(*child),
                );
            }
            if let Some(child_node) = graph.node(*child) {
                if !node.accepts_child(child_node.kind()) {
                    violations.push(
                        Violation::error(
                            ViolationKind::WrongChildKind,
                            format!(
                                "{} {} cannot hold {} {}",
                                node.kind(),
                                id,
                                child_node.kind(),
                                child
                            ),
                        )
                        .with_subject(id)
                        .with_related(*child),
                    );
                }
            }
        }
    }
}

/// Tree nodes live under at most one group; entries live in exactly one
/// phase.
fn check_parent_counts(graph: &ProjectGraph, violations: &mut Violations) {
    for (id, node) in graph.iter() {
        match node.kind() {
            NodeKind::FileReference | NodeKind::Group => {
                let parents = graph.parents_of(id);
                if parents.len() > 1 {
                    let mut violation = Violation::error(
                        ViolationKind::MultipleParents,
                        format!("{} {} is listed by {} groups", node.kind(), id, parents.len()),
                    )
                    .with_subject(id);
                    for parent in parents {
                        violation = violation.with_related(parent);
                    }
                    violations.push(violation);
                }
            }
            NodeKind::BuildFileEntry => {
                let phases = graph.owning_phases(id);
                match phases.len() {
                    0 => violations.push(
                        Violation::error(
                            ViolationKind::OrphanedEntry,
                            format!("Entry {} belongs to no build phase", id),
                        )
                        .with_subject(id),
                    ),
                    1 => {}
                    n => {
                        let mut violation = Violation::error(
                            ViolationKind::MultiplePhases,
                            format!("Entry {} is listed by {} build phases", id, n),
                        )
                        .with_subject(id);
                        for phase in phases {
                            violation = violation.with_related(phase);
                        }
                        violations.push(violation);
                    }
                }
            }
            NodeKind::BuildPhase => {}
        }
    }
}

/// A compiled source enters the build through exactly one entry. Two
/// entries process the file twice; zero is a file not yet wired in,
/// which only warns.
fn check_build_linkage(graph: &ProjectGraph, violations: &mut Violations) {
    let mut entries_for: HashMap<ObjectId, Vec<ObjectId>> = HashMap::new();
    for (id, node) in graph.nodes_of_kind(NodeKind::BuildFileEntry) {
        if let Some(entry) = node.as_build_file_entry() {
            entries_for.entry(entry.file_ref).or_default().push(id);
        }
    }
    // Report in file order of the referenced file, not hash order.
    for (file_id, node) in graph.nodes_of_kind(NodeKind::FileReference) {
        let Some(entries) = entries_for.get(&file_id) else {
            if let Some(file) = node.as_file_reference() {
                if file.kind.is_source() {
                    violations.push(
                        Violation::warning(
                            ViolationKind::UnwiredSource,
                            format!("Source file {} is wired into no build phase", file_id),
                        )
                        .with_subject(file_id),
                    );
                }
            }
            continue;
        };
        if entries.len() > 1 {
            let mut violation = Violation::error(
                ViolationKind::DuplicateEntryForFile,
                format!("File {} is wired into the build by {} entries", file_id, entries.len()),
            )
            .with_subject(file_id);
            for entry in entries {
                violation = violation.with_related(*entry);
            }
            violations.push(violation);
        }
    }
}

/// Group containment must not loop. Each cycle is reported once, from
/// its first member in file order.
fn check_cycles(graph: &ProjectGraph, violations: &mut Violations) {
    let mut reported: HashSet<ObjectId> = HashSet::new();
    for (id, _) in graph.nodes_of_kind(NodeKind::Group) {
        if reported.contains(&id) || !graph.is_ancestor(id, id) {
            continue;
        }
        let mut members = vec![id];
        let mut current = graph.parent_of(id);
        while let Some(ancestor) = current {
            if ancestor == id {
                break;
            }
            members.push(ancestor);
            current = graph.parent_of(ancestor);
        }
        let mut violation = Violation::error(
            ViolationKind::ContainmentCycle,
            format!("Group {} sits inside its own subtree", id),
        )
        .with_subject(id);
        for member in &members {
            reported.insert(*member);
            if *member != id {
                violation = violation.with_related(*member);
            }
        }
        violations.push(violation);
    }
}

/// Exactly one parentless group anchors the tree, and the tree should
/// account for every group and file. Floating nodes are legal in the
/// format, so they only warn.
fn check_root_and_reachability(graph: &ProjectGraph, violations: &mut Violations) {
    let parentless: Vec<ObjectId> = graph
        .nodes_of_kind(NodeKind::Group)
        .map(|(id, _)| id)
        .filter(|id| graph.parents_of(*id).is_empty())
        .collect();

    let tree_nodes = graph
        .iter()
        .filter(|(_, node)| {
            matches!(node.kind(), NodeKind::Group | NodeKind::FileReference)
        })
        .count();

    let root = match parentless.len() {
        1 => parentless[0],
        0 => {
            if tree_nodes > 0 {
                violations.push(Violation::error(
                    ViolationKind::MissingRoot,
                    "No parentless group exists to anchor the tree".to_string(),
                ));
            }
            return;
        }
        n => {
            let mut violation = Violation::error(
                ViolationKind::AmbiguousRoot,
                format!("{} parentless groups compete for the root position", n),
            );
            for candidate in parentless {
                violation = violation.with_related(candidate);
            }
            violations.push(violation);
            return;
        }
    };

    // Walk the tree from the root. The visited set guards against
    // cycles, which are reported separately.
    let mut reachable = HashSet::new();
    let mut queue = vec![root];
    while let Some(id) = queue.pop() {
        if !reachable.insert(id) {
            continue;
        }
        if let Some(children) = graph.node(id).and_then(|node| node.child_list()) {
            queue.extend(children.iter().copied());
        }
    }

    for (id, node) in graph.iter() {
        let in_tree = matches!(node.kind(), NodeKind::Group | NodeKind::FileReference);
        if in_tree && !reachable.contains(&id) {
            violations.push(
                Violation::warning(
                    ViolationKind::Unreachable,
                    format!("{} {} is not reachable from the root group", node.kind(), id),
                )
                .with_subject(id),
            );
        }
    }
}
