//! Plain-text reports for the terminal.
//!
//! Everything here goes to stdout; logging goes to stderr so scripts can
//! consume the reports.

use graft_graph::Violations;
use graft_mutation::{BatchReport, MutationOutput};

/// One line per violation, errors before warnings.
pub fn print_violations(violations: &Violations) {
    for violation in violations.errors() {
        println!("error {violation}");
    }
    for violation in violations.warnings() {
        println!("warning {violation}");
    }
}

/// The identifiers one applied request created or moved.
pub fn print_output(output: &MutationOutput) {
    match output {
        MutationOutput::Added(added) => {
            if let Some(id) = added.file_ref {
                println!("added FileReference {id}");
            }
            if let Some(id) = added.build_entry {
                println!("added BuildFileEntry {id}");
            }
            if let Some(id) = added.group {
                println!("added Group {id}");
            }
        }
        MutationOutput::Moved(moved) => {
            println!("moved {} child(ren)", moved.children.len());
        }
    }
}

/// Per-request outcomes of a plan run, then a one-line tally.
pub fn print_batch(report: &BatchReport) {
    for outcome in report.outcomes() {
        match &outcome.result {
            Ok(output) => {
                println!("applied: {}", outcome.request);
                print_output(output);
            }
            Err(error) => {
                println!("failed: {}: {}", outcome.request, error);
            }
        }
    }
    println!(
        "{} applied, {} failed",
        report.applied_count(),
        report.failed_count()
    );
}
