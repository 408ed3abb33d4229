//! Command handlers.
//!
//! A thin layer: turn arguments into mutation requests, drive a session,
//! render the reports. All graph work happens in the library crates.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use graft_core::ObjectId;
use graft_mutation::MutationRequest;
use graft_session::{Plan, Session};

use crate::args::{Cli, Command};
use crate::report;

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::AddFile {
            project,
            path,
            group,
            name,
        } => {
            let request = MutationRequest::AddSourceFile {
                path,
                name,
                parent_group: group,
            };
            run_single(&project, request, cli.strict, cli.dry_run)
        }
        Command::AddGroup {
            project,
            name,
            parent,
            children,
        } => {
            let request = MutationRequest::AddGroup {
                name,
                parent_group: parent,
                children: parse_ids(&children)?,
            };
            run_single(&project, request, cli.strict, cli.dry_run)
        }
        Command::Move {
            project,
            children,
            from,
            to,
        } => {
            let request = MutationRequest::RelocateChildren {
                children: parse_ids(&children)?,
                from_group: from,
                to_group: to,
            };
            run_single(&project, request, cli.strict, cli.dry_run)
        }
        Command::Check { project } => check(&project),
        Command::Apply { project, plan } => apply(&project, &plan, cli.strict, cli.dry_run),
    }
}

/// Open, apply one request, write (or dry-run).
fn run_single(
    project: &Path,
    request: MutationRequest,
    strict: bool,
    dry_run: bool,
) -> Result<()> {
    let mut session = open(project)?.strict(strict);
    let output = session
        .apply(&request)
        .with_context(|| format!("cannot apply `{request}`"))?;
    report::print_output(&output);
    finish(&mut session, project, dry_run)
}

fn check(project: &Path) -> Result<()> {
    let mut session = open(project)?;
    let violations = session.validate();
    report::print_violations(&violations);
    if violations.has_errors() {
        bail!(
            "{}: {} validation error(s)",
            project.display(),
            violations.errors().count()
        );
    }
    if violations.is_empty() {
        println!(
            "{}: clean, {} node(s)",
            project.display(),
            session.graph().len()
        );
    } else {
        println!(
            "{}: no errors, {} warning(s)",
            project.display(),
            violations.warnings().count()
        );
    }
    Ok(())
}

fn apply(project: &Path, plan_path: &Path, strict: bool, dry_run: bool) -> Result<()> {
    let text = fs::read_to_string(plan_path)
        .with_context(|| format!("cannot read plan `{}`", plan_path.display()))?;
    let plan = Plan::from_toml(&text)
        .with_context(|| format!("cannot decode plan `{}`", plan_path.display()))?;
    let requests = plan.requests()?;
    if requests.is_empty() {
        bail!("plan `{}` lists no operations", plan_path.display());
    }

    let mut session = open(project)?.strict(strict);
    let batch = session.apply_batch(&requests, plan.policy());
    report::print_batch(&batch);

    // Applied requests are written even when others failed; the batch
    // report already told the caller which ones those were.
    finish(&mut session, project, dry_run)?;
    if !batch.is_clean() {
        bail!(
            "{} of {} operation(s) failed",
            batch.failed_count(),
            batch.len()
        );
    }
    Ok(())
}

fn open(project: &Path) -> Result<Session> {
    Session::open(project).with_context(|| format!("cannot open `{}`", project.display()))
}

fn finish(session: &mut Session, project: &Path, dry_run: bool) -> Result<()> {
    if dry_run {
        // The validation gate still runs, so a dry run fails exactly
        // where a real run would.
        let text = session
            .render()
            .with_context(|| format!("`{}` would not serialize", project.display()))?;
        println!(
            "dry run: `{}` left untouched ({} bytes pending)",
            project.display(),
            text.len()
        );
        return Ok(());
    }
    session
        .write()
        .with_context(|| format!("cannot write `{}`", project.display()))?;
    println!("{} written", project.display());
    Ok(())
}

fn parse_ids(raw: &[String]) -> Result<Vec<ObjectId>> {
    raw.iter()
        .map(|text| {
            ObjectId::parse(text).with_context(|| format!("malformed identifier `{text}`"))
        })
        .collect()
}
