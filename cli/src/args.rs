//! Command-line argument definitions using clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// graft - referential-integrity editor for sectioned project files
#[derive(Parser, Debug)]
#[command(name = "graft")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Treat an ambiguous group label as an error instead of picking
    /// the first match in file order
    #[arg(long, global = true)]
    pub strict: bool,

    /// Apply and report, but leave the project file untouched
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a file under a group; compiled sources are also wired into
    /// the Sources build phase
    AddFile {
        /// Project file to edit
        project: PathBuf,
        /// Path of the file to add
        path: String,
        /// Label of the receiving group
        #[arg(long)]
        group: String,
        /// Display name; defaults to the path basename
        #[arg(long)]
        name: Option<String>,
    },

    /// Add a group under a parent group
    AddGroup {
        /// Project file to edit
        project: PathBuf,
        /// Name of the new group
        name: String,
        /// Label of the parent group
        #[arg(long)]
        parent: String,
        /// Unparented nodes the new group adopts, by identifier
        #[arg(long = "child", value_name = "ID")]
        children: Vec<String>,
    },

    /// Move children from one group to another, keeping their relative
    /// order
    Move {
        /// Project file to edit
        project: PathBuf,
        /// Identifiers of the children to move
        #[arg(required = true, value_name = "ID")]
        children: Vec<String>,
        /// Label of the group currently holding the children
        #[arg(long)]
        from: String,
        /// Label of the receiving group
        #[arg(long)]
        to: String,
    },

    /// Parse a project file and report every integrity violation
    Check {
        /// Project file to check
        project: PathBuf,
    },

    /// Apply an ordered batch of operations from a TOML plan file
    Apply {
        /// Project file to edit
        project: PathBuf,
        /// Plan file listing the operations
        plan: PathBuf,
    },
}
