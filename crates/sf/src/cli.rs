//! Clap CLI definitions for the `sf` command.
//!
//! This module defines the complete CLI structure using clap 4 derive
//! macros. Three run modes mirror the three input grammars: a single issue
//! document, a folder of issue documents, and user-story files.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// sf -- GitLab issues from planning markdown.
///
/// Parses structured markdown (issue lists or user stories) and drives the
/// glab CLI to create the corresponding issues and milestones.
#[derive(Parser, Debug)]
#[command(
    name = "sf",
    about = "Create GitLab issues from planning markdown",
    long_about = "Parses structured markdown (issue lists or user stories) and drives the glab CLI to create the corresponding issues and milestones.",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Name or path of the glab binary (default: glab).
    #[arg(long, global = true, env = "SF_GLAB")]
    pub glab: Option<String>,

    /// Target repository as OWNER/REPO (default: inferred by glab from the
    /// working directory).
    #[arg(short = 'R', long, global = true, env = "SF_REPO")]
    pub repo: Option<String>,

    /// Config file path (default: auto-discover .storyforge.yaml).
    #[arg(short = 'c', long, global = true, env = "SF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Parse and report without invoking glab.
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Output the run summary in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create issues from a single issue-definition markdown file.
    Issues(IssuesArgs),

    /// Create issues from every markdown file in a folder.
    Bulk(BulkArgs),

    /// Create one issue per user-story document (file or folder).
    Stories(StoriesArgs),

    /// Generate shell completions.
    Completion(CompletionArgs),

    /// Print version information.
    Version,
}

/// Arguments for `sf issues`.
#[derive(Args, Debug)]
pub struct IssuesArgs {
    /// Markdown file containing `### Issue N:` blocks.
    pub path: Option<PathBuf>,
}

/// Arguments for `sf bulk`.
#[derive(Args, Debug)]
pub struct BulkArgs {
    /// Folder whose *.md files are scanned for issue definitions.
    pub path: Option<PathBuf>,
}

/// Arguments for `sf stories`.
#[derive(Args, Debug)]
pub struct StoriesArgs {
    /// A story file, or a folder filtered to user-story documents.
    pub path: Option<PathBuf>,
}

/// Arguments for `sf completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: Shell,
}
