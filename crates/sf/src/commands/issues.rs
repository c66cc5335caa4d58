//! `sf issues` -- create issues from a single issue-definition file.

use std::fs;

use anyhow::{bail, Context, Result};

use storyforge_core::extract::extract_issues;
use storyforge_core::locate::require_file;

use crate::cli::IssuesArgs;
use crate::context::RuntimeContext;
use crate::submit::{run_pipeline, RunMode};

/// Execute the `sf issues` command.
pub fn run(ctx: &RuntimeContext, args: &IssuesArgs) -> Result<()> {
    let path = ctx.issues_input(args.path.as_deref());
    let file = require_file(&path)?;

    let content = fs::read_to_string(&file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let source = file.display().to_string();
    if !ctx.quiet {
        println!("Parsing issues from: {}", source);
    }

    let records = extract_issues(&content, &source);
    if records.is_empty() {
        bail!("no issues found in {}", source);
    }

    run_pipeline(ctx, records, RunMode::Issues)
}
