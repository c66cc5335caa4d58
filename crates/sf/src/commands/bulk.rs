//! `sf bulk` -- create issues from every markdown file in a folder.

use std::fs;

use anyhow::{bail, Result};
use tracing::warn;

use storyforge_core::extract::extract_issues;
use storyforge_core::locate::markdown_files;
use storyforge_ui::styles;

use crate::cli::BulkArgs;
use crate::context::RuntimeContext;
use crate::submit::{run_pipeline, RunMode};

/// Execute the `sf bulk` command.
///
/// Files without issue definitions are reported and skipped; an unreadable
/// file skips that file only. The run fails only when no file yields any
/// record at all.
pub fn run(ctx: &RuntimeContext, args: &BulkArgs) -> Result<()> {
    let dir = ctx.bulk_input(args.path.as_deref());
    let files = markdown_files(&dir)?;
    if files.is_empty() {
        bail!("no markdown files found in {}", dir.display());
    }

    if !ctx.quiet {
        println!("Found {} markdown file(s) in {}", files.len(), dir.display());
    }

    let mut records = Vec::new();
    for file in &files {
        let source = file.display().to_string();
        let content = match fs::read_to_string(file) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %source, error = %e, "skipping unreadable file");
                if !ctx.quiet {
                    println!("  {} Skipping {}: {}", styles::render_warn_icon(), source, e);
                }
                continue;
            }
        };

        let found = extract_issues(&content, &source);
        if found.is_empty() {
            if !ctx.quiet {
                println!(
                    "  {} Skipping {}: no issue definitions found",
                    styles::render_warn_icon(),
                    source
                );
            }
            continue;
        }

        if !ctx.quiet {
            println!("  {}: {} issue(s)", source, found.len());
        }
        records.extend(found);
    }

    if records.is_empty() {
        bail!("no issues found in any markdown file under {}", dir.display());
    }

    run_pipeline(ctx, records, RunMode::Bulk)
}
