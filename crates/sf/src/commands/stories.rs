//! `sf stories` -- one issue per user-story document.

use std::fs;

use anyhow::{bail, Result};
use tracing::warn;

use storyforge_core::enrich::open_task_count;
use storyforge_core::locate::story_files;
use storyforge_core::story::extract_story;
use storyforge_ui::styles;

use crate::cli::StoriesArgs;
use crate::context::RuntimeContext;
use crate::submit::{run_pipeline, RunMode};

/// Execute the `sf stories` command.
pub fn run(ctx: &RuntimeContext, args: &StoriesArgs) -> Result<()> {
    let path = ctx.stories_input(args.path.as_deref());
    let files = story_files(&path)?;
    if files.is_empty() {
        bail!("no user story files found under {}", path.display());
    }

    if !ctx.quiet {
        println!("Found {} user story file(s)", files.len());
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

        match extract_story(&content, &source) {
            Some(record) => {
                if !ctx.quiet {
                    println!(
                        "  Parsed {}: {} task(s), weight {}",
                        source,
                        open_task_count(&content),
                        record.weight.unwrap_or_default(),
                    );
                }
                records.push(record);
            }
            None => {
                if !ctx.quiet {
                    println!(
                        "  {} Skipping {}: no story title found",
                        styles::render_warn_icon(),
                        source
                    );
                }
            }
        }
    }

    if records.is_empty() {
        bail!("no valid user stories found under {}", path.display());
    }

    run_pipeline(ctx, records, RunMode::Stories)
}
