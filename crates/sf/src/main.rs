//! `sf` -- create GitLab issues from planning markdown.
//!
//! This is the entry point for the storyforge CLI. It parses CLI arguments
//! with clap, resolves the runtime context, and dispatches to command
//! handlers.

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod context;
mod output;
mod submit;

use cli::{Cli, Commands};
use context::RuntimeContext;

/// Tracks whether a Ctrl+C has already been received.
static CTRLC_RECEIVED: AtomicBool = AtomicBool::new(false);

fn main() {
    // Install signal handlers for graceful shutdown.
    // First Ctrl+C: exit cleanly. Second: force exit.
    let _ = ctrlc::set_handler(|| {
        if CTRLC_RECEIVED.swap(true, Ordering::SeqCst) {
            // Second signal: force exit
            std::process::exit(1);
        }
        // First signal: exit cleanly
        std::process::exit(0);
    });

    let cli = Cli::parse();

    if let Err(e) = dispatch(&cli) {
        // For JSON mode, output errors as JSON too.
        if cli.global.json {
            let err_json = serde_json::json!({
                "error": format!("{:#}", e),
            });
            if let Ok(s) = serde_json::to_string_pretty(&err_json) {
                eprintln!("{}", s);
            }
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn dispatch(cli: &Cli) -> Result<()> {
    let ctx = RuntimeContext::from_global_args(&cli.global)?;

    // Set up logging based on verbosity.
    if ctx.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("sf=debug,storyforge_core=debug,storyforge_glab=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    match &cli.command {
        Some(Commands::Issues(args)) => commands::issues::run(&ctx, args),
        Some(Commands::Bulk(args)) => commands::bulk::run(&ctx, args),
        Some(Commands::Stories(args)) => commands::stories::run(&ctx, args),
        Some(Commands::Completion(args)) => commands::completion::run(&ctx, args),
        Some(Commands::Version) => commands::version::run(&ctx),
        None => {
            // No subcommand -- print help
            use clap::CommandFactory;
            Cli::command().print_help().ok();
            println!();
            Ok(())
        }
    }
}
