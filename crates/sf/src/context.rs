//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds all the state a command handler needs:
//! resolved configuration, glab binary, target repository, and global
//! flags. Constructed once in `main` after CLI parsing, before command
//! dispatch.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use storyforge_config::config::{load_config, ForgeConfig};
use storyforge_config::discover::find_config_file;
use storyforge_glab::client::GlabClient;
use storyforge_glab::tracker::GlabTracker;

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Loaded configuration (defaults when no file was found).
    pub config: ForgeConfig,

    /// Resolved glab binary name or path.
    pub glab_bin: String,

    /// Explicit target repository, if any.
    pub repo: Option<String>,

    /// Skip the confirmation prompt.
    pub assume_yes: bool,

    /// Parse and report without invoking glab.
    pub dry_run: bool,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    ///
    /// Resolution priority for each setting: flag > environment (via clap)
    /// > config file > built-in default.
    ///
    /// # Errors
    ///
    /// Fails when an explicitly given config file cannot be read, or when
    /// any discovered config file fails to parse.
    pub fn from_global_args(global: &GlobalArgs) -> Result<Self> {
        let config = match &global.config {
            Some(path) => load_config(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => match find_config_file(Path::new(".")) {
                Some(path) => load_config(&path)
                    .with_context(|| format!("failed to load config {}", path.display()))?,
                None => ForgeConfig::default(),
            },
        };

        let glab_bin = global
            .glab
            .clone()
            .unwrap_or_else(|| config.glab_bin().to_string());
        let repo = global.repo.clone().or_else(|| config.repo.clone());

        Ok(Self {
            config,
            glab_bin,
            repo,
            assume_yes: global.yes,
            dry_run: global.dry_run,
            json: global.json,
            verbose: global.verbose,
            quiet: global.quiet,
        })
    }

    /// Builds the production tracker for this run.
    pub fn tracker(&self) -> GlabTracker {
        GlabTracker::new(GlabClient::new(&self.glab_bin).with_repo(self.repo.clone()))
    }

    /// Input path for `sf issues`: argument > config > default.
    pub fn issues_input(&self, arg: Option<&Path>) -> PathBuf {
        arg.map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(self.config.issues_path()))
    }

    /// Input path for `sf bulk`.
    pub fn bulk_input(&self, arg: Option<&Path>) -> PathBuf {
        arg.map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(self.config.bulk_path()))
    }

    /// Input path for `sf stories`.
    pub fn stories_input(&self, arg: Option<&Path>) -> PathBuf {
        arg.map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(self.config.stories_path()))
    }
}
