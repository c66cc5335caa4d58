//! Configuration types and loading for the storyforge system.
//!
//! The main entry point is [`ForgeConfig`], the contents of a
//! `.storyforge.yaml` file. Every key is optional; resolved accessors
//! supply the built-in defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The configuration file contained invalid YAML.
    #[error("failed to parse config file: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Default glab binary name, resolved via `PATH`.
pub const DEFAULT_GLAB_BIN: &str = "glab";
/// Default input file for `sf issues`.
pub const DEFAULT_ISSUES_PATH: &str = "issues-to-create.md";
/// Default input folder for `sf bulk`.
pub const DEFAULT_BULK_PATH: &str = ".";
/// Default input folder for `sf stories`.
pub const DEFAULT_STORIES_PATH: &str = "stories";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Contents of `.storyforge.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgeConfig {
    /// Name or path of the glab binary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glab_bin: Option<String>,

    /// Target repository (`OWNER/REPO`) forwarded to glab.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,

    /// Default input file for the `issues` command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issues_path: Option<String>,

    /// Default input folder for the `bulk` command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bulk_path: Option<String>,

    /// Default input folder for the `stories` command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stories_path: Option<String>,
}

impl ForgeConfig {
    pub fn glab_bin(&self) -> &str {
        self.glab_bin.as_deref().unwrap_or(DEFAULT_GLAB_BIN)
    }

    pub fn issues_path(&self) -> &str {
        self.issues_path.as_deref().unwrap_or(DEFAULT_ISSUES_PATH)
    }

    pub fn bulk_path(&self) -> &str {
        self.bulk_path.as_deref().unwrap_or(DEFAULT_BULK_PATH)
    }

    pub fn stories_path(&self) -> &str {
        self.stories_path.as_deref().unwrap_or(DEFAULT_STORIES_PATH)
    }
}

/// Loads a [`ForgeConfig`] from the given YAML file.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] if the file cannot be read, or
/// [`ConfigError::ParseError`] if it is not valid YAML for the config
/// shape.
pub fn load_config(path: &Path) -> Result<ForgeConfig> {
    let raw = std::fs::read_to_string(path)?;
    // An empty (or comment-only) file is a valid all-defaults config.
    if raw.trim().is_empty() {
        return Ok(ForgeConfig::default());
    }
    Ok(serde_yaml::from_str(&raw)?)
}
