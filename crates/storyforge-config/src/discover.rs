//! Discovery of the `.storyforge.yaml` configuration file.
//!
//! The config file is found by walking up the directory tree from the
//! current directory, so a file at a repository root applies in any
//! subdirectory. The `SF_CONFIG` environment variable takes priority.

use std::path::{Path, PathBuf};

/// The name of the storyforge configuration file.
const CONFIG_FILE_NAME: &str = ".storyforge.yaml";

/// The environment variable that can override the config file location.
const CONFIG_ENV: &str = "SF_CONFIG";

/// Walk up the directory tree from `start` looking for `.storyforge.yaml`.
///
/// Returns the path to the file if found, or `None` if the filesystem root
/// is reached without finding one. `SF_CONFIG` is checked first (highest
/// priority).
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    // 1. Check SF_CONFIG (highest priority).
    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        let env_path = PathBuf::from(&env_path);
        if env_path.is_file() {
            return Some(env_path);
        }
    }

    // 2. Walk up from `start`.
    let start = match start.canonicalize() {
        Ok(p) => p,
        Err(_) => return None,
    };

    let mut current = start.as_path();
    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent;
            }
            _ => break, // Reached filesystem root.
        }
    }

    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
