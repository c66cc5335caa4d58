//! glab command execution wrappers.
//!
//! Provides a thin wrapper around `glab` subprocess invocation so that the
//! rest of the codebase does not need to deal with `std::process::Command`
//! directly. Every call blocks until the external process exits; there is
//! no timeout and no retry.

use std::process::Command;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when running glab commands.
#[derive(Debug, Error)]
pub enum GlabError {
    /// The glab binary could not be found or spawned.
    #[error("failed to execute {bin}: {source}")]
    Spawn {
        /// The binary that was invoked.
        bin: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The glab command exited with a non-zero status.
    #[error("glab command failed (exit code {code:?}): {stderr}")]
    CommandFailed {
        /// The exit code, or `None` if the process was killed by a signal.
        code: Option<i32>,
        /// The content of stderr.
        stderr: String,
    },

    /// A query response could not be parsed as the expected JSON shape.
    #[error("malformed glab response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

/// A specialized `Result` type for glab operations.
pub type Result<T> = std::result::Result<T, GlabError>;

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Handle for invoking the glab binary.
#[derive(Debug, Clone)]
pub struct GlabClient {
    bin: String,
    repo: Option<String>,
}

impl GlabClient {
    /// Creates a client for the given glab binary name or path.
    pub fn new(bin: impl Into<String>) -> Self {
        Self {
            bin: bin.into(),
            repo: None,
        }
    }

    /// Targets an explicit `OWNER/REPO` instead of the repository inferred
    /// from the working directory.
    pub fn with_repo(mut self, repo: Option<String>) -> Self {
        self.repo = repo;
        self
    }

    /// The configured target repository, if any.
    pub fn repo(&self) -> Option<&str> {
        self.repo.as_deref()
    }

    /// Execute a glab command with the given arguments.
    ///
    /// Returns the trimmed contents of stdout on success.
    ///
    /// # Errors
    ///
    /// Returns [`GlabError::Spawn`] if the binary cannot be started, or
    /// [`GlabError::CommandFailed`] if it exits with a non-zero status.
    pub fn run(&self, args: &[String]) -> Result<String> {
        tracing::debug!(bin = %self.bin, ?args, "running glab");

        let output = Command::new(&self.bin)
            .args(args)
            .output()
            .map_err(|source| GlabError::Spawn {
                bin: self.bin.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::warn!(bin = %self.bin, ?args, %stderr, "glab command failed");
            return Err(GlabError::CommandFailed {
                code: output.status.code(),
                stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(stdout)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_failure_for_missing_binary() {
        let client = GlabClient::new("storyforge-test-no-such-binary");
        let result = client.run(&["version".to_string()]);
        match result.unwrap_err() {
            GlabError::Spawn { bin, .. } => {
                assert_eq!(bin, "storyforge-test-no-such-binary");
            }
            other => panic!("expected Spawn, got: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn command_failure_captures_stderr() {
        // `false` exits non-zero with no output on any Unix system.
        let client = GlabClient::new("false");
        let result = client.run(&[]);
        match result.unwrap_err() {
            GlabError::CommandFailed { code, .. } => assert_eq!(code, Some(1)),
            other => panic!("expected CommandFailed, got: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn stdout_is_trimmed() {
        let client = GlabClient::new("echo");
        let out = client.run(&["  hello  ".to_string()]).unwrap();
        assert_eq!(out, "hello");
    }
}
