//! Input file location and directory-mode filtering.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

/// Errors that can occur while locating input files.
#[derive(Debug, Error)]
pub enum LocateError {
    /// The input path does not exist.
    #[error("input path not found: {0}")]
    NotFound(PathBuf),

    /// The input path is a directory where a file was required.
    #[error("expected a markdown file, got a directory: {0}")]
    IsADirectory(PathBuf),

    /// A directory listing failed.
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        /// The directory that could not be listed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// A specialized `Result` type for locator operations.
pub type Result<T> = std::result::Result<T, LocateError>;

/// Requires `path` to be an existing file.
pub fn require_file(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(LocateError::NotFound(path.to_path_buf()));
    }
    if path.is_dir() {
        return Err(LocateError::IsADirectory(path.to_path_buf()));
    }
    Ok(path.to_path_buf())
}

/// Enumerates candidate markdown files under `path`.
///
/// A file is returned as-is; a directory yields its `*.md` entries in
/// sorted order so runs are reproducible across filesystems.
pub fn markdown_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        return Err(LocateError::NotFound(path.to_path_buf()));
    }
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let entries = fs::read_dir(path).map_err(|source| LocateError::ReadDir {
        path: path.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "md"))
        .collect();
    files.sort();
    Ok(files)
}

/// Enumerates user-story files under `path`.
///
/// A file given explicitly is used without the shape test. For a
/// directory, each `*.md` entry is read and kept only when
/// [`is_story_file`] accepts it; unreadable candidates are logged and
/// skipped, never fatal.
pub fn story_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        return Err(LocateError::NotFound(path.to_path_buf()));
    }
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for candidate in markdown_files(path)? {
        match fs::read_to_string(&candidate) {
            Ok(content) if is_story_file(&content) => files.push(candidate),
            Ok(_) => {}
            Err(e) => warn!(path = %candidate.display(), error = %e, "skipping unreadable candidate"),
        }
    }
    Ok(files)
}

/// Structural shape test for user-story files.
///
/// A story file must contain the literal `## Tasks / Subtasks` and at
/// least one of the narrative markers.
pub fn is_story_file(content: &str) -> bool {
    content.contains("## Tasks / Subtasks")
        && (content.contains("**As a**") || content.contains("**I want**"))
}
