//! Output formatting helpers for the `sf` CLI.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use storyforge_core::record::IssueRecord;
use storyforge_ui::styles;

/// Print a value as pretty-printed JSON to stdout.
///
/// Terminates the process with exit code 1 if serialization fails.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Formats a record as a compact one-line string for listings.
///
/// Format: `{title} [{origin}]` where origin is the project name when one
/// was inherited, otherwise the source file name.
pub fn format_record_compact(record: &IssueRecord) -> String {
    let origin = if !record.project.is_empty() {
        record.project.clone()
    } else {
        source_file_name(record)
    };
    format!(
        "{} {}",
        record.title,
        styles::render_muted(&format!("[{}]", origin))
    )
}

/// The bare file name of a record's source, for compact display.
pub fn source_file_name(record: &IssueRecord) -> String {
    Path::new(&record.source_file)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| record.source_file.clone())
}

#[cfg(test)]
mod tests {
    use storyforge_core::record::IssueRecordBuilder;

    use super::*;

    #[test]
    fn compact_format_prefers_the_project() {
        let record = IssueRecordBuilder::new("Add caching")
            .project("Gateway")
            .source_file("plans/plan.md")
            .build();
        let line = format_record_compact(&record);
        assert!(line.contains("Add caching"));
        assert!(line.contains("Gateway"));
    }

    #[test]
    fn compact_format_falls_back_to_the_file_name() {
        let record = IssueRecordBuilder::new("Story issue")
            .source_file("stories/story-1.md")
            .build();
        let line = format_record_compact(&record);
        assert!(line.contains("story-1.md"));
        assert!(!line.contains("stories/"));
    }
}
