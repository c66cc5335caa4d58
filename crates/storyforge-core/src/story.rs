//! Grammar for user-story documents: one document, at most one record.
//!
//! A story file looks like:
//!
//! ```markdown
//! # Story 2.1: Cluster Provisioning
//!
//! ## Status
//! Approved
//!
//! **As a** platform operator, **I want** one-click provisioning,
//! **so that** new teams onboard without tickets.
//!
//! ## Acceptance Criteria
//! - Provisioning completes in under five minutes
//!
//! ## Tasks / Subtasks
//! - [ ] Wire up the provisioner API
//! - [ ] Add smoke tests
//! ```
//!
//! The record's description re-renders the narrative, status, acceptance
//! criteria, and tasks, then appends everything after the tasks section
//! verbatim: trailing sections such as "Dev Notes" are deliberately kept
//! in full rather than dropped.

use std::sync::OnceLock;

use regex::Regex;

use crate::enrich;
use crate::record::{IssueRecord, provenance_footer};

static TITLE_RE: OnceLock<Regex> = OnceLock::new();
static STATUS_RE: OnceLock<Regex> = OnceLock::new();
static NARRATIVE_RE: OnceLock<Regex> = OnceLock::new();
static AC_HEAD_RE: OnceLock<Regex> = OnceLock::new();
static TASKS_HEAD_RE: OnceLock<Regex> = OnceLock::new();
static NEXT_HEADING_RE: OnceLock<Regex> = OnceLock::new();

fn title_re() -> &'static Regex {
    TITLE_RE.get_or_init(|| Regex::new(r"(?m)^# (.+)$").unwrap())
}

fn status_re() -> &'static Regex {
    STATUS_RE.get_or_init(|| Regex::new(r"(?m)^## Status\n(.+)$").unwrap())
}

fn narrative_re() -> &'static Regex {
    NARRATIVE_RE.get_or_init(|| {
        Regex::new(r"(?i)\*\*As a\*\* (.+?),\s*\*\*I want\*\* (.+?),\s*\*\*so that\*\* (.+?)\.")
            .unwrap()
    })
}

fn ac_head_re() -> &'static Regex {
    AC_HEAD_RE.get_or_init(|| Regex::new(r"(?m)^## Acceptance Criteria\n").unwrap())
}

fn tasks_head_re() -> &'static Regex {
    TASKS_HEAD_RE.get_or_init(|| Regex::new(r"(?m)^## Tasks / Subtasks\n").unwrap())
}

fn next_heading_re() -> &'static Regex {
    NEXT_HEADING_RE.get_or_init(|| Regex::new(r"(?m)^##").unwrap())
}

/// Parses a user-story document into a single record.
///
/// Returns `None` when the document has no top-level `# <title>` heading;
/// that is a skip, not an error.
pub fn extract_story(content: &str, source_file: &str) -> Option<IssueRecord> {
    let title = title_re().captures(content)?[1].to_string();

    let status = status_re()
        .captures(content)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    let mut description = String::from("## User Story\n");
    if let Some(caps) = narrative_re().captures(content) {
        description.push_str(&format!("**As a** {}\n", &caps[1]));
        description.push_str(&format!("**I want** {}\n", &caps[2]));
        description.push_str(&format!("**So that** {}\n\n", &caps[3]));
    }
    description.push_str(&format!("**Status:** {}\n\n", status));

    if let Some((criteria, _)) = section_block(content, ac_head_re()) {
        description.push_str(&format!("## Acceptance Criteria\n{}\n\n", criteria));
    }

    if let Some((tasks, section_end)) = section_block(content, tasks_head_re()) {
        description.push_str(&format!("## Tasks / Subtasks\n{}\n\n", tasks));

        // Catch-all: everything after the tasks section is appended
        // verbatim so trailing sections survive.
        let trailing = content[section_end..].trim();
        if !trailing.is_empty() {
            description.push_str(&format!("{}\n\n", trailing));
        }
    }

    description.push_str(&provenance_footer(source_file));

    Some(IssueRecord {
        title: title.clone(),
        description,
        labels: enrich::infer_story_labels(content),
        milestone: enrich::derive_milestone_name(&title),
        weight: Some(enrich::weight_for_task_count(enrich::open_task_count(
            content,
        ))),
        source_file: source_file.to_string(),
        ..IssueRecord::default()
    })
}

/// Extracts a `##`-delimited section body.
///
/// Returns the trimmed body and the absolute offset of the section's end
/// (the start of the next `##` heading, or the document end).
fn section_block(content: &str, head_re: &Regex) -> Option<(String, usize)> {
    let head = head_re.find(content)?;
    let body_start = head.end();
    let rest = &content[body_start..];
    let body_end = next_heading_re()
        .find(rest)
        .map(|m| m.start())
        .unwrap_or(rest.len());
    Some((rest[..body_end].trim().to_string(), body_start + body_end))
}
