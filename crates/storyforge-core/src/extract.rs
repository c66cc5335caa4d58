//! Grammar for "issue block" documents.
//!
//! An issue document interleaves project context headers with issue blocks:
//!
//! ```markdown
//! ## Project: Infra Revamp
//! **Milestone:** Sprint-4
//! **Labels:** infra, ops
//!
//! ### Issue 1: Provision staging cluster
//! **Description:**
//! Stand up the staging environment.
//!
//! **Assignee:** alice
//! **Labels:** terraform
//! **Weight:** 3
//! ```
//!
//! Each issue inherits milestone and labels from the nearest preceding
//! project header. Context resolution is structural: headers are matched
//! once with their byte offsets, and each issue picks the header with the
//! greatest offset before its own. The offsets make the "most recent
//! applicable project wins" rule exact even when headers and issues are
//! not contiguous.

use std::sync::OnceLock;

use regex::Regex;

use crate::record::{IssueRecord, ProjectContext};

static ISSUE_HEAD_RE: OnceLock<Regex> = OnceLock::new();
static PROJECT_RE: OnceLock<Regex> = OnceLock::new();
static BOLD_FIELD_RE: OnceLock<Regex> = OnceLock::new();
static ASSIGNEE_RE: OnceLock<Regex> = OnceLock::new();
static LABELS_RE: OnceLock<Regex> = OnceLock::new();
static WEIGHT_RE: OnceLock<Regex> = OnceLock::new();
static TIME_ESTIMATE_RE: OnceLock<Regex> = OnceLock::new();
static DUE_DATE_RE: OnceLock<Regex> = OnceLock::new();

fn issue_head_re() -> &'static Regex {
    ISSUE_HEAD_RE.get_or_init(|| Regex::new(r"(?m)^### Issue \d+:(.*)$").unwrap())
}

fn project_re() -> &'static Regex {
    PROJECT_RE.get_or_init(|| {
        Regex::new(r"(?m)^## Project: ([^\n]+)\n\*\*Milestone:\*\* ([^\n]+)\n\*\*Labels:\*\* ([^\n]+)")
            .unwrap()
    })
}

/// Any bold field opener (`**` followed by an uppercase letter); terminates
/// a multi-line description value.
fn bold_field_re() -> &'static Regex {
    BOLD_FIELD_RE.get_or_init(|| Regex::new(r"\*\*[A-Z]").unwrap())
}

fn assignee_re() -> &'static Regex {
    ASSIGNEE_RE.get_or_init(|| Regex::new(r"\*\*Assignee:\*\* ([^\n]+)").unwrap())
}

fn labels_re() -> &'static Regex {
    LABELS_RE.get_or_init(|| Regex::new(r"\*\*Labels:\*\* ([^\n]+)").unwrap())
}

fn weight_re() -> &'static Regex {
    WEIGHT_RE.get_or_init(|| Regex::new(r"\*\*Weight:\*\* (\d+)").unwrap())
}

fn time_estimate_re() -> &'static Regex {
    TIME_ESTIMATE_RE.get_or_init(|| Regex::new(r"\*\*Time Estimate:\*\* ([^\n]+)").unwrap())
}

fn due_date_re() -> &'static Regex {
    DUE_DATE_RE.get_or_init(|| Regex::new(r"\*\*Due Date:\*\* ([^\n]+)").unwrap())
}

/// Parses an issue document into records, preserving document order.
///
/// A document without a single `### Issue` header yields an empty vector;
/// the presence check runs before any field extraction so that unrelated
/// markdown never produces false-positive field matches.
pub fn extract_issues(content: &str, source_file: &str) -> Vec<IssueRecord> {
    // (header offset, title text, body start)
    let heads: Vec<(usize, &str, usize)> = issue_head_re()
        .captures_iter(content)
        .map(|caps| {
            let whole = caps.get(0).unwrap();
            let title = caps.get(1).unwrap();
            (whole.start(), title.as_str(), whole.end())
        })
        .collect();

    if heads.is_empty() {
        return Vec::new();
    }

    let projects = project_contexts(content);

    let mut records = Vec::new();
    // Rolling context: once a project header has been resolved for some
    // issue, it carries over to later issues that have no nearer header.
    let mut current: Option<&ProjectContext> = None;

    for (i, &(head_start, title, body_start)) in heads.iter().enumerate() {
        // A block ends at the next issue header or the next project
        // header, whichever comes first; a later project's field lines
        // must not bleed into this issue's field scan.
        let mut block_end = heads
            .get(i + 1)
            .map(|&(next_start, _, _)| next_start)
            .unwrap_or(content.len());
        if let Some(next_project) = projects.iter().find(|p| p.offset >= body_start) {
            block_end = block_end.min(next_project.offset);
        }
        let block = &content[body_start..block_end];

        if let Some(ctx) = nearest_project(&projects, head_start) {
            current = Some(ctx);
        }

        if let Some(record) = parse_block(title, block, current, source_file) {
            records.push(record);
        }
    }

    records
}

/// Collects every `## Project:` header block with its byte offset.
fn project_contexts(content: &str) -> Vec<ProjectContext> {
    project_re()
        .captures_iter(content)
        .map(|caps| ProjectContext {
            name: caps[1].trim().to_string(),
            milestone: caps[2].trim().to_string(),
            labels: caps[3].trim().to_string(),
            offset: caps.get(0).unwrap().start(),
        })
        .collect()
}

/// Returns the project header with the greatest offset strictly before
/// `offset`, if any. Headers are in document order, so the last match wins.
fn nearest_project(projects: &[ProjectContext], offset: usize) -> Option<&ProjectContext> {
    projects.iter().rev().find(|p| p.offset < offset)
}

/// Parses a single issue block into a record.
///
/// Returns `None` when the header carried no title; a titleless record
/// never enters the output sequence.
fn parse_block(
    title: &str,
    block: &str,
    ctx: Option<&ProjectContext>,
    source_file: &str,
) -> Option<IssueRecord> {
    let title = title.trim();
    if title.is_empty() {
        return None;
    }

    let mut labels = Vec::new();
    if let Some(caps) = labels_re().captures(block) {
        push_labels(&mut labels, &caps[1]);
    }
    if let Some(ctx) = ctx {
        push_labels(&mut labels, &ctx.labels);
    }

    Some(IssueRecord {
        title: title.to_string(),
        description: description_block(block).unwrap_or_default(),
        labels,
        assignee: single_line(assignee_re(), block),
        milestone: ctx.map(|c| c.milestone.clone()).unwrap_or_default(),
        weight: weight_re()
            .captures(block)
            .and_then(|caps| caps[1].parse().ok()),
        time_estimate: single_line(time_estimate_re(), block),
        due_date: single_line(due_date_re(), block),
        project: ctx.map(|c| c.name.clone()).unwrap_or_default(),
        source_file: source_file.to_string(),
    })
}

/// Splits a comma-separated label list, trimming entries and dropping
/// empties. Duplicates are preserved as found.
fn push_labels(labels: &mut Vec<String>, raw: &str) {
    for label in raw.split(',') {
        let label = label.trim();
        if !label.is_empty() {
            labels.push(label.to_string());
        }
    }
}

/// Captures a single-line field value, or empty when absent.
fn single_line(re: &Regex, block: &str) -> String {
    re.captures(block)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_default()
}

/// Extracts the multi-line `**Description:**` value.
///
/// The value runs from the line after the marker to the first of: the next
/// bold field, a horizontal rule, or the end of the block.
fn description_block(block: &str) -> Option<String> {
    const MARKER: &str = "**Description:**\n";
    let start = block.find(MARKER)? + MARKER.len();
    let rest = &block[start..];

    let mut end = rest.len();
    if let Some(m) = bold_field_re().find(rest) {
        end = end.min(m.start());
    }
    if let Some(pos) = rest.find("\n---") {
        end = end.min(pos);
    }

    Some(rest[..end].trim().to_string())
}
