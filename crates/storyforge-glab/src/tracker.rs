//! Capability interface over the external tracker.
//!
//! [`Tracker`] is the narrow seam the pipeline drives: list milestones,
//! create a milestone, create an issue. The production implementation,
//! [`GlabTracker`], builds argument vectors for the glab CLI; tests swap
//! in an in-memory mock and never touch a process.

use serde::Deserialize;

use storyforge_core::record::{IssueRecord, provenance_footer};

use crate::client::{GlabClient, Result};

/// A milestone as returned by the tracker's listing endpoint.
///
/// The response carries many more fields; only the title participates in
/// reconciliation, so everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Milestone {
    pub title: String,
}

/// Per-run submission policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmitOptions {
    /// Forward the record's due date (bulk mode only).
    pub due_date: bool,
    /// Append a provenance footer naming the source file to the
    /// description before sending (bulk mode only; story descriptions
    /// already carry theirs).
    pub provenance_footer: bool,
}

/// The three operations the pipeline needs from the external tracker.
pub trait Tracker {
    /// Lists existing milestones.
    fn list_milestones(&self) -> Result<Vec<Milestone>>;

    /// Creates a milestone with the given title and description.
    fn create_milestone(&self, title: &str, description: &str) -> Result<()>;

    /// Creates an issue for the record, returning the created-issue
    /// reference (a URL) reported by the tracker.
    fn create_issue(&self, record: &IssueRecord, opts: SubmitOptions) -> Result<String>;
}

// ---------------------------------------------------------------------------
// glab implementation
// ---------------------------------------------------------------------------

/// [`Tracker`] implementation driving the glab CLI.
#[derive(Debug, Clone)]
pub struct GlabTracker {
    client: GlabClient,
}

impl GlabTracker {
    pub fn new(client: GlabClient) -> Self {
        Self { client }
    }

    /// The milestones API endpoint.
    ///
    /// With no explicit repository, glab substitutes `:id` from the
    /// working directory; an explicit `OWNER/REPO` is URL-encoded into the
    /// path instead, which is how the glab API command addresses foreign
    /// projects.
    fn milestones_endpoint(&self) -> String {
        match self.client.repo() {
            Some(repo) => format!("projects/{}/milestones", repo.replace('/', "%2F")),
            None => "projects/:id/milestones".to_string(),
        }
    }
}

impl Tracker for GlabTracker {
    fn list_milestones(&self) -> Result<Vec<Milestone>> {
        let args = vec!["api".to_string(), self.milestones_endpoint()];
        let output = self.client.run(&args)?;
        Ok(serde_json::from_str(&output)?)
    }

    fn create_milestone(&self, title: &str, description: &str) -> Result<()> {
        let args = vec![
            "api".to_string(),
            self.milestones_endpoint(),
            "--method".to_string(),
            "POST".to_string(),
            "--field".to_string(),
            format!("title={}", title),
            "--field".to_string(),
            format!("description={}", description),
        ];
        self.client.run(&args)?;
        Ok(())
    }

    fn create_issue(&self, record: &IssueRecord, opts: SubmitOptions) -> Result<String> {
        let mut args = issue_create_args(record, opts);
        if let Some(repo) = self.client.repo() {
            args.push("-R".to_string());
            args.push(repo.to_string());
        }
        self.client.run(&args)
    }
}

/// Builds the `glab issue create` argument vector for a record.
///
/// Optional fields are included only when populated; `-y` suppresses
/// glab's interactive confirmation.
pub fn issue_create_args(record: &IssueRecord, opts: SubmitOptions) -> Vec<String> {
    let mut args = vec![
        "issue".to_string(),
        "create".to_string(),
        "-t".to_string(),
        record.title.clone(),
    ];

    if !record.description.is_empty() {
        let description = if opts.provenance_footer {
            format!(
                "{}\n\n{}",
                record.description,
                provenance_footer(&record.source_file)
            )
        } else {
            record.description.clone()
        };
        args.push("-d".to_string());
        args.push(description);
    }

    if !record.labels.is_empty() {
        args.push("--label".to_string());
        args.push(record.labels.join(","));
    }

    if !record.assignee.is_empty() {
        args.push("-a".to_string());
        args.push(record.assignee.clone());
    }

    if !record.milestone.is_empty() {
        args.push("-m".to_string());
        args.push(record.milestone.clone());
    }

    if let Some(weight) = record.weight {
        args.push("--weight".to_string());
        args.push(weight.to_string());
    }

    if !record.time_estimate.is_empty() {
        args.push("-e".to_string());
        args.push(record.time_estimate.clone());
    }

    if opts.due_date && !record.due_date.is_empty() {
        args.push("--due-date".to_string());
        args.push(record.due_date.clone());
    }

    args.push("-y".to_string());
    args
}
