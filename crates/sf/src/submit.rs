//! The shared run pipeline: list, confirm, reconcile milestones, submit.
//!
//! All three commands funnel their extracted records through
//! [`run_pipeline`]. The pipeline is strictly sequential: milestones are
//! reconciled once for the whole run, then each record is submitted
//! exactly once, in document order. A failed record never aborts the
//! batch, and the process exits zero as long as the run itself completed.

use std::collections::BTreeSet;

use anyhow::Result;
use serde::Serialize;

use storyforge_core::record::IssueRecord;
use storyforge_glab::reconcile::{ensure_milestones, MilestoneStatus, ReconcileOutcome};
use storyforge_glab::tracker::{SubmitOptions, Tracker};
use storyforge_ui::prompt::confirm;
use storyforge_ui::styles;

use crate::context::RuntimeContext;
use crate::output::{format_record_compact, output_json, source_file_name};

/// Which command drives the run.
///
/// The mode decides the submission policy (due dates and provenance
/// footers ride along only in bulk mode) and the description attached to
/// newly created milestones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Issues,
    Bulk,
    Stories,
}

impl RunMode {
    fn submit_options(self) -> SubmitOptions {
        match self {
            RunMode::Bulk => SubmitOptions {
                due_date: true,
                provenance_footer: true,
            },
            RunMode::Issues | RunMode::Stories => SubmitOptions::default(),
        }
    }

    fn milestone_description(self, name: &str) -> String {
        match self {
            RunMode::Stories => format!("User story milestone: {}", name),
            RunMode::Issues | RunMode::Bulk => format!("Milestone for {} features", name),
        }
    }
}

/// Per-record submission result.
#[derive(Debug, Serialize)]
pub struct RecordResult {
    pub title: String,
    pub source_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Whole-run summary, also the `--json` output shape.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub created: usize,
    pub failed: usize,
    pub dry_run: bool,
    pub milestones: Vec<ReconcileOutcome>,
    pub records: Vec<RecordResult>,
}

/// Runs the reconcile-and-submit pipeline over extracted records.
///
/// The caller guarantees `records` is non-empty; every record carries a
/// title (titleless records never leave the extractor).
pub fn run_pipeline(ctx: &RuntimeContext, records: Vec<IssueRecord>, mode: RunMode) -> Result<()> {
    if !ctx.quiet {
        println!(
            "{}",
            styles::render_bold(&format!("Found {} issue(s) to create:", records.len()))
        );
        for (i, record) in records.iter().enumerate() {
            println!("  {}. {}", i + 1, format_record_compact(record));
        }
    }

    if ctx.dry_run {
        report_dry_run(ctx, &records, mode);
        return Ok(());
    }

    if !ctx.assume_yes && !confirm(&format!("Create {} issue(s)?", records.len())) {
        println!("Aborted.");
        return Ok(());
    }

    let tracker = ctx.tracker();

    // Milestones first, each distinct name exactly once.
    let names: BTreeSet<String> = records
        .iter()
        .map(|r| r.milestone.clone())
        .filter(|name| !name.is_empty())
        .collect();
    let milestones = ensure_milestones(&tracker, &names, |name| mode.milestone_description(name));
    if !ctx.quiet {
        for outcome in &milestones {
            match &outcome.status {
                MilestoneStatus::Existing => {
                    println!("Milestone '{}' already exists", outcome.name);
                }
                MilestoneStatus::Created => {
                    println!("{} Created milestone '{}'", styles::render_pass_icon(), outcome.name);
                }
                MilestoneStatus::Failed(reason) => {
                    println!(
                        "{} Failed to create milestone '{}': {}",
                        styles::render_fail_icon(),
                        outcome.name,
                        reason
                    );
                }
            }
        }
    }

    // Submission, strictly in document order.
    let opts = mode.submit_options();
    let mut results = Vec::new();
    for (i, record) in records.iter().enumerate() {
        if !ctx.quiet {
            println!(
                "[{}/{}] Creating: {} {}",
                i + 1,
                records.len(),
                record.title,
                styles::render_muted(&format!("[{}]", source_file_name(record))),
            );
        }
        match tracker.create_issue(record, opts) {
            Ok(url) => {
                if !ctx.quiet {
                    println!("  {} Created: {}", styles::render_pass_icon(), url);
                }
                results.push(RecordResult {
                    title: record.title.clone(),
                    source_file: record.source_file.clone(),
                    url: Some(url),
                    error: None,
                });
            }
            Err(e) => {
                tracing::warn!(title = %record.title, error = %e, "issue creation failed");
                if !ctx.quiet {
                    println!("  {} Failed: {}", styles::render_fail_icon(), e);
                }
                results.push(RecordResult {
                    title: record.title.clone(),
                    source_file: record.source_file.clone(),
                    url: None,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    let summary = RunSummary {
        total: results.len(),
        created: results.iter().filter(|r| r.url.is_some()).count(),
        failed: results.iter().filter(|r| r.error.is_some()).count(),
        dry_run: false,
        milestones,
        records: results,
    };

    if ctx.json {
        output_json(&summary);
    } else if !ctx.quiet {
        println!();
        println!(
            "{}",
            styles::render_bold(&format!(
                "Created {} issue(s), {} failed",
                summary.created, summary.failed
            ))
        );
    }

    // Partial failure is not a distinct exit code; the run completed.
    Ok(())
}

/// Reports what the run would do, without any external invocation.
fn report_dry_run(ctx: &RuntimeContext, records: &[IssueRecord], mode: RunMode) {
    let names: BTreeSet<String> = records
        .iter()
        .map(|r| r.milestone.clone())
        .filter(|name| !name.is_empty())
        .collect();

    if ctx.json {
        let summary = RunSummary {
            total: records.len(),
            created: 0,
            failed: 0,
            dry_run: true,
            milestones: Vec::new(),
            records: records
                .iter()
                .map(|record| RecordResult {
                    title: record.title.clone(),
                    source_file: record.source_file.clone(),
                    url: None,
                    error: None,
                })
                .collect(),
        };
        output_json(&summary);
        return;
    }

    println!("[DRY RUN] Would ensure {} milestone(s):", names.len());
    for name in &names {
        println!("  - {} ({})", name, mode.milestone_description(name));
    }
    println!("[DRY RUN] Would create {} issue(s):", records.len());
    for record in records {
        println!("  - {}", format_record_compact(record));
        if !record.milestone.is_empty() {
            println!("      milestone: {}", record.milestone);
        }
        if !record.labels.is_empty() {
            println!("      labels: {}", record.labels.join(","));
        }
        if let Some(weight) = record.weight {
            println!("      weight: {}", weight);
        }
    }
}
