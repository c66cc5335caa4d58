//! IssueRecord -- the central domain model for the storyforge system.

use serde::{Deserialize, Serialize};

/// Helper for `skip_serializing_if` on `Vec` fields.
fn is_empty_vec<T>(v: &Vec<T>) -> bool {
    v.is_empty()
}

/// A single issue to be created in the external tracker.
///
/// Records are produced by the extraction grammars, enriched immediately
/// after, and consumed exactly once by submission. A record without a title
/// never leaves the extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRecord {
    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Own explicit labels followed by inherited project labels, in that
    /// order. Entries are trimmed and empties dropped; duplicates are
    /// preserved as found.
    #[serde(default, skip_serializing_if = "is_empty_vec")]
    pub labels: Vec<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub assignee: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub milestone: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub time_estimate: String,

    /// Only populated by the bulk-folder grammar variant.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub due_date: String,

    /// Name of the nearest preceding project header, if any.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project: String,

    #[serde(default)]
    pub source_file: String,
}

impl IssueRecord {
    /// Returns `true` if the record carries a non-empty title.
    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }
}

/// Project context captured from a `## Project:` heading block.
///
/// Applies to every issue appearing after the header until superseded by a
/// later one. `offset` is the byte position of the header in the document,
/// used for structural nearest-preceding-header resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    pub name: String,
    pub milestone: String,
    /// Raw comma-separated label list as written in the header block.
    pub labels: String,
    pub offset: usize,
}

/// The provenance footer appended to descriptions that name their source.
pub fn provenance_footer(source_file: &str) -> String {
    format!("---\n*Created from: {}*", source_file)
}

/// Builder for constructing an [`IssueRecord`] with a fluent API.
pub struct IssueRecordBuilder {
    record: IssueRecord,
}

impl IssueRecordBuilder {
    /// Creates a new builder with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        let record = IssueRecord {
            title: title.into(),
            ..IssueRecord::default()
        };
        Self { record }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.record.description = description.into();
        self
    }

    pub fn labels(mut self, labels: Vec<String>) -> Self {
        self.record.labels = labels;
        self
    }

    pub fn assignee(mut self, assignee: impl Into<String>) -> Self {
        self.record.assignee = assignee.into();
        self
    }

    pub fn milestone(mut self, milestone: impl Into<String>) -> Self {
        self.record.milestone = milestone.into();
        self
    }

    pub fn weight(mut self, weight: u32) -> Self {
        self.record.weight = Some(weight);
        self
    }

    pub fn time_estimate(mut self, estimate: impl Into<String>) -> Self {
        self.record.time_estimate = estimate.into();
        self
    }

    pub fn due_date(mut self, due_date: impl Into<String>) -> Self {
        self.record.due_date = due_date.into();
        self
    }

    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.record.project = project.into();
        self
    }

    pub fn source_file(mut self, source_file: impl Into<String>) -> Self {
        self.record.source_file = source_file.into();
        self
    }

    /// Consumes the builder and returns the constructed [`IssueRecord`].
    pub fn build(self) -> IssueRecord {
        self.record
    }
}
