//! Milestone reconciliation.
//!
//! Before submission, every distinct milestone name referenced by the run
//! is checked against the tracker and created when absent. Existence is an
//! exact, case-sensitive title match. A listing that fails (non-zero exit
//! or a malformed response) is treated as "not found": creation is
//! attempted anyway, once, and a failed creation never halts the run.

use std::collections::BTreeSet;

use tracing::warn;

use crate::tracker::Tracker;

/// What happened to one milestone name during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase", tag = "status", content = "detail")]
pub enum MilestoneStatus {
    /// The tracker already knows the milestone.
    Existing,
    /// The milestone was created by this run.
    Created,
    /// Creation was attempted and failed.
    Failed(String),
}

/// Per-name reconciliation outcome.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ReconcileOutcome {
    pub name: String,
    #[serde(flatten)]
    pub status: MilestoneStatus,
}

/// Ensures every name in `names` exists in the tracker.
///
/// `describe` supplies the description for newly created milestones.
/// Names are queried one at a time; each is processed exactly once
/// because the input is a set.
pub fn ensure_milestones<T: Tracker>(
    tracker: &T,
    names: &BTreeSet<String>,
    describe: impl Fn(&str) -> String,
) -> Vec<ReconcileOutcome> {
    let mut outcomes = Vec::new();

    for name in names {
        if name.is_empty() {
            continue;
        }

        let exists = match tracker.list_milestones() {
            Ok(milestones) => milestones.iter().any(|m| m.title == *name),
            Err(e) => {
                warn!(milestone = %name, error = %e, "milestone listing failed; attempting creation");
                false
            }
        };

        let status = if exists {
            MilestoneStatus::Existing
        } else {
            match tracker.create_milestone(name, &describe(name)) {
                Ok(()) => MilestoneStatus::Created,
                Err(e) => MilestoneStatus::Failed(e.to_string()),
            }
        };

        outcomes.push(ReconcileOutcome {
            name: name.clone(),
            status,
        });
    }

    outcomes
}
