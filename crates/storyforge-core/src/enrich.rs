//! Derived record fields: label inference, weight estimation, and
//! milestone-name derivation for user-story documents.

use std::sync::OnceLock;

use regex::Regex;

static OPEN_TASK_RE: OnceLock<Regex> = OnceLock::new();
static STORY_NUMBER_RE: OnceLock<Regex> = OnceLock::new();
static MILESTONE_STRIP_RE: OnceLock<Regex> = OnceLock::new();

fn open_task_re() -> &'static Regex {
    OPEN_TASK_RE.get_or_init(|| Regex::new(r"(?m)^- \[ \]").unwrap())
}

fn story_number_re() -> &'static Regex {
    STORY_NUMBER_RE.get_or_init(|| Regex::new(r"Story (\d+\.?\d*)").unwrap())
}

fn milestone_strip_re() -> &'static Regex {
    MILESTONE_STRIP_RE.get_or_init(|| Regex::new(r"[^\w\s-]").unwrap())
}

/// Keyword categories scanned for label inference. Each category
/// contributes its label at most once, no matter how often a keyword
/// occurs.
const LABEL_KEYWORDS: &[(&[&str], &str)] = &[
    (&["cluster", "kubernetes"], "kubernetes"),
    (&["deployment"], "deployment"),
    (&["management"], "management"),
    (&["security"], "security"),
    (&["monitoring"], "monitoring"),
];

/// Infers labels for a story document from its raw text.
///
/// Always includes `user-story`, then one label per keyword category found
/// anywhere in the document, case-insensitively.
pub fn infer_story_labels(content: &str) -> Vec<String> {
    let lower = content.to_lowercase();
    let mut labels = vec!["user-story".to_string()];
    for (keywords, label) in LABEL_KEYWORDS {
        if keywords.iter().any(|k| lower.contains(k)) {
            labels.push((*label).to_string());
        }
    }
    labels
}

/// Counts unchecked-checkbox markers (`- [ ]`) at line starts.
pub fn open_task_count(content: &str) -> usize {
    open_task_re().find_iter(content).count()
}

/// Maps a task count onto an issue weight.
///
/// Fixed step function: 0-5 tasks -> 5, 6-15 -> 8, more -> 10.
pub fn weight_for_task_count(count: usize) -> u32 {
    if count <= 5 {
        5
    } else if count <= 15 {
        8
    } else {
        10
    }
}

/// Derives a milestone name from a story title.
///
/// A title containing `Story <number>` (the number may carry one decimal
/// component) maps to `Story-<number>`. Any other title is stripped of
/// characters that are not word characters, whitespace, or hyphens, has
/// spaces replaced by hyphens, and is truncated to 50 characters.
pub fn derive_milestone_name(title: &str) -> String {
    if let Some(caps) = story_number_re().captures(title) {
        return format!("Story-{}", &caps[1]);
    }

    milestone_strip_re()
        .replace_all(title, "")
        .replace(' ', "-")
        .chars()
        .take(50)
        .collect()
}
