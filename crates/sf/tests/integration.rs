//! End-to-end CLI integration tests for the `sf` binary.
//!
//! Each test creates its own temporary directory and exercises the `sf`
//! binary as a subprocess via `assert_cmd`. Mutating runs are driven
//! against a stub `glab` shell script that records its argument vectors
//! to a log file, so no test ever talks to a real tracker.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a `Command` targeting the cargo-built `sf` binary.
fn sf() -> Command {
    Command::cargo_bin("sf").unwrap()
}

/// Create a workspace temp dir with an empty config, so discovery never
/// walks up into a developer's real `.storyforge.yaml`.
fn workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".storyforge.yaml"), "{}\n").unwrap();
    tmp
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Install the stub glab script into `dir` and return its path.
///
/// The stub appends every argument vector to `$GLAB_LOG`, answers
/// milestone listings with `$GLAB_MILESTONES` (default `[]`), and answers
/// issue creation with a fixed URL.
#[cfg(unix)]
fn install_stub_glab(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("glab-stub");
    fs::write(
        &script,
        r#"#!/bin/sh
if [ -n "$GLAB_LOG" ]; then
  printf '%s\n' "$*" >> "$GLAB_LOG"
fi
case "$1" in
  api)
    if [ "$3" = "--method" ]; then
      printf '{"id": 1}\n'
    else
      printf '%s\n' "${GLAB_MILESTONES:-[]}"
    fi
    ;;
  issue)
    printf 'https://gitlab.example/group/project/-/issues/101\n'
    ;;
esac
exit 0
"#,
    )
    .unwrap();
    let mut perms = fs::metadata(&script).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&script, perms).unwrap();
    script
}

const PLAN: &str = "\
## Project: Gateway
**Milestone:** Sprint-1
**Labels:** infra, ops

### Issue 1: Add rate limiting
**Description:**
Token bucket per client.

**Assignee:** alice
**Labels:** api
**Weight:** 3
**Time Estimate:** 2d

---

### Issue 2: Add request logging
**Labels:** observability
";

const STORY: &str = "\
# Story 1.2: Cluster Provisioning

## Status
Approved

**As a** platform operator, **I want** one-click provisioning, **so that** teams onboard fast.

## Acceptance Criteria
- Completes in under five minutes

## Tasks / Subtasks
- [ ] Wire up the provisioner API
- [ ] Add smoke tests
";

// ---------------------------------------------------------------------------
// Basic surface
// ---------------------------------------------------------------------------

#[test]
fn version_command() {
    let tmp = workspace();
    sf().arg("version")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("sf version"));
}

#[test]
fn version_json_has_fields() {
    let tmp = workspace();
    let output = sf()
        .args(["version", "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let info: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(info["version"].is_string());
    assert!(info["os"].is_string());
}

#[test]
fn no_subcommand_prints_help() {
    let tmp = workspace();
    sf().current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn completion_generates_a_script() {
    let tmp = workspace();
    sf().args(["completion", "bash"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("sf"));
}

// ---------------------------------------------------------------------------
// Input validation and exit behavior
// ---------------------------------------------------------------------------

#[test]
fn issues_missing_input_fails() {
    let tmp = workspace();
    sf().args(["issues", "missing.md"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn issues_without_records_fails() {
    let tmp = workspace();
    write(tmp.path(), "plain.md", "# Just notes\n\nNo issue blocks here.\n");
    sf().args(["issues", "plain.md"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no issues found"));
}

#[test]
fn bulk_missing_folder_fails() {
    let tmp = workspace();
    sf().args(["bulk", "nonexistent-folder"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn stories_without_candidates_fails() {
    let tmp = workspace();
    fs::create_dir(tmp.path().join("stories")).unwrap();
    write(
        &tmp.path().join("stories"),
        "readme.md",
        "# Not a story\n\nNo markers.\n",
    );
    sf().args(["stories", "stories"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no user story files"));
}

// ---------------------------------------------------------------------------
// Dry run: no external invocation needed
// ---------------------------------------------------------------------------

#[test]
fn issues_dry_run_reports_records() {
    let tmp = workspace();
    write(tmp.path(), "plan.md", PLAN);
    sf().args(["issues", "plan.md", "--dry-run", "--glab", "/nonexistent/glab"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[DRY RUN]"))
        .stdout(predicate::str::contains("Add rate limiting"))
        .stdout(predicate::str::contains("Add request logging"))
        .stdout(predicate::str::contains("Sprint-1"))
        .stdout(predicate::str::contains("Failed").not());
}

#[test]
fn stories_dry_run_derives_milestone_and_weight() {
    let tmp = workspace();
    write(tmp.path(), "story.md", STORY);
    sf().args(["stories", "story.md", "--dry-run"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 task(s), weight 5"))
        .stdout(predicate::str::contains("Story-1.2"));
}

#[test]
fn stories_directory_mode_filters_candidates() {
    let tmp = workspace();
    let dir = tmp.path().join("stories");
    fs::create_dir(&dir).unwrap();
    write(&dir, "story.md", STORY);
    write(&dir, "notes.md", "# Notes\n\n## Tasks / Subtasks\nno markers\n");

    sf().args(["stories", "stories", "--dry-run"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 user story file(s)"));
}

#[test]
fn config_supplies_the_default_input() {
    let tmp = workspace();
    write(tmp.path(), "plan.md", PLAN);
    fs::write(
        tmp.path().join(".storyforge.yaml"),
        "issues_path: plan.md\n",
    )
    .unwrap();

    sf().args(["issues", "--dry-run"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Add rate limiting"));
}

// ---------------------------------------------------------------------------
// Confirmation prompt
// ---------------------------------------------------------------------------

#[cfg(unix)]
#[test]
fn declined_confirmation_aborts_without_mutations() {
    let tmp = workspace();
    write(tmp.path(), "plan.md", PLAN);
    let stub = install_stub_glab(tmp.path());
    let log = tmp.path().join("glab.log");

    sf().args(["issues", "plan.md", "--glab"])
        .arg(&stub)
        .env("GLAB_LOG", &log)
        .current_dir(tmp.path())
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aborted."));

    assert!(!log.exists(), "no glab call may happen after an abort");
}

#[cfg(unix)]
#[test]
fn eof_on_stdin_counts_as_refusal() {
    let tmp = workspace();
    write(tmp.path(), "plan.md", PLAN);
    let stub = install_stub_glab(tmp.path());
    let log = tmp.path().join("glab.log");

    sf().args(["issues", "plan.md", "--glab"])
        .arg(&stub)
        .env("GLAB_LOG", &log)
        .current_dir(tmp.path())
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aborted."));

    assert!(!log.exists());
}

// ---------------------------------------------------------------------------
// Full runs against the stub glab
// ---------------------------------------------------------------------------

#[cfg(unix)]
#[test]
fn issues_full_run_creates_milestone_once() {
    let tmp = workspace();
    write(tmp.path(), "plan.md", PLAN);
    let stub = install_stub_glab(tmp.path());
    let log = tmp.path().join("glab.log");

    sf().args(["issues", "plan.md", "-y", "--glab"])
        .arg(&stub)
        .env("GLAB_LOG", &log)
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created: https://gitlab.example"))
        .stdout(predicate::str::contains("Created 2 issue(s), 0 failed"));

    let calls = fs::read_to_string(&log).unwrap();
    // Both issues reference Sprint-1; the milestone is reconciled once.
    let posts = calls.lines().filter(|l| l.contains("--method POST")).count();
    assert_eq!(posts, 1, "milestone created exactly once: {calls}");
    assert!(calls.contains("title=Sprint-1"));
    assert!(calls.contains("description=Milestone for Sprint-1 features"));

    // Issue args carry the inherited context.
    assert!(calls.contains("issue create -t Add rate limiting"));
    assert!(calls.contains("--label api,infra,ops"));
    assert!(calls.contains("-a alice"));
    assert!(calls.contains("-m Sprint-1"));
    assert!(calls.contains("--weight 3"));
    assert!(calls.contains("-e 2d"));
}

#[cfg(unix)]
#[test]
fn existing_milestone_is_not_recreated() {
    let tmp = workspace();
    write(tmp.path(), "plan.md", PLAN);
    let stub = install_stub_glab(tmp.path());
    let log = tmp.path().join("glab.log");

    sf().args(["issues", "plan.md", "-y", "--glab"])
        .arg(&stub)
        .env("GLAB_LOG", &log)
        .env("GLAB_MILESTONES", r#"[{"title": "Sprint-1"}]"#)
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Milestone 'Sprint-1' already exists"));

    let calls = fs::read_to_string(&log).unwrap();
    assert!(!calls.contains("--method POST"), "no creation call: {calls}");
}

#[cfg(unix)]
#[test]
fn bulk_run_carries_due_date_and_provenance() {
    let tmp = workspace();
    let plans = tmp.path().join("plans");
    fs::create_dir(&plans).unwrap();
    write(
        &plans,
        "q3.md",
        "\
## Project: Gateway
**Milestone:** Sprint-2
**Labels:** infra

### Issue 1: Rotate credentials
**Description:**
All service tokens.

**Due Date:** 2024-06-01
",
    );
    let stub = install_stub_glab(tmp.path());
    let log = tmp.path().join("glab.log");

    sf().args(["bulk", "plans", "-y", "--glab"])
        .arg(&stub)
        .env("GLAB_LOG", &log)
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 1 issue(s), 0 failed"));

    let calls = fs::read_to_string(&log).unwrap();
    assert!(calls.contains("--due-date 2024-06-01"));
    assert!(calls.contains("*Created from: plans/q3.md*"));
}

#[cfg(unix)]
#[test]
fn stories_run_uses_story_milestone_description() {
    let tmp = workspace();
    write(tmp.path(), "story.md", STORY);
    let stub = install_stub_glab(tmp.path());
    let log = tmp.path().join("glab.log");

    sf().args(["stories", "story.md", "-y", "--glab"])
        .arg(&stub)
        .env("GLAB_LOG", &log)
        .current_dir(tmp.path())
        .assert()
        .success();

    let calls = fs::read_to_string(&log).unwrap();
    assert!(calls.contains("title=Story-1.2"));
    assert!(calls.contains("description=User story milestone: Story-1.2"));
    assert!(calls.contains("--label user-story,kubernetes"));
    assert!(calls.contains("--weight 5"));
    // The story description embeds its own provenance footer.
    assert!(calls.contains("*Created from: story.md*"));
}

#[cfg(unix)]
#[test]
fn json_summary_is_machine_readable() {
    let tmp = workspace();
    write(tmp.path(), "plan.md", PLAN);
    let stub = install_stub_glab(tmp.path());

    let output = sf()
        .args(["issues", "plan.md", "-y", "-q", "--json", "--glab"])
        .arg(&stub)
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["total"].as_u64().unwrap(), 2);
    assert_eq!(summary["created"].as_u64().unwrap(), 2);
    assert_eq!(summary["failed"].as_u64().unwrap(), 0);
    assert_eq!(summary["records"].as_array().unwrap().len(), 2);
    assert!(summary["records"][0]["url"].is_string());
}

#[cfg(unix)]
#[test]
fn failing_glab_fails_the_record_not_the_run() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = workspace();
    write(tmp.path(), "plan.md", PLAN);

    // A glab that always fails.
    let stub = tmp.path().join("glab-broken");
    fs::write(&stub, "#!/bin/sh\necho 'simulated outage' >&2\nexit 1\n").unwrap();
    let mut perms = fs::metadata(&stub).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&stub, perms).unwrap();

    sf().args(["issues", "plan.md", "-y", "--glab"])
        .arg(&stub)
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 0 issue(s), 2 failed"))
        .stdout(predicate::str::contains("simulated outage"));
}
