//! GitLab CLI integration for the storyforge system.
//!
//! This crate provides the `glab` subprocess wrapper, the narrow
//! [`tracker::Tracker`] capability trait the rest of the system talks to,
//! and milestone reconciliation. Nothing outside this crate spawns a
//! process.

pub mod client;
pub mod reconcile;
pub mod tracker;
