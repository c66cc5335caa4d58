//! Terminal UI components for the storyforge system.
//!
//! Provides Ayu-themed color styling, terminal detection, and the
//! interactive confirmation prompt used before mutating runs.

pub mod prompt;
pub mod styles;
pub mod terminal;
