//! Configuration management for the storyforge system.
//!
//! This crate handles discovering and loading `.storyforge.yaml` files and
//! providing typed access to configuration values. All keys are optional;
//! flags and environment variables take precedence in the binary.

pub mod config;
pub mod discover;
