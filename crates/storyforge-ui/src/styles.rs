//! Ayu color theme and styling functions for storyforge CLI output.
//!
//! Uses the Ayu Dark color palette for consistent terminal styling.
//! Color source: <https://github.com/ayu-theme/ayu-colors>
//!
//! Only outcomes get color: created issues render pass-green, failures
//! render red, progress counters and provenance render muted. Small
//! Unicode symbols for icons, NOT emoji blobs.

use owo_colors::OwoColorize;

use crate::terminal::supports_color;

// ---------------------------------------------------------------------------
// Ayu Dark color palette (RGB values)
// ---------------------------------------------------------------------------

const PASS: (u8, u8, u8) = (0xc2, 0xd9, 0x4c); // #c2d94c - bright green
const WARN: (u8, u8, u8) = (0xff, 0xb4, 0x54); // #ffb454 - bright yellow
const FAIL: (u8, u8, u8) = (0xf0, 0x71, 0x78); // #f07178 - bright red
const MUTED: (u8, u8, u8) = (0x6c, 0x76, 0x80); // #6c7680 - muted gray
const ACCENT: (u8, u8, u8) = (0x59, 0xc2, 0xff); // #59c2ff - bright blue

// ---------------------------------------------------------------------------
// Icons
// ---------------------------------------------------------------------------

pub const ICON_PASS: &str = "\u{2713}"; // ✓
pub const ICON_WARN: &str = "\u{26A0}"; // ⚠
pub const ICON_FAIL: &str = "\u{2716}"; // ✖

// ---------------------------------------------------------------------------
// Helper: apply truecolor only when color is supported
// ---------------------------------------------------------------------------

/// Applies truecolor foreground to a string, falling back to plain text
/// when color is not supported.
fn color_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).to_string()
    } else {
        s.to_string()
    }
}

// ---------------------------------------------------------------------------
// Core semantic render helpers
// ---------------------------------------------------------------------------

/// Renders text with pass (green) styling.
pub fn render_pass(s: &str) -> String {
    color_str(s, PASS)
}

/// Renders text with warning (yellow) styling.
pub fn render_warn(s: &str) -> String {
    color_str(s, WARN)
}

/// Renders text with fail (red) styling.
pub fn render_fail(s: &str) -> String {
    color_str(s, FAIL)
}

/// Renders text with muted (gray) styling.
pub fn render_muted(s: &str) -> String {
    color_str(s, MUTED)
}

/// Renders text with accent (blue) styling.
pub fn render_accent(s: &str) -> String {
    color_str(s, ACCENT)
}

/// Renders text in bold.
pub fn render_bold(s: &str) -> String {
    if supports_color() {
        s.bold().to_string()
    } else {
        s.to_string()
    }
}

// ---------------------------------------------------------------------------
// Icon renderers
// ---------------------------------------------------------------------------

pub fn render_pass_icon() -> String {
    color_str(ICON_PASS, PASS)
}

pub fn render_warn_icon() -> String {
    color_str(ICON_WARN, WARN)
}

pub fn render_fail_icon() -> String {
    color_str(ICON_FAIL, FAIL)
}
