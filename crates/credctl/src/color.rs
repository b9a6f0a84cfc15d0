//! CLI color helpers.
//!
//! All functions respect `NO_COLOR`, `FORCE_COLOR`, and TTY detection via
//! `owo-colors`' `if_supports_color()`.

use owo_colors::OwoColorize;
use owo_colors::Stream::{Stderr, Stdout};

// Policy and resource names: #7CB4C8
const RESOURCE: (u8, u8, u8) = (124, 180, 200);

// Completed steps: #6B8F5E
const DONE: (u8, u8, u8) = (107, 143, 94);

// Failures: #B87060
const FAILURE: (u8, u8, u8) = (184, 112, 96);

// Secondary text: #5C6370
const MUTED: (u8, u8, u8) = (92, 99, 112);

/// Called once from main.rs when `--no-color` is passed.
pub fn set_no_color() {
    owo_colors::set_override(false);
}

/// Highlight a resource name (policy, user, directory).
pub fn resource(text: &str) -> String {
    text.if_supports_color(Stdout, |t| {
        t.truecolor(RESOURCE.0, RESOURCE.1, RESOURCE.2)
    })
    .to_string()
}

pub fn done(text: &str) -> String {
    text.if_supports_color(Stdout, |t| t.truecolor(DONE.0, DONE.1, DONE.2))
        .to_string()
}

/// Error styling for stderr messages.
pub fn error(text: &str) -> String {
    text.if_supports_color(Stderr, |t| {
        t.truecolor(FAILURE.0, FAILURE.1, FAILURE.2)
    })
    .to_string()
}

/// Hint styling for secondary info on stderr.
pub fn hint(text: &str) -> String {
    text.if_supports_color(Stderr, |t| t.truecolor(MUTED.0, MUTED.1, MUTED.2))
        .to_string()
}
