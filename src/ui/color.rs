//! Color utilities for terminal output

use crate::verify::ProbeOutcome;

pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";

    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";

    pub const BRIGHT_RED: &'static str = "\x1b[91m";
}

/// Apply color to text if terminal supports it
pub fn colorize(text: &str, color: &str) -> String {
    if supports_color() {
        format!("{}{}{}", color, text, Colors::RESET)
    } else {
        text.to_string()
    }
}

/// Color used for a diagnostic line of the given outcome
pub fn outcome_color(outcome: ProbeOutcome) -> &'static str {
    match outcome {
        ProbeOutcome::Verified => Colors::GREEN,
        ProbeOutcome::InvalidAddress => Colors::YELLOW,
        ProbeOutcome::NoContent | ProbeOutcome::UnsupportedContent => Colors::YELLOW,
        ProbeOutcome::TimedOut => Colors::BRIGHT_RED,
        _ => Colors::RED,
    }
}

/// Check if the current environment supports ANSI colors
pub fn supports_color() -> bool {
    use std::env;

    if env::var("NO_COLOR").is_ok() || env::var("FORCE_COLOR").as_deref() == Ok("0") {
        return false;
    }

    // Disable formatting when running tests
    if cfg!(test) {
        return false;
    }

    if env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    if !atty::is(atty::Stream::Stdout) {
        return false;
    }

    match env::var("TERM") {
        Ok(term) => !(term == "dumb" || term.is_empty()),
        Err(_) => false,
    }
}
