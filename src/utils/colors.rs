/// ANSI color helper utilities for terminal output.
use crate::core::dates::TimelineBand;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";

/// Timeline band color:
/// urgent → red, warning → yellow, ok → green, past → grey
pub fn color_for_band(band: TimelineBand) -> &'static str {
    match band {
        TimelineBand::Urgent => RED,
        TimelineBand::Warning => YELLOW,
        TimelineBand::Ok => GREEN,
        TimelineBand::Past => GREY,
    }
}

/// Staffing color: complete → green, short → red
pub fn color_for_staffing(complete: bool) -> &'static str {
    if complete { GREEN } else { RED }
}

/// Grigio per i campi vuoti (`-`, `Not specified`), testo normale altrimenti.
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "-" || v == "Not specified" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

pub fn paint(color: &str, value: &str) -> String {
    format!("{color}{value}{RESET}")
}
