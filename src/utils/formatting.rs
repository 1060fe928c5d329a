//! Formatting utilities used for CLI output.

use regex::Regex;
use std::sync::LazyLock;

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("static regex"));

/// Remove ANSI color sequences (for width computations).
pub fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// `[#####-----]  50%`
pub fn progress_bar(pct: f64, width: usize) -> String {
    let pct = pct.clamp(0.0, 100.0);
    let filled = ((pct / 100.0) * width as f64).round() as usize;
    format!(
        "[{}{}] {:>3.0}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        pct
    )
}

/// `in 6 days`, `today`, `3 days ago`
pub fn describe_days(days: i64) -> String {
    match days {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "yesterday".to_string(),
        d if d > 0 => format!("in {d} days"),
        d => format!("{} days ago", -d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_is_clamped() {
        assert_eq!(progress_bar(50.0, 10), "[#####-----]  50%");
        assert_eq!(progress_bar(250.0, 4), "[####] 100%");
        assert_eq!(progress_bar(-5.0, 4), "[----]   0%");
    }

    #[test]
    fn ansi_sequences_are_removed() {
        assert_eq!(strip_ansi("\x1b[1mbold\x1b[0m"), "bold");
        assert_eq!(strip_ansi(&bold("x")), "x");
        assert_eq!(strip_ansi("plain"), "plain");
    }

    #[test]
    fn relative_days() {
        assert_eq!(describe_days(6), "in 6 days");
        assert_eq!(describe_days(0), "today");
        assert_eq!(describe_days(-3), "3 days ago");
    }
}
