//! Table rendering utilities for CLI outputs.
//!
//! Widths are measured in terminal columns (`unicode-width`), ignoring
//! ANSI color sequences, so colored and accented cells still line up.

use crate::utils::formatting::strip_ansi;
use unicode_width::UnicodeWidthStr;

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: Vec<S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| visible_width(h)).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                widths[i] = widths[i].max(visible_width(cell));
            }
        }
        widths
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        // Header
        for (h, w) in self.headers.iter().zip(&widths) {
            out.push_str(&pad(&format!("\x1b[1m{h}\x1b[0m"), *w));
            out.push_str("  ");
        }
        out.push('\n');

        let total: usize = widths.iter().sum::<usize>() + 2 * widths.len();
        out.push_str(&"-".repeat(total));
        out.push('\n');

        // Rows
        for row in &self.rows {
            for (i, w) in widths.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                out.push_str(&pad(cell, *w));
                out.push_str("  ");
            }
            out.push('\n');
        }

        out
    }
}

pub fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_str())
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(visible_width(s));
    format!("{s}{}", " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colored_cells_do_not_break_alignment() {
        let mut t = Table::new(vec!["Name", "Unit"]);
        t.add_row(vec!["\x1b[31mAda\x1b[0m".into(), "Neurology".into()]);
        t.add_row(vec!["Chukwuemeka".into(), "Nephrology".into()]);

        let rendered = t.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(visible_width(lines[2]), visible_width(lines[3]));
    }

    #[test]
    fn wide_characters_count_as_two_columns() {
        assert_eq!(visible_width("Ọla"), 3);
        assert_eq!(visible_width("日本"), 4);
    }
}
