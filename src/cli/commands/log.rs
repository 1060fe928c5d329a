use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::{LogEntry, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::formatting::strip_ansi;
use ansi_term::Colour;

const OP_TARGET_MAX: usize = 60;

/// Restituisce il colore ANSI in base all'operazione
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "edit" => Colour::Yellow,
        "sync" => Colour::Cyan,
        "export" => Colour::Blue,
        "remote_fallback" => Colour::RGB(255, 153, 51), // arancione
        "migration_applied" | "init" => Colour::Purple,
        _ => Colour::White,
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let pool = DbPool::new(&cfg.database)?;
        let entries = load_log(&pool.conn)?;

        if entries.is_empty() {
            info("The internal log is empty.");
            return Ok(());
        }

        println!("📜 Internal log:\n");
        for line in render_log(&entries) {
            println!("{line}");
        }
    } else {
        info("Use `hoflow log --print` to show the internal log.");
    }

    Ok(())
}

/// One line per entry: `id: date | op (target) => message`, op colored,
/// op+target truncated to a fixed width.
fn render_log(entries: &[LogEntry]) -> Vec<String> {
    let op_target = |e: &LogEntry| {
        if e.target.is_empty() {
            e.operation.clone()
        } else {
            format!("{} ({})", e.operation, e.target)
        }
    };

    let op_w = entries
        .iter()
        .map(|e| op_target(e).chars().count())
        .max()
        .unwrap_or(10)
        .min(OP_TARGET_MAX);
    let id_w = entries
        .iter()
        .map(|e| e.id.to_string().len())
        .max()
        .unwrap_or(1);

    entries
        .iter()
        .map(|e| {
            let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                .map(|dt| dt.format("%F %T").to_string())
                .unwrap_or_else(|_| e.date.clone());

            // --- TRUNCATE senza ANSI ---
            let visible = op_target(e);
            let visible = if visible.chars().count() > OP_TARGET_MAX {
                let mut s: String = visible.chars().take(OP_TARGET_MAX - 3).collect();
                s.push_str("...");
                s
            } else {
                visible
            };

            // solo l'operazione è colorata
            let color = color_for_operation(&e.operation);
            let colored = match visible.split_once(' ') {
                Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                None => color.paint(visible.as_str()).to_string(),
            };

            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).chars().count()));

            format!(
                "{:>id_w$}: {:<19} | {}{} => {}",
                e.id, date, colored, padding, e.message
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, op: &str, target: &str, msg: &str) -> LogEntry {
        LogEntry {
            id,
            date: "2025-03-01T10:00:00+01:00".into(),
            operation: op.into(),
            target: target.into(),
            message: msg.into(),
        }
    }

    #[test]
    fn lines_align_whatever_the_color() {
        let lines = render_log(&[
            entry(1, "add", "abc", "Jane Doe (Nephrology)"),
            entry(12, "remote_fallback", "abc", "insert: timeout"),
        ]);

        let arrows: Vec<usize> = lines
            .iter()
            .map(|l| strip_ansi(l).find("=>").unwrap())
            .collect();
        assert_eq!(arrows[0], arrows[1]);
        assert!(strip_ansi(&lines[0]).starts_with(" 1: 2025-03-01 10:00:00 | add (abc)"));
    }

    #[test]
    fn long_targets_are_truncated() {
        let long = "x".repeat(100);
        let lines = render_log(&[entry(1, "export", &long, "m")]);
        assert!(strip_ansi(&lines[0]).contains("..."));
    }
}
