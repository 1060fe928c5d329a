pub mod add;
pub mod calendar;
pub mod config;
pub mod del;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod priority;
pub mod sync;
pub mod timeline;

use crate::cli::parser::FilterArgs;
use crate::config::Config;
use crate::core::query::FilterOptions;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::{Gender, Unit};
use crate::store::{RecordStore, RemoteFailure};
use crate::ui::messages::warning;
use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
pub(crate) fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

fn write_audit(cfg: &Config, operation: &str, target: &str, message: &str) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;
    ttlog(&pool.conn, operation, target, message)
}

/// Write one audit row into the local database (non blocking).
pub(crate) fn audit(cfg: &Config, operation: &str, target: &str, message: &str) {
    if let Err(e) = write_audit(cfg, operation, target, message) {
        eprintln!("⚠️ Failed to write internal log: {}", e);
    }
}

/// Tell the user when the last store call ran on the local cache only.
/// A missing remote is the normal offline mode and stays silent.
pub(crate) fn report_remote(store: &RecordStore, cfg: &Config, op: &str, target: &str) {
    match store.last_remote_failure() {
        None | Some(RemoteFailure::NotConfigured) => {}
        Some(e) => {
            warning(format!(
                "Remote store ({}) unavailable, using the local copy: {e}",
                store.remote_name()
            ));
            audit(cfg, "remote_fallback", target, &format!("{op}: {e}"));
        }
    }
}

pub(crate) fn filter_options(args: &FilterArgs) -> AppResult<FilterOptions> {
    Ok(FilterOptions {
        unit: args.unit.as_deref().map(str::parse::<Unit>).transpose()?,
        gender: args.gender.as_deref().map(str::parse::<Gender>).transpose()?,
        search_term: args.search.clone(),
        sort_by: args.sort_by,
        sort_order: args.order,
    })
}
