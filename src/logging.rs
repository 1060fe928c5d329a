//! Diagnostic logging bootstrap (stderr).
//!
//! The audit trail lives in the database (`db::log`); this is only for
//! `log::warn!` / `log::debug!` diagnostics such as remote fallbacks.

use flexi_logger::{Logger, LoggerHandle};

/// Environment override for the configured level, e.g. `HOFLOW_LOG=debug`.
pub const LOG_ENV_VAR: &str = "HOFLOW_LOG";

const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Pick the effective level: env override first, then config.
pub fn effective_level(configured: &str, env_override: Option<&str>) -> Result<&'static str, String> {
    let raw = env_override
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(configured);
    normalize_level(raw)
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    let lower = level.trim().to_ascii_lowercase();
    LEVELS
        .iter()
        .find(|l| **l == lower)
        .copied()
        .ok_or_else(|| format!("unsupported log level `{level}`"))
}

/// Start the logger. The returned handle must be kept alive for the whole run.
pub fn init_logging(configured_level: &str) -> Result<LoggerHandle, String> {
    let env = std::env::var(LOG_ENV_VAR).ok();
    let level = effective_level(configured_level, env.as_deref())?;

    let handle = Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    log::debug!(
        "event=app_start level={level} version={}",
        env!("CARGO_PKG_VERSION")
    );
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_override_wins() {
        assert_eq!(effective_level("warn", Some("DEBUG")), Ok("debug"));
        assert_eq!(effective_level("warn", Some("  ")), Ok("warn"));
        assert_eq!(effective_level("info", None), Ok("info"));
    }

    #[test]
    fn unknown_level_is_rejected() {
        assert!(effective_level("loud", None).is_err());
    }
}
