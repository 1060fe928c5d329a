use crate::core::dates::DEFAULT_UPCOMING_WINDOW_DAYS;
use crate::core::priority::{PriorityUnit, default_priority_units};
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Which backend plays the role of the shared remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteKind {
    /// Local cache only
    #[default]
    None,
    /// `house_officers` table in a separate SQLite file (e.g. a shared drive)
    Sqlite,
    /// Supabase / PostgREST HTTP endpoint
    Postgrest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub kind: RemoteKind,
    /// Path of the remote SQLite file (`kind: sqlite`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Project URL, e.g. `https://xyz.supabase.co` (`kind: postgrest`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Anon / service key sent as `apikey` and bearer token (`kind: postgrest`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            kind: RemoteKind::None,
            path: None,
            url: None,
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default = "default_upcoming_window")]
    pub upcoming_window_days: u32,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_priority_units")]
    pub priority_units: Vec<PriorityUnit>,
}

fn default_timeout_secs() -> u64 {
    10
}
fn default_upcoming_window() -> u32 {
    DEFAULT_UPCOMING_WINDOW_DAYS
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            remote: RemoteConfig::default(),
            upcoming_window_days: default_upcoming_window(),
            log_level: default_log_level(),
            priority_units: default_priority_units(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("hoflow")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".hoflow")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("hoflow.conf")
    }

    /// Return the full path of the local SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("hoflow.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let mut cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;

        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        if let Some(p) = &cfg.remote.path {
            cfg.remote.path = Some(expand_tilde(p).to_string_lossy().to_string());
        }

        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Initialize configuration and database paths.
    ///
    /// Returns the config with the resolved database path. When `is_test` is
    /// set the config file is not written (used by the integration tests).
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> io::Result<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // Keep remote settings from an existing config file
        let mut config = Self::load().unwrap_or_default();

        // DB name: user provided or default
        let db_path = match custom_db {
            Some(name) => {
                let p = expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => PathBuf::from(&config.database),
        };
        config.database = db_path.to_string_lossy().to_string();

        if !is_test {
            config
                .save_to(&Self::config_file())
                .map_err(|e| io::Error::other(e.to_string()))?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Unit;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hoflow.conf");
        fs::write(&path, "database: /tmp/ho.sqlite\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.database, "/tmp/ho.sqlite");
        assert_eq!(cfg.remote.kind, RemoteKind::None);
        assert_eq!(cfg.remote.timeout_secs, 10);
        assert_eq!(cfg.upcoming_window_days, 7);
        assert_eq!(cfg.priority_units.len(), 4);
        assert_eq!(cfg.priority_units[0].unit, Unit::Nephrology);
    }

    #[test]
    fn remote_and_priorities_are_configurable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hoflow.conf");
        fs::write(
            &path,
            r#"
database: /tmp/ho.sqlite
remote:
  kind: postgrest
  url: https://example.supabase.co
  api_key: secret
priority_units:
  - { unit: Cardiology 1, required: 4, priority: 1 }
"#,
        )
        .unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.remote.kind, RemoteKind::Postgrest);
        assert_eq!(cfg.remote.url.as_deref(), Some("https://example.supabase.co"));
        assert_eq!(cfg.priority_units.len(), 1);
        assert_eq!(cfg.priority_units[0].required, 4);
    }

    #[test]
    fn broken_yaml_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hoflow.conf");
        fs::write(&path, "database: [unterminated").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(AppError::Config(_))
        ));
    }
}
