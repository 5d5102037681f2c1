//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/rollcall/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/rollcall/` (~/.config/rollcall/)
//! - Data: `$XDG_DATA_HOME/rollcall/` (~/.local/share/rollcall/)
//! - State/Logs: `$XDG_STATE_HOME/rollcall/` (~/.local/state/rollcall/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Report defaults
    #[serde(default)]
    pub report: ReportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Report defaults
#[derive(Debug, Deserialize)]
pub struct ReportConfig {
    /// Trailing-window day count applied when no `--days` flag is given.
    /// `0` means all time.
    #[serde(default)]
    pub default_window_days: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_window_days: 0,
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/rollcall/config.toml` (~/.config/rollcall/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("rollcall").join("config.toml")
    }

    /// Returns the data directory path (for the SQLite database)
    ///
    /// `$XDG_DATA_HOME/rollcall/` (~/.local/share/rollcall/)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("rollcall")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/rollcall/` (~/.local/state/rollcall/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("rollcall")
    }

    /// Returns the database file path
    ///
    /// `$XDG_DATA_HOME/rollcall/data.db` (~/.local/share/rollcall/data.db)
    pub fn database_path() -> PathBuf {
        Self::data_dir().join("data.db")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/rollcall/rollcall.log` (~/.local/state/rollcall/rollcall.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("rollcall.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.report.default_window_days, 0);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.max_files, 5);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[report]
default_window_days = 90

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.report.default_window_days, 90);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.max_files, 5);
    }

    #[test]
    fn test_config_paths() {
        assert!(Config::config_path().ends_with("rollcall/config.toml"));
        assert!(Config::database_path().ends_with("rollcall/data.db"));
        assert!(Config::log_path().ends_with("rollcall/rollcall.log"));
    }
}
