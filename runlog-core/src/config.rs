//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/runlog/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/runlog/` (~/.config/runlog/)
//! - State/Logs: `$XDG_STATE_HOME/runlog/` (~/.local/state/runlog/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

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

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Dashboard presentation settings
    #[serde(default)]
    pub dashboard: DashboardConfig,
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

/// Dashboard configuration
#[derive(Debug, Deserialize)]
pub struct DashboardConfig {
    /// Runner selected when a file is first loaded (None = all runners)
    #[serde(default)]
    pub default_person: Option<String>,

    /// Terminal rows reserved for the miles chart
    #[serde(default = "default_chart_height")]
    pub chart_height: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_person: None,
            chart_height: default_chart_height(),
        }
    }
}

fn default_chart_height() -> u16 {
    16
}

impl DashboardConfig {
    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.chart_height < 5 {
            return Err(Error::Config(
                "dashboard.chart_height must be at least 5".to_string(),
            ));
        }
        if let Some(person) = &self.default_person {
            if person.trim() != person {
                return Err(Error::Config(
                    "dashboard.default_person must not have surrounding whitespace".to_string(),
                ));
            }
        }
        Ok(())
    }
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
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.dashboard.validate()?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/runlog/config.toml` (~/.config/runlog/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("runlog").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/runlog/` (~/.local/state/runlog/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("runlog")
    }

    /// Returns the log file path
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("runlog.log")
    }
}
