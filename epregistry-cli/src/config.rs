//! Configuration file loading
//!
//! This module handles loading and parsing the CLI configuration from
//! `$XDG_CONFIG_HOME/epregistry/config.toml`. A missing file means the
//! built-in defaults apply.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    /// Default: "warn"
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Where to look for installed distributions
    #[serde(default)]
    pub search: SearchConfig,
    /// Output defaults
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Search path configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    /// Directories scanned for `*.dist-info` / `*.egg-info`, in priority order
    #[serde(default)]
    pub paths: Vec<PathBuf>,
    /// Environment variable holding extra search paths, scanned after `paths`
    /// Default: "EPREGISTRY_PATH"
    #[serde(default = "default_env_var")]
    pub env_var: String,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Group listed when `list` is given no group
    /// Default: "console_scripts"
    #[serde(default = "default_group")]
    pub default_group: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_env_var() -> String {
    "EPREGISTRY_PATH".to_string()
}

fn default_group() -> String {
    "console_scripts".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            search: SearchConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            env_var: default_env_var(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_group: default_group(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default XDG config location
    ///
    /// Falls back to defaults when the file does not exist.
    pub fn load_default() -> Result<Self> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            tracing::debug!("No config file at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        Self::load(&config_path)
    }

    /// Get the default configuration file path
    ///
    /// Returns `$XDG_CONFIG_HOME/epregistry/config.toml`
    pub fn default_config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "epregistry")
            .context("Failed to determine project directories")?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.as_str()) {
            anyhow::bail!(
                "Invalid log_level: {}. Must be one of: {}",
                self.log_level,
                valid_log_levels.join(", ")
            );
        }

        if self.display.default_group.trim().is_empty() {
            anyhow::bail!("display.default_group cannot be empty");
        }

        if self.search.env_var.is_empty() {
            anyhow::bail!("search.env_var cannot be empty");
        }

        Ok(())
    }

    /// All search paths: configured ones first, then those from the environment
    pub fn search_paths(&self) -> Vec<PathBuf> {
        let mut paths = self.search.paths.clone();
        if let Some(value) = std::env::var_os(&self.search.env_var) {
            paths.extend(std::env::split_paths(&value));
        }
        paths
    }
}
