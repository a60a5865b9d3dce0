//! Configuration file loading with precedence handling.

use crate::flow::FlowParams;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FLOWCACHE_CONFIG";
/// Environment variable overriding the content area width.
pub const AREA_WIDTH_ENV: &str = "FLOWCACHE_AREA_WIDTH";
/// Environment variable overriding the items-per-line cap.
pub const ITEMS_PER_LINE_ENV: &str = "FLOWCACHE_ITEMS_PER_LINE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An override value could not be parsed.
    #[error("Invalid value {value:?} for {name}")]
    InvalidValue {
        /// Variable or setting name.
        name: String,
        /// The rejected value.
        value: String,
    },

    /// Failed to read config file (permission issues, not a file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/flowcache/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Content area width used for packing.
    #[serde(default)]
    pub content_area_width: Option<u32>,

    /// Items-per-line cap (0 = no cap).
    #[serde(default)]
    pub items_per_line: Option<usize>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Content area width. Zero leaves the cache inactive.
    pub content_area_width: u32,
    /// Items-per-line cap (0 = no cap).
    pub items_per_line: usize,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            content_area_width: 0,
            items_per_line: 0,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Packing params for a new cache.
    pub fn flow_params(&self) -> FlowParams {
        FlowParams::new(self.items_per_line, self.content_area_width)
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/flowcache/flowcache.log` on Unix-like systems,
/// or the current directory when no state directory is known.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("flowcache").join("flowcache.log")
    } else {
        PathBuf::from("flowcache.log")
    }
}

/// Resolve default config file path.
///
/// Returns `None` if the config directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("flowcache").join("config.toml"))
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist (use defaults).
///
/// # Errors
///
/// Returns error if the file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `FLOWCACHE_CONFIG` environment variable
/// 3. Default path `~/.config/flowcache/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Merge config file into defaults to create resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        content_area_width: config
            .content_area_width
            .unwrap_or(defaults.content_area_width),
        items_per_line: config.items_per_line.unwrap_or(defaults.items_per_line),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `FLOWCACHE_AREA_WIDTH` and `FLOWCACHE_ITEMS_PER_LINE`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if a set variable is not a number.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Some(width) = env_number(AREA_WIDTH_ENV)? {
        config.content_area_width = width;
    }
    if let Some(cap) = env_number(ITEMS_PER_LINE_ENV)? {
        config.items_per_line = cap;
    }
    Ok(config)
}

/// Apply CLI argument overrides. Only flags the user set are applied.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    width_override: Option<u32>,
    items_per_line_override: Option<usize>,
) -> ResolvedConfig {
    if let Some(width) = width_override {
        config.content_area_width = width;
    }
    if let Some(cap) = items_per_line_override {
        config.items_per_line = cap;
    }
    config
}

fn env_number<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                name: name.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
