//! Configuration file loading with precedence handling.

use crate::source::PageSizes;
use crate::state::layout::DEFAULT_LIST_WIDTH_PERCENT;
use crate::view_state::DEFAULT_THEME;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "LGV_CONFIG";
/// Environment variable overriding the log root.
pub const LOG_ROOT_ENV: &str = "LGV_LOG_ROOT";
/// Environment variable overriding the theme.
pub const THEME_ENV: &str = "LGV_THEME";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
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
/// All fields are optional - if not specified, defaults are used.
/// Corresponds to `~/.config/lgv/config.toml`:
///
/// ```toml
/// log_root = "/var/log/services"
/// group_prefix = "/aws"
/// theme = "gruvbox-dark"
/// event_page_size = 500
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Directory holding the log tree.
    #[serde(default)]
    pub log_root: Option<PathBuf>,

    /// Prefix applied to the group listing.
    #[serde(default)]
    pub group_prefix: Option<String>,

    /// Theme name for JSON highlighting (e.g., "base16-ocean-dark").
    #[serde(default)]
    pub theme: Option<String>,

    /// Groups fetched per page.
    #[serde(default)]
    pub group_page_size: Option<usize>,

    /// Streams fetched per page.
    #[serde(default)]
    pub stream_page_size: Option<usize>,

    /// Events fetched per page.
    #[serde(default)]
    pub event_page_size: Option<usize>,

    /// Share of the terminal width used by the group/stream column.
    #[serde(default)]
    pub list_width_percent: Option<u16>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args, then
/// passed by value to whatever needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Directory holding the log tree.
    pub log_root: PathBuf,
    /// Prefix applied to the group listing.
    pub group_prefix: String,
    /// Theme name.
    pub theme: String,
    /// Page sizes for groups, streams and events.
    pub page_sizes: PageSizes,
    /// Share of the width used by the list column.
    pub list_width_percent: u16,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            log_root: default_log_root(),
            group_prefix: String::new(),
            theme: DEFAULT_THEME.to_string(),
            page_sizes: PageSizes::default(),
            list_width_percent: DEFAULT_LIST_WIDTH_PERCENT,
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/lgv/lgv.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("lgv").join("lgv.log"),
        None => PathBuf::from("lgv.log"),
    }
}

/// Resolve the default log root: `~/.local/share/lgv/logs` or `./logs`.
pub fn default_log_root() -> PathBuf {
    match dirs::data_local_dir() {
        Some(data_dir) => data_dir.join("lgv").join("logs"),
        None => PathBuf::from("logs"),
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
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

/// Resolve default config file path.
///
/// Returns `~/.config/lgv/config.toml` on Unix, appropriate path on other platforms.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("lgv").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `LGV_CONFIG` environment variable
/// 3. Default path `~/.config/lgv/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
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
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        log_root: config.log_root.unwrap_or(defaults.log_root),
        group_prefix: config.group_prefix.unwrap_or(defaults.group_prefix),
        theme: config.theme.unwrap_or(defaults.theme),
        page_sizes: PageSizes {
            groups: config.group_page_size.unwrap_or(defaults.page_sizes.groups),
            streams: config
                .stream_page_size
                .unwrap_or(defaults.page_sizes.streams),
            events: config.event_page_size.unwrap_or(defaults.page_sizes.events),
        },
        list_width_percent: config
            .list_width_percent
            .unwrap_or(defaults.list_width_percent),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `LGV_LOG_ROOT`: Override log root
/// - `LGV_THEME`: Override theme
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(root) = std::env::var(LOG_ROOT_ENV) {
        config.log_root = PathBuf::from(root);
    }

    if let Ok(theme) = std::env::var(THEME_ENV) {
        config.theme = theme;
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    root_override: Option<PathBuf>,
    theme_override: Option<String>,
) -> ResolvedConfig {
    if let Some(root) = root_override {
        config.log_root = root;
    }

    if let Some(theme) = theme_override {
        config.theme = theme;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
