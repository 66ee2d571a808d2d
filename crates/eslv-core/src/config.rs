//! Configuration types for eslv.
//!
//! [`Config::load`] reads `~/.config/eslv/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use crate::policy::{HeaderPolicy, DEFAULT_SUPPRESSED};
use crate::search::{MatchMode, SearchOptions};
use serde::Deserialize;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[ui]
list_width       = 32
timestamp_format = "%H:%M:%S"
theme            = "default"

[headers]
suppress = [
    "Core-UUID",
    "Event-Calling-File",
    "Event-Calling-Function",
    "Event-Calling-Line-Number",
    "Event-Date-GMT",
    "Event-Date-Timestamp",
    "FreeSWITCH-Hostname",
    "FreeSWITCH-IPv4",
    "FreeSWITCH-IPv6",
    "FreeSWITCH-Switchname",
    "FreeSWITCH-Version",
]

[search]
mode                   = "regex"
plain_case_sensitive   = true
regex_case_insensitive = true
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/eslv/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub headers: HeadersConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// Width of the event list pane, in columns.
    #[serde(default = "default_list_width")]
    pub list_width: u16,
    /// chrono format string for the detail pane title.
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_list_width() -> u16 { 32 }
fn default_timestamp_format() -> String { "%H:%M:%S".to_string() }
fn default_theme() -> String { "default".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            list_width: default_list_width(),
            timestamp_format: default_timestamp_format(),
            theme: default_theme(),
        }
    }
}

/// `[headers]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct HeadersConfig {
    /// Header keys hidden unless `--all` is given.
    #[serde(default = "default_suppress")]
    pub suppress: Vec<String>,
}

fn default_suppress() -> Vec<String> {
    DEFAULT_SUPPRESSED.iter().map(|key| key.to_string()).collect()
}

impl Default for HeadersConfig {
    fn default() -> Self {
        Self {
            suppress: default_suppress(),
        }
    }
}

impl HeadersConfig {
    pub fn policy(&self) -> HeaderPolicy {
        HeaderPolicy::from_keys(self.suppress.iter().cloned())
    }
}

/// `[search]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub mode: MatchMode,
    #[serde(default = "default_true")]
    pub plain_case_sensitive: bool,
    #[serde(default = "default_true")]
    pub regex_case_insensitive: bool,
}

fn default_true() -> bool { true }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            mode: MatchMode::default(),
            plain_case_sensitive: true,
            regex_case_insensitive: true,
        }
    }
}

impl SearchConfig {
    pub fn options(&self) -> SearchOptions {
        SearchOptions {
            plain_case_sensitive: self.plain_case_sensitive,
            regex_case_insensitive: self.regex_case_insensitive,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/eslv/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
            tracing::debug!(path = %path.display(), "wrote default config");
        }

        Self::from_sources(Some(path))
    }

    /// Load defaults layered under an optional file, without creating it.
    pub fn from_sources(path: Option<PathBuf>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.as_path()).required(false));
        }
        builder.build()?.try_deserialize().map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("eslv")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
