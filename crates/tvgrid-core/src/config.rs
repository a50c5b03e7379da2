//! Configuration types for tvgrid.
//!
//! [`Config::load`] reads `~/.config/tvgrid/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).
//!
//! The midnight-crossover hour and the placeholder program length are not
//! configuration; see [`crate::normalizer`].

use chrono_tz::Tz;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[broadcast]
timezone = "Asia/Jerusalem"
channels = ["11", "12", "13", "14"]

[listing]
min_title_chars = 4

[listing.stopwords]
"11" = ["לוח", "שידורים", "תוכניות"]
"12" = ["|", "שידור"]
"13" = ["לוח", "ערוץ"]
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/tvgrid/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub broadcast: BroadcastConfig,
    #[serde(default)]
    pub listing: ListingConfig,
}

/// `[broadcast]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct BroadcastConfig {
    /// IANA zone the listings' wall-clock times are in.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Channels shown in a lineup, in display order.
    #[serde(default = "default_channels")]
    pub channels: Vec<String>,
}

fn default_timezone() -> String { "Asia/Jerusalem".to_string() }
fn default_channels() -> Vec<String> {
    ["11", "12", "13", "14"].iter().map(|c| c.to_string()).collect()
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            channels: default_channels(),
        }
    }
}

/// `[listing]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingConfig {
    /// Shortest line (in characters) accepted as a program title.
    #[serde(default = "default_min_title_chars")]
    pub min_title_chars: usize,
    /// Per-channel substrings marking page chrome rather than titles.
    #[serde(default)]
    pub stopwords: BTreeMap<String, Vec<String>>,
}

fn default_min_title_chars() -> usize { 4 }

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            min_title_chars: default_min_title_chars(),
            stopwords: BTreeMap::new(),
        }
    }
}

impl ListingConfig {
    /// Stop-words for `channel`; empty when none are configured.
    pub fn stopwords_for(&self, channel: &str) -> &[String] {
        self.stopwords
            .get(channel)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/tvgrid/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
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

    /// The broadcast zone, parsed.
    pub fn timezone(&self) -> anyhow::Result<Tz> {
        parse_timezone(&self.broadcast.timezone)
    }
}

/// Parse an IANA zone name such as `Asia/Jerusalem` or `UTC`.
pub fn parse_timezone(name: &str) -> anyhow::Result<Tz> {
    name.parse::<Tz>()
        .map_err(|e| anyhow::anyhow!("unknown time zone {name:?}: {e}"))
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
        .join("tvgrid")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
