//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/sheetline/config.toml` by default. Every section and key is
//! optional:
//!
//! ```toml
//! [feed]
//! base_url = "https://spreadsheets.google.com"
//! timeout_secs = 30
//!
//! [output]
//! pretty = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sheetline_core::DEFAULT_FEED_BASE;
use thiserror::Error;

/// Errors reading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`ClientConfig`].
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

// ---------------------------------------------------------------------------
// ClientConfig (config.toml)
// ---------------------------------------------------------------------------

/// Configuration for the sheetline client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Feed retrieval settings.
    pub feed: FeedSettings,

    /// Output settings.
    pub output: OutputSettings,
}

/// Feed retrieval settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    /// Host serving the list feeds.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_FEED_BASE.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl ClientConfig {
    /// Loads configuration from the default path.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigFileError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigFileError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sheetline")
    }
}

// ---------------------------------------------------------------------------
// FeedSettings -> source configuration
// ---------------------------------------------------------------------------

#[cfg(feature = "google")]
impl FeedSettings {
    /// Converts to Google Sheets source configuration.
    pub fn to_source_config(
        &self,
    ) -> sheetline_feed::SourceResult<sheetline_feed::google::GoogleSheetsConfig> {
        use sheetline_feed::google::GoogleSheetsConfig;

        Ok(GoogleSheetsConfig::new()
            .with_base_url(&self.base_url)?
            .with_timeout(std::time::Duration::from_secs(self.timeout_secs)))
    }
}
