//! Subcommand implementations.

pub mod build;
pub mod config;
pub mod convert;
pub mod locate;

use sheetline_core::TimelineConfiguration;
use sheetline_feed::FeedSource;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Serializes a timeline configuration for stdout.
pub fn render_json(config: &TimelineConfiguration, pretty: bool) -> ClientResult<String> {
    let result = if pretty {
        serde_json::to_string_pretty(config)
    } else {
        serde_json::to_string(config)
    };
    result.map_err(|e| ClientError::Output(format!("failed to serialize configuration: {}", e)))
}

/// Creates the feed source described by the `[feed]` settings.
#[cfg(feature = "google")]
pub fn build_source(config: &ClientConfig) -> ClientResult<Box<dyn FeedSource>> {
    use sheetline_feed::google::GoogleSheetsSource;

    let source_config = config
        .feed
        .to_source_config()
        .map_err(|e| ClientError::Config(format!("invalid [feed] settings: {}", e)))?;
    let source = GoogleSheetsSource::new(source_config)?;
    tracing::debug!(base_url = %source.config().base_url, "Google Sheets source initialized");
    Ok(Box::new(source))
}

/// Creates the feed source described by the `[feed]` settings.
///
/// Without Google Sheets support every fetch fails with a configuration
/// error; offline commands keep working.
#[cfg(not(feature = "google"))]
pub fn build_source(_config: &ClientConfig) -> ClientResult<Box<dyn FeedSource>> {
    use sheetline_feed::{ErrorSource, SourceError};

    tracing::warn!("built without Google Sheets support; feeds cannot be fetched");
    Ok(Box::new(ErrorSource::new(
        "google",
        &SourceError::configuration("sheetline was built without Google Sheets support"),
    )))
}
