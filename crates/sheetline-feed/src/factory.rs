//! Public entry points.
//!
//! Everything funnels into [`config_from_url`]: parse the locator, fetch
//! the feed through a [`FeedSource`], detect the layout and assemble the
//! configuration. [`make_config`] and the deprecated [`from_google`] are
//! thin adapters over it.

use sheetline_core::{SpreadsheetLocator, TimelineConfiguration};
use tracing::{debug, warn};

use crate::assemble::build_config;
use crate::error::{ConfigError, ConfigResult, SourceError};
use crate::raw_entry::FeedDocument;
use crate::source::FeedSource;

/// Builds a configuration from a spreadsheet URL or bare key.
///
/// # Errors
///
/// - [`ConfigError::UnrecognizedIdentifier`] if `url` is not a spreadsheet
///   locator
/// - [`ConfigError::Source`] if the feed cannot be retrieved
/// - any detection or extraction error of [`build_config`]
pub async fn config_from_url(
    source: &dyn FeedSource,
    url: &str,
) -> ConfigResult<TimelineConfiguration> {
    let locator =
        SpreadsheetLocator::parse(url).ok_or_else(|| ConfigError::unrecognized_identifier(url))?;
    config_from_locator(source, &locator).await
}

/// Builds a configuration for an already parsed locator.
pub async fn config_from_locator(
    source: &dyn FeedSource,
    locator: &SpreadsheetLocator,
) -> ConfigResult<TimelineConfiguration> {
    let feed_url = source.feed_url(locator);
    debug!(source = source.name(), %locator, %feed_url, "retrieving feed");

    let feed = source.fetch_feed(&feed_url).await?;
    build_config(&feed)
}

/// Builds a configuration and hands it to `callback`.
///
/// The callback runs at most once, after the feed has been retrieved, and
/// only when the build succeeds. Failures are returned instead.
///
/// # Errors
///
/// Same as [`config_from_url`]; the callback is not invoked on error.
pub async fn make_config<F>(source: &dyn FeedSource, url: &str, callback: F) -> ConfigResult<()>
where
    F: FnOnce(TimelineConfiguration),
{
    let config = config_from_url(source, url).await?;
    callback(config);
    Ok(())
}

/// Builds a configuration, blocking the calling thread.
///
/// Runs [`config_from_url`] on a private single-threaded runtime.
///
/// # Errors
///
/// Same as [`config_from_url`], plus a source configuration error when
/// called from within an async runtime or when the runtime cannot be
/// started.
#[deprecated(note = "use `make_config(source, url, callback)` instead")]
pub fn from_google(source: &dyn FeedSource, url: &str) -> ConfigResult<TimelineConfiguration> {
    warn!(
        "from_google is deprecated and will be removed soon; use make_config(source, url, callback)"
    );

    if tokio::runtime::Handle::try_current().is_ok() {
        return Err(SourceError::configuration(
            "from_google cannot be called from within an async runtime; use make_config",
        )
        .into());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| {
            SourceError::configuration(format!("failed to start runtime: {}", e)).with_cause(e)
        })?;

    runtime.block_on(config_from_url(source, url))
}

/// Builds a configuration from the text of a saved list feed.
///
/// # Errors
///
/// Returns [`ConfigError::Source`] if the text is not a list feed, or any
/// error of [`build_config`].
pub fn feed_json_to_config(json: &str) -> ConfigResult<TimelineConfiguration> {
    let feed = FeedDocument::from_json(json)?;
    build_config(&feed)
}
