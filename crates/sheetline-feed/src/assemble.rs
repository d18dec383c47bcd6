//! Feed to configuration assembly.

use sheetline_core::TimelineConfiguration;
use tracing::debug;

use crate::error::ConfigResult;
use crate::raw_entry::FeedDocument;
use crate::schema::{SchemaVersion, detect_schema};

/// Builds a configuration from a feed whose layout is already known.
///
/// Rows are extracted in feed order. A `title` row becomes the
/// configuration title (a later title row replaces an earlier one); every
/// other row is appended to the events.
///
/// # Errors
///
/// The first row that fails extraction aborts the build.
pub fn assemble(schema: SchemaVersion, feed: &FeedDocument) -> ConfigResult<TimelineConfiguration> {
    let mut config = TimelineConfiguration::new();

    for (row, entry) in feed.entries.iter().enumerate() {
        let extracted = schema.extract(entry, row)?;
        if let Some(previous) = config.push_row(extracted) {
            debug!(
                row,
                replaced = %previous.text.headline,
                "title row replaces an earlier title row"
            );
        }
    }

    debug!(
        events = config.events.len(),
        has_title = config.title.is_some(),
        "assembled timeline configuration"
    );
    Ok(config)
}

/// Detects the layout of a feed and builds its configuration.
///
/// # Errors
///
/// Fails on an empty feed, an unknown layout, or the first bad row.
pub fn build_config(feed: &FeedDocument) -> ConfigResult<TimelineConfiguration> {
    let schema = detect_schema(feed)?;
    assemble(schema, feed)
}
