//! Column layout detection.
//!
//! Published timeline sheets come in two legacy layouts:
//! - **V1**: one `startdate` (and optional `enddate`) cell per row
//! - **V3**: discrete `year` / `month` / `day` / `time` columns
//!
//! The layout is decided from the first row only and then applied to every
//! row of the feed.

use std::fmt;

use sheetline_core::ExtractedRow;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::extract::{extract_v1, extract_v3};
use crate::raw_entry::{FeedDocument, RawFeedEntry};

/// A known sheet layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaVersion {
    /// Single `startdate` string per row.
    V1,
    /// Decomposed `year`/`month`/`day` columns.
    V3,
}

impl SchemaVersion {
    /// Returns the marker column that identifies this layout.
    pub fn marker_column(&self) -> &'static str {
        match self {
            Self::V1 => "startdate",
            Self::V3 => "year",
        }
    }

    /// Runs the row extractor for this layout.
    ///
    /// `row` is the zero-based position in the feed, used in error messages.
    pub fn extract(&self, entry: &RawFeedEntry, row: usize) -> ConfigResult<ExtractedRow> {
        match self {
            Self::V1 => extract_v1(entry, row),
            Self::V3 => extract_v3(entry, row),
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1 => f.write_str("v1"),
            Self::V3 => f.write_str("v3"),
        }
    }
}

/// Picks the extractor for a feed by looking at its first row.
///
/// # Errors
///
/// - [`ConfigError::EmptyFeed`] when the feed has no rows
/// - [`ConfigError::UnrecognizedSchema`] when the first row has neither a
///   `startdate` nor a `year` column
pub fn detect_schema(feed: &FeedDocument) -> ConfigResult<SchemaVersion> {
    let first = feed.first().ok_or(ConfigError::EmptyFeed)?;

    let schema = if first.has_column(SchemaVersion::V1.marker_column()) {
        SchemaVersion::V1
    } else if first.has_column(SchemaVersion::V3.marker_column()) {
        SchemaVersion::V3
    } else {
        return Err(ConfigError::UnrecognizedSchema);
    };

    debug!(%schema, rows = feed.len(), "detected sheet layout");
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(entries: Vec<RawFeedEntry>) -> FeedDocument {
        FeedDocument::new(entries)
    }

    #[test]
    fn startdate_selects_v1() {
        let doc = feed(vec![RawFeedEntry::new().with("startdate", "2020-01-01")]);
        assert_eq!(detect_schema(&doc).unwrap(), SchemaVersion::V1);
    }

    #[test]
    fn year_selects_v3() {
        let doc = feed(vec![RawFeedEntry::new().with("year", "2020")]);
        assert_eq!(detect_schema(&doc).unwrap(), SchemaVersion::V3);
    }

    #[test]
    fn blank_marker_cell_still_counts() {
        let doc = feed(vec![RawFeedEntry::new().with("startdate", "")]);
        assert_eq!(detect_schema(&doc).unwrap(), SchemaVersion::V1);
    }

    #[test]
    fn startdate_wins_over_year() {
        let doc = feed(vec![
            RawFeedEntry::new()
                .with("year", "2020")
                .with("startdate", "2020"),
        ]);
        assert_eq!(detect_schema(&doc).unwrap(), SchemaVersion::V1);
    }

    #[test]
    fn unknown_layout_fails() {
        let doc = feed(vec![RawFeedEntry::new().with("headline", "x")]);
        assert!(matches!(
            detect_schema(&doc),
            Err(ConfigError::UnrecognizedSchema)
        ));
    }

    #[test]
    fn empty_feed_fails() {
        assert!(matches!(
            detect_schema(&FeedDocument::default()),
            Err(ConfigError::EmptyFeed)
        ));
    }

    #[test]
    fn only_first_row_is_inspected() {
        let doc = feed(vec![
            RawFeedEntry::new().with("year", "2020"),
            RawFeedEntry::new().with("startdate", "2020"),
        ]);
        assert_eq!(detect_schema(&doc).unwrap(), SchemaVersion::V3);
    }
}
