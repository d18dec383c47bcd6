//! Raw feed rows and the list-feed wire format.
//!
//! The published list feed wraps each row in an object whose column
//! properties are namespaced (`gsx$headline`) and whose values sit under a
//! `$t` key:
//!
//! ```json
//! { "feed": { "entry": [ { "gsx$headline": { "$t": "Moon landing" } } ] } }
//! ```
//!
//! [`FeedDocument::from_json`] strips that wrapping once, at the boundary,
//! so extractors only ever see plain `column -> value` rows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{SourceError, SourceResult};

/// Namespace prefix of column properties in the list feed.
const COLUMN_PREFIX: &str = "gsx$";

/// One spreadsheet row: column name to cell text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawFeedEntry {
    columns: BTreeMap<String, String>,
}

impl RawFeedEntry {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set a column value.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.columns.insert(column.into(), value.into());
        self
    }

    /// Returns the raw value of a column, if the column exists.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns.get(column).map(String::as_str)
    }

    /// Returns true if the row has the column, even when the cell is blank.
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// Iterates over column names in sorted order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawFeedEntry
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A retrieved feed: its rows plus document metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedDocument {
    /// Title of the published sheet, when the feed carries one.
    pub title: Option<String>,
    /// Rows in feed order.
    pub entries: Vec<RawFeedEntry>,
}

impl FeedDocument {
    /// Creates a document from already de-namespaced rows.
    pub fn new(entries: Vec<RawFeedEntry>) -> Self {
        Self {
            title: None,
            entries,
        }
    }

    /// Decodes a list-feed JSON document.
    ///
    /// A missing `entry` array yields an empty document; a missing `feed`
    /// object is an invalid response.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] with code `InvalidResponse` when the text is
    /// not JSON or does not have the list-feed shape.
    pub fn from_json(json: &str) -> SourceResult<Self> {
        let wire: WireDocument = serde_json::from_str(json).map_err(|e| {
            SourceError::invalid_response(format!("failed to parse feed: {}", e)).with_cause(e)
        })?;
        Ok(wire.into())
    }

    /// Returns the first row, if any.
    pub fn first(&self) -> Option<&RawFeedEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct WireDocument {
    feed: WireFeed,
}

#[derive(Debug, Deserialize)]
struct WireFeed {
    #[serde(default)]
    title: Option<WireText>,
    #[serde(default)]
    entry: Vec<serde_json::Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct WireText {
    #[serde(rename = "$t", default)]
    text: Value,
}

impl From<WireDocument> for FeedDocument {
    fn from(wire: WireDocument) -> Self {
        let entries: Vec<RawFeedEntry> = wire.feed.entry.into_iter().map(strip_namespace).collect();
        debug!(rows = entries.len(), "decoded list feed");
        Self {
            title: wire.feed.title.and_then(|t| cell_text(&t.text)),
            entries,
        }
    }
}

/// Keeps only `gsx$` properties, without the prefix, unwrapping `$t`.
fn strip_namespace(entry: serde_json::Map<String, Value>) -> RawFeedEntry {
    entry
        .into_iter()
        .filter_map(|(key, value)| {
            let column = key.strip_prefix(COLUMN_PREFIX)?.to_string();
            let text = value.get("$t").and_then(cell_text).unwrap_or_default();
            Some((column, text))
        })
        .collect()
}

/// Renders a `$t` value as cell text; non-scalar values are dropped.
fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
