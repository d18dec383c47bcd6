//! Spreadsheet locator parsing.
//!
//! This module turns whatever the user pasted (a share URL, an old-style
//! `key=` URL, or a bare spreadsheet key) into a [`SpreadsheetLocator`], and
//! builds the list-feed URL for it.
//!
//! Recognized forms, tried in order (first match wins):
//! 1. any URL carrying a `key=<id>` parameter
//! 2. `docs.google.com/spreadsheets/d/<id>/...`, optionally with `gid=<n>`
//! 3. a bare identifier that contains no `/`
//!
//! # Example
//!
//! ```
//! use sheetline_core::locator::SpreadsheetLocator;
//!
//! let locator = SpreadsheetLocator::parse("https://docs.google.com/spreadsheets/d/XYZ/edit?gid=7").unwrap();
//! assert_eq!(locator.key, "XYZ");
//! assert_eq!(locator.worksheet, 7);
//! ```

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// Default host serving the public list feeds.
pub const DEFAULT_FEED_BASE: &str = "https://spreadsheets.google.com";

/// Path marker for the modern sharing URL form.
const SPREADSHEET_PATH_MARKER: &str = "docs.google.com/spreadsheets/d/";

/// Regex for the old-fashioned `key=` query parameter.
static KEY_PARAM_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bkey=([-_A-Za-z0-9]+)&?").expect("Invalid key parameter regex")
});

/// Regex for the worksheet selector of the sharing URL form.
static GID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&#]gid=(\d+)").expect("Invalid gid regex"));

/// Identifies a spreadsheet-backed feed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpreadsheetLocator {
    /// The spreadsheet key (ID).
    pub key: String,
    /// The worksheet index; `0` is the first sheet.
    pub worksheet: u64,
}

impl SpreadsheetLocator {
    /// Creates a locator for the first worksheet of the given key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            worksheet: 0,
        }
    }

    /// Builder method to select a worksheet.
    pub fn with_worksheet(mut self, worksheet: u64) -> Self {
        self.worksheet = worksheet;
        self
    }

    /// Parses a URL or bare identifier into a locator.
    ///
    /// Returns `None` when the input matches none of the recognized forms,
    /// e.g. a URL that does not point at a spreadsheet.
    pub fn parse(input: &str) -> Option<Self> {
        let locator = if let Some(caps) = KEY_PARAM_REGEX.captures(input) {
            Self::new(&caps[1])
        } else if let Some(pos) = input.find(SPREADSHEET_PATH_MARKER) {
            let tail = &input[pos + SPREADSHEET_PATH_MARKER.len()..];
            let key = tail
                .split(['/', '?', '#'])
                .next()
                .unwrap_or_default();
            Self::new(key).with_worksheet(parse_gid(input))
        } else if !input.contains('/') {
            Self::new(input)
        } else {
            debug!(input, "input is not a spreadsheet locator");
            return None;
        };

        if locator.key.is_empty() {
            debug!(input, "spreadsheet locator has an empty key");
            return None;
        }

        Some(locator)
    }

    /// Builds the public list-feed URL for this spreadsheet.
    ///
    /// The feed always reads the first worksheet; worksheet addressing is not
    /// supported by the list feed endpoint we target.
    pub fn feed_url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["feeds", "list", self.key.as_str(), "1", "public", "values"]);
        }
        url.query_pairs_mut().clear().append_pair("alt", "json");
        url
    }

    /// Builds the list-feed URL against [`DEFAULT_FEED_BASE`].
    pub fn default_feed_url(&self) -> Url {
        let base = Url::parse(DEFAULT_FEED_BASE).expect("valid default feed base");
        self.feed_url(&base)
    }
}

impl fmt::Display for SpreadsheetLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.key, self.worksheet)
    }
}

/// Extracts the worksheet index from a `gid=` parameter, defaulting to 0.
fn parse_gid(input: &str) -> u64 {
    let Some(caps) = GID_REGEX.captures(input) else {
        return 0;
    };
    caps[1].parse().unwrap_or_else(|_| {
        debug!(gid = &caps[1], "worksheet id out of range, using first sheet");
        0
    })
}
