//! FeedSource trait definition.
//!
//! This module defines [`FeedSource`], the seam between the pipeline and
//! whatever retrieves list feeds. The pipeline hands a source the feed URL
//! built from a [`SpreadsheetLocator`] and gets back a decoded
//! [`FeedDocument`].
//!
//! Sources are responsible for:
//! - transport (HTTP, local files, fixtures)
//! - timeouts and any retry policy
//! - mapping transport failures to [`SourceError`]

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use sheetline_core::SpreadsheetLocator;
use url::Url;

use crate::error::{SourceError, SourceErrorCode, SourceResult};
use crate::raw_entry::FeedDocument;

/// A boxed future for async trait methods.
///
/// Using boxed futures keeps the trait object-safe, so callers can hold a
/// `&dyn FeedSource`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Retrieves list feeds.
///
/// # Example Implementation
///
/// ```ignore
/// struct FileSource { dir: PathBuf }
///
/// impl FeedSource for FileSource {
///     fn name(&self) -> &str { "file" }
///
///     fn feed_url(&self, locator: &SpreadsheetLocator) -> Url { ... }
///
///     fn fetch_feed<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, SourceResult<FeedDocument>> {
///         Box::pin(async move {
///             let json = std::fs::read_to_string(self.dir.join(url.path()))?;
///             FeedDocument::from_json(&json)
///         })
///     }
/// }
/// ```
pub trait FeedSource: Send + Sync {
    /// Returns the name of this source (e.g. "google", "static").
    fn name(&self) -> &str;

    /// Returns the feed URL for a spreadsheet.
    ///
    /// The default uses the public Google Sheets list feed.
    fn feed_url(&self, locator: &SpreadsheetLocator) -> Url {
        locator.default_feed_url()
    }

    /// Retrieves and decodes the feed at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on transport failures or when the response
    /// is not a list feed document.
    fn fetch_feed<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, SourceResult<FeedDocument>>;
}

/// A source serving feeds from memory, keyed by feed URL.
///
/// Useful for tests and for converting saved feeds offline.
#[derive(Debug, Default)]
pub struct StaticSource {
    feeds: HashMap<String, FeedDocument>,
}

impl StaticSource {
    /// Creates an empty static source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to register the feed of a spreadsheet key.
    pub fn with_feed(mut self, key: impl Into<String>, feed: FeedDocument) -> Self {
        let url = self.feed_url(&SpreadsheetLocator::new(key));
        self.feeds.insert(url.into(), feed);
        self
    }
}

impl FeedSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch_feed<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, SourceResult<FeedDocument>> {
        let result = self.feeds.get(url.as_str()).cloned().ok_or_else(|| {
            SourceError::not_found(format!("no feed registered for {}", url)).with_source_name("static")
        });
        Box::pin(async move { result })
    }
}

/// A source that always fails with the same error.
///
/// Stands in when the real source could not be constructed.
#[derive(Debug)]
pub struct ErrorSource {
    name: String,
    code: SourceErrorCode,
    message: String,
}

impl ErrorSource {
    /// Creates a new error source.
    pub fn new(name: impl Into<String>, error: &SourceError) -> Self {
        Self {
            name: name.into(),
            code: error.code(),
            message: error.message().to_string(),
        }
    }
}

impl FeedSource for ErrorSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_feed<'a>(&'a self, _url: &'a Url) -> BoxFuture<'a, SourceResult<FeedDocument>> {
        let error = SourceError::new(self.code, &self.message).with_source_name(&self.name);
        Box::pin(async move { Err(error) })
    }
}
