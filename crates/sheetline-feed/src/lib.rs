//! Spreadsheet feed retrieval and timeline configuration assembly.
//!
//! This crate turns a published spreadsheet into a
//! [`TimelineConfiguration`](sheetline_core::TimelineConfiguration):
//!
//! - [`FeedSource`] - The trait that retrieves list feeds
//! - [`FeedDocument`] - A decoded feed, one [`RawFeedEntry`] per row
//! - [`detect_schema`] - Picks the V1 or V3 column layout
//! - [`build_config`] - Extracts every row and assembles the configuration
//! - [`make_config`] - The callback-style entry point tying it together
//!
//! # Architecture
//!
//! ```text
//!   spreadsheet URL / key
//!            │
//!            ▼ SpreadsheetLocator::parse()
//!   ┌────────────────────┐
//!   │ SpreadsheetLocator │
//!   └─────────┬──────────┘
//!             │ FeedSource::feed_url()
//!             ▼
//!   ┌────────────────────┐    ┌───────────────┐
//!   │ GoogleSheetsSource │ or │ StaticSource  │
//!   └─────────┬──────────┘    └───────┬───────┘
//!             │      FeedSource       │
//!             └───────────┬───────────┘
//!                         ▼
//!                 ┌──────────────┐
//!                 │ FeedDocument │
//!                 └──────┬───────┘
//!                        ▼ detect_schema() + assemble()
//!             ┌───────────────────────┐
//!             │ TimelineConfiguration │
//!             └───────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use sheetline_feed::{StaticSource, make_config};
//!
//! let source = StaticSource::new().with_feed("KEY", feed);
//! make_config(&source, "KEY", |config| {
//!     println!("{:?}", config.title);
//! })
//! .await?;
//! ```

pub mod assemble;
pub mod error;
pub mod extract;
pub mod factory;
#[cfg(feature = "google")]
pub mod google;
pub mod raw_entry;
pub mod schema;
pub mod source;
#[cfg(test)]
mod test_support;

// Re-export main types at crate root
pub use assemble::{assemble, build_config};
pub use error::{ConfigError, ConfigResult, SourceError, SourceErrorCode, SourceResult};
pub use extract::{extract_v1, extract_v3};
#[allow(deprecated)]
pub use factory::from_google;
pub use factory::{config_from_locator, config_from_url, feed_json_to_config, make_config};
pub use raw_entry::{FeedDocument, RawFeedEntry};
pub use schema::{SchemaVersion, detect_schema};
pub use source::{BoxFuture, ErrorSource, FeedSource, StaticSource};
