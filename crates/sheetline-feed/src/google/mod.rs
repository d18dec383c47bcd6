//! Google Sheets feed source.
//!
//! This module provides [`GoogleSheetsSource`], which retrieves the public
//! JSON list feed of a spreadsheet that has been published to the web.
//! No authentication is involved: unpublished sheets answer with an access
//! error.
//!
//! # Example
//!
//! ```ignore
//! use sheetline_feed::google::{GoogleSheetsConfig, GoogleSheetsSource};
//! use sheetline_feed::make_config;
//!
//! let source = GoogleSheetsSource::new(GoogleSheetsConfig::default())?;
//! make_config(&source, "https://docs.google.com/spreadsheets/d/KEY/pubhtml", |config| {
//!     println!("{} events", config.events.len());
//! })
//! .await?;
//! ```

mod client;
mod config;

pub use client::GoogleSheetsSource;
pub use config::{DEFAULT_TIMEOUT, GoogleSheetsConfig};
