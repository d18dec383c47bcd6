//! Core types: spreadsheet locators, dates, timeline events

pub mod date;
pub mod event;
pub mod locator;
pub mod tracing;

pub use date::{
    DateComponents, DateError, DateParts, NormalizedDate, TimeParts, parse_date, parse_time,
};
pub use event::{
    Background, ExtractedRow, Media, NormalizedEvent, RowKind, Text, TimelineConfiguration,
};
pub use locator::{DEFAULT_FEED_BASE, SpreadsheetLocator};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
