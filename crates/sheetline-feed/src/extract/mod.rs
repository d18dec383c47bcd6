//! Row extractors.
//!
//! Each extractor maps one [`RawFeedEntry`] to an [`ExtractedRow`]: the
//! normalized event plus the title/event classifier from its `type` column.
//!
//! - [`extract_v1`] is strict: a start date is mandatory and cells are used
//!   verbatim.
//! - [`extract_v3`] is lenient: cells are trimmed and a malformed end date is
//!   dropped with a warning instead of failing the row.
//!
//! [`ExtractedRow`]: sheetline_core::ExtractedRow

mod v1;
mod v3;

pub use v1::extract_v1;
pub use v3::extract_v3;

use sheetline_core::{Media, RowKind, Text};

use crate::raw_entry::RawFeedEntry;

/// Read access to the cells of one row.
///
/// Missing columns read as the empty string.
#[derive(Debug, Clone, Copy)]
struct Cells<'a> {
    entry: &'a RawFeedEntry,
    trim: bool,
}

impl<'a> Cells<'a> {
    fn verbatim(entry: &'a RawFeedEntry) -> Self {
        Self { entry, trim: false }
    }

    fn trimmed(entry: &'a RawFeedEntry) -> Self {
        Self { entry, trim: true }
    }

    fn get(&self, column: &str) -> &'a str {
        let value = self.entry.get(column).unwrap_or_default();
        if self.trim { value.trim() } else { value }
    }

    /// Returns the cell only when it is non-empty.
    fn non_empty(&self, column: &str) -> Option<&'a str> {
        Some(self.get(column)).filter(|v| !v.is_empty())
    }

    fn media(&self) -> Media {
        Media {
            caption: self.get("mediacaption").to_string(),
            credit: self.get("mediacredit").to_string(),
            url: self.get("media").to_string(),
            thumb: self.get("mediathumbnail").to_string(),
        }
    }

    fn text(&self) -> Text {
        Text {
            headline: self.get("headline").to_string(),
            text: self.get("text").to_string(),
        }
    }

    fn row_kind(&self) -> RowKind {
        RowKind::from_cell(self.non_empty("type"))
    }
}
