//! Extractor for `startdate` sheets.

use sheetline_core::{ExtractedRow, NormalizedDate, NormalizedEvent};

use super::Cells;
use crate::error::{ConfigError, ConfigResult};
use crate::raw_entry::RawFeedEntry;

/// Extracts a row of a `startdate` sheet.
///
/// Columns: `startdate` (required), `enddate`, `headline`, `text`, `media`,
/// `mediacredit`, `mediacaption`, `mediathumbnail`, `tag`, `type`.
/// Cells are taken as-is; date strings go through
/// [`parse_date`](sheetline_core::parse_date).
///
/// # Errors
///
/// - [`ConfigError::MissingStartDate`] when `startdate` is missing or blank
/// - [`ConfigError::Date`] when a date cell cannot be parsed
pub fn extract_v1(entry: &RawFeedEntry, row: usize) -> ConfigResult<ExtractedRow> {
    let cells = Cells::verbatim(entry);

    let start = cells
        .non_empty("startdate")
        .ok_or(ConfigError::MissingStartDate { row })?;
    let start_date =
        NormalizedDate::from_parsed_string(start).map_err(|source| ConfigError::Date { row, source })?;

    let mut event = NormalizedEvent::new(start_date)
        .with_media(cells.media())
        .with_text(cells.text());

    if let Some(end) = cells.non_empty("enddate") {
        let end_date = NormalizedDate::from_parsed_string(end)
            .map_err(|source| ConfigError::Date { row, source })?;
        event = event.with_end_date(end_date);
    }

    if let Some(tag) = cells.non_empty("tag") {
        event = event.with_group(tag);
    }

    Ok(ExtractedRow::new(cells.row_kind(), event))
}
