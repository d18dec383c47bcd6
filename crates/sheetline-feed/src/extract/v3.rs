//! Extractor for `year`/`month`/`day` sheets.

use std::sync::LazyLock;

use regex::Regex;
use sheetline_core::{
    Background, DateComponents, ExtractedRow, NormalizedDate, NormalizedEvent, parse_time,
};
use tracing::warn;

use super::Cells;
use crate::error::{ConfigError, ConfigResult};
use crate::raw_entry::RawFeedEntry;

/// Matches http, https, protocol-relative and site-relative URLs.
static BACKGROUND_URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(https?:)?//?").expect("Invalid background URL regex"));

/// Extracts a row of a `year`/`month`/`day` sheet.
///
/// Every cell is trimmed. Columns: `year`, `month`, `day`, `time`,
/// `endyear`, `endmonth`, `endday`, `endtime`, `displaydate`, `headline`,
/// `text`, `media`, `mediacredit`, `mediacaption`, `mediathumbnail`,
/// `group`, `background`, `type`.
///
/// An end date without an `endyear` is dropped; if other end cells were
/// filled in, a warning is logged and the row is kept. `endtime` is not
/// parsed in that case, so an invalid `endtime` there is not an error.
///
/// # Errors
///
/// Returns [`ConfigError::Date`] when a `time` or `endtime` cell cannot be
/// parsed.
pub fn extract_v3(entry: &RawFeedEntry, row: usize) -> ConfigResult<ExtractedRow> {
    let cells = Cells::trimmed(entry);
    let text = cells.text();

    let mut start = DateComponents::new(cells.get("year"), cells.get("month"), cells.get("day"));
    if let Some(time) = cells.non_empty("time") {
        start.merge_time(parse_time(time).map_err(|source| ConfigError::Date { row, source })?);
    }
    if !start.has_year() {
        warn!(row, headline = %text.headline, "spreadsheet row has no start year");
    }

    let mut event = NormalizedEvent::new(start)
        .with_media(cells.media())
        .with_text(text);

    if let Some(end_date) = end_date(&cells, row, &event.text.headline)? {
        event = event.with_end_date(end_date);
    }

    if let Some(display_date) = cells.non_empty("displaydate") {
        event = event.with_display_date(display_date);
    }

    if let Some(group) = cells.non_empty("group") {
        event = event.with_group(group);
    }

    if let Some(background) = cells.non_empty("background") {
        event = event.with_background(classify_background(background));
    }

    Ok(ExtractedRow::new(cells.row_kind(), event))
}

/// Builds the end date, or `None` when `endyear` is blank.
fn end_date(cells: &Cells<'_>, row: usize, headline: &str) -> ConfigResult<Option<NormalizedDate>> {
    let year = cells.get("endyear");
    let month = cells.get("endmonth");
    let day = cells.get("endday");
    let time = cells.get("endtime");

    if year.is_empty() {
        if !(month.is_empty() && day.is_empty() && time.is_empty()) {
            warn!(
                row,
                headline,
                endmonth = month,
                endday = day,
                endtime = time,
                "invalid end date for spreadsheet row: must have a year if any other date fields are specified"
            );
        }
        return Ok(None);
    }

    let mut end = DateComponents::new(year, month, day);
    if !time.is_empty() {
        end.merge_time(parse_time(time).map_err(|source| ConfigError::Date { row, source })?);
    }
    Ok(Some(end.into()))
}

/// Treats URL-like values as image URLs and anything else as a color.
fn classify_background(value: &str) -> Background {
    if BACKGROUND_URL_REGEX.is_match(value) {
        Background::Url(value.to_string())
    } else {
        Background::Color(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture_logs;
    use sheetline_core::{DateError, RowKind};

    fn components(date: &NormalizedDate) -> &DateComponents {
        match date {
            NormalizedDate::Components(c) => c,
            NormalizedDate::Parsed(p) => panic!("expected components, got {:?}", p),
        }
    }

    mod dates {
        use super::*;

        #[test]
        fn warns_about_end_fields_without_year() {
            let entry = RawFeedEntry::new()
                .with("year", "1969")
                .with("endyear", "")
                .with("endmonth", "3");
            let (row, logs) = capture_logs(|| extract_v3(&entry, 4));
            assert!(row.unwrap().event.end_date.is_none());
            assert!(logs.contains("WARN"));
            assert!(logs.contains("must have a year if any other date fields are specified"));
            assert!(logs.contains("row=4"));
        }

        #[test]
        fn blank_end_fields_are_silent() {
            let entry = RawFeedEntry::new()
                .with("year", "1969")
                .with("endyear", " ")
                .with("endmonth", "")
                .with("endday", "");
            let (row, logs) = capture_logs(|| extract_v3(&entry, 0));
            assert!(row.unwrap().event.end_date.is_none());
            assert!(!logs.contains("invalid end date"));
        }

        #[test]
        fn endtime_without_year_is_not_parsed() {
            let entry = RawFeedEntry::new()
                .with("year", "1969")
                .with("endtime", "not a time");
            let (row, logs) = capture_logs(|| extract_v3(&entry, 0));
            assert!(row.unwrap().event.end_date.is_none());
            assert!(logs.contains("invalid end date"));
        }

        #[test]
        fn builds_start_from_columns() {
            let entry = RawFeedEntry::new()
                .with("year", "1969")
                .with("month", "7")
                .with("day", "20");
            let row = extract_v3(&entry, 0).unwrap();
            assert_eq!(
                components(&row.event.start_date),
                &DateComponents::new("1969", "7", "20")
            );
            assert!(row.event.end_date.is_none());
        }

        #[test]
        fn trims_date_cells() {
            let entry = RawFeedEntry::new().with("year", " 1969 ").with("month", "\t7");
            let row = extract_v3(&entry, 0).unwrap();
            let start = components(&row.event.start_date);
            assert_eq!(start.year, "1969");
            assert_eq!(start.month, "7");
            assert_eq!(start.day, "");
        }

        #[test]
        fn merges_start_time() {
            let entry = RawFeedEntry::new()
                .with("year", "1969")
                .with("time", "20:17:40");
            let row = extract_v3(&entry, 0).unwrap();
            let start = components(&row.event.start_date);
            assert_eq!(start.hour, Some(20));
            assert_eq!(start.minute, Some(17));
            assert_eq!(start.second, Some(40));
        }

        #[test]
        fn keeps_end_date_with_year() {
            let entry = RawFeedEntry::new()
                .with("year", "1939")
                .with("endyear", "1945")
                .with("endmonth", "9")
                .with("endday", "2")
                .with("endtime", "9:00 am");
            let row = extract_v3(&entry, 0).unwrap();
            let end = components(row.event.end_date.as_ref().unwrap());
            assert_eq!(end.year, "1945");
            assert_eq!(end.month, "9");
            assert_eq!(end.day, "2");
            assert_eq!(end.hour, Some(9));
        }

        #[test]
        fn drops_end_date_without_year() {
            let entry = RawFeedEntry::new()
                .with("year", "2020")
                .with("endyear", "")
                .with("endmonth", "3");
            let row = extract_v3(&entry, 0).unwrap();
            assert!(row.event.end_date.is_none());
        }

        #[test]
        fn drops_end_date_without_year_even_with_bad_time() {
            let entry = RawFeedEntry::new()
                .with("year", "2020")
                .with("endtime", "whenever");
            let row = extract_v3(&entry, 0).unwrap();
            assert!(row.event.end_date.is_none());
        }

        #[test]
        fn missing_start_year_is_tolerated() {
            let entry = RawFeedEntry::new().with("year", "").with("headline", "Undated");
            let row = extract_v3(&entry, 0).unwrap();
            assert!(!components(&row.event.start_date).has_year());
        }

        #[test]
        fn invalid_time_fails_row() {
            let entry = RawFeedEntry::new().with("year", "2020").with("time", "teatime");
            match extract_v3(&entry, 5) {
                Err(ConfigError::Date { row, source }) => {
                    assert_eq!(row, 5);
                    assert!(matches!(source, DateError::InvalidTime { .. }));
                }
                other => panic!("expected date error, got {:?}", other),
            }
        }
    }

    mod fields {
        use super::*;

        #[test]
        fn trims_text_cells() {
            let entry = RawFeedEntry::new()
                .with("year", "2020")
                .with("headline", "  Headline  ")
                .with("text", "\nbody\n");
            let row = extract_v3(&entry, 0).unwrap();
            assert_eq!(row.event.text.headline, "Headline");
            assert_eq!(row.event.text.text, "body");
        }

        #[test]
        fn passes_display_date_and_group() {
            let entry = RawFeedEntry::new()
                .with("year", "1500")
                .with("displaydate", "circa 1500")
                .with("group", "Renaissance");
            let row = extract_v3(&entry, 0).unwrap();
            assert_eq!(row.event.display_date, Some("circa 1500".to_string()));
            assert_eq!(row.event.group, Some("Renaissance".to_string()));
        }

        #[test]
        fn blank_optionals_are_absent() {
            let entry = RawFeedEntry::new()
                .with("year", "1500")
                .with("displaydate", "  ")
                .with("group", "")
                .with("background", " ");
            let row = extract_v3(&entry, 0).unwrap();
            assert!(row.event.display_date.is_none());
            assert!(row.event.group.is_none());
            assert!(row.event.background.is_none());
        }

        #[test]
        fn reads_row_kind() {
            let entry = RawFeedEntry::new().with("year", "2020").with("type", " title ");
            assert_eq!(extract_v3(&entry, 0).unwrap().kind, RowKind::Title);
        }
    }

    mod background {
        use super::*;

        #[test]
        fn classifies_urls() {
            for value in [
                "http://example.com/bg.jpg",
                "https://example.com/bg.jpg",
                "//cdn.example.com/bg.jpg",
                "/static/bg.jpg",
            ] {
                assert_eq!(
                    classify_background(value),
                    Background::Url(value.to_string()),
                    "{value}"
                );
            }
        }

        #[test]
        fn classifies_colors() {
            for value in ["#ff0000", "red", "rgb(0, 0, 0)", "ftp://example.com/x"] {
                assert_eq!(
                    classify_background(value),
                    Background::Color(value.to_string()),
                    "{value}"
                );
            }
        }

        #[test]
        fn row_background_is_trimmed_before_classifying() {
            let entry = RawFeedEntry::new()
                .with("year", "2020")
                .with("background", "  //img.example.com/a.png ");
            let row = extract_v3(&entry, 0).unwrap();
            assert_eq!(
                row.event.background,
                Some(Background::Url("//img.example.com/a.png".to_string()))
            );
        }
    }
}
