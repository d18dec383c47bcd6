//! Date types and parsing for timeline rows.
//!
//! Spreadsheet rows carry dates in two shapes:
//! - a single free-form date string (older sheets), parsed into [`DateParts`]
//! - discrete year/month/day columns plus an optional time string, kept as
//!   [`DateComponents`]
//!
//! Both are wrapped in [`NormalizedDate`] so consumers never need to know
//! which sheet layout produced a row.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while parsing date or time strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// The date string is not in a supported notation or names an impossible day.
    #[error("invalid date: {input:?}")]
    InvalidDate { input: String },

    /// The time string is not in a supported notation or is out of range.
    #[error("invalid time: {input:?}")]
    InvalidTime { input: String },
}

impl DateError {
    fn date(input: &str) -> Self {
        Self::InvalidDate {
            input: input.to_string(),
        }
    }

    fn time(input: &str) -> Self {
        Self::InvalidTime {
            input: input.to_string(),
        }
    }
}

static YEAR_ONLY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d{1,6}$").expect("Invalid year regex"));

static YEAR_MONTH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-?\d{1,6})-(\d{1,2})$").expect("Invalid year-month regex"));

/// `YYYY,MM,DD[,HH,MM,SS[,mmm]]`
static COMMA_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?\d{1,6}(\s*,\s*\d{1,3}){0,6}$").expect("Invalid comma date regex")
});

static TIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d{1,2})(?::(\d{2}))?(?::(\d{2}))?(?:\.(\d{1,3}))?\s*(?:([ap])\.?(?:m\.?)?)?$")
        .expect("Invalid time regex")
});

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// A date parsed from a single date string.
///
/// Only `year` is guaranteed; finer fields are present when the source
/// string specified them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateParts {
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minute: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub millisecond: Option<u32>,
}

impl DateParts {
    /// Creates a year-only date.
    pub fn year(year: i32) -> Self {
        Self {
            year,
            ..Default::default()
        }
    }

    /// Creates a calendar date.
    pub fn ymd(year: i32, month: u32, day: u32) -> Self {
        Self {
            year,
            month: Some(month),
            day: Some(day),
            ..Default::default()
        }
    }

    fn from_naive_datetime(dt: NaiveDateTime) -> Self {
        // Leap seconds are reported as nanosecond >= 1_000_000_000.
        let millis = (dt.nanosecond() % 1_000_000_000) / 1_000_000;
        Self {
            year: dt.year(),
            month: Some(dt.month()),
            day: Some(dt.day()),
            hour: Some(dt.hour()),
            minute: Some(dt.minute()),
            second: Some(dt.second()),
            millisecond: (millis != 0).then_some(millis),
        }
    }

    fn from_naive_date(date: NaiveDate) -> Self {
        Self::ymd(date.year(), date.month(), date.day())
    }
}

/// Time-of-day fields parsed from a time string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeParts {
    pub hour: u32,
    pub minute: Option<u32>,
    pub second: Option<u32>,
    pub millisecond: Option<u32>,
}

/// A date assembled from discrete spreadsheet columns.
///
/// Year, month and day are kept as the (trimmed) cell text; an empty string
/// means the column was blank or missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateComponents {
    pub year: String,
    pub month: String,
    pub day: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minute: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub millisecond: Option<u32>,
}

impl DateComponents {
    /// Creates components from year, month and day cell values.
    pub fn new(year: impl Into<String>, month: impl Into<String>, day: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            month: month.into(),
            day: day.into(),
            ..Default::default()
        }
    }

    /// Merges time-of-day fields into this date.
    pub fn merge_time(&mut self, time: TimeParts) {
        self.hour = Some(time.hour);
        self.minute = time.minute;
        self.second = time.second;
        self.millisecond = time.millisecond;
    }

    /// Builder form of [`merge_time`](Self::merge_time).
    #[must_use]
    pub fn with_time(mut self, time: TimeParts) -> Self {
        self.merge_time(time);
        self
    }

    /// Returns true if the year column was blank.
    pub fn has_year(&self) -> bool {
        !self.year.is_empty()
    }
}

/// A start or end date of a timeline event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NormalizedDate {
    /// Parsed from a single date string.
    Parsed(DateParts),
    /// Built from discrete year/month/day columns.
    Components(DateComponents),
}

impl NormalizedDate {
    /// Parses a single date string.
    pub fn from_parsed_string(input: &str) -> Result<Self, DateError> {
        parse_date(input).map(Self::Parsed)
    }

    /// Wraps discrete date components.
    pub fn from_components(components: DateComponents) -> Self {
        Self::Components(components)
    }
}

impl From<DateParts> for NormalizedDate {
    fn from(parts: DateParts) -> Self {
        Self::Parsed(parts)
    }
}

impl From<DateComponents> for NormalizedDate {
    fn from(components: DateComponents) -> Self {
        Self::Components(components)
    }
}

/// Parses a date string as typed into a spreadsheet cell.
///
/// Supported notations:
/// - `2020`, `-500` (year only)
/// - `2020-03`
/// - `2020-03-14`, `03/14/2020`
/// - `2020-03-14T15:09`, `2020-03-14 15:09:26.535`, `03/14/2020 15:09`
/// - RFC 3339 (`2020-03-14T15:09:26Z`, `...+02:00`); the offset is dropped
///   and the local wall-clock fields are kept
/// - `2020,3,14` up to `2020,3,14,15,9,26,535`
///
/// # Errors
///
/// Returns [`DateError::InvalidDate`] for anything else, or when the fields
/// do not name a real calendar day.
pub fn parse_date(input: &str) -> Result<DateParts, DateError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(DateError::date(input));
    }

    if YEAR_ONLY_REGEX.is_match(s) {
        let year = s.parse().map_err(|_| DateError::date(input))?;
        return Ok(DateParts::year(year));
    }

    if let Some(caps) = YEAR_MONTH_REGEX.captures(s) {
        let year = caps[1].parse().map_err(|_| DateError::date(input))?;
        let month: u32 = caps[2].parse().map_err(|_| DateError::date(input))?;
        if !(1..=12).contains(&month) {
            return Err(DateError::date(input));
        }
        return Ok(DateParts {
            year,
            month: Some(month),
            ..Default::default()
        });
    }

    if COMMA_REGEX.is_match(s) {
        return parse_comma_date(s).ok_or_else(|| DateError::date(input));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(DateParts::from_naive_datetime(dt.naive_local()));
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(DateParts::from_naive_datetime(dt));
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Ok(DateParts::from_naive_date(date));
        }
    }

    Err(DateError::date(input))
}

/// Parses `YYYY,MM,DD,...`; returns `None` when a field is out of range.
fn parse_comma_date(s: &str) -> Option<DateParts> {
    let mut fields = s.split(',').map(str::trim);
    let year: i32 = fields.next()?.parse().ok()?;
    let rest: Vec<u32> = fields.map(|f| f.parse().ok()).collect::<Option<_>>()?;

    let mut parts = DateParts::year(year);
    let mut rest = rest.into_iter();
    parts.month = rest.next();
    parts.day = rest.next();
    parts.hour = rest.next();
    parts.minute = rest.next();
    parts.second = rest.next();
    parts.millisecond = rest.next();

    if let Some(month) = parts.month {
        if !(1..=12).contains(&month) {
            return None;
        }
    }
    if let (Some(month), Some(day)) = (parts.month, parts.day) {
        NaiveDate::from_ymd_opt(year, month, day)?;
    }
    if parts.hour.is_some_and(|h| h > 23)
        || parts.minute.is_some_and(|m| m > 59)
        || parts.second.is_some_and(|s| s > 59)
    {
        return None;
    }

    Some(parts)
}

/// Parses a time-of-day string.
///
/// Accepts `H`, `H:MM`, `H:MM:SS` and `H:MM:SS.mmm`, each optionally
/// followed by `am`/`pm` (also `a`, `p`, `a.m.`, `p.m.`).
///
/// # Errors
///
/// Returns [`DateError::InvalidTime`] for unsupported notations and
/// out-of-range fields.
pub fn parse_time(input: &str) -> Result<TimeParts, DateError> {
    let s = input.trim();
    let caps = TIME_REGEX
        .captures(s)
        .ok_or_else(|| DateError::time(input))?;

    let mut hour: u32 = caps[1].parse().map_err(|_| DateError::time(input))?;
    let minute = caps
        .get(2)
        .map(|m| m.as_str().parse::<u32>())
        .transpose()
        .map_err(|_| DateError::time(input))?;
    let second = caps
        .get(3)
        .map(|m| m.as_str().parse::<u32>())
        .transpose()
        .map_err(|_| DateError::time(input))?;
    // ".5" means 500 ms
    let millisecond = caps
        .get(4)
        .map(|m| format!("{:0<3}", m.as_str()).parse::<u32>())
        .transpose()
        .map_err(|_| DateError::time(input))?;

    match caps.get(5).map(|m| m.as_str().to_ascii_lowercase()) {
        Some(meridiem) => {
            if !(1..=12).contains(&hour) {
                return Err(DateError::time(input));
            }
            hour %= 12;
            if meridiem == "p" {
                hour += 12;
            }
        }
        None if hour > 23 => return Err(DateError::time(input)),
        None => {}
    }

    if minute.is_some_and(|m| m > 59) || second.is_some_and(|s| s > 59) {
        return Err(DateError::time(input));
    }

    Ok(TimeParts {
        hour,
        minute,
        second,
        millisecond,
    })
}
