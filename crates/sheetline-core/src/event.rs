//! Timeline event types.
//!
//! This module provides the output model handed to the timeline renderer:
//! - [`NormalizedEvent`]: one slide of the timeline (an event or the title)
//! - [`RowKind`] / [`ExtractedRow`]: the transient title/event classifier
//! - [`TimelineConfiguration`]: the assembled document

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::date::NormalizedDate;

/// Media attached to an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub caption: String,
    pub credit: String,
    pub url: String,
    pub thumb: String,
}

/// Headline and body text of an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    pub headline: String,
    pub text: String,
}

/// Slide background: an image URL or a CSS color, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    Url(String),
    Color(String),
}

impl Background {
    /// Returns true if this background is an image URL.
    pub fn is_url(&self) -> bool {
        matches!(self, Self::Url(_))
    }
}

/// The kind of spreadsheet row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    /// The timeline title slide.
    Title,
    /// A regular event.
    #[default]
    Event,
}

impl RowKind {
    /// Classifies the value of a `type` column.
    ///
    /// Only the exact value `title` marks a title row; anything else,
    /// including a blank cell, is an event.
    pub fn from_cell(value: Option<&str>) -> Self {
        match value {
            Some("title") => Self::Title,
            _ => Self::Event,
        }
    }

    /// Returns the column value for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Event => "event",
        }
    }
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A timeline event in its canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedEvent {
    pub media: Media,
    pub text: Text,
    pub start_date: NormalizedDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NormalizedDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,
}

impl NormalizedEvent {
    /// Creates an event with empty media and text.
    pub fn new(start_date: impl Into<NormalizedDate>) -> Self {
        Self {
            media: Media::default(),
            text: Text::default(),
            start_date: start_date.into(),
            end_date: None,
            display_date: None,
            group: None,
            background: None,
        }
    }

    /// Builder method to set the media.
    pub fn with_media(mut self, media: Media) -> Self {
        self.media = media;
        self
    }

    /// Builder method to set the text.
    pub fn with_text(mut self, text: Text) -> Self {
        self.text = text;
        self
    }

    /// Builder method to set the headline.
    pub fn with_headline(mut self, headline: impl Into<String>) -> Self {
        self.text.headline = headline.into();
        self
    }

    /// Builder method to set the end date.
    pub fn with_end_date(mut self, end_date: impl Into<NormalizedDate>) -> Self {
        self.end_date = Some(end_date.into());
        self
    }

    /// Builder method to set the display date.
    pub fn with_display_date(mut self, display_date: impl Into<String>) -> Self {
        self.display_date = Some(display_date.into());
        self
    }

    /// Builder method to set the group.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Builder method to set the background.
    pub fn with_background(mut self, background: Background) -> Self {
        self.background = Some(background);
        self
    }
}

/// An event together with the row kind read from its source row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRow {
    pub kind: RowKind,
    pub event: NormalizedEvent,
}

impl ExtractedRow {
    pub fn new(kind: RowKind, event: NormalizedEvent) -> Self {
        Self { kind, event }
    }

    /// Splits the row into its kind and the event without it.
    pub fn into_parts(self) -> (RowKind, NormalizedEvent) {
        (self.kind, self.event)
    }
}

/// The configuration document consumed by the timeline renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<NormalizedEvent>,
    pub events: Vec<NormalizedEvent>,
}

impl TimelineConfiguration {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an extracted row: title rows replace the title, others are appended.
    ///
    /// Returns the previous title when a title row replaced one.
    pub fn push_row(&mut self, row: ExtractedRow) -> Option<NormalizedEvent> {
        match row.into_parts() {
            (RowKind::Title, event) => self.title.replace(event),
            (RowKind::Event, event) => {
                self.events.push(event);
                None
            }
        }
    }

    /// Returns true if there is neither a title nor any event.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::{DateComponents, DateParts};

    fn sample_event(headline: &str) -> NormalizedEvent {
        NormalizedEvent::new(DateParts::year(2020)).with_headline(headline)
    }

    #[test]
    fn row_kind_from_cell() {
        assert_eq!(RowKind::from_cell(Some("title")), RowKind::Title);
        assert_eq!(RowKind::from_cell(Some("event")), RowKind::Event);
        assert_eq!(RowKind::from_cell(Some("")), RowKind::Event);
        assert_eq!(RowKind::from_cell(Some("Title")), RowKind::Event);
        assert_eq!(RowKind::from_cell(None), RowKind::Event);
    }

    #[test]
    fn new_event_has_empty_media_and_text() {
        let event = NormalizedEvent::new(DateParts::year(2020));
        assert_eq!(event.media, Media::default());
        assert_eq!(event.text, Text::default());
        assert!(event.end_date.is_none());
        assert!(event.group.is_none());
    }

    #[test]
    fn push_row_separates_title_and_events() {
        let mut config = TimelineConfiguration::new();
        assert!(config.is_empty());

        config.push_row(ExtractedRow::new(RowKind::Event, sample_event("a")));
        let previous = config.push_row(ExtractedRow::new(RowKind::Title, sample_event("t1")));
        assert!(previous.is_none());
        let previous = config.push_row(ExtractedRow::new(RowKind::Title, sample_event("t2")));
        assert_eq!(previous.unwrap().text.headline, "t1");

        assert_eq!(config.title.unwrap().text.headline, "t2");
        assert_eq!(config.events.len(), 1);
    }

    #[test]
    fn background_serializes_as_single_key() {
        let json = serde_json::to_value(Background::Url("//img.png".into())).unwrap();
        assert_eq!(json, serde_json::json!({"url": "//img.png"}));
        let json = serde_json::to_value(Background::Color("#fff".into())).unwrap();
        assert_eq!(json, serde_json::json!({"color": "#fff"}));
    }

    #[test]
    fn event_omits_absent_optionals() {
        let event = NormalizedEvent::new(DateComponents::new("1999", "", "")).with_group("war");
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("end_date").is_none());
        assert!(json.get("background").is_none());
        assert_eq!(json["group"], "war");
        assert_eq!(json["start_date"]["year"], "1999");
    }

    #[test]
    fn serializes_full_event_shape() {
        let event = NormalizedEvent::new(DateParts {
            hour: Some(9),
            minute: Some(30),
            ..DateParts::ymd(1969, 7, 16)
        })
        .with_media(Media {
            caption: "Liftoff".into(),
            credit: "NASA".into(),
            url: "https://example.com/a11.jpg".into(),
            thumb: String::new(),
        })
        .with_text(Text {
            headline: "Apollo 11".into(),
            text: "Saturn V launch".into(),
        })
        .with_end_date(DateParts::ymd(1969, 7, 24))
        .with_display_date("July 1969")
        .with_group("Apollo")
        .with_background(Background::Color("#000".into()));

        insta::assert_json_snapshot!(event, @r###"
        {
          "media": {
            "caption": "Liftoff",
            "credit": "NASA",
            "url": "https://example.com/a11.jpg",
            "thumb": ""
          },
          "text": {
            "headline": "Apollo 11",
            "text": "Saturn V launch"
          },
          "start_date": {
            "year": 1969,
            "month": 7,
            "day": 16,
            "hour": 9,
            "minute": 30
          },
          "end_date": {
            "year": 1969,
            "month": 7,
            "day": 24
          },
          "display_date": "July 1969",
          "group": "Apollo",
          "background": {
            "color": "#000"
          }
        }
        "###);
    }
}
