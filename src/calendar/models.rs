use super::time::parse_event_start;
use crate::error::{calendar_error, CalResult};
use chrono::NaiveDate;
use serde_json::Value;

/// Simplified calendar event representation
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default)]
pub struct CalendarEvent {
    pub title: String,
    pub start: String,
}

impl CalendarEvent {
    /// Extract an event from one entry of the response `data` array
    pub fn from_value(value: &Value) -> CalResult<Self> {
        let title = value
            .get("title")
            .and_then(|t| t.as_str())
            .ok_or_else(|| calendar_error("Event entry has no title"))?
            .to_string();

        let start = value
            .get("start")
            .and_then(|s| s.as_str())
            .ok_or_else(|| calendar_error("Event entry has no start"))?
            .to_string();

        Ok(Self { title, start })
    }

    /// Calendar date the event starts on
    pub fn start_date(&self) -> CalResult<NaiveDate> {
        parse_event_start(&self.start)
            .map(|dt| dt.date())
            .ok_or_else(|| calendar_error(&format!("Unparsable event start: {}", self.start)))
    }
}

/// Case-insensitive substring allow-list applied to event titles.
/// An empty list matches everything.
#[derive(Debug, Clone, Default)]
pub struct TitleFilter {
    words: Vec<String>,
}

impl TitleFilter {
    /// Build a filter from lowercase substrings
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Whether a title passes the filter
    pub fn matches(&self, title: &str) -> bool {
        if self.words.is_empty() {
            return true;
        }

        let title = title.to_lowercase();
        self.words.iter().any(|word| title.contains(word.as_str()))
    }
}
