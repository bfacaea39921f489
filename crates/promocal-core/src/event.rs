//! Event types.
//!
//! - [`EventDraft`]: the timezone-naive event assembled from source text
//! - [`CalendarEvent`]: the same event with labeled timestamps, ready to submit

use chrono::FixedOffset;
use serde::Serialize;

use crate::time::{DateTimeRange, LabeledTime};

/// An event assembled from source text, before timezone labeling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    /// Event title.
    pub title: String,
    /// Event description.
    pub description: String,
    /// Naive start/end.
    pub range: DateTimeRange,
    /// The first link found in the text, used as the event location.
    pub location: Option<String>,
}

impl EventDraft {
    /// Creates a new draft.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        range: DateTimeRange,
        location: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            range,
            location,
        }
    }

    /// Labels the draft's wall-clock times with `offset` and `time_zone`.
    ///
    /// See [`LabeledTime::from_wall_clock`].
    pub fn label(&self, offset: FixedOffset, time_zone: &str) -> CalendarEvent {
        CalendarEvent {
            title: self.title.clone(),
            description: self.description.clone(),
            start: LabeledTime::from_wall_clock(self.range.start, offset, time_zone),
            end: LabeledTime::from_wall_clock(self.range.end, offset, time_zone),
            location: self.location.clone(),
        }
    }
}

/// An event with labeled start and end times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    /// Event title.
    pub title: String,
    /// Event description.
    pub description: String,
    /// Labeled start.
    pub start: LabeledTime,
    /// Labeled end.
    pub end: LabeledTime,
    /// Event location, if a link was found.
    pub location: Option<String>,
}
