//! Time types for extracted events.
//!
//! This module provides [`DateTimeRange`] for the naive start/end pair the
//! extractor produces, and [`LabeledTime`] for the offset-carrying, named
//! timestamps sent to the calendar service.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Offset, SecondsFormat, TimeDelta};
use serde::{Serialize, Serializer};

/// The timezone name attached to every submitted timestamp by default.
pub const DEFAULT_TIME_ZONE: &str = "Asia/Kolkata";

/// Which resolution branch produced a [`DateTimeRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSource {
    /// Exactly two times of day were found.
    TimePair,
    /// At least one day/month date was found.
    Date,
    /// Nothing usable was found; a one-hour slot at midnight.
    Default,
}

/// A pair of timezone-naive local timestamps.
///
/// `start <= end` is not enforced: two times found in descending order
/// produce a range that ends before it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeRange {
    /// Start of the range.
    pub start: NaiveDateTime,
    /// End of the range.
    pub end: NaiveDateTime,
    /// How the range was resolved.
    pub source: RangeSource,
}

impl DateTimeRange {
    /// Creates a new range.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, source: RangeSource) -> Self {
        Self { start, end, source }
    }

    /// Returns the signed length of the range.
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Returns true if the range ends before it starts.
    pub fn is_inverted(&self) -> bool {
        self.end < self.start
    }
}

/// A wall-clock timestamp with an attached offset and a timezone name.
///
/// The name is a label only. It is not required to agree with the offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabeledTime {
    /// The timestamp, carrying the offset it was labeled with.
    #[serde(serialize_with = "serialize_rfc3339")]
    pub date_time: DateTime<FixedOffset>,
    /// IANA timezone name sent alongside the timestamp.
    pub time_zone: String,
}

impl LabeledTime {
    /// Attaches `offset` to a naive wall-clock value and labels it `time_zone`.
    ///
    /// The wall-clock fields are kept unchanged; no instant conversion is
    /// performed between the offset and the label.
    pub fn from_wall_clock(
        naive: NaiveDateTime,
        offset: FixedOffset,
        time_zone: impl Into<String>,
    ) -> Self {
        let utc = naive - TimeDelta::seconds(i64::from(offset.local_minus_utc()));
        Self {
            date_time: DateTime::from_naive_utc_and_offset(utc, offset),
            time_zone: time_zone.into(),
        }
    }

    /// Formats the timestamp as RFC 3339 with seconds precision and a
    /// numeric offset, e.g. `2026-10-16T00:00:00+05:30`.
    pub fn to_rfc3339(&self) -> String {
        self.date_time.to_rfc3339_opts(SecondsFormat::Secs, false)
    }
}

fn serialize_rfc3339<S: Serializer>(
    dt: &DateTime<FixedOffset>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Secs, false))
}

/// Returns the machine's UTC offset as of now.
///
/// This is the current offset, not the one in force on any particular
/// event date.
pub fn current_local_offset() -> FixedOffset {
    Local::now().offset().fix()
}
