//! Heuristic date/time range extraction from free text.
//!
//! The extractor recognizes three things:
//! - relative-day phrases ("yesterday", "tomorrow", "day after tomorrow")
//!   that shift the reference date
//! - clock times such as `1:30PM` or `14:00`
//! - day/month dates such as `16th Oct`
//!
//! and resolves them into a single [`DateTimeRange`]:
//!
//! 1. exactly two times: both on the reference date, in the order found
//! 2. otherwise, at least one date: the first date, lasting one day
//! 3. otherwise: midnight on the reference date, lasting one hour
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use promocal_core::datetime::DateTimeRangeExtractor;
//!
//! let now = NaiveDate::from_ymd_opt(2026, 10, 14)
//!     .unwrap()
//!     .and_hms_opt(9, 0, 0)
//!     .unwrap();
//! let range = DateTimeRangeExtractor::new()
//!     .extract_at("Submissions open 16th Oct", now)
//!     .unwrap();
//! assert_eq!(range.start.to_string(), "2026-10-16 00:00:00");
//! assert_eq!(range.end.to_string(), "2026-10-17 00:00:00");
//! ```

use std::cmp::Reverse;
use std::fmt;
use std::sync::LazyLock;

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use regex::{Captures, Regex};
use tracing::debug;

use crate::error::{ParseError, ParseResult};
use crate::time::{DateTimeRange, RangeSource};

/// Regex for clock-time candidates like `1:30PM` or `14:00`.
///
/// It also matches `1:30 pm`, which the parser then rejects.
static TIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[0-9]{1,2}:[0-9]{2} ?[APM]*").expect("Invalid time regex")
});

/// Regex for day/month candidates like `16th Oct` or `3 nov`.
static DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]{1,2})(?:st|nd|rd|th)? ([A-Za-z]{3})").expect("Invalid date regex")
});

/// Splits a trimmed time candidate into hour, minute and marker.
static CLOCK_PARTS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,2}):([0-9]{2})([A-Za-z]*)$").expect("Invalid clock regex")
});

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// A phrase that shifts the reference date by a fixed number of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeDayRule {
    /// Lowercase phrase, matched as a case-insensitive substring.
    pub phrase: &'static str,
    /// Days added to the reference date when the phrase is present.
    pub offset_days: i64,
}

impl RelativeDayRule {
    /// Creates a new rule.
    pub const fn new(phrase: &'static str, offset_days: i64) -> Self {
        Self {
            phrase,
            offset_days,
        }
    }
}

/// The built-in relative-day rules.
pub const RELATIVE_DAY_RULES: [RelativeDayRule; 3] = [
    RelativeDayRule::new("day after tomorrow", 2),
    RelativeDayRule::new("yesterday", -1),
    RelativeDayRule::new("tomorrow", 1),
];

/// An accepted clock-time format, tried in [`TimeFormat::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeFormat {
    /// `1:30PM`, `01:30am`: hour 1-12 with an AM/PM marker directly after the minutes.
    TwelveHour,
    /// `14:00`, `9:05`: hour 0-23 without a marker.
    TwentyFourHour,
}

impl TimeFormat {
    /// All formats, in the order they are tried.
    pub const ALL: [TimeFormat; 2] = [Self::TwelveHour, Self::TwentyFourHour];

    /// Returns the strftime-style pattern this format corresponds to.
    pub fn pattern(&self) -> &'static str {
        match self {
            Self::TwelveHour => "%I:%M%p",
            Self::TwentyFourHour => "%H:%M",
        }
    }

    fn accept(&self, hour: u32, minute: u32, marker: &str) -> Option<NaiveTime> {
        match self {
            Self::TwelveHour => {
                let pm = if marker.eq_ignore_ascii_case("pm") {
                    true
                } else if marker.eq_ignore_ascii_case("am") {
                    false
                } else {
                    return None;
                };
                if !(1..=12).contains(&hour) {
                    return None;
                }
                let hour = hour % 12 + if pm { 12 } else { 0 };
                NaiveTime::from_hms_opt(hour, minute, 0)
            }
            Self::TwentyFourHour => {
                if !marker.is_empty() {
                    return None;
                }
                NaiveTime::from_hms_opt(hour, minute, 0)
            }
        }
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern())
    }
}

/// Parses a clock-time substring, trying each [`TimeFormat`] in turn.
///
/// # Errors
///
/// Returns [`ParseError::UnrecognizedTime`] listing every tried format when
/// none accepts the input.
pub fn parse_time_of_day(input: &str) -> ParseResult<NaiveTime> {
    let trimmed = input.trim();
    let unrecognized = || ParseError::UnrecognizedTime {
        input: trimmed.to_string(),
        tried: TimeFormat::ALL.to_vec(),
    };

    let (hour, minute, marker) = split_clock(trimmed).ok_or_else(unrecognized)?;
    TimeFormat::ALL
        .iter()
        .find_map(|format| format.accept(hour, minute, marker))
        .ok_or_else(unrecognized)
}

fn split_clock(input: &str) -> Option<(u32, u32, &str)> {
    let caps = CLOCK_PARTS_REGEX.captures(input)?;
    let hour = caps.get(1)?.as_str().parse().ok()?;
    let minute = caps.get(2)?.as_str().parse().ok()?;
    let marker = caps.get(3).map_or("", |m| m.as_str());
    Some((hour, minute, marker))
}

/// Resolves a three-letter English month abbreviation (any case) to 1-12.
pub fn month_from_abbreviation(token: &str) -> Option<u32> {
    MONTH_ABBREVIATIONS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(token))
        .and_then(|i| u32::try_from(i + 1).ok())
}

/// Returns true if a day/month candidate is really the minutes of a clock
/// time followed by a word, e.g. the `00 the` in `10:00 then`.
fn is_clock_minutes(text: &str, caps: &Captures<'_>) -> bool {
    caps.get(0).is_some_and(|m| text[..m.start()].ends_with(':'))
}

fn parse_date(caps: &Captures<'_>, year: i32) -> ParseResult<NaiveDate> {
    let input = caps.get(0).map_or("", |m| m.as_str()).to_string();
    let month_token = caps.get(2).map_or("", |m| m.as_str());
    let month = month_from_abbreviation(month_token).ok_or_else(|| ParseError::UnknownMonth {
        input: input.clone(),
        month: month_token.to_string(),
    })?;
    // Two ASCII digits always fit.
    let day = caps
        .get(1)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(0);

    NaiveDate::from_ymd_opt(year, month, day).ok_or(ParseError::InvalidDate {
        input,
        year,
        month,
        day,
    })
}

/// Extracts a [`DateTimeRange`] from free text.
#[derive(Debug, Clone)]
pub struct DateTimeRangeExtractor {
    rules: Vec<RelativeDayRule>,
}

impl Default for DateTimeRangeExtractor {
    fn default() -> Self {
        Self::with_rules(RELATIVE_DAY_RULES.to_vec())
    }
}

impl DateTimeRangeExtractor {
    /// Creates an extractor with the built-in relative-day rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an extractor with custom relative-day rules.
    ///
    /// Rules are evaluated longest phrase first, so a phrase is never
    /// shadowed by a shorter phrase it contains. Rules of equal length keep
    /// the given order.
    pub fn with_rules(mut rules: Vec<RelativeDayRule>) -> Self {
        rules.sort_by_key(|rule| Reverse(rule.phrase.len()));
        Self { rules }
    }

    /// Returns the rules in evaluation order.
    pub fn rules(&self) -> &[RelativeDayRule] {
        &self.rules
    }

    /// Extracts a range using the current local time as the reference.
    pub fn extract(&self, text: &str) -> ParseResult<DateTimeRange> {
        self.extract_at(text, Local::now().naive_local())
    }

    /// Extracts a range relative to `now`.
    ///
    /// # Errors
    ///
    /// Fails on the first time or date candidate that cannot be parsed,
    /// including candidates the resolution step would not use.
    pub fn extract_at(&self, text: &str, now: NaiveDateTime) -> ParseResult<DateTimeRange> {
        let today = self.reference_date(text, now.date());

        let times = TIME_REGEX
            .find_iter(text)
            .map(|m| parse_time_of_day(m.as_str()))
            .collect::<ParseResult<Vec<_>>>()?;

        let dates = DATE_REGEX
            .captures_iter(text)
            .filter(|caps| !is_clock_minutes(text, caps))
            .map(|caps| parse_date(&caps, today.year()))
            .collect::<ParseResult<Vec<_>>>()?;

        debug!(
            times = times.len(),
            dates = dates.len(),
            %today,
            "scanned text for date/time candidates"
        );

        let range = resolve(today, &times, &dates);
        debug!(
            source = ?range.source,
            start = %range.start,
            end = %range.end,
            "resolved date/time range"
        );
        Ok(range)
    }

    /// Applies the first matching relative-day rule to `today`.
    pub fn reference_date(&self, text: &str, today: NaiveDate) -> NaiveDate {
        let lowered = text.to_lowercase();
        match self.rules.iter().find(|rule| lowered.contains(rule.phrase)) {
            Some(rule) => {
                debug!(phrase = rule.phrase, offset = rule.offset_days, "relative day matched");
                today + TimeDelta::days(rule.offset_days)
            }
            None => today,
        }
    }
}

fn resolve(today: NaiveDate, times: &[NaiveTime], dates: &[NaiveDate]) -> DateTimeRange {
    match (times, dates) {
        ([first, second], _) => DateTimeRange::new(
            today.and_time(*first),
            today.and_time(*second),
            RangeSource::TimePair,
        ),
        (_, [first, ..]) => {
            let start = first.and_time(NaiveTime::MIN);
            DateTimeRange::new(start, start + TimeDelta::days(1), RangeSource::Date)
        }
        _ => {
            let start = today.and_time(NaiveTime::MIN);
            DateTimeRange::new(start, start + TimeDelta::hours(1), RangeSource::Default)
        }
    }
}

/// Convenience function to extract a range relative to the current time.
///
/// See [`DateTimeRangeExtractor::extract`] for details.
pub fn extract_datetime_range(text: &str) -> ParseResult<DateTimeRange> {
    DateTimeRangeExtractor::new().extract(text)
}
