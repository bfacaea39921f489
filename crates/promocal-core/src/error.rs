//! Error types for text extraction.

use thiserror::Error;

use crate::datetime::TimeFormat;

/// An error raised when a matched date or time substring cannot be turned
/// into a structured value.
///
/// Extraction never skips a bad match: the first one that fails to parse
/// aborts the whole run with one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A clock-like substring matched none of the accepted time formats.
    #[error("unrecognized time {input:?} (tried {})", format_list(.tried))]
    UnrecognizedTime {
        /// The trimmed substring that was matched.
        input: String,
        /// Formats attempted, in order.
        tried: Vec<TimeFormat>,
    },

    /// A day/month substring whose month is not a known abbreviation.
    #[error("unknown month {month:?} in {input:?}")]
    UnknownMonth {
        /// The full matched substring.
        input: String,
        /// The month token that failed to resolve.
        month: String,
    },

    /// A day/month pair that does not exist in the reference year.
    #[error("invalid date {input:?}: {year:04}-{month:02}-{day:02} does not exist")]
    InvalidDate {
        /// The full matched substring.
        input: String,
        /// Year taken from the reference date.
        year: i32,
        /// Month number (1-12).
        month: u32,
        /// Day of month as written.
        day: u32,
    },
}

fn format_list(formats: &[TimeFormat]) -> String {
    formats
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A specialized Result type for extraction.
pub type ParseResult<T> = Result<T, ParseError>;
