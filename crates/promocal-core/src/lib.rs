//! Core types: date/time range extraction, links, summaries, events

pub mod datetime;
pub mod error;
pub mod event;
pub mod links;
pub mod sample;
pub mod summary;
pub mod time;
pub mod tracing;

pub use datetime::{
    DateTimeRangeExtractor, RELATIVE_DAY_RULES, RelativeDayRule, TimeFormat,
    extract_datetime_range, parse_time_of_day,
};
pub use error::{ParseError, ParseResult};
pub use event::{CalendarEvent, EventDraft};
pub use links::{LinkExtractor, extract_links, first_link};
pub use sample::SAMPLE_TEXT;
pub use summary::{DescriptionGenerator, FixedSummary, Summarizer, TitleGenerator};
pub use time::{DEFAULT_TIME_ZONE, DateTimeRange, LabeledTime, RangeSource, current_local_offset};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
