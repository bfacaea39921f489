//! Title and description generation.
//!
//! Both generators delegate to a [`Summarizer`]. The defaults are fixed
//! strings; any other strategy (a closure, a model client) can be plugged in
//! without touching the pipeline.

use std::fmt;

/// Default event title.
pub const DEFAULT_TITLE: &str = "Dream University Pitch 2024";

/// Default event description.
pub const DEFAULT_DESCRIPTION: &str =
    "Participate in the Dream University Pitch for a chance to win exciting prizes!";

/// Strategy that turns source text into a short string.
pub trait Summarizer: Send + Sync {
    /// Summarizes `text`.
    fn summarize(&self, text: &str) -> String;
}

impl<F> Summarizer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn summarize(&self, text: &str) -> String {
        self(text)
    }
}

/// A summarizer that ignores its input and returns a constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedSummary(String);

impl FixedSummary {
    /// Creates a fixed summary.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl Summarizer for FixedSummary {
    fn summarize(&self, _text: &str) -> String {
        self.0.clone()
    }
}

macro_rules! generator {
    ($(#[$meta:meta])* $name:ident, $default:expr) => {
        $(#[$meta])*
        pub struct $name {
            summarizer: Box<dyn Summarizer>,
        }

        impl $name {
            /// Creates a generator backed by `summarizer`.
            pub fn new(summarizer: impl Summarizer + 'static) -> Self {
                Self {
                    summarizer: Box::new(summarizer),
                }
            }

            /// Creates a generator that always returns `value`.
            pub fn fixed(value: impl Into<String>) -> Self {
                Self::new(FixedSummary::new(value))
            }

            /// Generates the string for `text`.
            pub fn generate(&self, text: &str) -> String {
                self.summarizer.summarize(text)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::fixed($default)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name)).finish_non_exhaustive()
            }
        }
    };
}

generator!(
    /// Generates an event title from source text.
    TitleGenerator,
    DEFAULT_TITLE
);

generator!(
    /// Generates an event description from source text.
    DescriptionGenerator,
    DEFAULT_DESCRIPTION
);
