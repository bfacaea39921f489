//! Link extraction from free text.
//!
//! Links are any `http://` or `https://` prefix followed by a run of
//! non-whitespace characters. Nothing is validated, normalized or
//! deduplicated; the pipeline only uses the first link found.
//!
//! # Example
//!
//! ```
//! use promocal_core::links::{extract_links, first_link};
//!
//! let text = "Register at https://example.com/pitch today";
//! assert_eq!(extract_links(text), vec!["https://example.com/pitch"]);
//! assert_eq!(first_link(text).as_deref(), Some("https://example.com/pitch"));
//! ```

use std::sync::LazyLock;

use regex::Regex;

/// Regex for extracting URLs from text.
static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("Invalid URL regex"));

/// Extracts URL-like substrings from text.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinkExtractor;

impl LinkExtractor {
    /// Creates a new link extractor.
    pub fn new() -> Self {
        Self
    }

    /// Returns every URL in the text, in order of appearance.
    pub fn extract(&self, text: &str) -> Vec<String> {
        URL_REGEX
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Returns the first URL in the text, if any.
    pub fn first(&self, text: &str) -> Option<String> {
        URL_REGEX.find(text).map(|m| m.as_str().to_string())
    }
}

/// Convenience function to extract all links from text.
///
/// See [`LinkExtractor::extract`] for details.
pub fn extract_links(text: &str) -> Vec<String> {
    LinkExtractor::new().extract(text)
}

/// Convenience function to get the first link from text.
///
/// See [`LinkExtractor::first`] for details.
pub fn first_link(text: &str) -> Option<String> {
    LinkExtractor::new().first(text)
}
