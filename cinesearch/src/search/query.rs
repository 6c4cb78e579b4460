//! Query parsing: year extraction and text normalization.

use lazy_static::lazy_static;
use regex::Regex;

use crate::{CinesearchError, Result};

lazy_static! {
    /// A four-digit year in 1900-2099. Not anchored to word boundaries, so
    /// `"blade runner 2049"` and `"2049er"` both match.
    static ref YEAR_PATTERN: Regex = Regex::new(r"(19|20)\d{2}").unwrap();
}

/// A parsed search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    /// The query exactly as received
    pub raw_text: String,

    /// Release year found in the query, always in `1900..=2099`
    pub extracted_year: Option<i32>,

    /// Query with every year token removed, trimmed and lower-cased. May be empty.
    pub core_text: String,
}

impl ParsedQuery {
    /// Text forwarded to the search index: the core text, or the trimmed raw
    /// query when nothing but a year was typed.
    pub fn search_text(&self) -> &str {
        if self.core_text.is_empty() {
            self.raw_text.trim()
        } else {
            &self.core_text
        }
    }

    /// Whether the query consisted only of a year.
    pub fn is_year_only(&self) -> bool {
        self.core_text.is_empty() && self.extracted_year.is_some()
    }
}

/// Parse a raw query into a year and normalized core text.
///
/// The leftmost year-shaped substring becomes `extracted_year`; all year-shaped
/// substrings are stripped from the core text.
///
/// # Errors
///
/// Returns [`CinesearchError::EmptyQuery`] when `raw` is blank.
pub fn parse_query(raw: &str) -> Result<ParsedQuery> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CinesearchError::EmptyQuery);
    }

    let extracted_year = YEAR_PATTERN
        .find(trimmed)
        .and_then(|m| m.as_str().parse::<i32>().ok());

    let core_text = match extracted_year {
        Some(_) => YEAR_PATTERN.replace_all(trimmed, ""),
        None => trimmed.into(),
    };

    Ok(ParsedQuery {
        raw_text: raw.to_string(),
        extracted_year,
        core_text: normalize_text(&core_text),
    })
}

/// Trim and lower-case a string.
pub fn normalize_text(text: &str) -> String {
    text.trim().to_lowercase()
}
