//! Query classification and normalization
//!
//! Decides whether typed text looks like a street address and appends the
//! country name so free-text searches stay in Australia.

use crate::constants::search::COUNTRY_NAME;
use once_cell::sync::Lazy;
use regex::Regex;

static STREET_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(st|street|rd|road|ave|avenue|dr|drive|ln|lane|pl|place|ct|court|way|crescent|cres)\b",
    )
    .expect("street keyword pattern is valid")
});

/// One search attempt's input, classified and normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    normalized: String,
    has_numbers: bool,
    has_street_keyword: bool,
}

impl SearchQuery {
    /// Classify and normalize raw input (surrounding whitespace is ignored)
    pub fn new(raw: &str) -> Self {
        let raw = raw.trim().to_string();
        let has_numbers = raw.chars().any(|c| c.is_ascii_digit());
        let has_street_keyword = STREET_KEYWORD.is_match(&raw);

        let normalized = if raw.to_lowercase().contains(&COUNTRY_NAME.to_lowercase()) {
            raw.clone()
        } else {
            format!("{}, {}", raw, COUNTRY_NAME)
        };

        Self {
            raw,
            normalized,
            has_numbers,
            has_street_keyword,
        }
    }

    /// Trimmed input as typed
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Input with the country suffix
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn has_numbers(&self) -> bool {
        self.has_numbers
    }

    pub fn has_street_keyword(&self) -> bool {
        self.has_street_keyword
    }

    /// A digit plus a street-type word
    pub fn is_street_address(&self) -> bool {
        self.has_numbers && self.has_street_keyword
    }

    /// Street component for a structured search: everything before the first comma
    pub fn street(&self) -> &str {
        self.normalized
            .split(',')
            .next()
            .unwrap_or_default()
            .trim()
    }
}
