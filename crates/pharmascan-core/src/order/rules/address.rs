//! Address extraction: zip code, state, and city.

use super::patterns::{STATE_ZIP, ZIP_CODE};
use super::{ExtractionMatch, FieldExtractor};

/// Zip code extractor (`90210`, `90210-1234`).
#[derive(Debug, Clone, Default)]
pub struct ZipExtractor {
    /// A token that must not be taken as a zip, usually the customer ID.
    exclude: Option<String>,
}

impl ZipExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip matches equal to `token`.
    pub fn excluding(mut self, token: impl Into<String>) -> Self {
        self.exclude = Some(token.into());
        self
    }
}

impl FieldExtractor for ZipExtractor {
    type Output = ExtractionMatch<String>;

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        ZIP_CODE
            .find_iter(text)
            .filter(|m| self.exclude.as_deref() != Some(m.as_str()))
            .map(ExtractionMatch::from_regex)
            .collect()
    }
}

/// A two-letter state code directly followed by a zip code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateZip {
    pub state: String,
    pub zip: String,
    /// Byte offset of the state code.
    pub start: usize,
}

/// Find the first `ST 12345` pair.
pub fn find_state_zip(text: &str) -> Option<StateZip> {
    let caps = STATE_ZIP.captures(text)?;
    let state = caps.get(1)?;
    Some(StateZip {
        state: state.as_str().to_string(),
        zip: caps[2].to_string(),
        start: state.start(),
    })
}

/// The city: last word before the state code.
///
/// Returns `None` when that word is a street-type suffix such as `Rd`;
/// an empty city is preferred over a street name.
pub fn city_before(text: &str, state_start: usize, street_suffixes: &[String]) -> Option<String> {
    let before = text.get(..state_start)?.trim();
    let last = before
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|w| !w.is_empty())
        .last()?;

    if is_street_suffix(last, street_suffixes) {
        return None;
    }
    Some(last.to_string())
}

fn is_street_suffix(word: &str, street_suffixes: &[String]) -> bool {
    let word = word.strip_suffix('.').unwrap_or(word);
    street_suffixes.iter().any(|s| s.eq_ignore_ascii_case(word))
}
