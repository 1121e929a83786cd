//! Known-drug lookup.

use regex::Regex;
use tracing::warn;

use super::patterns::whole_word;

/// Whole-word, case-insensitive matcher over a prioritized drug list.
#[derive(Debug, Clone)]
pub struct MedicineMatcher {
    names: Vec<(String, Regex)>,
}

impl MedicineMatcher {
    /// Build a matcher; earlier names win when several appear.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .filter_map(|name| {
                let name = name.as_ref().trim();
                match whole_word(name) {
                    Ok(re) => Some((name.to_string(), re)),
                    Err(e) => {
                        warn!("Skipping medicine name {:?}: {}", name, e);
                        None
                    }
                }
            })
            .collect();
        Self { names }
    }

    /// The first listed drug that appears in `text`, spelled as listed.
    pub fn find(&self, text: &str) -> Option<&str> {
        self.names
            .iter()
            .find(|(_, re)| re.is_match(text))
            .map(|(name, _)| name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::DEFAULT_MEDICINES;

    #[test]
    fn test_priority_order_wins() {
        let matcher = MedicineMatcher::new(DEFAULT_MEDICINES);
        assert_eq!(matcher.find("xanax 1mg, phentermine 37.5mg"), Some("PHENTERMINE"));
    }

    #[test]
    fn test_returns_listed_spelling() {
        let matcher = MedicineMatcher::new(DEFAULT_MEDICINES);
        assert_eq!(matcher.find("KLONOPIN 2MG"), Some("Klonopin"));
    }

    #[test]
    fn test_whole_word_only() {
        let matcher = MedicineMatcher::new(["VALIUM"]);
        assert_eq!(matcher.find("VALIUMX"), None);
        assert!(matcher.find("no drugs").is_none());
    }
}
