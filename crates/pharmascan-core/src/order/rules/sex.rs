//! Patient sex marker extraction.

use crate::models::record::Sex;

use super::patterns::{FEMALE, MALE};

/// Whole-word sex marker. `FEMALE` wins when both words appear.
pub fn extract_sex(text: &str) -> Option<Sex> {
    if FEMALE.is_match(text) {
        Some(Sex::Female)
    } else if MALE.is_match(text) {
        Some(Sex::Male)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_male() {
        assert_eq!(extract_sex("JOHN male 01/02/1980"), Some(Sex::Male));
    }

    #[test]
    fn test_female_is_not_male() {
        assert_eq!(extract_sex("JANE FEMALE"), Some(Sex::Female));
    }

    #[test]
    fn test_both_resolves_female() {
        assert_eq!(extract_sex("MALE nurse, patient FEMALE"), Some(Sex::Female));
    }

    #[test]
    fn test_substring_is_not_a_marker() {
        assert_eq!(extract_sex("MALES FEMALENESS"), None);
    }
}
