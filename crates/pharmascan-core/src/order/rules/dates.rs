//! Date extraction for order forms.
//!
//! Dates are kept exactly as printed; forms mix day-first and month-first
//! layouts, so no calendar interpretation is attempted.

use super::patterns::DATE;
use super::{ExtractionMatch, FieldExtractor};

/// Numeric date extractor (`1/2/80`, `01-02-1980`).
#[derive(Debug, Clone, Copy, Default)]
pub struct DateExtractor;

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DATE.find_iter(text).map(ExtractionMatch::from_regex).collect()
    }
}

/// Dates found in one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderDates {
    /// First date on the record.
    pub birth_date: Option<String>,
    /// Second date on the record.
    pub create_date: Option<String>,
}

/// Assign dates by position: the first is the date of birth, the second
/// the order creation date.
pub fn extract_dates(text: &str) -> OrderDates {
    let mut dates = DateExtractor.extract_all(text).into_iter().map(|m| m.value);
    OrderDates {
        birth_date: dates.next(),
        create_date: dates.next(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_date_shapes() {
        let found: Vec<String> = DateExtractor
            .extract_all("1/2/80 and 01-02-1980 and 12/31/2024")
            .into_iter()
            .map(|m| m.value)
            .collect();
        assert_eq!(found, vec!["1/2/80", "01-02-1980", "12/31/2024"]);
    }

    #[test]
    fn test_phone_is_not_a_date() {
        assert!(DateExtractor.extract("555-123-4567").is_none());
    }

    #[test]
    fn test_extract_dates_by_position() {
        let dates = extract_dates("MALE 01/02/1980 ordered 03/04/2024 shipped 03/05/2024");
        assert_eq!(dates.birth_date.as_deref(), Some("01/02/1980"));
        assert_eq!(dates.create_date.as_deref(), Some("03/04/2024"));
    }

    #[test]
    fn test_extract_dates_none() {
        assert_eq!(extract_dates("no dates here"), OrderDates::default());
    }
}
