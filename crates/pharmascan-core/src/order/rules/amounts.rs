//! Dollar amount extraction for order forms.

use super::patterns::DOLLAR_AMOUNT;
use super::{ExtractionMatch, FieldExtractor};

/// Dollar-prefixed amount extractor. Values keep their printed form.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmountExtractor;

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<String>;

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DOLLAR_AMOUNT
            .find_iter(text)
            .map(ExtractionMatch::from_regex)
            .collect()
    }
}

/// The order total: the last dollar amount in the text.
///
/// Forms list line-item prices before the running total.
pub fn extract_total_amount(text: &str) -> Option<String> {
    AmountExtractor
        .extract_all(text)
        .into_iter()
        .last()
        .map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_last_amount() {
        assert_eq!(
            extract_total_amount("Pills $45.00 shipping $15.00 total $120.00"),
            Some("$120.00".to_string())
        );
    }

    #[test]
    fn test_single_amount() {
        assert_eq!(extract_total_amount("paid $ 89.99"), Some("$ 89.99".to_string()));
    }

    #[test]
    fn test_no_dollar_amount() {
        assert_eq!(extract_total_amount("total 120.00 USD"), None);
    }

    #[test]
    fn test_extract_all_amounts() {
        let results = AmountExtractor.extract_all("$1,250.00 then $3");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].value, "$1,250.00");
        assert_eq!(results[0].position, Some((0, 9)));
    }
}
