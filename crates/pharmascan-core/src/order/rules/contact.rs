//! Customer identity and contact extraction: ID, email, name, phones.

use super::patterns::{EMAIL, PHONE};
use super::{ExtractionMatch, FieldExtractor};

/// Email field extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailExtractor;

impl FieldExtractor for EmailExtractor {
    type Output = ExtractionMatch<String>;

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        EMAIL.find_iter(text).map(ExtractionMatch::from_regex).collect()
    }
}

/// Phone number extractor (North American numbers).
#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneExtractor;

impl FieldExtractor for PhoneExtractor {
    type Output = ExtractionMatch<String>;

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        PHONE.find_iter(text).map(ExtractionMatch::from_regex).collect()
    }
}

/// The customer ID: the first token of the record, if it is exactly five digits.
pub fn extract_user_id(text: &str) -> Option<&str> {
    let first = text.split(' ').next()?;
    (first.len() == 5 && first.bytes().all(|b| b.is_ascii_digit())).then_some(first)
}

/// The customer name: whatever sits between the ID and the email.
///
/// Uses the first occurrence of each; if the email does not come after the
/// ID there is no name. Non-letters are stripped from both ends.
pub fn extract_customer_name(text: &str, user_id: &str, email: &str) -> Option<String> {
    let id_start = text.find(user_id)?;
    let email_start = text.find(email)?;
    let id_end = id_start + user_id.len();

    if email_start <= id_start || email_start < id_end {
        return None;
    }

    let name = text[id_end..email_start].trim_matches(|c: char| !c.is_ascii_alphabetic());
    (!name.is_empty()).then(|| name.to_string())
}
