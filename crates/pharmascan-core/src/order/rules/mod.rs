//! Rule-based field extractors for order forms.

pub mod address;
pub mod amounts;
pub mod contact;
pub mod dates;
pub mod medicine;
pub mod patterns;
pub mod sex;

pub use address::{StateZip, ZipExtractor, city_before, find_state_zip};
pub use amounts::{AmountExtractor, extract_total_amount};
pub use contact::{EmailExtractor, PhoneExtractor, extract_customer_name, extract_user_id};
pub use dates::{DateExtractor, OrderDates, extract_dates};
pub use medicine::MedicineMatcher;
pub use sex::extract_sex;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    /// Extract all occurrences of the field, in document order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A matched value with its location in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range in the source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

impl ExtractionMatch<String> {
    /// Wrap a regex match whose text is the value itself.
    pub fn from_regex(m: regex::Match<'_>) -> Self {
        let text = m.as_str().trim();
        Self::new(text.to_string(), m.as_str()).with_position(m.start(), m.end())
    }
}
