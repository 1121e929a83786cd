//! The ordered field-extraction pipeline.
//!
//! Each stage reads the normalized record text and the partially built
//! record. Order matters: the name needs the ID and email, the zip skips the
//! ID, and the location stage only falls back to its own zip when the zip
//! stage found none.

use tracing::trace;

use crate::models::config::ExtractionConfig;
use crate::models::record::{Field, OrderRecord};

use super::rules::{
    EmailExtractor, FieldExtractor, MedicineMatcher, PhoneExtractor, ZipExtractor, city_before,
    extract_customer_name, extract_dates, extract_sex, extract_total_amount, extract_user_id,
    find_state_zip,
};

/// One step of the extraction pipeline.
pub trait ExtractionStage: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Fill this stage's fields from `text`.
    fn apply(&self, text: &str, record: &mut OrderRecord);
}

struct IdentifierStage;

impl ExtractionStage for IdentifierStage {
    fn name(&self) -> &'static str {
        "identifier"
    }

    fn apply(&self, text: &str, record: &mut OrderRecord) {
        if let Some(id) = extract_user_id(text) {
            record.set(Field::UserId, id);
        }
    }
}

struct EmailStage;

impl ExtractionStage for EmailStage {
    fn name(&self) -> &'static str {
        "email"
    }

    fn apply(&self, text: &str, record: &mut OrderRecord) {
        if let Some(email) = EmailExtractor.extract(text) {
            record.set(Field::EmailAddress, email.value);
        }
    }
}

struct NameStage;

impl ExtractionStage for NameStage {
    fn name(&self) -> &'static str {
        "name"
    }

    fn apply(&self, text: &str, record: &mut OrderRecord) {
        if record.is_blank(Field::UserId) || record.is_blank(Field::EmailAddress) {
            return;
        }
        let name = extract_customer_name(
            text,
            record.get(Field::UserId),
            record.get(Field::EmailAddress),
        );
        if let Some(name) = name {
            record.set(Field::CustomerName, name);
        }
    }
}

struct PhoneStage;

impl ExtractionStage for PhoneStage {
    fn name(&self) -> &'static str {
        "phone"
    }

    fn apply(&self, text: &str, record: &mut OrderRecord) {
        let mut phones = PhoneExtractor.extract_all(text).into_iter();
        if let Some(primary) = phones.next() {
            record.set(Field::PhNo1, primary.value);
        }
        if let Some(secondary) = phones.next() {
            record.set(Field::PhNo2, secondary.value);
        }
    }
}

struct SexStage;

impl ExtractionStage for SexStage {
    fn name(&self) -> &'static str {
        "sex"
    }

    fn apply(&self, text: &str, record: &mut OrderRecord) {
        if let Some(sex) = extract_sex(text) {
            record.set(Field::Sex1, sex.as_str());
        }
    }
}

struct DateStage;

impl ExtractionStage for DateStage {
    fn name(&self) -> &'static str {
        "dates"
    }

    fn apply(&self, text: &str, record: &mut OrderRecord) {
        let dates = extract_dates(text);
        if let Some(birth) = dates.birth_date {
            // D_Birth and DOB are kept in step for downstream consumers
            record.set(Field::DBirth, birth.clone());
            record.set(Field::Dob, birth);
        }
        if let Some(created) = dates.create_date {
            record.set(Field::CreateDate, created);
        }
    }
}

struct ZipStage;

impl ExtractionStage for ZipStage {
    fn name(&self) -> &'static str {
        "zip"
    }

    fn apply(&self, text: &str, record: &mut OrderRecord) {
        let mut extractor = ZipExtractor::new();
        if !record.is_blank(Field::UserId) {
            extractor = extractor.excluding(record.get(Field::UserId));
        }
        if let Some(zip) = extractor.extract(text) {
            record.set(Field::Zip1, zip.value);
        }
    }
}

struct AmountStage;

impl ExtractionStage for AmountStage {
    fn name(&self) -> &'static str {
        "amount"
    }

    fn apply(&self, text: &str, record: &mut OrderRecord) {
        if let Some(total) = extract_total_amount(text) {
            record.set(Field::TotalAmount, total);
        }
    }
}

struct MedicineStage {
    matcher: MedicineMatcher,
}

impl ExtractionStage for MedicineStage {
    fn name(&self) -> &'static str {
        "medicine"
    }

    fn apply(&self, text: &str, record: &mut OrderRecord) {
        if let Some(name) = self.matcher.find(text) {
            record.set(Field::Medicine, name);
        }
    }
}

struct LocationStage {
    street_suffixes: Vec<String>,
}

impl ExtractionStage for LocationStage {
    fn name(&self) -> &'static str {
        "location"
    }

    fn apply(&self, text: &str, record: &mut OrderRecord) {
        let Some(found) = find_state_zip(text) else {
            return;
        };

        record.set(Field::State1, found.state.as_str());
        if record.is_blank(Field::Zip1) {
            record.set(Field::Zip1, found.zip.as_str());
        }
        if let Some(city) = city_before(text, found.start, &self.street_suffixes) {
            record.set(Field::City1, city);
        }
    }
}

/// The fixed sequence of extraction stages.
pub struct ExtractionPipeline {
    stages: Vec<Box<dyn ExtractionStage>>,
}

impl ExtractionPipeline {
    /// The standard stage order.
    pub fn new(config: &ExtractionConfig) -> Self {
        let stages: Vec<Box<dyn ExtractionStage>> = vec![
            Box::new(IdentifierStage),
            Box::new(EmailStage),
            Box::new(NameStage),
            Box::new(PhoneStage),
            Box::new(SexStage),
            Box::new(DateStage),
            Box::new(ZipStage),
            Box::new(AmountStage),
            Box::new(MedicineStage {
                matcher: MedicineMatcher::new(&config.medicines),
            }),
            Box::new(LocationStage {
                street_suffixes: config.street_suffixes.clone(),
            }),
        ];
        Self { stages }
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run every stage over normalized `text`.
    pub fn run(&self, text: &str, record: &mut OrderRecord) {
        for stage in &self.stages {
            stage.apply(text, record);
            trace!("Stage {} done", stage.name());
        }
    }
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

impl std::fmt::Debug for ExtractionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionPipeline")
            .field("stages", &self.stage_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(text: &str) -> OrderRecord {
        let mut record = OrderRecord::new("test.png", 1);
        ExtractionPipeline::default().run(text, &mut record);
        record
    }

    #[test]
    fn test_stage_order() {
        assert_eq!(
            ExtractionPipeline::default().stage_names(),
            vec![
                "identifier", "email", "name", "phone", "sex", "dates", "zip", "amount",
                "medicine", "location",
            ]
        );
    }

    #[test]
    fn test_name_needs_identifier() {
        let record = run("JOHN DOE john@mail.com 90210");
        assert_eq!(record.get(Field::EmailAddress), "john@mail.com");
        assert_eq!(record.get(Field::CustomerName), "");
        assert_eq!(record.get(Field::Zip1), "90210");
    }

    #[test]
    fn test_two_phones() {
        let record = run("12345 A B a@b.com 555-123-4567 555.987.6543 555 000 1111");
        assert_eq!(record.get(Field::PhNo1), "555-123-4567");
        assert_eq!(record.get(Field::PhNo2), "555.987.6543");
    }

    #[test]
    fn test_dates_fill_aliases() {
        let record = run("12345 A a@b.com 01/02/1980 03/04/2024");
        assert_eq!(record.get(Field::DBirth), "01/02/1980");
        assert_eq!(record.get(Field::Dob), "01/02/1980");
        assert_eq!(record.get(Field::CreateDate), "03/04/2024");
    }

    #[test]
    fn test_zip_skips_identifier() {
        let record = run("12345 A a@b.com nothing else");
        assert_eq!(record.get(Field::UserId), "12345");
        assert_eq!(record.get(Field::Zip1), "");
    }

    #[test]
    fn test_location_zip_fallback_only_when_missing() {
        let record = run("12345 A a@b.com 10001 Austin TX 73301");
        assert_eq!(record.get(Field::Zip1), "10001");
        assert_eq!(record.get(Field::State1), "TX");
        assert_eq!(record.get(Field::City1), "Austin");
    }

    #[test]
    fn test_medicine_from_config() {
        let config = ExtractionConfig {
            medicines: vec!["TRAMADOL".to_string()],
            ..ExtractionConfig::default()
        };
        let mut record = OrderRecord::new("t.png", 1);
        ExtractionPipeline::new(&config).run("12345 A a@b.com tramadol 50mg XANAX", &mut record);
        assert_eq!(record.get(Field::Medicine), "TRAMADOL");
    }
}
