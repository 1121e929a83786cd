//! Heuristic order-form parser: segmentation followed by field extraction.

use tracing::{debug, info};

use crate::models::config::ExtractionConfig;
use crate::models::record::OrderRecord;
use crate::text::clean_text;

use super::OrderParser;
use super::segmenter::{IdEmailAnchor, LineGroup, RecordStartDetector, Segmenter, SegmentationStats};
use super::stages::ExtractionPipeline;

/// Result of parsing one OCR page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Extracted records, in document order.
    pub records: Vec<OrderRecord>,
    /// Sequence number to hand to the next page.
    pub next_record_no: u32,
    /// Segmentation counters.
    pub stats: SegmentationStats,
}

/// Rule-based order-form parser.
///
/// Holds no mutable state; one instance can serve many pages, from many
/// threads, as long as callers thread the record counter themselves.
#[derive(Debug)]
pub struct HeuristicOrderParser<D = IdEmailAnchor> {
    segmenter: Segmenter<D>,
    pipeline: ExtractionPipeline,
}

impl HeuristicOrderParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create a parser from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            segmenter: Segmenter::new().with_min_group_len(config.min_group_len),
            pipeline: ExtractionPipeline::new(config),
        }
    }
}

impl Default for HeuristicOrderParser {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: RecordStartDetector> HeuristicOrderParser<D> {
    /// Replace the record-start detector, keeping the other settings.
    pub fn with_detector<E: RecordStartDetector>(self, detector: E) -> HeuristicOrderParser<E> {
        HeuristicOrderParser {
            segmenter: Segmenter::with_detector(detector)
                .with_min_group_len(self.segmenter.min_group_len()),
            pipeline: self.pipeline,
        }
    }

    /// Set the minimum normalized group length.
    pub fn with_min_group_len(mut self, min_group_len: usize) -> Self {
        self.segmenter = self.segmenter.with_min_group_len(min_group_len);
        self
    }

    pub fn segmenter(&self) -> &Segmenter<D> {
        &self.segmenter
    }

    pub fn pipeline(&self) -> &ExtractionPipeline {
        &self.pipeline
    }

    /// Number of records `text` will produce.
    pub fn count_records(&self, text: &str) -> usize {
        self.segmenter.segment(text).groups.len()
    }

    /// Build one record from one line group's text.
    pub fn extract_record(&self, group_text: &str, image_name: &str, record_no: u32) -> OrderRecord {
        self.extract_normalized(&clean_text(group_text), image_name, record_no)
    }

    /// Build records from already segmented groups, numbering from `start_record_no`.
    pub fn extract_groups(
        &self,
        groups: &[LineGroup],
        image_name: &str,
        start_record_no: u32,
    ) -> Vec<OrderRecord> {
        groups
            .iter()
            .enumerate()
            .map(|(i, group)| {
                let record_no = start_record_no.saturating_add(i as u32);
                self.extract_normalized(group.normalized(), image_name, record_no)
            })
            .collect()
    }

    fn extract_normalized(&self, text: &str, image_name: &str, record_no: u32) -> OrderRecord {
        let mut record = OrderRecord::new(image_name, record_no);
        self.pipeline.run(text, &mut record);
        debug!(
            "Extracted record {} from {} ({} characters)",
            record_no,
            image_name,
            text.len()
        );
        record
    }
}

impl<D: RecordStartDetector> OrderParser for HeuristicOrderParser<D> {
    fn parse(&self, text: &str, image_name: &str, start_record_no: u32) -> ExtractionResult {
        let segmentation = self.segmenter.segment(text);
        let records = self.extract_groups(&segmentation.groups, image_name, start_record_no);
        let next_record_no = start_record_no.saturating_add(records.len() as u32);

        info!(
            "Extracted {} records from {} ({} groups dropped)",
            records.len(),
            image_name,
            segmentation.stats.dropped_groups
        );

        ExtractionResult {
            records,
            next_record_no,
            stats: segmentation.stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::Field;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_record_normalizes_input() {
        let parser = HeuristicOrderParser::new();
        let record = parser.extract_record(
            "12345   JOHN\u{00a0}DOE\r\njohn@mail.com",
            "scan.png",
            4,
        );

        assert_eq!(record.get(Field::UserId), "12345");
        assert_eq!(record.get(Field::CustomerName), "JOHN DOE");
        assert_eq!(record.record_no(), Some(4));
    }

    #[test]
    fn test_record_numbers_continue_from_start() {
        let text = "12345 JOHN DOE john@mail.com\n54321 JANE ROE jane@mail.com";
        let result = HeuristicOrderParser::new().parse(text, "scan.png", 10);

        let numbers: Vec<Option<u32>> = result.records.iter().map(|r| r.record_no()).collect();
        assert_eq!(numbers, vec![Some(10), Some(11)]);
        assert_eq!(result.next_record_no, 12);
    }

    #[test]
    fn test_empty_text() {
        let result = HeuristicOrderParser::new().parse("", "blank.png", 1);
        assert!(result.records.is_empty());
        assert_eq!(result.next_record_no, 1);
    }

    #[test]
    fn test_with_detector() {
        let parser = HeuristicOrderParser::new()
            .with_detector(|line: &str| line.starts_with("#"))
            .with_min_group_len(1);
        let result = parser.parse("# 11111 bob@x.com\n# 22222 amy@y.com", "x.png", 1);

        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[1].get(Field::EmailAddress), "amy@y.com");
    }

    #[test]
    fn test_count_matches_parse() {
        let text = "12345 a@b.co\n54321 JOHN DOE john@mail.com\nx";
        let parser = HeuristicOrderParser::new();
        assert_eq!(parser.count_records(text), parser.parse(text, "p", 1).records.len());
    }
}
