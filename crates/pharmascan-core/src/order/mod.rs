//! Order-form record extraction module.

mod parser;
pub mod rules;
pub mod segmenter;
pub mod stages;

pub use parser::{ExtractionResult, HeuristicOrderParser};
pub use segmenter::{
    IdEmailAnchor, LineGroup, RecordStartDetector, Segmentation, SegmentationStats, Segmenter,
};
pub use stages::{ExtractionPipeline, ExtractionStage};

/// Trait for order-form parsers.
pub trait OrderParser {
    /// Extract every record in one page of OCR text.
    ///
    /// Records are numbered from `start_record_no` upward. Never fails: text
    /// without recognizable records yields an empty result.
    fn parse(&self, text: &str, image_name: &str, start_record_no: u32) -> ExtractionResult;
}
