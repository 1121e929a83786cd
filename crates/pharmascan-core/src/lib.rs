//! Core library for pharmacy order-form OCR processing.
//!
//! This crate provides:
//! - OCR text normalization
//! - Record segmentation anchored on customer ID + email lines
//! - Heuristic field extraction into a fixed 48-column record schema
//! - CSV, XML and JSON serializers for extracted records

pub mod error;
pub mod export;
pub mod models;
pub mod order;
pub mod text;

pub use error::{ExportError, Result, ScanError};
pub use export::{OutputFormat, RecordExporter, generate_csv, generate_xml};
pub use models::config::ScanConfig;
pub use models::record::{FIELD_COUNT, FIELD_NAMES, Field, OrderRecord, Sex};
pub use order::{ExtractionResult, HeuristicOrderParser, OrderParser, RecordStartDetector, Segmenter};
pub use text::clean_text;
