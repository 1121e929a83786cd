//! Serializers turning extracted records into downloadable text.

pub mod csv_export;
pub mod json_export;
pub mod xml_export;

use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::models::config::OutputConfig;
use crate::models::record::OrderRecord;

pub use csv_export::{CsvExporter, generate_csv};
pub use json_export::JsonExporter;
pub use xml_export::{XmlExporter, generate_xml};

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Trait for record serializers.
pub trait RecordExporter {
    /// Format produced by this exporter.
    fn format(&self) -> OutputFormat;

    /// Render records, in the given order, to text.
    fn export(&self, records: &[OrderRecord]) -> Result<String>;
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Xml,
    Json,
}

impl OutputFormat {
    /// MIME type to serve the rendered text with.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "text/csv",
            OutputFormat::Xml => "application/xml",
            OutputFormat::Json => "application/json",
        }
    }

    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Xml => "xml",
            OutputFormat::Json => "json",
        }
    }
}

/// Build the exporter for `format` using the configured output options.
pub fn exporter_for(format: OutputFormat, config: &OutputConfig) -> Box<dyn RecordExporter> {
    match format {
        OutputFormat::Csv => Box::new(CsvExporter),
        OutputFormat::Xml => Box::new(XmlExporter::from_config(config)),
        OutputFormat::Json => Box::new(JsonExporter::new()),
    }
}

/// Render records in `format`.
pub fn render(records: &[OrderRecord], format: OutputFormat, config: &OutputConfig) -> Result<String> {
    exporter_for(format, config).export(records)
}
