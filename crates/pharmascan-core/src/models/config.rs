//! Configuration structures for the extraction pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};
use crate::export::OutputFormat;

/// Main configuration for pharmascan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Record segmentation and field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Serializer configuration.
    pub output: OutputConfig,
}

/// Segmentation and field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Line groups whose normalized text is shorter than this are dropped.
    pub min_group_len: usize,

    /// Known drug names, checked in priority order.
    pub medicines: Vec<String>,

    /// Words that end a street address and must never be taken as a city.
    pub street_suffixes: Vec<String>,
}

/// Default minimum normalized length of a line group.
pub const DEFAULT_MIN_GROUP_LEN: usize = 20;

/// Drug names recognized on the order forms, highest priority first.
pub const DEFAULT_MEDICINES: [&str; 7] = [
    "PHENTERMINE",
    "VALIUM",
    "XANAX",
    "AMBIEN",
    "ADIPEX",
    "Klonopin",
    "LORAZEPAM",
];

/// Street-type words skipped by the city heuristic.
pub const DEFAULT_STREET_SUFFIXES: [&str; 7] = ["Road", "Rd", "St", "Street", "Ave", "Dr", "Lane"];

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_group_len: DEFAULT_MIN_GROUP_LEN,
            medicines: DEFAULT_MEDICINES.iter().map(|s| s.to_string()).collect(),
            street_suffixes: DEFAULT_STREET_SUFFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Serializer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Format used when the CLI is not given one.
    pub default_format: OutputFormat,

    /// Name of the XML root element.
    pub xml_root: String,

    /// Name of the per-record XML element.
    pub xml_record: String,

    /// Spaces per XML nesting level.
    pub xml_indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Csv,
            xml_root: "Root".to_string(),
            xml_record: "DataM".to_string(),
            xml_indent: 2,
        }
    }
}

impl ScanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        for name in [&self.output.xml_root, &self.output.xml_record] {
            if !is_xml_name(name) {
                return Err(ScanError::Config(format!(
                    "invalid XML element name {:?}",
                    name
                )));
            }
        }
        if self.extraction.medicines.iter().any(|m| m.trim().is_empty()) {
            return Err(ScanError::Config(
                "medicine names must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Letters, digits, `_`, `-` and `.`, starting with a letter or `_`.
fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
