//! Subcommands and the input/config plumbing they share.

pub mod batch;
pub mod config;
pub mod process;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use pharmascan_core::{OutputFormat, ScanConfig};

/// Output format as accepted on the command line.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum FormatArg {
    /// Quoted CSV with a header row
    Csv,
    /// Indented XML document
    Xml,
    /// Pretty-printed JSON array
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Xml => OutputFormat::Xml,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Response body of the OCR endpoint.
#[derive(Deserialize)]
struct OcrResponse {
    text: String,
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pharmascan")
        .join("config.json")
}

/// Load the explicit config file, else the default one if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ScanConfig> {
    if let Some(path) = config_path {
        return Ok(ScanConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(ScanConfig::from_file(&default_path)?)
    } else {
        Ok(ScanConfig::default())
    }
}

/// Whether `path` has an extension `read_ocr_text` understands.
pub fn is_supported_input(path: &Path) -> bool {
    matches!(extension_of(path).as_str(), "txt" | "json")
}

/// Read OCR text from a `.txt` file or a `.json` OCR response.
pub fn read_ocr_text(path: &Path) -> anyhow::Result<String> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    match extension_of(path).as_str() {
        "txt" => Ok(fs::read_to_string(path)?),
        "json" => {
            let content = fs::read_to_string(path)?;
            let response: OcrResponse = serde_json::from_str(&content).map_err(|e| {
                anyhow::anyhow!("{} is not an OCR response: {}", path.display(), e)
            })?;
            Ok(response.text)
        }
        other => anyhow::bail!("Unsupported file format: {}", other),
    }
}

/// Image name recorded in every row: the input's file name.
pub fn image_name_for(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_string()
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}
