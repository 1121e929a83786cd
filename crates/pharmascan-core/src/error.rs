//! Error types for the pharmascan-core library.
//!
//! Record extraction never fails: unmatched patterns leave fields empty and
//! undersized line groups are dropped. The errors here cover the surfaces
//! around the engine (serializers, configuration, file I/O).

use thiserror::Error;

/// Main error type for the pharmascan library.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Serializer error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while rendering records to CSV or XML.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The CSV writer rejected a record.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The XML writer failed.
    #[error("XML error: {0}")]
    Xml(String),

    /// JSON encoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The in-memory writer could not be flushed.
    #[error("failed to flush output buffer: {0}")]
    Buffer(String),

    /// Rendered output was not valid UTF-8.
    #[error("output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type for the pharmascan library.
pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_error_converts_into_scan_error() {
        let err: ScanError = ExportError::Buffer("closed".to_string()).into();
        assert!(matches!(err, ScanError::Export(ExportError::Buffer(_))));
        assert_eq!(
            err.to_string(),
            "export error: failed to flush output buffer: closed"
        );
    }
}
