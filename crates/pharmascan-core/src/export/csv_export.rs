//! CSV serializer.

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::ExportError;
use crate::models::record::{FIELD_NAMES, OrderRecord};

use super::{OutputFormat, RecordExporter, Result};

/// CSV serializer: bare header row, every value quoted, `\n` line breaks.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl RecordExporter for CsvExporter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Csv
    }

    fn export(&self, records: &[OrderRecord]) -> Result<String> {
        generate_csv(records)
    }
}

/// Render records as CSV. No records renders as the empty string.
pub fn generate_csv(records: &[OrderRecord]) -> Result<String> {
    if records.is_empty() {
        return Ok(String::new());
    }

    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(vec![]);

    for record in records {
        wtr.write_record(record.values())?;
    }

    let buffer = wtr
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;
    let rows = String::from_utf8(buffer)?;

    let mut output = FIELD_NAMES.join(",");
    output.push('\n');
    output.push_str(rows.strip_suffix('\n').unwrap_or(&rows));
    Ok(output)
}
