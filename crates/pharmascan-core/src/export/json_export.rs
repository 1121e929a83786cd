//! JSON serializer.

use crate::models::record::OrderRecord;

use super::{OutputFormat, RecordExporter, Result};

/// JSON serializer: an array of objects keyed by column name, in schema order.
#[derive(Debug, Clone, Copy)]
pub struct JsonExporter {
    pretty: bool,
}

impl JsonExporter {
    /// Pretty-printed output.
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Toggle pretty printing; compact output is a single line.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordExporter for JsonExporter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Json
    }

    fn export(&self, records: &[OrderRecord]) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(records)?
        } else {
            serde_json::to_string(records)?
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::Field;

    #[test]
    fn test_export_array_of_objects() {
        let records = vec![OrderRecord::new("a.png", 1).with_field(Field::State1, "CA")];
        let json = JsonExporter::new().with_pretty(false).export(&records).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["State_1"], "CA");
        assert_eq!(value[0]["RecordNo"], "1");
    }
}
