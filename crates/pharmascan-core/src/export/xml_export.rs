//! XML serializer.

use quick_xml::Writer;
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::ExportError;
use crate::models::config::OutputConfig;
use crate::models::record::OrderRecord;

use super::{OutputFormat, RecordExporter, Result};

/// XML serializer: one element per record, one child per column.
///
/// Empty values produce an empty open/close pair; there is no placeholder
/// for missing data.
#[derive(Debug, Clone)]
pub struct XmlExporter {
    root: String,
    record: String,
    indent: usize,
}

impl XmlExporter {
    pub fn new() -> Self {
        Self::from_config(&OutputConfig::default())
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self {
            root: config.xml_root.clone(),
            record: config.xml_record.clone(),
            indent: config.xml_indent,
        }
    }

    fn render(&self, records: &[OrderRecord]) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        let record_pad = format!("\n{}", " ".repeat(self.indent));
        let field_pad = format!("\n{}", " ".repeat(self.indent * 2));

        write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        write(&mut writer, Event::Text(BytesText::from_escaped("\n")))?;
        write(&mut writer, Event::Start(BytesStart::new(self.root.as_str())))?;

        for record in records {
            write(&mut writer, Event::Text(BytesText::from_escaped(record_pad.as_str())))?;
            write(&mut writer, Event::Start(BytesStart::new(self.record.as_str())))?;

            for (field, value) in record.iter() {
                write(&mut writer, Event::Text(BytesText::from_escaped(field_pad.as_str())))?;
                write(&mut writer, Event::Start(BytesStart::new(field.name())))?;
                if !value.is_empty() {
                    write(&mut writer, Event::Text(BytesText::from_escaped(escape(value))))?;
                }
                write(&mut writer, Event::End(BytesEnd::new(field.name())))?;
            }

            write(&mut writer, Event::Text(BytesText::from_escaped(record_pad.as_str())))?;
            write(&mut writer, Event::End(BytesEnd::new(self.record.as_str())))?;
        }

        write(&mut writer, Event::Text(BytesText::from_escaped("\n")))?;
        write(&mut writer, Event::End(BytesEnd::new(self.root.as_str())))?;

        Ok(String::from_utf8(writer.into_inner())?)
    }
}

impl Default for XmlExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordExporter for XmlExporter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Xml
    }

    fn export(&self, records: &[OrderRecord]) -> Result<String> {
        self.render(records)
    }
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| ExportError::Xml(e.to_string()))
}

/// Render records as XML with the default `Root` / `DataM` layout.
pub fn generate_xml(records: &[OrderRecord]) -> Result<String> {
    XmlExporter::new().export(records)
}
