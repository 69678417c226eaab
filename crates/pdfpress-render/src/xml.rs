//! XML rendering.

use crate::options::RenderOptions;
use crate::pager::{LinePager, PageFont};
use crate::traits::RenderStrategy;
use pdfpress_core::{ConvertError, InputFormat};
use quick_xml::events::Event;
use quick_xml::{Reader, Writer};
use std::io::Cursor;

/// Renders `.xml` uploads re-indented with two spaces per level.
///
/// The document is parsed and re-emitted, so inconsistent source
/// whitespace normalizes away. Comments and processing instructions are
/// dropped; element structure, attributes, and text are kept.
pub struct XmlStrategy;

impl XmlStrategy {
    /// Parse and re-serialize the document with uniform indentation.
    fn normalize(input: &[u8]) -> Result<String, ConvertError> {
        let mut reader = Reader::from_reader(input);
        reader.trim_text(true);
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        let mut buf = Vec::new();
        let mut saw_root = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Eof) => break,
                Ok(Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_)) => {}
                Ok(event @ (Event::Start(_) | Event::Empty(_))) => {
                    saw_root = true;
                    writer.write_event(event).map_err(reserialize_error)?;
                }
                Ok(event) => {
                    writer.write_event(event).map_err(reserialize_error)?;
                }
                Err(e) => {
                    return Err(ConvertError::MalformedInput(format!(
                        "invalid XML at byte {}: {e}",
                        reader.buffer_position()
                    )));
                }
            }
            buf.clear();
        }

        if !saw_root {
            return Err(ConvertError::MalformedInput(
                "XML document has no root element".to_string(),
            ));
        }
        String::from_utf8(writer.into_inner().into_inner())
            .map_err(|e| ConvertError::RenderFailure(format!("non-UTF-8 XML output: {e}")))
    }
}

fn reserialize_error(e: impl std::fmt::Display) -> ConvertError {
    ConvertError::RenderFailure(format!("failed to reserialize XML: {e}"))
}

impl RenderStrategy for XmlStrategy {
    fn name(&self) -> &'static str {
        "xml"
    }

    fn formats(&self) -> &'static [InputFormat] {
        &[InputFormat::Xml]
    }

    fn render(&self, input: &[u8], options: &RenderOptions) -> Result<Vec<u8>, ConvertError> {
        let text = Self::normalize(input)?;
        let mut pager = LinePager::new(PageFont::Courier, options.font_size, options);
        pager.push_text(&text);
        pager.finish()
    }
}
