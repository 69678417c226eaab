//! DOCX rendering.

use crate::options::RenderOptions;
use crate::pager::{LinePager, PageFont};
use crate::traits::RenderStrategy;
use pdfpress_core::{ConvertError, InputFormat};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Renders `.docx` uploads as one text line per paragraph in the body font.
///
/// Only paragraph text is extracted (`w:p` / `w:t` runs); formatting,
/// tables, and embedded media are ignored.
pub struct DocxStrategy;

impl DocxStrategy {
    /// Pull the paragraph text out of the main document part.
    fn paragraphs(input: &[u8]) -> Result<Vec<String>, ConvertError> {
        let mut archive = ZipArchive::new(Cursor::new(input))
            .map_err(|e| ConvertError::MalformedInput(format!("invalid DOCX archive: {e}")))?;
        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .map_err(|e| {
                ConvertError::MalformedInput(format!("DOCX has no word/document.xml: {e}"))
            })?
            .read_to_string(&mut xml)
            .map_err(|e| ConvertError::MalformedInput(format!("unreadable DOCX part: {e}")))?;

        let mut reader = Reader::from_str(&xml);
        let mut paragraphs = Vec::new();
        let mut current = String::new();
        let mut in_text_run = false;
        let mut in_paragraph = false;

        loop {
            match reader.read_event() {
                Ok(Event::Eof) => break,
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"w:p" => {
                        in_paragraph = true;
                        current.clear();
                    }
                    b"w:t" => in_text_run = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.name().as_ref() == b"w:tab" => {
                    if in_paragraph {
                        current.push(' ');
                    }
                }
                Ok(Event::Text(t)) if in_text_run => {
                    let text = t.unescape().map_err(|e| {
                        ConvertError::MalformedInput(format!("invalid DOCX text run: {e}"))
                    })?;
                    current.push_str(&text);
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"w:p" => {
                        in_paragraph = false;
                        paragraphs.push(std::mem::take(&mut current));
                    }
                    b"w:t" => in_text_run = false,
                    _ => {}
                },
                Ok(_) => {}
                Err(e) => {
                    return Err(ConvertError::MalformedInput(format!(
                        "invalid DOCX document XML: {e}"
                    )));
                }
            }
        }
        Ok(paragraphs)
    }
}

impl RenderStrategy for DocxStrategy {
    fn name(&self) -> &'static str {
        "docx"
    }

    fn formats(&self) -> &'static [InputFormat] {
        &[InputFormat::Docx]
    }

    fn render(&self, input: &[u8], options: &RenderOptions) -> Result<Vec<u8>, ConvertError> {
        let paragraphs = Self::paragraphs(input)?;
        let mut pager = LinePager::new(PageFont::Helvetica, options.font_size, options);
        for paragraph in &paragraphs {
            pager.push_line(paragraph);
        }
        pager.finish()
    }
}
