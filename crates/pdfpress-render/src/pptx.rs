//! PPTX rendering.

use crate::options::RenderOptions;
use crate::pager::{LinePager, PageFont};
use crate::traits::RenderStrategy;
use pdfpress_core::{ConvertError, InputFormat};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Renders `.pptx` uploads as one text section per slide.
///
/// Slides are processed in numeric order (`slide2.xml` before
/// `slide10.xml`), each under a `Slide N` heading. A slide that fails to
/// parse fails the whole conversion with an error naming that slide.
pub struct PptxStrategy;

impl PptxStrategy {
    /// Slide part names in presentation order.
    fn slide_parts(archive: &ZipArchive<Cursor<&[u8]>>) -> Vec<(u32, String)> {
        let mut parts: Vec<(u32, String)> = archive
            .file_names()
            .filter_map(|name| {
                let rest = name.strip_prefix("ppt/slides/slide")?;
                let number: u32 = rest.strip_suffix(".xml")?.parse().ok()?;
                Some((number, name.to_string()))
            })
            .collect();
        parts.sort_unstable_by_key(|(number, _)| *number);
        parts
    }

    /// Paragraph text of one slide, in document order.
    fn slide_paragraphs(number: u32, xml: &str) -> Result<Vec<String>, ConvertError> {
        let mut reader = Reader::from_str(xml);
        let mut paragraphs = Vec::new();
        let mut current = String::new();
        let mut in_text = false;

        loop {
            match reader.read_event() {
                Ok(Event::Eof) => break,
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"a:p" => current.clear(),
                    b"a:t" => in_text = true,
                    _ => {}
                },
                Ok(Event::Text(t)) if in_text => {
                    let text = t.unescape().map_err(|e| {
                        ConvertError::MalformedInput(format!(
                            "slide {number} has an invalid text run: {e}"
                        ))
                    })?;
                    current.push_str(&text);
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"a:p" => {
                        if !current.is_empty() {
                            paragraphs.push(std::mem::take(&mut current));
                        }
                    }
                    b"a:t" => in_text = false,
                    _ => {}
                },
                Ok(_) => {}
                Err(e) => {
                    return Err(ConvertError::MalformedInput(format!(
                        "slide {number} is not valid XML: {e}"
                    )));
                }
            }
        }
        Ok(paragraphs)
    }
}

impl RenderStrategy for PptxStrategy {
    fn name(&self) -> &'static str {
        "pptx"
    }

    fn formats(&self) -> &'static [InputFormat] {
        &[InputFormat::Pptx]
    }

    fn render(&self, input: &[u8], options: &RenderOptions) -> Result<Vec<u8>, ConvertError> {
        let mut archive = ZipArchive::new(Cursor::new(input))
            .map_err(|e| ConvertError::MalformedInput(format!("invalid PPTX archive: {e}")))?;
        let parts = Self::slide_parts(&archive);
        if parts.is_empty() {
            return Err(ConvertError::MalformedInput(
                "PPTX contains no slides".to_string(),
            ));
        }

        let mut pager = LinePager::new(PageFont::Helvetica, options.font_size, options);
        for (i, (number, part)) in parts.iter().enumerate() {
            let mut xml = String::new();
            archive
                .by_name(part)
                .map_err(|e| {
                    ConvertError::MalformedInput(format!("slide {number} is unreadable: {e}"))
                })?
                .read_to_string(&mut xml)
                .map_err(|e| {
                    ConvertError::MalformedInput(format!("slide {number} is unreadable: {e}"))
                })?;

            if i > 0 {
                pager.push_line("");
            }
            pager.push_line(&format!("Slide {number}"));
            for paragraph in Self::slide_paragraphs(*number, &xml)? {
                pager.push_line(&paragraph);
            }
        }
        pager.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use zip::write::{FileOptions, ZipWriter};

    fn pptx_with_slides(slides: &[(&str, &str)]) -> Vec<u8> {
        let options: FileOptions<()> = FileOptions::default();
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, xml) in slides {
            writer.start_file(*name, options).unwrap();
            writer.write_all(xml.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    fn slide_xml(text: &str) -> String {
        format!("<p:sld><p:txBody><a:p><a:r><a:t>{text}</a:t></a:r></a:p></p:txBody></p:sld>")
    }

    #[test]
    fn test_slides_sort_numerically_not_lexically() {
        let pptx = pptx_with_slides(&[
            ("ppt/slides/slide10.xml", &slide_xml("tenth")),
            ("ppt/slides/slide2.xml", &slide_xml("second")),
        ]);
        let archive = ZipArchive::new(Cursor::new(pptx.as_slice())).unwrap();
        let parts = PptxStrategy::slide_parts(&archive);
        assert_eq!(
            parts,
            vec![
                (2, "ppt/slides/slide2.xml".to_string()),
                (10, "ppt/slides/slide10.xml".to_string()),
            ]
        );
    }

    #[test]
    fn test_slide_text_appears_under_heading() {
        let pptx = pptx_with_slides(&[("ppt/slides/slide1.xml", &slide_xml("title text"))]);
        let pdf = PptxStrategy.render(&pptx, &RenderOptions::default()).unwrap();
        let doc = lopdf::Document::load_mem(&pdf).unwrap();
        let text = doc.extract_text(&[1]).unwrap();
        let heading = text.find("Slide 1").unwrap();
        let body = text.find("title text").unwrap();
        assert!(heading < body);
    }

    #[test]
    fn test_broken_slide_error_names_the_slide() {
        let pptx = pptx_with_slides(&[
            ("ppt/slides/slide1.xml", &slide_xml("fine")),
            ("ppt/slides/slide2.xml", "<p:sld><unclosed></p:sld>"),
        ]);
        let err = PptxStrategy
            .render(&pptx, &RenderOptions::default())
            .unwrap_err();
        match err {
            ConvertError::MalformedInput(msg) => assert!(msg.contains("slide 2"), "{msg}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_no_slides_is_malformed() {
        let pptx = pptx_with_slides(&[("ppt/presentation.xml", "<p:presentation/>")]);
        let err = PptxStrategy
            .render(&pptx, &RenderOptions::default())
            .unwrap_err();
        assert!(matches!(err, ConvertError::MalformedInput(_)));
    }
}
