//! Plain text rendering.

use crate::options::RenderOptions;
use crate::pager::{LinePager, PageFont};
use crate::traits::RenderStrategy;
use pdfpress_core::{ConvertError, InputFormat};

/// Renders `.txt` uploads line by line in the body font.
///
/// Input is decoded as UTF-8 with replacement, so arbitrary bytes never
/// fail; they just degrade to placeholder glyphs.
pub struct TextStrategy;

impl RenderStrategy for TextStrategy {
    fn name(&self) -> &'static str {
        "text"
    }

    fn formats(&self) -> &'static [InputFormat] {
        &[InputFormat::Txt]
    }

    fn render(&self, input: &[u8], options: &RenderOptions) -> Result<Vec<u8>, ConvertError> {
        let text = String::from_utf8_lossy(input).replace('\t', "    ");
        let mut pager = LinePager::new(PageFont::Helvetica, options.font_size, options);
        pager.push_text(&text);
        pager.finish()
    }
}
