//! JSON rendering.

use crate::options::RenderOptions;
use crate::pager::{LinePager, PageFont};
use crate::traits::RenderStrategy;
use pdfpress_core::{ConvertError, InputFormat};
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use serde::Serialize;

/// Renders `.json` uploads pretty-printed with four-space indentation.
pub struct JsonStrategy;

impl JsonStrategy {
    /// Reformat raw JSON with four-space indentation.
    fn pretty(input: &[u8]) -> Result<String, ConvertError> {
        let value: Value = serde_json::from_slice(input)
            .map_err(|e| ConvertError::MalformedInput(format!("invalid JSON: {e}")))?;
        let mut out = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = Serializer::with_formatter(&mut out, formatter);
        value
            .serialize(&mut ser)
            .map_err(|e| ConvertError::RenderFailure(format!("failed to reserialize JSON: {e}")))?;
        String::from_utf8(out)
            .map_err(|e| ConvertError::RenderFailure(format!("non-UTF-8 JSON output: {e}")))
    }
}

impl RenderStrategy for JsonStrategy {
    fn name(&self) -> &'static str {
        "json"
    }

    fn formats(&self) -> &'static [InputFormat] {
        &[InputFormat::Json]
    }

    fn render(&self, input: &[u8], options: &RenderOptions) -> Result<Vec<u8>, ConvertError> {
        let text = Self::pretty(input)?;
        let mut pager = LinePager::new(PageFont::Courier, options.font_size, options);
        pager.push_text(&text);
        pager.finish()
    }
}
