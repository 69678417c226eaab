//! Markdown rendering.

use crate::html::HtmlStrategy;
use crate::options::RenderOptions;
use crate::traits::RenderStrategy;
use pdfpress_core::{ConvertError, InputFormat};
use pulldown_cmark::{html, Options, Parser};

/// Renders `.md` uploads by converting to HTML and printing that through
/// the browser-backed HTML path, so Markdown gets the same typography and
/// pagination as HTML does.
pub struct MarkdownStrategy;

impl MarkdownStrategy {
    /// CommonMark (plus tables and strikethrough) to a standalone HTML page.
    pub(crate) fn to_html(input: &[u8]) -> String {
        let source = String::from_utf8_lossy(input);
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        let parser = Parser::new_ext(&source, options);
        let mut body = String::new();
        html::push_html(&mut body, parser);
        format!(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"></head>\n<body>\n{body}</body>\n</html>\n"
        )
    }
}

impl RenderStrategy for MarkdownStrategy {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn formats(&self) -> &'static [InputFormat] {
        &[InputFormat::Md]
    }

    fn render(&self, input: &[u8], _options: &RenderOptions) -> Result<Vec<u8>, ConvertError> {
        HtmlStrategy::print(&Self::to_html(input))
    }
}
