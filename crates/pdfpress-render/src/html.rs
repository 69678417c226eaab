//! HTML rendering through a headless browser.
//!
//! Faithful HTML and CSS layout needs a real engine, so this strategy
//! drives headless Chromium: the markup is loaded as a `data:` URL and
//! printed to PDF. Pagination and page geometry are the browser's.

use crate::options::RenderOptions;
use crate::traits::RenderStrategy;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use headless_chrome::{Browser, LaunchOptions};
use pdfpress_core::{ConvertError, InputFormat};

/// Renders `.html` uploads with full layout via headless Chromium.
///
/// Requires a Chrome or Chromium binary on the host; without one every
/// conversion fails with a render failure.
pub struct HtmlStrategy;

impl HtmlStrategy {
    /// Encode markup as a `data:` URL the browser can navigate to.
    fn data_url(html: &str) -> String {
        format!("data:text/html;base64,{}", STANDARD.encode(html))
    }

    /// Print `html` to PDF in a fresh browser tab.
    pub(crate) fn print(html: &str) -> Result<Vec<u8>, ConvertError> {
        let launch = LaunchOptions::default_builder()
            .headless(true)
            .build()
            .map_err(browser_error)?;
        let browser = Browser::new(launch).map_err(browser_error)?;
        let tab = browser.new_tab().map_err(browser_error)?;
        tab.navigate_to(&Self::data_url(html))
            .map_err(browser_error)?;
        tab.wait_until_navigated().map_err(browser_error)?;
        tab.print_to_pdf(None).map_err(browser_error)
    }
}

fn browser_error(e: impl std::fmt::Display) -> ConvertError {
    ConvertError::RenderFailure(format!("browser rendering failed: {e}"))
}

impl RenderStrategy for HtmlStrategy {
    fn name(&self) -> &'static str {
        "html"
    }

    fn formats(&self) -> &'static [InputFormat] {
        &[InputFormat::Html]
    }

    fn render(&self, input: &[u8], _options: &RenderOptions) -> Result<Vec<u8>, ConvertError> {
        let html = String::from_utf8_lossy(input);
        Self::print(&html)
    }
}
