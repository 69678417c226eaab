//! Rendering options shared by all strategies.

/// Page geometry and typography for generated PDFs.
///
/// Dimensions are in PDF points (1/72 inch). Defaults are A4 portrait with
/// a 15 mm margin, 12 pt body text and 10 pt tabular text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub font_size: f32,
    pub table_font_size: f32,
    /// Baseline-to-baseline distance as a multiple of the font size.
    pub leading: f32,
}

impl RenderOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            page_width: 595.0,
            page_height: 842.0,
            margin: 42.5,
            font_size: 12.0,
            table_font_size: 10.0,
            leading: 1.35,
        }
    }

    #[must_use]
    pub const fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    #[must_use]
    pub const fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub const fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    #[must_use]
    pub const fn with_table_font_size(mut self, size: f32) -> Self {
        self.table_font_size = size;
        self
    }

    /// Width of the printable area.
    #[inline]
    #[must_use]
    pub const fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Height of the printable area.
    #[inline]
    #[must_use]
    pub const fn content_height(&self) -> f32 {
        self.page_height - 2.0 * self.margin
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_a4() {
        let opts = RenderOptions::default();
        assert_eq!(opts.page_width, 595.0);
        assert_eq!(opts.page_height, 842.0);
    }

    #[test]
    fn test_builder_chain() {
        let opts = RenderOptions::new()
            .with_page_size(612.0, 792.0)
            .with_margin(36.0)
            .with_font_size(11.0);
        assert_eq!(opts.page_width, 612.0);
        assert_eq!(opts.margin, 36.0);
        assert_eq!(opts.font_size, 11.0);
        assert_eq!(opts.content_width(), 612.0 - 72.0);
    }
}
