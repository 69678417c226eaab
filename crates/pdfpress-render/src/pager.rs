//! Low-level PDF assembly on top of `lopdf`.
//!
//! Two builders live here: [`LinePager`], which lays text out line by line
//! with automatic page breaks, and [`jpeg_page`], which embeds a JPEG as a
//! single full-page image. Both use only standard-14 fonts and core PDF
//! features, so no font files ship with the crate.

use crate::options::RenderOptions;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use pdfpress_core::ConvertError;

/// Standard-14 fonts the pager can write with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFont {
    /// Proportional body text.
    Helvetica,
    /// Monospaced, used for tabular output where column padding must hold.
    Courier,
}

impl PageFont {
    const fn base_font(self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::Courier => "Courier",
        }
    }

    /// Approximate advance width of one glyph as a fraction of the font
    /// size. Exact for Courier; a safe upper bound for Helvetica.
    const fn glyph_width(self) -> f32 {
        match self {
            Self::Helvetica => 0.55,
            Self::Courier => 0.6,
        }
    }
}

/// Writes lines of text into an auto-paginating PDF document.
///
/// Lines wider than the printable area are clipped at the right margin
/// rather than wrapped; long unbroken content loses its tail.
pub struct LinePager {
    doc: Document,
    pages_id: ObjectId,
    font_id: ObjectId,
    page_ids: Vec<ObjectId>,
    ops: Vec<Operation>,
    lines_on_page: usize,
    lines_per_page: usize,
    max_chars: usize,
    font_size: f32,
    leading: f32,
    opts: RenderOptions,
}

impl LinePager {
    #[must_use]
    pub fn new(font: PageFont, font_size: f32, opts: &RenderOptions) -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });

        let leading = font_size * opts.leading;
        let lines_per_page = ((opts.content_height() / leading).floor() as usize).max(1);
        let max_chars = ((opts.content_width() / (font_size * font.glyph_width())).floor()
            as usize)
            .max(1);

        Self {
            doc,
            pages_id,
            font_id,
            page_ids: Vec::new(),
            ops: Vec::new(),
            lines_on_page: 0,
            lines_per_page,
            max_chars,
            font_size,
            leading,
            opts: *opts,
        }
    }

    /// How many characters fit on one line before clipping.
    #[inline]
    #[must_use]
    pub const fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Append one line, starting a new page when the current one is full.
    pub fn push_line(&mut self, line: &str) {
        if self.lines_on_page == self.lines_per_page {
            self.flush_page();
        }
        if self.ops.is_empty() {
            let top = self.opts.page_height - self.opts.margin - self.font_size;
            self.ops.push(Operation::new("BT", vec![]));
            self.ops.push(Operation::new(
                "Tf",
                vec!["F1".into(), self.font_size.into()],
            ));
            self.ops
                .push(Operation::new("Td", vec![self.opts.margin.into(), top.into()]));
        } else {
            // Relative move down one line from the previous baseline.
            self.ops
                .push(Operation::new("Td", vec![0.into(), (-self.leading).into()]));
        }
        let clipped = clip_chars(line, self.max_chars);
        if !clipped.is_empty() {
            self.ops.push(Operation::new(
                "Tj",
                vec![Object::string_literal(to_winansi(clipped))],
            ));
        }
        self.lines_on_page += 1;
    }

    /// Append every line of `text` in order.
    pub fn push_text(&mut self, text: &str) {
        for line in text.lines() {
            self.push_line(line);
        }
    }

    fn flush_page(&mut self) {
        let mut ops = std::mem::take(&mut self.ops);
        if !ops.is_empty() {
            ops.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations: ops };
        let encoded = content.encode().unwrap_or_default();
        let content_id = self
            .doc
            .add_object(Stream::new(dictionary! {}, encoded));
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                self.opts.page_width.into(),
                self.opts.page_height.into(),
            ],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => self.font_id },
            },
        });
        self.page_ids.push(page_id);
        self.lines_on_page = 0;
    }

    /// Finish the document and return its bytes. An empty pager still
    /// yields a valid one-page PDF.
    pub fn finish(mut self) -> Result<Vec<u8>, ConvertError> {
        if !self.ops.is_empty() || self.page_ids.is_empty() {
            self.flush_page();
        }
        finish_document(self.doc, self.pages_id, self.page_ids)
    }
}

/// Build a single-page PDF that shows one JPEG scaled to fit the printable
/// area, preserving aspect ratio and centered on the page.
pub fn jpeg_page(
    jpeg: &[u8],
    pixel_width: u32,
    pixel_height: u32,
    opts: &RenderOptions,
) -> Result<Vec<u8>, ConvertError> {
    if pixel_width == 0 || pixel_height == 0 {
        return Err(ConvertError::MalformedInput(
            "image has zero width or height".to_string(),
        ));
    }

    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(pixel_width),
            "Height" => i64::from(pixel_height),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        jpeg.to_vec(),
    ));

    // Fit inside the printable area, preserving aspect ratio.
    let scale = (opts.content_width() / pixel_width as f32)
        .min(opts.content_height() / pixel_height as f32);
    let draw_w = pixel_width as f32 * scale;
    let draw_h = pixel_height as f32 * scale;
    let x = opts.margin + (opts.content_width() - draw_w) / 2.0;
    let y = opts.margin + (opts.content_height() - draw_h) / 2.0;

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    draw_w.into(),
                    0.into(),
                    0.into(),
                    draw_h.into(),
                    x.into(),
                    y.into(),
                ],
            ),
            Operation::new("Do", vec!["Im0".into()]),
            Operation::new("Q", vec![]),
        ],
    };
    let encoded = content.encode().unwrap_or_default();
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![
            0.into(),
            0.into(),
            opts.page_width.into(),
            opts.page_height.into(),
        ],
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! { "Im0" => image_id },
        },
    });

    finish_document(doc, pages_id, vec![page_id])
}

fn finish_document(
    mut doc: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
) -> Result<Vec<u8>, ConvertError> {
    let count = page_ids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.into_iter().map(Object::Reference).collect::<Vec<_>>(),
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    // No doc.compress(): the image path stores DCTDecode streams that must
    // not be re-filtered.
    let mut buf = Vec::new();
    doc.save_to(&mut buf)
        .map_err(|e| ConvertError::RenderFailure(format!("failed to write PDF: {e}")))?;
    Ok(buf)
}

/// Truncate to at most `max_chars` characters on a char boundary.
fn clip_chars(line: &str, max_chars: usize) -> &str {
    match line.char_indices().nth(max_chars) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}

/// Encode text as WinAnsi (CP-1252) bytes. Characters outside the code
/// page become `?`.
fn to_winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{0000}'..='\u{007e}' => c as u8,
            '\u{00a0}'..='\u{00ff}' => c as u8,
            '\u{20ac}' => 0x80,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2026}' => 0x85,
            _ => b'?',
        })
        .collect()
}
