//! Input format types for the conversion pipeline
//!
//! This module defines the `InputFormat` enum covering every upload type
//! the service accepts, plus extension-based detection. Detection is
//! extension-only by contract: no MIME sniffing, no magic bytes.

use serde::{Deserialize, Serialize};

/// Input document format, declared by the uploaded file's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InputFormat {
    /// Plain text (.txt)
    Txt,
    /// Comma-separated values (.csv)
    Csv,
    /// Microsoft Excel (.xlsx)
    Xlsx,
    /// Microsoft Word (.docx)
    Docx,
    /// Microsoft `PowerPoint` (.pptx)
    Pptx,
    /// JPEG image (.jpg, .jpeg)
    Jpeg,
    /// PNG image (.png)
    Png,
    /// HTML document (.html, .htm)
    Html,
    /// Markdown document (.md, .markdown)
    Md,
    /// JSON document (.json)
    Json,
    /// XML document (.xml)
    Xml,
}

impl InputFormat {
    /// Detect format from a bare file extension (without the dot).
    ///
    /// Matching is case-insensitive and exact. Unknown extensions return
    /// `None`; that is an expected outcome, not an error.
    #[inline]
    #[must_use = "detects format from file extension"]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "txt" => Some(Self::Txt),
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Xlsx),
            "docx" => Some(Self::Docx),
            "pptx" => Some(Self::Pptx),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "html" | "htm" => Some(Self::Html),
            "md" | "markdown" => Some(Self::Md),
            "json" => Some(Self::Json),
            "xml" => Some(Self::Xml),
            _ => None,
        }
    }

    /// Detect format from a full file name (`report.final.XLSX` -> `Xlsx`).
    ///
    /// Names without a dot, or with an empty suffix, yield `None`.
    #[inline]
    #[must_use = "detects format from file name"]
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        if ext.is_empty() {
            return None;
        }
        Self::from_extension(ext)
    }

    /// File extensions associated with this format.
    #[inline]
    #[must_use = "returns file extensions for this format"]
    pub const fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Txt => &["txt"],
            Self::Csv => &["csv"],
            Self::Xlsx => &["xlsx"],
            Self::Docx => &["docx"],
            Self::Pptx => &["pptx"],
            Self::Jpeg => &["jpg", "jpeg"],
            Self::Png => &["png"],
            Self::Html => &["html", "htm"],
            Self::Md => &["md", "markdown"],
            Self::Json => &["json"],
            Self::Xml => &["xml"],
        }
    }

    /// All supported formats, in declaration order.
    #[inline]
    #[must_use = "returns the supported format set"]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Txt,
            Self::Csv,
            Self::Xlsx,
            Self::Docx,
            Self::Pptx,
            Self::Jpeg,
            Self::Png,
            Self::Html,
            Self::Md,
            Self::Json,
            Self::Xml,
        ]
    }

    /// Text-like formats rendered line-by-line from their textual form.
    #[inline]
    #[must_use = "returns whether this is a text-like format"]
    pub const fn is_text_like(&self) -> bool {
        matches!(self, Self::Txt | Self::Json | Self::Xml)
    }

    /// Tabular formats rendered as an aligned rows-by-columns table.
    #[inline]
    #[must_use = "returns whether this is a tabular format"]
    pub const fn is_tabular(&self) -> bool {
        matches!(self, Self::Csv | Self::Xlsx)
    }

    /// Word-processor document formats.
    #[inline]
    #[must_use = "returns whether this is a document format"]
    pub const fn is_document(&self) -> bool {
        matches!(self, Self::Docx)
    }

    /// Presentation formats.
    #[inline]
    #[must_use = "returns whether this is a slides format"]
    pub const fn is_slides(&self) -> bool {
        matches!(self, Self::Pptx)
    }

    /// Raster image formats.
    #[inline]
    #[must_use = "returns whether this is an image format"]
    pub const fn is_image(&self) -> bool {
        matches!(self, Self::Jpeg | Self::Png)
    }

    /// Markup formats rendered through the layout engine.
    #[inline]
    #[must_use = "returns whether this is a markup format"]
    pub const fn is_markup(&self) -> bool {
        matches!(self, Self::Html | Self::Md)
    }
}

impl std::fmt::Display for InputFormat {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Txt => "TXT",
            Self::Csv => "CSV",
            Self::Xlsx => "XLSX",
            Self::Docx => "DOCX",
            Self::Pptx => "PPTX",
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
            Self::Html => "HTML",
            Self::Md => "MD",
            Self::Json => "JSON",
            Self::Xml => "XML",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TXT" => Ok(Self::Txt),
            "CSV" => Ok(Self::Csv),
            "XLSX" => Ok(Self::Xlsx),
            "DOCX" => Ok(Self::Docx),
            "PPTX" => Ok(Self::Pptx),
            "JPEG" | "JPG" => Ok(Self::Jpeg),
            "PNG" => Ok(Self::Png),
            "HTML" | "HTM" => Ok(Self::Html),
            "MD" | "MARKDOWN" => Ok(Self::Md),
            "JSON" => Ok(Self::Json),
            "XML" => Ok(Self::Xml),
            _ => Err(format!("unknown input format: '{s}'")),
        }
    }
}
