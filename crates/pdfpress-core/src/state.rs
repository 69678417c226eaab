//! Request lifecycle types shared by the pipeline and its callers.

use crate::format::InputFormat;
use crate::scratch::ScratchArtifact;
use std::time::Duration;

/// Stages a conversion request moves through, in order. `Rejected` and
/// `Failed` are terminal exits; everything else advances toward
/// `Delivered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Upload accepted, nothing persisted yet.
    Received,
    /// Input bytes written to scratch storage.
    Persisted,
    /// A render strategy has been selected for the input format.
    Dispatched,
    /// The strategy produced PDF bytes.
    Rendered,
    /// The PDF has been handed back to the caller.
    Delivered,
    /// No strategy accepts the input format.
    Rejected,
    /// Persisting, reading, or rendering failed.
    Failed,
}

impl PipelineState {
    /// Whether the request can make no further progress.
    #[inline]
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Rejected | Self::Failed)
    }
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Received => "received",
            Self::Persisted => "persisted",
            Self::Dispatched => "dispatched",
            Self::Rendered => "rendered",
            Self::Delivered => "delivered",
            Self::Rejected => "rejected",
            Self::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// A file as it arrived from the caller: the client-supplied name plus the
/// raw bytes. The name is only trusted for its extension.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub content: Vec<u8>,
}

impl UploadedFile {
    #[must_use]
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }

    /// Detect the input format from the file name extension.
    #[must_use]
    pub fn format(&self) -> Option<InputFormat> {
        InputFormat::from_file_name(&self.name)
    }

    /// File name without its final extension, for naming the output.
    #[must_use]
    pub fn stem(&self) -> &str {
        match self.name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => &self.name,
        }
    }
}

/// A finished conversion: the PDF bytes plus what produced them.
///
/// The output artifact rides along so the scratch copy lives as long as the
/// result does; dropping the result schedules its removal.
#[derive(Debug)]
pub struct Converted {
    pub pdf: Vec<u8>,
    pub format: InputFormat,
    pub latency: Duration,
    pub output: ScratchArtifact,
}

impl Converted {
    /// Consume the result, releasing the scratch copy and keeping the bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        let Self { pdf, output, .. } = self;
        drop(output);
        pdf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(PipelineState::Delivered.is_terminal());
        assert!(PipelineState::Rejected.is_terminal());
        assert!(PipelineState::Failed.is_terminal());
        assert!(!PipelineState::Received.is_terminal());
        assert!(!PipelineState::Rendered.is_terminal());
    }

    #[test]
    fn test_uploaded_file_format_detection() {
        let file = UploadedFile::new("report.xlsx", Vec::new());
        assert_eq!(file.format(), Some(InputFormat::Xlsx));

        let file = UploadedFile::new("archive.tar.gz", Vec::new());
        assert_eq!(file.format(), None);
    }

    #[test]
    fn test_uploaded_file_stem() {
        assert_eq!(UploadedFile::new("report.xlsx", Vec::new()).stem(), "report");
        assert_eq!(
            UploadedFile::new("notes.2024.txt", Vec::new()).stem(),
            "notes.2024"
        );
        assert_eq!(UploadedFile::new("Makefile", Vec::new()).stem(), "Makefile");
        assert_eq!(UploadedFile::new(".env", Vec::new()).stem(), ".env");
    }
}
