//! The strategy trait every renderer implements.

use crate::options::RenderOptions;
use pdfpress_core::{ConvertError, InputFormat};

/// A renderer for one family of input formats.
///
/// Implementations are stateless and shared behind `Arc`, so they must be
/// `Send + Sync`. A strategy receives the raw uploaded bytes and either
/// produces a complete PDF document or a [`ConvertError`] describing why
/// it could not.
pub trait RenderStrategy: Send + Sync {
    /// Short name used in logs, e.g. `"text"` or `"xlsx"`.
    fn name(&self) -> &'static str;

    /// Formats this strategy accepts.
    fn formats(&self) -> &'static [InputFormat];

    /// Render `input` into PDF bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::MalformedInput`] when the bytes do not parse
    /// as the claimed format, and [`ConvertError::RenderFailure`] when PDF
    /// generation itself fails.
    fn render(&self, input: &[u8], options: &RenderOptions) -> Result<Vec<u8>, ConvertError>;
}
