//! Raster image rendering.

use crate::options::RenderOptions;
use crate::pager::jpeg_page;
use crate::traits::RenderStrategy;
use image::codecs::jpeg::JpegEncoder;
use pdfpress_core::{ConvertError, InputFormat};

const JPEG_QUALITY: u8 = 90;

/// Renders JPEG and PNG uploads as a single-page PDF.
///
/// The image is converted to 3-channel RGB (flattening any alpha) and
/// embedded as a JPEG stream, then scaled to fit the printable area.
pub struct RasterStrategy;

impl RenderStrategy for RasterStrategy {
    fn name(&self) -> &'static str {
        "image"
    }

    fn formats(&self) -> &'static [InputFormat] {
        &[InputFormat::Jpeg, InputFormat::Png]
    }

    fn render(&self, input: &[u8], options: &RenderOptions) -> Result<Vec<u8>, ConvertError> {
        let decoded = image::load_from_memory(input)
            .map_err(|e| ConvertError::MalformedInput(format!("invalid image: {e}")))?;
        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();

        let mut jpeg = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY);
        rgb.write_with_encoder(encoder)
            .map_err(|e| ConvertError::RenderFailure(format!("failed to encode image: {e}")))?;

        jpeg_page(&jpeg, width, height, options)
    }
}
