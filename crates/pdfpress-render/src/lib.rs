//! Render strategies and the conversion pipeline for pdfpress.
//!
//! The crate turns uploaded documents into PDF bytes. Each supported
//! format has a [`RenderStrategy`]; the [`StrategyRegistry`] maps formats
//! to strategies, and the [`ConversionPipeline`] drives one request end to
//! end with guaranteed scratch cleanup.
//!
//! Text-like formats are laid out directly with `lopdf` using standard-14
//! fonts, so no font assets ship with the crate. HTML and Markdown go
//! through headless Chromium for real layout.

pub mod csv;
pub mod docx;
pub mod html;
pub mod json;
pub mod markdown;
pub mod options;
pub mod pager;
pub mod pipeline;
pub mod pptx;
pub mod raster;
pub mod registry;
pub mod table;
pub mod text;
pub mod traits;
pub mod xlsx;
pub mod xml;

pub use options::RenderOptions;
pub use pipeline::ConversionPipeline;
pub use registry::StrategyRegistry;
pub use traits::RenderStrategy;
