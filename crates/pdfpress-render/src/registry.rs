//! Format-to-strategy dispatch table.

use crate::csv::CsvStrategy;
use crate::docx::DocxStrategy;
use crate::html::HtmlStrategy;
use crate::json::JsonStrategy;
use crate::markdown::MarkdownStrategy;
use crate::pptx::PptxStrategy;
use crate::raster::RasterStrategy;
use crate::text::TextStrategy;
use crate::traits::RenderStrategy;
use crate::xlsx::XlsxStrategy;
use crate::xml::XmlStrategy;
use pdfpress_core::InputFormat;
use std::collections::HashMap;
use std::sync::Arc;

/// Maps every accepted input format to the strategy that renders it.
///
/// Formats sharing a strategy (JPEG and PNG, say) share one instance.
/// Registering a strategy for a format that already has one replaces the
/// earlier entry.
pub struct StrategyRegistry {
    strategies: HashMap<InputFormat, Arc<dyn RenderStrategy>>,
}

impl StrategyRegistry {
    /// An empty registry with no formats wired up.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Register `strategy` for every format it reports.
    pub fn register(&mut self, strategy: Arc<dyn RenderStrategy>) {
        for format in strategy.formats() {
            self.strategies.insert(*format, Arc::clone(&strategy));
        }
    }

    /// Look up the strategy for `format`, if any is registered.
    #[must_use]
    pub fn resolve(&self, format: InputFormat) -> Option<Arc<dyn RenderStrategy>> {
        self.strategies.get(&format).cloned()
    }

    /// Formats the registry can currently dispatch.
    #[must_use]
    pub fn supported_formats(&self) -> Vec<InputFormat> {
        let mut formats: Vec<_> = self.strategies.keys().copied().collect();
        formats.sort_by_key(|f| f.to_string());
        formats
    }
}

impl Default for StrategyRegistry {
    /// The full production wiring: every strategy this crate ships.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(TextStrategy));
        registry.register(Arc::new(JsonStrategy));
        registry.register(Arc::new(XmlStrategy));
        registry.register(Arc::new(CsvStrategy));
        registry.register(Arc::new(XlsxStrategy));
        registry.register(Arc::new(DocxStrategy));
        registry.register(Arc::new(PptxStrategy));
        registry.register(Arc::new(RasterStrategy));
        registry.register(Arc::new(HtmlStrategy));
        registry.register(Arc::new(MarkdownStrategy));
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_covers_every_format() {
        let registry = StrategyRegistry::default();
        for format in InputFormat::all() {
            assert!(
                registry.resolve(*format).is_some(),
                "no strategy registered for {format}"
            );
        }
    }

    #[test]
    fn test_jpeg_and_png_share_one_strategy() {
        let registry = StrategyRegistry::default();
        let jpeg = registry.resolve(InputFormat::Jpeg).unwrap();
        let png = registry.resolve(InputFormat::Png).unwrap();
        assert!(Arc::ptr_eq(&jpeg, &png));
    }

    #[test]
    fn test_empty_registry_resolves_nothing() {
        let registry = StrategyRegistry::empty();
        assert!(registry.resolve(InputFormat::Txt).is_none());
        assert!(registry.supported_formats().is_empty());
    }

    #[test]
    fn test_registration_replaces_existing_entry() {
        let mut registry = StrategyRegistry::default();
        let replacement: Arc<dyn RenderStrategy> = Arc::new(TextStrategy);
        registry.register(Arc::clone(&replacement));
        let resolved = registry.resolve(InputFormat::Txt).unwrap();
        assert!(Arc::ptr_eq(&resolved, &replacement));
    }
}
