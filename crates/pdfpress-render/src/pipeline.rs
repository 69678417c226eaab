//! The conversion pipeline: persist, dispatch, render, deliver.

use crate::options::RenderOptions;
use crate::registry::StrategyRegistry;
use log::{debug, info, warn};
use pdfpress_core::{
    ArtifactRole, CleanupScheduler, ConvertError, Converted, PipelineState, RequestId,
    ScratchStore, UploadedFile,
};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

/// Orchestrates one conversion request from upload to PDF.
///
/// Each request moves `Received → Persisted → Dispatched → Rendered →
/// Delivered`, exiting early to `Rejected` for unknown formats or `Failed`
/// on any fault. The pipeline holds no per-request state; the registry and
/// store are read-only across requests, so one instance serves concurrent
/// callers.
pub struct ConversionPipeline {
    registry: StrategyRegistry,
    store: ScratchStore,
    options: RenderOptions,
}

impl ConversionPipeline {
    #[must_use]
    pub fn new(registry: StrategyRegistry, store: ScratchStore, options: RenderOptions) -> Self {
        Self {
            registry,
            store,
            options,
        }
    }

    /// Full production wiring with scratch space under the system temp dir.
    pub fn with_defaults() -> pdfpress_core::Result<Self> {
        let store = ScratchStore::in_temp_dir(CleanupScheduler::new())?;
        Ok(Self::new(
            StrategyRegistry::default(),
            store,
            RenderOptions::default(),
        ))
    }

    #[inline]
    #[must_use]
    pub fn store(&self) -> &ScratchStore {
        &self.store
    }

    #[inline]
    #[must_use]
    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    /// Convert one uploaded file to PDF.
    ///
    /// The input is persisted to scratch before dispatch so strategies can
    /// assume stable on-disk bytes. On every exit path the input artifact
    /// is released via its drop; the output artifact travels inside the
    /// returned [`Converted`] and is released when that is dropped.
    ///
    /// # Errors
    ///
    /// [`ConvertError::UnsupportedFormat`] when no strategy accepts the
    /// file's extension; [`ConvertError::MalformedInput`] or
    /// [`ConvertError::RenderFailure`] from the strategy;
    /// [`ConvertError::Storage`] when scratch I/O fails. A panicking
    /// strategy surfaces as a render failure, never as a propagated panic.
    pub fn convert(&self, upload: &UploadedFile) -> Result<Converted, ConvertError> {
        let request = RequestId::new();
        let started = Instant::now();
        debug!(
            "request {request}: {} ({} bytes), state {}",
            upload.name,
            upload.content.len(),
            PipelineState::Received
        );

        let result = self.convert_inner(request, upload, started);
        match &result {
            Ok(converted) => info!(
                "request {request}: {} -> PDF ({} bytes) in {:?}, state {}",
                converted.format,
                converted.pdf.len(),
                converted.latency,
                PipelineState::Delivered
            ),
            Err(ConvertError::UnsupportedFormat(what)) => {
                debug!(
                    "request {request}: unsupported format {what}, state {}",
                    PipelineState::Rejected
                );
            }
            Err(e) => warn!("request {request}: {e}, state {}", PipelineState::Failed),
        }
        result
    }

    fn convert_inner(
        &self,
        request: RequestId,
        upload: &UploadedFile,
        started: Instant,
    ) -> Result<Converted, ConvertError> {
        let input = self
            .store
            .write(request, ArtifactRole::Input, &upload.content)?;
        debug!("request {request}: state {}", PipelineState::Persisted);

        let strategy = upload
            .format()
            .and_then(|format| self.registry.resolve(format).map(|s| (format, s)));
        let Some((format, strategy)) = strategy else {
            return Err(ConvertError::UnsupportedFormat(extension_of(&upload.name)));
        };
        debug!(
            "request {request}: strategy {}, state {}",
            strategy.name(),
            PipelineState::Dispatched
        );

        let bytes = self.store.read(&input)?;
        let options = self.options;
        let pdf = catch_unwind(AssertUnwindSafe(|| strategy.render(&bytes, &options)))
            .unwrap_or_else(|_| {
                Err(ConvertError::RenderFailure(format!(
                    "strategy {} panicked",
                    strategy.name()
                )))
            })?;
        debug!("request {request}: state {}", PipelineState::Rendered);

        let output = self.store.write(request, ArtifactRole::Output, &pdf)?;
        Ok(Converted {
            pdf,
            format,
            latency: started.elapsed(),
            output,
        })
    }
}

/// The extension of `name` for error messages, or the whole name when it
/// has none.
fn extension_of(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => format!(".{}", ext.to_ascii_lowercase()),
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::Document;
    use pdfpress_core::InputFormat;
    use std::sync::Arc;

    fn pipeline() -> (tempfile::TempDir, ConversionPipeline) {
        let dir = tempfile::tempdir().unwrap();
        let store = ScratchStore::new(dir.path(), CleanupScheduler::new()).unwrap();
        let pipeline =
            ConversionPipeline::new(StrategyRegistry::default(), store, RenderOptions::default());
        (dir, pipeline)
    }

    fn scratch_is_empty(dir: &std::path::Path) -> bool {
        std::fs::read_dir(dir).unwrap().next().is_none()
    }

    #[test]
    fn test_text_happy_path() {
        let (_dir, pipeline) = pipeline();
        let upload = UploadedFile::new("notes.txt", b"hello pipeline".to_vec());
        let converted = pipeline.convert(&upload).unwrap();
        assert_eq!(converted.format, InputFormat::Txt);
        let doc = Document::load_mem(&converted.pdf).unwrap();
        assert!(doc.extract_text(&[1]).unwrap().contains("hello pipeline"));
    }

    #[test]
    fn test_repeated_conversion_is_deterministic() {
        let (_dir, pipeline) = pipeline();
        let upload = UploadedFile::new("notes.txt", b"same bytes in, same pages out".to_vec());
        let first = pipeline.convert(&upload).unwrap();
        let second = pipeline.convert(&upload).unwrap();

        let first = Document::load_mem(&first.pdf).unwrap();
        let second = Document::load_mem(&second.pdf).unwrap();
        assert_eq!(first.get_pages().len(), second.get_pages().len());
        assert_eq!(
            first.extract_text(&[1]).unwrap(),
            second.extract_text(&[1]).unwrap()
        );
    }

    #[test]
    fn test_unknown_extension_is_rejected_with_extension_name() {
        let (_dir, pipeline) = pipeline();
        let upload = UploadedFile::new("payload.EXE", b"MZ".to_vec());
        match pipeline.convert(&upload).unwrap_err() {
            ConvertError::UnsupportedFormat(what) => assert_eq!(what, ".exe"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_extensionless_name_is_rejected() {
        let (_dir, pipeline) = pipeline();
        let upload = UploadedFile::new("README", b"text".to_vec());
        assert!(matches!(
            pipeline.convert(&upload).unwrap_err(),
            ConvertError::UnsupportedFormat(_)
        ));
    }

    #[test]
    fn test_scratch_empty_after_success() {
        let (dir, pipeline) = pipeline();
        let upload = UploadedFile::new("notes.txt", b"content".to_vec());
        let converted = pipeline.convert(&upload).unwrap();
        drop(converted);
        pipeline.store().cleanup().flush();
        assert!(scratch_is_empty(dir.path()));
    }

    #[test]
    fn test_scratch_empty_after_rejection() {
        let (dir, pipeline) = pipeline();
        let upload = UploadedFile::new("payload.exe", b"MZ".to_vec());
        let _ = pipeline.convert(&upload);
        pipeline.store().cleanup().flush();
        assert!(scratch_is_empty(dir.path()));
    }

    #[test]
    fn test_scratch_empty_after_strategy_failure() {
        let (dir, pipeline) = pipeline();
        let upload = UploadedFile::new("data.json", b"{broken".to_vec());
        assert!(matches!(
            pipeline.convert(&upload).unwrap_err(),
            ConvertError::MalformedInput(_)
        ));
        pipeline.store().cleanup().flush();
        assert!(scratch_is_empty(dir.path()));
    }

    #[test]
    fn test_output_survives_until_result_dropped() {
        let (_dir, pipeline) = pipeline();
        let upload = UploadedFile::new("notes.txt", b"keep me".to_vec());
        let converted = pipeline.convert(&upload).unwrap();
        pipeline.store().cleanup().flush();
        assert!(converted.output.path().exists());
    }

    #[test]
    fn test_panicking_strategy_becomes_render_failure() {
        struct PanickingStrategy;
        impl crate::traits::RenderStrategy for PanickingStrategy {
            fn name(&self) -> &'static str {
                "panicking"
            }
            fn formats(&self) -> &'static [InputFormat] {
                &[InputFormat::Txt]
            }
            fn render(
                &self,
                _input: &[u8],
                _options: &RenderOptions,
            ) -> Result<Vec<u8>, ConvertError> {
                panic!("boom");
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let store = ScratchStore::new(dir.path(), CleanupScheduler::new()).unwrap();
        let mut registry = StrategyRegistry::empty();
        registry.register(Arc::new(PanickingStrategy));
        let pipeline = ConversionPipeline::new(registry, store, RenderOptions::default());

        let upload = UploadedFile::new("notes.txt", b"x".to_vec());
        match pipeline.convert(&upload).unwrap_err() {
            ConvertError::RenderFailure(msg) => assert!(msg.contains("panicked")),
            other => panic!("unexpected error: {other}"),
        }
        pipeline.store().cleanup().flush();
        assert!(scratch_is_empty(dir.path()));
    }

    #[test]
    fn test_colliding_upload_names_do_not_cross_delete() {
        let (_dir, pipeline) = pipeline();
        let pipeline = Arc::new(pipeline);
        let mut handles = Vec::new();
        for i in 0..8 {
            let pipeline = Arc::clone(&pipeline);
            handles.push(std::thread::spawn(move || {
                let body = format!("document number {i}");
                let upload = UploadedFile::new("same-name.txt", body.clone().into_bytes());
                let converted = pipeline.convert(&upload).unwrap();
                let doc = Document::load_mem(&converted.pdf).unwrap();
                assert!(doc.extract_text(&[1]).unwrap().contains(&body));
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_extension_of_formats() {
        assert_eq!(extension_of("a.TXT"), ".txt");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("README"), "README");
        assert_eq!(extension_of("trailing."), "trailing.");
    }
}
