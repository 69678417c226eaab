//! Core types for the pdfpress conversion service.
//!
//! This crate defines the pieces every other pdfpress crate builds on:
//!
//! - [`InputFormat`]: the accepted upload formats and extension dispatch
//! - [`ConvertError`]: the error taxonomy shared by renderers and servers
//! - [`ScratchStore`] / [`ScratchArtifact`]: per-request on-disk staging
//! - [`CleanupScheduler`]: deferred, best-effort artifact removal
//! - [`PipelineState`] / [`UploadedFile`] / [`Converted`]: request lifecycle
//!
//! It contains no rendering logic and no I/O beyond the scratch directory.

pub mod cleanup;
pub mod error;
pub mod format;
pub mod scratch;
pub mod state;

pub use cleanup::CleanupScheduler;
pub use error::{ConvertError, ErrorKind, Result};
pub use format::InputFormat;
pub use scratch::{ArtifactRole, Removal, RequestId, ScratchArtifact, ScratchStore};
pub use state::{Converted, PipelineState, UploadedFile};
