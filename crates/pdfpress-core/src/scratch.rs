//! On-disk scratch storage for in-flight conversions.
//!
//! Every request gets a fresh [`RequestId`], and every artifact name embeds
//! it, so concurrent uploads of identically named files never collide. An
//! artifact that goes out of scope without an explicit removal hands its
//! path to the [`CleanupScheduler`], keeping the exactly-once release
//! guarantee on success, failure, and panic paths alike.

use crate::cleanup::CleanupScheduler;
use crate::error::Result;
use log::warn;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

/// Unique identifier for one conversion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// What an artifact holds: the uploaded bytes or the rendered PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactRole {
    Input,
    Output,
}

impl ArtifactRole {
    /// File name suffix for this role.
    #[must_use]
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output.pdf",
        }
    }
}

/// Outcome of a removal attempt. Removing an artifact that is already gone
/// is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Removed,
    AlreadyGone,
}

/// A file owned by one request, released exactly once.
///
/// Dropping an artifact that was not removed explicitly schedules its path
/// with the cleanup worker. The `released` flag makes the release
/// idempotent: whichever of explicit removal and drop happens first wins,
/// and the other becomes a no-op.
#[derive(Debug)]
pub struct ScratchArtifact {
    path: PathBuf,
    role: ArtifactRole,
    cleanup: CleanupScheduler,
    released: AtomicBool,
}

impl ScratchArtifact {
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    #[must_use]
    pub const fn role(&self) -> ArtifactRole {
        self.role
    }

    /// Claim the release of this artifact. Returns `true` for the first
    /// caller and `false` afterwards.
    fn claim_release(&self) -> bool {
        !self.released.swap(true, Ordering::AcqRel)
    }
}

impl Drop for ScratchArtifact {
    fn drop(&mut self) {
        if self.claim_release() {
            self.cleanup.schedule(self.path.clone());
        }
    }
}

/// Scratch directory plus the cleanup worker that empties it.
#[derive(Debug, Clone)]
pub struct ScratchStore {
    root: PathBuf,
    cleanup: CleanupScheduler,
}

impl ScratchStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>, cleanup: CleanupScheduler) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root, cleanup })
    }

    /// Open a store under the system temp directory.
    pub fn in_temp_dir(cleanup: CleanupScheduler) -> Result<Self> {
        Self::new(std::env::temp_dir().join("pdfpress"), cleanup)
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    #[must_use]
    pub fn cleanup(&self) -> &CleanupScheduler {
        &self.cleanup
    }

    /// Persist `bytes` as the artifact for `request` in the given role.
    pub fn write(
        &self,
        request: RequestId,
        role: ArtifactRole,
        bytes: &[u8],
    ) -> Result<ScratchArtifact> {
        let path = self.root.join(format!("{request}.{}", role.suffix()));
        std::fs::write(&path, bytes)?;
        Ok(ScratchArtifact {
            path,
            role,
            cleanup: self.cleanup.clone(),
            released: AtomicBool::new(false),
        })
    }

    /// Read an artifact back from disk.
    pub fn read(&self, artifact: &ScratchArtifact) -> Result<Vec<u8>> {
        Ok(std::fs::read(&artifact.path)?)
    }

    /// Remove an artifact immediately.
    ///
    /// A missing file reports [`Removal::AlreadyGone`]; any other failure is
    /// logged and treated the same way, since the artifact was claimed and
    /// the worker keeps best-effort semantics.
    pub fn remove(&self, artifact: &ScratchArtifact) -> Removal {
        if !artifact.claim_release() {
            return Removal::AlreadyGone;
        }
        match std::fs::remove_file(&artifact.path) {
            Ok(()) => Removal::Removed,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Removal::AlreadyGone,
            Err(e) => {
                warn!(
                    "failed to remove scratch artifact {}: {e}",
                    artifact.path.display()
                );
                Removal::AlreadyGone
            }
        }
    }
}
