//! Deferred, best-effort removal of scratch artifacts.
//!
//! Deletion runs on a worker thread decoupled from request handling, so a
//! slow or failing delete can never delay or fail a response. Each path is
//! submitted at most once (ownership transfer through the channel), a
//! missing file counts as success, and failures are logged, never raised.

use log::{debug, warn};
use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::thread;

enum Job {
    Remove(PathBuf),
    Flush(Sender<()>),
}

/// Handle to the cleanup worker. Cheap to clone; all clones feed the same
/// queue. The worker drains remaining jobs and exits when the last handle
/// is dropped.
#[derive(Clone)]
pub struct CleanupScheduler {
    tx: Sender<Job>,
}

impl CleanupScheduler {
    /// Spawn the worker thread and return a handle to it.
    #[must_use = "the scheduler must be kept alive for cleanup to run"]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel::<Job>();
        thread::spawn(move || {
            while let Ok(job) = rx.recv() {
                match job {
                    Job::Remove(path) => remove_best_effort(&path),
                    Job::Flush(ack) => {
                        let _ = ack.send(());
                    }
                }
            }
        });
        Self { tx }
    }

    /// Queue a path for removal after the current response is out of the way.
    pub fn schedule(&self, path: PathBuf) {
        if let Err(e) = self.tx.send(Job::Remove(path)) {
            // Worker already gone (process shutdown); fall back to inline removal.
            if let Job::Remove(path) = e.0 {
                remove_best_effort(&path);
            }
        }
    }

    /// Block until every job queued before this call has been processed.
    ///
    /// The queue is FIFO, so an acknowledged flush proves all earlier
    /// removals ran. Used by tests and graceful shutdown.
    pub fn flush(&self) {
        let (ack_tx, ack_rx) = mpsc::channel();
        if self.tx.send(Job::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }
}

impl std::fmt::Debug for CleanupScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CleanupScheduler").finish_non_exhaustive()
    }
}

impl Default for CleanupScheduler {
    fn default() -> Self {
        Self::new()
    }
}

fn remove_best_effort(path: &std::path::Path) {
    match std::fs::remove_file(path) {
        Ok(()) => debug!("removed scratch artifact {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("scratch artifact {} already gone", path.display());
        }
        Err(e) => warn!("failed to remove scratch artifact {}: {e}", path.display()),
    }
}
