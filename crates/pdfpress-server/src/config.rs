//! Server configuration from flags and environment.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Configuration for the pdfpress HTTP server.
///
/// Every flag can also be set through the corresponding `PDFPRESS_*`
/// environment variable; flags win when both are present.
#[derive(Debug, Clone, Parser)]
#[command(name = "pdfpress-server", version, about = "HTTP document-to-PDF conversion service")]
pub struct ServerConfig {
    /// Address to listen on.
    #[arg(long, env = "PDFPRESS_ADDR", default_value = "0.0.0.0:3000")]
    pub addr: SocketAddr,

    /// Largest accepted request body in bytes; oversized uploads are
    /// rejected before the pipeline runs.
    #[arg(long, env = "PDFPRESS_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    /// Directory for transient conversion artifacts. Defaults to a
    /// pdfpress subdirectory of the system temp dir.
    #[arg(long, env = "PDFPRESS_SCRATCH_DIR")]
    pub scratch_dir: Option<PathBuf>,
}
