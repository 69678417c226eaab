//! pdfpress CLI - convert a document to PDF from the command line.

use anyhow::{Context, Result};
use clap::Parser;
use pdfpress_core::{CleanupScheduler, ConvertError, ScratchStore, UploadedFile};
use pdfpress_render::{ConversionPipeline, RenderOptions, StrategyRegistry};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Exit code for an unsupported input format, distinct from general
/// failure so scripts can tell "wrong file type" from "broken file".
const EXIT_UNSUPPORTED: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "pdfpress", version, about = "Convert documents to PDF")]
struct Args {
    /// File to convert.
    #[arg(required_unless_present = "list_formats")]
    input: Option<PathBuf>,

    /// Output path; defaults to the input path with a .pdf extension.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for transient conversion artifacts.
    #[arg(long, env = "PDFPRESS_SCRATCH_DIR")]
    scratch_dir: Option<PathBuf>,

    /// List the supported input formats and exit.
    #[arg(long)]
    list_formats: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            if is_unsupported(&e) {
                ExitCode::from(EXIT_UNSUPPORTED)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let pipeline = match &args.scratch_dir {
        Some(dir) => {
            let store = ScratchStore::new(dir.clone(), CleanupScheduler::new())
                .context("failed to open scratch storage")?;
            ConversionPipeline::new(StrategyRegistry::default(), store, RenderOptions::default())
        }
        None => ConversionPipeline::with_defaults()?,
    };

    if args.list_formats {
        for format in pipeline.registry().supported_formats() {
            println!("{format}");
        }
        return Ok(());
    }

    let input = args
        .input
        .as_deref()
        .context("no input file given")?;
    let file_name = input
        .file_name()
        .with_context(|| format!("{} has no file name", input.display()))?
        .to_string_lossy()
        .into_owned();
    let content = std::fs::read(input)
        .with_context(|| format!("failed to read {}", input.display()))?;

    let upload = UploadedFile::new(file_name, content);
    let converted = pipeline
        .convert(&upload)
        .with_context(|| format!("failed to convert {}", input.display()))?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| smart_output_path(input));
    let pdf = converted.into_bytes();
    std::fs::write(&output, &pdf)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("{} -> {} ({} bytes)", input.display(), output.display(), pdf.len());

    // Let deferred scratch removal finish before the process exits.
    pipeline.store().cleanup().flush();
    Ok(())
}

/// Output path next to the input, with the extension swapped for `.pdf`.
fn smart_output_path(input: &Path) -> PathBuf {
    input.with_extension("pdf")
}

fn is_unsupported(e: &anyhow::Error) -> bool {
    matches!(
        e.downcast_ref::<ConvertError>(),
        Some(ConvertError::UnsupportedFormat(_))
    )
}
