use anyhow::Context;
use clap::Parser;
use pdfpress_core::{CleanupScheduler, ScratchStore};
use pdfpress_render::{ConversionPipeline, RenderOptions, StrategyRegistry};
use pdfpress_server::{app, AppState, ServerConfig};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdfpress=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::parse();

    let cleanup = CleanupScheduler::new();
    let store = match &config.scratch_dir {
        Some(dir) => ScratchStore::new(dir.clone(), cleanup),
        None => ScratchStore::in_temp_dir(cleanup),
    }
    .context("failed to open scratch storage")?;
    let pipeline = Arc::new(ConversionPipeline::new(
        StrategyRegistry::default(),
        store,
        RenderOptions::default(),
    ));

    let app = app(AppState::new(pipeline), config.max_upload_bytes);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    info!("pdfpress listening on http://{}", config.addr);

    axum::serve(listener, app)
        .await
        .context("server terminated")?;
    Ok(())
}
