//! Brain MRI Classification Service
//!
//! HTTP service that classifies brain MRI scans with a pretrained
//! convolutional model. Exposes a REST (Axum) upload endpoint backed by the
//! OpenVINO runtime.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use neuroscan::api::rest::{create_rest_router, AppState};
use neuroscan::config::Config;
use neuroscan::engine::ClassifierModel;
use neuroscan::registry;
use neuroscan::service::ScanService;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    info!("Starting Brain MRI Classification Service v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::load(Config::default_path()).unwrap_or_else(|e| {
        info!("Using default config ({})", e);
        Config::default()
    });

    info!("Configuration loaded:");
    info!("  REST port: {}", config.server.rest_port);
    info!("  Device: {}", config.inference.device);
    info!("  Model artifact: {}", config.model.artifact.display());
    info!("  Uploads dir: {}", config.uploads.dir.display());

    std::fs::create_dir_all(&config.uploads.dir)
        .context("Failed to create uploads directory")?;

    // Provision the model artifact. Any failure here is fatal: the service
    // must not come up without a usable model.
    let model_path = registry::ensure_model(&config.model).await?;

    // Load the model once; the handle is shared read-only by all requests
    let model = ClassifierModel::load(&model_path, &config.inference.device)?;

    let service = Arc::new(ScanService::new(model, config.clone()));

    let app_state = Arc::new(AppState { service });

    let router = create_rest_router(app_state);

    let addr = format!("0.0.0.0:{}", config.server.rest_port);
    info!("REST API listening on http://{}", addr);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Goodbye!");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received, cleaning up...");
}
