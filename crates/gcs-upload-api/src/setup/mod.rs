//! Application setup and initialization
//!
//! Everything `main` needs to go from a loaded [`Config`] to a router ready to
//! serve, kept out of `main.rs` so tests can build the same router.

pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use gcs_upload_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.is_production())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        port = config.server_port(),
        max_file_size_mb = config.max_file_size_bytes() / 1024 / 1024,
        "Configuration loaded and validated successfully"
    );

    let storage = storage::setup_storage(&config).await?;

    let state = Arc::new(AppState::new(config, storage));
    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}
