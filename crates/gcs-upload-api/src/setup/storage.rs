//! Storage setup and initialization

use anyhow::{Context, Result};
use gcs_upload_core::Config;
use gcs_upload_storage::{create_storage, Storage};
use std::sync::Arc;

/// Build the storage backend selected by configuration. Failure is fatal.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!(backend = %config.storage_backend(), "Initializing storage backend...");

    let storage = create_storage(config)
        .await
        .context("Failed to create storage client")?;

    tracing::info!(
        backend = %storage.backend_type(),
        bucket = config.bucket_name().unwrap_or("-"),
        project_id = config.project_id().unwrap_or("-"),
        "Storage backend initialized successfully"
    );

    Ok(storage)
}
