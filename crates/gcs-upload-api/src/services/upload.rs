//! Upload delegation
//!
//! Names the object, hands the body to the storage backend once, and turns
//! the backend's answer into an [`UploadResult`].

use gcs_upload_core::{AppError, UploadResult};
use gcs_upload_storage::{generate_object_key, Storage};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::AsyncRead;

/// A single accepted upload: client filename, size in bytes and a read-once body.
pub struct UploadRequest {
    filename: String,
    size: u64,
    content: Pin<Box<dyn AsyncRead + Send + Unpin>>,
}

impl UploadRequest {
    pub fn new(
        filename: impl Into<String>,
        size: u64,
        content: impl AsyncRead + Send + Unpin + 'static,
    ) -> Self {
        Self {
            filename: filename.into(),
            size,
            content: Box::pin(content),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

#[derive(Clone)]
pub struct UploadService {
    storage: Arc<dyn Storage>,
}

impl UploadService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Write the request body to storage under a freshly generated object key.
    ///
    /// Exactly one backend write is attempted. Backend errors surface as
    /// [`AppError::UploadFailed`] carrying the backend's message.
    pub async fn upload(&self, request: UploadRequest) -> Result<UploadResult, AppError> {
        let UploadRequest {
            filename,
            size: declared_size,
            content,
        } = request;

        let object_key = generate_object_key(&filename);
        let start = Instant::now();

        let written = self
            .storage
            .upload_stream(&object_key, content)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    key = %object_key,
                    backend = %self.storage.backend_type(),
                    declared_size_bytes = declared_size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Upload failed"
                );
                AppError::UploadFailed(e.to_string())
            })?;

        if written != declared_size {
            tracing::warn!(
                key = %object_key,
                declared_size_bytes = declared_size,
                size_bytes = written,
                "Bytes written differ from spooled size"
            );
        }

        let url = self.storage.public_url(&object_key);

        tracing::info!(
            key = %object_key,
            url = %url,
            size_bytes = written,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Upload completed"
        );

        Ok(UploadResult {
            file_name: object_key,
            url,
            size: written,
        })
    }
}
