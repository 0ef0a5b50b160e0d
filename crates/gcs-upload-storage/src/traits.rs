//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to upload file: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// The handle is built once at startup and shared by every request, so
/// implementations must be safe to call concurrently without locking.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Stream `reader` to the backend under `object_key`.
    ///
    /// Returns the number of bytes written. The reader is consumed exactly
    /// once and no retry is attempted on failure.
    async fn upload_stream(
        &self,
        object_key: &str,
        reader: Pin<Box<dyn AsyncRead + Send + Unpin>>,
    ) -> StorageResult<u64>;

    /// Public URL for an object key
    fn public_url(&self, object_key: &str) -> String;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;

    /// Release backend resources. Called once at shutdown.
    async fn close(&self) -> StorageResult<()>;
}
