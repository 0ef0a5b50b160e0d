//! Storage doubles for integration tests.

use async_trait::async_trait;
use gcs_upload_storage::{Storage, StorageBackend, StorageError, StorageResult};
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncRead;

/// Wraps a real backend and counts upload attempts.
pub struct CountingStorage {
    inner: Arc<dyn Storage>,
    calls: AtomicUsize,
}

impl CountingStorage {
    pub fn new(inner: Arc<dyn Storage>) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Storage for CountingStorage {
    async fn upload_stream(
        &self,
        object_key: &str,
        reader: Pin<Box<dyn AsyncRead + Send + Unpin>>,
    ) -> StorageResult<u64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.upload_stream(object_key, reader).await
    }

    fn public_url(&self, object_key: &str) -> String {
        self.inner.public_url(object_key)
    }

    fn backend_type(&self) -> StorageBackend {
        self.inner.backend_type()
    }

    async fn close(&self) -> StorageResult<()> {
        self.inner.close().await
    }
}

/// Backend whose every write fails.
#[derive(Default)]
pub struct FailingStorage {
    calls: AtomicUsize,
}

impl FailingStorage {
    pub const MESSAGE: &'static str = "backend unavailable";

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Storage for FailingStorage {
    async fn upload_stream(
        &self,
        _object_key: &str,
        _reader: Pin<Box<dyn AsyncRead + Send + Unpin>>,
    ) -> StorageResult<u64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::UploadFailed(Self::MESSAGE.to_string()))
    }

    fn public_url(&self, object_key: &str) -> String {
        format!("https://storage.googleapis.com/unreachable/{}", object_key)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Gcs
    }

    async fn close(&self) -> StorageResult<()> {
        Ok(())
    }
}

/// Backend that holds every write open for `delay` before succeeding.
pub struct StalledStorage {
    delay: Duration,
}

impl StalledStorage {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Storage for StalledStorage {
    async fn upload_stream(
        &self,
        _object_key: &str,
        _reader: Pin<Box<dyn AsyncRead + Send + Unpin>>,
    ) -> StorageResult<u64> {
        tokio::time::sleep(self.delay).await;
        Ok(0)
    }

    fn public_url(&self, object_key: &str) -> String {
        format!("https://storage.googleapis.com/stalled/{}", object_key)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Gcs
    }

    async fn close(&self) -> StorageResult<()> {
        Ok(())
    }
}
