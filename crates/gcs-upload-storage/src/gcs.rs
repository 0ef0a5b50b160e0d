use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use gcs_upload_core::constants::GCS_PUBLIC_URL_BASE;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::path::Path;
use object_store::{ObjectStore, ObjectStoreExt, WriteMultipart};
use std::pin::Pin;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Size of each read from the upload body.
const READ_CHUNK_SIZE: usize = 64 * 1024;

/// Parts allowed in flight before the reader is paused.
const MAX_CONCURRENT_PARTS: usize = 4;

/// Google Cloud Storage implementation
#[derive(Clone)]
pub struct GcsStorage {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    project_id: Option<String>,
}

impl GcsStorage {
    /// Create a new GcsStorage instance
    ///
    /// # Arguments
    /// * `bucket` - GCS bucket name
    /// * `project_id` - Google Cloud project, recorded for logging
    /// * `credentials_path` - Optional service-account JSON file. Without it the
    ///   ambient application-default credentials are used.
    pub fn new(
        bucket: String,
        project_id: String,
        credentials_path: Option<String>,
    ) -> StorageResult<Self> {
        let mut builder = GoogleCloudStorageBuilder::from_env().with_bucket_name(bucket.clone());

        if let Some(ref path) = credentials_path {
            builder = builder.with_service_account_path(path.clone());
        }

        let store = builder.build().map_err(|e| {
            StorageError::ConfigError(format!("Failed to create storage client: {}", e))
        })?;

        tracing::debug!(
            bucket = %bucket,
            project_id = %project_id,
            explicit_credentials = credentials_path.is_some(),
            "GCS client created"
        );

        Ok(GcsStorage {
            store: Arc::new(store),
            bucket,
            project_id: Some(project_id),
        })
    }

    /// Wrap an already constructed object store, e.g. `object_store::memory::InMemory`.
    pub fn with_store(store: Arc<dyn ObjectStore>, bucket: impl Into<String>) -> Self {
        GcsStorage {
            store,
            bucket: bucket.into(),
            project_id: None,
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    /// Public URL for an object: `https://storage.googleapis.com/{bucket}/{key}`
    fn generate_url(&self, key: &str) -> String {
        format!("{}/{}/{}", GCS_PUBLIC_URL_BASE, self.bucket, key)
    }
}

#[async_trait]
impl Storage for GcsStorage {
    /// Streams the body as a multipart upload stored under exactly `object_key`.
    ///
    /// The key is used verbatim; keys the object store cannot hold unchanged
    /// (empty segments, `.` or `..` segments, control characters) fail with
    /// [`StorageError::InvalidKey`]. Read and write failures abort the
    /// multipart upload. If the future is dropped mid-stream (client
    /// disconnect) the upload is left incomplete and expiring it is up to the
    /// bucket's lifecycle rules.
    async fn upload_stream(
        &self,
        object_key: &str,
        mut reader: Pin<Box<dyn AsyncRead + Send + Unpin>>,
    ) -> StorageResult<u64> {
        let location =
            Path::parse(object_key).map_err(|e| StorageError::InvalidKey(e.to_string()))?;
        let start = std::time::Instant::now();

        let upload = self.store.put_multipart(&location).await.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %object_key,
                "GCS upload could not be started"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        let mut writer = WriteMultipart::new(upload);
        let mut buf = vec![0u8; READ_CHUNK_SIZE];
        let mut written: u64 = 0;

        loop {
            let bytes_read = match reader.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) => {
                    if let Err(abort_err) = writer.abort().await {
                        tracing::warn!(error = %abort_err, key = %object_key, "Failed to abort GCS upload");
                    }
                    return Err(StorageError::UploadFailed(format!(
                        "Failed to read from stream: {}",
                        e
                    )));
                }
            };

            if let Err(e) = writer.wait_for_capacity(MAX_CONCURRENT_PARTS).await {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %object_key,
                    size_bytes = written,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "GCS stream upload failed"
                );
                if let Err(abort_err) = writer.abort().await {
                    tracing::warn!(error = %abort_err, key = %object_key, "Failed to abort GCS upload");
                }
                return Err(StorageError::UploadFailed(e.to_string()));
            }

            writer.write(&buf[..bytes_read]);
            written += bytes_read as u64;
        }

        writer.finish().await.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %object_key,
                size_bytes = written,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "GCS stream upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %object_key,
            size_bytes = written,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "GCS stream upload successful"
        );

        Ok(written)
    }

    fn public_url(&self, object_key: &str) -> String {
        self.generate_url(object_key)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Gcs
    }

    async fn close(&self) -> StorageResult<()> {
        // Connection pool is released when the last handle drops.
        tracing::debug!(
            bucket = %self.bucket,
            project_id = self.project_id().unwrap_or("-"),
            "GCS storage closed"
        );
        Ok(())
    }
}
