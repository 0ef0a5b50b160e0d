//! Service-wide constants

/// Short service identifier reported by the health endpoint.
pub const SERVICE_NAME: &str = "gcs-upload-api";

/// Human readable service title reported by the root endpoint.
pub const SERVICE_TITLE: &str = "Google Cloud Storage Upload API";

pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the multipart form field carrying the upload.
pub const UPLOAD_FIELD_NAME: &str = "file";

pub const DEFAULT_PORT: u16 = 8080;

/// Default upload ceiling in MiB.
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 100;

pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// Base of the public object URL for the GCS backend.
pub const GCS_PUBLIC_URL_BASE: &str = "https://storage.googleapis.com";

/// Upper bound on handling one request, body read included.
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 60;

/// How long in-flight requests may drain after a shutdown signal.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECONDS: u64 = 30;
