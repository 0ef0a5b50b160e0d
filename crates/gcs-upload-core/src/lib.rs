//! gcs-upload core library
//!
//! Shared building blocks for the upload gateway: configuration, the unified
//! error taxonomy, the upload policy and the wire models returned by `/upload`.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;
pub mod validation;

pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{ResponseEnvelope, UploadResult};
pub use storage_types::StorageBackend;
pub use validation::{UploadValidator, ValidationError};
