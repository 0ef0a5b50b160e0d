//! gcs-upload storage library
//!
//! This crate provides the storage abstraction the upload gateway writes to,
//! with a Google Cloud Storage implementation and a local filesystem one for
//! development.
//!
//! # Object key format
//!
//! Every backend stores an upload under `{YYYYMMDD-HHMMSS}-{filename}`, with
//! the client filename kept verbatim. Key generation lives in [`keys`] so the
//! format is defined in one place.

pub mod factory;
#[cfg(feature = "storage-gcs")]
pub mod gcs;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-gcs")]
pub use gcs::GcsStorage;
pub use gcs_upload_core::StorageBackend;
pub use keys::generate_object_key;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
