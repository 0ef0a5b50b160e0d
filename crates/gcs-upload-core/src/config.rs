//! Configuration module
//!
//! The gateway is configured entirely from environment variables (optionally
//! seeded from a `.env` file). The resulting [`Config`] is built once at
//! startup and passed explicitly to everything that needs it.

use std::env;

use crate::constants::{
    BYTES_PER_MB, DEFAULT_MAX_FILE_SIZE_MB, DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT_SECONDS,
    DEFAULT_SHUTDOWN_TIMEOUT_SECONDS,
};
use crate::storage_types::StorageBackend;

/// Base configuration for the HTTP server
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    pub request_timeout_seconds: u64,
    pub shutdown_timeout_seconds: u64,
}

/// Storage configuration
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub bucket_name: Option<String>,
    pub project_id: Option<String>,
    pub credentials_path: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
}

/// Upload gateway configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub storage: StorageConfig,
    pub max_file_size_bytes: u64,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let server_port = var("PORT")
            .unwrap_or_else(|| DEFAULT_PORT.to_string())
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?;

        let seconds = |key: &str, default: u64| {
            var(key)
                .and_then(|s| s.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(default)
        };

        let backend = match var("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => StorageBackend::Gcs,
        };

        let max_file_size_mb = var("MAX_FILE_SIZE_MB")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_MAX_FILE_SIZE_MB);

        Ok(Config {
            base: BaseConfig {
                server_port,
                environment,
                request_timeout_seconds: seconds(
                    "REQUEST_TIMEOUT_SECONDS",
                    DEFAULT_REQUEST_TIMEOUT_SECONDS,
                ),
                shutdown_timeout_seconds: seconds(
                    "SHUTDOWN_TIMEOUT_SECONDS",
                    DEFAULT_SHUTDOWN_TIMEOUT_SECONDS,
                ),
            },
            storage: StorageConfig {
                backend,
                bucket_name: var("GCS_BUCKET_NAME"),
                project_id: var("GOOGLE_CLOUD_PROJECT"),
                credentials_path: var("GOOGLE_APPLICATION_CREDENTIALS"),
                local_storage_path: var("LOCAL_STORAGE_PATH"),
                local_storage_base_url: var("LOCAL_STORAGE_BASE_URL"),
            },
            max_file_size_bytes: max_file_size_mb.saturating_mul(BYTES_PER_MB),
        })
    }

    /// Check that everything the selected backend needs is present.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!(
                "MAX_FILE_SIZE_MB must be greater than zero"
            ));
        }

        match self.storage.backend {
            StorageBackend::Gcs => {
                if self.storage.bucket_name.is_none() {
                    return Err(anyhow::anyhow!(
                        "GCS_BUCKET_NAME environment variable is required"
                    ));
                }
                if self.storage.project_id.is_none() {
                    return Err(anyhow::anyhow!(
                        "GOOGLE_CLOUD_PROJECT environment variable is required"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.storage.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
                if self.storage.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL must be set when using local storage backend"
                    ));
                }
            }
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    // Convenience getters
    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn request_timeout_seconds(&self) -> u64 {
        self.base.request_timeout_seconds
    }

    pub fn shutdown_timeout_seconds(&self) -> u64 {
        self.base.shutdown_timeout_seconds
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.storage.backend
    }

    pub fn bucket_name(&self) -> Option<&str> {
        self.storage.bucket_name.as_deref()
    }

    pub fn project_id(&self) -> Option<&str> {
        self.storage.project_id.as_deref()
    }

    pub fn credentials_path(&self) -> Option<&str> {
        self.storage.credentials_path.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.storage.local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.storage.local_storage_base_url.as_deref()
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_bytes
    }
}
