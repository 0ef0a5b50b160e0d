use crate::services::upload::UploadService;
use gcs_upload_core::{Config, UploadValidator};
use gcs_upload_storage::Storage;
use std::sync::Arc;

/// Shared, read-only application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub validator: UploadValidator,
    pub upload_service: UploadService,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Self {
        let validator = UploadValidator::new(config.max_file_size_bytes());
        let upload_service = UploadService::new(storage.clone());

        Self {
            config,
            storage,
            validator,
            upload_service,
        }
    }
}
