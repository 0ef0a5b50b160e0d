#![allow(dead_code)]

//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p gcs-upload-api`.

pub mod storage;

use axum_test::TestServer;
use gcs_upload_api::setup::routes;
use gcs_upload_api::state::AppState;
use gcs_upload_core::Config;
use gcs_upload_storage::{GcsStorage, Storage};
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::ObjectStoreExt;
use std::collections::HashMap;
use std::sync::Arc;

pub use storage::{CountingStorage, FailingStorage, StalledStorage};

pub const TEST_BUCKET: &str = "test-bucket";

/// Configuration for a GCS-backed app with the given ceiling in MiB.
pub fn test_config(max_file_size_mb: u64) -> Config {
    test_config_with(&[("MAX_FILE_SIZE_MB", &max_file_size_mb.to_string())])
}

/// GCS-backed configuration with extra variables layered on top.
pub fn test_config_with(extra: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<&str, String> = HashMap::from([
        ("GCS_BUCKET_NAME", TEST_BUCKET.to_string()),
        ("GOOGLE_CLOUD_PROJECT", "test-project".to_string()),
    ]);
    for (key, value) in extra {
        vars.insert(*key, value.to_string());
    }
    let config = Config::from_lookup(|key| vars.get(key).cloned()).expect("valid test config");
    config.validate().expect("complete test config");
    config
}

/// Test server over an arbitrary storage backend.
pub fn server_with_storage(config: Config, storage: Arc<dyn Storage>) -> TestServer {
    let state = Arc::new(AppState::new(config, storage));
    let app = routes::setup_routes(state);
    TestServer::new(app.into_make_service()).expect("Failed to create test server")
}

/// Test application: server plus the in-memory bucket behind it.
pub struct TestApp {
    pub server: TestServer,
    pub bucket: Arc<InMemory>,
    pub storage: Arc<CountingStorage>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Bytes stored under `object_key`.
    pub async fn stored_object(&self, object_key: &str) -> Vec<u8> {
        self.bucket
            .get(&Path::parse(object_key).expect("valid object key"))
            .await
            .expect("object exists")
            .bytes()
            .await
            .expect("object readable")
            .to_vec()
    }

    pub fn upload_calls(&self) -> usize {
        self.storage.calls()
    }
}

/// App backed by an in-memory GCS bucket with the default 100 MiB ceiling.
pub fn setup_test_app() -> TestApp {
    setup_test_app_with_max(100)
}

pub fn setup_test_app_with_max(max_file_size_mb: u64) -> TestApp {
    let bucket = Arc::new(InMemory::new());
    let gcs = GcsStorage::with_store(bucket.clone(), TEST_BUCKET);
    let storage = Arc::new(CountingStorage::new(Arc::new(gcs)));
    let server = server_with_storage(test_config(max_file_size_mb), storage.clone());

    TestApp {
        server,
        bucket,
        storage,
    }
}
