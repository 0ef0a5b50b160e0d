use gcs_upload_api::setup;
use gcs_upload_core::Config;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (telemetry, storage, routes)
    let (state, router) = setup::initialize_app(config.clone()).await?;

    // Start the server; storage is closed once it has drained
    setup::server::start_server(&config, router, state.storage.clone()).await?;

    Ok(())
}
