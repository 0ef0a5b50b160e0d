//! Route configuration and setup

use crate::handlers::{self, health, upload};
use crate::middleware::upload_cors_middleware;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{any, get, post, MethodRouter},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Room for multipart boundaries, part headers and small extra fields on top
/// of the file itself.
const MULTIPART_OVERHEAD_BYTES: u64 = 1024 * 1024;

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Router<()> {
    // Only /upload reads a body, so the limit effectively applies to it alone
    let body_limit = usize::try_from(
        state
            .config
            .max_file_size_bytes()
            .saturating_add(MULTIPART_OVERHEAD_BYTES),
    )
    .unwrap_or(usize::MAX);
    let request_timeout = Duration::from_secs(state.config.request_timeout_seconds());

    Router::new()
        .route("/", any(health::service_info))
        .route("/health", get(health::health_check))
        .route("/upload", upload_routes())
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        // Requests still running after the deadline get an empty 408
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `/upload`: POST uploads, OPTIONS preflight, every other method 405.
/// All three carry the CORS headers.
fn upload_routes() -> MethodRouter<Arc<AppState>> {
    post(upload::upload_file)
        .options(upload::upload_preflight)
        .fallback(upload::method_not_allowed)
        .layer(axum::middleware::from_fn(upload_cors_middleware))
}
