use axum::Json;
use gcs_upload_core::constants::{SERVICE_NAME, SERVICE_TITLE, SERVICE_VERSION};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// Liveness probe. Never touches the storage backend.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
    })
}

#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub upload: &'static str,
    pub health: &'static str,
}

#[derive(Debug, Serialize)]
pub struct UsageInfo {
    pub upload: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub endpoints: EndpointInfo,
    pub usage: UsageInfo,
}

pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: SERVICE_TITLE,
        version: SERVICE_VERSION,
        endpoints: EndpointInfo {
            upload: "POST /upload",
            health: "GET /health",
        },
        usage: UsageInfo {
            upload: "Send multipart form with 'file' field to /upload endpoint",
        },
    })
}
