pub mod health;
pub mod upload;

use crate::error::HttpAppError;
use gcs_upload_core::AppError;

/// Fallback for every unrouted path.
pub async fn not_found() -> HttpAppError {
    HttpAppError(AppError::NotFound("Not found".to_string()))
}
