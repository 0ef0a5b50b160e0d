//! Upload endpoint
//!
//! Each request ends in exactly one [`UploadOutcome`]: rejected before any
//! storage I/O, uploaded, or failed in the backend.

use crate::error::HttpAppError;
use crate::services::multipart::{spool_upload, PARSE_FORM_ERROR};
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gcs_upload_core::{AppError, ErrorMetadata, ResponseEnvelope, UploadResult};
use std::sync::Arc;

/// Terminal state of an upload request.
#[derive(Debug)]
pub enum UploadOutcome {
    /// Refused by input parsing or the upload policy; nothing was written.
    Rejected(AppError),
    Uploaded(UploadResult),
    /// The backend write (or local spooling) failed.
    UploadFailed(AppError),
}

impl UploadOutcome {
    pub fn status(&self) -> StatusCode {
        match self {
            UploadOutcome::Uploaded(_) => StatusCode::OK,
            UploadOutcome::Rejected(err) | UploadOutcome::UploadFailed(err) => {
                StatusCode::from_u16(err.http_status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

impl IntoResponse for UploadOutcome {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            UploadOutcome::Uploaded(result) => {
                (status, Json(ResponseEnvelope::success(result))).into_response()
            }
            UploadOutcome::Rejected(err) | UploadOutcome::UploadFailed(err) => {
                HttpAppError(err).into_response()
            }
        }
    }
}

/// `POST /upload`
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> UploadOutcome {
    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "Request is not a multipart form");
            return UploadOutcome::Rejected(AppError::InvalidInput(PARSE_FORM_ERROR.to_string()));
        }
    };

    let request = match spool_upload(multipart, state.validator.max_file_size()).await {
        Ok(request) => request,
        Err(err) if err.http_status_code() >= 500 => return UploadOutcome::UploadFailed(err),
        Err(err) => return UploadOutcome::Rejected(err),
    };

    if let Err(err) = state.validator.validate(request.filename(), request.size()) {
        tracing::debug!(
            filename = %request.filename(),
            size_bytes = request.size(),
            reason = %err,
            "Upload rejected by policy"
        );
        return UploadOutcome::Rejected(err.into());
    }

    match state.upload_service.upload(request).await {
        Ok(result) => UploadOutcome::Uploaded(result),
        Err(err) => UploadOutcome::UploadFailed(err),
    }
}

/// `OPTIONS /upload`: empty 200; CORS headers come from the route middleware.
pub async fn upload_preflight() -> StatusCode {
    StatusCode::OK
}

/// Any other method on `/upload`.
pub async fn method_not_allowed() -> HttpAppError {
    HttpAppError(AppError::MethodNotAllowed)
}
