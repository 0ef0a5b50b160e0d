//! HTTP error response conversion
//!
//! Every failure leaves the API as a [`ResponseEnvelope`] error body with the
//! status code taken from [`ErrorMetadata`]. Handlers return
//! `Result<_, HttpAppError>` (or something that converts into one) and never
//! build error bodies by hand.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gcs_upload_core::{AppError, ErrorMetadata, LogLevel, ResponseEnvelope, ValidationError};

/// Wrapper type for AppError to implement IntoResponse
///
/// Needed because of the orphan rule: `IntoResponse` and `AppError` both live
/// in other crates.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<ValidationError> for HttpAppError {
    fn from(err: ValidationError) -> Self {
        HttpAppError(AppError::from(err))
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::from(err))
    }
}

fn log_error(error: &AppError) {
    let error_code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_code, "Request rejected");
        }
        LogLevel::Error => {
            tracing::error!(
                error = %error.detailed_message(),
                error_code,
                recoverable = error.is_recoverable(),
                "Request failed"
            );
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = Json(ResponseEnvelope::<()>::failure(app_error.client_message()));
        (status, body).into_response()
    }
}
