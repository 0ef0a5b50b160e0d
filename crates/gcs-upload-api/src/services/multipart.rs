//! Multipart extraction
//!
//! The `file` field is spooled to an anonymous temporary file so its size is
//! known before the upload policy runs. Spooling stops as soon as the field
//! grows past the size ceiling; an oversized body is never read to the end.

use crate::services::upload::UploadRequest;
use axum::extract::multipart::{Multipart, MultipartError};
use gcs_upload_core::constants::UPLOAD_FIELD_NAME;
use gcs_upload_core::AppError;
use tokio::io::{AsyncSeekExt, AsyncWriteExt};

pub const PARSE_FORM_ERROR: &str = "Failed to parse multipart form";
pub const MISSING_FILE_ERROR: &str = "No file provided or invalid file field";

fn parse_error(err: MultipartError) -> AppError {
    tracing::debug!(error = %err, "Failed to read multipart body");
    AppError::InvalidInput(PARSE_FORM_ERROR.to_string())
}

/// Spool the first `file` part that carries a filename.
///
/// When the part exceeds `max_file_size`, the returned request reports the
/// bytes seen so far (already past the ceiling) and its content is truncated;
/// it is only fit for rejection.
pub async fn spool_upload(
    mut multipart: Multipart,
    max_file_size: u64,
) -> Result<UploadRequest, AppError> {
    while let Some(mut field) = multipart.next_field().await.map_err(parse_error)? {
        if field.name() != Some(UPLOAD_FIELD_NAME) {
            continue;
        }

        // A part without a filename is a plain form value, not a file.
        let Some(filename) = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(str::to_string)
        else {
            continue;
        };

        let mut spool = tokio::fs::File::from_std(tempfile::tempfile()?);
        let mut size: u64 = 0;

        while let Some(chunk) = field.chunk().await.map_err(parse_error)? {
            size += chunk.len() as u64;
            if size > max_file_size {
                tracing::debug!(
                    filename = %filename,
                    max_file_size,
                    "Upload exceeds size limit, spooling stopped"
                );
                return Ok(UploadRequest::new(filename, size, spool));
            }
            spool.write_all(&chunk).await?;
        }

        spool.flush().await?;
        spool.rewind().await?;

        tracing::debug!(filename = %filename, size_bytes = size, "Upload spooled");
        return Ok(UploadRequest::new(filename, size, spool));
    }

    Err(AppError::InvalidInput(MISSING_FILE_ERROR.to_string()))
}
