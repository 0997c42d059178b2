//! HTTP error response conversion
//!
//! **Preferred handler pattern:** return `Result<impl IntoResponse,
//! HttpAppError>`. Use `AppError` (or types convertible into it) for errors
//! and let `?` wrap them into `HttpAppError` so they render consistently
//! (status, body, logging).

use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use docbox_core::{AppError, ErrorMetadata, LogLevel};
use docbox_storage::StorageError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from docbox-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

/// Storage failures map onto the app error taxonomy at the route boundary;
/// implementing for the local HttpAppError keeps us clear of the orphan rule.
impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app_error = match err {
            StorageError::NotFound(key) => AppError::NotFound(key),
            StorageError::InvalidKey(msg) => AppError::Validation(msg),
            StorageError::UploadFailed(msg) => AppError::Upload(msg),
            StorageError::SignFailed(msg) => AppError::Sign(msg),
            other => AppError::Internal(other.to_string()),
        };
        HttpAppError(app_error)
    }
}

/// Convert JSON body deserialization failures into a 400 with our ErrorResponse format.
impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        HttpAppError(AppError::Validation(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

/// Same for urlencoded form bodies.
impl From<FormRejection> for HttpAppError {
    fn from(rejection: FormRejection) -> Self {
        HttpAppError(AppError::Validation(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

fn log_error(error: &AppError) {
    let code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, code = code, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, code = code, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, code = code, "Error occurred");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // client_message never carries internal detail for 5xx variants.
        let body = Json(ErrorResponse {
            error: app_error.client_message(),
            code: app_error.error_code().to_string(),
        });

        (status, body).into_response()
    }
}
