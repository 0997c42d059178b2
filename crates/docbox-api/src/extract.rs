//! Request body extraction.

use axum::extract::{Form, FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use docbox_core::AppError;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::HttpAppError;

/// Body extractor accepting urlencoded forms and JSON through one schema.
///
/// The browser pages submit `application/x-www-form-urlencoded`; scripted
/// clients send JSON. Both funnel into the same DTO, and its `validator`
/// rules run before the handler sees the value.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedPayload<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedPayload<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("");

        let value = if content_type.starts_with("application/json") {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(HttpAppError::from)?;
            value
        } else {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(HttpAppError::from)?;
            value
        };

        value
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        Ok(ValidatedPayload(value))
    }
}
