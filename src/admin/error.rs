use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::registry::InvalidLevel;

/// Client errors from the logger endpoints. All map to 400.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidLevel(#[from] InvalidLevel),

    #[error("invalid request body: {0}")]
    InvalidRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}
