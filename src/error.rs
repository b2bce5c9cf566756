//! Application error types and HTTP response mapping.
//!
//! Defines `AppError` enum for all error conditions and implements Axum's
//! `IntoResponse` to automatically convert errors to JSON error bodies.
//!
//! Error mappings:
//! - `UpstreamUnavailable`, `MalformedResponse`, `Internal` → 500
//!
//! Upstream details are kept out of the response body; handlers log them
//! and return the generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub const LISTING_FAILURE_MESSAGE: &str = "Failed to fetch GitHub repository data";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::UpstreamUnavailable(_) | AppError::MalformedResponse(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                LISTING_FAILURE_MESSAGE.to_string(),
            ),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
