//! Error types and HTTP error response handling.
//!
//! This module defines all request-level errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::store::StoreError;

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code. Every failure ends the
/// current request; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The store failed the operation.
    ///
    /// Returns HTTP 500 with an opaque message. Details are only logged.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// API key is missing or unknown.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Invalid API key.")]
    InvalidApiKey,

    /// Payload does not match the shape required for the verb.
    ///
    /// Returns HTTP 403 Forbidden. The message describes the expected shape.
    #[error("{0}")]
    InvalidPayload(&'static str),

    /// Referenced pizza is absent, or a filter matched nothing.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("{0}")]
    NotFound(&'static str),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidApiKey => StatusCode::UNAUTHORIZED,
            AppError::InvalidPayload(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "error": 401,
///   "message": "Invalid API key."
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `InvalidApiKey` → 401 Unauthorized
/// - `InvalidPayload` → 403 Forbidden
/// - `NotFound` → 404 Not Found
/// - `Store` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            AppError::Store(err) => {
                tracing::error!(error = %err, "store operation failed");
                "An internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": status.as_u16(),
            "message": message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_taxonomy() {
        assert_eq!(AppError::InvalidApiKey.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::InvalidPayload("bad").status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AppError::NotFound("gone").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Store(StoreError::Duplicate("api key owner")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn store_errors_are_not_leaked() {
        let response = AppError::Store(StoreError::Duplicate("api key hash")).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["error"], 500);
        assert_eq!(body["message"], "An internal error occurred");
        assert!(!bytes.windows(4).any(|w| w == b"hash"));
    }
}
