use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use thiserror::Error;

/// Error taxonomy for the API layer.
///
/// NotFound and Validation map to 4xx with a JSON error body; storage
/// failures are logged server-side and surfaced as a generic 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("post not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Storage(e) => {
                tracing::error!(error = %e, "storage operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
