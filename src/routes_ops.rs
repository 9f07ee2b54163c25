// --------------------------------------------------
// Operational endpoints: liveness and metrics exposition.
// -------------------------------------------------

use axum::{Json, extract::State, http::header, response::IntoResponse};
use prometheus::{Encoder, TextEncoder};

use crate::AppState;
use crate::errors::ApiError;

// -----------------------------
// GET /health
// Liveness plus process uptime
// -----------------------------
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "uptime_seconds": state.started.elapsed().as_secs(),
    }))
}

// -----------------------------
// GET /metrics
// Prometheus text exposition
// -----------------------------
pub async fn metrics(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let encoder = TextEncoder::new();
    let families = state.metrics.registry().gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&families, &mut buffer)
        .map_err(|e| ApiError::Storage(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
    let body = String::from_utf8(buffer)
        .map_err(|e| ApiError::Storage(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
    Ok((
        [(header::CONTENT_TYPE, encoder.format_type().to_string())],
        body,
    ))
}
