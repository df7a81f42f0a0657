//! Health Check Endpoint

use axum::{http::StatusCode, response::IntoResponse};

/// GET /health
/// Simple health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
