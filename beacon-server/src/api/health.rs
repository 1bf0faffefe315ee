//! Health Check API Handler
//!
//! Liveness endpoint for monitoring. Always succeeds, independent of
//! fetch or render health.

use axum::{http::StatusCode, response::IntoResponse};

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
