//! API Module
//!
//! HTTP surface of the dashboard. Handlers only read the last-published
//! snapshots; nothing here triggers a fetch or a render.

pub mod health;
pub mod page;

use std::path::Path;
use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::state::Dashboard;

/// Create the router with all endpoints
pub fn create_router(dashboard: Arc<Dashboard>, static_dir: &Path) -> Router {
    Router::new()
        // Rendered dashboard
        .route("/", get(page::dashboard_page))
        // Health check
        .route("/health", get(health::health_check))
        // Static assets (stylesheet, status icons)
        .nest_service("/static", ServeDir::new(static_dir))
        .route_service("/favicon.ico", ServeFile::new(static_dir.join("favicon.svg")))
        // Add state and middleware
        .with_state(dashboard)
        .layer(TraceLayer::new_for_http())
}
