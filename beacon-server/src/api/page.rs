//! Dashboard Page Handler

use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
};

use crate::state::Dashboard;

/// Intermediate caches may keep the page this long, matching the status
/// refresh cadence.
const CACHE_CONTROL: &str = "max-age=600";

/// GET /
/// Serves the last rendered page verbatim
pub async fn dashboard_page(State(dashboard): State<Arc<Dashboard>>) -> impl IntoResponse {
    let page = dashboard.page().await;

    (
        [(header::CACHE_CONTROL, CACHE_CONTROL)],
        Html(page.as_str().to_string()),
    )
}
