//! Static assets and the health check.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    response::IntoResponse,
    routing::get,
};
use serde_json::json;

use crate::AppState;

/// Site stylesheet.
const SITE_CSS: &str = include_str!("../static/site.css");

/// Keyboard bindings and live search client.
const SITE_JS: &str = include_str!("../static/site.js");

/// Asset and health routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/static/site.css", get(site_css))
        .route("/static/site.js", get(site_js))
        .route("/healthz", get(healthz))
}

/// Serves the stylesheet.
async fn site_css() -> impl IntoResponse {
    (
        [
            (CONTENT_TYPE, "text/css; charset=utf-8"),
            (CACHE_CONTROL, "public, max-age=3600"),
        ],
        SITE_CSS,
    )
}

/// Serves the client script.
async fn site_js() -> impl IntoResponse {
    (
        [
            (CONTENT_TYPE, "text/javascript; charset=utf-8"),
            (CACHE_CONTROL, "public, max-age=3600"),
        ],
        SITE_JS,
    )
}

/// Liveness plus the configured data source.
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "source": state.cms.describe(),
    }))
}
