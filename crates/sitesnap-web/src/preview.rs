//! Preview mode.
//!
//! An editor follows `/api/preview?secret=...&slug=/companies/...` from the CMS. When the
//! secret matches and the slug names a company (drafts included), a session cookie is set and
//! every page read through that browser includes drafts until `/api/exit-preview`.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tower_cookies::{Cookie, Cookies, cookie::SameSite};
use tracing::info;

use crate::AppState;

/// Name of the cookie marking a preview session.
pub const PREVIEW_COOKIE: &str = "__sitesnap_preview";

/// Routes for entering and leaving preview mode.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/preview", get(enter))
        .route("/api/exit-preview", get(exit))
}

/// Query of the preview endpoint.
#[derive(Debug, Deserialize)]
struct PreviewQuery {
    /// Shared secret.
    secret: Option<String>,
    /// Path to redirect to, e.g. `/companies/acme`.
    slug: Option<String>,
}

/// JSON body of preview responses.
#[derive(Debug, Serialize)]
struct Message {
    /// Human-readable outcome.
    message: &'static str,
}

/// Rejects the request with 401 and `message`.
fn unauthorized(message: &'static str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(Message { message })).into_response()
}

/// Enters preview mode and redirects to the requested company.
async fn enter(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PreviewQuery>,
    cookies: Cookies,
) -> Response {
    let secret_ok = match (&state.preview_secret, &query.secret) {
        (Some(expected), Some(given)) => expected == given,
        _ => false,
    };
    let Some(slug) = query.slug.filter(|slug| !slug.is_empty() && secret_ok) else {
        return unauthorized("Invalid token");
    };

    if !state.cms.preview_target_exists(&slug).await {
        return unauthorized("Invalid slug");
    }

    let mut cookie = Cookie::new(PREVIEW_COOKIE, "1");
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookies.add(cookie);

    info!(%slug, "preview mode entered");
    Redirect::temporary(&slug).into_response()
}

/// Leaves preview mode.
async fn exit(cookies: Cookies) -> Response {
    let mut cookie = Cookie::from(PREVIEW_COOKIE);
    cookie.set_path("/");
    cookies.remove(cookie);
    (StatusCode::OK, Json(Message { message: "Preview mode disabled" })).into_response()
}
