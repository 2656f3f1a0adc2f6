//! Search page and live search socket.

use std::sync::Arc;

use askama::Template;
use axum::{
    Router,
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
    routing::get,
};
use serde::Serialize;
use sitesnap_search::{GroupedResults, SearchKey, search_grouped};
use tracing::debug;

use crate::{AppState, pages::render, request::PageRequest, views::Layout};

/// Search routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/search", get(search_page))
        .route("/search/live", get(live))
}

/// One result link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultLink {
    /// Matched value.
    pub value: String,
    /// Route of the value.
    pub href: String,
    /// Number of matches carrying the value.
    pub count: usize,
}

/// One non-empty result bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSection {
    /// Bucket heading.
    pub title: &'static str,
    /// Links in ranking order.
    pub entries: Vec<ResultLink>,
}

/// Payload sent over the live socket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveResults {
    /// The query these results answer.
    pub query: String,
    /// Non-empty buckets.
    pub sections: Vec<ResultSection>,
}

/// Converts grouped results into display sections, skipping empty buckets.
pub fn sections(grouped: &GroupedResults) -> Vec<ResultSection> {
    [
        (SearchKey::Title, "Companies"),
        (SearchKey::Industry, "Industries"),
        (SearchKey::Pages, "Pages"),
    ]
    .into_iter()
    .filter_map(|(key, title)| {
        let bucket = grouped.bucket(key);
        (!bucket.is_empty()).then(|| ResultSection {
            title,
            entries: bucket
                .iter()
                .map(|entry| ResultLink {
                    value: entry.value.clone(),
                    href: entry.href(key),
                    count: entry.count,
                })
                .collect(),
        })
    })
    .collect()
}

/// Runs `query` against the current snapshot.
async fn run_query(state: &AppState, query: &str, preview: bool) -> Vec<ResultSection> {
    let companies = state.cms.companies(preview).await;
    sections(&search_grouped(&state.engine, &companies, query))
}

/// Search results page.
#[derive(Template)]
#[template(path = "search.html")]
struct SearchTemplate {
    /// Page chrome.
    layout: Layout,
    /// The query as typed.
    query: String,
    /// Result buckets.
    sections: Vec<ResultSection>,
}

/// Renders results for `?q=`.
async fn search_page(State(state): State<Arc<AppState>>, request: PageRequest) -> Response {
    let query = request.param("q").unwrap_or_default().trim().to_string();
    let sections = run_query(&state, &query, request.preview).await;
    let template = SearchTemplate {
        layout: Layout::new(&state.site, request.shell, request.preview, "Search"),
        query,
        sections,
    };
    render(&template)
}

/// Upgrades to the live search socket.
async fn live(
    State(state): State<Arc<AppState>>,
    request: PageRequest,
    upgrade: WebSocketUpgrade,
) -> Response {
    let preview = request.preview;
    upgrade.on_upgrade(move |socket| live_session(socket, state, preview))
}

/// Reads keystrokes and answers each pause in typing with one result set.
///
/// Only the latest text is kept. A new keystroke while a search is pending restarts the wait,
/// and other frames leave the pending text alone.
async fn live_session(mut socket: WebSocket, state: Arc<AppState>, preview: bool) {
    let mut pending = state.debouncer.pending::<String>();

    loop {
        tokio::select! {
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Text(text))) => pending.push(text),
                Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
            query = pending.ready() => {
                let query = query.trim().to_string();
                let payload = LiveResults {
                    sections: run_query(&state, &query, preview).await,
                    query,
                };
                let Ok(json) = serde_json::to_string(&payload) else {
                    break;
                };
                if socket.send(Message::Text(json)).await.is_err() {
                    break;
                }
            }
        }
    }
    debug!("live search closed");
}
