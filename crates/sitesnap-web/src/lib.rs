//! HTTP front end for sitesnap.
//!
//! Every page is rendered on the server from the request URL: listing pages read `page`,
//! galleries read the viewer params, and the shell reads `search` and `nav`. Nothing about the
//! UI is kept between requests, so reloads and back-navigation always reproduce what was shown.
//!
//! Company data comes through [`Cms`]; a CMS outage renders empty pages rather than errors.

#![warn(missing_docs)]

mod assets;
mod error;
mod pages;
mod preview;
mod request;
mod search;
mod shell;
mod sitemap;
#[cfg(test)]
mod test_support;
mod views;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
pub use error::WebError;
pub use preview::PREVIEW_COOKIE;
pub use search::{LiveResults, ResultLink, ResultSection, sections};
pub use shell::{Platform, ShellState};
pub use sitemap::build_sitemap;
use sitesnap_cms::Cms;
use sitesnap_config::{Config, SiteSettings};
use sitesnap_search::{Debouncer, SearchEngine, SearchOptions};
use tokio::net::TcpListener;
use tower_cookies::CookieManagerLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state of the server.
pub struct AppState {
    /// Company data.
    pub cms: Cms,
    /// Search engine, built once.
    pub engine: SearchEngine,
    /// Live search debouncer.
    pub debouncer: Debouncer,
    /// Site identity.
    pub site: SiteSettings,
    /// Preview secret; preview mode is unavailable when unset.
    pub preview_secret: Option<String>,
}

impl AppState {
    /// Builds the state from configuration and a ready data source.
    pub fn new(config: &Config, cms: Cms) -> Self {
        Self {
            cms,
            engine: SearchEngine::new(SearchOptions::from(&config.search)),
            debouncer: Debouncer::new(Duration::from_millis(config.search.debounce_ms)),
            site: config.site.clone(),
            preview_secret: config.server.preview_secret.clone(),
        }
    }
}

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(pages::router())
        .merge(search::router())
        .merge(preview::router())
        .merge(sitemap::router())
        .merge(assets::router())
        .fallback(pages::fallback)
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the site on `bind` until the process is stopped.
pub async fn serve(state: Arc<AppState>, bind: &str) -> Result<(), WebError> {
    let addr: SocketAddr = bind.parse().map_err(|_| WebError::InvalidBind {
        addr: bind.to_string(),
    })?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| WebError::Bind {
            addr: bind.to_string(),
            source,
        })?;

    info!(%addr, source = %state.cms.describe(), "sitesnap listening");
    axum::serve(listener, router(state))
        .await
        .map_err(|source| WebError::Serve { source })
}
