//! Request-derived context shared by page handlers.

use std::{collections::HashMap, convert::Infallible};

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{header::USER_AGENT, request::Parts},
};
use tower_cookies::Cookies;

use crate::{preview::PREVIEW_COOKIE, shell::ShellState};

/// What a page handler needs to know about the request besides its route params.
#[derive(Debug, Clone)]
pub struct PageRequest {
    /// Decoded query string.
    pub query: HashMap<String, String>,
    /// Shell UI state.
    pub shell: ShellState,
    /// Whether the preview cookie is set.
    pub preview: bool,
}

impl PageRequest {
    /// Raw value of query parameter `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Path being rendered.
    pub fn path(&self) -> &str {
        self.shell.path()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for PageRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let query = Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
            .map(|Query(query)| query)
            .unwrap_or_default();
        let user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        let shell = ShellState::from_request(parts.uri.path(), &query, user_agent);
        let preview = Cookies::from_request_parts(parts, state)
            .await
            .is_ok_and(|cookies| cookies.get(PREVIEW_COOKIE).is_some());

        Ok(Self {
            query,
            shell,
            preview,
        })
    }
}
