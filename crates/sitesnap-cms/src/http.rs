//! HTTP client for the CMS companies collection.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::{
    envelope::{Envelope, Snapshot},
    error::CmsError,
    query::{COMPANIES_PATH, CompanyQuery},
    source::CompanySource,
};

/// Reads companies from a live CMS.
#[derive(Debug, Clone)]
pub struct HttpSource {
    /// Shared client with the configured timeout.
    client: Client,
    /// Full URL of the companies collection.
    endpoint: Url,
    /// Optional bearer token.
    token: Option<String>,
}

impl HttpSource {
    /// Creates a client for the CMS at `base_url`.
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self, CmsError> {
        let endpoint = companies_endpoint(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("sitesnap/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| CmsError::Client { source })?;
        Ok(Self {
            client,
            endpoint,
            token,
        })
    }

    /// The URL `query` is sent to.
    pub fn request_url(&self, query: &CompanyQuery) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query.to_pairs() {
                pairs.append_pair(&key, &value);
            }
        }
        url
    }
}

/// Joins the collection path onto a base URL, tolerating a trailing slash.
fn companies_endpoint(base_url: &str) -> Result<Url, CmsError> {
    let joined = format!("{}{COMPANIES_PATH}", base_url.trim_end_matches('/'));
    Url::parse(&joined).map_err(|source| CmsError::InvalidUrl {
        url: base_url.to_string(),
        source,
    })
}

#[async_trait]
impl CompanySource for HttpSource {
    async fn fetch(&self, query: &CompanyQuery) -> Result<Snapshot, CmsError> {
        let url = self.request_url(query);
        let shown = url.to_string();
        debug!(url = %shown, "fetching from cms");

        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|source| CmsError::Request {
            url: shown.clone(),
            source,
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(CmsError::Status {
                url: shown,
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| CmsError::Request {
            url: shown.clone(),
            source,
        })?;
        let envelope =
            Envelope::from_json(&body).map_err(|source| CmsError::Decode { url: shown, source })?;
        Ok(envelope.into_snapshot())
    }

    fn describe(&self) -> String {
        self.endpoint.to_string()
    }
}
