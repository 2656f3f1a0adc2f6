//! Error types for CMS access.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur while reading company data.
#[derive(Debug, Error)]
pub enum CmsError {
    /// Neither a CMS URL nor a fixture file is configured.
    #[error("no data source configured: set cms.url or cms.fixture")]
    NoSource,

    /// The configured CMS URL could not be parsed.
    #[error("invalid cms url {url}: {source}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Underlying parse error.
        source: url::ParseError,
    },

    /// The HTTP client could not be built.
    #[error("failed to build http client: {source}")]
    Client {
        /// Underlying client error.
        source: reqwest::Error,
    },

    /// The request failed before a response arrived.
    #[error("request to {url} failed: {source}")]
    Request {
        /// Requested URL.
        url: String,
        /// Underlying transport error.
        source: reqwest::Error,
    },

    /// The CMS answered with a non-success status.
    #[error("request to {url} returned {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The response body was not a valid envelope.
    #[error("invalid response from {url}: {source}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// Failed to read a fixture file.
    #[error("failed to read fixture {path}: {source}")]
    ReadFixture {
        /// Path to the fixture.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A fixture file was not a valid envelope.
    #[error("failed to parse fixture {path}: {source}")]
    ParseFixture {
        /// Path to the fixture.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}
