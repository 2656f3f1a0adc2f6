//! Error types for the web server.

use std::io;

use thiserror::Error;

/// Errors that stop the server.
#[derive(Debug, Error)]
pub enum WebError {
    /// The listen address is not a valid socket address.
    #[error("invalid bind address {addr}")]
    InvalidBind {
        /// The rejected address.
        addr: String,
    },

    /// Failed to bind the listener.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address we tried to bind.
        addr: String,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("server error: {source}")]
    Serve {
        /// Underlying I/O error.
        source: io::Error,
    },
}
