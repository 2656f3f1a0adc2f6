//! Error types for the catalog.

use thiserror::Error;

/// Errors produced by catalog parsing helpers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A keyboard key name that the viewer does not handle.
    #[error("unknown key: {key}")]
    UnknownKey {
        /// The rejected key name.
        key: String,
    },
}
