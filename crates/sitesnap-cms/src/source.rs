//! The seam between the site and wherever company records live.

use async_trait::async_trait;

use crate::{envelope::Snapshot, error::CmsError, query::CompanyQuery};

/// A source of company records.
#[async_trait]
pub trait CompanySource: Send + Sync {
    /// Runs `query` and returns the decoded records.
    async fn fetch(&self, query: &CompanyQuery) -> Result<Snapshot, CmsError>;

    /// Short description used in logs.
    fn describe(&self) -> String;
}
