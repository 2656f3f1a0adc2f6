//! Company data access for sitesnap.
//!
//! Company records live in a headless CMS. This crate builds the CMS queries, decodes its
//! response envelope, caches snapshots per logical query, and exposes the [`Cms`] facade the
//! site and the CLI read through. A [`FixtureSource`] serves the same envelope from a JSON file
//! for offline use and tests.
//!
//! Reads never fail from the caller's point of view: a CMS error is logged and the caller gets
//! an empty list or `None`, which the site renders as an empty state.

#![warn(missing_docs)]

mod cache;
mod envelope;
mod error;
mod fixture;
mod http;
mod query;
mod source;
#[cfg(test)]
mod test_support;

use std::{sync::Arc, time::Duration};

pub use cache::QueryCache;
pub use envelope::{Envelope, PaginationMeta, Snapshot};
pub use error::CmsError;
pub use fixture::FixtureSource;
pub use http::HttpSource;
pub use query::{COMPANIES_PATH, CompanyQuery, QueryKey};
use sitesnap_catalog::{
    Company, Industry, Paginator, WebpageGroup, find_company, find_industry, find_webpage_group,
    industries, unslugify, webpage_groups,
};
use sitesnap_config::Config;
pub use source::CompanySource;
use tracing::{info, warn};

/// Attributes requested for listing cards.
const LISTING_FIELDS: &[&str] = &[
    "name",
    "description",
    "industry",
    "publishedAt",
    "slug",
    "pages",
];

/// One page of the company listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    /// Companies on this page.
    pub companies: Vec<Company>,
    /// Number of pages in the listing.
    pub page_count: usize,
    /// Number of companies in the listing.
    pub total: usize,
}

/// Cached, failure-tolerant access to company data.
pub struct Cms {
    /// Where records come from.
    source: Arc<dyn CompanySource>,
    /// Snapshots of published data.
    cache: QueryCache,
    /// Listing page size.
    paginator: Paginator,
}

impl Cms {
    /// Creates a facade over `source`.
    pub fn new(source: Arc<dyn CompanySource>, stale_time: Duration, page_size: usize) -> Self {
        Self {
            source,
            cache: QueryCache::new(stale_time),
            paginator: Paginator::new(page_size),
        }
    }

    /// Builds the configured source. A fixture wins over a CMS URL.
    pub fn from_config(config: &Config) -> Result<Self, CmsError> {
        let source: Arc<dyn CompanySource> = match (&config.cms.fixture, &config.cms.url) {
            (Some(path), _) => Arc::new(FixtureSource::load(path)?),
            (None, Some(url)) => Arc::new(HttpSource::new(
                url,
                config.cms.token.clone(),
                Duration::from_secs(config.cms.timeout_secs),
            )?),
            (None, None) => return Err(CmsError::NoSource),
        };
        info!(source = %source.describe(), "company source ready");
        Ok(Self::new(
            source,
            Duration::from_secs(config.cms.stale_time_secs),
            config.listing.page_size,
        ))
    }

    /// Describes the underlying source.
    pub fn describe(&self) -> String {
        self.source.describe()
    }

    /// The listing paginator.
    pub fn paginator(&self) -> Paginator {
        self.paginator
    }

    /// Runs `query`, through the cache unless previewing.
    ///
    /// Preview reads bypass the cache so drafts never leak into published snapshots.
    pub async fn fetch(
        &self,
        key: QueryKey,
        query: &CompanyQuery,
    ) -> Result<Arc<Snapshot>, CmsError> {
        if query.preview {
            return self.source.fetch(query).await.map(Arc::new);
        }
        self.cache
            .get_or_fetch(key, || self.source.fetch(query))
            .await
    }

    /// Like [`Cms::fetch`], but logs failures and returns an empty snapshot.
    async fn load(&self, key: QueryKey, query: &CompanyQuery) -> Arc<Snapshot> {
        let shown = key.to_string();
        match self.fetch(key, query).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(query = %shown, error = %err, "company fetch failed");
                Arc::new(Snapshot::default())
            }
        }
    }

    /// Every company, newest first.
    pub async fn companies(&self, preview: bool) -> Vec<Company> {
        let query = CompanyQuery::all().with_preview(preview);
        self.load(QueryKey::Companies, &query).await.companies.clone()
    }

    /// Listing page `index` (0-based).
    pub async fn companies_page(&self, index: usize, preview: bool) -> ListingPage {
        let page_size = self.paginator.page_size();
        let page = index.saturating_add(1);
        let query = CompanyQuery::paginated(page, page_size)
            .with_fields(LISTING_FIELDS)
            .with_preview(preview);
        let snapshot = self
            .load(QueryKey::CompaniesPage { page, page_size }, &query)
            .await;

        let (page_count, total) = snapshot.pagination.map_or_else(
            || {
                let total = snapshot.companies.len();
                (self.paginator.page_count(total), total)
            },
            |meta| (meta.page_count, meta.total),
        );
        ListingPage {
            companies: snapshot.companies.clone(),
            page_count,
            total,
        }
    }

    /// The company with `slug`.
    pub async fn company(&self, slug: &str, preview: bool) -> Option<Company> {
        let query = CompanyQuery::by_slug(slug).with_preview(preview);
        let snapshot = self.load(QueryKey::Company(slug.to_string()), &query).await;
        find_company(&snapshot.companies, slug).cloned()
    }

    /// The industry whose slug is `slug`, with its companies.
    ///
    /// The CMS filter matches the display name, which a slug cannot always reproduce (`e-commerce`
    /// may be stored as "E-commerce"). When the filtered query finds nothing, every company is
    /// grouped locally instead.
    pub async fn industry(&self, slug: &str, preview: bool) -> Option<Industry> {
        let query = CompanyQuery::by_industry(&unslugify(slug)).with_preview(preview);
        let snapshot = self.load(QueryKey::Industry(slug.to_string()), &query).await;
        if let Some(industry) = find_industry(&snapshot.companies, slug) {
            return Some(industry);
        }
        find_industry(&self.companies(preview).await, slug)
    }

    /// Every industry with its companies.
    pub async fn industries(&self, preview: bool) -> Vec<Industry> {
        let query = CompanyQuery::all()
            .with_fields(&["industry", "pages"])
            .with_preview(preview);
        industries(&self.load(QueryKey::Industries, &query).await.companies)
    }

    /// Every webpage group.
    pub async fn webpages(&self, preview: bool) -> Vec<WebpageGroup> {
        let query = CompanyQuery::all()
            .with_fields(&["pages"])
            .with_preview(preview);
        webpage_groups(&self.load(QueryKey::Webpages, &query).await.companies)
    }

    /// The webpage group whose slug is `slug`.
    pub async fn webpage_group(&self, slug: &str, preview: bool) -> Option<WebpageGroup> {
        let query = CompanyQuery::all()
            .with_fields(&["pages"])
            .with_preview(preview);
        find_webpage_group(&self.load(QueryKey::Webpages, &query).await.companies, slug)
    }

    /// Whether `path` is the route of some company, drafts included.
    pub async fn preview_target_exists(&self, path: &str) -> bool {
        let query = CompanyQuery::all().with_preview(true);
        self.load(QueryKey::Companies, &query)
            .await
            .companies
            .iter()
            .any(|company| company.href() == path)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::test_support::company;

    /// Counts fetches and optionally fails them.
    struct Counting {
        /// Inner source.
        inner: FixtureSource,
        /// Number of fetches.
        calls: AtomicUsize,
        /// Fail every fetch.
        fail: bool,
    }

    #[async_trait]
    impl CompanySource for Counting {
        async fn fetch(&self, query: &CompanyQuery) -> Result<Snapshot, CmsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CmsError::Status {
                    url: "https://cms.example.com/api/companies".into(),
                    status: 500,
                });
            }
            self.inner.fetch(query).await
        }

        fn describe(&self) -> String {
            String::from("counting")
        }
    }

    fn counting(fail: bool) -> Arc<Counting> {
        let mut draft = company(5, "Hooli", "E-commerce", &["Home"]);
        draft.published_at = None;
        Arc::new(Counting {
            inner: FixtureSource::from_companies(vec![
                company(1, "Acme", "Retail", &["Home", "About"]),
                company(2, "Globex", "Fintech", &["Home", "Pricing"]),
                company(3, "Initech", "E-commerce", &["Home"]),
                draft,
            ]),
            calls: AtomicUsize::new(0),
            fail,
        })
    }

    fn cms(source: &Arc<Counting>, page_size: usize) -> Cms {
        let source: Arc<dyn CompanySource> = Arc::clone(source) as Arc<dyn CompanySource>;
        Cms::new(source, Duration::from_secs(60), page_size)
    }

    #[tokio::test]
    async fn test_companies_cached() {
        let source = counting(false);
        let cms = cms(&source, 60);
        assert_eq!(cms.companies(false).await.len(), 3);
        assert_eq!(cms.companies(false).await.len(), 3);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_preview_bypasses_cache() {
        let source = counting(false);
        let cms = cms(&source, 60);
        assert_eq!(cms.companies(true).await.len(), 4);
        assert_eq!(cms.companies(true).await.len(), 4);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cms.companies(false).await.len(), 3);
    }

    #[tokio::test]
    async fn test_failures_degrade_to_empty() {
        let source = counting(true);
        let cms = cms(&source, 60);
        assert!(cms.companies(false).await.is_empty());
        assert!(cms.company("acme", false).await.is_none());
        assert!(cms.industries(false).await.is_empty());
        assert_eq!(cms.companies_page(0, false).await, ListingPage::default());
        assert!(!cms.preview_target_exists("/companies/acme").await);
    }

    #[tokio::test]
    async fn test_companies_page() {
        let source = counting(false);
        let cms = cms(&source, 2);
        let first = cms.companies_page(0, false).await;
        assert_eq!(first.page_count, 2);
        assert_eq!(first.total, 3);
        assert_eq!(first.companies.len(), 2);

        let second = cms.companies_page(1, false).await;
        assert_eq!(second.companies.len(), 1);
        assert_eq!(second.companies[0].name, "Acme");
        assert_eq!(second.companies[0].industry, "Retail");
        assert!(second.companies[0].url.is_empty());
    }

    #[tokio::test]
    async fn test_company_by_slug() {
        let cms = cms(&counting(false), 60);
        assert_eq!(cms.company("globex", false).await.map(|c| c.name), Some("Globex".into()));
        assert!(cms.company("hooli", false).await.is_none());
        assert!(cms.company("hooli", true).await.is_some());
    }

    #[tokio::test]
    async fn test_industry_with_punctuation() {
        let cms = cms(&counting(false), 60);
        let industry = cms.industry("e-commerce", false).await.unwrap();
        assert_eq!(industry.name, "E-commerce");
        assert_eq!(industry.companies.len(), 1);
        assert!(cms.industry("mining", false).await.is_none());
    }

    #[tokio::test]
    async fn test_webpages() {
        let cms = cms(&counting(false), 60);
        let groups = cms.webpages(false).await;
        let slugs: Vec<&str> = groups.iter().map(|g| g.slug.as_str()).collect();
        assert_eq!(slugs, vec!["about", "home", "pricing"]);

        let home = cms.webpage_group("home", false).await.unwrap();
        assert_eq!(home.pages.len(), 3);
        assert!(cms.webpage_group("careers", false).await.is_none());
    }

    #[tokio::test]
    async fn test_preview_target() {
        let cms = cms(&counting(false), 60);
        assert!(cms.preview_target_exists("/companies/hooli").await);
        assert!(!cms.preview_target_exists("/companies/nope").await);
        assert!(!cms.preview_target_exists("hooli").await);
    }

    #[test]
    fn test_from_config_requires_source() {
        let config = Config::default();
        assert!(matches!(Cms::from_config(&config), Err(CmsError::NoSource)));
    }
}
