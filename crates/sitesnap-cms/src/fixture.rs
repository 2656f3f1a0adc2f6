//! A source backed by a JSON file in the CMS response format.
//!
//! Query semantics mirror the CMS: drafts are hidden unless previewing, the slug filter is exact,
//! the industry filter ignores case, and pagination reports the same metadata block. A field
//! projection blanks every attribute it does not name, as the CMS omits them.

use std::{fs, path::Path};

use async_trait::async_trait;
use sitesnap_catalog::Company;

use crate::{
    envelope::{Envelope, PaginationMeta, Snapshot},
    error::CmsError,
    query::CompanyQuery,
    source::CompanySource,
};

/// Serves company records from memory.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    /// Every record, drafts included, in file order.
    companies: Vec<Company>,
    /// Where the records came from.
    origin: String,
}

impl FixtureSource {
    /// Loads a fixture file.
    pub fn load(path: &Path) -> Result<Self, CmsError> {
        let text = fs::read_to_string(path).map_err(|source| CmsError::ReadFixture {
            path: path.to_path_buf(),
            source,
        })?;
        let envelope = Envelope::from_json(&text).map_err(|source| CmsError::ParseFixture {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            companies: envelope.into_snapshot().companies,
            origin: path.display().to_string(),
        })
    }

    /// Serves the given records.
    pub fn from_companies(companies: Vec<Company>) -> Self {
        Self {
            companies,
            origin: String::from("memory"),
        }
    }

    /// Applies `query` to the in-memory records.
    pub fn run(&self, query: &CompanyQuery) -> Snapshot {
        let mut matched: Vec<Company> = self
            .companies
            .iter()
            .filter(|c| query.preview || !c.is_draft())
            .filter(|c| query.slug.as_ref().is_none_or(|slug| c.slug == *slug))
            .filter(|c| {
                query
                    .industry
                    .as_ref()
                    .is_none_or(|industry| c.industry.to_lowercase() == industry.to_lowercase())
            })
            .cloned()
            .collect();

        if query.newest_first {
            // Stable, so records without a timestamp keep file order at the end.
            matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }

        let Some((page, page_size)) = query.pagination else {
            return Snapshot {
                companies: project(matched, &query.fields),
                pagination: None,
            };
        };

        let total = matched.len();
        let page = page.max(1);
        let page_count = if page_size == 0 {
            0
        } else {
            total.div_ceil(page_size)
        };
        let companies = matched
            .into_iter()
            .skip((page - 1).saturating_mul(page_size))
            .take(page_size)
            .collect();
        let companies = project(companies, &query.fields);

        Snapshot {
            companies,
            pagination: Some(PaginationMeta {
                page,
                page_size,
                page_count,
                total,
            }),
        }
    }
}

/// Blanks the attributes `fields` leaves out. An empty projection keeps everything; the id is
/// always kept.
fn project(companies: Vec<Company>, fields: &[String]) -> Vec<Company> {
    if fields.is_empty() {
        return companies;
    }
    let keeps = |name: &str| fields.iter().any(|field| field == name);
    let (name, slug, url) = (keeps("name"), keeps("slug"), keeps("url"));
    let (description, industry, pages) = (keeps("description"), keeps("industry"), keeps("pages"));
    let (created_at, published_at) = (keeps("createdAt"), keeps("publishedAt"));

    companies
        .into_iter()
        .map(|company| Company {
            id: company.id,
            name: kept(name, company.name),
            slug: kept(slug, company.slug),
            url: kept(url, company.url),
            description: kept(description, company.description),
            industry: kept(industry, company.industry),
            created_at: kept(created_at, company.created_at),
            published_at: kept(published_at, company.published_at),
            pages: kept(pages, company.pages),
        })
        .collect()
}

/// `value` when `keep`, otherwise the empty value.
fn kept<T: Default>(keep: bool, value: T) -> T {
    if keep { value } else { T::default() }
}

#[async_trait]
impl CompanySource for FixtureSource {
    async fn fetch(&self, query: &CompanyQuery) -> Result<Snapshot, CmsError> {
        Ok(self.run(query))
    }

    fn describe(&self) -> String {
        format!("fixture {}", self.origin)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::test_support::company;

    fn names(snapshot: &Snapshot) -> Vec<&str> {
        snapshot.companies.iter().map(|c| c.name.as_str()).collect()
    }

    fn source() -> FixtureSource {
        let mut draft = company(4, "Draft Co", "Retail", &["Home"]);
        draft.published_at = None;
        FixtureSource::from_companies(vec![
            company(1, "Acme", "Retail", &["Home", "About"]),
            company(2, "Globex", "Fintech", &["Home"]),
            company(3, "Initech", "retail", &["Pricing"]),
            draft,
        ])
    }

    #[test]
    fn test_all_newest_first_hides_drafts() {
        let snapshot = source().run(&CompanyQuery::all());
        assert_eq!(names(&snapshot), vec!["Initech", "Globex", "Acme"]);
        assert!(snapshot.pagination.is_none());
    }

    #[test]
    fn test_preview_includes_drafts() {
        let snapshot = source().run(&CompanyQuery::all().with_preview(true));
        assert_eq!(snapshot.companies.len(), 4);
    }

    #[test]
    fn test_slug_filter() {
        let snapshot = source().run(&CompanyQuery::by_slug("globex"));
        assert_eq!(names(&snapshot), vec!["Globex"]);
        assert!(source().run(&CompanyQuery::by_slug("Globex")).companies.is_empty());
    }

    #[test]
    fn test_industry_filter_ignores_case() {
        let snapshot = source().run(&CompanyQuery::by_industry("RETAIL"));
        assert_eq!(names(&snapshot), vec!["Initech", "Acme"]);
    }

    #[test]
    fn test_pagination_meta() {
        let snapshot = source().run(&CompanyQuery::paginated(2, 2));
        assert_eq!(names(&snapshot), vec!["Acme"]);
        assert_eq!(
            snapshot.pagination,
            Some(PaginationMeta {
                page: 2,
                page_size: 2,
                page_count: 2,
                total: 3
            })
        );

        let beyond = source().run(&CompanyQuery::paginated(9, 2));
        assert!(beyond.companies.is_empty());
    }

    #[test]
    fn test_projection_blanks_unnamed_fields() {
        let query = CompanyQuery::by_slug("acme").with_fields(&["name", "pages"]);
        let snapshot = source().run(&query);
        let acme = &snapshot.companies[0];

        assert_eq!(acme.id, 1);
        assert_eq!(acme.name, "Acme");
        assert_eq!(acme.pages.len(), 2);
        assert!(acme.industry.is_empty());
        assert!(acme.slug.is_empty());
        assert!(acme.published_at.is_none());
    }

    #[test]
    fn test_projection_applies_after_filter_and_sort() {
        let query = CompanyQuery::paginated(1, 2).with_fields(&["industry"]);
        let snapshot = source().run(&query);
        let industries: Vec<&str> = snapshot
            .companies
            .iter()
            .map(|c| c.industry.as_str())
            .collect();
        assert_eq!(industries, vec!["retail", "Fintech"]);
        assert!(snapshot.companies.iter().all(|c| c.name.is_empty()));
    }

    #[test]
    fn test_missing_timestamps_sort_last() {
        let mut undated = company(9, "Undated", "Retail", &[]);
        undated.created_at = None;
        let mut newer = company(1, "Newer", "Retail", &[]);
        newer.created_at = Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
        let source = FixtureSource::from_companies(vec![undated, newer]);
        assert_eq!(names(&source.run(&CompanyQuery::all())), vec!["Newer", "Undated"]);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            FixtureSource::load(&missing),
            Err(CmsError::ReadFixture { .. })
        ));

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "[1, 2]").unwrap();
        assert!(matches!(
            FixtureSource::load(&bad),
            Err(CmsError::ParseFixture { .. })
        ));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("companies.json");
        fs::write(
            &path,
            r#"{"data": [{"id": 1, "attributes": {"name": "Acme", "slug": "acme",
                "publishedAt": "2023-01-01T00:00:00Z"}}]}"#,
        )
        .unwrap();
        let source = FixtureSource::load(&path).unwrap();
        assert_eq!(names(&source.run(&CompanyQuery::all())), vec!["Acme"]);
        assert!(source.describe().starts_with("fixture "));
    }
}
