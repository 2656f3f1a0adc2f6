//! CMS query building.
//!
//! Queries target the `/api/companies` collection and use the CMS's bracketed filter syntax.

use std::fmt;

/// Path of the companies collection, relative to the CMS base URL.
pub const COMPANIES_PATH: &str = "/api/companies";

/// A request for company records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyQuery {
    /// Exact slug filter.
    pub slug: Option<String>,
    /// Case-insensitive industry filter.
    pub industry: Option<String>,
    /// 1-based page and page size.
    pub pagination: Option<(usize, usize)>,
    /// Attribute projection; empty returns every attribute.
    pub fields: Vec<String>,
    /// Newest records first.
    pub newest_first: bool,
    /// Include drafts.
    pub preview: bool,
}

impl CompanyQuery {
    /// Every company, newest first.
    pub fn all() -> Self {
        Self {
            newest_first: true,
            ..Self::default()
        }
    }

    /// The company with `slug`.
    pub fn by_slug(slug: &str) -> Self {
        Self {
            slug: Some(slug.to_string()),
            ..Self::all()
        }
    }

    /// Companies whose industry equals `industry`, ignoring case.
    pub fn by_industry(industry: &str) -> Self {
        Self {
            industry: Some(industry.to_string()),
            ..Self::all()
        }
    }

    /// One page of companies, `page` being 1-based.
    pub fn paginated(page: usize, page_size: usize) -> Self {
        Self {
            pagination: Some((page, page_size)),
            ..Self::all()
        }
    }

    /// Restricts the returned attributes.
    pub fn with_fields(mut self, fields: &[&str]) -> Self {
        self.fields = fields.iter().map(|f| (*f).to_string()).collect();
        self
    }

    /// Sets whether drafts are included.
    pub fn with_preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }

    /// Query string pairs in the CMS's filter syntax.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(slug) = &self.slug {
            pairs.push(("filters[slug][$eq]".to_string(), slug.clone()));
        }
        if let Some(industry) = &self.industry {
            pairs.push(("filters[industry][$eqi]".to_string(), industry.clone()));
        }
        if let Some((page, page_size)) = self.pagination {
            pairs.push(("pagination[page]".to_string(), page.to_string()));
            pairs.push(("pagination[pageSize]".to_string(), page_size.to_string()));
        }
        if self.newest_first {
            pairs.push(("sort".to_string(), "createdAt:DESC".to_string()));
        }
        for (i, field) in self.fields.iter().enumerate() {
            pairs.push((format!("fields[{i}]"), field.clone()));
        }
        if self.preview {
            pairs.push(("publicationState".to_string(), "preview".to_string()));
        }
        pairs
    }
}

/// Logical identity of a cached query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// Every company.
    Companies,
    /// One listing page.
    CompaniesPage {
        /// 1-based page.
        page: usize,
        /// Page size.
        page_size: usize,
    },
    /// One company by slug.
    Company(String),
    /// Companies in one industry, by industry slug.
    Industry(String),
    /// Industry and first page of every company.
    Industries,
    /// Pages of every company.
    Webpages,
}

impl QueryKey {
    /// Whether the key carries a caller-supplied slug or page number.
    pub fn is_parameterised(&self) -> bool {
        matches!(self, Self::CompaniesPage { .. } | Self::Company(_) | Self::Industry(_))
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Companies => f.write_str("companies"),
            Self::CompaniesPage { page, page_size } => {
                write!(f, "companies[page={page},size={page_size}]")
            }
            Self::Company(slug) => write!(f, "company-{slug}"),
            Self::Industry(slug) => write!(f, "industry-{slug}"),
            Self::Industries => f.write_str("industries"),
            Self::Webpages => f.write_str("pages"),
        }
    }
}
