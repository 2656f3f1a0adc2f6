//! Search index construction.
//!
//! The index is a flat projection of a company snapshot: one record per company, in snapshot
//! order, including companies without pages. It is rebuilt wholesale whenever a new snapshot
//! arrives.

use std::slice;

use serde::Serialize;
use sitesnap_catalog::Company;

/// A searchable field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKey {
    /// Company name.
    Title,
    /// Industry label.
    Industry,
    /// Page names.
    Pages,
}

impl SearchKey {
    /// Every key, in default search order.
    pub const ALL: [Self; 3] = [Self::Title, Self::Industry, Self::Pages];

    /// Field name as exposed in JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Industry => "industry",
            Self::Pages => "pages",
        }
    }
}

/// The searchable projection of one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRecord {
    /// Company name.
    pub title: String,
    /// Company slug, carried for linking; not searched.
    pub slug: String,
    /// Industry label.
    pub industry: String,
    /// Page names in CMS order.
    pub pages: Vec<String>,
}

impl SearchRecord {
    /// Projects a company into a record.
    pub fn from_company(company: &Company) -> Self {
        Self {
            title: company.name.clone(),
            slug: company.slug.clone(),
            industry: company.industry.clone(),
            pages: company
                .pages
                .iter()
                .map(|page| page.page_name.clone())
                .collect(),
        }
    }

    /// Values stored under `key`.
    pub fn values(&self, key: SearchKey) -> &[String] {
        match key {
            SearchKey::Title => slice::from_ref(&self.title),
            SearchKey::Industry => slice::from_ref(&self.industry),
            SearchKey::Pages => &self.pages,
        }
    }
}

/// One record per company, in input order. Companies without pages are kept.
pub fn build_index(companies: &[Company]) -> Vec<SearchRecord> {
    companies.iter().map(SearchRecord::from_company).collect()
}

/// Records built from one company snapshot.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    /// Records in snapshot order.
    records: Vec<SearchRecord>,
}

impl SearchIndex {
    /// Builds an index with one record per company.
    pub fn build(companies: &[Company]) -> Self {
        Self {
            records: build_index(companies),
        }
    }

    /// All records.
    pub fn records(&self) -> &[SearchRecord] {
        &self.records
    }

    /// Record at `index`.
    pub fn get(&self, index: usize) -> Option<&SearchRecord> {
        self.records.get(index)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
