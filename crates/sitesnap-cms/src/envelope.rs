//! Response envelope decoding.
//!
//! The CMS wraps records as `{data: [{id, attributes: {...}}], meta: {pagination: {...}}}`.
//! Attribute projections (`fields[...]`) mean any attribute may be missing, and text fields
//! may be `null`, so every attribute decodes leniently to an empty value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sitesnap_catalog::{Company, Page};

/// A record id; the CMS emits numbers, fixtures sometimes strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum RawId {
    /// Numeric id.
    Number(u64),
    /// Textual id.
    Text(String),
}

impl RawId {
    /// The id as text.
    fn into_string(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }

    /// The id as a number, if it is one.
    fn as_number(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.parse().ok(),
        }
    }
}

/// Top-level response body.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    /// Records.
    #[serde(default)]
    data: Vec<Entry>,
    /// Response metadata.
    #[serde(default)]
    meta: Meta,
}

/// One record.
#[derive(Debug, Deserialize)]
struct Entry {
    /// Record id.
    id: RawId,
    /// Record attributes.
    #[serde(default)]
    attributes: Attributes,
}

/// Company attributes.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Attributes {
    /// Display name.
    name: Option<String>,
    /// Routing slug.
    slug: Option<String>,
    /// Website.
    url: Option<String>,
    /// Description.
    description: Option<String>,
    /// Industry label.
    industry: Option<String>,
    /// Creation time.
    created_at: Option<DateTime<Utc>>,
    /// Publication time; null for drafts.
    published_at: Option<DateTime<Utc>>,
    /// Page screenshots.
    pages: Option<Vec<RawPage>>,
}

/// One page entry.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPage {
    /// Page id.
    page_id: Option<RawId>,
    /// Page name.
    page_name: Option<String>,
    /// Owning company name.
    company_name: Option<String>,
    /// Full-size screenshot.
    image_url: Option<String>,
    /// Thumbnail.
    thumbnail_url: Option<String>,
}

/// Response metadata.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Meta {
    /// Pagination block, present on paginated responses.
    pagination: Option<PaginationMeta>,
}

/// Pagination metadata as reported by the CMS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// 1-based page.
    pub page: usize,
    /// Page size.
    pub page_size: usize,
    /// Number of pages.
    pub page_count: usize,
    /// Total records.
    pub total: usize,
}

/// A decoded response: a complete replacement for whatever was cached before.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Companies in response order.
    pub companies: Vec<Company>,
    /// Pagination metadata, when the response was paginated.
    pub pagination: Option<PaginationMeta>,
}

impl Envelope {
    /// Parses an envelope from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Converts the envelope into domain types.
    ///
    /// Pages without an id get `{company id}-{position}`; pages without a company name inherit
    /// the record's name.
    pub fn into_snapshot(self) -> Snapshot {
        let companies = self
            .data
            .into_iter()
            .enumerate()
            .map(|(position, entry)| entry.into_company(position))
            .collect();
        Snapshot {
            companies,
            pagination: self.meta.pagination,
        }
    }
}

impl Entry {
    /// Converts the record into a company. `position` stands in for a non-numeric id.
    fn into_company(self, position: usize) -> Company {
        let id = self.id.as_number().unwrap_or(position as u64);
        let attributes = self.attributes;
        let name = attributes.name.unwrap_or_default();

        let pages = attributes
            .pages
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(n, raw)| Page {
                page_id: raw
                    .page_id
                    .map_or_else(|| format!("{id}-{n}"), RawId::into_string),
                page_name: raw.page_name.unwrap_or_default(),
                company_name: raw.company_name.unwrap_or_else(|| name.clone()),
                image_url: raw.image_url.unwrap_or_default(),
                thumbnail_url: raw.thumbnail_url.unwrap_or_default(),
            })
            .collect();

        Company {
            id,
            slug: attributes.slug.unwrap_or_default(),
            url: attributes.url.unwrap_or_default(),
            description: attributes.description.unwrap_or_default(),
            industry: attributes.industry.unwrap_or_default(),
            created_at: attributes.created_at,
            published_at: attributes.published_at,
            name,
            pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_record() {
        let json = r#"{
            "data": [{
                "id": 7,
                "attributes": {
                    "name": "Acme",
                    "slug": "acme",
                    "url": "https://acme.example",
                    "description": "Anvils",
                    "industry": "Retail",
                    "createdAt": "2023-01-02T03:04:05.000Z",
                    "publishedAt": "2023-01-03T00:00:00.000Z",
                    "pages": [
                        {"page_id": "p1", "page_name": "Home", "company_name": "Acme",
                         "image_url": "https://img.example/1.png",
                         "thumbnail_url": "https://img.example/1t.png"}
                    ]
                }
            }],
            "meta": {"pagination": {"page": 1, "pageSize": 60, "pageCount": 1, "total": 1}}
        }"#;

        let snapshot = Envelope::from_json(json).unwrap().into_snapshot();
        assert_eq!(snapshot.companies.len(), 1);

        let acme = &snapshot.companies[0];
        assert_eq!(acme.id, 7);
        assert_eq!(acme.slug, "acme");
        assert!(acme.created_at.is_some());
        assert!(!acme.is_draft());
        assert_eq!(acme.pages[0].page_id, "p1");

        assert_eq!(
            snapshot.pagination,
            Some(PaginationMeta {
                page: 1,
                page_size: 60,
                page_count: 1,
                total: 1
            })
        );
    }

    #[test]
    fn test_decode_projection_and_nulls() {
        let json = r#"{
            "data": [{
                "id": 3,
                "attributes": {
                    "industry": "Fintech",
                    "description": null,
                    "publishedAt": null,
                    "pages": [{"page_name": "Home", "page_id": 12}, {"page_name": "About"}]
                }
            }],
            "meta": {}
        }"#;

        let snapshot = Envelope::from_json(json).unwrap().into_snapshot();
        let company = &snapshot.companies[0];
        assert_eq!(company.name, "");
        assert_eq!(company.description, "");
        assert!(company.is_draft());
        assert_eq!(company.pages[0].page_id, "12");
        assert_eq!(company.pages[1].page_id, "3-1");
        assert!(snapshot.pagination.is_none());
    }

    #[test]
    fn test_pages_inherit_company_name() {
        let json = r#"{"data": [{"id": 1, "attributes": {
            "name": "Globex",
            "pages": [{"page_name": "Home"}]
        }}]}"#;
        let snapshot = Envelope::from_json(json).unwrap().into_snapshot();
        assert_eq!(snapshot.companies[0].pages[0].company_name, "Globex");
    }

    #[test]
    fn test_empty_and_invalid() {
        assert!(Envelope::from_json("{}").unwrap().into_snapshot().companies.is_empty());
        assert!(Envelope::from_json("{\"data\": 5}").is_err());
        assert!(Envelope::from_json("<html>").is_err());
    }
}
