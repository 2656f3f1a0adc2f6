//! Catalog data model.
//!
//! Companies and their pages are owned by the CMS and never mutated after decoding. Industries
//! and webpage groups are projections recomputed from a company snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::slug::slugify;

/// A company published on the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// CMS record id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Canonical routing identifier, unique per company.
    pub slug: String,
    /// The company's own website.
    pub url: String,
    /// Free-form description.
    pub description: String,
    /// Industry label as entered in the CMS.
    pub industry: String,
    /// Creation time, used for newest-first ordering.
    pub created_at: Option<DateTime<Utc>>,
    /// Publication time. `None` marks a draft, visible only in preview mode.
    pub published_at: Option<DateTime<Utc>>,
    /// Screenshots of the company's web pages, in CMS order.
    pub pages: Vec<Page>,
}

impl Company {
    /// Route of the company's gallery page.
    pub fn href(&self) -> String {
        format!("/companies/{}", self.slug)
    }

    /// Slug identifying the company's industry.
    pub fn industry_slug(&self) -> String {
        slugify(&self.industry)
    }

    /// Thumbnail of the first page, used on listing cards.
    pub fn thumbnail(&self) -> Option<&str> {
        self.pages
            .first()
            .map(|page| page.thumbnail_url.as_str())
            .filter(|url| !url.is_empty())
    }

    /// Whether the record is a draft.
    pub fn is_draft(&self) -> bool {
        self.published_at.is_none()
    }
}

/// One screenshot of a company web page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Stable id, unique within the CMS. Disambiguates pages with duplicate names.
    pub page_id: String,
    /// Page name such as "Home" or "Pricing".
    pub page_name: String,
    /// Name of the owning company.
    pub company_name: String,
    /// Full-size screenshot.
    pub image_url: String,
    /// Small screenshot for grids.
    pub thumbnail_url: String,
}

impl Page {
    /// Slug of the page name; identifies the webpage group the page belongs to.
    pub fn name_slug(&self) -> String {
        slugify(&self.page_name)
    }

    /// Returns the full-size image if it is set and its host is allowed.
    ///
    /// An empty `allowed_hosts` list accepts any host. Callers render a placeholder card when
    /// this returns `None`.
    pub fn image<'a>(&'a self, allowed_hosts: &[String]) -> Option<&'a str> {
        allowed_image(&self.image_url, allowed_hosts)
    }

    /// Returns the thumbnail under the same rules as [`Page::image`].
    pub fn thumbnail<'a>(&'a self, allowed_hosts: &[String]) -> Option<&'a str> {
        allowed_image(&self.thumbnail_url, allowed_hosts)
    }
}

/// Checks `raw` against the host allowlist.
fn allowed_image<'a>(raw: &'a str, allowed_hosts: &[String]) -> Option<&'a str> {
    if raw.is_empty() {
        return None;
    }
    if allowed_hosts.is_empty() {
        return Some(raw);
    }
    let url = Url::parse(raw).ok()?;
    let host = url.host_str()?;
    allowed_hosts
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(host))
        .then_some(raw)
}

/// Companies grouped under one industry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Industry {
    /// Display name, taken from the first company seen with this industry.
    pub name: String,
    /// Identity of the industry; `slugify(name)`.
    pub slug: String,
    /// Member companies in snapshot order.
    pub companies: Vec<Company>,
}

impl Industry {
    /// Route of the industry page.
    pub fn href(&self) -> String {
        format!("/industries/{}", self.slug)
    }

    /// Cover thumbnail: the first page of the first company.
    pub fn cover(&self) -> Option<&str> {
        self.companies.iter().find_map(Company::thumbnail)
    }
}

/// Every page sharing one page-name slug, across companies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebpageGroup {
    /// Display name of the first page seen.
    pub name: String,
    /// `slugify(name)`.
    pub slug: String,
    /// Member pages in snapshot order.
    pub pages: Vec<Page>,
}

impl WebpageGroup {
    /// Route of the group's gallery.
    pub fn href(&self) -> String {
        format!("/webpages/{}", self.slug)
    }

    /// Cover thumbnail: the first member page with a thumbnail.
    pub fn cover(&self) -> Option<&str> {
        self.pages
            .iter()
            .map(|page| page.thumbnail_url.as_str())
            .find(|url| !url.is_empty())
    }
}
