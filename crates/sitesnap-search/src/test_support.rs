//! Builders shared by search unit tests.

use sitesnap_catalog::{Company, Page, slugify};

/// Builds a company with one page per name.
pub fn company(name: &str, industry: &str, page_names: &[&str]) -> Company {
    Company {
        id: 0,
        name: name.to_string(),
        slug: slugify(name),
        url: String::new(),
        description: String::new(),
        industry: industry.to_string(),
        created_at: None,
        published_at: None,
        pages: page_names
            .iter()
            .enumerate()
            .map(|(n, page_name)| Page {
                page_id: n.to_string(),
                page_name: (*page_name).to_string(),
                company_name: name.to_string(),
                image_url: String::new(),
                thumbnail_url: String::new(),
            })
            .collect(),
    }
}
