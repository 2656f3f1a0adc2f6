//! Builders shared by catalog unit tests.

use chrono::{TimeZone, Utc};

use crate::{model::Company, model::Page, slug::slugify};

/// Builds a page whose URLs are derived from the company and page names.
pub fn page(company_name: &str, page_name: &str, page_id: &str) -> Page {
    let base = format!(
        "https://img.example/{}/{}",
        slugify(company_name),
        slugify(page_name)
    );
    Page {
        page_id: page_id.to_string(),
        page_name: page_name.to_string(),
        company_name: company_name.to_string(),
        image_url: format!("{base}.png"),
        thumbnail_url: format!("{base}-thumb.png"),
    }
}

/// Builds a published company with one page per name; page ids are `{id}-{n}`.
pub fn company(id: u64, name: &str, industry: &str, page_names: &[&str]) -> Company {
    Company {
        id,
        name: name.to_string(),
        slug: slugify(name),
        url: format!("https://{}.example", slugify(name)),
        description: String::new(),
        industry: industry.to_string(),
        created_at: None,
        published_at: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).single(),
        pages: page_names
            .iter()
            .enumerate()
            .map(|(n, page_name)| page(name, page_name, &format!("{id}-{n}")))
            .collect(),
    }
}
