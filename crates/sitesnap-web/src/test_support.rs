//! Builders shared by web unit tests.

use chrono::{TimeZone, Utc};
use sitesnap_catalog::{Company, Page, slugify};

/// Builds a published company with one page per name; page ids are `{id}-{n}`.
pub fn company(id: u64, name: &str, industry: &str, page_names: &[&str]) -> Company {
    Company {
        id,
        name: name.to_string(),
        slug: slugify(name),
        url: format!("https://{}.example", slugify(name)),
        description: String::new(),
        industry: industry.to_string(),
        created_at: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).single(),
        published_at: Utc.with_ymd_and_hms(2023, 1, 2, 0, 0, 0).single(),
        pages: page_names
            .iter()
            .enumerate()
            .map(|(n, page_name)| Page {
                page_id: format!("{id}-{n}"),
                page_name: (*page_name).to_string(),
                company_name: name.to_string(),
                image_url: format!("https://img.example/{id}-{n}.png"),
                thumbnail_url: format!("https://img.example/{id}-{n}-thumb.png"),
            })
            .collect(),
    }
}
