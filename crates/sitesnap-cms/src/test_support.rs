//! Builders shared by CMS unit tests.

use chrono::{TimeZone, Utc};
use sitesnap_catalog::{Company, Page, slugify};

/// Builds a published company created on day `id` of January 2023, so higher ids are newer.
pub fn company(id: u64, name: &str, industry: &str, page_names: &[&str]) -> Company {
    let day = u32::try_from(id.clamp(1, 28)).unwrap_or(1);
    Company {
        id,
        name: name.to_string(),
        slug: slugify(name),
        url: format!("https://{}.example", slugify(name)),
        description: format!("{name} description"),
        industry: industry.to_string(),
        created_at: Utc.with_ymd_and_hms(2023, 1, day, 0, 0, 0).single(),
        published_at: Utc.with_ymd_and_hms(2023, 2, 1, 0, 0, 0).single(),
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
