//! Grouping of ranked matches for display.
//!
//! Matches are split into companies, industries and pages by the field that matched, then
//! counted by value. Buckets keep first-seen order, so they inherit the engine's ranking.

use serde::Serialize;
use sitesnap_catalog::slugify;

use crate::{
    engine::SearchMatch,
    index::{SearchIndex, SearchKey},
};

/// One grouped value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupEntry {
    /// The matched value.
    pub value: String,
    /// Route slug for linking.
    pub slug: String,
    /// Number of matches carrying this value.
    pub count: usize,
}

impl GroupEntry {
    /// Route of the entry within `bucket`.
    pub fn href(&self, bucket: SearchKey) -> String {
        match bucket {
            SearchKey::Title => format!("/companies/{}", self.slug),
            SearchKey::Industry => format!("/industries/{}", self.slug),
            SearchKey::Pages => format!("/webpages/{}", self.slug),
        }
    }
}

/// Search results grouped by matched field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupedResults {
    /// Title matches.
    pub companies: Vec<GroupEntry>,
    /// Industry matches.
    pub industries: Vec<GroupEntry>,
    /// Page-name matches.
    pub pages: Vec<GroupEntry>,
}

impl GroupedResults {
    /// Whether every bucket is empty.
    pub fn is_empty(&self) -> bool {
        self.companies.is_empty() && self.industries.is_empty() && self.pages.is_empty()
    }

    /// Bucket for `key`.
    pub fn bucket(&self, key: SearchKey) -> &[GroupEntry] {
        match key {
            SearchKey::Title => &self.companies,
            SearchKey::Industry => &self.industries,
            SearchKey::Pages => &self.pages,
        }
    }

    /// Mutable bucket for `key`.
    fn bucket_mut(&mut self, key: SearchKey) -> &mut Vec<GroupEntry> {
        match key {
            SearchKey::Title => &mut self.companies,
            SearchKey::Industry => &mut self.industries,
            SearchKey::Pages => &mut self.pages,
        }
    }
}

/// Groups `matches` by field and value.
///
/// Company entries link to the record's slug; industry and page entries link to the slug of
/// the value. Field matches without a key are dropped.
pub fn group_matches(matches: &[SearchMatch], index: &SearchIndex) -> GroupedResults {
    let mut grouped = GroupedResults::default();

    for result in matches {
        for field in &result.matches {
            let Some(key) = field.key else {
                continue;
            };
            let bucket = grouped.bucket_mut(key);
            if let Some(entry) = bucket.iter_mut().find(|entry| entry.value == field.value) {
                entry.count += 1;
                continue;
            }
            let slug = match key {
                SearchKey::Title => index
                    .get(result.index)
                    .map_or_else(|| slugify(&field.value), |record| record.slug.clone()),
                SearchKey::Industry | SearchKey::Pages => slugify(&field.value),
            };
            bucket.push(GroupEntry {
                value: field.value.clone(),
                slug,
                count: 1,
            });
        }
    }

    grouped
}
