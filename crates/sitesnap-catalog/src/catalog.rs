//! Projections over a company snapshot.
//!
//! Every function here is pure and recomputes its output from the full snapshot, so callers
//! never have to invalidate anything when a new snapshot arrives.

use std::collections::HashMap;

use crate::{
    model::{Company, Industry, Page, WebpageGroup},
    slug::slugify,
};

/// Finds a company by its routing slug.
pub fn find_company<'a>(companies: &'a [Company], slug: &str) -> Option<&'a Company> {
    companies.iter().find(|company| company.slug == slug)
}

/// Groups companies by industry slug, sorted by industry name.
///
/// Companies with an empty industry are left out.
pub fn industries(companies: &[Company]) -> Vec<Industry> {
    let mut groups: Vec<Industry> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for company in companies {
        let slug = company.industry_slug();
        if slug.is_empty() {
            continue;
        }
        match index.get(&slug) {
            Some(&i) => groups[i].companies.push(company.clone()),
            None => {
                index.insert(slug.clone(), groups.len());
                groups.push(Industry {
                    name: company.industry.clone(),
                    slug,
                    companies: vec![company.clone()],
                });
            }
        }
    }

    groups.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    groups
}

/// Returns the industry with the given slug, if any company belongs to it.
pub fn find_industry(companies: &[Company], slug: &str) -> Option<Industry> {
    industries(companies)
        .into_iter()
        .find(|industry| industry.slug == slug)
}

/// Groups every page of every company by page-name slug, sorted by slug.
pub fn webpage_groups(companies: &[Company]) -> Vec<WebpageGroup> {
    let mut groups: Vec<WebpageGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for page in companies.iter().flat_map(|company| &company.pages) {
        let slug = page.name_slug();
        if slug.is_empty() {
            continue;
        }
        match index.get(&slug) {
            Some(&i) => groups[i].pages.push(page.clone()),
            None => {
                index.insert(slug.clone(), groups.len());
                groups.push(WebpageGroup {
                    name: page.page_name.clone(),
                    slug,
                    pages: vec![page.clone()],
                });
            }
        }
    }

    groups.sort_by(|a, b| a.slug.cmp(&b.slug));
    groups
}

/// Returns the webpage group with the given slug.
pub fn find_webpage_group(companies: &[Company], slug: &str) -> Option<WebpageGroup> {
    let pages: Vec<Page> = companies
        .iter()
        .flat_map(|company| &company.pages)
        .filter(|page| page.name_slug() == slug)
        .cloned()
        .collect();

    let name = pages.first()?.page_name.clone();
    Some(WebpageGroup {
        name,
        slug: slug.to_string(),
        pages,
    })
}

/// Industry slugs in first-seen order, without duplicates.
pub fn distinct_industry_slugs(companies: &[Company]) -> Vec<String> {
    dedup_slugs(companies.iter().map(|company| company.industry.as_str()))
}

/// Page-name slugs in first-seen order, without duplicates.
pub fn distinct_page_slugs(companies: &[Company]) -> Vec<String> {
    dedup_slugs(
        companies
            .iter()
            .flat_map(|company| &company.pages)
            .map(|page| page.page_name.as_str()),
    )
}

/// Slugifies each name, dropping empty and repeated slugs.
fn dedup_slugs<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut slugs: Vec<String> = Vec::new();
    for slug in names.map(slugify) {
        if !slug.is_empty() && !slugs.contains(&slug) {
            slugs.push(slug);
        }
    }
    slugs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::company;

    fn snapshot() -> Vec<Company> {
        vec![
            company(1, "Acme", "Retail", &["Home", "About"]),
            company(2, "Globex", "Fintech", &["Home", "Pricing"]),
            company(3, "Initech", "retail", &["About Us"]),
            company(4, "Hooli", "", &["Home"]),
        ]
    }

    #[test]
    fn test_find_company() {
        let companies = snapshot();
        assert_eq!(find_company(&companies, "globex").unwrap().id, 2);
        assert!(find_company(&companies, "umbrella").is_none());
    }

    #[test]
    fn test_industries_grouped_by_slug_and_sorted() {
        let groups = industries(&snapshot());
        let names: Vec<_> = groups.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Fintech", "Retail"]);

        let retail = &groups[1];
        assert_eq!(retail.slug, "retail");
        let members: Vec<_> = retail.companies.iter().map(|c| c.id).collect();
        assert_eq!(members, vec![1, 3]);
        assert_eq!(retail.cover(), Some("https://img.example/acme/home-thumb.png"));
    }

    #[test]
    fn test_find_industry() {
        let companies = snapshot();
        assert_eq!(find_industry(&companies, "fintech").unwrap().companies.len(), 1);
        assert!(find_industry(&companies, "energy").is_none());
    }

    #[test]
    fn test_webpage_groups() {
        let groups = webpage_groups(&snapshot());
        let slugs: Vec<_> = groups.iter().map(|g| g.slug.as_str()).collect();
        assert_eq!(slugs, vec!["about", "about-us", "home", "pricing"]);

        let home = groups.iter().find(|g| g.slug == "home").unwrap();
        let owners: Vec<_> = home.pages.iter().map(|p| p.company_name.as_str()).collect();
        assert_eq!(owners, vec!["Acme", "Globex", "Hooli"]);
    }

    #[test]
    fn test_find_webpage_group() {
        let companies = snapshot();
        let group = find_webpage_group(&companies, "about-us").unwrap();
        assert_eq!(group.name, "About Us");
        assert_eq!(group.pages.len(), 1);
        assert!(find_webpage_group(&companies, "careers").is_none());
    }

    #[test]
    fn test_distinct_industry_slugs() {
        assert_eq!(distinct_industry_slugs(&snapshot()), vec!["retail", "fintech"]);
    }

    #[test]
    fn test_distinct_page_slugs() {
        assert_eq!(
            distinct_page_slugs(&snapshot()),
            vec!["home", "about", "pricing", "about-us"]
        );
    }
}
