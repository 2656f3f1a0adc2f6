//! `/sitemap.xml`.

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::header::CONTENT_TYPE,
    response::IntoResponse,
    routing::get,
};
use sitesnap_catalog::{Company, distinct_industry_slugs, distinct_page_slugs};

use crate::AppState;

/// Top-level routes listed before any record.
const STATIC_ROUTES: &[&str] = &["", "/companies", "/industries", "/webpages"];

/// Sitemap route.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/sitemap.xml", get(sitemap))
}

/// Serves the sitemap for the published snapshot.
async fn sitemap(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let companies = state.cms.companies(false).await;
    (
        [(CONTENT_TYPE, "text/xml")],
        build_sitemap(&state.site.base_url, &companies),
    )
}

/// Renders the sitemap: static routes, every company, then each industry and page name once.
pub fn build_sitemap(base_url: &str, companies: &[Company]) -> String {
    let base = base_url.trim_end_matches('/');
    let mut locations: Vec<String> = STATIC_ROUTES
        .iter()
        .map(|route| format!("{base}{route}"))
        .collect();
    locations.extend(
        companies
            .iter()
            .filter(|company| !company.slug.is_empty())
            .map(|company| format!("{base}{}", company.href())),
    );
    locations.extend(
        distinct_industry_slugs(companies)
            .into_iter()
            .map(|slug| format!("{base}/industries/{slug}")),
    );
    locations.extend(
        distinct_page_slugs(companies)
            .into_iter()
            .map(|slug| format!("{base}/webpages/{slug}")),
    );

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for loc in &locations {
        xml.push_str("  <url>\n    <loc>");
        xml.push_str(&xml_escape(loc));
        xml.push_str("</loc>\n  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Escapes text for an XML element body.
fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
