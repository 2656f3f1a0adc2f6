//! HTML pages: listings, galleries and the not-found page.

use std::sync::Arc;

use askama::Template;
use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use sitesnap_catalog::{GalleryScope, PageWindow, ViewerParams, capitalize_first, page_from_query};
use tracing::error;

use crate::{
    AppState,
    request::PageRequest,
    views::{Card, Gallery, Layout, Pager, Viewer, display_or_dash},
};

/// Number of companies shown on the home page.
const HOME_CARDS: usize = 12;

/// Page routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/companies", get(companies))
        .route("/companies/:slug", get(company))
        .route("/industries", get(industries))
        .route("/industries/:slug", get(industry))
        .route("/webpages", get(webpages))
        .route("/webpages/:slug", get(webpage_group))
}

/// Renders `template`, logging failures as a bare 500.
pub fn render<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            error!(error = %err, "template rendering failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Not-found page.
#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate {
    /// Page chrome.
    layout: Layout,
}

/// The 404 page.
pub fn not_found(state: &AppState, request: PageRequest) -> Response {
    let layout = Layout::new(&state.site, request.shell, request.preview, "404");
    (StatusCode::NOT_FOUND, render(&NotFoundTemplate { layout })).into_response()
}

/// Fallback for unknown routes.
pub async fn fallback(State(state): State<Arc<AppState>>, request: PageRequest) -> Response {
    not_found(&state, request)
}

/// Home page.
#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    /// Page chrome.
    layout: Layout,
    /// Grid cards.
    cards: Vec<Card>,
    /// Number of published companies.
    company_count: usize,
    /// Number of industries.
    industry_count: usize,
    /// Number of webpage groups.
    webpage_count: usize,
}

/// Landing page with the newest companies.
async fn home(State(state): State<Arc<AppState>>, request: PageRequest) -> Response {
    let companies = state.cms.companies(request.preview).await;
    let industries = state.cms.industries(request.preview).await;
    let webpages = state.cms.webpages(request.preview).await;
    let hosts = &state.site.image_domains;

    let template = HomeTemplate {
        cards: companies
            .iter()
            .take(HOME_CARDS)
            .map(|company| Card::company(company, hosts))
            .collect(),
        company_count: companies.len(),
        industry_count: industries.len(),
        webpage_count: webpages.len(),
        layout: Layout::new(&state.site, request.shell, request.preview, ""),
    };
    render(&template)
}

/// A grid of cards with an optional pagination bar.
#[derive(Template)]
#[template(path = "listing.html")]
struct ListingTemplate {
    /// Page chrome.
    layout: Layout,
    /// Page heading.
    heading: String,
    /// Grid cards.
    cards: Vec<Card>,
    /// Pagination bar.
    pager: Option<Pager>,
}

/// Paginated company listing. Pages past the end render an empty grid.
async fn companies(State(state): State<Arc<AppState>>, request: PageRequest) -> Response {
    let index = page_from_query(request.param("page"));
    let listing = state.cms.companies_page(index, request.preview).await;
    let hosts = &state.site.image_domains;

    let template = ListingTemplate {
        heading: String::from("Companies"),
        cards: listing
            .companies
            .iter()
            .map(|company| Card::company(company, hosts))
            .collect(),
        pager: Pager::new(&PageWindow::new(listing.page_count, index), request.path()),
        layout: Layout::new(&state.site, request.shell, request.preview, "Companies"),
    };
    render(&template)
}

/// Every industry.
async fn industries(State(state): State<Arc<AppState>>, request: PageRequest) -> Response {
    let hosts = &state.site.image_domains;
    let template = ListingTemplate {
        heading: String::from("Industries"),
        cards: state
            .cms
            .industries(request.preview)
            .await
            .iter()
            .map(|industry| Card::industry(industry, hosts))
            .collect(),
        pager: None,
        layout: Layout::new(&state.site, request.shell, request.preview, "Industries"),
    };
    render(&template)
}

/// Companies in one industry.
async fn industry(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    request: PageRequest,
) -> Response {
    let Some(industry) = state.cms.industry(&slug, request.preview).await else {
        return not_found(&state, request);
    };
    let hosts = &state.site.image_domains;
    let heading = capitalize_first(&industry.name);

    let template = ListingTemplate {
        cards: industry
            .companies
            .iter()
            .map(|company| Card::company(company, hosts))
            .collect(),
        pager: None,
        layout: Layout::new(&state.site, request.shell, request.preview, &heading),
        heading,
    };
    render(&template)
}

/// Every webpage group.
async fn webpages(State(state): State<Arc<AppState>>, request: PageRequest) -> Response {
    let hosts = &state.site.image_domains;
    let template = ListingTemplate {
        heading: String::from("Webpages"),
        cards: state
            .cms
            .webpages(request.preview)
            .await
            .iter()
            .map(|group| Card::webpage_group(group, hosts))
            .collect(),
        pager: None,
        layout: Layout::new(&state.site, request.shell, request.preview, "Webpages"),
    };
    render(&template)
}

/// A company gallery.
#[derive(Template)]
#[template(path = "company.html")]
struct CompanyTemplate {
    /// Page chrome.
    layout: Layout,
    /// Company name.
    name: String,
    /// Industry label.
    industry: String,
    /// Industry page link, empty when the company has no industry.
    industry_href: String,
    /// Company website.
    url: String,
    /// Company description.
    description: String,
    /// Grid cards.
    cards: Vec<Card>,
    /// Open viewer.
    viewer: Option<Viewer>,
}

/// A company's pages, with the viewer open when the URL selects one.
async fn company(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    request: PageRequest,
) -> Response {
    let Some(company) = state.cms.company(&slug, request.preview).await else {
        return not_found(&state, request);
    };

    let params = ViewerParams::from_query(GalleryScope::Company, &request.query);
    let gallery = Gallery::new(
        &company.pages,
        GalleryScope::Company,
        request.path(),
        params.as_ref(),
        &state.site.image_domains,
    );
    let industry_slug = company.industry_slug();

    let template = CompanyTemplate {
        layout: Layout::new(&state.site, request.shell, request.preview, &company.name),
        name: display_or_dash(&company.name),
        industry_href: if industry_slug.is_empty() {
            String::new()
        } else {
            format!("/industries/{industry_slug}")
        },
        industry: company.industry,
        url: company.url,
        description: company.description,
        cards: gallery.cards,
        viewer: gallery.viewer,
    };
    render(&template)
}

/// A webpage group gallery.
#[derive(Template)]
#[template(path = "group.html")]
struct GroupTemplate {
    /// Page chrome.
    layout: Layout,
    /// Page heading.
    heading: String,
    /// Grid cards.
    cards: Vec<Card>,
    /// Open viewer.
    viewer: Option<Viewer>,
    /// Pagination bar.
    pager: Option<Pager>,
}

/// Every company's page with one name, paginated, with the viewer over the current page.
async fn webpage_group(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    request: PageRequest,
) -> Response {
    let Some(group) = state.cms.webpage_group(&slug, request.preview).await else {
        return not_found(&state, request);
    };

    let paginator = state.cms.paginator();
    let index = page_from_query(request.param("page"));
    let window = paginator.window(group.pages.len(), index);
    let base = if index == 0 {
        request.path().to_string()
    } else {
        format!("{}?page={}", request.path(), index + 1)
    };

    let params = ViewerParams::from_query(GalleryScope::Webpage, &request.query);
    let gallery = Gallery::new(
        paginator.slice(&group.pages, index),
        GalleryScope::Webpage,
        &base,
        params.as_ref(),
        &state.site.image_domains,
    );

    let pager = Pager::new(&window, request.path());

    let template = GroupTemplate {
        layout: Layout::new(&state.site, request.shell, request.preview, &group.name),
        pager,
        heading: group.name,
        cards: gallery.cards,
        viewer: gallery.viewer,
    };
    render(&template)
}
