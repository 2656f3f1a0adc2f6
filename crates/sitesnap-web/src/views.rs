//! View models handed to templates.
//!
//! Templates only format strings; every decision about links, images and viewer state is made
//! here from the catalog types.

use sitesnap_catalog::{
    Carousel, Company, GalleryScope, Industry, Key, Page, PageLink, PageWindow,
    ViewerParams, WebpageGroup,
};
use sitesnap_config::SiteSettings;

use crate::shell::ShellState;

/// Page chrome: metadata, shell state and preview banner.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Site name.
    pub site_name: String,
    /// Document title.
    pub title: String,
    /// Meta description.
    pub description: String,
    /// Open Graph image, empty when unset.
    pub og_image: String,
    /// Canonical URL of the page.
    pub canonical: String,
    /// Shell UI state.
    pub shell: ShellState,
    /// Whether drafts are being shown.
    pub preview: bool,
}

impl Layout {
    /// Builds the chrome for a page titled `title`.
    pub fn new(site: &SiteSettings, shell: ShellState, preview: bool, title: &str) -> Self {
        let title = if title.is_empty() {
            site.name.clone()
        } else {
            format!("{title} - {}", site.name)
        };
        Self {
            site_name: site.name.clone(),
            title,
            description: site.description.clone(),
            og_image: site.og_image.clone(),
            canonical: format!("{}{}", site.base_url, shell.path()),
            shell,
            preview,
        }
    }
}

/// A grid card. Cards without an image render as a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Heading.
    pub title: String,
    /// Link target.
    pub href: String,
    /// Image URL.
    pub image: Option<String>,
    /// Secondary line.
    pub caption: String,
}

impl Card {
    /// Card for a company listing.
    pub fn company(company: &Company, hosts: &[String]) -> Self {
        Self {
            title: display_or_dash(&company.name),
            href: company.href(),
            image: first_thumbnail(&company.pages, hosts),
            caption: display_or_dash(&company.industry),
        }
    }

    /// Card for an industry.
    pub fn industry(industry: &Industry, hosts: &[String]) -> Self {
        Self {
            title: industry.name.clone(),
            href: industry.href(),
            image: industry
                .companies
                .iter()
                .find_map(|company| first_thumbnail(&company.pages, hosts)),
            caption: count_label(industry.companies.len(), "company", "companies"),
        }
    }

    /// Card for a webpage group.
    pub fn webpage_group(group: &WebpageGroup, hosts: &[String]) -> Self {
        Self {
            title: group.name.clone(),
            href: group.href(),
            image: first_thumbnail(&group.pages, hosts),
            caption: count_label(group.pages.len(), "site", "sites"),
        }
    }

    /// Card for one page inside a gallery; links open the viewer.
    pub fn gallery_page(page: &Page, scope: GalleryScope, path: &str, hosts: &[String]) -> Self {
        let (title, caption) = match scope {
            GalleryScope::Company => (&page.page_name, &page.company_name),
            GalleryScope::Webpage => (&page.company_name, &page.page_name),
        };
        Self {
            title: display_or_dash(title),
            href: viewer_href(path, &ViewerParams::for_item(page, scope), scope),
            image: page.thumbnail(hosts).map(str::to_string),
            caption: caption.clone(),
        }
    }
}

/// The full-screen viewer over a gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    /// Heading.
    pub title: String,
    /// Secondary line.
    pub caption: String,
    /// Full-size image.
    pub image: Option<String>,
    /// `n / total`.
    pub position: String,
    /// Link that closes the viewer.
    pub close_href: String,
    /// Link to the previous item.
    pub prev_href: String,
    /// Link to the next item.
    pub next_href: String,
    /// Key bound to the previous link.
    pub prev_key: &'static str,
    /// Key bound to the next link.
    pub next_key: &'static str,
    /// Key bound to the close link.
    pub close_key: &'static str,
}

impl Viewer {
    /// Builds the viewer for an open carousel; `None` when closed.
    pub fn from_carousel(
        carousel: &Carousel<'_, Page>,
        len: usize,
        path: &str,
        hosts: &[String],
    ) -> Option<Self> {
        let page = carousel.active()?;
        let index = carousel.active_index()?;
        let scope = carousel.scope();
        let prev = carousel.peek_prev()?;
        let next = carousel.peek_next()?;
        let card = Card::gallery_page(page, scope, path, hosts);

        Some(Self {
            title: card.title,
            caption: card.caption,
            image: page.image(hosts).map(str::to_string),
            position: format!("{} / {len}", index + 1),
            close_href: path.to_string(),
            prev_href: viewer_href(path, &prev, scope),
            next_href: viewer_href(path, &next, scope),
            prev_key: Key::ArrowLeft.as_str(),
            next_key: Key::ArrowRight.as_str(),
            close_key: Key::Escape.as_str(),
        })
    }
}

/// One entry of the pagination bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerLink {
    /// Text shown.
    pub label: String,
    /// Link target; `None` for breaks.
    pub href: Option<String>,
    /// Whether this is the current page.
    pub current: bool,
}

/// The pagination bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    /// Page links and breaks.
    pub links: Vec<PagerLink>,
    /// Previous page link.
    pub prev_href: Option<String>,
    /// Next page link.
    pub next_href: Option<String>,
}

impl Pager {
    /// Builds the bar for `window` on `path`. `None` when everything fits on one page.
    pub fn new(window: &PageWindow, path: &str) -> Option<Self> {
        if !window.is_paginated() {
            return None;
        }
        let href = |number: usize| format!("{path}?page={number}");
        let links = window
            .links()
            .iter()
            .map(|link| match *link {
                PageLink::Page { number, current } => PagerLink {
                    label: number.to_string(),
                    href: Some(href(number)),
                    current,
                },
                PageLink::Break => PagerLink {
                    label: String::from("..."),
                    href: None,
                    current: false,
                },
            })
            .collect();
        Some(Self {
            links,
            prev_href: window.prev().map(href),
            next_href: window.next().map(href),
        })
    }
}

/// A gallery: the cards and, when the URL selects one, the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    /// One card per page.
    pub cards: Vec<Card>,
    /// Open viewer.
    pub viewer: Option<Viewer>,
}

impl Gallery {
    /// Builds the gallery for `pages` at `path`, opening the viewer from `params`.
    ///
    /// `path` is the URL the viewer closes to; it may carry a listing `page` parameter.
    pub fn new(
        pages: &[Page],
        scope: GalleryScope,
        path: &str,
        params: Option<&ViewerParams>,
        hosts: &[String],
    ) -> Self {
        let carousel = Carousel::from_params(pages, scope, params);
        Self {
            cards: pages
                .iter()
                .map(|page| Card::gallery_page(page, scope, path, hosts))
                .collect(),
            viewer: Viewer::from_carousel(&carousel, pages.len(), path, hosts),
        }
    }
}

/// Link that opens the viewer at `params`. `path` may already carry a query.
fn viewer_href(path: &str, params: &ViewerParams, scope: GalleryScope) -> String {
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{path}{separator}{}", params.to_query(scope))
}

/// Thumbnail of the first page, if allowed.
fn first_thumbnail(pages: &[Page], hosts: &[String]) -> Option<String> {
    pages
        .first()
        .and_then(|page| page.thumbnail(hosts))
        .map(str::to_string)
}

/// `1 company`, `3 companies`.
fn count_label(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Missing text renders as `-`.
pub fn display_or_dash(text: &str) -> String {
    if text.trim().is_empty() {
        String::from("-")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::company;

    fn params(key: &str, id: &str) -> ViewerParams {
        ViewerParams {
            key: key.to_string(),
            id: id.to_string(),
        }
    }

    #[test]
    fn test_company_card_placeholder() {
        let mut acme = company(1, "Acme", "", &[]);
        let card = Card::company(&acme, &[]);
        assert_eq!(card.href, "/companies/acme");
        assert!(card.image.is_none());
        assert_eq!(card.caption, "-");

        acme = company(1, "Acme", "Retail", &["Home"]);
        let blocked = Card::company(&acme, &["cdn.example".to_string()]);
        assert!(blocked.image.is_none());
        let allowed = Card::company(&acme, &["img.example".to_string()]);
        assert_eq!(allowed.image.as_deref(), Some("https://img.example/1-0-thumb.png"));
    }

    #[test]
    fn test_gallery_closed_without_params() {
        let acme = company(1, "Acme", "Retail", &["Home", "About"]);
        let scope = GalleryScope::Company;
        let gallery = Gallery::new(&acme.pages, scope, "/companies/acme", None, &[]);
        assert_eq!(gallery.cards.len(), 2);
        assert_eq!(gallery.cards[1].href, "/companies/acme?page=about&page_id=1-1");
        assert!(gallery.viewer.is_none());
    }

    #[test]
    fn test_gallery_viewer_wraps() {
        let acme = company(1, "Acme", "Retail", &["Home", "About", "Pricing"]);
        let path = "/companies/acme";
        let gallery = Gallery::new(
            &acme.pages,
            GalleryScope::Company,
            path,
            Some(&params("home", "1-0")),
            &[],
        );
        let viewer = gallery.viewer.unwrap();
        assert_eq!(viewer.title, "Home");
        assert_eq!(viewer.position, "1 / 3");
        assert_eq!(viewer.prev_href, "/companies/acme?page=pricing&page_id=1-2");
        assert_eq!(viewer.next_href, "/companies/acme?page=about&page_id=1-1");
        assert_eq!(viewer.close_href, path);
        assert_eq!(viewer.image.as_deref(), Some("https://img.example/1-0.png"));
    }

    #[test]
    fn test_gallery_stale_params_close() {
        let acme = company(1, "Acme", "Retail", &["Home"]);
        let gallery = Gallery::new(
            &acme.pages,
            GalleryScope::Company,
            "/companies/acme",
            Some(&params("about", "1-0")),
            &[],
        );
        assert!(gallery.viewer.is_none());
    }

    #[test]
    fn test_webpage_scope_cards() {
        let acme = company(1, "Acme", "Retail", &["Home"]);
        let globex = company(2, "Globex", "Fintech", &["Home"]);
        let pages = vec![acme.pages[0].clone(), globex.pages[0].clone()];
        let gallery = Gallery::new(
            &pages,
            GalleryScope::Webpage,
            "/webpages/home",
            Some(&params("globex", "2-0")),
            &[],
        );
        assert_eq!(gallery.cards[0].title, "Acme");
        assert_eq!(gallery.cards[0].href, "/webpages/home?company=acme&page_id=1-0");
        assert_eq!(gallery.viewer.unwrap().next_href, "/webpages/home?company=acme&page_id=1-0");
    }

    #[test]
    fn test_viewer_keeps_listing_page() {
        let acme = company(1, "Acme", "Retail", &["Home"]);
        let base = "/webpages/home?page=2";
        let gallery = Gallery::new(&acme.pages, GalleryScope::Webpage, base, None, &[]);
        assert_eq!(gallery.cards[0].href, "/webpages/home?page=2&company=acme&page_id=1-0");
    }

    #[test]
    fn test_pager() {
        assert!(Pager::new(&PageWindow::new(1, 0), "/companies").is_none());

        let pager = Pager::new(&PageWindow::new(10, 4), "/companies").unwrap();
        let labels: Vec<&str> = pager.links.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["1", "...", "4", "5", "6", "...", "10"]);
        assert_eq!(pager.prev_href.as_deref(), Some("/companies?page=4"));
        assert_eq!(pager.next_href.as_deref(), Some("/companies?page=6"));
        assert!(pager.links[3].current);
        assert!(pager.links[1].href.is_none());
    }

    #[test]
    fn test_layout_title_and_canonical() {
        let site = SiteSettings {
            base_url: "https://sitesnap.design".into(),
            ..SiteSettings::default()
        };
        let shell = ShellState::from_request("/industries", &Default::default(), "");
        let layout = Layout::new(&site, shell.clone(), false, "Industries");
        assert_eq!(layout.title, "Industries - sitesnap.design");
        assert_eq!(layout.canonical, "https://sitesnap.design/industries");

        assert_eq!(Layout::new(&site, shell, false, "").title, "sitesnap.design");
    }
}
