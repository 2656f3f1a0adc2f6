//! Gallery carousel controller.
//!
//! The full-screen viewer is a state machine over an ordered list of pages. Its state lives
//! entirely in the URL: a slug naming the active item and the item's stable id. Every request
//! re-derives the state from those two query parameters, so a stale or hand-edited URL can only
//! ever produce a closed viewer.

use std::{collections::HashMap, fmt, str::FromStr};

use url::form_urlencoded;

use crate::{CatalogError, model::Page, slug::slugify};

/// Query parameter carrying the active item's id.
pub const ID_PARAM: &str = "page_id";

/// Which list a gallery steps through; decides which name identifies an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryScope {
    /// The pages of one company, keyed by page name.
    Company,
    /// The pages sharing one page name, keyed by company name.
    Webpage,
}

impl GalleryScope {
    /// Query parameter carrying the item key slug.
    pub fn key_param(self) -> &'static str {
        match self {
            Self::Company => "page",
            Self::Webpage => "company",
        }
    }
}

/// An item a carousel can step through.
pub trait CarouselItem {
    /// Display name whose slug identifies the item within `scope`.
    fn item_key(&self, scope: GalleryScope) -> &str;
    /// Stable id of the item.
    fn item_id(&self) -> &str;
}

impl CarouselItem for Page {
    fn item_key(&self, scope: GalleryScope) -> &str {
        match scope {
            GalleryScope::Company => &self.page_name,
            GalleryScope::Webpage => &self.company_name,
        }
    }

    fn item_id(&self) -> &str {
        &self.page_id
    }
}

/// Viewer position as carried in the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerParams {
    /// Slug of the active item's key.
    pub key: String,
    /// Id of the active item.
    pub id: String,
}

impl ViewerParams {
    /// Params that select `item`.
    pub fn for_item<T: CarouselItem>(item: &T, scope: GalleryScope) -> Self {
        Self {
            key: slugify(item.item_key(scope)),
            id: item.item_id().to_string(),
        }
    }

    /// Reads params from a decoded query string. Both values must be present and non-empty.
    pub fn from_query(scope: GalleryScope, query: &HashMap<String, String>) -> Option<Self> {
        let key = query.get(scope.key_param()).filter(|v| !v.is_empty())?;
        let id = query.get(ID_PARAM).filter(|v| !v.is_empty())?;
        Some(Self {
            key: key.clone(),
            id: id.clone(),
        })
    }

    /// Encodes the params as a query string without the leading `?`.
    pub fn to_query(&self, scope: GalleryScope) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair(scope.key_param(), &self.key)
            .append_pair(ID_PARAM, &self.id)
            .finish()
    }
}

/// Keys the viewer responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Step to the previous item.
    ArrowLeft,
    /// Step to the next item.
    ArrowRight,
    /// Close the viewer.
    Escape,
}

impl Key {
    /// DOM `KeyboardEvent.key` name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ArrowLeft => "ArrowLeft",
            Self::ArrowRight => "ArrowRight",
            Self::Escape => "Escape",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Key {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ArrowLeft" => Ok(Self::ArrowLeft),
            "ArrowRight" => Ok(Self::ArrowRight),
            "Escape" | "Esc" => Ok(Self::Escape),
            other => Err(CatalogError::UnknownKey {
                key: other.to_string(),
            }),
        }
    }
}

/// Outcome of a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Nothing to do; the viewer was closed or the list is empty.
    Unchanged,
    /// Push these params.
    Moved(ViewerParams),
    /// Drop the viewer params from the URL.
    Closed,
}

/// Carousel over a borrowed, ordered item list.
#[derive(Debug, Clone)]
pub struct Carousel<'a, T> {
    /// Items in display order.
    items: &'a [T],
    /// Scope deciding how items are keyed.
    scope: GalleryScope,
    /// Index of the active item when open.
    active: Option<usize>,
}

impl<'a, T: CarouselItem> Carousel<'a, T> {
    /// A closed carousel.
    pub fn closed(items: &'a [T], scope: GalleryScope) -> Self {
        Self {
            items,
            scope,
            active: None,
        }
    }

    /// Derives the carousel from URL params.
    ///
    /// Open at the first item whose key slug and id both match; closed otherwise.
    pub fn from_params(items: &'a [T], scope: GalleryScope, params: Option<&ViewerParams>) -> Self {
        let active = params.and_then(|params| {
            items.iter().position(|item| {
                item.item_id() == params.id && slugify(item.item_key(scope)) == params.key
            })
        });
        Self {
            items,
            scope,
            active,
        }
    }

    /// Derives the carousel from a decoded query string.
    pub fn from_query(
        items: &'a [T],
        scope: GalleryScope,
        query: &HashMap<String, String>,
    ) -> Self {
        Self::from_params(items, scope, ViewerParams::from_query(scope, query).as_ref())
    }

    /// Gallery scope.
    pub fn scope(&self) -> GalleryScope {
        self.scope
    }

    /// Whether the viewer is showing an item.
    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// Index of the active item.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// The active item.
    pub fn active(&self) -> Option<&'a T> {
        self.active.and_then(|i| self.items.get(i))
    }

    /// Params for the current state; `None` when closed.
    pub fn params(&self) -> Option<ViewerParams> {
        self.active().map(|item| ViewerParams::for_item(item, self.scope))
    }

    /// Opens the viewer at `item`, matched by key slug and id. Returns `None` and stays
    /// unchanged if the item is not in the list.
    pub fn open(&mut self, item: &T) -> Option<ViewerParams> {
        let params = ViewerParams::for_item(item, self.scope);
        let index = self.items.iter().position(|candidate| {
            candidate.item_id() == params.id
                && slugify(candidate.item_key(self.scope)) == params.key
        })?;
        self.active = Some(index);
        Some(params)
    }

    /// Steps to the next item, wrapping to the first.
    pub fn next(&mut self) -> Option<ViewerParams> {
        let index = self.step_forward()?;
        self.active = Some(index);
        self.params()
    }

    /// Steps to the previous item, wrapping to the last.
    pub fn prev(&mut self) -> Option<ViewerParams> {
        let index = self.step_back()?;
        self.active = Some(index);
        self.params()
    }

    /// Closes the viewer. The URL loses its viewer params either way.
    pub fn close(&mut self) -> Navigation {
        self.active = None;
        Navigation::Closed
    }

    /// Params `next` would produce, without moving.
    pub fn peek_next(&self) -> Option<ViewerParams> {
        let index = self.step_forward()?;
        Some(ViewerParams::for_item(&self.items[index], self.scope))
    }

    /// Params `prev` would produce, without moving.
    pub fn peek_prev(&self) -> Option<ViewerParams> {
        let index = self.step_back()?;
        Some(ViewerParams::for_item(&self.items[index], self.scope))
    }

    /// Applies a key press. Keys are ignored while closed.
    pub fn handle_key(&mut self, key: Key) -> Navigation {
        if !self.is_open() {
            return Navigation::Unchanged;
        }
        let moved = match key {
            Key::ArrowRight => self.next(),
            Key::ArrowLeft => self.prev(),
            Key::Escape => return self.close(),
        };
        moved.map_or(Navigation::Unchanged, Navigation::Moved)
    }

    /// Index after the active one.
    fn step_forward(&self) -> Option<usize> {
        let len = self.items.len();
        let i = self.active.filter(|_| len > 0)?;
        Some((i + 1) % len)
    }

    /// Index before the active one.
    fn step_back(&self) -> Option<usize> {
        let len = self.items.len();
        let i = self.active.filter(|_| len > 0)?;
        Some((i + len - 1) % len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{company, page};

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_from_query_opens_on_match() {
        let acme = company(1, "Acme", "Retail", &["Home", "About Us", "Pricing"]);
        let carousel = Carousel::from_query(
            &acme.pages,
            GalleryScope::Company,
            &query(&[("page", "about-us"), ("page_id", "1-1")]),
        );
        assert!(carousel.is_open());
        assert_eq!(carousel.active().unwrap().page_name, "About Us");
    }

    #[test]
    fn test_from_query_requires_both_to_match() {
        let acme = company(1, "Acme", "Retail", &["Home", "About"]);
        for pairs in [
            &[("page", "about"), ("page_id", "1-0")][..],
            &[("page", "home"), ("page_id", "9-9")][..],
            &[("page", "home")][..],
            &[("page_id", "1-0")][..],
            &[("page", ""), ("page_id", "1-0")][..],
            &[][..],
        ] {
            let carousel =
                Carousel::from_query(&acme.pages, GalleryScope::Company, &query(pairs));
            assert!(!carousel.is_open(), "opened for {pairs:?}");
            assert!(carousel.params().is_none());
        }
    }

    #[test]
    fn test_duplicate_names_disambiguated_by_id() {
        let pages = vec![page("Acme", "Home", "a"), page("Acme", "Home", "b")];
        let params = ViewerParams {
            key: "home".into(),
            id: "b".into(),
        };
        let carousel = Carousel::from_params(&pages, GalleryScope::Company, Some(&params));
        assert_eq!(carousel.active_index(), Some(1));
    }

    #[test]
    fn test_webpage_scope_keys_on_company() {
        let pages = vec![page("Acme Corp", "Home", "1"), page("Globex", "Home", "2")];
        let carousel = Carousel::from_query(
            &pages,
            GalleryScope::Webpage,
            &query(&[("company", "globex"), ("page_id", "2")]),
        );
        assert_eq!(carousel.active_index(), Some(1));
        assert_eq!(
            carousel.params().unwrap().to_query(GalleryScope::Webpage),
            "company=globex&page_id=2"
        );
    }

    #[test]
    fn test_next_wraps_and_cycles() {
        let acme = company(1, "Acme", "Retail", &["Home", "About", "Pricing"]);
        let mut carousel = Carousel::closed(&acme.pages, GalleryScope::Company);
        let start = carousel.open(&acme.pages[1]).unwrap();

        for _ in 0..acme.pages.len() {
            carousel.next();
        }
        assert_eq!(carousel.params(), Some(start.clone()));

        for _ in 0..acme.pages.len() {
            carousel.prev();
        }
        assert_eq!(carousel.params(), Some(start));
    }

    #[test]
    fn test_wraparound_edges() {
        let acme = company(1, "Acme", "Retail", &["Home", "About", "Pricing"]);
        let mut carousel = Carousel::closed(&acme.pages, GalleryScope::Company);
        carousel.open(&acme.pages[2]);
        assert_eq!(carousel.next().unwrap().key, "home");
        assert_eq!(carousel.prev().unwrap().key, "pricing");
    }

    #[test]
    fn test_peek_does_not_move() {
        let acme = company(1, "Acme", "Retail", &["Home", "About"]);
        let mut carousel = Carousel::closed(&acme.pages, GalleryScope::Company);
        carousel.open(&acme.pages[0]);
        assert_eq!(carousel.peek_next().unwrap().key, "about");
        assert_eq!(carousel.peek_prev().unwrap().key, "about");
        assert_eq!(carousel.active_index(), Some(0));
    }

    #[test]
    fn test_open_then_close_leaves_nothing() {
        let acme = company(1, "Acme", "Retail", &["Home"]);
        let mut carousel = Carousel::closed(&acme.pages, GalleryScope::Company);
        carousel.open(&acme.pages[0]);
        assert_eq!(carousel.close(), Navigation::Closed);
        assert!(!carousel.is_open());
        assert!(carousel.params().is_none());
        assert!(carousel.peek_next().is_none());
        assert_eq!(carousel.close(), Navigation::Closed);
    }

    #[test]
    fn test_open_unknown_item() {
        let acme = company(1, "Acme", "Retail", &["Home"]);
        let stranger = page("Globex", "Home", "x");
        let mut carousel = Carousel::closed(&acme.pages, GalleryScope::Company);
        assert!(carousel.open(&stranger).is_none());
        assert!(!carousel.is_open());
    }

    #[test]
    fn test_closed_and_empty_are_noops() {
        let empty: Vec<Page> = Vec::new();
        let mut carousel = Carousel::closed(&empty, GalleryScope::Company);
        assert!(carousel.next().is_none());
        assert!(carousel.prev().is_none());
        assert_eq!(carousel.handle_key(Key::ArrowRight), Navigation::Unchanged);
        assert_eq!(carousel.handle_key(Key::Escape), Navigation::Unchanged);
    }

    #[test]
    fn test_keyboard_contract() {
        let acme = company(1, "Acme", "Retail", &["Home", "About"]);
        let mut carousel = Carousel::closed(&acme.pages, GalleryScope::Company);
        carousel.open(&acme.pages[0]);

        assert!(matches!(
            carousel.handle_key(Key::ArrowRight),
            Navigation::Moved(ViewerParams { ref key, .. }) if key == "about"
        ));
        assert!(matches!(
            carousel.handle_key(Key::ArrowLeft),
            Navigation::Moved(ViewerParams { ref key, .. }) if key == "home"
        ));
        assert_eq!(carousel.handle_key(Key::Escape), Navigation::Closed);
        assert!(!carousel.is_open());
    }

    #[test]
    fn test_key_parsing() {
        assert_eq!("ArrowLeft".parse::<Key>(), Ok(Key::ArrowLeft));
        assert_eq!("Esc".parse::<Key>(), Ok(Key::Escape));
        assert_eq!(
            "Enter".parse::<Key>(),
            Err(CatalogError::UnknownKey {
                key: "Enter".into()
            })
        );
        assert_eq!(Key::ArrowRight.to_string(), "ArrowRight");
    }

    #[test]
    fn test_query_encoding_escapes() {
        let params = ViewerParams {
            key: "a&b".into(),
            id: "1 2".into(),
        };
        assert_eq!(
            params.to_query(GalleryScope::Company),
            "page=a%26b&page_id=1+2"
        );
    }
}
