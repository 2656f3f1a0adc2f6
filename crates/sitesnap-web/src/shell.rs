//! Per-request UI shell state.
//!
//! The header search overlay, the mobile navigation drawer and the keyboard shortcut label are
//! derived from the request alone: `search=open` and `nav=open` query flags and the
//! `User-Agent` header. Templates receive the state explicitly.

use std::collections::HashMap;

/// Query parameter that opens the search overlay.
pub const SEARCH_PARAM: &str = "search";

/// Query parameter that opens the navigation drawer.
pub const NAV_PARAM: &str = "nav";

/// Value marking a flag as set.
const OPEN: &str = "open";

/// Platform family, for the search shortcut label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// macOS and iOS.
    Apple,
    /// Everything else.
    Other,
}

impl Platform {
    /// Guesses the platform from a `User-Agent` header.
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_ascii_lowercase();
        if ["macintosh", "mac os x", "iphone", "ipad"]
            .iter()
            .any(|marker| ua.contains(marker))
        {
            Self::Apple
        } else {
            Self::Other
        }
    }

    /// Label of the shortcut that opens search.
    pub fn shortcut_label(self) -> &'static str {
        match self {
            Self::Apple => "⌘K",
            Self::Other => "Ctrl K",
        }
    }
}

/// UI state shared by every page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellState {
    /// Whether the search overlay is open.
    pub search_open: bool,
    /// Whether the navigation drawer is open.
    pub nav_open: bool,
    /// Platform of the requesting browser.
    pub platform: Platform,
    /// Path being rendered, without the query.
    path: String,
}

impl ShellState {
    /// Derives the shell state for a request.
    pub fn from_request(path: &str, query: &HashMap<String, String>, user_agent: &str) -> Self {
        let flag = |name: &str| query.get(name).is_some_and(|value| value == OPEN);
        Self {
            search_open: flag(SEARCH_PARAM),
            nav_open: flag(NAV_PARAM),
            platform: Platform::from_user_agent(user_agent),
            path: path.to_string(),
        }
    }

    /// Path being rendered.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Shortcut label for the search button.
    pub fn shortcut_label(&self) -> &'static str {
        self.platform.shortcut_label()
    }

    /// Link that opens the search overlay on the current page.
    pub fn open_search_href(&self) -> String {
        format!("{}?{SEARCH_PARAM}={OPEN}", self.path)
    }

    /// Link that toggles the navigation drawer.
    pub fn toggle_nav_href(&self) -> String {
        if self.nav_open {
            self.path.clone()
        } else {
            format!("{}?{NAV_PARAM}={OPEN}", self.path)
        }
    }

    /// Link that closes any overlay.
    pub fn close_href(&self) -> &str {
        &self.path
    }

    /// Whether `section` is the active top-level tab.
    pub fn is_active(&self, section: &str) -> bool {
        self.path == section || self.path.starts_with(&format!("{section}/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    const MAC_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15";
    const LINUX_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101 Firefox/120.0";

    #[test]
    fn test_platform_detection() {
        assert_eq!(Platform::from_user_agent(MAC_UA), Platform::Apple);
        assert_eq!(Platform::from_user_agent(LINUX_UA), Platform::Other);
        assert_eq!(Platform::from_user_agent(""), Platform::Other);
        assert_eq!(Platform::Apple.shortcut_label(), "⌘K");
        assert_eq!(Platform::Other.shortcut_label(), "Ctrl K");
    }

    #[test]
    fn test_flags_from_query() {
        let shell = ShellState::from_request(
            "/companies",
            &query(&[("search", "open"), ("nav", "closed")]),
            LINUX_UA,
        );
        assert!(shell.search_open);
        assert!(!shell.nav_open);

        let closed = ShellState::from_request("/", &query(&[]), LINUX_UA);
        assert!(!closed.search_open);
        assert!(!closed.nav_open);
    }

    #[test]
    fn test_hrefs() {
        let shell = ShellState::from_request("/webpages", &query(&[("nav", "open")]), MAC_UA);
        assert_eq!(shell.open_search_href(), "/webpages?search=open");
        assert_eq!(shell.toggle_nav_href(), "/webpages");
        assert_eq!(shell.close_href(), "/webpages");
        assert_eq!(shell.shortcut_label(), "⌘K");
    }

    #[test]
    fn test_active_section() {
        let shell = ShellState::from_request("/companies/acme", &query(&[]), "");
        assert!(shell.is_active("/companies"));
        assert!(!shell.is_active("/industries"));
        assert!(!ShellState::from_request("/companiesx", &query(&[]), "").is_active("/companies"));
    }
}
