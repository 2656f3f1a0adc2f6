//! Offset pagination for listing pages.
//!
//! Page indices are 0-based internally and 1-based in URLs.

/// Number of page links shown around the current page.
const PAGE_RANGE: usize = 3;

/// Number of page links always shown at each end.
const MARGIN_PAGES: usize = 1;

/// Slices listings into fixed-size pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    /// Items per page.
    page_size: usize,
}

impl Paginator {
    /// Creates a paginator with the given page size.
    pub fn new(page_size: usize) -> Self {
        Self { page_size }
    }

    /// Items per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages needed for `total` items. Zero when the page size is zero.
    pub fn page_count(&self, total: usize) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        total.div_ceil(self.page_size)
    }

    /// Returns the items on page `index`, or an empty slice when out of range.
    pub fn slice<'a, T>(&self, items: &'a [T], index: usize) -> &'a [T] {
        let Some(start) = index.checked_mul(self.page_size) else {
            return &[];
        };
        if start >= items.len() {
            return &[];
        }
        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }

    /// Builds the link window for page `index` of a listing with `total` items.
    pub fn window(&self, total: usize, index: usize) -> PageWindow {
        PageWindow::new(self.page_count(total), index)
    }
}

/// Converts the 1-based `page` query value to a 0-based index.
///
/// Missing, non-numeric and zero values all select the first page.
pub fn page_from_query(raw: Option<&str>) -> usize {
    raw.and_then(|value| value.trim().parse::<usize>().ok())
        .and_then(|page| page.checked_sub(1))
        .unwrap_or(0)
}

/// One entry in a rendered pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    /// A link to a page.
    Page {
        /// 1-based page number.
        number: usize,
        /// Whether this is the page being shown.
        current: bool,
    },
    /// A gap of elided pages.
    Break,
}

/// The pagination bar for one listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    /// 0-based index of the page being shown.
    current: usize,
    /// Total number of pages.
    count: usize,
    /// Links to render, in order.
    links: Vec<PageLink>,
}

impl PageWindow {
    /// Computes the link window: the margin pages at each end, up to three pages around the
    /// current one, and a break wherever pages are elided.
    pub fn new(count: usize, current: usize) -> Self {
        let mut links = Vec::new();

        if count <= PAGE_RANGE + 2 * MARGIN_PAGES {
            links.extend((0..count).map(|i| PageLink::Page {
                number: i + 1,
                current: i == current,
            }));
        } else {
            let start = current
                .saturating_sub(PAGE_RANGE / 2)
                .min(count - PAGE_RANGE);
            let end = start + PAGE_RANGE;

            for i in 0..count {
                let shown = i < MARGIN_PAGES
                    || i >= count - MARGIN_PAGES
                    || (start..end).contains(&i);
                if shown {
                    links.push(PageLink::Page {
                        number: i + 1,
                        current: i == current,
                    });
                } else if links.last() != Some(&PageLink::Break) {
                    links.push(PageLink::Break);
                }
            }
        }

        Self {
            current,
            count,
            links,
        }
    }

    /// Links to render.
    pub fn links(&self) -> &[PageLink] {
        &self.links
    }

    /// Total number of pages.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether more than one page exists.
    pub fn is_paginated(&self) -> bool {
        self.count > 1
    }

    /// 1-based number of the previous page, if any.
    pub fn prev(&self) -> Option<usize> {
        (self.current > 0 && self.current < self.count).then_some(self.current)
    }

    /// 1-based number of the next page, if any.
    pub fn next(&self) -> Option<usize> {
        (self.current + 1 < self.count).then_some(self.current + 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Renders a window compactly: `[n]` for the current page, `…` for breaks.
    fn render(window: &PageWindow) -> String {
        window
            .links()
            .iter()
            .map(|link| match link {
                PageLink::Page {
                    number,
                    current: true,
                } => format!("[{number}]"),
                PageLink::Page { number, .. } => number.to_string(),
                PageLink::Break => "…".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_page_count() {
        let paginator = Paginator::new(60);
        assert_eq!(paginator.page_count(130), 3);
        assert_eq!(paginator.page_count(120), 2);
        assert_eq!(paginator.page_count(0), 0);
        assert_eq!(Paginator::new(0).page_count(10), 0);
    }

    #[test]
    fn test_slice() {
        let items: Vec<usize> = (0..130).collect();
        let paginator = Paginator::new(60);
        assert_eq!(paginator.slice(&items, 0).len(), 60);
        assert_eq!(paginator.slice(&items, 2), &items[120..130]);
        assert!(paginator.slice(&items, 3).is_empty());
        assert!(paginator.slice(&items, usize::MAX).is_empty());
    }

    #[test]
    fn test_page_from_query() {
        assert_eq!(page_from_query(None), 0);
        assert_eq!(page_from_query(Some("1")), 0);
        assert_eq!(page_from_query(Some("3")), 2);
        assert_eq!(page_from_query(Some("0")), 0);
        assert_eq!(page_from_query(Some("two")), 0);
        assert_eq!(page_from_query(Some("-1")), 0);
    }

    #[test]
    fn test_window_small_counts_show_everything() {
        assert_eq!(render(&PageWindow::new(1, 0)), "[1]");
        assert_eq!(render(&PageWindow::new(5, 2)), "1 2 [3] 4 5");
        assert!(PageWindow::new(0, 0).links().is_empty());
    }

    #[test]
    fn test_window_breaks() {
        assert_eq!(render(&PageWindow::new(10, 0)), "[1] 2 3 … 10");
        assert_eq!(render(&PageWindow::new(10, 4)), "1 … 4 [5] 6 … 10");
        assert_eq!(render(&PageWindow::new(10, 9)), "1 … 8 9 [10]");
        assert_eq!(render(&PageWindow::new(10, 2)), "1 2 [3] 4 … 10");
    }

    #[test]
    fn test_window_prev_next() {
        let first = PageWindow::new(3, 0);
        assert_eq!(first.prev(), None);
        assert_eq!(first.next(), Some(2));

        let last = PageWindow::new(3, 2);
        assert_eq!(last.prev(), Some(2));
        assert_eq!(last.next(), None);

        let beyond = PageWindow::new(3, 7);
        assert_eq!(beyond.prev(), None);
        assert_eq!(beyond.next(), None);
        assert!(beyond.is_paginated());
    }
}
