//! Pagination Controller.
//!
//! Computes which page tokens a pagination bar shows and guards page
//! navigation. Requests outside `[1, total_pages]` are ignored rather than
//! clamped, unlike [`crate::FilterStore::set_page`] which accepts any page.

use std::fmt;

use shop_model::PageToken;

/// Page buttons shown before the window collapses into ellipses.
pub const DEFAULT_MAX_VISIBLE: u32 = 5;

/// Choices offered by the page-size selector.
pub const PAGE_SIZE_OPTIONS: [u32; 3] = [12, 24, 48];

/// Number of pages needed for `total_items` (ceiling division).
pub fn total_pages(total_items: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total_items.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Page tokens to render for `current` out of `total` pages.
///
/// Up to `max_visible` pages are listed in full. Beyond that the first and
/// last pages are always shown, plus `current` and its neighbours, with an
/// ellipsis standing in for each skipped run.
pub fn page_window(current: u32, total: u32, max_visible: u32) -> Vec<PageToken> {
    if total <= max_visible || total <= 2 {
        return (1..=total).map(PageToken::Page).collect();
    }

    let current = current.clamp(1, total);
    let start = current.saturating_sub(1).max(2);
    let end = current.saturating_add(1).min(total - 1);

    let mut tokens = Vec::with_capacity(7);
    tokens.push(PageToken::Page(1));
    if start > 2 {
        tokens.push(PageToken::Ellipsis);
    }
    tokens.extend((start..=end).map(PageToken::Page));
    if end < total - 1 {
        tokens.push(PageToken::Ellipsis);
    }
    tokens.push(PageToken::Page(total));
    tokens
}

pub fn can_go_previous(current: u32) -> bool {
    current > 1
}

/// Both the locally computed page count and the data source's `has_more`
/// must allow it.
pub fn can_go_next(current: u32, total: u32, has_more: bool) -> bool {
    current < total && has_more
}

/// Outcome of a page navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChange {
    /// Page to show after the request.
    pub page: u32,
    /// Whether the view should scroll back to the top of the grid.
    pub scroll_to_top: bool,
}

impl PageChange {
    fn unchanged(page: u32) -> Self {
        Self {
            page,
            scroll_to_top: false,
        }
    }

    /// Whether the request moved to a different page.
    pub fn changed(&self) -> bool {
        self.scroll_to_top
    }
}

/// Move to `requested` if it is a different page within `[1, total]`.
pub fn go_to_page(requested: u32, current: u32, total: u32) -> PageChange {
    if requested < 1 || requested > total || requested == current {
        return PageChange::unchanged(current);
    }
    PageChange {
        page: requested,
        scroll_to_top: true,
    }
}

// =============================================================================
// PAGE SUMMARY
// =============================================================================

/// Item range shown on the current page, e.g. "Showing 13–24 of 57".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSummary {
    pub first_item: u64,
    pub last_item: u64,
    pub total_items: u64,
}

impl PageSummary {
    /// Range for `page`. A page past the last one yields an empty range
    /// (`first_item == 0`).
    pub fn new(page: u32, page_size: u32, total_items: u64) -> Self {
        let size = u64::from(page_size);
        let first_item = (u64::from(page.max(1)) - 1) * size + 1;
        if size == 0 || first_item > total_items {
            return Self {
                first_item: 0,
                last_item: 0,
                total_items,
            };
        }
        Self {
            first_item,
            last_item: (first_item + size - 1).min(total_items),
            total_items,
        }
    }

    /// Whether the page shows no items.
    pub fn is_empty(&self) -> bool {
        self.first_item == 0
    }
}

impl fmt::Display for PageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total_items == 0 {
            f.write_str("No products found")
        } else if self.is_empty() {
            write!(f, "No products on this page ({} total)", self.total_items)
        } else {
            write!(
                f,
                "Showing {}–{} of {}",
                self.first_item, self.last_item, self.total_items
            )
        }
    }
}

// =============================================================================
// PAGINATOR
// =============================================================================

/// Pagination bar state for one listing response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    current: u32,
    total_pages: u32,
    has_more: bool,
    max_visible: u32,
}

impl Paginator {
    pub fn new(current: u32, total_pages: u32, has_more: bool) -> Self {
        Self {
            current,
            total_pages,
            has_more,
            max_visible: DEFAULT_MAX_VISIBLE,
        }
    }

    /// Build from an item count as returned by the data source.
    pub fn from_total_items(current: u32, page_size: u32, total_items: u64) -> Self {
        let total = total_pages(total_items, page_size);
        Self::new(current, total, current < total)
    }

    #[must_use]
    pub fn with_max_visible(mut self, max_visible: u32) -> Self {
        self.max_visible = max_visible;
        self
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Apply a fresh response from the data source.
    pub fn update_totals(&mut self, total_pages: u32, has_more: bool) {
        self.total_pages = total_pages;
        self.has_more = has_more;
    }

    pub fn window(&self) -> Vec<PageToken> {
        page_window(self.current, self.total_pages, self.max_visible)
    }

    pub fn can_go_previous(&self) -> bool {
        can_go_previous(self.current)
    }

    pub fn can_go_next(&self) -> bool {
        can_go_next(self.current, self.total_pages, self.has_more)
    }

    pub fn go_to(&mut self, requested: u32) -> PageChange {
        let change = go_to_page(requested, self.current, self.total_pages);
        self.current = change.page;
        change
    }

    pub fn first(&mut self) -> PageChange {
        self.go_to(1)
    }

    pub fn previous(&mut self) -> PageChange {
        if !self.can_go_previous() {
            return PageChange::unchanged(self.current);
        }
        self.go_to(self.current - 1)
    }

    pub fn next(&mut self) -> PageChange {
        if !self.can_go_next() {
            return PageChange::unchanged(self.current);
        }
        self.go_to(self.current + 1)
    }

    pub fn last(&mut self) -> PageChange {
        self.go_to(self.total_pages)
    }
}
