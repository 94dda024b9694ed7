//! State controllers behind a storefront product listing.
//!
//! A listing view owns one of each:
//!
//! - [`FilterStore`] - canonical filter/pagination state, kept in sync with
//!   a flat query-parameter map and published on every change
//! - [`LayoutResolver`] - column count for the persisted grid density and
//!   the current viewport width
//! - [`Paginator`] - page-number window and guarded page navigation
//!
//! None of these perform product fetches; the view reads their state and
//! does that itself. All operations are total: malformed input falls back
//! to documented defaults instead of returning errors.

pub mod filters;
pub mod layout;
pub mod pagination;

pub use filters::{
    DEFAULT_SEARCH_DEBOUNCE, FilterStore, QueryHistory, QueryParams, QueryPublisher,
    SearchDebounce,
};
pub use layout::{
    LayoutResolver, classify_viewport, columns_for, gap_for, is_wide_mode_available,
    recommended_mode,
};
pub use pagination::{
    DEFAULT_MAX_VISIBLE, PAGE_SIZE_OPTIONS, PageChange, PageSummary, Paginator, can_go_next,
    can_go_previous, go_to_page, page_window, total_pages,
};
