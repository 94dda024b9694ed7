//! Data model for storefront product listings.
//!
//! This crate holds the plain value types shared by the listing components:
//!
//! - `filter` - the canonical filter/pagination state and its field updates
//! - `layout` - grid density preference, viewport classes and derived layout
//! - `page` - tokens rendered by pagination controls
//! - `error` - errors raised by the strict parsers used at input boundaries
//!
//! Nothing here performs I/O; persistence and URL-style synchronization live
//! in `shop-persistence` and `shop-listing`.

pub mod error;
pub mod filter;
pub mod layout;
pub mod page;

pub use error::{ModelError, Result};
pub use filter::{
    ActiveFilter, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, FilterKey, FilterState, FilterUpdate, Price,
    SortOrder,
};
pub use layout::{GapToken, GridLayout, GridMode, ViewportClass};
pub use page::PageToken;
