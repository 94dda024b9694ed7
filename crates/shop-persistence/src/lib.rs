//! Durable storage for storefront user preferences.
//!
//! Listing components never talk to the disk directly; they receive a
//! [`PreferenceStore`] and call `get`/`set` on it. This keeps the
//! process-wide preferences (such as the grid density) swappable and
//! fakeable in tests.
//!
//! # Stores
//!
//! - [`MemoryPreferenceStore`] - in-process map; clones share state
//! - [`FilePreferenceStore`] - flat TOML table on disk, atomic writes
//!
//! # File Format
//!
//! ```toml
//! [preferences]
//! "shop.grid_layout" = "5"
//! ```

mod error;
mod file;
mod memory;
mod store;

pub use error::{PersistenceError, Result};
pub use file::FilePreferenceStore;
pub use memory::MemoryPreferenceStore;
pub use store::{LAYOUT_PREFERENCE_KEY, PreferenceStore};
