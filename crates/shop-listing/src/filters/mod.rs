//! Filter State Store and its query-parameter synchronization.
//!
//! - `codec` - pure `serialize`/`deserialize` between state and query params
//! - `publisher` - the side effect that exposes the serialized form
//! - `store` - `FilterStore`, the single source of truth
//! - `debounce` - cancellable timer for search-as-you-type

pub mod codec;
mod debounce;
mod publisher;
mod store;

pub use codec::QueryParams;
pub use debounce::{DEFAULT_SEARCH_DEBOUNCE, SearchDebounce};
pub use publisher::{QueryHistory, QueryPublisher};
pub use store::FilterStore;
