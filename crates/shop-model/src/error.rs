//! Model error types.
//!
//! The listing operations themselves never fail; these errors come from the
//! strict parsers used where input is typed by a person (CLI flags, settings).

use thiserror::Error;

/// Error raised when a value cannot be parsed into a model type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The key is not one of the recognized filter keys.
    #[error("unknown filter key '{0}' (expected one of: search, min_price, max_price, in_stock, sort, page, limit)")]
    UnknownKey(String),

    /// The sort value is not one of the recognized sort orders.
    #[error("unknown sort order '{0}' (expected one of: created_at, price_asc, price_desc, title, discount_percent)")]
    UnknownSort(String),

    /// The grid mode is neither compact nor wide.
    #[error("invalid grid mode '{0}' (expected compact, wide, 3 or 5)")]
    InvalidGridMode(String),

    /// A `KEY=VALUE` pair was missing its separator.
    #[error("expected KEY=VALUE, got '{0}'")]
    MalformedPair(String),
}

/// Result type alias for model parsing.
pub type Result<T> = std::result::Result<T, ModelError>;
