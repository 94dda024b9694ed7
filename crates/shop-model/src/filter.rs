//! Filter state for a product listing.
//!
//! `FilterState` is the canonical in-memory form of the user's listing query.
//! Every field has a default, and the external (query-string) form only ever
//! carries fields that differ from it.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{ModelError, Result};

/// First page of a listing.
pub const DEFAULT_PAGE: u32 = 1;

/// Products per page when the query does not say otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

// =============================================================================
// PRICE
// =============================================================================

/// A price bound entered by the user.
///
/// Always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    /// Create a price, rejecting NaN, infinities and negative amounts.
    pub fn new(amount: f64) -> Option<Self> {
        if amount.is_finite() && amount >= 0.0 {
            // Normalize -0.0 so it renders as "0".
            Some(Self(amount + 0.0))
        } else {
            None
        }
    }

    /// Parse a price from its textual form. Anything that is not a valid
    /// price yields `None`.
    pub fn parse(text: &str) -> Option<Self> {
        text.trim().parse::<f64>().ok().and_then(Self::new)
    }

    /// The amount as a float.
    #[inline]
    pub fn amount(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// SORT ORDER
// =============================================================================

/// Sort order of a product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum SortOrder {
    /// Most recently added first.
    #[default]
    #[serde(rename = "created_at")]
    Newest,
    #[serde(rename = "price_asc")]
    PriceAsc,
    #[serde(rename = "price_desc")]
    PriceDesc,
    #[serde(rename = "title")]
    NameAsc,
    #[serde(rename = "discount_percent")]
    DiscountDesc,
}

impl SortOrder {
    /// All sort orders in the order they are offered to the user.
    pub const ALL: [SortOrder; 5] = [
        Self::Newest,
        Self::PriceAsc,
        Self::PriceDesc,
        Self::NameAsc,
        Self::DiscountDesc,
    ];

    /// Value used in the query representation.
    pub fn query_value(&self) -> &'static str {
        match self {
            Self::Newest => "created_at",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::NameAsc => "title",
            Self::DiscountDesc => "discount_percent",
        }
    }

    /// Get display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Newest => "Newest",
            Self::PriceAsc => "Price: Low to High",
            Self::PriceDesc => "Price: High to Low",
            Self::NameAsc => "Name: A to Z",
            Self::DiscountDesc => "Biggest Discount",
        }
    }

    /// Lenient parse used for query values: unknown input means the default.
    pub fn from_query(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for SortOrder {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|sort| sort.query_value() == s)
            .ok_or_else(|| ModelError::UnknownSort(s.to_string()))
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// =============================================================================
// FILTER KEYS AND UPDATES
// =============================================================================

/// Identifies one field of [`FilterState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKey {
    Search,
    MinPrice,
    MaxPrice,
    InStock,
    Sort,
    Page,
    #[serde(rename = "limit")]
    PageSize,
}

impl FilterKey {
    /// All keys, in declaration order.
    pub const ALL: [FilterKey; 7] = [
        Self::Search,
        Self::MinPrice,
        Self::MaxPrice,
        Self::InStock,
        Self::Sort,
        Self::Page,
        Self::PageSize,
    ];

    /// Key used in the query representation.
    pub fn query_key(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::MinPrice => "min_price",
            Self::MaxPrice => "max_price",
            Self::InStock => "in_stock",
            Self::Sort => "sort",
            Self::Page => "page",
            Self::PageSize => "limit",
        }
    }

    /// Whether this key is a real filter (as opposed to pagination).
    pub fn is_filter(&self) -> bool {
        !matches!(self, Self::Page | Self::PageSize)
    }
}

impl FromStr for FilterKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.query_key() == s)
            .ok_or_else(|| ModelError::UnknownKey(s.to_string()))
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_key())
    }
}

/// Assignment of a single field of [`FilterState`].
#[derive(Debug, Clone, PartialEq)]
pub enum FilterUpdate {
    Search(String),
    MinPrice(Option<Price>),
    MaxPrice(Option<Price>),
    InStockOnly(bool),
    Sort(SortOrder),
    Page(u32),
    PageSize(u32),
}

impl FilterUpdate {
    /// The field this update assigns.
    pub fn key(&self) -> FilterKey {
        match self {
            Self::Search(_) => FilterKey::Search,
            Self::MinPrice(_) => FilterKey::MinPrice,
            Self::MaxPrice(_) => FilterKey::MaxPrice,
            Self::InStockOnly(_) => FilterKey::InStock,
            Self::Sort(_) => FilterKey::Sort,
            Self::Page(_) => FilterKey::Page,
            Self::PageSize(_) => FilterKey::PageSize,
        }
    }

    /// The update that puts `key` back to its default value.
    pub fn default_for(key: FilterKey) -> Self {
        match key {
            FilterKey::Search => Self::Search(String::new()),
            FilterKey::MinPrice => Self::MinPrice(None),
            FilterKey::MaxPrice => Self::MaxPrice(None),
            FilterKey::InStock => Self::InStockOnly(false),
            FilterKey::Sort => Self::Sort(SortOrder::Newest),
            FilterKey::Page => Self::Page(DEFAULT_PAGE),
            FilterKey::PageSize => Self::PageSize(DEFAULT_PAGE_SIZE),
        }
    }

    /// Build an update from a query key and its raw value.
    ///
    /// The key must be recognized; the value is parsed leniently with the
    /// same fallbacks used when reading a whole query.
    pub fn from_query_pair(key: &str, value: &str) -> Result<Self> {
        Ok(Self::parse_value(key.parse()?, value))
    }

    /// Build an update for `key` from a raw query value.
    ///
    /// Never fails: malformed values become the field's default.
    pub fn parse_value(key: FilterKey, value: &str) -> Self {
        match key {
            FilterKey::Search => Self::Search(value.to_string()),
            FilterKey::MinPrice => Self::MinPrice(Price::parse(value)),
            FilterKey::MaxPrice => Self::MaxPrice(Price::parse(value)),
            FilterKey::InStock => Self::InStockOnly(value == "true"),
            FilterKey::Sort => Self::Sort(SortOrder::from_query(value)),
            FilterKey::Page => Self::Page(parse_positive(value).unwrap_or(DEFAULT_PAGE)),
            FilterKey::PageSize => {
                Self::PageSize(parse_positive(value).unwrap_or(DEFAULT_PAGE_SIZE))
            }
        }
    }
}

impl FromStr for FilterUpdate {
    type Err = ModelError;

    /// Parse a `KEY=VALUE` pair.
    fn from_str(s: &str) -> Result<Self> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| ModelError::MalformedPair(s.to_string()))?;
        Self::from_query_pair(key.trim(), value)
    }
}

/// Parse a strictly positive integer.
pub fn parse_positive(text: &str) -> Option<u32> {
    text.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

// =============================================================================
// FILTER STATE
// =============================================================================

/// The user's current product-listing query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterState {
    /// Free-text search; empty means unset.
    pub search: String,
    pub min_price: Option<Price>,
    pub max_price: Option<Price>,
    pub in_stock_only: bool,
    pub sort: SortOrder,
    /// Current page, never below 1.
    pub page: u32,
    pub page_size: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            min_price: None,
            max_price: None,
            in_stock_only: false,
            sort: SortOrder::Newest,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FilterState {
    /// Assign one field. Does not touch any other field.
    pub fn apply(&mut self, update: FilterUpdate) {
        match update {
            FilterUpdate::Search(search) => self.search = search,
            FilterUpdate::MinPrice(price) => self.min_price = price,
            FilterUpdate::MaxPrice(price) => self.max_price = price,
            FilterUpdate::InStockOnly(flag) => self.in_stock_only = flag,
            FilterUpdate::Sort(sort) => self.sort = sort,
            FilterUpdate::Page(page) => self.page = page.max(DEFAULT_PAGE),
            FilterUpdate::PageSize(size) => self.page_size = size.max(1),
        }
    }

    /// Whether `key` currently holds its default value.
    pub fn is_default(&self, key: FilterKey) -> bool {
        match key {
            FilterKey::Search => self.search.is_empty(),
            FilterKey::MinPrice => self.min_price.is_none(),
            FilterKey::MaxPrice => self.max_price.is_none(),
            FilterKey::InStock => !self.in_stock_only,
            FilterKey::Sort => self.sort == SortOrder::Newest,
            FilterKey::Page => self.page == DEFAULT_PAGE,
            FilterKey::PageSize => self.page_size == DEFAULT_PAGE_SIZE,
        }
    }

    /// Whether every filter field (everything except page and page size)
    /// is at its default.
    pub fn is_default_filters(&self) -> bool {
        FilterKey::ALL
            .into_iter()
            .filter(FilterKey::is_filter)
            .all(|key| self.is_default(key))
    }

    /// One entry per non-default filter field, in declaration order.
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        FilterKey::ALL
            .into_iter()
            .filter(|key| key.is_filter() && !self.is_default(*key))
            .filter_map(|key| self.active_label(key).map(|label| ActiveFilter { key, label }))
            .collect()
    }

    fn active_label(&self, key: FilterKey) -> Option<String> {
        match key {
            FilterKey::Search => Some(format!("Search: \"{}\"", self.search)),
            FilterKey::MinPrice => self.min_price.map(|p| format!("Min: ₹{p}")),
            FilterKey::MaxPrice => self.max_price.map(|p| format!("Max: ₹{p}")),
            FilterKey::InStock => Some("In stock only".to_string()),
            FilterKey::Sort => Some(format!("Sort: {}", self.sort.label())),
            FilterKey::Page | FilterKey::PageSize => None,
        }
    }
}

/// A filter chip: a non-default field together with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveFilter {
    pub key: FilterKey,
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_rejects_non_finite_and_negative() {
        assert!(Price::new(f64::NAN).is_none());
        assert!(Price::new(f64::INFINITY).is_none());
        assert!(Price::new(-1.0).is_none());
        assert_eq!(Price::new(0.0).map(Price::amount), Some(0.0));
    }

    #[test]
    fn test_price_parse() {
        assert_eq!(Price::parse("500"), Price::new(500.0));
        assert_eq!(Price::parse(" 12.5 "), Price::new(12.5));
        assert_eq!(Price::parse("abc"), None);
        assert_eq!(Price::parse("inf"), None);
        assert_eq!(Price::parse(""), None);
    }

    #[test]
    fn test_price_display_is_minimal() {
        assert_eq!(Price::new(500.0).unwrap().to_string(), "500");
        assert_eq!(Price::new(12.5).unwrap().to_string(), "12.5");
        assert_eq!(Price::new(-0.0).unwrap().to_string(), "0");
    }

    #[test]
    fn test_sort_order_query_values() {
        for sort in SortOrder::ALL {
            assert_eq!(sort.query_value().parse::<SortOrder>(), Ok(sort));
        }
        assert_eq!(SortOrder::from_query("cheapest"), SortOrder::Newest);
        assert!("cheapest".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_filter_key_parse() {
        assert_eq!("limit".parse::<FilterKey>(), Ok(FilterKey::PageSize));
        assert_eq!(
            "colour".parse::<FilterKey>(),
            Err(ModelError::UnknownKey("colour".to_string()))
        );
    }

    #[test]
    fn test_update_from_pair_is_lenient_on_values() {
        assert_eq!(
            "min_price=cheap".parse::<FilterUpdate>(),
            Ok(FilterUpdate::MinPrice(None))
        );
        assert_eq!(
            "page=0".parse::<FilterUpdate>(),
            Ok(FilterUpdate::Page(DEFAULT_PAGE))
        );
        assert_eq!(
            "in_stock=yes".parse::<FilterUpdate>(),
            Ok(FilterUpdate::InStockOnly(false))
        );
        assert!("min_price".parse::<FilterUpdate>().is_err());
    }

    #[test]
    fn test_default_for_restores_defaults() {
        let mut state = FilterState {
            search: "shoes".to_string(),
            min_price: Price::new(10.0),
            max_price: Price::new(99.0),
            in_stock_only: true,
            sort: SortOrder::PriceDesc,
            page: 4,
            page_size: 48,
        };
        for key in FilterKey::ALL {
            state.apply(FilterUpdate::default_for(key));
        }
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn test_active_filters_order_and_labels() {
        let state = FilterState {
            search: "mug".to_string(),
            min_price: Price::new(500.0),
            max_price: Price::new(1500.0),
            in_stock_only: true,
            sort: SortOrder::PriceAsc,
            page: 2,
            page_size: 24,
        };
        let labels: Vec<String> = state
            .active_filters()
            .into_iter()
            .map(|active| active.label)
            .collect();
        assert_eq!(
            labels,
            vec![
                "Search: \"mug\"",
                "Min: ₹500",
                "Max: ₹1500",
                "In stock only",
                "Sort: Price: Low to High",
            ]
        );
    }

    #[test]
    fn test_pagination_fields_are_not_filters() {
        let state = FilterState {
            page: 3,
            page_size: 48,
            ..FilterState::default()
        };
        assert!(state.is_default_filters());
        assert!(state.active_filters().is_empty());
    }
}
