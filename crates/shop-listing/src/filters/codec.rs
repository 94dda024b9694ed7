//! Conversion between [`FilterState`] and its flat query-parameter form.
//!
//! Only non-default fields are written; a missing key always means the
//! default applies. Reading never fails: unrecognized keys are ignored and
//! malformed values fall back to the field's default.

use std::collections::BTreeMap;

use shop_model::{FilterKey, FilterState, FilterUpdate};

/// Flat string-keyed query representation (`search`, `min_price`,
/// `max_price`, `in_stock`, `sort`, `page`, `limit`).
pub type QueryParams = BTreeMap<String, String>;

/// Write the minimal query representation of `state`.
pub fn serialize(state: &FilterState) -> QueryParams {
    FilterKey::ALL
        .into_iter()
        .filter(|key| !state.is_default(*key))
        .map(|key| (key.query_key().to_string(), query_value(state, key)))
        .collect()
}

/// Read a state from query parameters, defaulting every missing or
/// malformed field.
pub fn deserialize(params: &QueryParams) -> FilterState {
    let mut state = FilterState::default();
    for key in FilterKey::ALL {
        if let Some(value) = params.get(key.query_key()) {
            state.apply(FilterUpdate::parse_value(key, value));
        }
    }
    state
}

fn query_value(state: &FilterState, key: FilterKey) -> String {
    match key {
        FilterKey::Search => state.search.clone(),
        FilterKey::MinPrice => state.min_price.map(|p| p.to_string()).unwrap_or_default(),
        FilterKey::MaxPrice => state.max_price.map(|p| p.to_string()).unwrap_or_default(),
        FilterKey::InStock => state.in_stock_only.to_string(),
        FilterKey::Sort => state.sort.query_value().to_string(),
        FilterKey::Page => state.page.to_string(),
        FilterKey::PageSize => state.page_size.to_string(),
    }
}
