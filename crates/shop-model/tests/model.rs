//! Tests for shop-model types.

use shop_model::{
    ActiveFilter, FilterKey, FilterState, FilterUpdate, GridMode, PageToken, Price, SortOrder,
};

#[test]
fn filter_state_serializes_with_query_values() {
    let state = FilterState {
        min_price: Price::new(250.0),
        sort: SortOrder::DiscountDesc,
        ..FilterState::default()
    };
    let json = serde_json::to_value(&state).expect("serialize state");
    assert_eq!(json["min_price"], 250.0);
    assert_eq!(json["max_price"], serde_json::Value::Null);
    assert_eq!(json["sort"], "discount_percent");
    assert_eq!(json["page"], 1);
    assert_eq!(json["page_size"], 12);
}

#[test]
fn active_filter_serializes_query_key() {
    let active = ActiveFilter {
        key: FilterKey::InStock,
        label: "In stock only".to_string(),
    };
    let json = serde_json::to_string(&active).expect("serialize active filter");
    assert_eq!(json, r#"{"key":"in_stock","label":"In stock only"}"#);
}

#[test]
fn update_keys_match_their_fields() {
    for key in FilterKey::ALL {
        assert_eq!(FilterUpdate::default_for(key).key(), key);
    }
}

#[test]
fn page_zero_is_raised_to_first_page() {
    let mut state = FilterState::default();
    state.apply(FilterUpdate::Page(0));
    assert_eq!(state.page, 1);
}

#[test]
fn page_token_display() {
    let rendered: Vec<String> = [PageToken::Page(1), PageToken::Ellipsis, PageToken::Page(20)]
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(rendered, vec!["1", "...", "20"]);
    assert_eq!(PageToken::Ellipsis.page(), None);
}

#[test]
fn grid_mode_round_trips_through_stored_value() {
    for mode in GridMode::ALL {
        assert_eq!(GridMode::from_stored(mode.stored_value()), Some(mode));
    }
}
