//! Property tests for the filter store and its query codec.

use proptest::prelude::*;
use shop_listing::filters::codec;
use shop_listing::{FilterStore, QueryHistory, QueryParams};
use shop_model::{FilterKey, FilterState, FilterUpdate, Price, SortOrder};

fn price() -> impl Strategy<Value = Option<Price>> {
    prop::option::of((0.0f64..1.0e9).prop_filter_map("valid price", Price::new))
}

fn sort() -> impl Strategy<Value = SortOrder> {
    prop::sample::select(SortOrder::ALL.to_vec())
}

fn filter_state() -> impl Strategy<Value = FilterState> {
    (
        "[a-z ]{0,12}",
        price(),
        price(),
        any::<bool>(),
        sort(),
        1u32..10_000,
        1u32..200,
    )
        .prop_map(
            |(search, min_price, max_price, in_stock_only, sort, page, page_size)| FilterState {
                search,
                min_price,
                max_price,
                in_stock_only,
                sort,
                page,
                page_size,
            },
        )
}

fn filter_update() -> impl Strategy<Value = FilterUpdate> {
    prop_oneof![
        "[a-z]{0,8}".prop_map(FilterUpdate::Search),
        price().prop_map(FilterUpdate::MinPrice),
        price().prop_map(FilterUpdate::MaxPrice),
        any::<bool>().prop_map(FilterUpdate::InStockOnly),
        sort().prop_map(FilterUpdate::Sort),
        (1u32..50).prop_map(FilterUpdate::Page),
        (1u32..100).prop_map(FilterUpdate::PageSize),
    ]
}

proptest! {
    #[test]
    fn serialized_state_reads_back_identically(state in filter_state()) {
        let params = codec::serialize(&state);
        prop_assert_eq!(codec::deserialize(&params), state);
    }

    #[test]
    fn serialized_form_omits_defaults(state in filter_state()) {
        let params = codec::serialize(&state);
        for key in FilterKey::ALL {
            prop_assert_eq!(params.contains_key(key.query_key()), !state.is_default(key));
        }
    }

    #[test]
    fn non_page_updates_return_to_first_page(
        start_page in 1u32..20,
        updates in prop::collection::vec(filter_update(), 1..20),
    ) {
        let params = QueryParams::from([("page".to_string(), start_page.to_string())]);
        let mut store = FilterStore::initialize(&params, QueryHistory::new());

        for update in updates {
            let explicit_page = match update {
                FilterUpdate::Page(page) => Some(page),
                _ => None,
            };
            let state = store.update_filter(update);
            match explicit_page {
                Some(page) => prop_assert_eq!(state.page, page),
                None => prop_assert_eq!(state.page, 1),
            }
        }
    }

    #[test]
    fn active_filters_track_filter_defaults(updates in prop::collection::vec(filter_update(), 0..10)) {
        let mut store = FilterStore::initialize(&QueryParams::new(), ());
        for update in updates {
            store.update_filter(update);
        }

        let mut filters_only = store.state().clone();
        filters_only.page = FilterState::default().page;
        filters_only.page_size = FilterState::default().page_size;

        prop_assert_eq!(
            store.has_active_filters(),
            filters_only != FilterState::default()
        );
        prop_assert_eq!(store.has_active_filters(), !store.active_filters().is_empty());
    }

    #[test]
    fn every_mutation_publishes_current_query(updates in prop::collection::vec(filter_update(), 1..10)) {
        let mut store = FilterStore::initialize(&QueryParams::new(), QueryHistory::new());
        let count = updates.len();
        for update in updates {
            store.update_filter(update);
            let query = store.query();
            prop_assert_eq!(store.publisher().latest(), Some(&query));
        }
        prop_assert_eq!(store.publisher().len(), count);
    }
}
