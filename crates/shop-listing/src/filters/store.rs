//! The Filter State Store.

use std::time::Duration;

use shop_model::{ActiveFilter, DEFAULT_PAGE, FilterKey, FilterState, FilterUpdate};
use tracing::debug;

use super::codec::{self, QueryParams};
use super::debounce::SearchDebounce;
use super::publisher::{QueryHistory, QueryPublisher};

/// Single source of truth for a listing's [`FilterState`].
///
/// Every mutation re-serializes the whole state and hands it to the
/// publisher. Any change other than an explicit page change sends the user
/// back to the first page.
#[derive(Debug)]
pub struct FilterStore<P = QueryHistory> {
    state: FilterState,
    publisher: P,
    search: SearchDebounce,
}

impl<P: QueryPublisher> FilterStore<P> {
    /// Build the store from the current query representation.
    ///
    /// Reading the initial query does not publish.
    pub fn initialize(params: &QueryParams, publisher: P) -> Self {
        let state = codec::deserialize(params);
        debug!(?state, "Initialized filter state");
        Self {
            state,
            publisher,
            search: SearchDebounce::default(),
        }
    }

    /// Replace the search quiet period.
    #[must_use]
    pub fn with_search_debounce(mut self, delay: Duration) -> Self {
        self.search = SearchDebounce::new(delay);
        self
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Current minimal query representation.
    pub fn query(&self) -> QueryParams {
        codec::serialize(&self.state)
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Set one field. Resets to the first page unless the field is the page.
    pub fn update_filter(&mut self, update: FilterUpdate) -> &FilterState {
        let resets_page = update.key() != FilterKey::Page;
        self.state.apply(update);
        if resets_page {
            self.state.page = DEFAULT_PAGE;
        }
        self.publish()
    }

    /// Set several fields at once. Resets to the first page unless one of
    /// the updates sets the page explicitly.
    pub fn update_multiple_filters(
        &mut self,
        updates: impl IntoIterator<Item = FilterUpdate>,
    ) -> &FilterState {
        let mut explicit_page = false;
        for update in updates {
            explicit_page |= update.key() == FilterKey::Page;
            self.state.apply(update);
        }
        if !explicit_page {
            self.state.page = DEFAULT_PAGE;
        }
        self.publish()
    }

    /// Move to `page` without touching any other field.
    ///
    /// There is no upper bound check here; only `0` is raised to the first
    /// page.
    pub fn set_page(&mut self, page: u32) -> &FilterState {
        self.state.apply(FilterUpdate::Page(page));
        self.publish()
    }

    /// Return every field to its default and clear the published query.
    pub fn reset_filters(&mut self) -> &FilterState {
        self.search.cancel();
        self.state = FilterState::default();
        self.publish()
    }

    /// Return one field to its default (same rules as [`Self::update_filter`]).
    pub fn clear_filter(&mut self, key: FilterKey) -> &FilterState {
        self.update_filter(FilterUpdate::default_for(key))
    }

    /// Whether any filter other than page/page size is set.
    pub fn has_active_filters(&self) -> bool {
        !self.state.is_default_filters()
    }

    /// Display chips for the non-default filters, in declaration order.
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        self.state.active_filters()
    }

    /// Record a search keystroke. The search filter is only updated once the
    /// input has been quiet for the debounce period; see
    /// [`Self::settle_search`].
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn queue_search(&mut self, text: impl Into<String>) {
        self.search.push(text.into());
    }

    /// Drop a pending search keystroke.
    pub fn cancel_search(&mut self) {
        self.search.cancel();
    }

    pub fn has_pending_search(&self) -> bool {
        self.search.is_pending()
    }

    /// Wait for the pending search keystroke and apply it.
    ///
    /// Returns `None` when no search is pending.
    pub async fn settle_search(&mut self) -> Option<&FilterState> {
        let text = self.search.settled().await?;
        Some(self.update_filter(FilterUpdate::Search(text)))
    }

    fn publish(&mut self) -> &FilterState {
        let params = codec::serialize(&self.state);
        debug!(?params, "Publishing filter query");
        self.publisher.publish(&params);
        &self.state
    }
}
