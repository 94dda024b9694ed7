//! Publication of the serialized filter state.

use super::codec::QueryParams;

/// Receives the query representation every time the filter state changes.
///
/// In a browser this is the address bar; in tests and the CLI it is a
/// [`QueryHistory`].
pub trait QueryPublisher {
    fn publish(&mut self, params: &QueryParams);
}

/// Discards publications.
impl QueryPublisher for () {
    fn publish(&mut self, _params: &QueryParams) {}
}

/// Records every publication in order, like a navigation history.
#[derive(Debug, Clone, Default)]
pub struct QueryHistory {
    entries: Vec<QueryParams>,
}

impl QueryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently published representation.
    pub fn latest(&self) -> Option<&QueryParams> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl QueryPublisher for QueryHistory {
    fn publish(&mut self, params: &QueryParams) {
        self.entries.push(params.clone());
    }
}
