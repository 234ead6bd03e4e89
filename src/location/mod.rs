//! Addressable list state: the navigable location's query string.
//!
//! The host navigation system is reached through [`LocationReader`] and
//! [`LocationWriter`]; [`QueryState`] layers the screen's [`QueryCodec`] on
//! top so the controller only ever sees [`ListQuery`] values.

use crate::domain::query::ListQuery;

pub mod codec;
pub mod memory;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

pub use codec::{QueryCodec, parse_query_string, to_query_string};
pub use memory::MemoryLocation;

/// Location query as ordered key-value pairs; keys may repeat.
pub type FlatKv = Vec<(String, String)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryMode {
    /// Overwrite the current history entry.
    Replace,
    /// Add a new history entry.
    Push,
}

pub trait LocationReader {
    fn current_query(&self) -> FlatKv;
}

pub trait LocationWriter {
    fn set_current_query(&self, query: &FlatKv, mode: HistoryMode);
}

/// Reads and writes a screen's [`ListQuery`] through the location.
pub struct QueryState<L> {
    location: L,
    codec: QueryCodec,
}

impl<L> QueryState<L>
where
    L: LocationReader + LocationWriter,
{
    pub fn new(location: L, codec: QueryCodec) -> Self {
        Self { location, codec }
    }

    pub fn codec(&self) -> &QueryCodec {
        &self.codec
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn read(&self) -> ListQuery {
        self.codec.decode(&self.location.current_query())
    }

    pub fn write(&self, query: &ListQuery, mode: HistoryMode) {
        let pairs = self.codec.encode(query);
        log::debug!("Writing list query `{}` ({mode:?})", to_query_string(&pairs));
        self.location.set_current_query(&pairs, mode);
    }

    /// Whether the location already holds exactly the encoding of `query`.
    pub fn is_synced(&self, query: &ListQuery) -> bool {
        self.location.current_query() == self.codec.encode(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::FilterValue;
    use crate::domain::resource::ResourceKind;
    use crate::domain::types::{PageNumber, PageSize};

    fn state(location: MemoryLocation) -> QueryState<MemoryLocation> {
        let codec = QueryCodec::new(ResourceKind::User.screen(), PageSize::default(), 200);
        QueryState::new(location, codec)
    }

    #[test]
    fn write_then_read_round_trips() {
        let state = state(MemoryLocation::new());
        let role = state.codec().screen().dimension("role").unwrap();
        let is_active = state.codec().screen().dimension("is_active").unwrap();
        let query = ListQuery::new(PageSize::new(25).unwrap())
            .paginate(PageNumber::new(3).unwrap())
            .search("name=x & y")
            .filter(role, [FilterValue::text("admin"), FilterValue::text("user")])
            .filter(is_active, [FilterValue::Boolean(true)]);

        state.write(&query, HistoryMode::Replace);

        assert_eq!(state.read(), query);
        assert!(state.is_synced(&query));
        assert_eq!(state.location().entry_count(), 1);
    }

    #[test]
    fn push_mode_adds_history_entry() {
        let state = state(MemoryLocation::new());
        state.write(&ListQuery::default(), HistoryMode::Push);
        assert_eq!(state.location().entry_count(), 2);
    }
}
