use serde::Serialize;

use crate::domain::query::ListQuery;
use crate::pagination::{PageInfo, Paginated};

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FetchStatus {
    /// Rows reflect the current query.
    Ready,
    /// A fetch for the current query is in flight.
    Loading,
    /// The latest fetch failed; rows are from the last successful one.
    Failed,
}

/// Everything a table, filter header and pagination bar need to render.
#[derive(Clone, Debug, Serialize)]
pub struct ListView<T> {
    /// Committed query.
    pub query: ListQuery,
    /// Text shown in the search box, possibly ahead of `query.search`.
    pub search_input: String,
    /// Rows with the page window of the response that produced them.
    pub rows: Paginated<T>,
    pub pagination: Option<PageInfo>,
    pub status: FetchStatus,
    /// Message of the latest failure, if the latest fetch failed.
    pub error: Option<String>,
    /// Whether any fetch has succeeded since mount.
    pub loaded: bool,
}
