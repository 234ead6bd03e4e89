//! Events consumed by a list controller and the fetch commands it emits.

use crate::domain::filter::FilterValue;
use crate::domain::query::ListQuery;
use crate::fetch::FetchResult;

/// Sequence number of an issued fetch. Later commits get larger tickets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub(crate) const fn new(sequence: u64) -> Self {
        Self(sequence)
    }

    pub const fn sequence(self) -> u64 {
        self.0
    }
}

/// A fetch the host must run, tagged with the ticket its response must
/// carry back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub query: ListQuery,
}

/// Search text whose quiet period elapsed, stamped with the input generation
/// it was typed in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettledSearch {
    pub text: String,
    pub generation: u64,
}

pub enum ListEvent<T> {
    /// Keystroke in the search box.
    SearchInput(String),
    /// The search debounce quiet period elapsed.
    SearchSettled(SettledSearch),
    FilterChanged {
        dimension: String,
        values: Vec<FilterValue>,
    },
    PageRequested(usize),
    /// The host navigated (back/forward) and the location query changed.
    LocationChanged,
    FetchCompleted {
        ticket: FetchTicket,
        result: FetchResult<T>,
    },
    Close,
}

impl<T> ListEvent<T> {
    pub fn name(&self) -> &'static str {
        match self {
            ListEvent::SearchInput(_) => "search_input",
            ListEvent::SearchSettled(_) => "search_settled",
            ListEvent::FilterChanged { .. } => "filter_changed",
            ListEvent::PageRequested(_) => "page_requested",
            ListEvent::LocationChanged => "location_changed",
            ListEvent::FetchCompleted { .. } => "fetch_completed",
            ListEvent::Close => "close",
        }
    }
}
