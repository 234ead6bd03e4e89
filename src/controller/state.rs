//! The list view query controller.
//!
//! [`ListController`] owns one screen's committed [`ListQuery`], the search
//! box text and the last rendered rows. Every method is an event-loop step:
//! it updates state and returns the [`FetchRequest`] the host must run, if
//! any. Responses are fed back through [`ListController::complete_fetch`]
//! and applied only when their ticket is the latest one issued.
use std::time::Duration;

use crate::controller::events::{FetchRequest, FetchTicket, ListEvent, SettledSearch};
use crate::debounce::{Debouncer, Scheduler};
use crate::domain::filter::FilterValue;
use crate::domain::query::ListQuery;
use crate::domain::types::PageNumber;
use crate::dto::list::{FetchStatus, ListView};
use crate::fetch::{FetchError, FetchResult};
use crate::location::{HistoryMode, LocationReader, LocationWriter, QueryState};
use crate::pagination::{PageInfo, Paginated};

pub struct ListController<T, L, S: Scheduler> {
    state: QueryState<L>,
    query: ListQuery,
    search_input: String,
    input_generation: u64,
    debouncer: Debouncer<SettledSearch, S>,
    issued: u64,
    rows: Paginated<T>,
    pagination: Option<PageInfo>,
    status: FetchStatus,
    error: Option<FetchError>,
    loaded: bool,
}

impl<T, L, S> ListController<T, L, S>
where
    L: LocationReader + LocationWriter,
    S: Scheduler,
{
    /// Builds the controller from the current location and returns the
    /// initial fetch. `on_settled` receives the search text once typing has
    /// paused for `quiet_period`; the host routes it back to
    /// [`ListController::commit_search`], possibly after other events.
    pub fn mount(
        state: QueryState<L>,
        scheduler: S,
        quiet_period: Duration,
        on_settled: impl Fn(SettledSearch) + Send + Sync + 'static,
    ) -> (Self, FetchRequest) {
        let query = state.read();
        if !state.is_synced(&query) {
            state.write(&query, HistoryMode::Replace);
        }

        let mut controller = Self {
            search_input: query.search_text().to_string(),
            input_generation: 0,
            state,
            query,
            debouncer: Debouncer::new(scheduler, quiet_period, on_settled),
            issued: 0,
            rows: Paginated::default(),
            pagination: None,
            status: FetchStatus::Loading,
            error: None,
            loaded: false,
        };
        let request = controller.issue();
        (controller, request)
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn latest_ticket(&self) -> FetchTicket {
        FetchTicket::new(self.issued)
    }

    /// Dispatches one event to the matching transition.
    pub fn handle(&mut self, event: ListEvent<T>) -> Option<FetchRequest> {
        match event {
            ListEvent::SearchInput(text) => {
                self.input_search(text);
                None
            }
            ListEvent::SearchSettled(search) => self.commit_search(search),
            ListEvent::FilterChanged { dimension, values } => {
                self.change_filter(&dimension, values)
            }
            ListEvent::PageRequested(page) => self.change_page(page),
            ListEvent::LocationChanged => self.location_changed(),
            ListEvent::FetchCompleted { ticket, result } => {
                self.complete_fetch(ticket, result);
                None
            }
            ListEvent::Close => {
                self.debouncer.cancel();
                None
            }
        }
    }

    /// Shows the keystroke immediately and restarts the quiet period.
    pub fn input_search(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.search_input.clone_from(&text);
        self.input_generation += 1;
        self.debouncer.call(SettledSearch {
            text,
            generation: self.input_generation,
        });
    }

    /// Commits settled search text. Text from an older input generation was
    /// superseded by newer keystrokes or a navigation and is ignored.
    pub fn commit_search(&mut self, search: SettledSearch) -> Option<FetchRequest> {
        if search.generation != self.input_generation {
            log::debug!(
                "Ignoring superseded search `{}` (generation {} of {})",
                search.text,
                search.generation,
                self.input_generation
            );
            return None;
        }
        let next = self.query.with_search(&search.text);
        if next.same_criteria(&self.query) {
            return None;
        }
        self.commit(next)
    }

    pub fn change_filter(
        &mut self,
        dimension: &str,
        values: Vec<FilterValue>,
    ) -> Option<FetchRequest> {
        let Some(dimension) = self.state.codec().screen().dimension(dimension) else {
            log::warn!(
                "Ignoring unknown filter `{dimension}` on {} list",
                self.state.codec().screen().resource.slug()
            );
            return None;
        };
        let next = self.query.with_filter(dimension, values);
        if next.same_criteria(&self.query) {
            return None;
        }
        self.commit(next)
    }

    /// Moves to `page` unless it is outside `1..=totalPage` of the latest
    /// result.
    pub fn change_page(&mut self, page: usize) -> Option<FetchRequest> {
        let Ok(page) = PageNumber::new(page) else {
            log::debug!("Ignoring request for page 0");
            return None;
        };
        if let Some(info) = self.pagination {
            if page.get() > info.last_page() {
                log::debug!("Ignoring request for page {page} of {}", info.last_page());
                return None;
            }
        }
        if page == self.query.page {
            return None;
        }
        let next = self.query.with_page(page);
        self.commit(next)
    }

    /// Re-derives the query and search box after the host changed the
    /// location directly. Uncommitted keystrokes are discarded.
    pub fn location_changed(&mut self) -> Option<FetchRequest> {
        self.debouncer.cancel();
        self.input_generation += 1;
        let next = self.state.read();
        self.search_input = next.search_text().to_string();
        if next == self.query {
            return None;
        }
        self.query = next;
        Some(self.issue())
    }

    /// Applies a fetch result. Returns `false` when the response belongs to a
    /// superseded query and was discarded.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, result: FetchResult<T>) -> bool {
        if ticket.sequence() != self.issued {
            log::debug!(
                "Discarding stale response #{} (latest #{})",
                ticket.sequence(),
                self.issued
            );
            return false;
        }

        match result {
            Ok(response) => {
                let total_pages = response.pagination.map_or(0, |info| info.total_page);
                self.rows = Paginated::new(response.items, self.query.page.get(), total_pages);
                self.pagination = response.pagination;
                self.status = FetchStatus::Ready;
                self.error = None;
                self.loaded = true;
            }
            Err(err) => {
                log::error!(
                    "Failed to load {} list: {err}",
                    self.state.codec().screen().resource.slug()
                );
                self.status = FetchStatus::Failed;
                self.error = Some(err);
            }
        }
        true
    }

    fn commit(&mut self, next: ListQuery) -> Option<FetchRequest> {
        self.state.write(&next, HistoryMode::Replace);
        self.query = next;
        Some(self.issue())
    }

    fn issue(&mut self) -> FetchRequest {
        self.issued += 1;
        self.status = FetchStatus::Loading;
        FetchRequest {
            ticket: FetchTicket::new(self.issued),
            query: self.query.clone(),
        }
    }
}

impl<T, L, S> ListController<T, L, S>
where
    T: Clone,
    S: Scheduler,
{
    pub fn view(&self) -> ListView<T> {
        ListView {
            query: self.query.clone(),
            search_input: self.search_input.clone(),
            rows: self.rows.clone(),
            pagination: self.pagination,
            status: self.status,
            error: self.error.as_ref().map(ToString::to_string),
            loaded: self.loaded,
        }
    }
}
