//! Single-task tokio driver for a [`ListController`].
//!
//! Events from the UI, the search debounce timer and finished fetches all go
//! through one unbounded channel and are applied strictly in arrival order.
//! Fetches run in their own tasks so input keeps flowing while they are in
//! flight. A fresh [`ListView`] is published after every event.
use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::controller::events::{FetchRequest, ListEvent};
use crate::controller::state::ListController;
use crate::debounce::TokioScheduler;
use crate::domain::filter::FilterValue;
use crate::dto::list::ListView;
use crate::fetch::PageFetcher;
use crate::location::{LocationReader, LocationWriter, QueryState};
use crate::models::config::ListConfig;

/// UI-side handle to a running [`ListSession`]. The session stops once every
/// handle is dropped or [`ListHandle::close`] is called.
pub struct ListHandle<T> {
    events: mpsc::UnboundedSender<ListEvent<T>>,
    view: watch::Receiver<ListView<T>>,
}

impl<T> Clone for ListHandle<T> {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
            view: self.view.clone(),
        }
    }
}

impl<T> ListHandle<T> {
    pub fn search(&self, text: impl Into<String>) -> bool {
        self.send(ListEvent::SearchInput(text.into()))
    }

    pub fn set_filter(&self, dimension: impl Into<String>, values: Vec<FilterValue>) -> bool {
        self.send(ListEvent::FilterChanged {
            dimension: dimension.into(),
            values,
        })
    }

    pub fn goto_page(&self, page: usize) -> bool {
        self.send(ListEvent::PageRequested(page))
    }

    pub fn location_changed(&self) -> bool {
        self.send(ListEvent::LocationChanged)
    }

    pub fn close(&self) -> bool {
        self.send(ListEvent::Close)
    }

    /// Receiver notified after every applied event.
    pub fn view(&self) -> watch::Receiver<ListView<T>> {
        self.view.clone()
    }

    fn send(&self, event: ListEvent<T>) -> bool {
        let name = event.name();
        match self.events.send(event) {
            Ok(()) => true,
            Err(_) => {
                log::warn!("List session stopped; dropping {name} event");
                false
            }
        }
    }
}

pub struct ListSession<F: PageFetcher, L> {
    controller: ListController<F::Item, L, TokioScheduler>,
    fetcher: Arc<F>,
    events_tx: mpsc::WeakUnboundedSender<ListEvent<F::Item>>,
    events_rx: mpsc::UnboundedReceiver<ListEvent<F::Item>>,
    view_tx: watch::Sender<ListView<F::Item>>,
    initial: Option<FetchRequest>,
}

impl<F, L> ListSession<F, L>
where
    F: PageFetcher + 'static,
    F::Item: Clone + Send + Sync + 'static,
    L: LocationReader + LocationWriter + Send + 'static,
{
    /// Mounts the controller from the current location. Must be called from
    /// within a tokio runtime; nothing is fetched until [`ListSession::run`].
    pub fn start(
        fetcher: Arc<F>,
        state: QueryState<L>,
        config: &ListConfig,
    ) -> (Self, ListHandle<F::Item>) {
        let (events, events_rx) = mpsc::unbounded_channel();
        let events_tx = events.downgrade();

        let settled = events.downgrade();
        let (controller, initial) = ListController::mount(
            state,
            TokioScheduler::new(),
            config.quiet_period(),
            move |search| {
                if let Some(events) = settled.upgrade() {
                    let _ = events.send(ListEvent::SearchSettled(search));
                }
            },
        );
        let (view_tx, view) = watch::channel(controller.view());

        let session = Self {
            controller,
            fetcher,
            events_tx,
            events_rx,
            view_tx,
            initial: Some(initial),
        };
        (session, ListHandle { events, view })
    }

    pub async fn run(mut self) {
        if let Some(initial) = self.initial.take() {
            self.spawn_fetch(initial);
        }

        while let Some(event) = self.events_rx.recv().await {
            let name = event.name();
            let closing = matches!(event, ListEvent::Close);

            if let Some(request) = self.controller.handle(event) {
                log::debug!(
                    "{name} issued fetch #{} for page {}",
                    request.ticket.sequence(),
                    request.query.page
                );
                self.spawn_fetch(request);
            }
            self.view_tx.send_replace(self.controller.view());

            if closing {
                break;
            }
        }
        log::debug!("List session finished");
    }

    fn spawn_fetch(&self, request: FetchRequest) {
        let Some(events) = self.events_tx.upgrade() else {
            return;
        };
        let fetcher = Arc::clone(&self.fetcher);
        tokio::spawn(async move {
            let FetchRequest { ticket, query } = request;
            let result = fetcher.fetch_page(&query).await;
            let _ = events.send(ListEvent::FetchCompleted { ticket, result });
        });
    }
}
