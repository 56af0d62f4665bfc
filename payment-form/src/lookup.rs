//! Event typeahead
//!
//! Debounced title search behind the event picker. Keystrokes are fed to a
//! background worker; the worker waits for the input to settle before asking
//! the directory, and results are published through a watch channel the
//! shell re-renders from.
//!
//! Every keystroke bumps a generation counter and each fetch carries the
//! generation it was started for. A response is committed only when its
//! generation is still current, so a slow early response can never
//! overwrite the results of a later query.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;

use shared::AppResult;
use shared::models::{Event, EventPage, EventQuery};

use crate::traits::DirectoryService;

/// Quiet period after the last keystroke before a search is issued
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// Handle to the typeahead worker
///
/// Dropping the handle without calling [`shutdown`](Self::shutdown) leaves
/// the worker running until its input channel closes.
pub struct EventTypeahead {
    input_tx: mpsc::UnboundedSender<String>,
    results_rx: watch::Receiver<Vec<Event>>,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl EventTypeahead {
    /// Spawn the worker against a directory service
    pub fn spawn(directory: Arc<dyn DirectoryService>) -> Self {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (results_tx, results_rx) = watch::channel(Vec::new());
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();

        let worker = TypeaheadWorker {
            directory,
            input_rx,
            results_tx,
            fetch_tx,
            fetch_rx,
            generation: 0,
            pending: None,
            deadline: None,
            token: token.clone(),
        };
        let handle = tokio::spawn(worker.run());

        Self {
            input_tx,
            results_rx,
            token,
            handle,
        }
    }

    /// Feed the current contents of the search box
    pub fn input(&self, query: impl Into<String>) {
        let _ = self.input_tx.send(query.into());
    }

    /// Subscribe to result updates
    pub fn results(&self) -> watch::Receiver<Vec<Event>> {
        self.results_rx.clone()
    }

    /// Stop the worker and wait for it to exit
    pub async fn shutdown(self) {
        self.token.cancel();
        if let Err(err) = self.handle.await {
            tracing::warn!(error = %err, "typeahead worker join failed");
        }
    }
}

struct TypeaheadWorker {
    directory: Arc<dyn DirectoryService>,
    input_rx: mpsc::UnboundedReceiver<String>,
    results_tx: watch::Sender<Vec<Event>>,
    fetch_tx: mpsc::UnboundedSender<(u64, AppResult<EventPage>)>,
    fetch_rx: mpsc::UnboundedReceiver<(u64, AppResult<EventPage>)>,
    /// Bumped on every keystroke, stamps each fetch
    generation: u64,
    /// Query waiting out the debounce window
    pending: Option<String>,
    deadline: Option<Instant>,
    token: CancellationToken,
}

impl TypeaheadWorker {
    async fn run(mut self) {
        tracing::info!("event typeahead started");
        loop {
            let deadline = self.deadline.unwrap_or_else(Instant::now);
            tokio::select! {
                _ = self.token.cancelled() => {
                    break;
                }
                maybe_input = self.input_rx.recv() => {
                    match maybe_input {
                        Some(query) => self.on_input(query),
                        None => break,
                    }
                }
                _ = sleep_until(deadline), if self.deadline.is_some() => {
                    self.dispatch();
                }
                Some((received, result)) = self.fetch_rx.recv() => {
                    self.on_result(received, result);
                }
            }
        }
        tracing::info!("event typeahead stopped");
    }

    fn on_input(&mut self, query: String) {
        // Any keystroke invalidates whatever is in flight
        self.generation = self.generation.wrapping_add(1);

        let trimmed = query.trim();
        if trimmed.is_empty() {
            self.pending = None;
            self.deadline = None;
            let _ = self.results_tx.send(Vec::new());
            return;
        }

        self.pending = Some(trimmed.to_string());
        self.deadline = Some(Instant::now() + DEBOUNCE_DELAY);
    }

    /// Debounce window elapsed, start the search for the settled query
    fn dispatch(&mut self) {
        self.deadline = None;
        let Some(title) = self.pending.take() else {
            return;
        };

        tracing::debug!(query = %title, generation = self.generation, "searching events");
        let directory = Arc::clone(&self.directory);
        let fetch_tx = self.fetch_tx.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let query = EventQuery::by_title(title);
            let result = directory.search_events(&query).await;
            let _ = fetch_tx.send((generation, result));
        });
    }

    fn on_result(&mut self, received: u64, result: AppResult<EventPage>) {
        if received != self.generation {
            tracing::debug!(
                received,
                current = self.generation,
                "discarding stale search response"
            );
            return;
        }
        match result {
            Ok(page) => {
                let _ = self.results_tx.send(page.data);
            }
            Err(err) => {
                // Keep whatever is on screen rather than blanking it
                tracing::warn!(code = %err.code, "event search failed");
            }
        }
    }
}
