//! Session - the event loop that drives a [`Shelf`] against a record store.
//!
//! The session is the single owner of all state. Intents are applied
//! synchronously; the network work they ask for runs in spawned tasks that
//! report back over a channel, so the user keeps interacting while a call
//! is in flight. A mutation task sends its write outcome first and, only if
//! the write succeeded, fetches the collection and sends that too.
//!
//! Each fetch takes a sequence number just before the request goes out.
//! Results may arrive in any order; one older than the last applied is
//! dropped, so a slow read never overwrites a newer one.
//!
//! Every handled intent or event publishes a fresh [`Snapshot`] on a
//! `watch` channel.

use crate::gateway::RecordStore;
use crate::NetworkError;
use shelf_engine::{Book, Effect, Intent, Mutation, MutationKind, Shelf, Snapshot};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::{JoinHandle, JoinSet};
use uuid::Uuid;

/// Outcomes reported back to the session by background tasks.
#[derive(Debug)]
pub enum Event {
    /// The list fetch issued under this sequence number completed.
    Fetched(u64, Result<Vec<Book>, NetworkError>),
    /// A list fetch task ended without reporting its outcome.
    FetchAbandoned,
    /// A write completed. A successful write is followed by `Fetched`.
    Written(MutationKind, Result<(), NetworkError>),
    /// The notification shown under this generation timed out.
    NotificationExpired(u64),
}

pub struct Session {
    shelf: Shelf,
    store: Arc<dyn RecordStore>,
    notification_ttl: Duration,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
    fetch_seq: Arc<AtomicU64>,
    network: JoinSet<()>,
    expiry: Option<JoinHandle<()>>,
    snapshots: watch::Sender<Snapshot>,
}

impl Session {
    pub fn new(store: Arc<dyn RecordStore>, notification_ttl: Duration) -> Self {
        let shelf = Shelf::new();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (snapshots, _) = watch::channel(shelf.snapshot());

        Self {
            shelf,
            store,
            notification_ttl,
            events_tx,
            events_rx,
            fetch_seq: Arc::new(AtomicU64::new(0)),
            network: JoinSet::new(),
            expiry: None,
            snapshots,
        }
    }

    pub fn shelf(&self) -> &Shelf {
        &self.shelf
    }

    pub fn snapshot(&self) -> Snapshot {
        self.shelf.snapshot()
    }

    /// Receive every snapshot published from now on.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.subscribe()
    }

    /// Number of network tasks not yet joined.
    pub fn in_flight(&self) -> usize {
        self.network.len()
    }

    /// Begin the initial load.
    pub fn start(&mut self) {
        tracing::info!("Loading catalog");
        // Reload never fails locally.
        let _ = self.dispatch(Intent::Reload);
    }

    /// Apply a user intent and start any network work it requires.
    ///
    /// Must be called from within a Tokio runtime. Returns the local
    /// rejection, if any; a rejected intent starts no network work.
    pub fn dispatch(&mut self, intent: Intent) -> Result<(), shelf_engine::Error> {
        let kind = intent.kind();
        tracing::debug!(intent = kind, "Applying intent");

        let outcome = self.shelf.apply(intent, || Uuid::new_v4().to_string());
        let result = match outcome {
            Ok(effect) => {
                self.perform(effect);
                Ok(())
            }
            Err(e) => {
                tracing::info!(intent = kind, error = %e, "Intent rejected");
                Err(e)
            }
        };

        self.publish();
        result
    }

    /// Apply the outcome of a background task.
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::Fetched(seq, Ok(books)) => {
                let count = books.len();
                if self.shelf.fetch_succeeded(seq, books) {
                    tracing::info!(seq, count, "Catalog refreshed");
                } else {
                    tracing::debug!(seq, count, "Discarding stale fetch");
                }
            }
            Event::Fetched(seq, Err(e)) => {
                tracing::warn!(seq, error = %e, "Failed to fetch catalog");
                let generation = self.shelf.fetch_failed();
                self.schedule_expiry(generation);
            }
            Event::FetchAbandoned => {
                tracing::warn!("Fetch ended without a result");
                self.shelf.fetch_abandoned();
            }
            Event::Written(kind, Ok(())) => {
                tracing::info!(%kind, "Write accepted");
                let generation = self.shelf.mutation_succeeded(kind);
                self.schedule_expiry(generation);
            }
            Event::Written(kind, Err(e)) => {
                tracing::warn!(%kind, error = %e, "Write failed");
                let generation = self.shelf.mutation_failed(kind);
                self.schedule_expiry(generation);
            }
            Event::NotificationExpired(generation) => {
                if self.shelf.expire_notification(generation) {
                    tracing::debug!(generation, "Notification expired");
                    self.expiry = None;
                }
            }
        }

        self.publish();
    }

    /// Wait for the next background event.
    pub async fn next_event(&mut self) -> Option<Event> {
        self.events_rx.recv().await
    }

    /// Wait for all outstanding network work and apply its results.
    ///
    /// Pending notification timers are not waited for.
    pub async fn settle(&mut self) {
        while let Some(joined) = self.network.join_next().await {
            if let Err(e) = joined {
                tracing::error!(error = %e, "Network task failed");
            }
        }
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle(event);
        }
    }

    /// Drive the session from a stream of intents until it closes, then
    /// settle outstanding network work.
    pub async fn run(&mut self, mut intents: mpsc::Receiver<Intent>) {
        loop {
            tokio::select! {
                intent = intents.recv() => match intent {
                    Some(intent) => {
                        let _ = self.dispatch(intent);
                    }
                    None => break,
                },
                Some(event) = self.events_rx.recv() => self.handle(event),
                Some(joined) = self.network.join_next(), if !self.network.is_empty() => {
                    if let Err(e) = joined {
                        tracing::error!(error = %e, "Network task failed");
                    }
                }
            }
        }

        tracing::debug!(in_flight = self.network.len(), "Input closed, settling");
        self.settle().await;
    }

    fn perform(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::Fetch => self.spawn_fetch(),
            Effect::Mutate(mutation) => self.spawn_mutation(mutation),
        }
    }

    fn spawn_fetch(&mut self) {
        let store = Arc::clone(&self.store);
        let fetch = PendingFetch::new(self.events_tx.clone(), Arc::clone(&self.fetch_seq));
        self.network.spawn(async move {
            fetch.run(store.as_ref()).await;
        });
    }

    fn spawn_mutation(&mut self, mutation: Mutation) {
        let kind = mutation.kind();
        tracing::debug!(%kind, id = %mutation.book().id, "Sending write");

        let store = Arc::clone(&self.store);
        let tx = self.events_tx.clone();
        let fetch_seq = Arc::clone(&self.fetch_seq);
        self.network.spawn(async move {
            let written = store.write(&mutation).await;
            let accepted = written.is_ok();
            let _ = tx.send(Event::Written(kind, written));
            if accepted {
                PendingFetch::new(tx, fetch_seq).run(store.as_ref()).await;
            }
        });
    }

    /// Replace any running expiry timer with one for `generation`.
    fn schedule_expiry(&mut self, generation: u64) {
        if let Some(previous) = self.expiry.take() {
            previous.abort();
        }

        let ttl = self.notification_ttl;
        let tx = self.events_tx.clone();
        self.expiry = Some(tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            let _ = tx.send(Event::NotificationExpired(generation));
        }));
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.shelf.snapshot());
    }
}

/// A fetch the session is counting on.
///
/// Sends `FetchAbandoned` if dropped before its outcome was sent, as
/// happens when the task panics or is aborted mid-request.
struct PendingFetch {
    tx: mpsc::UnboundedSender<Event>,
    seq: Arc<AtomicU64>,
    done: bool,
}

impl PendingFetch {
    fn new(tx: mpsc::UnboundedSender<Event>, seq: Arc<AtomicU64>) -> Self {
        Self {
            tx,
            seq,
            done: false,
        }
    }

    async fn run(mut self, store: &dyn RecordStore) {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let fetched = store.fetch_all().await;
        self.done = true;
        let _ = self.tx.send(Event::Fetched(seq, fetched));
    }
}

impl Drop for PendingFetch {
    fn drop(&mut self) {
        if !self.done {
            let _ = self.tx.send(Event::FetchAbandoned);
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(timer) = self.expiry.take() {
            timer.abort();
        }
    }
}
