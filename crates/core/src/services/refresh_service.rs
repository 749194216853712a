use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::errors::CoreError;
use crate::models::quote::PriceQuote;
use crate::models::snapshot::{ApplyResult, Snapshot};
use crate::services::price_service::PriceService;

/// Single owner of the snapshot list.
///
/// Every fetch is stamped by [`SnapshotStore::begin`] and its outcome goes
/// through [`SnapshotStore::apply`], the only place the snapshot changes.
/// Readers observe published snapshots through a `watch` channel and never
/// touch the store itself.
#[derive(Debug)]
pub struct SnapshotStore {
    snapshot: Snapshot,
    next_generation: u64,
    publisher: watch::Sender<Snapshot>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::restore(Snapshot::new())
    }

    /// Rebuild a store around an existing snapshot, on a new channel.
    pub fn restore(snapshot: Snapshot) -> Self {
        let next_generation = snapshot.generation.max(snapshot.failed_generation);
        let (publisher, _) = watch::channel(snapshot.clone());
        Self {
            snapshot,
            next_generation,
            publisher,
        }
    }

    /// Stamp a new fetch. Later calls always return larger generations.
    pub fn begin(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    /// Apply the outcome of fetch `generation` and publish the result.
    /// Stale outcomes are dropped without publishing.
    pub fn apply(
        &mut self,
        generation: u64,
        outcome: Result<Vec<PriceQuote>, CoreError>,
    ) -> ApplyResult {
        let result = self.snapshot.apply(generation, outcome, Utc::now());
        match result {
            ApplyResult::Replaced => {
                debug!(generation, quotes = self.snapshot.quotes.len(), "snapshot replaced");
            }
            ApplyResult::Failed => {
                warn!(
                    generation,
                    error = self.snapshot.last_error.as_deref().unwrap_or_default(),
                    "fetch failed, keeping previous snapshot"
                );
            }
            ApplyResult::Discarded => {
                debug!(
                    generation,
                    held = self.snapshot.generation,
                    "discarding out-of-order fetch result"
                );
                return result;
            }
        }
        self.publisher.send_replace(self.snapshot.clone());
        result
    }

    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// A receiver that sees every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.publisher.subscribe()
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Periodic quote refresh.
///
/// Fires once immediately and then every `interval`. Each fire starts a
/// fetch without waiting for earlier ones to finish, so a slow request
/// never delays the next fire. Overlapping fetches may complete in any
/// order; the store's generation stamps make sure an older response
/// never overwrites a newer one.
pub struct RefreshScheduler;

impl RefreshScheduler {
    /// Move `store` into a background task and start refreshing.
    ///
    /// Must be called from within a tokio runtime. The store is handed back
    /// by [`RefreshHandle::shutdown`].
    pub fn spawn(
        service: Arc<PriceService>,
        ids: Vec<String>,
        interval: Duration,
        store: SnapshotStore,
    ) -> RefreshHandle {
        let (trigger_tx, trigger_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let snapshot = store.subscribe();

        info!(?interval, assets = ids.len(), "starting quote refresh");
        let task = tokio::spawn(run(
            service,
            Arc::from(ids),
            interval,
            store,
            trigger_rx,
            shutdown_rx,
        ));

        RefreshHandle {
            trigger: trigger_tx,
            shutdown: Some(shutdown_tx),
            snapshot,
            task: Some(task),
        }
    }
}

type FetchOutcome = (u64, Result<Vec<PriceQuote>, CoreError>);

async fn run(
    service: Arc<PriceService>,
    ids: Arc<[String]>,
    interval: Duration,
    mut store: SnapshotStore,
    mut triggers: mpsc::UnboundedReceiver<()>,
    mut shutdown: oneshot::Receiver<()>,
) -> SnapshotStore {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut in_flight: JoinSet<FetchOutcome> = JoinSet::new();

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {
                start_fetch(&mut in_flight, &mut store, &service, &ids);
            }
            Some(()) = triggers.recv() => {
                start_fetch(&mut in_flight, &mut store, &service, &ids);
            }
            Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                match joined {
                    Ok((generation, outcome)) => {
                        store.apply(generation, outcome);
                    }
                    Err(e) if e.is_cancelled() => {}
                    Err(e) => warn!(error = %e, "fetch task panicked"),
                }
            }
        }
    }

    // Nothing may update the snapshot after shutdown.
    in_flight.abort_all();
    info!(pending = in_flight.len(), "quote refresh stopped");
    store
}

fn start_fetch(
    in_flight: &mut JoinSet<FetchOutcome>,
    store: &mut SnapshotStore,
    service: &Arc<PriceService>,
    ids: &Arc<[String]>,
) {
    let generation = store.begin();
    let service = Arc::clone(service);
    let ids = Arc::clone(ids);
    debug!(generation, in_flight = in_flight.len(), "starting fetch");
    in_flight.spawn(async move { (generation, service.fetch_snapshot(&ids).await) });
}

/// Control handle for a running [`RefreshScheduler`].
///
/// Dropping the handle stops the timer and aborts in-flight fetches.
pub struct RefreshHandle {
    trigger: mpsc::UnboundedSender<()>,
    shutdown: Option<oneshot::Sender<()>>,
    snapshot: watch::Receiver<Snapshot>,
    task: Option<JoinHandle<SnapshotStore>>,
}

impl RefreshHandle {
    /// Fire an extra fetch right away, outside the regular interval.
    /// Returns `false` if the scheduler is no longer running.
    pub fn refresh_now(&self) -> bool {
        self.trigger.send(()).is_ok()
    }

    /// A receiver that sees every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot.clone()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop the timer, cancel in-flight fetches and take the store back.
    /// Returns `None` if the background task died.
    pub async fn shutdown(mut self) -> Option<SnapshotStore> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let task = self.task.take()?;
        match task.await {
            Ok(store) => Some(store),
            Err(e) => {
                warn!(error = %e, "refresh task ended abnormally");
                None
            }
        }
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
