pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use std::sync::Arc;

use models::{
    holding::HoldingEntry,
    listing::{QuoteDetail, SortCriterion},
    quote::PriceQuote,
    settings::Settings,
    snapshot::{ApplyResult, Snapshot},
};
use providers::{icons, registry::ProviderRegistry};
use services::{
    holdings_service::HoldingsStore,
    list_projector,
    price_service::PriceService,
    refresh_service::{RefreshHandle, RefreshScheduler, SnapshotStore},
    series_service::SeriesService,
};
use tokio::sync::watch;
use tracing::{info, warn};
use uuid::Uuid;

use errors::CoreError;

/// Main entry point for the coin-watch core library.
///
/// Owns all application state explicitly: the snapshot store (or the
/// running refresh task that currently owns it), the holdings list, and
/// the current search/sort selection. Created at startup, stopped at
/// shutdown; dropping it cancels any running refresh.
#[must_use]
pub struct CoinWatch {
    settings: Settings,
    price_service: Arc<PriceService>,
    series_service: SeriesService,
    holdings: HoldingsStore,
    search_query: String,
    sort_criterion: SortCriterion,
    /// Present while no refresh task is running.
    store: Option<SnapshotStore>,
    /// Present while the refresh task owns the store.
    refresh: Option<RefreshHandle>,
    snapshot_rx: watch::Receiver<Snapshot>,
}

impl std::fmt::Debug for CoinWatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinWatch")
            .field("assets", &self.settings.asset_ids.len())
            .field("quotes", &self.snapshot_rx.borrow().quotes.len())
            .field("holdings", &self.holdings.len())
            .field("search_query", &self.search_query)
            .field("sort_criterion", &self.sort_criterion)
            .field("running", &self.is_running())
            .finish()
    }
}

impl CoinWatch {
    /// Create a watcher with the default providers (CoinGecko, then CoinCap).
    pub fn new(settings: Settings) -> Result<Self, CoreError> {
        let registry = ProviderRegistry::new_with_defaults(&settings);
        Self::with_registry(settings, registry)
    }

    /// Create a watcher backed by a custom provider registry.
    pub fn with_registry(settings: Settings, registry: ProviderRegistry) -> Result<Self, CoreError> {
        settings.validate()?;
        let price_service = Arc::new(PriceService::new(registry, settings.retry.clone()));
        let store = SnapshotStore::new();
        let snapshot_rx = store.subscribe();

        Ok(Self {
            settings,
            price_service,
            series_service: SeriesService::new(),
            holdings: HoldingsStore::new(),
            search_query: String::new(),
            sort_criterion: SortCriterion::default(),
            store: Some(store),
            refresh: None,
            snapshot_rx,
        })
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Refresh lifecycle ───────────────────────────────────────────

    /// Start periodic refreshing: one fetch now, then one per interval.
    /// Does nothing if already running. Requires a tokio runtime.
    pub fn start(&mut self) {
        if self.refresh.is_some() {
            return;
        }
        let Some(store) = self.store.take() else {
            return;
        };
        let handle = RefreshScheduler::spawn(
            Arc::clone(&self.price_service),
            self.settings.asset_ids.clone(),
            self.settings.refresh_interval,
            store,
        );
        self.snapshot_rx = handle.subscribe();
        self.refresh = Some(handle);
    }

    /// Stop refreshing. Cancels the timer and any in-flight fetch, and
    /// takes ownership of the snapshot store back.
    pub async fn stop(&mut self) {
        let Some(handle) = self.refresh.take() else {
            return;
        };
        let store = match handle.shutdown().await {
            Some(store) => store,
            None => {
                warn!("refresh task lost, restoring last published snapshot");
                SnapshotStore::restore(self.snapshot_rx.borrow().clone())
            }
        };
        self.snapshot_rx = store.subscribe();
        self.store = Some(store);
        info!("refresh stopped");
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.refresh.as_ref().is_some_and(|h| h.is_running())
    }

    /// Refresh right now.
    ///
    /// While the scheduler runs this fires an extra fetch through it and
    /// returns `None`; the result shows up in a later snapshot. Otherwise
    /// the fetch runs inline and the outcome of applying it is returned.
    /// Fetch failures never surface as errors: the previous quotes are
    /// kept and the failure is recorded on the snapshot.
    pub async fn refresh(&mut self) -> Option<ApplyResult> {
        if let Some(handle) = &self.refresh {
            handle.refresh_now();
            return None;
        }
        let store = self.store.as_mut()?;
        let generation = store.begin();
        let outcome = self
            .price_service
            .fetch_snapshot(&self.settings.asset_ids)
            .await;
        Some(store.apply(generation, outcome))
    }

    /// Wait until a new snapshot is published.
    ///
    /// Fails with `RefreshStopped` if the refresh task died. While stopped,
    /// only [`CoinWatch::refresh`] publishes, so awaiting this from the same
    /// owner would never return.
    pub async fn changed(&mut self) -> Result<(), CoreError> {
        self.snapshot_rx
            .changed()
            .await
            .map_err(|_| CoreError::RefreshStopped)
    }

    /// The latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// `true` when the displayed quotes should carry a stale marker.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.snapshot_rx
            .borrow()
            .is_stale(chrono::Utc::now(), self.settings.stale_after)
    }

    // ── Search & Sorting ────────────────────────────────────────────

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_sort_criterion(&mut self, criterion: SortCriterion) {
        self.sort_criterion = criterion;
    }

    #[must_use]
    pub fn sort_criterion(&self) -> SortCriterion {
        self.sort_criterion
    }

    /// The rows to render: current quotes filtered by the search query and
    /// sorted by the sort criterion. Recomputed on every call.
    #[must_use]
    pub fn visible_quotes(&self) -> Vec<PriceQuote> {
        list_projector::project(
            &self.snapshot_rx.borrow().quotes,
            &self.search_query,
            self.sort_criterion,
        )
    }

    /// Detail view for one asset, with a freshly generated synthetic chart.
    pub fn quote_detail(&self, id: &str) -> Result<QuoteDetail, CoreError> {
        let quote = self
            .snapshot_rx
            .borrow()
            .quote(id)
            .cloned()
            .ok_or_else(|| CoreError::QuoteNotFound(id.to_string()))?;

        Ok(QuoteDetail {
            icon_url: icons::icon_url(&quote.id).to_string(),
            series: self.series_service.generate(),
            quote,
        })
    }

    // ── Holdings ────────────────────────────────────────────────────

    /// Validate the add-form input and append a holding.
    pub fn add_holding(&mut self, name: &str, amount_text: &str) -> Result<Uuid, CoreError> {
        self.holdings.add(name, amount_text)
    }

    /// Remove the holdings at the given list positions.
    pub fn delete_holdings(&mut self, indexes: &[usize]) -> Result<Vec<HoldingEntry>, CoreError> {
        self.holdings.delete(indexes)
    }

    pub fn remove_holding(&mut self, id: Uuid) -> Result<HoldingEntry, CoreError> {
        self.holdings.remove(id)
    }

    #[must_use]
    pub fn holdings(&self) -> &[HoldingEntry] {
        self.holdings.entries()
    }
}
