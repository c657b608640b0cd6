//! Shared KOL store: the authoritative record collection, the current filter
//! criteria, and the filtered records and statistics derived from them.
//!
//! Derived values are recomputed on every mutation while the write lock is
//! held, so a reader never sees filtered records or stats that disagree with
//! the criteria or collection next to them. No lock is held across an await:
//! a fetch only takes the lock to issue its ticket and to apply its result,
//! and reads keep serving the previous collection in between.

pub mod snapshot;

pub use snapshot::{LoadStatus, StoreSnapshot};

use log::{debug, info, warn};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::watch;

use crate::common::{KolRecord, OverviewStats};
use crate::filter::{apply, FilterCriteria, FilterUpdate};
use crate::source::{FetchError, KolSource};
use crate::stats::summarize;

/// Sequence number of an issued fetch. Only the latest issued ticket may
/// apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// What happened to a completed fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Result applied and the store updated
    Applied,
    /// Source failed; error recorded, previous data kept
    Failed,
    /// A newer fetch was issued meanwhile; result discarded
    Superseded,
}

/// Which request left the current error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorOrigin {
    Records,
    Stats,
}

/// Completes its request as cancelled if dropped before `finish`, so a
/// dropped fetch future cannot leave the store loading forever
struct InFlight<'a> {
    store: &'a KolStore,
    origin: ErrorOrigin,
    ticket: u64,
    done: bool,
}

impl InFlight<'_> {
    fn finish(mut self) {
        self.done = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        debug!("{:?} request #{} dropped before completing", self.origin, self.ticket);
        match self.origin {
            ErrorOrigin::Records => {
                self.store.complete_fetch(FetchTicket(self.ticket), Err(FetchError::Cancelled));
            }
            ErrorOrigin::Stats => {
                self.store.complete_stats_fetch(self.ticket, Err(FetchError::Cancelled));
            }
        }
    }
}

#[derive(Debug)]
struct StoreState {
    records: Arc<Vec<KolRecord>>,
    filters: FilterCriteria,
    filtered: Arc<Vec<KolRecord>>,
    stats: Arc<OverviewStats>,
    server_stats: Option<Arc<OverviewStats>>,
    status: LoadStatus,
    stats_pending: bool,
    error: Option<String>,
    error_origin: Option<ErrorOrigin>,
    latest_fetch: u64,
    latest_stats_fetch: u64,
    revision: u64,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            records: Arc::new(Vec::new()),
            filters: FilterCriteria::default(),
            filtered: Arc::new(Vec::new()),
            stats: Arc::new(OverviewStats::default()),
            server_stats: None,
            status: LoadStatus::Idle,
            stats_pending: false,
            error: None,
            error_origin: None,
            latest_fetch: 0,
            latest_stats_fetch: 0,
            revision: 0,
        }
    }
}

impl StoreState {
    fn recompute(&mut self) {
        let filtered = if self.filters.is_empty() {
            Arc::clone(&self.records)
        } else {
            Arc::new(apply(&self.records, &self.filters))
        };
        self.stats = Arc::new(summarize(filtered.iter()));
        self.filtered = filtered;
    }

    fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading || self.stats_pending
    }
}

struct StoreInner {
    state: RwLock<StoreState>,
    revision_tx: watch::Sender<u64>,
}

/// Cloneable handle to a shared KOL store
#[derive(Clone)]
pub struct KolStore {
    inner: Arc<StoreInner>,
}

impl Default for KolStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for KolStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.read();
        f.debug_struct("KolStore")
            .field("records", &state.records.len())
            .field("filtered", &state.filtered.len())
            .field("status", &state.status)
            .field("revision", &state.revision)
            .finish()
    }
}

impl KolStore {
    pub fn new() -> Self {
        let (revision_tx, _) = watch::channel(0);
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(StoreState::default()),
                revision_tx,
            }),
        }
    }

    /// Create a store already holding `records`
    pub fn with_records(records: Vec<KolRecord>) -> Self {
        let store = Self::new();
        store.load(records);
        store
    }

    /// Run `f` under the write lock, then publish the new revision
    fn mutate<R>(&self, f: impl FnOnce(&mut StoreState) -> R) -> R {
        let (result, revision) = {
            let mut state = self.inner.state.write();
            let result = f(&mut state);
            state.revision += 1;
            (result, state.revision)
        };
        self.inner.revision_tx.send_replace(revision);
        result
    }

    /// Replace the authoritative collection. Filters are kept.
    pub fn load(&self, records: Vec<KolRecord>) {
        let count = records.len();
        self.mutate(|state| {
            state.records = Arc::new(records);
            state.recompute();
        });
        debug!("Store loaded {} records", count);
    }

    /// Merge a partial filter update and recompute the derived views
    pub fn update_filters(&self, update: FilterUpdate) {
        if update.is_noop() {
            return;
        }
        self.mutate(|state| {
            state.filters.merge(update);
            state.recompute();
        });
    }

    /// Reset filters to the all-permissive default
    pub fn clear_filters(&self) {
        self.mutate(|state| {
            state.filters = FilterCriteria::default();
            state.recompute();
        });
    }

    pub fn records(&self) -> Arc<Vec<KolRecord>> {
        Arc::clone(&self.inner.state.read().records)
    }

    pub fn filtered_records(&self) -> Arc<Vec<KolRecord>> {
        Arc::clone(&self.inner.state.read().filtered)
    }

    /// Statistics over the currently filtered records
    pub fn stats(&self) -> Arc<OverviewStats> {
        Arc::clone(&self.inner.state.read().stats)
    }

    /// Statistics for the full collection as last reported by the source
    pub fn server_stats(&self) -> Option<Arc<OverviewStats>> {
        self.inner.state.read().server_stats.clone()
    }

    pub fn filters(&self) -> FilterCriteria {
        self.inner.state.read().filters.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.read().is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.inner.state.read().error.clone()
    }

    pub fn status(&self) -> LoadStatus {
        self.inner.state.read().status
    }

    /// Look up a record of the authoritative collection by id
    pub fn record(&self, id: &str) -> Option<KolRecord> {
        self.inner.state.read().records.iter().find(|r| r.id == id).cloned()
    }

    /// Every consumer-facing field, read under a single lock
    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.inner.state.read();
        StoreSnapshot {
            records: Arc::clone(&state.records),
            filtered_records: Arc::clone(&state.filtered),
            stats: Arc::clone(&state.stats),
            server_stats: state.server_stats.clone(),
            filters: state.filters.clone(),
            is_loading: state.is_loading(),
            error: state.error.clone(),
            status: state.status,
            revision: state.revision,
        }
    }

    /// Receiver that observes the store revision after every change
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.inner.revision_tx.subscribe()
    }

    /// Issue a new fetch ticket and enter the loading state
    pub fn begin_fetch(&self) -> FetchTicket {
        self.mutate(|state| {
            state.latest_fetch += 1;
            state.status = LoadStatus::Loading;
            FetchTicket(state.latest_fetch)
        })
    }

    /// Apply the result of the fetch identified by `ticket`.
    ///
    /// Results of superseded tickets are dropped without touching the store.
    pub fn complete_fetch(
        &self,
        ticket: FetchTicket,
        result: Result<Vec<KolRecord>, FetchError>,
    ) -> FetchOutcome {
        {
            let state = self.inner.state.read();
            if ticket.0 != state.latest_fetch {
                debug!(
                    "Discarding fetch #{} (latest issued is #{})",
                    ticket.0, state.latest_fetch
                );
                return FetchOutcome::Superseded;
            }
        }

        self.mutate(|state| {
            // Re-check: another fetch may have been issued between the locks
            if ticket.0 != state.latest_fetch {
                return FetchOutcome::Superseded;
            }
            match result {
                Ok(records) => {
                    info!("Fetched {} KOL records", records.len());
                    state.records = Arc::new(records);
                    state.recompute();
                    state.status = LoadStatus::Loaded;
                    state.error = None;
                    state.error_origin = None;
                    FetchOutcome::Applied
                }
                Err(e) => {
                    let message = format!("Failed to fetch KOLs: {}", e.detail());
                    warn!("{}", message);
                    state.status = LoadStatus::Failed;
                    state.error = Some(message);
                    state.error_origin = Some(ErrorOrigin::Records);
                    FetchOutcome::Failed
                }
            }
        })
    }

    /// Fetch the authoritative collection from `source`
    pub async fn fetch<S: KolSource>(&self, source: &S) -> FetchOutcome {
        let ticket = self.begin_fetch();
        let guard = InFlight {
            store: self,
            origin: ErrorOrigin::Records,
            ticket: ticket.0,
            done: false,
        };
        let result = source.fetch_kols().await;
        guard.finish();
        self.complete_fetch(ticket, result)
    }

    fn begin_stats_fetch(&self) -> u64 {
        self.mutate(|state| {
            state.latest_stats_fetch += 1;
            state.stats_pending = true;
            state.latest_stats_fetch
        })
    }

    fn complete_stats_fetch(&self, ticket: u64, result: Result<OverviewStats, FetchError>) -> FetchOutcome {
        self.mutate(|state| {
            if ticket != state.latest_stats_fetch {
                return FetchOutcome::Superseded;
            }
            state.stats_pending = false;
            match result {
                Ok(stats) => {
                    state.server_stats = Some(Arc::new(stats));
                    if state.error_origin == Some(ErrorOrigin::Stats) {
                        state.error = None;
                        state.error_origin = None;
                    }
                    FetchOutcome::Applied
                }
                Err(e) => {
                    let message = format!("Failed to fetch stats: {}", e.detail());
                    warn!("{}", message);
                    state.error = Some(message);
                    state.error_origin = Some(ErrorOrigin::Stats);
                    FetchOutcome::Failed
                }
            }
        })
    }

    /// Refresh the source's own statistics for the full collection.
    ///
    /// A success clears an error left by an earlier stats refresh, but not
    /// one left by a failed records fetch.
    pub async fn refetch_stats<S: KolSource>(&self, source: &S) -> FetchOutcome {
        let ticket = self.begin_stats_fetch();
        let guard = InFlight {
            store: self,
            origin: ErrorOrigin::Stats,
            ticket,
            done: false,
        };
        let result = source.fetch_stats().await;
        guard.finish();
        self.complete_stats_fetch(ticket, result)
    }
}
