//! Search controller
//!
//! Coordinates the debouncer, the staleness guard and the accumulator
//! around a [`PageSource`]. Every query runs under its own generation;
//! responses that arrive after a newer generation started are discarded.

use std::sync::Arc;
use std::time::Duration;

use metflix_core::{FetchError, NetworkError, PageSource, Query, QueryFilters, ResultItem};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::accumulator::{AccumulatedState, Accumulator, AppendOutcome};
use crate::debounce::Debouncer;
use crate::error::{Result, SearchError};
use crate::generation::{Generation, StalenessGuard};
use crate::projector::{self, KindCounts, KindFilter};

/// Default quiet period before a typed query is sent
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Default upper bound on a single page fetch
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    pub debounce: Duration,
    pub fetch_timeout: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl ControllerConfig {
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }
}

/// Where the controller is in a query lifecycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ControllerStatus {
    /// No query is active
    #[default]
    Idle,
    /// Waiting for input to settle before fetching
    Debouncing { generation: Generation },
    /// A page request is in flight
    Fetching { generation: Generation, page: u32 },
    /// The latest page was merged
    Settled { generation: Generation },
    /// The latest page request failed; accumulated items are kept
    Failed {
        generation: Generation,
        error: FetchError,
    },
}

impl ControllerStatus {
    pub fn generation(&self) -> Option<Generation> {
        match self {
            ControllerStatus::Idle => None,
            ControllerStatus::Debouncing { generation }
            | ControllerStatus::Fetching { generation, .. }
            | ControllerStatus::Settled { generation }
            | ControllerStatus::Failed { generation, .. } => Some(*generation),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            ControllerStatus::Debouncing { .. } | ControllerStatus::Fetching { .. }
        )
    }
}

/// What a call to `submit` or `set_filters` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A fetch will run once the debounce period passes
    Scheduled(Generation),
    /// Results were cleared and nothing will be fetched
    Cleared,
    /// The query matches the one already active
    Unchanged,
    /// Filters were saved for the next query; nothing is active to re-run
    Stored,
}

/// Result of an immediate fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page was merged into the accumulated results
    Applied {
        generation: Generation,
        page: u32,
        added: usize,
    },
    /// A newer query started while the page was in flight
    Stale,
    /// Every page of the active query is already loaded
    Exhausted,
    /// The active query is still debouncing or fetching
    Busy,
}

/// The latest dispatched query and the generation it runs under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveQuery {
    pub query: Query,
    pub generation: Generation,
}

struct Session {
    filters: QueryFilters,
    active: Option<ActiveQuery>,
    status: ControllerStatus,
    debouncer: Debouncer,
}

struct Inner<S> {
    source: S,
    config: ControllerConfig,
    guard: StalenessGuard,
    // Lock order: session before results
    session: Mutex<Session>,
    results: RwLock<Accumulator>,
}

/// Incremental search over a paginated catalog
///
/// Cloning is cheap and every clone drives the same controller.
pub struct SearchController<S> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for SearchController<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: PageSource + 'static> SearchController<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, ControllerConfig::default())
    }

    pub fn with_config(source: S, config: ControllerConfig) -> Self {
        info!(
            "Search controller ready (debounce {:?}, fetch timeout {:?})",
            config.debounce, config.fetch_timeout
        );
        Self {
            inner: Arc::new(Inner {
                source,
                config,
                guard: StalenessGuard::new(),
                session: Mutex::new(Session {
                    filters: QueryFilters::default(),
                    active: None,
                    status: ControllerStatus::Idle,
                    debouncer: Debouncer::new(config.debounce),
                }),
                results: RwLock::new(Accumulator::new()),
            }),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.inner.config
    }

    /// Accept new search text
    ///
    /// Blank text clears the results right away. Other text starts a new
    /// generation, clears the previous results and schedules page 1 after
    /// the debounce period. Submitting the text that is already pending
    /// only restarts the timer.
    pub async fn submit(&self, text: impl AsRef<str>) -> Dispatch {
        let text = text.as_ref().trim();
        let mut session = self.inner.session.lock().await;

        if text.is_empty() {
            session.debouncer.cancel();
            let generation = self.inner.guard.begin_generation();
            self.inner.results.write().await.reset(generation);
            session.active = None;
            session.status = ControllerStatus::Idle;
            debug!("Search cleared ({})", generation);
            return Dispatch::Cleared;
        }

        let query = Query::search(text).with_filters(session.filters.clone());
        self.schedule(&mut session, query).await
    }

    /// Replace the filters
    ///
    /// The active query, text search or browse, is re-run through the
    /// debouncer under a new generation. With no active query the filters
    /// apply to the next one.
    pub async fn set_filters(&self, filters: QueryFilters) -> Dispatch {
        let mut session = self.inner.session.lock().await;
        if session.filters == filters {
            return Dispatch::Unchanged;
        }
        session.filters = filters.clone();

        let active_query = session.active.as_ref().map(|active| active.query.clone());
        match active_query {
            Some(query) => self.schedule(&mut session, query.with_filters(filters)).await,
            None => Dispatch::Stored,
        }
    }

    /// Browse the catalog without search text, fetching page 1 now
    pub async fn browse(&self, filters: QueryFilters) -> Result<FetchOutcome> {
        let (generation, query) = {
            let mut session = self.inner.session.lock().await;
            session.filters = filters.clone();
            self.restart(&mut session, Query::browse(filters)).await
        };
        self.inner.fetch(generation, &query, 1).await
    }

    /// Fetch the next page of the active query
    pub async fn load_more(&self) -> Result<FetchOutcome> {
        let (generation, query, page) = {
            let mut session = self.inner.session.lock().await;
            let active = session.active.clone().ok_or(SearchError::NoActiveQuery)?;
            if session.status.is_loading() {
                return Ok(FetchOutcome::Busy);
            }

            let Some(page) = self.inner.results.read().await.state().next_page() else {
                debug!("No more pages for {}", active.generation);
                return Ok(FetchOutcome::Exhausted);
            };

            session.status = ControllerStatus::Fetching {
                generation: active.generation,
                page,
            };
            (active.generation, active.query, page)
        };
        self.inner.fetch(generation, &query, page).await
    }

    /// Re-run the active query from page 1 under a new generation
    pub async fn retry(&self) -> Result<FetchOutcome> {
        let (generation, query) = {
            let mut session = self.inner.session.lock().await;
            let active = session.active.clone().ok_or(SearchError::NoActiveQuery)?;
            self.restart(&mut session, active.query).await
        };
        self.inner.fetch(generation, &query, 1).await
    }

    pub async fn status(&self) -> ControllerStatus {
        self.inner.session.lock().await.status.clone()
    }

    /// The error from the latest request, if it failed
    pub async fn last_error(&self) -> Option<FetchError> {
        match &self.inner.session.lock().await.status {
            ControllerStatus::Failed { error, .. } => Some(error.clone()),
            _ => None,
        }
    }

    pub async fn active_query(&self) -> Option<ActiveQuery> {
        self.inner.session.lock().await.active.clone()
    }

    pub async fn filters(&self) -> QueryFilters {
        self.inner.session.lock().await.filters.clone()
    }

    /// A copy of the accumulated results
    pub async fn snapshot(&self) -> AccumulatedState {
        self.inner.results.read().await.snapshot()
    }

    /// Accumulated items matching `filter`, in arrival order
    pub async fn items(&self, filter: KindFilter) -> Vec<ResultItem> {
        let results = self.inner.results.read().await;
        projector::project(results.state(), filter)
            .items
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn counts(&self) -> KindCounts {
        projector::counts_by_kind(self.inner.results.read().await.state())
    }

    /// Start a debounced fetch of `query`, unless it is already in progress
    async fn schedule(&self, session: &mut Session, query: Query) -> Dispatch {
        let same_query = session
            .active
            .as_ref()
            .is_some_and(|active| active.query == query);
        if same_query {
            match session.status.clone() {
                ControllerStatus::Debouncing { generation } => {
                    self.arm(session, generation, query);
                    return Dispatch::Scheduled(generation);
                }
                ControllerStatus::Fetching { generation, .. }
                | ControllerStatus::Settled { generation } => {
                    debug!("Query unchanged ({})", generation);
                    return Dispatch::Unchanged;
                }
                ControllerStatus::Idle | ControllerStatus::Failed { .. } => {}
            }
        }

        let generation = self.begin(session, query.clone()).await;
        session.status = ControllerStatus::Debouncing { generation };
        self.arm(session, generation, query);
        Dispatch::Scheduled(generation)
    }

    /// Start `query` under a new generation and mark page 1 as in flight
    async fn restart(&self, session: &mut Session, query: Query) -> (Generation, Query) {
        session.debouncer.cancel();
        let generation = self.begin(session, query.clone()).await;
        session.status = ControllerStatus::Fetching {
            generation,
            page: 1,
        };
        (generation, query)
    }

    async fn begin(&self, session: &mut Session, query: Query) -> Generation {
        let generation = self.inner.guard.begin_generation();
        self.inner.results.write().await.reset(generation);
        debug!("Starting {} for {:?}", generation, query.text);
        session.active = Some(ActiveQuery { query, generation });
        generation
    }

    fn arm(&self, session: &mut Session, generation: Generation, query: Query) {
        let inner = Arc::clone(&self.inner);
        session.debouncer.schedule(async move {
            let _outcome = inner.fetch(generation, &query, 1).await;
        });
    }
}

impl<S: PageSource> Inner<S> {
    /// Fetch one page and merge it if `generation` is still current
    async fn fetch(&self, generation: Generation, query: &Query, page: u32) -> Result<FetchOutcome> {
        if !self
            .set_status(generation, ControllerStatus::Fetching { generation, page })
            .await
        {
            return Ok(FetchOutcome::Stale);
        }

        let response =
            match tokio::time::timeout(self.config.fetch_timeout, self.source.fetch_page(query, page))
                .await
            {
                Ok(response) => response,
                Err(_) => Err(FetchError::Network(NetworkError::Timeout)),
            };

        match response {
            Ok(response) => {
                let added = {
                    let mut results = self.results.write().await;
                    if !self.guard.is_current(generation) {
                        debug!("Discarding page {} from stale {}", page, generation);
                        return Ok(FetchOutcome::Stale);
                    }
                    match results.append_page(generation, response) {
                        AppendOutcome::Applied { added, .. } => added,
                        AppendOutcome::Stale => return Ok(FetchOutcome::Stale),
                    }
                };
                self.set_status(generation, ControllerStatus::Settled { generation })
                    .await;
                debug!("Merged page {} for {} ({} new)", page, generation, added);
                Ok(FetchOutcome::Applied {
                    generation,
                    page,
                    added,
                })
            }
            Err(error) => {
                let failed = ControllerStatus::Failed {
                    generation,
                    error: error.clone(),
                };
                if !self.set_status(generation, failed).await {
                    debug!("Ignoring failure of stale {}: {}", generation, error);
                    return Ok(FetchOutcome::Stale);
                }
                warn!("Page {} for {} failed: {}", page, generation, error);
                Err(SearchError::Fetch(error))
            }
        }
    }

    /// Update the status if `generation` is still current
    async fn set_status(&self, generation: Generation, status: ControllerStatus) -> bool {
        let mut session = self.session.lock().await;
        if !self.guard.is_current(generation) {
            return false;
        }
        session.status = status;
        true
    }
}
