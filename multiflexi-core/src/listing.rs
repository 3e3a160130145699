//! Listing controller
//!
//! Paged loads of one entity type through the [`DataFetcher`], with the
//! page state the UI renders (has-more/has-prev, page number, cache and
//! timing metadata).

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};

use crate::cache::CacheStats;
use crate::error::CoreError;
use crate::fetcher::{BatchRequest, DataFetcher, FetchParams, DEFAULT_FORMAT, DEFAULT_ORDER};
use crate::registry::{EntityRegistry, EntitySpec};
use crate::types::{EntityKind, Item};

/// How a refresh treats the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMode {
    /// Plain load; a warm entry is served as is (auto-refresh)
    Soft,
    /// Drop expired entries, then load
    Sweep,
    /// Drop the whole cache, then load
    Reload,
}

/// Pagination and fetch metadata of a loaded page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    pub limit: usize,
    pub offset: usize,
    /// 1-based
    pub page: usize,
    /// The page came back full; more rows may follow
    pub has_more: bool,
    pub has_prev: bool,
    pub cached: bool,
    pub elapsed: Duration,
    pub loaded_at: DateTime<Local>,
}

impl PageState {
    /// Derive paging flags from a page of `count` rows.
    ///
    /// `has_more` cannot tell a last full page from a page followed by more
    /// rows; the next load returning nothing settles it.
    #[must_use]
    pub fn derive(limit: usize, offset: usize, count: usize, cached: bool, elapsed: Duration) -> Self {
        let limit = limit.max(1);
        Self {
            limit,
            offset,
            page: offset / limit + 1,
            has_more: count == limit,
            has_prev: offset > 0,
            cached,
            elapsed,
            loaded_at: Local::now(),
        }
    }

    /// Offset of the next page, if there may be one.
    #[must_use]
    pub fn next_offset(&self) -> Option<usize> {
        self.has_more.then_some(self.offset + self.limit)
    }

    /// Offset of the previous page, if there is one.
    #[must_use]
    pub fn prev_offset(&self) -> Option<usize> {
        self.has_prev.then(|| self.offset.saturating_sub(self.limit))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPage {
    pub kind: EntityKind,
    pub items: Vec<Item>,
    pub state: PageState,
}

/// Result of one listing load
#[derive(Debug)]
pub enum ListingOutcome {
    Loaded(LoadedPage),
    Failed { kind: EntityKind, error: CoreError },
}

impl ListingOutcome {
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Loaded(page) => page.kind,
            Self::Failed { kind, .. } => *kind,
        }
    }
}

/// Drives paged loads for every registered entity type.
#[derive(Clone)]
pub struct ListingController {
    fetcher: Arc<DataFetcher>,
    registry: Arc<EntityRegistry>,
    format: String,
    order: String,
}

impl ListingController {
    #[must_use]
    pub fn new(fetcher: Arc<DataFetcher>, registry: Arc<EntityRegistry>) -> Self {
        Self {
            fetcher,
            registry,
            format: DEFAULT_FORMAT.to_string(),
            order: DEFAULT_ORDER.to_string(),
        }
    }

    /// Output format and ordering requested for every listing
    #[must_use]
    pub fn with_query(mut self, format: impl Into<String>, order: impl Into<String>) -> Self {
        self.format = format.into();
        self.order = order.into();
        self
    }

    #[must_use]
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    #[must_use]
    /// Shared handle to the registry for owners that outlive this controller.
    pub fn registry_handle(&self) -> Arc<EntityRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn fetcher(&self) -> &Arc<DataFetcher> {
        &self.fetcher
    }

    pub fn spec(&self, kind: EntityKind) -> Result<&EntitySpec, CoreError> {
        self.registry.get(kind)
    }

    fn params(&self, kind: EntityKind, limit: usize, offset: usize) -> FetchParams {
        FetchParams {
            format: self.format.clone(),
            order: self.order.clone(),
            ..FetchParams::list(kind.noun(), limit.max(1), offset)
        }
    }

    /// Load one page of `kind`.
    pub async fn load(&self, kind: EntityKind, limit: usize, offset: usize) -> ListingOutcome {
        let spec = match self.registry.get(kind) {
            Ok(spec) => spec,
            Err(error) => return ListingOutcome::Failed { kind, error },
        };
        let params = self.params(kind, limit, offset);

        match self
            .fetcher
            .fetch(&params, spec.fetch_options(), spec.decode)
            .await
        {
            Ok(fetched) => {
                let state = PageState::derive(
                    params.limit,
                    offset,
                    fetched.items.len(),
                    fetched.cached,
                    fetched.elapsed,
                );
                ListingOutcome::Loaded(LoadedPage {
                    kind,
                    items: fetched.items,
                    state,
                })
            }
            Err(error) => ListingOutcome::Failed { kind, error },
        }
    }

    /// Reload the current page after adjusting the cache according to `mode`.
    pub async fn refresh(
        &self,
        kind: EntityKind,
        limit: usize,
        offset: usize,
        mode: RefreshMode,
    ) -> ListingOutcome {
        match mode {
            RefreshMode::Soft => {}
            RefreshMode::Sweep => {
                self.fetcher.sweep_expired().await;
            }
            RefreshMode::Reload => {
                self.fetcher.clear_cache().await;
            }
        }
        self.load(kind, limit, offset).await
    }

    /// Load the first page of several kinds concurrently.
    pub async fn load_batch(&self, kinds: &[EntityKind]) -> Vec<ListingOutcome> {
        let mut outcomes = Vec::new();
        let mut requests = Vec::new();
        for &kind in kinds {
            match self.registry.get(kind) {
                Ok(spec) => requests.push(BatchRequest {
                    key: (kind, spec.page_size),
                    params: self.params(kind, spec.page_size, 0),
                    options: spec.fetch_options(),
                    decode: spec.decode,
                }),
                Err(error) => outcomes.push(ListingOutcome::Failed { kind, error }),
            }
        }

        for result in self.fetcher.fetch_batch(requests).await {
            let (kind, limit) = result.key;
            outcomes.push(match result.result {
                Ok(fetched) => {
                    let state =
                        PageState::derive(limit, 0, fetched.items.len(), fetched.cached, fetched.elapsed);
                    ListingOutcome::Loaded(LoadedPage {
                        kind,
                        items: fetched.items,
                        state,
                    })
                }
                Err(error) => ListingOutcome::Failed { kind, error },
            });
        }
        outcomes
    }

    /// Forget cached pages of `kind`, e.g. after one of its records changed.
    pub async fn invalidate(&self, kind: EntityKind) {
        let removed = self.fetcher.invalidate(kind.noun()).await;
        log::debug!("[listing] invalidated {removed} cached pages of {kind}");
    }

    pub async fn clear_cache(&self) {
        self.fetcher.clear_cache().await;
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.fetcher.cache_stats().await
    }
}
