// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A breed browsing context.
//!
//! [`BreedBrowser`] holds what a listing screen holds: the current page, the
//! mode (plain listing or search) and the known total discovered by the
//! count probe. Requests may overlap; each one takes a generation ticket and
//! its result is applied only if no newer request started in the meantime.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use purrview_core::{ApiError, BreedRecord, CatalogBackend, PageRequest, PageResult};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::pagination::{estimate_page, last_page};
use crate::search::SearchAggregator;

/// What the browser is currently showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseMode {
    Listing,
    Search { query: String },
}

/// Result of a page load.
#[derive(Debug, Clone, PartialEq)]
pub enum PageLoad {
    /// The page is now the browser's current page.
    Applied(PageResult<BreedRecord>),
    /// A newer request started before this one finished; nothing changed.
    Stale,
}

impl PageLoad {
    pub fn applied(self) -> Option<PageResult<BreedRecord>> {
        match self {
            PageLoad::Applied(page) => Some(page),
            PageLoad::Stale => None,
        }
    }
}

#[derive(Debug)]
struct BrowserState {
    generation: u64,
    /// Count probe of the current browsing session. `reset` swaps in a
    /// fresh cell, so a probe still in flight fills a cell nobody reads.
    probe: Arc<OnceCell<Option<u64>>>,
    mode: BrowseMode,
    current: Option<PageResult<BreedRecord>>,
}

/// Listing and search over a [`CatalogBackend`] with last-write-wins pages.
pub struct BreedBrowser {
    backend: Arc<dyn CatalogBackend>,
    search: SearchAggregator,
    page_size: u32,
    state: Mutex<BrowserState>,
}

impl BreedBrowser {
    pub fn new(backend: Arc<dyn CatalogBackend>, page_size: u32) -> Self {
        let page_size = page_size.max(1);
        Self {
            search: SearchAggregator::new(Arc::clone(&backend), page_size),
            backend,
            page_size,
            state: Mutex::new(BrowserState {
                generation: 0,
                probe: Arc::new(OnceCell::new()),
                mode: BrowseMode::Listing,
                current: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BrowserState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self) -> u64 {
        let mut state = self.lock();
        state.generation += 1;
        state.generation
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.lock().generation == ticket
    }

    /// Stores `page` if `ticket` is still the newest request.
    fn apply(&self, ticket: u64, mode: BrowseMode, page: PageResult<BreedRecord>) -> PageLoad {
        let mut state = self.lock();
        if state.generation != ticket {
            warn!(ticket, newest = state.generation, "discarding stale page");
            return PageLoad::Stale;
        }
        state.mode = mode;
        state.current = Some(page.clone());
        PageLoad::Applied(page)
    }

    /// Runs the full-count probe once per browsing session and returns the
    /// known total. Concurrent callers share a single probe.
    ///
    /// A failed probe or a zero count leaves the browser estimating.
    pub async fn initialize(&self) -> Option<u64> {
        let probe = Arc::clone(&self.lock().probe);
        *probe.get_or_init(|| self.count_probe()).await
    }

    async fn count_probe(&self) -> Option<u64> {
        match self.backend.count_breeds().await {
            Ok(0) => {
                warn!("count probe returned no breeds, estimating page totals");
                None
            }
            Ok(count) => {
                info!(count, "catalog size discovered");
                Some(count)
            }
            Err(e) => {
                warn!(error = %e, "count probe failed, estimating page totals");
                None
            }
        }
    }

    /// Lists `page`, or `None` when a newer request started meanwhile.
    async fn fetch(&self, ticket: u64, page: u32) -> Result<Option<Vec<BreedRecord>>, ApiError> {
        match self.backend.list_breeds(page, self.page_size).await {
            Ok(items) if self.is_current(ticket) => Ok(Some(items)),
            Ok(_) => Ok(None),
            Err(_) if !self.is_current(ticket) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Loads listing `page` (1-based).
    ///
    /// With a known total, `page` is clamped to the last page before any
    /// request. An empty page past the first steps back one page, which then
    /// counts as the last page. If that page is empty too the browser falls
    /// back to page 1, so a load costs at most three listing requests.
    pub async fn load_page(&self, page: u32) -> Result<PageLoad, ApiError> {
        let known_total = self.initialize().await;
        let ticket = self.begin();
        let mut page = page.max(1);
        if let Some(known) = known_total {
            let last = last_page(known, self.page_size);
            if page > last {
                debug!(page, last, "past the known end, clamping");
                page = last;
            }
        }

        let Some(mut items) = self.fetch(ticket, page).await? else {
            return Ok(PageLoad::Stale);
        };
        // Set once the page after `page` has been seen empty.
        let mut next_is_empty = false;
        if items.is_empty() && page > 1 {
            debug!(page, "past the end, stepping back");
            page -= 1;
            let Some(previous) = self.fetch(ticket, page).await? else {
                return Ok(PageLoad::Stale);
            };
            items = previous;
            next_is_empty = true;

            if items.is_empty() && page > 1 {
                debug!(page, "still past the end, returning to page 1");
                page = 1;
                let Some(first) = self.fetch(ticket, page).await? else {
                    return Ok(PageLoad::Stale);
                };
                items = first;
                next_is_empty = false;
            }
        }

        let request = PageRequest::new(page, self.page_size).with_known_total(known_total);
        let mut result = estimate_page(items, request);
        if next_is_empty && known_total.is_none() && !result.items.is_empty() {
            result.total =
                u64::from(page - 1) * u64::from(self.page_size) + result.items.len() as u64;
            result.total_pages = page;
        }
        debug!(
            page,
            total = result.total,
            total_pages = result.total_pages,
            source = %result.source,
            "listing page"
        );
        Ok(self.apply(ticket, BrowseMode::Listing, result))
    }

    /// Searches for `query` on `page`. A blank query returns to the listing
    /// at page 1.
    pub async fn search(&self, query: &str, page: u32) -> Result<PageLoad, ApiError> {
        let query = query.trim();
        if query.is_empty() {
            return self.load_page(1).await;
        }
        let ticket = self.begin();
        match self.search.search(query, page).await {
            Ok(result) => Ok(self.apply(
                ticket,
                BrowseMode::Search {
                    query: query.to_string(),
                },
                result,
            )),
            Err(_) if !self.is_current(ticket) => Ok(PageLoad::Stale),
            Err(e) => Err(e),
        }
    }

    /// Moves to `page` in the current mode.
    pub async fn go_to(&self, page: u32) -> Result<PageLoad, ApiError> {
        match self.mode() {
            BrowseMode::Listing => self.load_page(page).await,
            BrowseMode::Search { query } => self.search(&query, page).await,
        }
    }

    /// Forgets the known total, the mode and the current page, invalidates
    /// any request in flight, then probes again.
    pub async fn reset(&self) {
        {
            let mut state = self.lock();
            state.generation += 1;
            state.probe = Arc::new(OnceCell::new());
            state.mode = BrowseMode::Listing;
            state.current = None;
        }
        self.initialize().await;
    }

    pub fn known_total(&self) -> Option<u64> {
        self.lock().probe.get().copied().flatten()
    }

    pub fn mode(&self) -> BrowseMode {
        self.lock().mode.clone()
    }

    /// Last applied page.
    pub fn current(&self) -> Option<PageResult<BreedRecord>> {
        self.lock().current.clone()
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}

impl std::fmt::Debug for BreedBrowser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BreedBrowser")
            .field("backend", &self.backend.name())
            .field("page_size", &self.page_size)
            .field("state", &*self.lock())
            .finish()
    }
}
