// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query-filtered listing.

use std::sync::Arc;

use purrview_core::{ApiError, BreedRecord, CatalogBackend, PageResult};
use tracing::debug;

use crate::pagination::exact_page;

/// Runs breed searches and reports the result count as the exact total.
///
/// Unlike the plain listing there is no estimation: the search endpoint's
/// answer for one query and page is taken as complete.
#[derive(Clone)]
pub struct SearchAggregator {
    backend: Arc<dyn CatalogBackend>,
    limit: u32,
}

impl SearchAggregator {
    pub fn new(backend: Arc<dyn CatalogBackend>, limit: u32) -> Self {
        Self {
            backend,
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Searches for `query` (trimmed) on the 1-based `page`.
    pub async fn search(&self, query: &str, page: u32) -> Result<PageResult<BreedRecord>, ApiError> {
        let query = query.trim();
        let page = page.max(1);
        let items = self.backend.search_breeds(query, page, self.limit).await?;
        debug!(query, page, found = items.len(), "breed search");
        Ok(exact_page(items, page, self.limit))
    }
}

impl std::fmt::Debug for SearchAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchAggregator")
            .field("backend", &self.backend.name())
            .field("limit", &self.limit)
            .finish()
    }
}
