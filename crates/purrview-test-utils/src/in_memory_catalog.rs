// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory catalog backend.
//!
//! `InMemoryCatalog` implements `CatalogBackend` over a fixed breed list.
//! Individual operations can be made to fail, and listing can be delayed to
//! exercise overlapping requests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use purrview_core::{
    AdapterKind, ApiAdapter, ApiError, BreedImage, BreedRecord, CatalogBackend, HealthStatus,
};

/// Catalog operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogOp {
    List,
    Count,
    Breed,
    Images,
    Search,
}

/// A catalog backend answering from memory.
pub struct InMemoryCatalog {
    breeds: Vec<BreedRecord>,
    images: HashMap<String, Vec<BreedImage>>,
    failures: Mutex<HashMap<CatalogOp, ApiError>>,
    list_delays: Mutex<HashMap<u32, Duration>>,
    calls: AtomicUsize,
}

impl InMemoryCatalog {
    pub fn new(breeds: Vec<BreedRecord>) -> Self {
        Self {
            breeds,
            images: HashMap::new(),
            failures: Mutex::new(HashMap::new()),
            list_delays: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// `count` generated breeds `breed-0`, `breed-1`, ...
    pub fn with_sample_breeds(count: usize) -> Self {
        Self::new((0..count).map(sample_breed).collect())
    }

    /// Registers images for `breed_id`.
    pub fn with_images(mut self, breed_id: &str, images: Vec<BreedImage>) -> Self {
        self.images.insert(breed_id.to_string(), images);
        self
    }

    /// Makes `op` fail with `error` until [`clear_failures`](Self::clear_failures).
    pub fn fail(&self, op: CatalogOp, error: ApiError) {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(op, error);
    }

    pub fn clear_failures(&self) {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Delays listing of `page` by `delay`.
    pub fn delay_page(&self, page: u32, delay: Duration) {
        self.list_delays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(page, delay);
    }

    /// Total backend calls served, failed ones included.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn breed_count(&self) -> usize {
        self.breeds.len()
    }

    fn enter(&self, op: CatalogOp) -> Result<(), ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self
            .failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&op)
        {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn slice(records: &[BreedRecord], page: u32, limit: u32) -> Vec<BreedRecord> {
        let start = (page.max(1) as usize - 1).saturating_mul(limit as usize);
        records
            .iter()
            .skip(start)
            .take(limit as usize)
            .cloned()
            .collect()
    }
}

fn sample_breed(i: usize) -> BreedRecord {
    BreedRecord {
        id: format!("breed-{i}"),
        name: format!("Sample Breed {i}"),
        origin: "Testland".to_string(),
        temperament: "Calm".to_string(),
        adaptability: 3,
        ..BreedRecord::default()
    }
}

#[async_trait]
impl ApiAdapter for InMemoryCatalog {
    fn name(&self) -> &str {
        "in-memory-catalog"
    }

    fn adapter_kind(&self) -> AdapterKind {
        AdapterKind::Catalog
    }

    async fn health_check(&self) -> HealthStatus {
        match self.enter(CatalogOp::List) {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Degraded(e.to_string()),
        }
    }
}

#[async_trait]
impl CatalogBackend for InMemoryCatalog {
    async fn list_breeds(&self, page: u32, limit: u32) -> Result<Vec<BreedRecord>, ApiError> {
        let delay = self
            .list_delays
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&page)
            .copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.enter(CatalogOp::List)?;
        Ok(Self::slice(&self.breeds, page, limit))
    }

    async fn count_breeds(&self) -> Result<u64, ApiError> {
        self.enter(CatalogOp::Count)?;
        Ok(self.breeds.len() as u64)
    }

    async fn breed(&self, id: &str) -> Result<BreedRecord, ApiError> {
        self.enter(CatalogOp::Breed)?;
        self.breeds
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    async fn breed_images(&self, breed_id: &str) -> Result<Vec<BreedImage>, ApiError> {
        self.enter(CatalogOp::Images)?;
        Ok(self.images.get(breed_id).cloned().unwrap_or_default())
    }

    async fn search_breeds(
        &self,
        query: &str,
        page: u32,
        limit: u32,
    ) -> Result<Vec<BreedRecord>, ApiError> {
        self.enter(CatalogOp::Search)?;
        let needle = query.to_lowercase();
        let matches: Vec<BreedRecord> = self
            .breeds
            .iter()
            .filter(|b| b.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        Ok(Self::slice(&matches, page, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pages_slice_the_breed_list() {
        let catalog = InMemoryCatalog::with_sample_breeds(25);
        assert_eq!(catalog.list_breeds(1, 10).await.unwrap().len(), 10);
        assert_eq!(catalog.list_breeds(3, 10).await.unwrap().len(), 5);
        assert!(catalog.list_breeds(4, 10).await.unwrap().is_empty());
        assert_eq!(catalog.count_breeds().await.unwrap(), 25);
        assert_eq!(catalog.call_count(), 4);
    }

    #[tokio::test]
    async fn injected_failures_apply_until_cleared() {
        let catalog = InMemoryCatalog::with_sample_breeds(3);
        catalog.fail(CatalogOp::Count, ApiError::ServerFault { status: 503 });
        assert_eq!(
            catalog.count_breeds().await.unwrap_err(),
            ApiError::ServerFault { status: 503 }
        );
        assert!(catalog.list_breeds(1, 10).await.is_ok());
        catalog.clear_failures();
        assert_eq!(catalog.count_breeds().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let catalog = InMemoryCatalog::with_sample_breeds(12);
        let found = catalog.search_breeds("breed 1", 1, 10).await.unwrap();
        // breed 1, 10, 11
        assert_eq!(found.len(), 3);
        assert_eq!(catalog.breed("breed-4").await.unwrap().name, "Sample Breed 4");
        assert_eq!(catalog.breed("nope").await.unwrap_err(), ApiError::NotFound);
    }
}
