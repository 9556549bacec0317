// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog backend trait for the third-party breed catalog.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::traits::adapter::ApiAdapter;
use crate::types::{BreedImage, BreedRecord};

/// Remote breed catalog.
///
/// Pages are 1-based here; translating to the upstream's zero-based pages
/// is the implementation's concern. Listing and search return raw pages
/// without any total: deriving pagination metadata is left to callers.
#[async_trait]
pub trait CatalogBackend: ApiAdapter {
    /// One page of the full breed listing.
    async fn list_breeds(&self, page: u32, limit: u32) -> Result<Vec<BreedRecord>, ApiError>;

    /// Full-count probe: the number of breeds the catalog lists.
    async fn count_breeds(&self) -> Result<u64, ApiError>;

    /// A single breed by id.
    async fn breed(&self, id: &str) -> Result<BreedRecord, ApiError>;

    /// Full-size images for a breed.
    async fn breed_images(&self, breed_id: &str) -> Result<Vec<BreedImage>, ApiError>;

    /// One page of breeds matching a free-text query.
    async fn search_breeds(
        &self,
        query: &str,
        page: u32,
        limit: u32,
    ) -> Result<Vec<BreedRecord>, ApiError>;
}
