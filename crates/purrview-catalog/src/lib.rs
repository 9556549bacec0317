// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Breed catalog access for the Purrview client.
//!
//! # Components
//!
//! - [`CatalogClient`] - HTTP adapter for the third-party breed catalog
//! - [`pagination`] - page metadata from incomplete evidence
//! - [`SearchAggregator`] - query listing with exact totals
//! - [`BreedBrowser`] - a browsing context with a cached known total and
//!   last-write-wins page application
//! - [`load_gallery`] - breed detail plus images with fallback

pub mod client;
pub mod gallery;
pub mod listing;
pub mod pagination;
pub mod search;
pub mod types;

pub use client::CatalogClient;
pub use gallery::{Gallery, GallerySource, load_gallery};
pub use listing::{BreedBrowser, BrowseMode, PageLoad};
pub use pagination::{PageLink, estimate_page, exact_page, visible_pages};
pub use search::SearchAggregator;
