// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the Purrview cores and their collaborators.
//!
//! Remote backends extend the [`ApiAdapter`] base trait and use
//! `#[async_trait]` so they can be held as trait objects.

pub mod adapter;
pub mod auth;
pub mod catalog;
pub mod storage;

pub use adapter::ApiAdapter;
pub use auth::AuthBackend;
pub use catalog::CatalogBackend;
pub use storage::KeyValueStore;
