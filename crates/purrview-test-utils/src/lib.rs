// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Purrview integration tests.
//!
//! Provides mock backends and a test harness for fast, deterministic tests
//! without external services.
//!
//! # Components
//!
//! - [`MockAuthApi`] - wiremock auth server with canned accounts
//! - [`InMemoryCatalog`] - catalog backend over a fixed breed list with
//!   failure injection and artificial delay
//! - [`TestHarness`] - the full client stack wired to both

pub mod harness;
pub mod in_memory_catalog;
pub mod mock_auth;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use in_memory_catalog::{CatalogOp, InMemoryCatalog};
pub use mock_auth::MockAuthApi;
