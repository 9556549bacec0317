// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles the whole client stack: an in-memory key/value
//! store, the session store, the real [`AuthClient`] pointed at a
//! [`MockAuthApi`], the auth session service, the route guard, and a
//! breed browser over an [`InMemoryCatalog`].

use std::sync::Arc;

use purrview_auth::{AuthClient, AuthSession};
use purrview_catalog::BreedBrowser;
use purrview_config::model::PurrviewConfig;
use purrview_core::{KeyValueStore, LoginRequest, PurrviewError};
use purrview_session::{MemoryStore, RouteGuard, SessionStore};

use crate::in_memory_catalog::InMemoryCatalog;
use crate::mock_auth::{MOCK_EMAIL, MOCK_PASSWORD, MockAuthApi};

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    breed_count: usize,
    store: Option<Arc<dyn KeyValueStore>>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            breed_count: 34,
            store: None,
        }
    }

    /// Number of sample breeds in the catalog.
    pub fn with_breeds(mut self, count: usize) -> Self {
        self.breed_count = count;
        self
    }

    /// Uses `store` instead of a fresh [`MemoryStore`].
    pub fn with_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Starts the mock auth server and wires every component.
    pub async fn build(self) -> Result<TestHarness, PurrviewError> {
        let auth_api = MockAuthApi::start().await;

        let mut config = PurrviewConfig::default();
        config.auth = auth_api.config();

        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::new()) as Arc<dyn KeyValueStore>);
        let session = Arc::new(SessionStore::new(store));
        let client = AuthClient::new(&config.auth)?;
        let auth = AuthSession::new(Arc::new(client), Arc::clone(&session));
        let guard = RouteGuard::new(Arc::clone(&session), &config.routes);

        let catalog = Arc::new(InMemoryCatalog::with_sample_breeds(self.breed_count));
        let browser = BreedBrowser::new(catalog.clone(), config.catalog.page_size);

        Ok(TestHarness {
            auth_api,
            session,
            auth,
            guard,
            catalog,
            browser,
            config,
        })
    }
}

/// A complete client environment backed by mocks.
pub struct TestHarness {
    /// The mock auth server.
    pub auth_api: MockAuthApi,
    pub session: Arc<SessionStore>,
    pub auth: AuthSession,
    pub guard: RouteGuard,
    /// The catalog behind `browser`.
    pub catalog: Arc<InMemoryCatalog>,
    pub browser: BreedBrowser,
    /// Configuration the stack was built from.
    pub config: PurrviewConfig,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Credentials the mock auth server accepts.
    pub fn valid_credentials() -> LoginRequest {
        LoginRequest {
            email: MOCK_EMAIL.to_string(),
            password: MOCK_PASSWORD.to_string(),
        }
    }

    /// Logs in with [`valid_credentials`](Self::valid_credentials).
    pub async fn login(&self) -> Result<(), PurrviewError> {
        self.auth.login(&Self::valid_credentials()).await?;
        Ok(())
    }
}
