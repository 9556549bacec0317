// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wiring of the client stack for one CLI invocation.

use std::fmt;
use std::sync::Arc;

use purrview_auth::{AuthClient, AuthSession};
use purrview_catalog::{BreedBrowser, CatalogClient};
use purrview_config::model::PurrviewConfig;
use purrview_core::{KeyValueStore, PurrviewError};
use purrview_session::{FileStore, GuardDecision, RouteGuard, SessionStore};
use tracing::debug;

/// A command refused by the route guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub route: String,
    pub target: String,
}

impl fmt::Display for Redirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is not available in the current session (redirect: {})",
            self.route, self.target
        )
    }
}

/// Every component a command may need, built from one config.
pub struct ClientContext {
    pub config: PurrviewConfig,
    pub session: Arc<SessionStore>,
    pub auth_client: Arc<AuthClient>,
    pub auth: AuthSession,
    pub guard: RouteGuard,
    pub catalog: Arc<CatalogClient>,
    pub browser: BreedBrowser,
}

impl ClientContext {
    /// Builds the stack over the session file named by `[storage]`.
    pub fn from_config(config: PurrviewConfig) -> Result<Self, PurrviewError> {
        let path = config.storage.resolved_session_path();
        debug!(path = %path.display(), "opening session file");
        let store = FileStore::open(path)?;
        Self::with_store(config, Arc::new(store))
    }

    /// Builds the stack over an arbitrary key/value store.
    pub fn with_store(
        config: PurrviewConfig,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, PurrviewError> {
        let session = Arc::new(SessionStore::new(store));
        let auth_client = Arc::new(AuthClient::new(&config.auth)?);
        let auth = AuthSession::new(auth_client.clone(), Arc::clone(&session));
        let guard = RouteGuard::new(Arc::clone(&session), &config.routes);
        let catalog = Arc::new(CatalogClient::new(&config.catalog)?);
        let browser = BreedBrowser::new(catalog.clone(), config.catalog.page_size);

        Ok(Self {
            config,
            session,
            auth_client,
            auth,
            guard,
            catalog,
            browser,
        })
    }

    /// Asks the route guard whether `route` may be entered right now.
    pub fn enter(&self, route: &str) -> Result<(), Redirect> {
        match self.guard.check(route) {
            GuardDecision::Allow => Ok(()),
            GuardDecision::Deny { redirect_to } => Err(Redirect {
                route: route.to_string(),
                target: redirect_to,
            }),
        }
    }
}
