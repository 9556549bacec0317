// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The auth session service.
//!
//! [`AuthSession`] is the only component that mutates the session. A
//! successful login or register writes the session (which enqueues `true`
//! for every subscriber) before the outcome is handed back, so a caller that
//! navigates on success always sees a guard that already agrees.

use std::sync::Arc;

use purrview_core::{
    ApiError, AuthBackend, AuthGrant, AuthOutcome, LoginRequest, RegisterRequest, UserRecord,
};
use purrview_session::{SessionStore, SessionSubscription};
use tracing::{debug, info, warn};

/// Login, register, profile and logout over an [`AuthBackend`].
#[derive(Clone)]
pub struct AuthSession {
    backend: Arc<dyn AuthBackend>,
    session: Arc<SessionStore>,
}

impl AuthSession {
    pub fn new(backend: Arc<dyn AuthBackend>, session: Arc<SessionStore>) -> Self {
        Self { backend, session }
    }

    /// Authenticates and stores the session.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthOutcome, ApiError> {
        debug!(email = %credentials.email, "login attempt");
        let grant = self.backend.login(credentials).await.map_err(|e| {
            warn!(kind = e.kind(), error = %e, "login failed");
            e
        })?;
        self.establish(grant)
    }

    /// Creates an account; the server logs the new user in directly.
    pub async fn register(&self, credentials: &RegisterRequest) -> Result<AuthOutcome, ApiError> {
        debug!(email = %credentials.email, "register attempt");
        let grant = self.backend.register(credentials).await.map_err(|e| {
            warn!(kind = e.kind(), error = %e, "registration failed");
            e
        })?;
        self.establish(grant)
    }

    fn establish(&self, grant: AuthGrant) -> Result<AuthOutcome, ApiError> {
        self.session
            .write(&grant.token, &grant.user)
            .map_err(|e| ApiError::unexpected(format!("could not persist session: {e}")))?;
        info!(user_id = %grant.user.id, "authenticated");
        Ok(AuthOutcome {
            user: grant.user,
            message: grant.message,
        })
    }

    /// Fetches the profile with the stored token.
    ///
    /// Without a stored session this fails with
    /// [`ApiError::InvalidCredentials`] and makes no request.
    pub async fn get_profile(&self) -> Result<UserRecord, ApiError> {
        let Some(token) = self.session.token() else {
            debug!("profile requested without a session");
            return Err(ApiError::InvalidCredentials);
        };
        self.backend.profile(&token).await
    }

    /// Ends the session. Logging out while logged out does nothing.
    pub fn logout(&self) {
        if !self.session.has_any_auth_key() {
            debug!("logout without a session, nothing to clear");
            return;
        }
        self.session.clear();
        info!("logged out");
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// User of the stored session.
    pub fn current_user(&self) -> Option<UserRecord> {
        self.session.current_user()
    }

    /// Replay-latest stream of the `authenticated` flag.
    pub fn subscribe(&self) -> SessionSubscription {
        self.session.observe()
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Name of the backend in use.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("backend", &self.backend.name())
            .field("session", &self.session)
            .finish()
    }
}
