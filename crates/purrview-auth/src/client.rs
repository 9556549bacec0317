// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the auth API.
//!
//! Provides [`AuthClient`], which builds login/register/profile requests,
//! applies the configured timeout and classifies every failure into an
//! [`ApiError`]. It keeps no session state of its own.

use std::time::Duration;

use async_trait::async_trait;
use purrview_config::model::AuthConfig;
use purrview_core::{
    AdapterKind, ApiAdapter, ApiError, AuthBackend, AuthGrant, HealthStatus, LoginRequest,
    PurrviewError, RegisterRequest, UserRecord,
};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::types::{AuthEnvelope, ErrorBody, ProfileEnvelope};

/// HTTP client for auth API communication.
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl AuthClient {
    /// Creates a client for the API rooted at `config.base_url`.
    pub fn new(config: &AuthConfig) -> Result<Self, PurrviewError> {
        let timeout = Duration::from_secs(config.timeout_secs);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| PurrviewError::Config(format!("failed to build auth HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Root URL of the auth API.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn post_credentials<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<AuthGrant, ApiError> {
        let url = self.endpoint(path);
        debug!(url = %url, "auth request");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&e, self.timeout))?;
        let envelope: AuthEnvelope = read_json(response, self.timeout).await?;
        envelope.into_grant()
    }
}

#[async_trait]
impl ApiAdapter for AuthClient {
    fn name(&self) -> &str {
        "auth-api"
    }

    fn adapter_kind(&self) -> AdapterKind {
        AdapterKind::Auth
    }

    /// Any HTTP answer below 500 counts as reachable.
    async fn health_check(&self) -> HealthStatus {
        match self.client.get(&self.base_url).send().await {
            Ok(response) if response.status().is_server_error() => {
                HealthStatus::Degraded(format!("auth API returned {}", response.status()))
            }
            Ok(_) => HealthStatus::Healthy,
            Err(e) => {
                HealthStatus::Unhealthy(ApiError::from_transport(&e, self.timeout).to_string())
            }
        }
    }
}

#[async_trait]
impl AuthBackend for AuthClient {
    async fn login(&self, credentials: &LoginRequest) -> Result<AuthGrant, ApiError> {
        self.post_credentials("/auth/login", credentials).await
    }

    async fn register(&self, credentials: &RegisterRequest) -> Result<AuthGrant, ApiError> {
        self.post_credentials("/auth/register", credentials).await
    }

    async fn profile(&self, token: &str) -> Result<UserRecord, ApiError> {
        let url = self.endpoint("/auth/profile");
        debug!(url = %url, "auth request");
        let bearer = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| ApiError::InvalidCredentials)?;
        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, bearer)
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&e, self.timeout))?;
        let envelope: ProfileEnvelope = read_json(response, self.timeout).await?;
        envelope.into_user()
    }
}

/// Reads the body and decodes it, or classifies the non-success status.
async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    timeout: Duration,
) -> Result<T, ApiError> {
    let status = response.status();
    debug!(status = %status, "auth response received");
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::from_transport(&e, timeout))?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message);
        let error = ApiError::from_status(status.as_u16(), message);
        warn!(status = %status, kind = error.kind(), "auth API returned an error");
        return Err(error);
    }

    serde_json::from_str(&body)
        .map_err(|e| ApiError::unexpected(format!("malformed response body: {e}")))
}
