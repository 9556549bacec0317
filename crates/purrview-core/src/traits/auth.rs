// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Auth backend trait for the remote authentication API.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::traits::adapter::ApiAdapter;
use crate::types::{AuthGrant, LoginRequest, RegisterRequest, UserRecord};

/// Remote authentication API.
///
/// Implementations return already-classified [`ApiError`]s and only yield
/// an [`AuthGrant`] when the response carried both a token and a user.
#[async_trait]
pub trait AuthBackend: ApiAdapter {
    /// `POST /auth/login`.
    async fn login(&self, credentials: &LoginRequest) -> Result<AuthGrant, ApiError>;

    /// `POST /auth/register`.
    async fn register(&self, credentials: &RegisterRequest) -> Result<AuthGrant, ApiError>;

    /// `GET /auth/profile` with the given bearer token.
    async fn profile(&self, token: &str) -> Result<UserRecord, ApiError>;
}
