// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire envelopes of the auth API.

use purrview_core::{ApiError, AuthGrant, UserRecord};
use serde::Deserialize;

/// `{success, message, data: {user, token}}` from login and register.
#[derive(Debug, Deserialize)]
pub struct AuthEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<AuthData>,
}

#[derive(Deserialize)]
pub struct AuthData {
    #[serde(default)]
    pub user: Option<UserRecord>,
    #[serde(default)]
    pub token: Option<String>,
}

impl std::fmt::Debug for AuthData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthData")
            .field("user", &self.user)
            .field("token", &self.token.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

impl AuthEnvelope {
    /// A grant only exists when the server reports success and sends both
    /// a non-empty token and a user.
    pub fn into_grant(self) -> Result<AuthGrant, ApiError> {
        let message = self.message.unwrap_or_default();
        if !self.success {
            return Err(ApiError::unexpected(if message.is_empty() {
                "server reported failure".to_string()
            } else {
                message
            }));
        }
        let data = self
            .data
            .ok_or_else(|| ApiError::unexpected("response has no data"))?;
        match (data.token, data.user) {
            (Some(token), Some(user)) if !token.is_empty() => Ok(AuthGrant {
                token,
                user,
                message,
            }),
            (_, None) => Err(ApiError::unexpected("response has no user")),
            _ => Err(ApiError::unexpected("response has no token")),
        }
    }
}

/// `{success, message, data: user}` from the profile endpoint.
#[derive(Debug, Deserialize)]
pub struct ProfileEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<UserRecord>,
}

impl ProfileEnvelope {
    pub fn into_user(self) -> Result<UserRecord, ApiError> {
        match (self.success, self.data) {
            (true, Some(user)) => Ok(user),
            (true, None) => Err(ApiError::unexpected("response has no user")),
            (false, _) => Err(ApiError::unexpected(
                self.message
                    .unwrap_or_else(|| "server reported failure".to_string()),
            )),
        }
    }
}

/// Shape of an error body; only the message is used.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
