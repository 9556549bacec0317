// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Purrview catalog client.
//!
//! [`ApiError`] is the closed taxonomy every remote call is reduced to before
//! it reaches a caller. [`PurrviewError`] covers the ambient failures
//! (configuration, local storage, wiring) that sit around those calls.

use std::time::Duration;

use thiserror::Error;

/// Classified outcome of a failed remote API call.
///
/// HTTP clients map every transport failure and non-success status into
/// exactly one of these variants. Raw protocol statuses never travel past
/// that boundary except as the informational `status` of [`ApiError::ServerFault`]
/// and [`ApiError::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No connection could be established with the server.
    #[error("cannot connect to the server")]
    NetworkUnreachable,

    /// The server rejected the credentials (401).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The server rejected the request payload (400).
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// The requested resource or endpoint does not exist (404).
    #[error("resource not found")]
    NotFound,

    /// The server failed while handling the request (5xx).
    #[error("server error (status {status})")]
    ServerFault { status: u16 },

    /// The request did not complete within its deadline.
    #[error("request timed out after {duration:?}")]
    Timeout { duration: Duration },

    /// Any other status, or a success status with an unusable body.
    #[error("unexpected response{}: {message}", status_suffix(.status))]
    Unknown {
        status: Option<u16>,
        message: String,
    },
}

impl ApiError {
    /// Maps a non-success HTTP status to its taxonomy variant.
    ///
    /// `message` is the server-supplied explanation, if the error body had one.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            400 => ApiError::InvalidInput {
                message: message.unwrap_or_else(|| "invalid input data".to_string()),
            },
            401 => ApiError::InvalidCredentials,
            404 => ApiError::NotFound,
            500..=599 => ApiError::ServerFault { status },
            _ => ApiError::Unknown {
                status: Some(status),
                message: message.unwrap_or_else(|| "unrecognized status".to_string()),
            },
        }
    }

    /// Builds an [`ApiError::Unknown`] for a response whose body could not be used.
    pub fn unexpected(message: impl Into<String>) -> Self {
        ApiError::Unknown {
            status: None,
            message: message.into(),
        }
    }

    /// Stable short label for logs and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::NetworkUnreachable => "network_unreachable",
            ApiError::InvalidCredentials => "invalid_credentials",
            ApiError::InvalidInput { .. } => "invalid_input",
            ApiError::NotFound => "not_found",
            ApiError::ServerFault { .. } => "server_fault",
            ApiError::Timeout { .. } => "timeout",
            ApiError::Unknown { .. } => "unknown",
        }
    }
}

#[cfg(feature = "reqwest")]
impl ApiError {
    /// Maps a request that produced no usable response onto the taxonomy.
    ///
    /// `timeout` is the deadline the client was configured with.
    pub fn from_transport(e: &reqwest::Error, timeout: Duration) -> Self {
        if e.is_timeout() {
            ApiError::Timeout { duration: timeout }
        } else if e.is_connect() {
            ApiError::NetworkUnreachable
        } else {
            ApiError::Unknown {
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            }
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {s})")).unwrap_or_default()
}

/// The ambient error type for configuration, local storage and wiring.
#[derive(Debug, Error)]
pub enum PurrviewError {
    /// Configuration errors (invalid values, missing keys, bad header values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Local storage errors (session file I/O, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A classified remote API failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_to_taxonomy() {
        assert_eq!(ApiError::from_status(401, None), ApiError::InvalidCredentials);
        assert_eq!(ApiError::from_status(404, None), ApiError::NotFound);
        assert_eq!(
            ApiError::from_status(500, None),
            ApiError::ServerFault { status: 500 }
        );
        assert_eq!(
            ApiError::from_status(503, Some("down".into())),
            ApiError::ServerFault { status: 503 }
        );
        assert!(matches!(
            ApiError::from_status(400, Some("email is required".into())),
            ApiError::InvalidInput { message } if message == "email is required"
        ));
        assert!(matches!(
            ApiError::from_status(418, None),
            ApiError::Unknown { status: Some(418), .. }
        ));
    }

    #[test]
    fn unknown_display_includes_status_when_present() {
        let with_status = ApiError::from_status(409, Some("conflict".into()));
        assert_eq!(
            with_status.to_string(),
            "unexpected response (status 409): conflict"
        );
        let without = ApiError::unexpected("missing token");
        assert_eq!(without.to_string(), "unexpected response: missing token");
    }

    #[cfg(feature = "reqwest")]
    #[test]
    fn unsendable_request_is_unknown_without_status() {
        let err = reqwest::Client::new().get("not a url").build().unwrap_err();
        let mapped = ApiError::from_transport(&err, Duration::from_secs(5));
        assert!(matches!(mapped, ApiError::Unknown { status: None, .. }), "{mapped:?}");
    }

    #[test]
    fn api_error_converts_into_purrview_error() {
        let err: PurrviewError = ApiError::NotFound.into();
        assert!(matches!(err, PurrviewError::Api(ApiError::NotFound)));
        assert_eq!(err.to_string(), "resource not found");
    }

    #[test]
    fn kinds_are_distinct() {
        let all = [
            ApiError::NetworkUnreachable,
            ApiError::InvalidCredentials,
            ApiError::InvalidInput { message: String::new() },
            ApiError::NotFound,
            ApiError::ServerFault { status: 500 },
            ApiError::Timeout { duration: Duration::from_secs(10) },
            ApiError::unexpected("x"),
        ];
        let kinds: std::collections::HashSet<_> = all.iter().map(ApiError::kind).collect();
        assert_eq!(kinds.len(), all.len());
    }
}
