// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock auth API for deterministic testing.
//!
//! `MockAuthApi` runs a wiremock server that accepts one known account on
//! `POST /auth/login`, accepts every registration, and serves the profile
//! for the token it issues. Anything else answers the way the real API
//! does: 401 for bad credentials or tokens.

use purrview_config::model::AuthConfig;
use purrview_core::UserRecord;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Email of the account the mock accepts.
pub const MOCK_EMAIL: &str = "ana@example.com";
/// Password of the account the mock accepts.
pub const MOCK_PASSWORD: &str = "correct-horse";
/// Token the mock issues on login and registration.
pub const MOCK_TOKEN: &str = "mock-jwt-token";

/// A running mock auth server.
pub struct MockAuthApi {
    server: MockServer,
    user: UserRecord,
}

impl MockAuthApi {
    /// Starts the server with the default routes mounted.
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let user = mock_user();
        let api = Self { server, user };
        api.mount_defaults().await;
        api
    }

    async fn mount_defaults(&self) {
        let user_json = serde_json::to_value(&self.user).unwrap_or_default();
        let grant = serde_json::json!({
            "success": true,
            "message": "ok",
            "data": { "user": user_json, "token": MOCK_TOKEN }
        });

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_partial_json(serde_json::json!({
                "email": MOCK_EMAIL, "password": MOCK_PASSWORD
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&grant))
            .mount(&self.server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "success": false, "message": "invalid credentials"
            })))
            .with_priority(10)
            .mount(&self.server)
            .await;

        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .respond_with(ResponseTemplate::new(201).set_body_json(&grant))
            .mount(&self.server)
            .await;

        Mock::given(method("GET"))
            .and(path("/auth/profile"))
            .and(header("authorization", format!("Bearer {MOCK_TOKEN}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true, "message": "ok", "data": user_json
            })))
            .mount(&self.server)
            .await;
        Mock::given(method("GET"))
            .and(path("/auth/profile"))
            .respond_with(ResponseTemplate::new(401))
            .with_priority(10)
            .mount(&self.server)
            .await;
    }

    /// Makes every auth route answer `status` from now on.
    pub async fn fail_all_with(&self, status: u16) {
        Mock::given(wiremock::matchers::path_regex("^/auth/"))
            .respond_with(ResponseTemplate::new(status))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// `[auth]` settings pointing at this server.
    pub fn config(&self) -> AuthConfig {
        AuthConfig {
            base_url: self.uri(),
            timeout_secs: 5,
        }
    }

    /// The user every successful call returns.
    pub fn user(&self) -> &UserRecord {
        &self.user
    }

    /// Number of requests the server has seen.
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|r| r.len())
            .unwrap_or_default()
    }
}

fn mock_user() -> UserRecord {
    UserRecord {
        id: "user-1".to_string(),
        name: "Ana".to_string(),
        email: MOCK_EMAIL.to_string(),
        phone: "555-0100".to_string(),
        age: 31,
        created_at: None,
        updated_at: None,
    }
}
