// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the session, auth and catalog crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Remote API answered normally.
    Healthy,
    /// Remote API answered but with an error status.
    Degraded(String),
    /// Remote API could not be reached.
    Unhealthy(String),
}

/// Identifies which remote API an adapter talks to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterKind {
    Auth,
    Catalog,
}

// --- Auth types ---

/// Snapshot of the authenticated user as returned by the auth API.
///
/// Field names on the wire follow the auth API (`nombre`, `telefono`, `edad`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "edad")]
    pub age: u32,
    #[serde(
        rename = "createdAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        rename = "updatedAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Credentials for `POST /auth/login`.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Registration payload for `POST /auth/register`.
#[derive(Clone, Serialize)]
pub struct RegisterRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "edad")]
    pub age: u32,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("phone", &self.phone)
            .field("age", &self.age)
            .finish()
    }
}

/// Token and user returned by a successful login or registration.
#[derive(Clone)]
pub struct AuthGrant {
    pub token: String,
    pub user: UserRecord,
    pub message: String,
}

impl std::fmt::Debug for AuthGrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGrant")
            .field("token", &"[redacted]")
            .field("user", &self.user)
            .field("message", &self.message)
            .finish()
    }
}

/// What a caller of login/register gets back once the session is in place.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthOutcome {
    pub user: UserRecord,
    pub message: String,
}

/// The persisted authentication state.
///
/// Token and user live under two independent storage keys; a `Session` is
/// only ever handed out with both present or both absent.
#[derive(Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserRecord>,
}

impl Session {
    /// An unauthenticated session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// True iff both the token and the user are present.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "[redacted]"))
            .field("user", &self.user.as_ref().map(|u| &u.email))
            .finish()
    }
}

// --- Catalog types ---

/// A single breed image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreedImage {
    pub id: String,
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// Flattened breed record with at most one representative image.
///
/// Every trait score is `0` and every text field is empty when the upstream
/// catalog left it out or sent `null`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BreedRecord {
    pub id: String,
    pub name: String,
    pub temperament: String,
    pub origin: String,
    pub description: String,
    pub life_span: String,
    pub wikipedia_url: String,
    pub reference_image_id: String,
    pub adaptability: u32,
    pub affection_level: u32,
    pub child_friendly: u32,
    pub dog_friendly: u32,
    pub energy_level: u32,
    pub grooming: u32,
    pub health_issues: u32,
    pub intelligence: u32,
    pub shedding_level: u32,
    pub social_needs: u32,
    pub stranger_friendly: u32,
    pub vocalisation: u32,
    pub experimental: u32,
    pub hairless: u32,
    pub natural: u32,
    pub rare: u32,
    pub rex: u32,
    pub suppressed_tail: u32,
    pub short_legs: u32,
    pub hypoallergenic: u32,
    pub image: Option<BreedImage>,
}

// --- Pagination types ---

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
    /// Exact item count, when a full-count probe has discovered it.
    pub known_total: Option<u64>,
}

impl PageRequest {
    /// Builds a request, raising `page` and `limit` to at least 1.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            known_total: None,
        }
    }

    /// Attaches a known total.
    pub fn with_known_total(mut self, total: Option<u64>) -> Self {
        self.known_total = total;
        self
    }
}

/// Where a [`PageResult`]'s total came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TotalSource {
    /// Derived from a full-count probe.
    Known,
    /// Guessed from the shape of the page; may grow or shrink on later pages.
    Estimated,
    /// The exact size of the result set returned by this one call.
    Exact,
}

/// One page of items plus the pagination metadata derived for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    /// Echoed from the request.
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub source: TotalSource,
}

impl<T> PageResult<T> {
    /// True when a page after this one is believed to exist.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// True when this is not the first page.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserRecord {
        UserRecord {
            id: "u-1".into(),
            name: "Ana".into(),
            email: "ana@example.com".into(),
            phone: "555-0100".into(),
            age: 31,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn user_record_uses_auth_api_field_names() {
        let json = serde_json::to_value(user()).unwrap();
        assert_eq!(json["nombre"], "Ana");
        assert_eq!(json["telefono"], "555-0100");
        assert_eq!(json["edad"], 31);
        assert!(json.get("createdAt").is_none());
    }

    #[test]
    fn user_record_parses_timestamps() {
        let json = r#"{"id":"7","nombre":"Leo","email":"l@x.io","telefono":"1","edad":40,
            "createdAt":"2024-05-01T10:00:00.000Z","updatedAt":"2024-05-02T10:00:00Z"}"#;
        let parsed: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.name, "Leo");
        assert!(parsed.created_at.is_some());
        assert!(parsed.updated_at.is_some());
    }

    #[test]
    fn session_requires_both_parts() {
        assert!(!Session::anonymous().is_authenticated());
        let token_only = Session {
            token: Some("t".into()),
            user: None,
        };
        assert!(!token_only.is_authenticated());
        let user_only = Session {
            token: None,
            user: Some(user()),
        };
        assert!(!user_only.is_authenticated());
        let both = Session {
            token: Some("t".into()),
            user: Some(user()),
        };
        assert!(both.is_authenticated());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let login = LoginRequest {
            email: "a@b.c".into(),
            password: "hunter2".into(),
        };
        assert!(!format!("{login:?}").contains("hunter2"));

        let session = Session {
            token: Some("secret-token".into()),
            user: Some(user()),
        };
        assert!(!format!("{session:?}").contains("secret-token"));
    }

    #[test]
    fn page_request_clamps_to_one() {
        let req = PageRequest::new(0, 0);
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, 1);
        assert!(req.known_total.is_none());
    }

    #[test]
    fn register_request_serializes_wire_names() {
        let req = RegisterRequest {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password: "pw".into(),
            phone: "1".into(),
            age: 20,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["nombre"], "Ana");
        assert_eq!(json["edad"], 20);
        assert_eq!(json["password"], "pw");
    }
}
