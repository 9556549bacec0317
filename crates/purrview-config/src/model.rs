// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Purrview catalog client.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level Purrview configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PurrviewConfig {
    /// Client-wide settings.
    #[serde(default)]
    pub client: ClientConfig,

    /// Auth API settings.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Breed catalog API settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Session persistence settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Route guard policies.
    #[serde(default)]
    pub routes: RoutesConfig,
}

/// Client-wide configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Auth API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Base URL of the auth API, without trailing slash.
    #[serde(default = "default_auth_base_url")]
    pub base_url: String,

    /// Request timeout in seconds for login, register and profile calls.
    #[serde(default = "default_auth_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            base_url: default_auth_base_url(),
            timeout_secs: default_auth_timeout_secs(),
        }
    }
}

fn default_auth_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_auth_timeout_secs() -> u64 {
    10
}

/// Breed catalog API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Base URL of the catalog API.
    #[serde(default = "default_catalog_base_url")]
    pub base_url: String,

    /// Catalog API key sent as `x-api-key`. `None` sends no key.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Items per listing page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// `limit` used by the full-count probe.
    #[serde(default = "default_count_probe_limit")]
    pub count_probe_limit: u32,

    /// Maximum images fetched for a breed gallery.
    #[serde(default = "default_gallery_limit")]
    pub gallery_limit: u32,

    /// Request timeout in seconds.
    #[serde(default = "default_catalog_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_catalog_base_url(),
            api_key: None,
            page_size: default_page_size(),
            count_probe_limit: default_count_probe_limit(),
            gallery_limit: default_gallery_limit(),
            timeout_secs: default_catalog_timeout_secs(),
        }
    }
}

fn default_catalog_base_url() -> String {
    "https://api.thecatapi.com/v1".to_string()
}

fn default_page_size() -> u32 {
    10
}

fn default_count_probe_limit() -> u32 {
    100
}

fn default_gallery_limit() -> u32 {
    10
}

fn default_catalog_timeout_secs() -> u64 {
    30
}

/// Session persistence configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path of the session file. `None` uses the XDG data directory.
    #[serde(default)]
    pub session_path: Option<String>,
}

impl StorageConfig {
    /// Resolves the session file path.
    ///
    /// Falls back to `$XDG_DATA_HOME/purrview/session.json`, then to
    /// `./purrview-session.json` when no data directory is known.
    pub fn resolved_session_path(&self) -> PathBuf {
        match &self.session_path {
            Some(path) => PathBuf::from(path),
            None => dirs::data_dir()
                .map(|d| d.join("purrview").join("session.json"))
                .unwrap_or_else(|| PathBuf::from("purrview-session.json")),
        }
    }
}

/// Route guard configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutesConfig {
    /// Where anonymous users are sent when they hit a protected route.
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Where authenticated users are sent when they hit an anonymous-only route.
    #[serde(default = "default_landing_path")]
    pub landing_path: String,

    /// Routes that require an authenticated session.
    #[serde(default = "default_protected")]
    pub protected: Vec<String>,

    /// Routes only reachable without a session (login, register).
    #[serde(default = "default_anonymous_only")]
    pub anonymous_only: Vec<String>,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            login_path: default_login_path(),
            landing_path: default_landing_path(),
            protected: default_protected(),
            anonymous_only: default_anonymous_only(),
        }
    }
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_landing_path() -> String {
    "/profile".to_string()
}

fn default_protected() -> Vec<String> {
    vec![
        "/profile".to_string(),
        "/cats".to_string(),
        "/cats-table".to_string(),
    ]
}

fn default_anonymous_only() -> Vec<String> {
    vec!["/login".to_string(), "/register".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_session_path_wins() {
        let storage = StorageConfig {
            session_path: Some("/tmp/s.json".to_string()),
        };
        assert_eq!(storage.resolved_session_path(), PathBuf::from("/tmp/s.json"));
    }

    #[test]
    fn default_session_path_ends_with_session_file() {
        let path = StorageConfig::default().resolved_session_path();
        let name = path.file_name().and_then(|n| n.to_str()).unwrap();
        assert!(name.ends_with("session.json"), "got {path:?}");
    }

    #[test]
    fn routes_default_to_login_and_profile() {
        let routes = RoutesConfig::default();
        assert_eq!(routes.login_path, "/login");
        assert_eq!(routes.landing_path, "/profile");
        assert!(routes.protected.contains(&"/cats".to_string()));
        assert!(routes.anonymous_only.contains(&"/register".to_string()));
    }
}
