// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./purrview.toml` > `~/.config/purrview/purrview.toml` > `/etc/purrview/purrview.toml`
//! with environment variable overrides via `PURRVIEW_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};

use crate::model::PurrviewConfig;

/// Config sections that environment variables may target.
const SECTIONS: &[&str] = &["client", "auth", "catalog", "storage", "routes"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/purrview/purrview.toml` (system-wide)
/// 3. `~/.config/purrview/purrview.toml` (user XDG config)
/// 4. `./purrview.toml` (local directory)
/// 5. `PURRVIEW_*` environment variables
pub fn load_config() -> Result<PurrviewConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<PurrviewConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PurrviewConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PurrviewConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PurrviewConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PurrviewConfig::default()))
        .merge(Toml::file("/etc/purrview/purrview.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("purrview/purrview.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("purrview.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider with explicit section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `PURRVIEW_CATALOG_API_KEY` must map to `catalog.api_key`,
/// not `catalog.api.key`.
///
/// `PURRVIEW_PASSWORD` carries a login secret for the CLI and is not a
/// config key, so it is skipped here.
fn env_provider() -> Env {
    Env::prefixed("PURRVIEW_")
        .ignore(NON_CONFIG_ENV_KEYS)
        .map(|key| map_env_key(key.as_str()).into())
}

/// Prefixed environment variables (lowercased, prefix stripped) that are
/// read elsewhere and never merged into the config.
pub const NON_CONFIG_ENV_KEYS: &[&str] = &["password"];

/// Maps a lowercased, prefix-stripped env var name to its dotted config key.
///
/// Only the leading section name is split off; unknown sections are passed
/// through unchanged so `deny_unknown_fields` reports them.
pub fn map_env_key(key: &str) -> String {
    for section in SECTIONS {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_split_only_the_section() {
        assert_eq!(map_env_key("catalog_api_key"), "catalog.api_key");
        assert_eq!(map_env_key("auth_timeout_secs"), "auth.timeout_secs");
        assert_eq!(map_env_key("storage_session_path"), "storage.session_path");
        assert_eq!(map_env_key("client_log_level"), "client.log_level");
        assert_eq!(map_env_key("routes_login_path"), "routes.login_path");
    }

    #[test]
    fn unknown_env_section_passes_through() {
        assert_eq!(map_env_key("telemetry_endpoint"), "telemetry_endpoint");
    }
}
