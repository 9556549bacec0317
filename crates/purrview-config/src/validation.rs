// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks the constraints serde attributes cannot express: URL schemes,
//! non-zero timeouts, page size bounds and route path shape.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::PurrviewConfig;

/// Largest page the catalog API accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// every collected validation error (does not fail fast).
pub fn validate_config(config: &PurrviewConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    for (key, url) in [
        ("auth.base_url", &config.auth.base_url),
        ("catalog.base_url", &config.catalog.base_url),
    ] {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            fail(format!("{key} `{url}` must start with http:// or https://"));
        }
    }

    if config.auth.timeout_secs == 0 {
        fail("auth.timeout_secs must be greater than 0".to_string());
    }
    if config.catalog.timeout_secs == 0 {
        fail("catalog.timeout_secs must be greater than 0".to_string());
    }

    if !(1..=MAX_PAGE_SIZE).contains(&config.catalog.page_size) {
        fail(format!(
            "catalog.page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
            config.catalog.page_size
        ));
    }
    if config.catalog.count_probe_limit == 0 {
        fail("catalog.count_probe_limit must be at least 1".to_string());
    }
    if config.catalog.gallery_limit == 0 {
        fail("catalog.gallery_limit must be at least 1".to_string());
    }

    if let Some(path) = &config.storage.session_path {
        if path.trim().is_empty() {
            fail("storage.session_path must not be empty when set".to_string());
        }
    }

    let routes = &config.routes;
    let single = [
        ("routes.login_path", &routes.login_path),
        ("routes.landing_path", &routes.landing_path),
    ];
    let listed = routes
        .protected
        .iter()
        .map(|p| ("routes.protected", p))
        .chain(routes.anonymous_only.iter().map(|p| ("routes.anonymous_only", p)));
    for (key, path) in single.into_iter().chain(listed) {
        if !path.starts_with('/') {
            fail(format!("{key} entry `{path}` must start with `/`"));
        }
    }

    let protected: HashSet<&String> = routes.protected.iter().collect();
    for path in &routes.anonymous_only {
        if protected.contains(path) {
            fail(format!(
                "route `{path}` is listed in both routes.protected and routes.anonymous_only"
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
