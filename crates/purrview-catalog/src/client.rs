// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the breed catalog API.
//!
//! The catalog pages from zero; [`CatalogBackend`] pages from one. The
//! translation happens here and nowhere else.

use std::time::Duration;

use async_trait::async_trait;
use purrview_config::model::CatalogConfig;
use purrview_core::{
    AdapterKind, ApiAdapter, ApiError, BreedImage, BreedRecord, CatalogBackend, HealthStatus,
    PurrviewError,
};
use reqwest::Url;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::types::{RawBreed, RawImage};

/// HTTP client for the breed catalog.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: Url,
    count_probe_limit: u32,
    gallery_limit: u32,
    timeout: Duration,
}

impl CatalogClient {
    /// Creates a client from `[catalog]`. The API key, when present, is sent
    /// as `x-api-key` on every request.
    pub fn new(config: &CatalogConfig) -> Result<Self, PurrviewError> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/')).map_err(|e| {
            PurrviewError::Config(format!("invalid catalog base_url `{}`: {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(PurrviewError::Config(format!(
                "catalog base_url `{}` cannot hold paths",
                config.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = &config.api_key {
            let mut value = HeaderValue::from_str(key)
                .map_err(|e| PurrviewError::Config(format!("invalid API key header value: {e}")))?;
            value.set_sensitive(true);
            headers.insert("x-api-key", value);
        }

        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| {
                PurrviewError::Config(format!("failed to build catalog HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url,
            count_probe_limit: config.count_probe_limit.max(1),
            gallery_limit: config.gallery_limit.max(1),
            timeout,
        })
    }

    /// `base_url` followed by `segments`, each percent-encoded.
    fn url(&self, segments: &[&str], query: &[(&str, String)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        debug!(url = %url, "catalog request");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&e, self.timeout))?;

        let status = response.status();
        debug!(status = %status, "catalog response received");
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::from_transport(&e, self.timeout))?;

        if !status.is_success() {
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
                .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()));
            let error = ApiError::from_status(status.as_u16(), message);
            warn!(status = %status, kind = error.kind(), "catalog API returned an error");
            return Err(error);
        }

        serde_json::from_str(&body)
            .map_err(|e| ApiError::unexpected(format!("malformed catalog response: {e}")))
    }
}

fn page_query(page: u32, limit: u32) -> Vec<(&'static str, String)> {
    vec![
        ("limit", limit.to_string()),
        ("page", page.saturating_sub(1).to_string()),
    ]
}

#[async_trait]
impl ApiAdapter for CatalogClient {
    fn name(&self) -> &str {
        "catalog-api"
    }

    fn adapter_kind(&self) -> AdapterKind {
        AdapterKind::Catalog
    }

    async fn health_check(&self) -> HealthStatus {
        let url = self.url(&["breeds"], &[("limit", "1".to_string())]);
        match self.get_json::<Vec<RawBreed>>(url).await {
            Ok(_) => HealthStatus::Healthy,
            Err(e @ (ApiError::NetworkUnreachable | ApiError::Timeout { .. })) => {
                HealthStatus::Unhealthy(e.to_string())
            }
            Err(e) => HealthStatus::Degraded(e.to_string()),
        }
    }
}

#[async_trait]
impl CatalogBackend for CatalogClient {
    async fn list_breeds(&self, page: u32, limit: u32) -> Result<Vec<BreedRecord>, ApiError> {
        let url = self.url(&["breeds"], &page_query(page, limit));
        let raw: Vec<RawBreed> = self.get_json(url).await?;
        Ok(raw.into_iter().map(BreedRecord::from).collect())
    }

    async fn count_breeds(&self) -> Result<u64, ApiError> {
        let url = self.url(&["breeds"], &[("limit", self.count_probe_limit.to_string())]);
        let raw: Vec<serde_json::Value> = self.get_json(url).await?;
        debug!(count = raw.len(), "catalog count probe");
        Ok(raw.len() as u64)
    }

    async fn breed(&self, id: &str) -> Result<BreedRecord, ApiError> {
        let url = self.url(&["breeds", id], &[]);
        let raw: RawBreed = self.get_json(url).await?;
        Ok(raw.into())
    }

    async fn breed_images(&self, breed_id: &str) -> Result<Vec<BreedImage>, ApiError> {
        let url = self.url(
            &["images", "search"],
            &[
                ("breed_ids", breed_id.to_string()),
                ("limit", self.gallery_limit.to_string()),
                ("size", "full".to_string()),
            ],
        );
        let raw: Vec<RawImage> = self.get_json(url).await?;
        Ok(raw.into_iter().map(BreedImage::from).collect())
    }

    async fn search_breeds(
        &self,
        query: &str,
        page: u32,
        limit: u32,
    ) -> Result<Vec<BreedRecord>, ApiError> {
        let mut params = vec![("q", query.to_string())];
        params.extend(page_query(page, limit));
        let url = self.url(&["breeds", "search"], &params);
        let raw: Vec<RawBreed> = self.get_json(url).await?;
        Ok(raw.into_iter().map(BreedRecord::from).collect())
    }
}
