// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base trait shared by every remote API adapter.

use async_trait::async_trait;

use crate::types::{AdapterKind, HealthStatus};

/// The base trait for remote API adapters.
#[async_trait]
pub trait ApiAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns which remote API this adapter talks to.
    fn adapter_kind(&self) -> AdapterKind;

    /// Probes the remote API and reports whether it is usable.
    ///
    /// Never fails: unreachable or erroring APIs are reported through
    /// [`HealthStatus`].
    async fn health_check(&self) -> HealthStatus;
}
