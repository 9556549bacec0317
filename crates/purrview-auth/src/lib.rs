// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication for the Purrview catalog client.
//!
//! [`AuthClient`] speaks the auth API's JSON envelopes and reduces every
//! failure to an [`ApiError`](purrview_core::ApiError). [`AuthSession`] sits
//! on top of any [`AuthBackend`](purrview_core::AuthBackend) and keeps the
//! [`SessionStore`](purrview_session::SessionStore) in step with the results.

pub mod client;
pub mod service;
pub mod types;

pub use client::AuthClient;
pub use service::AuthSession;
