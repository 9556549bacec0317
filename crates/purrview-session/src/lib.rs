// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session state for the Purrview catalog client.
//!
//! - [`MemoryStore`] / [`FileStore`]: the persistent key/value layer
//! - [`SessionStore`]: the single writer of the auth keys, with synchronous
//!   reads and a replay-latest change stream ([`SessionSubscription`])
//! - [`RouteGuard`]: synchronous allow/deny decisions from the session state

pub mod guard;
pub mod kv;
pub mod store;
pub mod watch;

pub use guard::{GuardDecision, RouteGuard, RoutePolicy};
pub use kv::{FileStore, MemoryStore};
pub use store::{SessionStore, TOKEN_KEY, USER_KEY};
pub use watch::{SessionSubscription, SessionWatch};
