// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable key/value storage that survives process restarts.

/// A string key/value store.
///
/// Reads and writes are synchronous and infallible from the caller's view,
/// like browser local storage. Implementations that persist to disk log
/// flush failures instead of surfacing them. There are no multi-key
/// transactions.
pub trait KeyValueStore: Send + Sync + 'static {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);

    /// Removes `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str);
}
