// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The session store: sole writer of the persisted auth keys.

use std::sync::{Arc, Mutex, PoisonError};

use purrview_core::{KeyValueStore, PurrviewError, Session, UserRecord};
use tracing::{debug, info, warn};

use crate::watch::{SessionSubscription, SessionWatch};

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "auth_token";

/// Storage key holding the JSON-serialized [`UserRecord`].
pub const USER_KEY: &str = "current_user";

/// Owns the authenticated/anonymous truth.
///
/// Reads always normalize to both-or-neither: a token without a user, a user
/// without a token, an empty token and an unparsable user record all read
/// as [`Session::anonymous`].
pub struct SessionStore {
    kv: Arc<dyn KeyValueStore>,
    watch: SessionWatch,
    /// Serializes write/clear so the key updates and the notification that
    /// follows them are never interleaved with another mutation.
    mutation: Mutex<()>,
}

impl SessionStore {
    /// Wraps `kv`, seeding the observable from whatever it already holds.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        let initial = read_session(kv.as_ref()).is_authenticated();
        debug!(authenticated = initial, "session store initialized");
        Self {
            kv,
            watch: SessionWatch::new(initial),
            mutation: Mutex::new(()),
        }
    }

    /// Current session. Never fails.
    pub fn read(&self) -> Session {
        read_session(self.kv.as_ref())
    }

    /// Persists the token, then the user, then notifies every subscriber.
    ///
    /// When this returns, each live subscription already holds `true`.
    pub fn write(&self, token: &str, user: &UserRecord) -> Result<(), PurrviewError> {
        let serialized = serde_json::to_string(user)
            .map_err(|e| PurrviewError::Storage { source: Box::new(e) })?;

        let _guard = self.mutation.lock().unwrap_or_else(PoisonError::into_inner);
        self.kv.set(TOKEN_KEY, token);
        self.kv.set(USER_KEY, &serialized);
        let authenticated = read_session(self.kv.as_ref()).is_authenticated();
        self.watch.publish(authenticated);
        info!(user_id = %user.id, "session stored");
        Ok(())
    }

    /// Removes both keys and notifies every subscriber with `false`.
    pub fn clear(&self) {
        let _guard = self.mutation.lock().unwrap_or_else(PoisonError::into_inner);
        self.kv.remove(TOKEN_KEY);
        self.kv.remove(USER_KEY);
        self.watch.publish(false);
        info!("session cleared");
    }

    /// Subscribes to the `authenticated` flag with replay-latest semantics.
    pub fn observe(&self) -> SessionSubscription {
        self.watch.subscribe()
    }

    /// True iff both the token and a parsable user are stored.
    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    /// True if either auth key is present, even when the pair is incomplete.
    pub fn has_any_auth_key(&self) -> bool {
        self.kv.get(TOKEN_KEY).is_some() || self.kv.get(USER_KEY).is_some()
    }

    /// Stored user of an authenticated session.
    pub fn current_user(&self) -> Option<UserRecord> {
        self.read().user
    }

    /// Stored token of an authenticated session.
    pub fn token(&self) -> Option<String> {
        self.read().token
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.watch.current())
            .finish_non_exhaustive()
    }
}

fn read_session(kv: &dyn KeyValueStore) -> Session {
    let token = match kv.get(TOKEN_KEY) {
        Some(token) if !token.is_empty() => token,
        _ => return Session::anonymous(),
    };
    let Some(raw_user) = kv.get(USER_KEY) else {
        return Session::anonymous();
    };
    match serde_json::from_str::<UserRecord>(&raw_user) {
        Ok(user) => Session {
            token: Some(token),
            user: Some(user),
        },
        Err(e) => {
            warn!(error = %e, "stored user record is unreadable, treating session as anonymous");
            Session::anonymous()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    fn user(id: &str) -> UserRecord {
        UserRecord {
            id: id.into(),
            name: "Ana".into(),
            email: "ana@example.com".into(),
            phone: "555".into(),
            age: 30,
            created_at: None,
            updated_at: None,
        }
    }

    fn store() -> (Arc<MemoryStore>, SessionStore) {
        let kv = Arc::new(MemoryStore::new());
        let session = SessionStore::new(kv.clone());
        (kv, session)
    }

    #[test]
    fn empty_store_is_anonymous() {
        let (_, session) = store();
        assert_eq!(session.read(), Session::anonymous());
        assert!(!session.is_authenticated());
        assert!(!session.has_any_auth_key());
    }

    #[test]
    fn write_then_read_round_trips() {
        let (kv, session) = store();
        session.write("tok-1", &user("u1")).unwrap();

        let read = session.read();
        assert!(read.is_authenticated());
        assert_eq!(read.token.as_deref(), Some("tok-1"));
        assert_eq!(session.current_user().map(|u| u.id), Some("u1".to_string()));
        assert_eq!(kv.get(TOKEN_KEY).as_deref(), Some("tok-1"));
        assert!(kv.get(USER_KEY).unwrap().contains("\"nombre\""));
    }

    #[test]
    fn half_written_state_reads_as_anonymous() {
        let (kv, session) = store();
        kv.set(TOKEN_KEY, "tok");
        assert!(!session.is_authenticated());
        assert!(session.has_any_auth_key());

        kv.remove(TOKEN_KEY);
        kv.set(USER_KEY, &serde_json::to_string(&user("u1")).unwrap());
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
    }

    #[test]
    fn empty_token_reads_as_anonymous() {
        let (kv, session) = store();
        kv.set(TOKEN_KEY, "");
        kv.set(USER_KEY, &serde_json::to_string(&user("u1")).unwrap());
        assert!(!session.is_authenticated());
    }

    #[test]
    #[tracing_test::traced_test]
    fn corrupt_user_reads_as_anonymous_and_warns() {
        let (kv, session) = store();
        kv.set(TOKEN_KEY, "tok");
        kv.set(USER_KEY, "{broken");
        assert_eq!(session.read(), Session::anonymous());
        assert!(logs_contain("stored user record is unreadable"));
    }

    #[test]
    fn clear_removes_both_keys() {
        let (kv, session) = store();
        session.write("tok", &user("u1")).unwrap();
        session.clear();
        assert!(kv.get(TOKEN_KEY).is_none());
        assert!(kv.get(USER_KEY).is_none());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn observe_replays_then_follows_transitions() {
        let (_, session) = store();
        let mut before = session.observe();
        session.write("tok", &user("u1")).unwrap();
        let mut after = session.observe();
        session.clear();

        assert_eq!(before.drain(), vec![false, true, false]);
        assert_eq!(after.drain(), vec![true, false]);
    }

    #[test]
    fn initial_value_reflects_existing_storage() {
        let kv = Arc::new(MemoryStore::new());
        kv.set(TOKEN_KEY, "tok");
        kv.set(USER_KEY, &serde_json::to_string(&user("u1")).unwrap());

        let session = SessionStore::new(kv);
        let mut sub = session.observe();
        assert_eq!(sub.try_recv(), Some(true));
    }

    #[test]
    fn every_write_and_clear_emits() {
        let (_, session) = store();
        let mut sub = session.observe();
        session.clear();
        session.write("a", &user("u1")).unwrap();
        session.write("b", &user("u2")).unwrap();
        assert_eq!(sub.drain(), vec![false, false, true, true]);
    }

    #[test]
    fn debug_does_not_leak_token() {
        let (_, session) = store();
        session.write("very-secret", &user("u1")).unwrap();
        assert!(!format!("{session:?}").contains("very-secret"));
    }
}
