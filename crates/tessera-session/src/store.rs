//! The persisted key-value port and an in-memory implementation.
//!
//! The session layer only needs three operations on persisted state: read
//! a key, write a key, delete a key. Hosts plug in whatever backs that
//! (a file, a keychain, a browser's local storage via FFI) by implementing
//! [`SessionStore`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;

use crate::SessionError;

/// Capacity of the change channel. A watcher that falls further behind
/// than this sees `RecvError::Lagged` and should re-read the store.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Persistent string storage keyed by string.
///
/// Methods take `&self`: implementations handle their own interior
/// mutability, so one store can be shared by several managers.
pub trait SessionStore: Send + Sync + 'static {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// [`SessionError::Storage`] if the backend refused the write.
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Deletes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    /// [`SessionError::Storage`] if the backend refused the removal.
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

impl<S: SessionStore> SessionStore for Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        (**self).remove(key)
    }
}

// ---------------------------------------------------------------------------
// StoreChange
// ---------------------------------------------------------------------------

/// A mutation observed on a [`MemoryStore`].
///
/// Carries only the key: watchers re-read the value, so they never act on a
/// stale copy of a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    Set { key: String },
    Removed { key: String },
}

impl StoreChange {
    pub fn key(&self) -> &str {
        match self {
            Self::Set { key } | Self::Removed { key } => key,
        }
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// A process-local [`SessionStore`].
///
/// Several session managers can share one `MemoryStore` (wrap it in `Arc`).
/// Each of them reads the token fresh on every query, and any party can
/// [`watch`](Self::watch) for writes made by the others.
#[derive(Debug)]
pub struct MemoryStore {
    /// The stored values.
    ///
    /// A plain `std::sync::Mutex` is enough: every critical section is a
    /// single map operation and never spans an `.await`.
    entries: Mutex<HashMap<String, String>>,

    /// Sending half of the change channel.
    ///
    /// `broadcast` gives every watcher its own copy of every event. The
    /// store keeps only the sender; receivers are created on demand by
    /// [`watch`](Self::watch).
    changes: broadcast::Sender<StoreChange>,
}

impl MemoryStore {
    /// Creates an empty store with no watchers.
    pub fn new() -> Self {
        // The initial receiver is dropped straight away. Sending with no
        // receivers just returns an error we ignore (see `notify`).
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            entries: Mutex::new(HashMap::new()),
            changes,
        }
    }

    /// Subscribes to every subsequent set/remove, in the order they happen.
    ///
    /// Removing a key that was not present still produces
    /// [`StoreChange::Removed`].
    pub fn watch(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave a HashMap half-written
    // in a way that matters here, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, change: StoreChange) {
        // No receivers is the normal case; nothing to do.
        let _ = self.changes.send(change);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        // The guard returned by `lock()` is a temporary, so it is dropped at
        // the end of this statement: watchers are notified after the lock
        // is released and can read the new value immediately.
        self.lock().insert(key.to_string(), value.to_string());
        self.notify(StoreChange::Set {
            key: key.to_string(),
        });
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.lock().remove(key);
        self.notify(StoreChange::Removed {
            key: key.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_then_get_returns_value() {
        let store = MemoryStore::new();

        store.set("auth_token", "abc").unwrap();

        assert_eq!(store.get("auth_token").as_deref(), Some("abc"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_memory_store_set_overwrites() {
        let store = MemoryStore::new();
        store.set("k", "1").unwrap();
        store.set("k", "2").unwrap();

        assert_eq!(store.get("k").as_deref(), Some("2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_memory_store_remove_missing_key_is_ok() {
        let store = MemoryStore::new();

        store.remove("never-set").expect("removing nothing is fine");

        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_store_watch_sees_changes_in_order() {
        let store = MemoryStore::new();
        let mut changes = store.watch();

        store.set("auth_token", "abc").unwrap();
        store.remove("auth_token").unwrap();
        store.remove("user_profile").unwrap();

        assert_eq!(
            changes.try_recv().unwrap(),
            StoreChange::Set { key: "auth_token".into() }
        );
        assert_eq!(
            changes.try_recv().unwrap(),
            StoreChange::Removed { key: "auth_token".into() }
        );
        assert_eq!(changes.try_recv().unwrap().key(), "user_profile");
        assert!(changes.try_recv().is_err(), "no more changes expected");
    }

    #[test]
    fn test_memory_store_watch_only_sees_later_changes() {
        let store = MemoryStore::new();
        store.set("before", "x").unwrap();

        let mut changes = store.watch();
        store.set("after", "y").unwrap();

        assert_eq!(changes.try_recv().unwrap().key(), "after");
    }

    #[test]
    fn test_arc_store_shares_entries() {
        let store = Arc::new(MemoryStore::new());
        let other = Arc::clone(&store);

        store.set("auth_token", "abc").unwrap();

        assert_eq!(other.get("auth_token").as_deref(), Some("abc"));
    }
}
