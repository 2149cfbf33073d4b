//! Reactive value cell mirrored to durable key-value storage.
//!
//! DESIGN
//! ======
//! The in-memory value is authoritative for reads; every write goes through
//! [`PersistedCell::set_value`], which updates memory, mirrors the value to
//! the backing store, then notifies subscribers in subscription order.
//! Absent values delete the storage slot instead of writing a serialized
//! `null`, so the slot never holds the `"undefined"`/`"null"` strings that
//! earlier writers were known to leave behind. Reads treat those strings,
//! and anything that fails to deserialize, as absence.
//!
//! Writes made by another tab to the same key are not observed until the
//! next full reload.

#[cfg(test)]
#[path = "cell_test.rs"]
mod cell_test;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::errors::PersistenceError;
use super::store::KeyValueStore;

/// Stored strings that mean "no value".
const ABSENT_SENTINELS: [&str; 2] = ["undefined", "null"];

type Subscriber<T> = Arc<dyn Fn(Option<&T>) + Send + Sync>;

/// Handle returned by [`PersistedCell::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A named value that survives reloads through a [`KeyValueStore`].
///
/// Cloning yields another handle to the same cell. A cell is the only writer
/// of its key; two cells over one key is a caller error.
pub struct PersistedCell<T> {
    inner: Arc<CellInner<T>>,
}

struct CellInner<T> {
    key: String,
    store: Arc<dyn KeyValueStore>,
    value: RwLock<Option<T>>,
    subscribers: Mutex<Vec<(SubscriptionId, Subscriber<T>)>>,
    next_subscription: AtomicU64,
}

impl<T> Clone for PersistedCell<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T> fmt::Debug for PersistedCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistedCell")
            .field("key", &self.inner.key)
            .finish_non_exhaustive()
    }
}

impl<T> PersistedCell<T>
where
    T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    /// Open the cell for `key`, restoring the stored value or falling back to
    /// `initial` when nothing usable is stored. Never fails.
    pub fn new(key: impl Into<String>, initial: Option<T>, store: impl KeyValueStore + 'static) -> Self {
        let key = key.into();
        let store: Arc<dyn KeyValueStore> = Arc::new(store);
        let value = read_slot(store.as_ref(), &key).or(initial);
        Self {
            inner: Arc::new(CellInner {
                key,
                store,
                value: RwLock::new(value),
                subscribers: Mutex::new(Vec::new()),
                next_subscription: AtomicU64::new(0),
            }),
        }
    }

    /// Storage key owned by this cell.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// Snapshot of the current value.
    #[must_use]
    pub fn get(&self) -> Option<T> {
        self.read().clone()
    }

    /// Borrow the current value without cloning.
    ///
    /// `f` must not write to this cell.
    pub fn with<R>(&self, f: impl FnOnce(Option<&T>) -> R) -> R {
        f(self.read().as_ref())
    }

    /// Whether a value is currently held.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.read().is_some()
    }

    /// Replace the value wholesale. `None` clears the storage slot.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::WriteFailed`] if the value cannot be
    /// serialized (memory is left untouched) or the store rejects the write
    /// (memory already holds the new value and subscribers were notified).
    pub fn set_value(&self, next: Option<T>) -> Result<(), PersistenceError> {
        let encoded = match &next {
            Some(value) => encode(&self.inner.key, value)?,
            None => None,
        };

        *self.write() = next;

        let result = match encoded {
            Some(raw) => self
                .inner
                .store
                .set(&self.inner.key, &raw)
                .map_err(|reason| PersistenceError::WriteFailed { key: self.inner.key.clone(), reason }),
            None => {
                self.inner.store.remove(&self.inner.key);
                Ok(())
            }
        };
        if let Err(e) = &result {
            leptos::logging::error!("{e}");
        }

        self.notify();
        result
    }

    /// Derive the next value from the current one, then persist it like
    /// [`Self::set_value`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::set_value`].
    pub fn update_value(&self, f: impl FnOnce(Option<&T>) -> Option<T>) -> Result<(), PersistenceError> {
        let next = self.with(f);
        self.set_value(next)
    }

    /// Register `f` to run after every write, in registration order.
    pub fn subscribe(&self, f: impl Fn(Option<&T>) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.subscribers().push((id, Arc::new(f)));
        id
    }

    /// Drop a subscriber. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers();
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        subscribers.len() != before
    }

    fn notify(&self) {
        // Snapshot both lists so subscribers may read, write, or subscribe.
        let subscribers: Vec<Subscriber<T>> = self.subscribers().iter().map(|(_, f)| Arc::clone(f)).collect();
        let snapshot = self.get();
        for subscriber in subscribers {
            subscriber(snapshot.as_ref());
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<T>> {
        self.inner.value.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<T>> {
        self.inner.value.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn subscribers(&self) -> std::sync::MutexGuard<'_, Vec<(SubscriptionId, Subscriber<T>)>> {
        self.inner.subscribers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Serialize for storage. `Ok(None)` means the value serializes to the empty
/// marker and the slot should be removed instead.
fn encode<T: Serialize>(key: &str, value: &T) -> Result<Option<String>, PersistenceError> {
    let raw = serde_json::to_string(value)
        .map_err(|e| PersistenceError::WriteFailed { key: key.to_owned(), reason: e.to_string() })?;
    if raw == "null" { Ok(None) } else { Ok(Some(raw)) }
}

fn read_slot<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    let raw = raw.trim();
    if raw.is_empty() || ABSENT_SENTINELS.contains(&raw) {
        return None;
    }
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            leptos::logging::warn!("ignoring unreadable stored value for `{key}`: {e}");
            None
        }
    }
}
