//! Durable key-value backends for persisted cells.
//!
//! SYSTEM CONTEXT
//! ==============
//! `BrowserStore` is the production backend (`window.localStorage`). It
//! resolves storage on every call, so it stays zero-sized and `Send + Sync`,
//! and degrades to a no-op outside the `hydrate` build so SSR renders stay
//! deterministic. `MemoryStore` backs tests and server rendering.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Synchronous string key-value storage.
pub trait KeyValueStore: Send + Sync {
    /// Raw stored string for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns a backend-specific message when the write is rejected
    /// (quota exceeded, storage disabled).
    fn set(&self, key: &str, value: &str) -> Result<(), String>;

    /// Delete `key`. Missing keys are ignored.
    fn remove(&self, key: &str);
}

/// `window.localStorage`, resolved per call.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        #[cfg(feature = "hydrate")]
        {
            let storage = local_storage().ok_or_else(|| "localStorage unavailable".to_owned())?;
            storage
                .set_item(key, value)
                .map_err(|e| format!("localStorage write rejected: {e:?}"))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
            Ok(())
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// In-process store. Clones share the same underlying map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    entries: HashMap<String, String>,
    fail_writes: Option<String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with raw entries, as if written by an earlier session.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::default();
        {
            let mut inner = store.lock();
            for (k, v) in entries {
                inner.entries.insert(k.into(), v.into());
            }
        }
        store
    }

    /// Make every subsequent `set` fail with `reason`; `None` restores writes.
    pub fn fail_writes(&self, reason: Option<&str>) {
        self.lock().fail_writes = reason.map(str::to_owned);
    }

    /// Whether `key` currently holds any value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.lock().entries.contains_key(key)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let mut inner = self.lock();
        if let Some(reason) = &inner.fail_writes {
            return Err(reason.clone());
        }
        inner.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.lock().entries.remove(key);
    }
}
