//! Generic in-memory keyed document store.

use crate::error::{StoreError, StoreResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};

/// A keyed collection of documents.
///
/// Supports the four operations the engine needs from a persistence
/// layer: point lookup, filtered scan, bulk upsert, and bulk delete.
/// Each call is atomic: it takes the collection lock once, so a bulk
/// write is applied entirely or not at all.
///
/// # Thread Safety
///
/// The store is thread-safe and can be shared across threads via `Arc`.
///
/// # Fault injection
///
/// [`DocumentStore::set_unavailable`] makes every subsequent call fail
/// with [`StoreError::Unavailable`] before touching any data. Tests use
/// this to exercise transient-failure paths.
pub struct DocumentStore<K, V> {
    docs: RwLock<HashMap<K, V>>,
    unavailable: AtomicBool,
}

impl<K, V> Default for DocumentStore<K, V> {
    fn default() -> Self {
        Self {
            docs: RwLock::new(HashMap::new()),
            unavailable: AtomicBool::new(false),
        }
    }
}

impl<K, V> DocumentStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the document stored under `key`, if any.
    pub fn get(&self, key: &K) -> StoreResult<Option<V>> {
        self.check_available()?;
        Ok(self.docs.read().get(key).cloned())
    }

    /// Returns every document matching `pred`.
    pub fn scan<F>(&self, pred: F) -> StoreResult<Vec<V>>
    where
        F: Fn(&K, &V) -> bool,
    {
        self.check_available()?;
        Ok(self
            .docs
            .read()
            .iter()
            .filter(|(k, v)| pred(k, v))
            .map(|(_, v)| v.clone())
            .collect())
    }

    /// Returns the keys of every document matching `pred`.
    pub fn scan_keys<F>(&self, pred: F) -> StoreResult<Vec<K>>
    where
        F: Fn(&K, &V) -> bool,
    {
        self.check_available()?;
        Ok(self
            .docs
            .read()
            .iter()
            .filter(|(k, v)| pred(k, v))
            .map(|(k, _)| k.clone())
            .collect())
    }

    /// Inserts or replaces a batch of documents in one atomic step.
    pub fn upsert_many(&self, records: Vec<(K, V)>) -> StoreResult<()> {
        self.check_available()?;
        let mut docs = self.docs.write();
        for (key, value) in records {
            docs.insert(key, value);
        }
        Ok(())
    }

    /// Deletes a batch of documents by key. Returns the number removed.
    pub fn delete_many(&self, keys: &[K]) -> StoreResult<usize> {
        self.check_available()?;
        let mut docs = self.docs.write();
        let mut removed = 0;
        for key in keys {
            if docs.remove(key).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Deletes every document matching `pred`. Returns the number removed.
    pub fn delete_where<F>(&self, pred: F) -> StoreResult<usize>
    where
        F: Fn(&K, &V) -> bool,
    {
        self.check_available()?;
        let mut docs = self.docs.write();
        let before = docs.len();
        docs.retain(|k, v| !pred(k, v));
        Ok(before - docs.len())
    }

    /// Applies upserts and deletes under one lock acquisition.
    ///
    /// Used where a single logical write touches both directions, e.g.
    /// category full-replacement on sync.
    pub fn apply(&self, upserts: Vec<(K, V)>, deletes: &[K]) -> StoreResult<()> {
        self.check_available()?;
        let mut docs = self.docs.write();
        for (key, value) in upserts {
            docs.insert(key, value);
        }
        for key in deletes {
            docs.remove(key);
        }
        Ok(())
    }

    /// Returns the number of stored documents.
    pub fn len(&self) -> usize {
        self.docs.read().len()
    }

    /// Returns true if the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.docs.read().is_empty()
    }

    /// Removes every document.
    pub fn clear(&self) {
        self.docs.write().clear();
    }

    /// Toggles simulated unavailability for tests.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store offline".into()));
        }
        Ok(())
    }
}

impl<K, V> std::fmt::Debug for DocumentStore<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("len", &self.docs.read().len())
            .finish_non_exhaustive()
    }
}
