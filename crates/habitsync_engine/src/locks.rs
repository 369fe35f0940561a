//! Per-user mutual exclusion for merge operations.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// A map of per-uid locks.
///
/// The merge coordinator holds a user's lock across its whole
/// read-compare-write sequence, so two concurrent uploads for the same
/// user serialize. Different users never contend; read-only paths
/// (aggregation, ranking) do not use these locks at all.
#[derive(Debug, Default)]
pub struct UserLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl UserLocks {
    /// Creates an empty lock map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` while holding the lock for `uid`.
    pub fn with_user<T>(&self, uid: &str, f: impl FnOnce() -> T) -> T {
        let slot = {
            let mut locks = self.locks.lock();
            Arc::clone(
                locks
                    .entry(uid.to_string())
                    .or_insert_with(|| Arc::new(Mutex::new(()))),
            )
        };
        let _guard = slot.lock();
        f()
    }
}
