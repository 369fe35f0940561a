//! Conflict-resolving merge of sync uploads.

use crate::error::EngineResult;
use crate::locks::UserLocks;
use chrono::{DateTime, Utc};
use habitsync_model::{
    CategoryUpload, EntryKey, EntryUpload, HabitCategory, HabitEntry, SyncState,
};
use habitsync_store::{CategoryStore, EntryStore};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Reconciles client-submitted batches against stored state.
///
/// Conflict resolution is last-writer-wins per key: an incoming record
/// is accepted when its `updatedAt` is not older than the stored one
/// (absent stored record always accepts), otherwise it is silently
/// discarded and the server copy stands. Every merge returns the full
/// post-merge state for the user.
///
/// A merge is one logical transaction per user: the per-uid lock is
/// held across read, compare, and write, so concurrent uploads from two
/// devices serialize. All reads and the write-set computation happen
/// before the first write, so a store failure surfaces before any
/// partial state is applied.
pub struct MergeCoordinator {
    entries: Arc<EntryStore>,
    categories: Arc<CategoryStore>,
    locks: UserLocks,
}

impl MergeCoordinator {
    /// Creates a coordinator over the given stores.
    pub fn new(entries: Arc<EntryStore>, categories: Arc<CategoryStore>) -> Self {
        Self {
            entries,
            categories,
            locks: UserLocks::new(),
        }
    }

    /// Merges an upload and returns the full post-merge state.
    ///
    /// The whole batch is validated before any store access; one
    /// malformed record rejects the upload with nothing applied.
    pub fn merge(
        &self,
        uid: &str,
        entry_uploads: Vec<EntryUpload>,
        category_uploads: Vec<CategoryUpload>,
    ) -> EngineResult<SyncState> {
        for upload in &entry_uploads {
            upload.validate()?;
        }
        for upload in &category_uploads {
            upload.validate()?;
        }

        self.locks.with_user(uid, || {
            let now = Utc::now();
            let entry_writes = self.plan_entries(uid, entry_uploads, now)?;
            let (category_writes, category_deletes) =
                self.plan_categories(uid, category_uploads)?;

            self.entries.upsert_many(entry_writes)?;
            self.categories.apply(uid, category_writes, &category_deletes)?;

            self.snapshot(uid)
        })
    }

    /// Returns the full current state for `uid`.
    ///
    /// Takes the user lock so the entry and category reads see one
    /// consistent point in time relative to concurrent merges.
    pub fn download(&self, uid: &str) -> EngineResult<SyncState> {
        self.locks.with_user(uid, || self.snapshot(uid))
    }

    /// Deletes all entries and categories for `uid`.
    ///
    /// Idempotent: resetting an already-empty user succeeds.
    pub fn reset(&self, uid: &str) -> EngineResult<()> {
        self.locks.with_user(uid, || {
            let entries = self.entries.delete_all_for_user(uid)?;
            let categories = self.categories.delete_all_for_user(uid)?;
            debug!(uid, entries, categories, "reset user state");
            Ok(())
        })
    }

    /// Computes the accepted entry write set.
    ///
    /// Within a batch, later records for the same key are also subject
    /// to last-writer-wins, so the stored `updatedAt` for a key ends up
    /// as the maximum ever accepted for it.
    fn plan_entries(
        &self,
        uid: &str,
        uploads: Vec<EntryUpload>,
        now: DateTime<Utc>,
    ) -> EngineResult<Vec<HabitEntry>> {
        let stored: HashMap<EntryKey, HabitEntry> = self
            .entries
            .list_for_user(uid)?
            .into_iter()
            .map(|entry| (entry.key(), entry))
            .collect();

        let mut accepted: HashMap<EntryKey, HabitEntry> = HashMap::new();
        let mut discarded = 0usize;

        for upload in uploads {
            let key = upload.key();
            let baseline = accepted
                .get(&key)
                .or_else(|| stored.get(&key))
                .map(|entry| entry.updated_at);

            if baseline.is_some_and(|stored_at| upload.updated_at < stored_at) {
                // Older than the server copy: server wins.
                discarded += 1;
                continue;
            }

            let created_at = stored.get(&key).map(|entry| entry.created_at).unwrap_or(now);
            accepted.insert(
                key,
                HabitEntry {
                    uid: uid.to_string(),
                    day_index: upload.day_index,
                    habit_id: upload.habit_id,
                    value: upload.value,
                    updated_at: upload.updated_at,
                    created_at,
                },
            );
        }

        debug!(uid, accepted = accepted.len(), discarded, "planned entry merge");
        Ok(accepted.into_values().collect())
    }

    /// Computes the category write and delete sets.
    ///
    /// The client sends its complete category set on every sync, so any
    /// stored `categoryId` absent from the batch is deleted
    /// (full-replacement semantics).
    fn plan_categories(
        &self,
        uid: &str,
        uploads: Vec<CategoryUpload>,
    ) -> EngineResult<(Vec<HabitCategory>, Vec<String>)> {
        let stored: HashMap<String, HabitCategory> = self
            .categories
            .list_for_user(uid)?
            .into_iter()
            .map(|category| (category.category_id.clone(), category))
            .collect();

        let incoming_ids: HashSet<&str> =
            uploads.iter().map(|upload| upload.category_id.as_str()).collect();
        let deletes: Vec<String> = stored
            .keys()
            .filter(|id| !incoming_ids.contains(id.as_str()))
            .cloned()
            .collect();

        let mut writes = Vec::with_capacity(uploads.len());
        for upload in uploads {
            if let Some(current) = stored.get(&upload.category_id) {
                if upload.updated_at < current.updated_at {
                    // Server copy is newer; keep it.
                    continue;
                }
            }
            writes.push(upload.into_category(uid));
        }

        if !deletes.is_empty() {
            debug!(uid, deleted = deletes.len(), "full replacement removed categories");
        }
        Ok((writes, deletes))
    }

    fn snapshot(&self, uid: &str) -> EngineResult<SyncState> {
        Ok(SyncState {
            entries: self.entries.list_for_user(uid)?,
            categories: self.categories.list_for_user(uid)?,
        })
    }
}
