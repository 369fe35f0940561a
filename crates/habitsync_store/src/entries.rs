//! Typed store for habit entries.

use crate::error::StoreResult;
use crate::memory::DocumentStore;
use habitsync_model::HabitEntry;
use std::collections::HashSet;

/// Store key: one entry per `(uid, dayIndex, habitId)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct EntryDocKey {
    uid: String,
    day_index: u32,
    habit_id: String,
}

impl EntryDocKey {
    fn of(entry: &HabitEntry) -> Self {
        Self {
            uid: entry.uid.clone(),
            day_index: entry.day_index,
            habit_id: entry.habit_id.clone(),
        }
    }
}

/// Keyed collection of per-day, per-habit completion records.
///
/// The unique key enforces the one-entry-per-`(uid, dayIndex, habitId)`
/// invariant: upserting an existing key replaces, never duplicates.
#[derive(Debug, Default)]
pub struct EntryStore {
    docs: DocumentStore<EntryDocKey, HabitEntry>,
}

impl EntryStore {
    /// Creates a new empty entry store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all entries for `uid`, ordered by `(dayIndex, habitId)`.
    pub fn list_for_user(&self, uid: &str) -> StoreResult<Vec<HabitEntry>> {
        let mut entries = self.docs.scan(|k, _| k.uid == uid)?;
        entries.sort_by(|a, b| {
            (a.day_index, &a.habit_id).cmp(&(b.day_index, &b.habit_id))
        });
        Ok(entries)
    }

    /// Returns entries for `uid` restricted to `habit_ids`.
    ///
    /// An empty filter set matches nothing; it does not mean "all".
    pub fn list_for_user_in(
        &self,
        uid: &str,
        habit_ids: &HashSet<String>,
    ) -> StoreResult<Vec<HabitEntry>> {
        let mut entries = self
            .docs
            .scan(|k, _| k.uid == uid && habit_ids.contains(&k.habit_id))?;
        entries.sort_by(|a, b| {
            (a.day_index, &a.habit_id).cmp(&(b.day_index, &b.habit_id))
        });
        Ok(entries)
    }

    /// Inserts or replaces a batch of entries in one atomic step.
    pub fn upsert_many(&self, entries: Vec<HabitEntry>) -> StoreResult<()> {
        let records = entries
            .into_iter()
            .map(|entry| (EntryDocKey::of(&entry), entry))
            .collect();
        self.docs.upsert_many(records)
    }

    /// Deletes every entry for `uid` (bulk reset). Returns the count.
    pub fn delete_all_for_user(&self, uid: &str) -> StoreResult<usize> {
        self.docs.delete_where(|k, _| k.uid == uid)
    }

    /// Returns the number of entries stored for `uid`.
    pub fn count_for_user(&self, uid: &str) -> StoreResult<usize> {
        Ok(self.docs.scan_keys(|k, _| k.uid == uid)?.len())
    }

    /// Toggles simulated unavailability for tests.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.docs.set_unavailable(unavailable);
    }
}
