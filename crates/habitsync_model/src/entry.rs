//! Habit entry records.

use crate::error::{ValidationError, ValidationResult};
use crate::value::HabitValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One observation of a habit on a day for a user.
///
/// At most one entry exists per `(uid, dayIndex, habitId)`. Entries are
/// created on first upload and mutated in place by later uploads whose
/// `updatedAt` is not older than the stored value; `createdAt` is fixed
/// at first insertion and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitEntry {
    /// Owning user.
    pub uid: String,
    /// Zero-based program day.
    pub day_index: u32,
    /// Habit this entry observes (references a category item).
    pub habit_id: String,
    /// Recorded value.
    pub value: HabitValue,
    /// Client- or server-assigned last-write timestamp.
    pub updated_at: DateTime<Utc>,
    /// First insertion time, never changed thereafter.
    pub created_at: DateTime<Utc>,
}

impl HabitEntry {
    /// Returns the per-user uniqueness key for this entry.
    pub fn key(&self) -> EntryKey {
        EntryKey {
            day_index: self.day_index,
            habit_id: self.habit_id.clone(),
        }
    }
}

/// Per-user uniqueness key for an entry: `(dayIndex, habitId)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryKey {
    /// Zero-based program day.
    pub day_index: u32,
    /// Habit identifier.
    pub habit_id: String,
}

/// An entry as submitted in a sync upload.
///
/// The server stamps `uid` and `createdAt`; the client supplies the
/// rest, including the `updatedAt` used for last-writer-wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryUpload {
    /// Zero-based program day.
    pub day_index: u32,
    /// Habit this entry observes.
    pub habit_id: String,
    /// Recorded value.
    pub value: HabitValue,
    /// Client-side last-write timestamp.
    pub updated_at: DateTime<Utc>,
}

impl EntryUpload {
    /// Validates the upload shape.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.habit_id.is_empty() {
            return Err(ValidationError::EmptyHabitId);
        }
        Ok(())
    }

    /// Returns the per-user uniqueness key for this upload.
    pub fn key(&self) -> EntryKey {
        EntryKey {
            day_index: self.day_index,
            habit_id: self.habit_id.clone(),
        }
    }
}
