//! # habitsync Model
//!
//! Data model and wire messages for the habitsync server.
//!
//! This crate provides:
//! - Habit entry and category records (the per-user synced state)
//! - Group and user profile records
//! - Upload payloads and response shapes for the sync, leaderboard,
//!   and group endpoints
//! - Whole-batch validation for client-submitted payloads
//!
//! ## Wire format
//!
//! Every wire-facing type derives `serde` with camelCase field names and
//! ISO-8601 timestamps (`chrono::DateTime<Utc>`), matching what clients
//! send and receive as JSON.
//!
//! ## Key Invariants
//!
//! - At most one entry per `(uid, dayIndex, habitId)`
//! - At most one category per `(uid, categoryId)`
//! - A habit value is either a boolean or a non-negative count; the
//!   "completed" predicate is defined once on [`HabitValue`]

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod category;
mod entry;
mod error;
mod group;
mod messages;
mod user;
mod value;

pub use category::{CategoryUpload, HabitCategory, HabitItem, HabitKind};
pub use entry::{EntryKey, EntryUpload, HabitEntry};
pub use error::{ValidationError, ValidationResult};
pub use group::{
    generate_invite_code, is_valid_invite_code, normalize_invite_code, validate_group_name, Group,
    GroupCategory, DEFAULT_GROUP_EMOJI, GROUP_NAME_MAX, INVITE_CODE_ALPHABET, INVITE_CODE_LEN,
};
pub use messages::{
    CreateGroupRequest, GroupView, JoinGroupRequest, LeaderboardEntry, LeaderboardPage,
    MemberInfo, MemberProgress, SyncState, UpdateGroupHabitsRequest, UpdateGroupRequest,
    UploadRequest,
};
pub use user::{UserProfile, UNKNOWN_DISPLAY_NAME};
pub use value::HabitValue;
