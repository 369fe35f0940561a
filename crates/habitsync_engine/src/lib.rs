//! # habitsync Engine
//!
//! Merge, statistics, and ranking engine for habitsync.
//!
//! This crate provides:
//! - Conflict-resolving merge of uploaded habit entries and categories
//!   (last-writer-wins by `updatedAt`)
//! - Statistics aggregation: experience points, streak, completion rate
//! - Leaderboard ranking with dense ranks and clamped pagination
//! - Group scoping: restricting population and habit set to a group
//!
//! ## Architecture
//!
//! The merge path is the only writer. Each merge runs as one logical
//! transaction per user: the per-uid lock is held across the
//! read-compare-write so concurrent uploads from a second device
//! serialize instead of interleaving. Aggregation and ranking are
//! read-only and never take those locks; a large ranking pass neither
//! blocks nor is blocked by individual sync uploads.
//!
//! ## Key Invariants
//!
//! - A merge returns the full post-merge state, never a delta
//! - Stored `updatedAt` for a key is the maximum ever accepted for it
//! - `createdAt` is fixed at first insertion
//! - Categories follow full-replacement semantics: omission deletes

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod locks;
mod merge;
mod rank;
mod scope;
pub mod stats;

pub use error::{EngineError, EngineResult};
pub use locks::UserLocks;
pub use merge::MergeCoordinator;
pub use rank::{LeaderboardRanker, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use scope::{scope, GroupScope};
pub use stats::{aggregate, UserStats, XP_PER_HABIT};
