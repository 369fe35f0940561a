//! # habitsync Store
//!
//! Keyed document store and typed stores for habitsync.
//!
//! This crate provides:
//! - A generic keyed document store with point lookups, filtered scans,
//!   bulk upserts, and bulk deletes
//! - Typed stores for habit entries, habit categories, and groups
//! - A read-only user directory fed by the identity subsystem
//!
//! ## Architecture
//!
//! The persistence technology is externalized: everything in this crate
//! is an in-memory, thread-safe implementation of the keyed-store
//! contract the engine consumes. A deployment backed by a real database
//! replaces [`DocumentStore`] behind the same typed APIs.
//!
//! Store unavailability surfaces as [`StoreError::Unavailable`], a
//! transient failure the caller can retry; no partial writes are
//! visible after a failed call.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod categories;
mod entries;
mod error;
mod groups;
mod memory;
mod users;

pub use categories::CategoryStore;
pub use entries::EntryStore;
pub use error::{StoreError, StoreResult};
pub use groups::GroupStore;
pub use memory::DocumentStore;
pub use users::UserDirectory;
