//! Error types for store operations.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during store operations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store is unreachable. Transient: the whole operation is safe
    /// to retry since no partial writes are visible.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A uniqueness constraint was violated.
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation {
        /// The violated constraint, e.g. `group.invite_code`.
        constraint: String,
    },

    /// A stored record failed to load.
    #[error("store corrupted: {0}")]
    Corrupted(String),
}
