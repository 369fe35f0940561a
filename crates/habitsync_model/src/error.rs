//! Validation errors for client-submitted payloads.

use thiserror::Error;

/// Result type for payload validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Errors raised while validating a client-submitted payload.
///
/// Validation runs over the whole batch before any store mutation; a
/// single malformed record rejects the entire upload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// An entry referenced an empty habit ID.
    #[error("entry habit id must not be empty")]
    EmptyHabitId,

    /// A category carried an empty category ID.
    #[error("category id must not be empty")]
    EmptyCategoryId,

    /// A category carried an empty name.
    #[error("category name must not be empty")]
    EmptyCategoryName,

    /// A habit item carried an empty ID.
    #[error("habit item id must not be empty")]
    EmptyItemId,

    /// A habit item carried an empty label.
    #[error("habit item label must not be empty")]
    EmptyItemLabel,

    /// A group name was empty after trimming.
    #[error("group name must not be empty")]
    EmptyGroupName,

    /// A group name exceeded the maximum length.
    #[error("group name too long: {len} > {max}")]
    GroupNameTooLong {
        /// Submitted length after trimming.
        len: usize,
        /// Maximum allowed length.
        max: usize,
    },

    /// An invite code was not six characters from the invite alphabet.
    #[error("invite code must be {expected} characters from the invite alphabet")]
    BadInviteCode {
        /// Required code length.
        expected: usize,
    },

    /// An upload batch exceeded the configured size cap.
    #[error("batch too large: {count} > {max}")]
    BatchTooLarge {
        /// Number of records submitted.
        count: usize,
        /// Maximum accepted per batch.
        max: usize,
    },
}
