//! Error taxonomy for request handling.

use habitsync_engine::EngineError;
use habitsync_model::ValidationError;
use habitsync_store::StoreError;
use thiserror::Error;

/// Result type for request handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Structured failures surfaced to the caller.
///
/// Every error carries a kind plus a human-readable message; none are
/// fatal to the process, all are scoped to the single request.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Malformed or missing fields; the whole batch was rejected.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A group, member, or category-scoped resource is absent.
    #[error("not found: {0}")]
    NotFound(String),

    /// The caller lacks permission for this operation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// A uniqueness or state conflict, e.g. racing invite-code use.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The caller's identity is missing or invalid.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// The store is unreachable; the whole operation is safe to retry.
    #[error("store unavailable: {0}")]
    TransientStore(String),

    /// Unexpected internal failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the machine-readable kind of this error.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation",
            ApiError::NotFound(_) => "not_found",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::Conflict(_) => "conflict",
            ApiError::Unauthenticated(_) => "unauthenticated",
            ApiError::TransientStore(_) => "transient_store",
            ApiError::Internal(_) => "internal",
        }
    }

    /// Returns true if this is a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ApiError::Validation(_)
                | ApiError::NotFound(_)
                | ApiError::Forbidden(_)
                | ApiError::Conflict(_)
                | ApiError::Unauthenticated(_)
        )
    }

    /// Returns true if retrying the whole request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::TransientStore(_))
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => ApiError::TransientStore(msg),
            StoreError::UniqueViolation { .. } => ApiError::Conflict(err.to_string()),
            StoreError::Corrupted(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Validation(inner) => inner.into(),
            EngineError::Store(inner) => inner.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(ApiError::Validation("bad".into()).is_client_error());
        assert!(ApiError::Forbidden("no".into()).is_client_error());
        assert!(!ApiError::TransientStore("down".into()).is_client_error());
        assert!(ApiError::TransientStore("down".into()).is_retryable());
        assert!(!ApiError::Conflict("dup".into()).is_retryable());
    }

    #[test]
    fn store_error_mapping() {
        let err: ApiError = StoreError::Unavailable("down".into()).into();
        assert_eq!(err.kind(), "transient_store");

        let err: ApiError = StoreError::UniqueViolation {
            constraint: "group.invite_code".into(),
        }
        .into();
        assert_eq!(err.kind(), "conflict");
    }

    #[test]
    fn engine_error_mapping() {
        let err: ApiError = EngineError::Validation(ValidationError::EmptyHabitId).into();
        assert_eq!(err.kind(), "validation");
    }
}
