//! Error types for engine operations.

use habitsync_model::ValidationError;
use habitsync_store::StoreError;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur in the merge and ranking engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A batch failed validation; nothing was applied.
    #[error("invalid payload: {0}")]
    Validation(#[from] ValidationError),

    /// The store failed; see [`StoreError`] for retryability.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EngineError {
    /// Returns true if retrying the whole operation may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, EngineError::Store(StoreError::Unavailable(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification() {
        let err = EngineError::Store(StoreError::Unavailable("down".into()));
        assert!(err.is_transient());

        let err = EngineError::Validation(ValidationError::EmptyHabitId);
        assert!(!err.is_transient());
    }
}
