//! Sync endpoints: upload, download, reset.

use crate::context::HandlerContext;
use crate::error::{ApiError, ApiResult};
use crate::identity::{require_caller, Caller};
use habitsync_model::{SyncState, UploadRequest, ValidationError};
use std::sync::Arc;
use tracing::info;

/// Handler for the sync endpoints.
pub struct SyncHandler {
    context: Arc<HandlerContext>,
}

impl SyncHandler {
    /// Creates a new sync handler.
    pub fn new(context: Arc<HandlerContext>) -> Self {
        Self { context }
    }

    /// Handles an upload: merges the batch and returns the full
    /// authoritative post-merge state.
    pub fn upload(
        &self,
        caller: Option<&Caller>,
        request: UploadRequest,
    ) -> ApiResult<SyncState> {
        let caller = require_caller(caller)?;
        let config = &self.context.config;

        if request.entries.len() > config.max_upload_entries {
            return Err(ApiError::from(ValidationError::BatchTooLarge {
                count: request.entries.len(),
                max: config.max_upload_entries,
            }));
        }
        if request.categories.len() > config.max_upload_categories {
            return Err(ApiError::from(ValidationError::BatchTooLarge {
                count: request.categories.len(),
                max: config.max_upload_categories,
            }));
        }

        let state = self
            .context
            .merge
            .merge(&caller.uid, request.entries, request.categories)?;
        Ok(state)
    }

    /// Handles a download: the full current state for the caller.
    ///
    /// A user with no stored data gets an empty, well-formed state.
    pub fn download(&self, caller: Option<&Caller>) -> ApiResult<SyncState> {
        let caller = require_caller(caller)?;
        Ok(self.context.merge.download(&caller.uid)?)
    }

    /// Handles a reset: deletes all entries and categories for the
    /// caller. Idempotent; a second reset is a no-op success.
    pub fn reset(&self, caller: Option<&Caller>) -> ApiResult<()> {
        let caller = require_caller(caller)?;
        self.context.merge.reset(&caller.uid)?;
        info!(uid = %caller.uid, "user state reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use chrono::{TimeZone, Utc};
    use habitsync_model::{EntryUpload, HabitValue};

    fn make_handler(config: ServerConfig) -> SyncHandler {
        SyncHandler::new(Arc::new(HandlerContext::new(config)))
    }

    fn entry_upload(day_index: u32, habit_id: &str) -> EntryUpload {
        EntryUpload {
            day_index,
            habit_id: habit_id.into(),
            value: HabitValue::Bool(true),
            updated_at: Utc.timestamp_opt(100, 0).unwrap(),
        }
    }

    #[test]
    fn upload_requires_auth() {
        let handler = make_handler(ServerConfig::default());
        let result = handler.upload(None, UploadRequest::default());
        assert!(matches!(result, Err(ApiError::Unauthenticated(_))));
    }

    #[test]
    fn upload_returns_full_state() {
        let handler = make_handler(ServerConfig::default());
        let caller = Caller::new("u1");

        let state = handler
            .upload(
                Some(&caller),
                UploadRequest {
                    entries: vec![entry_upload(0, "a")],
                    categories: vec![],
                },
            )
            .unwrap();
        assert_eq!(state.entries.len(), 1);

        // A later partial upload still returns everything.
        let state = handler
            .upload(
                Some(&caller),
                UploadRequest {
                    entries: vec![entry_upload(1, "a")],
                    categories: vec![],
                },
            )
            .unwrap();
        assert_eq!(state.entries.len(), 2);
    }

    #[test]
    fn oversized_batch_is_rejected() {
        let handler = make_handler(ServerConfig::new().with_upload_caps(2, 2));
        let caller = Caller::new("u1");

        let result = handler.upload(
            Some(&caller),
            UploadRequest {
                entries: (0..3).map(|i| entry_upload(i, "a")).collect(),
                categories: vec![],
            },
        );
        assert!(matches!(result, Err(ApiError::Validation(_))));

        // Nothing was applied.
        let state = handler.download(Some(&caller)).unwrap();
        assert!(state.entries.is_empty());
    }

    #[test]
    fn download_without_data_is_empty() {
        let handler = make_handler(ServerConfig::default());
        let state = handler.download(Some(&Caller::new("new-user"))).unwrap();
        assert_eq!(state, SyncState::empty());
    }

    #[test]
    fn reset_twice_succeeds() {
        let handler = make_handler(ServerConfig::default());
        let caller = Caller::new("u1");
        handler
            .upload(
                Some(&caller),
                UploadRequest {
                    entries: vec![entry_upload(0, "a")],
                    categories: vec![],
                },
            )
            .unwrap();

        handler.reset(Some(&caller)).unwrap();
        handler.reset(Some(&caller)).unwrap();
        assert!(handler.download(Some(&caller)).unwrap().entries.is_empty());
    }
}
