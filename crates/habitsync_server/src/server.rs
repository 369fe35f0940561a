//! Main server facade.

use crate::config::ServerConfig;
use crate::context::HandlerContext;
use crate::error::ApiResult;
use crate::groups::GroupHandler;
use crate::identity::Caller;
use crate::leaderboard::LeaderboardHandler;
use crate::sync::SyncHandler;
use habitsync_model::{
    CreateGroupRequest, GroupView, JoinGroupRequest, LeaderboardPage, MemberProgress, SyncState,
    UpdateGroupHabitsRequest, UpdateGroupRequest, UploadRequest,
};
use habitsync_store::UserDirectory;
use std::sync::Arc;

/// The habitsync server.
///
/// Wires configuration, stores, engine, and handlers into a single
/// entry point. The embedding transport exposes endpoints that call the
/// matching method with the authenticated caller (or `None`).
///
/// # Example
///
/// ```
/// use habitsync_server::{Caller, HabitServer, ServerConfig};
///
/// let server = HabitServer::new(ServerConfig::default());
/// let state = server.download(Some(&Caller::new("u1"))).unwrap();
/// assert!(state.categories.is_empty());
/// ```
pub struct HabitServer {
    context: Arc<HandlerContext>,
    sync: SyncHandler,
    leaderboard: LeaderboardHandler,
    groups: GroupHandler,
}

impl HabitServer {
    /// Creates a server with fresh empty stores.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_context(Arc::new(HandlerContext::new(config)))
    }

    /// Creates a server over an existing context.
    pub fn with_context(context: Arc<HandlerContext>) -> Self {
        let sync = SyncHandler::new(Arc::clone(&context));
        let leaderboard = LeaderboardHandler::new(Arc::clone(&context));
        let groups = GroupHandler::new(Arc::clone(&context));
        Self {
            context,
            sync,
            leaderboard,
            groups,
        }
    }

    /// Handles a sync upload.
    pub fn upload(&self, caller: Option<&Caller>, request: UploadRequest) -> ApiResult<SyncState> {
        self.sync.upload(caller, request)
    }

    /// Handles a sync download.
    pub fn download(&self, caller: Option<&Caller>) -> ApiResult<SyncState> {
        self.sync.download(caller)
    }

    /// Handles a reset.
    pub fn reset(&self, caller: Option<&Caller>) -> ApiResult<()> {
        self.sync.reset(caller)
    }

    /// Handles a global leaderboard request.
    pub fn leaderboard(
        &self,
        caller: Option<&Caller>,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> ApiResult<LeaderboardPage> {
        self.leaderboard.leaderboard(caller, page, page_size)
    }

    /// Creates a group.
    pub fn create_group(
        &self,
        caller: Option<&Caller>,
        request: CreateGroupRequest,
    ) -> ApiResult<GroupView> {
        self.groups.create(caller, request)
    }

    /// Lists the caller's groups.
    pub fn my_groups(&self, caller: Option<&Caller>) -> ApiResult<Vec<GroupView>> {
        self.groups.my_groups(caller)
    }

    /// Returns one group (members only).
    pub fn group(&self, caller: Option<&Caller>, group_id: &str) -> ApiResult<GroupView> {
        self.groups.get(caller, group_id)
    }

    /// Joins a group by invite code.
    pub fn join_group(
        &self,
        caller: Option<&Caller>,
        request: JoinGroupRequest,
    ) -> ApiResult<GroupView> {
        self.groups.join(caller, request)
    }

    /// Leaves a group (non-admin members only).
    pub fn leave_group(&self, caller: Option<&Caller>, group_id: &str) -> ApiResult<()> {
        self.groups.leave(caller, group_id)
    }

    /// Deletes a group (admin only).
    pub fn delete_group(&self, caller: Option<&Caller>, group_id: &str) -> ApiResult<()> {
        self.groups.delete(caller, group_id)
    }

    /// Renames or re-emojis a group (admin only).
    pub fn update_group(
        &self,
        caller: Option<&Caller>,
        group_id: &str,
        request: UpdateGroupRequest,
    ) -> ApiResult<GroupView> {
        self.groups.update_info(caller, group_id, request)
    }

    /// Replaces a group's tracked categories (admin only).
    pub fn update_group_habits(
        &self,
        caller: Option<&Caller>,
        group_id: &str,
        request: UpdateGroupHabitsRequest,
    ) -> ApiResult<GroupView> {
        self.groups.update_habits(caller, group_id, request)
    }

    /// Handles a group leaderboard request (members only).
    pub fn group_leaderboard(
        &self,
        caller: Option<&Caller>,
        group_id: &str,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> ApiResult<LeaderboardPage> {
        self.groups.leaderboard(caller, group_id, page, page_size)
    }

    /// Returns a member's per-day detail (admin only).
    pub fn member_progress(
        &self,
        caller: Option<&Caller>,
        group_id: &str,
        member_uid: &str,
    ) -> ApiResult<MemberProgress> {
        self.groups.member_progress(caller, group_id, member_uid)
    }

    /// The user directory, for the identity subsystem to feed profiles.
    pub fn user_directory(&self) -> &Arc<UserDirectory> {
        &self.context.users
    }

    /// The shared handler context.
    pub fn context(&self) -> &Arc<HandlerContext> {
        &self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    #[test]
    fn server_wires_handlers_over_one_context() {
        let server = HabitServer::new(ServerConfig::default());
        let caller = Caller::new("u1");

        let state = server.upload(Some(&caller), UploadRequest::default()).unwrap();
        assert!(state.entries.is_empty());

        let view = server
            .create_group(
                Some(&caller),
                CreateGroupRequest {
                    name: "Crew".into(),
                    emoji: None,
                },
            )
            .unwrap();

        // The group handler sees the same stores.
        let groups = server.my_groups(Some(&caller)).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].group_id, view.group_id);
    }

    #[test]
    fn every_endpoint_requires_auth() {
        let server = HabitServer::new(ServerConfig::default());

        assert!(matches!(
            server.download(None),
            Err(ApiError::Unauthenticated(_))
        ));
        assert!(matches!(
            server.leaderboard(None, None, None),
            Err(ApiError::Unauthenticated(_))
        ));
        assert!(matches!(
            server.my_groups(None),
            Err(ApiError::Unauthenticated(_))
        ));
        assert!(matches!(
            server.reset(None),
            Err(ApiError::Unauthenticated(_))
        ));
    }
}
