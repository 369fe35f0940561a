//! Group lifecycle and group leaderboard endpoints.

use crate::context::HandlerContext;
use crate::error::{ApiError, ApiResult};
use crate::identity::{require_caller, Caller};
use chrono::Utc;
use habitsync_engine::scope;
use habitsync_model::{
    generate_invite_code, normalize_invite_code, validate_group_name, CreateGroupRequest, Group,
    GroupView, JoinGroupRequest, LeaderboardPage, MemberInfo, MemberProgress,
    UpdateGroupHabitsRequest, UpdateGroupRequest, UNKNOWN_DISPLAY_NAME,
};
use habitsync_store::StoreError;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Handler for group operations.
///
/// Authorization matrix: viewing a group or its leaderboard requires
/// membership; mutating it (rename, re-emoji, tracked categories,
/// deletion) or inspecting a member's per-day detail requires the
/// admin. Joining requires only a valid invite code; leaving is for
/// non-admin members, and the admin deletes instead of leaving.
pub struct GroupHandler {
    context: Arc<HandlerContext>,
}

impl GroupHandler {
    /// Creates a new group handler.
    pub fn new(context: Arc<HandlerContext>) -> Self {
        Self { context }
    }

    /// Creates a group administered by the caller.
    pub fn create(
        &self,
        caller: Option<&Caller>,
        request: CreateGroupRequest,
    ) -> ApiResult<GroupView> {
        let caller = require_caller(caller)?;

        for _ in 0..self.context.config.invite_code_attempts {
            let code = generate_invite_code();
            if self.context.groups.find_by_invite_code(&code)?.is_some() {
                continue;
            }

            let group = Group::new(
                &request.name,
                request.emoji.as_deref(),
                &caller.uid,
                code,
            )?;
            match self.context.groups.insert(group.clone()) {
                Ok(()) => {
                    info!(group_id = %group.group_id, admin = %caller.uid, "group created");
                    return Ok(GroupView::of(&group, &caller.uid));
                }
                // Lost a race for the code; try another one.
                Err(StoreError::UniqueViolation { .. }) => continue,
                Err(err) => return Err(err.into()),
            }
        }

        warn!(admin = %caller.uid, "invite code allocation exhausted");
        Err(ApiError::Conflict(
            "could not allocate a unique invite code".into(),
        ))
    }

    /// Returns every group the caller belongs to, oldest first.
    pub fn my_groups(&self, caller: Option<&Caller>) -> ApiResult<Vec<GroupView>> {
        let caller = require_caller(caller)?;
        let groups = self.context.groups.list_for_member(&caller.uid)?;
        Ok(groups
            .iter()
            .map(|group| GroupView::of(group, &caller.uid))
            .collect())
    }

    /// Returns one group. Members only.
    pub fn get(&self, caller: Option<&Caller>, group_id: &str) -> ApiResult<GroupView> {
        let caller = require_caller(caller)?;
        let group = self.load_member_group(group_id, &caller.uid)?;
        Ok(GroupView::of(&group, &caller.uid))
    }

    /// Joins a group by invite code.
    pub fn join(
        &self,
        caller: Option<&Caller>,
        request: JoinGroupRequest,
    ) -> ApiResult<GroupView> {
        let caller = require_caller(caller)?;
        let code = normalize_invite_code(&request.invite_code);

        let mut group = self
            .context
            .groups
            .find_by_invite_code(&code)?
            .ok_or_else(|| ApiError::NotFound("invite code is not assigned".into()))?;

        if group.is_member(&caller.uid) {
            return Err(ApiError::Validation(
                "already a member of this group".into(),
            ));
        }

        group.member_uids.push(caller.uid.clone());
        group.updated_at = Utc::now();
        self.context.groups.update(group.clone())?;

        info!(group_id = %group.group_id, uid = %caller.uid, "member joined");
        Ok(GroupView::of(&group, &caller.uid))
    }

    /// Leaves a group. Non-admin members only; the admin deletes the
    /// group instead.
    pub fn leave(&self, caller: Option<&Caller>, group_id: &str) -> ApiResult<()> {
        let caller = require_caller(caller)?;
        let mut group = self.load_member_group(group_id, &caller.uid)?;

        if group.is_admin(&caller.uid) {
            return Err(ApiError::Forbidden(
                "the admin cannot leave; delete the group instead".into(),
            ));
        }

        group.member_uids.retain(|uid| uid != &caller.uid);
        group.updated_at = Utc::now();
        self.context.groups.update(group)?;
        info!(group_id, uid = %caller.uid, "member left");
        Ok(())
    }

    /// Deletes a group. Admin only.
    pub fn delete(&self, caller: Option<&Caller>, group_id: &str) -> ApiResult<()> {
        let caller = require_caller(caller)?;
        let group = self.load_admin_group(group_id, &caller.uid)?;

        self.context.groups.delete(&group.group_id)?;
        info!(group_id, "group deleted");
        Ok(())
    }

    /// Renames or re-emojis a group. Admin only.
    pub fn update_info(
        &self,
        caller: Option<&Caller>,
        group_id: &str,
        request: UpdateGroupRequest,
    ) -> ApiResult<GroupView> {
        let caller = require_caller(caller)?;
        let mut group = self.load_admin_group(group_id, &caller.uid)?;

        if let Some(name) = &request.name {
            group.name = validate_group_name(name)?;
        }
        if let Some(emoji) = &request.emoji {
            if !emoji.is_empty() {
                group.emoji = emoji.clone();
            }
        }
        group.updated_at = Utc::now();
        self.context.groups.update(group.clone())?;
        Ok(GroupView::of(&group, &caller.uid))
    }

    /// Replaces the group's tracked categories. Admin only.
    pub fn update_habits(
        &self,
        caller: Option<&Caller>,
        group_id: &str,
        request: UpdateGroupHabitsRequest,
    ) -> ApiResult<GroupView> {
        let caller = require_caller(caller)?;
        for category in &request.categories {
            category.validate()?;
        }

        let mut group = self.load_admin_group(group_id, &caller.uid)?;
        group.categories = request.categories;
        group.updated_at = Utc::now();
        self.context.groups.update(group.clone())?;

        info!(group_id, categories = group.categories.len(), "group habits updated");
        Ok(GroupView::of(&group, &caller.uid))
    }

    /// Ranks the full membership over the group's tracked habits.
    /// Members only.
    ///
    /// Membership is an explicit opt-in, so the `showOnLeaderboard`
    /// flag does not filter a group leaderboard.
    pub fn leaderboard(
        &self,
        caller: Option<&Caller>,
        group_id: &str,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> ApiResult<LeaderboardPage> {
        let caller = require_caller(caller)?;
        let group = self.load_member_group(group_id, &caller.uid)?;

        let config = &self.context.config;
        let group_scope = scope(&group);
        let page = page.unwrap_or(1);
        let page_size = page_size
            .unwrap_or(config.default_page_size)
            .min(config.max_page_size);

        Ok(self.context.ranker.rank(
            &group_scope.member_uids,
            Some(&group_scope.habit_ids),
            Some(&caller.uid),
            page,
            page_size,
        )?)
    }

    /// Returns a member's per-day detail on the group's tracked
    /// habits. Admin only.
    pub fn member_progress(
        &self,
        caller: Option<&Caller>,
        group_id: &str,
        member_uid: &str,
    ) -> ApiResult<MemberProgress> {
        let caller = require_caller(caller)?;
        let group = self.load_admin_group(group_id, &caller.uid)?;

        if !group.is_member(member_uid) {
            return Err(ApiError::NotFound(
                "member does not belong to this group".into(),
            ));
        }

        let group_scope = scope(&group);
        let entries = self
            .context
            .entries
            .list_for_user_in(member_uid, &group_scope.habit_ids)?;

        let mut day_map: BTreeMap<u32, BTreeMap<String, habitsync_model::HabitValue>> =
            BTreeMap::new();
        for entry in entries {
            day_map
                .entry(entry.day_index)
                .or_default()
                .insert(entry.habit_id, entry.value);
        }

        let profile = self.context.users.get(member_uid)?;
        let member = match profile {
            Some(p) => MemberInfo {
                uid: p.uid.clone(),
                display_name: p.display_name_or_default().to_string(),
                photo_url: p.photo_url.clone(),
            },
            None => MemberInfo {
                uid: member_uid.to_string(),
                display_name: UNKNOWN_DISPLAY_NAME.to_string(),
                photo_url: None,
            },
        };

        Ok(MemberProgress {
            member,
            categories: group.categories,
            day_map,
        })
    }

    /// Loads a group the caller must belong to.
    fn load_member_group(&self, group_id: &str, uid: &str) -> ApiResult<Group> {
        let group = self
            .context
            .groups
            .get(group_id)?
            .ok_or_else(|| ApiError::NotFound(format!("group {group_id} does not exist")))?;
        if !group.is_member(uid) {
            return Err(ApiError::Forbidden("not a member of this group".into()));
        }
        Ok(group)
    }

    /// Loads a group the caller must administer.
    fn load_admin_group(&self, group_id: &str, uid: &str) -> ApiResult<Group> {
        let group = self
            .context
            .groups
            .get(group_id)?
            .ok_or_else(|| ApiError::NotFound(format!("group {group_id} does not exist")))?;
        if !group.is_admin(uid) {
            return Err(ApiError::Forbidden(
                "only the admin may perform this operation".into(),
            ));
        }
        Ok(group)
    }
}
