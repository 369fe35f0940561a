//! Request and response shapes for the sync, leaderboard, and group
//! endpoints.

use crate::category::{CategoryUpload, HabitCategory};
use crate::entry::{EntryUpload, HabitEntry};
use crate::error::ValidationResult;
use crate::group::{Group, GroupCategory};
use crate::value::HabitValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A sync upload: the client's entry batch plus its complete current
/// category set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    /// Entries changed since the last sync (any subset is fine).
    #[serde(default)]
    pub entries: Vec<EntryUpload>,
    /// The client's complete category set; omission deletes.
    #[serde(default)]
    pub categories: Vec<CategoryUpload>,
}

impl UploadRequest {
    /// Validates every record in the batch.
    ///
    /// A single malformed record rejects the whole upload; nothing is
    /// applied partially.
    pub fn validate(&self) -> ValidationResult<()> {
        for entry in &self.entries {
            entry.validate()?;
        }
        for category in &self.categories {
            category.validate()?;
        }
        Ok(())
    }
}

/// The full authoritative state for one user after a merge or download.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncState {
    /// All entries for the user.
    pub entries: Vec<HabitEntry>,
    /// All categories for the user, ordered by `sortOrder` ascending.
    pub categories: Vec<HabitCategory>,
}

impl SyncState {
    /// Returns an empty state, as served to users with no stored data.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// One ranked row of a leaderboard. Derived per request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// Dense 1-based rank; ties get distinct successive ranks.
    pub rank: u32,
    /// Ranked user.
    pub uid: String,
    /// Display name, degraded to a default when the profile is absent.
    #[serde(rename = "displayName")]
    pub display_name: String,
    /// Avatar URL, if any.
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    /// Total experience points.
    pub total_xp: u64,
    /// Consecutive most-recent days with any completion.
    pub streak: u32,
    /// Completed / total as a two-decimal fraction.
    pub completion_rate: f64,
}

/// One page of a ranked leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardPage {
    /// Rows on this page, in rank order.
    pub entries: Vec<LeaderboardEntry>,
    /// 1-based page number after clamping.
    pub page: u32,
    /// Page size after clamping.
    pub page_size: u32,
    /// Size of the full ranked population.
    pub total_count: usize,
    /// Number of pages; zero for an empty population.
    pub total_pages: u32,
    /// The requesting user's rank in the full list, if present.
    pub current_user_rank: Option<u32>,
}

impl LeaderboardPage {
    /// Returns an empty page for an empty population.
    pub fn empty(page: u32, page_size: u32) -> Self {
        Self {
            entries: Vec::new(),
            page,
            page_size,
            total_count: 0,
            total_pages: 0,
            current_user_rank: None,
        }
    }
}

/// Request to create a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    /// Group display name.
    pub name: String,
    /// Optional display emoji; defaults when absent.
    #[serde(default)]
    pub emoji: Option<String>,
}

/// Request to join a group by invite code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGroupRequest {
    /// The redemption code, matched case-insensitively.
    pub invite_code: String,
}

/// Request to rename or re-emoji a group (admin only).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupRequest {
    /// New name, if changing.
    #[serde(default)]
    pub name: Option<String>,
    /// New emoji, if changing.
    #[serde(default)]
    pub emoji: Option<String>,
}

/// Request to replace a group's tracked categories (admin only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupHabitsRequest {
    /// The new complete category set.
    pub categories: Vec<GroupCategory>,
}

/// A group as returned to a member, with derived fields for the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupView {
    /// Group identifier.
    pub group_id: String,
    /// Display name.
    pub name: String,
    /// Display emoji.
    pub emoji: String,
    /// Administrator uid.
    pub admin_uid: String,
    /// Whether the caller is the administrator.
    pub is_admin: bool,
    /// Current membership size.
    pub member_count: usize,
    /// Redemption code for inviting others.
    pub invite_code: String,
    /// Tracked categories.
    pub categories: Vec<GroupCategory>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl GroupView {
    /// Builds the view of `group` as seen by `caller_uid`.
    pub fn of(group: &Group, caller_uid: &str) -> Self {
        Self {
            group_id: group.group_id.clone(),
            name: group.name.clone(),
            emoji: group.emoji.clone(),
            admin_uid: group.admin_uid.clone(),
            is_admin: group.is_admin(caller_uid),
            member_count: group.member_uids.len(),
            invite_code: group.invite_code.clone(),
            categories: group.categories.clone(),
            created_at: group.created_at,
        }
    }
}

/// Identity and display info for a member, as embedded in progress
/// responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInfo {
    /// Member uid.
    pub uid: String,
    /// Display name, degraded to a default when the profile is absent.
    #[serde(rename = "displayName")]
    pub display_name: String,
    /// Avatar URL, if any.
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
}

/// A member's per-day habit detail on the group's tracked habits
/// (admin only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberProgress {
    /// The inspected member.
    pub member: MemberInfo,
    /// The group's tracked categories, for rendering.
    pub categories: Vec<GroupCategory>,
    /// dayIndex → habitId → recorded value.
    pub day_map: BTreeMap<u32, BTreeMap<String, HabitValue>>,
}
