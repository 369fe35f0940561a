//! Group records and invite codes.

use crate::category::HabitItem;
use crate::error::{ValidationError, ValidationResult};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Characters used in invite codes. Confusable characters (I, O, 0, 1)
/// are excluded.
pub const INVITE_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Length of an invite code.
pub const INVITE_CODE_LEN: usize = 6;

/// Maximum group name length after trimming.
pub const GROUP_NAME_MAX: usize = 50;

/// Default emoji assigned to a group when the creator supplies none.
pub const DEFAULT_GROUP_EMOJI: &str = "👥";

/// A group-level category definition.
///
/// The flattened item IDs across a group's categories define which
/// habit IDs count toward the group leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCategory {
    /// Category identifier.
    pub category_id: String,
    /// Display name.
    pub name: String,
    /// Display icon.
    pub icon: String,
    /// Habit items tracked by the group.
    pub items: Vec<HabitItem>,
    /// Position among the group's categories.
    pub sort_order: i32,
}

impl GroupCategory {
    /// Validates the category shape, including every contained item.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.category_id.is_empty() {
            return Err(ValidationError::EmptyCategoryId);
        }
        if self.name.is_empty() {
            return Err(ValidationError::EmptyCategoryName);
        }
        for item in &self.items {
            item.validate()?;
        }
        Ok(())
    }
}

/// A social group of users ranked against a shared habit set.
///
/// Membership grows via invite-code redemption and shrinks via
/// voluntary leave (non-admin only) or deletion (admin only). The admin
/// is always a member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Server-assigned group identifier.
    pub group_id: String,
    /// Display name, trimmed, at most [`GROUP_NAME_MAX`] characters.
    pub name: String,
    /// Display emoji.
    pub emoji: String,
    /// The group's administrator.
    pub admin_uid: String,
    /// Current members, admin included, no duplicates.
    pub member_uids: Vec<String>,
    /// Unique redemption code for joining.
    pub invite_code: String,
    /// Habit categories the group tracks.
    pub categories: Vec<GroupCategory>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last mutation time.
    pub updated_at: DateTime<Utc>,
}

impl Group {
    /// Creates a group administered by `admin_uid`.
    ///
    /// The admin becomes the first member. The name is trimmed and
    /// validated; an empty emoji falls back to the default.
    pub fn new(
        name: &str,
        emoji: Option<&str>,
        admin_uid: &str,
        invite_code: String,
    ) -> ValidationResult<Self> {
        let name = validate_group_name(name)?;
        if !is_valid_invite_code(&invite_code) {
            return Err(ValidationError::BadInviteCode {
                expected: INVITE_CODE_LEN,
            });
        }
        let now = Utc::now();
        Ok(Self {
            group_id: Uuid::new_v4().to_string(),
            name,
            emoji: match emoji {
                Some(e) if !e.is_empty() => e.to_string(),
                _ => DEFAULT_GROUP_EMOJI.to_string(),
            },
            admin_uid: admin_uid.to_string(),
            member_uids: vec![admin_uid.to_string()],
            invite_code,
            categories: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Returns true if `uid` is a current member.
    pub fn is_member(&self, uid: &str) -> bool {
        self.member_uids.iter().any(|m| m == uid)
    }

    /// Returns true if `uid` is the administrator.
    pub fn is_admin(&self, uid: &str) -> bool {
        self.admin_uid == uid
    }

    /// Flattens the tracked habit item IDs across all categories.
    pub fn habit_ids(&self) -> Vec<String> {
        self.categories
            .iter()
            .flat_map(|cat| cat.items.iter().map(|item| item.id.clone()))
            .collect()
    }
}

/// Generates a random invite code from the invite alphabet.
///
/// Uniqueness across stored groups is enforced by the group store; the
/// caller retries on collision.
pub fn generate_invite_code() -> String {
    let mut rng = rand::thread_rng();
    (0..INVITE_CODE_LEN)
        .map(|_| INVITE_CODE_ALPHABET[rng.gen_range(0..INVITE_CODE_ALPHABET.len())] as char)
        .collect()
}

/// Normalizes a client-submitted invite code for redemption.
///
/// Redemption is case-insensitive; surrounding whitespace is ignored.
pub fn normalize_invite_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Returns true if `code` is a well-formed invite code.
pub fn is_valid_invite_code(code: &str) -> bool {
    code.len() == INVITE_CODE_LEN && code.bytes().all(|b| INVITE_CODE_ALPHABET.contains(&b))
}

/// Trims and validates a group name.
pub fn validate_group_name(name: &str) -> ValidationResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyGroupName);
    }
    let len = trimmed.chars().count();
    if len > GROUP_NAME_MAX {
        return Err(ValidationError::GroupNameTooLong {
            len,
            max: GROUP_NAME_MAX,
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::HabitKind;

    fn make_group() -> Group {
        Group::new("Morning Crew", None, "admin", "ABCDEF".into()).unwrap()
    }

    #[test]
    fn admin_is_first_member() {
        let group = make_group();
        assert_eq!(group.member_uids, vec!["admin".to_string()]);
        assert!(group.is_member("admin"));
        assert!(group.is_admin("admin"));
        assert_eq!(group.emoji, DEFAULT_GROUP_EMOJI);
    }

    #[test]
    fn name_is_trimmed_and_bounded() {
        let group = Group::new("  Runners  ", Some("🏃"), "a", "ABCDEF".into()).unwrap();
        assert_eq!(group.name, "Runners");
        assert_eq!(group.emoji, "🏃");

        assert_eq!(
            Group::new("   ", None, "a", "ABCDEF".into()),
            Err(ValidationError::EmptyGroupName)
        );

        let long = "x".repeat(GROUP_NAME_MAX + 1);
        assert!(matches!(
            Group::new(&long, None, "a", "ABCDEF".into()),
            Err(ValidationError::GroupNameTooLong { .. })
        ));
    }

    #[test]
    fn generated_codes_are_well_formed()  {
        for _ in 0..50 {
            let code = generate_invite_code();
            assert!(is_valid_invite_code(&code), "bad code: {code}");
        }
    }

    #[test]
    fn code_normalization() {
        assert_eq!(normalize_invite_code("  abqr34 "), "ABQR34");
        assert!(!is_valid_invite_code("ABC"));
        assert!(!is_valid_invite_code("ABCDE0")); // 0 excluded
        assert!(is_valid_invite_code("ABQR34"));
    }

    #[test]
    fn habit_ids_flatten_all_categories() {
        let mut group = make_group();
        group.categories = vec![
            GroupCategory {
                category_id: "c1".into(),
                name: "One".into(),
                icon: "1".into(),
                items: vec![
                    HabitItem {
                        id: "a".into(),
                        label: "A".into(),
                        kind: HabitKind::Boolean,
                    },
                    HabitItem {
                        id: "b".into(),
                        label: "B".into(),
                        kind: HabitKind::Number,
                    },
                ],
                sort_order: 0,
            },
            GroupCategory {
                category_id: "c2".into(),
                name: "Two".into(),
                icon: "2".into(),
                items: vec![HabitItem {
                    id: "c".into(),
                    label: "C".into(),
                    kind: HabitKind::Boolean,
                }],
                sort_order: 1,
            },
        ];

        assert_eq!(group.habit_ids(), vec!["a", "b", "c"]);
    }
}
