//! Group scoping for leaderboard ranking.

use habitsync_model::Group;
use std::collections::HashSet;

/// The population and habit set a group leaderboard ranks over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupScope {
    /// The group's current membership.
    pub member_uids: Vec<String>,
    /// Flattened item IDs across the group's categories.
    ///
    /// An empty set means the group tracks nothing yet: every member
    /// scores zero, with no fallback to their personal habits.
    pub habit_ids: HashSet<String>,
}

/// Resolves the ranking scope for `group`.
pub fn scope(group: &Group) -> GroupScope {
    GroupScope {
        member_uids: group.member_uids.clone(),
        habit_ids: group.habit_ids().into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use habitsync_model::{GroupCategory, HabitItem, HabitKind};

    #[test]
    fn scope_flattens_categories() {
        let mut group = Group::new("Crew", None, "admin", "ABCDEF".into()).unwrap();
        group.member_uids.push("m1".into());
        group.categories = vec![GroupCategory {
            category_id: "c".into(),
            name: "C".into(),
            icon: "i".into(),
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
        }];

        let scope = scope(&group);
        assert_eq!(scope.member_uids, vec!["admin", "m1"]);
        assert_eq!(scope.habit_ids.len(), 2);
        assert!(scope.habit_ids.contains("a"));
    }

    #[test]
    fn empty_group_scope_is_empty_not_unfiltered() {
        let group = Group::new("Crew", None, "admin", "ABCDEF".into()).unwrap();
        let scope = scope(&group);
        assert!(scope.habit_ids.is_empty());
    }
}
