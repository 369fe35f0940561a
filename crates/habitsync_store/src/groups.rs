//! Typed store for groups.

use crate::error::{StoreError, StoreResult};
use crate::memory::DocumentStore;
use habitsync_model::Group;
use parking_lot::Mutex;

/// Keyed collection of groups with a uniqueness constraint on
/// `inviteCode`.
///
/// Writes are serialized through an internal mutex so the
/// check-then-insert enforcing invite-code uniqueness cannot interleave
/// with a racing insert; the loser of a race gets
/// [`StoreError::UniqueViolation`].
#[derive(Debug, Default)]
pub struct GroupStore {
    docs: DocumentStore<String, Group>,
    write_lock: Mutex<()>,
}

/// Constraint name reported on invite-code collisions.
const INVITE_CODE_CONSTRAINT: &str = "group.invite_code";

impl GroupStore {
    /// Creates a new empty group store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the group with `group_id`, if any.
    pub fn get(&self, group_id: &str) -> StoreResult<Option<Group>> {
        self.docs.get(&group_id.to_string())
    }

    /// Returns the group holding `invite_code`, if any.
    pub fn find_by_invite_code(&self, invite_code: &str) -> StoreResult<Option<Group>> {
        Ok(self
            .docs
            .scan(|_, g| g.invite_code == invite_code)?
            .into_iter()
            .next())
    }

    /// Returns every group `uid` belongs to, oldest first.
    pub fn list_for_member(&self, uid: &str) -> StoreResult<Vec<Group>> {
        let mut groups = self.docs.scan(|_, g| g.is_member(uid))?;
        groups.sort_by(|a, b| (a.created_at, &a.group_id).cmp(&(b.created_at, &b.group_id)));
        Ok(groups)
    }

    /// Inserts a new group, enforcing invite-code uniqueness.
    pub fn insert(&self, group: Group) -> StoreResult<()> {
        let _guard = self.write_lock.lock();
        if self.find_by_invite_code(&group.invite_code)?.is_some() {
            return Err(StoreError::UniqueViolation {
                constraint: INVITE_CODE_CONSTRAINT.into(),
            });
        }
        self.docs.upsert_many(vec![(group.group_id.clone(), group)])
    }

    /// Replaces a stored group.
    ///
    /// The invite-code uniqueness check excludes the group itself, so
    /// an unrelated-field update never conflicts with its own code.
    pub fn update(&self, group: Group) -> StoreResult<()> {
        let _guard = self.write_lock.lock();
        let holder = self.find_by_invite_code(&group.invite_code)?;
        if holder.is_some_and(|g| g.group_id != group.group_id) {
            return Err(StoreError::UniqueViolation {
                constraint: INVITE_CODE_CONSTRAINT.into(),
            });
        }
        self.docs.upsert_many(vec![(group.group_id.clone(), group)])
    }

    /// Deletes a group. Returns true if it existed.
    pub fn delete(&self, group_id: &str) -> StoreResult<bool> {
        let _guard = self.write_lock.lock();
        Ok(self.docs.delete_many(&[group_id.to_string()])? > 0)
    }

    /// Toggles simulated unavailability for tests.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.docs.set_unavailable(unavailable);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_group(name: &str, admin: &str, code: &str) -> Group {
        Group::new(name, None, admin, code.into()).unwrap()
    }

    #[test]
    fn insert_and_get() {
        let store = GroupStore::new();
        let group = make_group("Crew", "admin", "ABCDEF");
        let group_id = group.group_id.clone();

        store.insert(group).unwrap();
        let loaded = store.get(&group_id).unwrap().unwrap();
        assert_eq!(loaded.name, "Crew");
    }

    #[test]
    fn invite_code_is_unique() {
        let store = GroupStore::new();
        store.insert(make_group("One", "a", "ABCDEF")).unwrap();

        let result = store.insert(make_group("Two", "b", "ABCDEF"));
        assert!(matches!(
            result,
            Err(StoreError::UniqueViolation { .. })
        ));
    }

    #[test]
    fn update_does_not_conflict_with_self() {
        let store = GroupStore::new();
        let mut group = make_group("Crew", "admin", "ABCDEF");
        store.insert(group.clone()).unwrap();

        group.name = "Crew Renamed".into();
        store.update(group.clone()).unwrap();
        assert_eq!(
            store.get(&group.group_id).unwrap().unwrap().name,
            "Crew Renamed"
        );
    }

    #[test]
    fn list_for_member_sees_only_their_groups() {
        let store = GroupStore::new();
        let mut first = make_group("First", "a", "ABCDEF");
        first.member_uids.push("m".into());
        store.insert(first).unwrap();
        store.insert(make_group("Second", "b", "GHJKLM")).unwrap();

        let groups = store.list_for_member("m").unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "First");
    }

    #[test]
    fn find_by_invite_code() {
        let store = GroupStore::new();
        store.insert(make_group("Crew", "a", "ABCDEF")).unwrap();

        assert!(store.find_by_invite_code("ABCDEF").unwrap().is_some());
        assert!(store.find_by_invite_code("GHJKLM").unwrap().is_none());
    }

    #[test]
    fn delete_is_idempotent() {
        let store = GroupStore::new();
        let group = make_group("Crew", "a", "ABCDEF");
        let group_id = group.group_id.clone();
        store.insert(group).unwrap();

        assert!(store.delete(&group_id).unwrap());
        assert!(!store.delete(&group_id).unwrap());
    }
}
