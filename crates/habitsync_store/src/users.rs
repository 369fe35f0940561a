//! Read-only user directory.

use crate::error::StoreResult;
use crate::memory::DocumentStore;
use habitsync_model::UserProfile;

/// Directory of user profiles, owned by the identity subsystem.
///
/// This core only reads it; [`UserDirectory::insert`] exists for the
/// collaborating subsystem (and tests) to feed profiles in.
#[derive(Debug, Default)]
pub struct UserDirectory {
    docs: DocumentStore<String, UserProfile>,
}

impl UserDirectory {
    /// Creates a new empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the profile for `uid`, if any.
    pub fn get(&self, uid: &str) -> StoreResult<Option<UserProfile>> {
        self.docs.get(&uid.to_string())
    }

    /// Inserts or replaces a profile (identity-subsystem boundary).
    pub fn insert(&self, profile: UserProfile) -> StoreResult<()> {
        self.docs
            .upsert_many(vec![(profile.uid.clone(), profile)])
    }

    /// Returns the uids of users who opted into the global leaderboard,
    /// sorted for a stable population order.
    pub fn visible_uids(&self) -> StoreResult<Vec<String>> {
        let mut uids: Vec<String> = self
            .docs
            .scan_keys(|_, profile| profile.show_on_leaderboard)?;
        uids.sort_unstable();
        Ok(uids)
    }

    /// Toggles simulated unavailability for tests.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.docs.set_unavailable(unavailable);
    }
}
