//! Typed store for habit categories.

use crate::error::StoreResult;
use crate::memory::DocumentStore;
use habitsync_model::HabitCategory;

/// Store key: one category per `(uid, categoryId)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CategoryDocKey {
    uid: String,
    category_id: String,
}

/// Keyed collection of a user's habit-category definitions.
#[derive(Debug, Default)]
pub struct CategoryStore {
    docs: DocumentStore<CategoryDocKey, HabitCategory>,
}

impl CategoryStore {
    /// Creates a new empty category store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all categories for `uid`, ordered by `sortOrder`
    /// ascending (ties by `categoryId`).
    pub fn list_for_user(&self, uid: &str) -> StoreResult<Vec<HabitCategory>> {
        let mut categories = self.docs.scan(|k, _| k.uid == uid)?;
        categories.sort_by(|a, b| {
            (a.sort_order, &a.category_id).cmp(&(b.sort_order, &b.category_id))
        });
        Ok(categories)
    }

    /// Applies a full-replacement sync result in one atomic step:
    /// upserts the accepted categories and deletes the omitted ones.
    pub fn apply(
        &self,
        uid: &str,
        upserts: Vec<HabitCategory>,
        deleted_ids: &[String],
    ) -> StoreResult<()> {
        let records = upserts
            .into_iter()
            .map(|category| {
                (
                    CategoryDocKey {
                        uid: category.uid.clone(),
                        category_id: category.category_id.clone(),
                    },
                    category,
                )
            })
            .collect();
        let deletes: Vec<CategoryDocKey> = deleted_ids
            .iter()
            .map(|category_id| CategoryDocKey {
                uid: uid.to_string(),
                category_id: category_id.clone(),
            })
            .collect();
        self.docs.apply(records, &deletes)
    }

    /// Deletes every category for `uid` (bulk reset). Returns the count.
    pub fn delete_all_for_user(&self, uid: &str) -> StoreResult<usize> {
        self.docs.delete_where(|k, _| k.uid == uid)
    }

    /// Toggles simulated unavailability for tests.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.docs.set_unavailable(unavailable);
    }
}
