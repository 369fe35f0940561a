//! Shared context for request handlers.

use crate::config::ServerConfig;
use habitsync_engine::{LeaderboardRanker, MergeCoordinator};
use habitsync_store::{CategoryStore, EntryStore, GroupStore, UserDirectory};
use std::sync::Arc;

/// Context shared by all handlers: configuration, stores, and the
/// engine components built over them.
pub struct HandlerContext {
    /// Server configuration.
    pub config: ServerConfig,
    /// Habit entry store.
    pub entries: Arc<EntryStore>,
    /// Habit category store.
    pub categories: Arc<CategoryStore>,
    /// Group store.
    pub groups: Arc<GroupStore>,
    /// Read-only user directory.
    pub users: Arc<UserDirectory>,
    /// Merge coordinator (the only writer of entries/categories).
    pub merge: Arc<MergeCoordinator>,
    /// Leaderboard ranker (read-only).
    pub ranker: Arc<LeaderboardRanker>,
}

impl HandlerContext {
    /// Creates a context with fresh empty stores.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_stores(
            config,
            Arc::new(EntryStore::new()),
            Arc::new(CategoryStore::new()),
            Arc::new(GroupStore::new()),
            Arc::new(UserDirectory::new()),
        )
    }

    /// Creates a context over existing stores.
    pub fn with_stores(
        config: ServerConfig,
        entries: Arc<EntryStore>,
        categories: Arc<CategoryStore>,
        groups: Arc<GroupStore>,
        users: Arc<UserDirectory>,
    ) -> Self {
        let merge = Arc::new(MergeCoordinator::new(
            Arc::clone(&entries),
            Arc::clone(&categories),
        ));
        let ranker = Arc::new(LeaderboardRanker::new(
            Arc::clone(&entries),
            Arc::clone(&users),
        ));
        Self {
            config,
            entries,
            categories,
            groups,
            users,
            merge,
            ranker,
        }
    }
}

impl std::fmt::Debug for HandlerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
