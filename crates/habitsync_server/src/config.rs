//! Server configuration.

use habitsync_engine::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Configuration for the habitsync server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Leaderboard page size when the request specifies none.
    pub default_page_size: u32,
    /// Upper bound a requested page size is clamped to.
    pub max_page_size: u32,
    /// Maximum entries accepted in one upload batch.
    pub max_upload_entries: usize,
    /// Maximum categories accepted in one upload batch.
    pub max_upload_categories: usize,
    /// Attempts to allocate a unique invite code before giving up.
    pub invite_code_attempts: u32,
}

impl ServerConfig {
    /// Creates a configuration with the default limits.
    pub fn new() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            max_upload_entries: 5000,
            max_upload_categories: 200,
            invite_code_attempts: 10,
        }
    }

    /// Sets the default leaderboard page size.
    pub fn with_default_page_size(mut self, size: u32) -> Self {
        self.default_page_size = size;
        self
    }

    /// Sets the maximum upload batch sizes.
    pub fn with_upload_caps(mut self, entries: usize, categories: usize) -> Self {
        self.max_upload_entries = entries;
        self.max_upload_categories = categories;
        self
    }

    /// Sets the number of invite-code allocation attempts.
    pub fn with_invite_code_attempts(mut self, attempts: u32) -> Self {
        self.invite_code_attempts = attempts;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new()
    }
}
