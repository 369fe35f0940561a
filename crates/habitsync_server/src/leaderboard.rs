//! Global leaderboard endpoint.

use crate::context::HandlerContext;
use crate::error::ApiResult;
use crate::identity::{require_caller, Caller};
use habitsync_model::LeaderboardPage;
use std::sync::Arc;

/// Handler for the global leaderboard.
pub struct LeaderboardHandler {
    context: Arc<HandlerContext>,
}

impl LeaderboardHandler {
    /// Creates a new leaderboard handler.
    pub fn new(context: Arc<HandlerContext>) -> Self {
        Self { context }
    }

    /// Handles a leaderboard request.
    ///
    /// The population is every user with `showOnLeaderboard = true`; a
    /// user who opted out is absent even as the requester, in which
    /// case `currentUserRank` is `null`.
    pub fn leaderboard(
        &self,
        caller: Option<&Caller>,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> ApiResult<LeaderboardPage> {
        let caller = require_caller(caller)?;
        let config = &self.context.config;
        let population = self.context.users.visible_uids()?;
        let page = page.unwrap_or(1);
        let page_size = page_size
            .unwrap_or(config.default_page_size)
            .min(config.max_page_size);

        Ok(self.context.ranker.rank(
            &population,
            None,
            Some(&caller.uid),
            page,
            page_size,
        )?)
    }
}
