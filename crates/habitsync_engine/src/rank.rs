//! Leaderboard ranking and pagination.

use crate::error::EngineResult;
use crate::stats;
use habitsync_model::{LeaderboardEntry, LeaderboardPage, UNKNOWN_DISPLAY_NAME};
use habitsync_store::{EntryStore, UserDirectory};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Default number of rows per leaderboard page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Maximum number of rows per leaderboard page.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Ranks a population of users by their aggregated statistics.
///
/// Read-only and side-effect-free: ranking shares data with concurrent
/// sync uploads but takes none of their locks, so a large ranking pass
/// neither blocks nor is blocked by individual merges.
pub struct LeaderboardRanker {
    entries: Arc<EntryStore>,
    users: Arc<UserDirectory>,
}

impl LeaderboardRanker {
    /// Creates a ranker over the given stores.
    pub fn new(entries: Arc<EntryStore>, users: Arc<UserDirectory>) -> Self {
        Self { entries, users }
    }

    /// Ranks `population` and returns the requested page.
    ///
    /// Rows are sorted by XP descending, ties broken by streak
    /// descending; residual ties keep the population's original order
    /// (stable sort, no third key). Ranks are dense and 1-based; ties
    /// do not share a rank. `page` is clamped to `>= 1` and
    /// `page_size` to `[1, MAX_PAGE_SIZE]`. `current_user_rank` is
    /// looked up in the full pre-pagination list.
    pub fn rank(
        &self,
        population: &[String],
        habit_filter: Option<&HashSet<String>>,
        requesting_uid: Option<&str>,
        page: u32,
        page_size: u32,
    ) -> EngineResult<LeaderboardPage> {
        let page = page.max(1);
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);

        if population.is_empty() {
            return Ok(LeaderboardPage::empty(page, page_size));
        }

        let mut rows = Vec::with_capacity(population.len());
        for uid in population {
            let user_entries = match habit_filter {
                Some(filter) => self.entries.list_for_user_in(uid, filter)?,
                None => self.entries.list_for_user(uid)?,
            };
            let user_stats = stats::aggregate(&user_entries);

            let profile = self.users.get(uid)?;
            let (display_name, photo_url) = match &profile {
                Some(p) => (p.display_name_or_default().to_string(), p.photo_url.clone()),
                None => (UNKNOWN_DISPLAY_NAME.to_string(), None),
            };

            rows.push(LeaderboardEntry {
                rank: 0,
                uid: uid.clone(),
                display_name,
                photo_url,
                total_xp: user_stats.total_xp,
                streak: user_stats.streak,
                completion_rate: user_stats.completion_rate,
            });
        }

        rows.sort_by(|a, b| {
            b.total_xp
                .cmp(&a.total_xp)
                .then(b.streak.cmp(&a.streak))
        });
        for (index, row) in rows.iter_mut().enumerate() {
            row.rank = (index + 1) as u32;
        }

        let total_count = rows.len();
        let total_pages = total_count.div_ceil(page_size as usize) as u32;
        let current_user_rank = requesting_uid.and_then(|uid| {
            rows.iter().find(|row| row.uid == uid).map(|row| row.rank)
        });

        let start = (page as usize - 1).saturating_mul(page_size as usize);
        let entries = rows
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .collect();

        debug!(
            population = total_count,
            page, page_size, "ranked leaderboard page"
        );

        Ok(LeaderboardPage {
            entries,
            page,
            page_size,
            total_count,
            total_pages,
            current_user_rank,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use habitsync_model::{HabitEntry, HabitValue, UserProfile};

    fn make_stores() -> (Arc<EntryStore>, Arc<UserDirectory>) {
        (Arc::new(EntryStore::new()), Arc::new(UserDirectory::new()))
    }

    fn seed_completions(entries: &EntryStore, uid: &str, count: u32) {
        let records = (0..count)
            .map(|day_index| HabitEntry {
                uid: uid.into(),
                day_index,
                habit_id: "a".into(),
                value: HabitValue::Bool(true),
                updated_at: Utc.timestamp_opt(100, 0).unwrap(),
                created_at: Utc.timestamp_opt(100, 0).unwrap(),
            })
            .collect();
        entries.upsert_many(records).unwrap();
    }

    #[test]
    fn sorts_by_xp_then_streak() {
        let (entries, users) = make_stores();
        // "low" has 1 completion, "high" has 3.
        seed_completions(&entries, "low", 1);
        seed_completions(&entries, "high", 3);

        let ranker = LeaderboardRanker::new(entries, users);
        let page = ranker
            .rank(&["low".into(), "high".into()], None, None, 1, 20)
            .unwrap();

        assert_eq!(page.entries[0].uid, "high");
        assert_eq!(page.entries[0].rank, 1);
        assert_eq!(page.entries[0].total_xp, 30);
        assert_eq!(page.entries[1].uid, "low");
        assert_eq!(page.entries[1].rank, 2);
    }

    #[test]
    fn equal_xp_breaks_by_streak() {
        let (entries, users) = make_stores();
        // Both have 2 completions (20 XP); "steady" on days 0,1
        // (streak 2), "gappy" on day 0 twice via two habits with the
        // most recent day incomplete (streak 0).
        seed_completions(&entries, "steady", 2);
        entries
            .upsert_many(vec![
                HabitEntry {
                    uid: "gappy".into(),
                    day_index: 0,
                    habit_id: "a".into(),
                    value: HabitValue::Bool(true),
                    updated_at: Utc.timestamp_opt(100, 0).unwrap(),
                    created_at: Utc.timestamp_opt(100, 0).unwrap(),
                },
                HabitEntry {
                    uid: "gappy".into(),
                    day_index: 0,
                    habit_id: "b".into(),
                    value: HabitValue::Bool(true),
                    updated_at: Utc.timestamp_opt(100, 0).unwrap(),
                    created_at: Utc.timestamp_opt(100, 0).unwrap(),
                },
                HabitEntry {
                    uid: "gappy".into(),
                    day_index: 1,
                    habit_id: "a".into(),
                    value: HabitValue::Bool(false),
                    updated_at: Utc.timestamp_opt(100, 0).unwrap(),
                    created_at: Utc.timestamp_opt(100, 0).unwrap(),
                },
            ])
            .unwrap();

        let ranker = LeaderboardRanker::new(entries, users);
        let page = ranker
            .rank(&["gappy".into(), "steady".into()], None, None, 1, 20)
            .unwrap();

        assert_eq!(page.entries[0].uid, "steady");
        assert_eq!(page.entries[1].uid, "gappy");
    }

    #[test]
    fn full_ties_keep_population_order() {
        let (entries, users) = make_stores();
        seed_completions(&entries, "first", 2);
        seed_completions(&entries, "second", 2);

        let ranker = LeaderboardRanker::new(entries, users);
        let page = ranker
            .rank(&["first".into(), "second".into()], None, None, 1, 20)
            .unwrap();

        assert_eq!(page.entries[0].uid, "first");
        assert_eq!(page.entries[0].rank, 1);
        assert_eq!(page.entries[1].uid, "second");
        assert_eq!(page.entries[1].rank, 2);
    }

    #[test]
    fn pagination_clamps_and_slices() {
        let (entries, users) = make_stores();
        let population: Vec<String> = (0..45).map(|i| format!("u{i:02}")).collect();
        for uid in &population {
            seed_completions(&entries, uid, 1);
        }

        let ranker = LeaderboardRanker::new(entries, users);

        // pageSize clamps to 50, page clamps to 1.
        let page = ranker.rank(&population, None, None, 0, 1000).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 50);
        assert_eq!(page.entries.len(), 45);

        // 45 rows at pageSize 20: 3 pages, 5 on the last.
        let page = ranker.rank(&population, None, None, 3, 20).unwrap();
        assert_eq!(page.total_count, 45);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.entries.len(), 5);

        // Past the end: empty slice, same totals.
        let page = ranker.rank(&population, None, None, 9, 20).unwrap();
        assert!(page.entries.is_empty());
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn current_user_rank_uses_full_list() {
        let (entries, users) = make_stores();
        let population: Vec<String> = (0..30).map(|i| format!("u{i:02}")).collect();
        for (index, uid) in population.iter().enumerate() {
            seed_completions(&entries, uid, 30 - index as u32);
        }

        let ranker = LeaderboardRanker::new(entries, users);
        let page = ranker
            .rank(&population, None, Some("u29"), 1, 10)
            .unwrap();

        // u29 has the fewest completions: last overall, not on page 1.
        assert_eq!(page.current_user_rank, Some(30));
        assert!(!page.entries.iter().any(|row| row.uid == "u29"));

        let page = ranker.rank(&population, None, Some("ghost"), 1, 10).unwrap();
        assert_eq!(page.current_user_rank, None);
    }

    #[test]
    fn empty_population() {
        let (entries, users) = make_stores();
        let ranker = LeaderboardRanker::new(entries, users);
        let page = ranker.rank(&[], None, None, 1, 20).unwrap();

        assert!(page.entries.is_empty());
        assert_eq!(page.total_count, 0);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.current_user_rank, None);
    }

    #[test]
    fn habit_filter_restricts_scoring() {
        let (entries, users) = make_stores();
        entries
            .upsert_many(vec![
                HabitEntry {
                    uid: "u1".into(),
                    day_index: 0,
                    habit_id: "tracked".into(),
                    value: HabitValue::Bool(true),
                    updated_at: Utc.timestamp_opt(100, 0).unwrap(),
                    created_at: Utc.timestamp_opt(100, 0).unwrap(),
                },
                HabitEntry {
                    uid: "u1".into(),
                    day_index: 0,
                    habit_id: "personal".into(),
                    value: HabitValue::Bool(true),
                    updated_at: Utc.timestamp_opt(100, 0).unwrap(),
                    created_at: Utc.timestamp_opt(100, 0).unwrap(),
                },
            ])
            .unwrap();

        let ranker = LeaderboardRanker::new(entries, users);
        let filter: HashSet<String> = ["tracked".to_string()].into_iter().collect();
        let page = ranker
            .rank(&["u1".into()], Some(&filter), None, 1, 20)
            .unwrap();
        assert_eq!(page.entries[0].total_xp, 10);

        // Empty filter matches nothing: everyone scores zero.
        let empty = HashSet::new();
        let page = ranker
            .rank(&["u1".into()], Some(&empty), None, 1, 20)
            .unwrap();
        assert_eq!(page.entries[0].total_xp, 0);
        assert_eq!(page.entries[0].completion_rate, 0.0);
    }

    #[test]
    fn missing_profile_degrades_to_defaults() {
        let (entries, users) = make_stores();
        seed_completions(&entries, "known", 1);
        seed_completions(&entries, "mystery", 1);
        users
            .insert(UserProfile {
                uid: "known".into(),
                display_name: "Amina".into(),
                photo_url: Some("https://example.test/a.png".into()),
                show_on_leaderboard: true,
            })
            .unwrap();

        let ranker = LeaderboardRanker::new(entries, users);
        let page = ranker
            .rank(&["known".into(), "mystery".into()], None, None, 1, 20)
            .unwrap();

        let known = page.entries.iter().find(|r| r.uid == "known").unwrap();
        assert_eq!(known.display_name, "Amina");

        let mystery = page.entries.iter().find(|r| r.uid == "mystery").unwrap();
        assert_eq!(mystery.display_name, UNKNOWN_DISPLAY_NAME);
        assert_eq!(mystery.photo_url, None);
    }
}
