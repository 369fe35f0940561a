//! Statistics aggregation: XP, streak, completion rate.

use habitsync_model::HabitEntry;
use std::collections::BTreeMap;

/// Experience points awarded per completed habit observation.
pub const XP_PER_HABIT: u64 = 10;

/// Derived statistics over one user's entry set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UserStats {
    /// Total experience points.
    pub total_xp: u64,
    /// Consecutive most-recent days with at least one completion.
    pub streak: u32,
    /// Completed / total observations, rounded to two decimals.
    pub completion_rate: f64,
}

/// Aggregates statistics over a user's complete entry set (or a
/// habit-filtered subset, for group scoring).
///
/// Entries are grouped by day. The streak walks distinct days from the
/// most recent downwards, counting days with any completion and
/// stopping at the first day with none; days with no entries at all are
/// absent from the grouping and are skipped, not treated as breaks.
pub fn aggregate(entries: &[HabitEntry]) -> UserStats {
    if entries.is_empty() {
        return UserStats::default();
    }

    // dayIndex -> (completed, total)
    let mut days: BTreeMap<u32, (u64, u64)> = BTreeMap::new();
    for entry in entries {
        let day = days.entry(entry.day_index).or_insert((0, 0));
        day.1 += 1;
        if entry.value.is_completed() {
            day.0 += 1;
        }
    }

    let total_completed: u64 = days.values().map(|(completed, _)| completed).sum();
    let total_habits: u64 = days.values().map(|(_, total)| total).sum();

    let mut streak = 0u32;
    for (completed, _) in days.values().rev() {
        if *completed > 0 {
            streak += 1;
        } else {
            break;
        }
    }

    let completion_rate = if total_habits == 0 {
        0.0
    } else {
        round_two_decimals(total_completed as f64 / total_habits as f64)
    };

    UserStats {
        total_xp: total_completed * XP_PER_HABIT,
        streak,
        completion_rate,
    }
}

fn round_two_decimals(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
