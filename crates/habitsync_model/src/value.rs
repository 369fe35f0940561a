//! Habit observation values.

use serde::{Deserialize, Serialize};

/// The recorded value of a habit on a day.
///
/// Clients submit either a boolean check-off or a non-negative count
/// (e.g. pages read). The wire form is an untagged union, so JSON
/// `true`/`false` and plain numbers both deserialize without a wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HabitValue {
    /// A checked / unchecked observation.
    Bool(bool),
    /// A counted observation.
    Count(u32),
}

impl HabitValue {
    /// Returns true if this value counts as a completed habit.
    ///
    /// `true` and any count greater than zero are completed; `false`
    /// and zero are not.
    pub fn is_completed(&self) -> bool {
        match self {
            HabitValue::Bool(b) => *b,
            HabitValue::Count(n) => *n > 0,
        }
    }
}

impl From<bool> for HabitValue {
    fn from(value: bool) -> Self {
        HabitValue::Bool(value)
    }
}

impl From<u32> for HabitValue {
    fn from(value: u32) -> Self {
        HabitValue::Count(value)
    }
}
