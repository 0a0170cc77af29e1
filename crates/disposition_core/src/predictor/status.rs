//! Days-remaining counters fed to the threshold solver.
//!
//! - `needed_c1 = max(0, 3 - clause1_streak)`
//! - `needed_any = min(max(0, 5 - any_streak), max(1, 6 - hits_in_last_9))`
//! - empty history: `(3, 5)`

use super::streak::trailing_streak;
use super::{ANY_STREAK_LEN, CLAUSE1_STREAK_LEN, SIX_IN_TEN_HITS, SIX_IN_TEN_WINDOW};
use crate::domain::HistoryWindow;

/// How many more qualifying days each disposition path still needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCounts {
    /// Clause-1 days still needed (0 = streak already complete).
    pub needed_c1: u32,
    /// Any-clause days still needed, the nearer of the 5-streak and 6-in-10 paths.
    pub needed_any: u32,
}

impl Default for StatusCounts {
    fn default() -> Self {
        Self {
            needed_c1: CLAUSE1_STREAK_LEN as u32,
            needed_any: ANY_STREAK_LEN as u32,
        }
    }
}

pub fn status_counts(window: &HistoryWindow) -> StatusCounts {
    if window.is_empty() {
        return StatusCounts::default();
    }

    let streak_c1 = trailing_streak(window.clause1_flags());
    let needed_c1 = CLAUSE1_STREAK_LEN.saturating_sub(streak_c1);

    let streak_any = trailing_streak(window.any_flags());
    let needed_any_streak = ANY_STREAK_LEN.saturating_sub(streak_any);

    // Tomorrow closes a 10-day window whose other 9 days are already known.
    let hits_last_9 = window.any_hits_in_last(SIX_IN_TEN_WINDOW - 1);
    let needed_accumulation = SIX_IN_TEN_HITS.saturating_sub(hits_last_9).max(1);

    StatusCounts {
        needed_c1: needed_c1 as u32,
        needed_any: needed_any_streak.min(needed_accumulation) as u32,
    }
}
