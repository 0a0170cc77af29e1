//! Rolling per-trading-day attention history.

use super::clause::{ClauseSet, DailyAttentionRecord};

/// Attention flags for one trading day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryDay {
    pub has_clause1: bool,
    pub has_any: bool,
}

impl HistoryDay {
    /// `has_any` is implied by `has_clause1`.
    pub fn new(has_clause1: bool, has_any: bool) -> Self {
        Self {
            has_clause1,
            has_any: has_any || has_clause1,
        }
    }

    /// A trading day with no attention notice.
    pub fn quiet() -> Self {
        Self::default()
    }
}

impl From<ClauseSet> for HistoryDay {
    fn from(set: ClauseSet) -> Self {
        Self::new(set.has_clause1(), set.has_any())
    }
}

/// Ordered attention flags, oldest first, one entry per trading day.
///
/// The calendar owner is responsible for omitting closed days and for
/// inserting a quiet day for every trading day without a notice.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryWindow {
    days: Vec<HistoryDay>,
}

impl HistoryWindow {
    pub fn new(days: Vec<HistoryDay>) -> Self {
        Self { days }
    }

    /// Build from `(has_clause1, has_any)` pairs, oldest first.
    pub fn from_flags(flags: &[(bool, bool)]) -> Self {
        Self::new(flags.iter().map(|&(c1, any)| HistoryDay::new(c1, any)).collect())
    }

    /// Build from records already ordered by trading day.
    pub fn from_records(records: &[DailyAttentionRecord]) -> Self {
        Self::new(records.iter().map(|r| HistoryDay::from(r.clauses)).collect())
    }

    pub fn push(&mut self, day: HistoryDay) {
        self.days.push(day);
    }

    pub fn days(&self) -> &[HistoryDay] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn clause1_flags(&self) -> impl DoubleEndedIterator<Item = bool> + '_ {
        self.days.iter().map(|d| d.has_clause1)
    }

    pub fn any_flags(&self) -> impl DoubleEndedIterator<Item = bool> + '_ {
        self.days.iter().map(|d| d.has_any)
    }

    /// Any clause fired anywhere in the window.
    pub fn has_any_hit(&self) -> bool {
        self.days.iter().any(|d| d.has_any)
    }

    /// The trailing `n` days (fewer if the window is shorter).
    pub fn trailing(&self, n: usize) -> &[HistoryDay] {
        let start = self.days.len().saturating_sub(n);
        &self.days[start..]
    }

    /// Number of any-clause hits among the trailing `n` days.
    pub fn any_hits_in_last(&self, n: usize) -> usize {
        self.trailing(n).iter().filter(|d| d.has_any).count()
    }

    /// Clause 1 fired within the trailing `n` days.
    pub fn clause1_within(&self, n: usize) -> bool {
        self.trailing(n).iter().any(|d| d.has_clause1)
    }
}
