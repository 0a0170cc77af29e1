//! Disposition predictor over a rolling attention history.
//!
//! Three independent rule families each emit candidates
//! `{days, needed, probability, message}`:
//!
//! - **Clause-1 streak**: 3 consecutive clause-1 days.
//! - **Any-clause streak**: 5 consecutive days under any clause.
//! - **Six in ten**: 6 any-clause days inside a 10-trading-day window.
//!
//! Candidates are ranked by probability (desc) then days (asc). The optional
//! urgency filter hides candidates needing more than 2 days, but
//! `min_days_needed` is always the minimum over every candidate so callers
//! can tell "nothing urgent yet" apart from "no risk at all".
//!
//! Probabilities truncate toward zero (`2/3` ⇒ 66).

pub mod status;
pub mod streak;

pub use status::{StatusCounts, status_counts};
pub use streak::trailing_streak;

use crate::domain::HistoryWindow;

/// Clause-1 days in a row that trigger disposition.
pub const CLAUSE1_STREAK_LEN: usize = 3;
/// Any-clause days in a row that trigger disposition.
pub const ANY_STREAK_LEN: usize = 5;
/// Sliding window length for the accumulation rule.
pub const SIX_IN_TEN_WINDOW: usize = 10;
/// Hits inside the sliding window that trigger disposition.
pub const SIX_IN_TEN_HITS: usize = 6;
/// `min_days_needed` sentinel meaning "no risk".
pub const NO_RISK_DAYS: u32 = 999;
/// Urgency filter cutoff.
pub const URGENT_MAX_NEEDED: i32 = 2;

// ─── Configuration ──────────────────────────────────────────────────────

/// Probability formula for the six-in-ten rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbabilityFormula {
    /// `(6 - needed) / 6`: progress toward six hits.
    #[default]
    ProgressTowardSix,
    /// `(x - hits_required) / x`: slack left inside the x-day lookahead.
    SlackWithinWindow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PredictorConfig {
    pub probability_formula: ProbabilityFormula,
    /// Drop candidates needing more than [`URGENT_MAX_NEEDED`] days before selection.
    pub urgency_filter: bool,
}

impl PredictorConfig {
    /// Near-term warnings only.
    pub fn urgent_only() -> Self {
        Self {
            urgency_filter: true,
            ..Self::default()
        }
    }
}

// ─── Candidates ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredictionRule {
    Clause1Streak,
    AnyClauseStreak,
    SixInTen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionCandidate {
    pub rule: PredictionRule,
    /// Trading days until the rule can fire.
    pub days: u32,
    /// Qualifying days still needed; `<= 0` means already reached.
    pub needed: i32,
    pub probability: u8,
    pub message: String,
}

// ─── Outcome ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionOutcome {
    pub message: String,
    pub probability_percent: u8,
    /// Minimum qualifying days needed across all candidates; [`NO_RISK_DAYS`] if none.
    pub min_days_needed: u32,
    /// Rule behind `message`; `None` when nothing was surfaced.
    pub rule: Option<PredictionRule>,
}

impl PredictionOutcome {
    pub fn no_risk() -> Self {
        Self {
            message: String::new(),
            probability_percent: 0,
            min_days_needed: NO_RISK_DAYS,
            rule: None,
        }
    }

    pub fn is_no_risk(&self) -> bool {
        self.min_days_needed == NO_RISK_DAYS
    }

    /// A candidate was selected and its message should be shown.
    pub fn has_warning(&self) -> bool {
        self.rule.is_some()
    }
}

// ─── Evaluator ──────────────────────────────────────────────────────────

/// Predict the nearest path into disposition over the next `horizon` trading days.
pub fn predict(window: &HistoryWindow, horizon: usize, config: &PredictorConfig) -> PredictionOutcome {
    if !window.has_any_hit() {
        return PredictionOutcome::no_risk();
    }

    let mut all = candidates(window, horizon, config.probability_formula);
    let Some(min_needed) = all.iter().map(|c| c.needed.max(0) as u32).min() else {
        return PredictionOutcome::no_risk();
    };

    if config.urgency_filter {
        all.retain(|c| c.needed <= URGENT_MAX_NEEDED);
    }
    // Stable: ties keep rule order (clause-1, any streak, six-in-ten).
    all.sort_by_key(|c| (std::cmp::Reverse(c.probability), c.days));

    match all.into_iter().next() {
        Some(best) => {
            tracing::debug!(
                "Prediction rule={:?} needed={} prob={} min_needed={}",
                best.rule,
                best.needed,
                best.probability,
                min_needed
            );
            PredictionOutcome {
                message: best.message,
                probability_percent: best.probability,
                min_days_needed: min_needed,
                rule: Some(best.rule),
            }
        }
        None => PredictionOutcome {
            min_days_needed: min_needed,
            ..PredictionOutcome::no_risk()
        },
    }
}

/// Every candidate the three rule families produce, unranked.
pub fn candidates(
    window: &HistoryWindow,
    horizon: usize,
    formula: ProbabilityFormula,
) -> Vec<PredictionCandidate> {
    let mut out = Vec::new();
    out.extend(streak_candidate(
        PredictionRule::Clause1Streak,
        trailing_streak(window.clause1_flags()),
        CLAUSE1_STREAK_LEN,
        horizon,
    ));
    out.extend(streak_candidate(
        PredictionRule::AnyClauseStreak,
        trailing_streak(window.any_flags()),
        ANY_STREAK_LEN,
        horizon,
    ));
    out.extend(six_in_ten_candidates(window, horizon, formula));
    out
}

fn streak_candidate(
    rule: PredictionRule,
    streak: usize,
    target: usize,
    horizon: usize,
) -> Option<PredictionCandidate> {
    let needed = target as i32 - streak as i32;
    if needed <= 0 {
        return Some(PredictionCandidate {
            rule,
            days: 0,
            needed: 0,
            probability: 100,
            message: reached_message(rule),
        });
    }
    if needed as usize >= target || needed as usize > horizon {
        return None;
    }
    Some(PredictionCandidate {
        rule,
        days: needed as u32,
        needed,
        probability: truncated_percent(target as i32 - needed, target as i32),
        message: consecutive_message(rule, needed as u32),
    })
}

fn six_in_ten_candidates(
    window: &HistoryWindow,
    horizon: usize,
    formula: ProbabilityFormula,
) -> Vec<PredictionCandidate> {
    let mut out = Vec::new();
    for x in 1..=horizon.min(SIX_IN_TEN_WINDOW) {
        let count = window.any_hits_in_last(SIX_IN_TEN_WINDOW - x);
        let needed = SIX_IN_TEN_HITS as i32 - count as i32;
        if needed > x as i32 {
            continue;
        }
        let hits_required = needed.max(1);
        let probability = match formula {
            ProbabilityFormula::ProgressTowardSix => {
                truncated_percent(SIX_IN_TEN_HITS as i32 - needed, SIX_IN_TEN_HITS as i32)
            }
            ProbabilityFormula::SlackWithinWindow => {
                truncated_percent(x as i32 - hits_required, x as i32)
            }
        };
        let message = if needed <= 0 {
            reached_message(PredictionRule::SixInTen)
        } else if hits_required == x as i32 {
            consecutive_message(PredictionRule::SixInTen, x as u32)
        } else {
            format!("needs {hits_required} of the next {x} days on any clause to enter disposition")
        };
        out.push(PredictionCandidate {
            rule: PredictionRule::SixInTen,
            days: x as u32,
            needed,
            probability,
            message,
        });
    }
    out
}

/// `trunc(num / den * 100)` clamped to `[0, 100]`.
fn truncated_percent(num: i32, den: i32) -> u8 {
    if den <= 0 {
        return 0;
    }
    (num * 100 / den).clamp(0, 100) as u8
}

fn reached_message(rule: PredictionRule) -> String {
    match rule {
        PredictionRule::Clause1Streak => {
            "already reached: Clause 1 on 3 consecutive days, enters disposition".to_owned()
        }
        PredictionRule::AnyClauseStreak => {
            "already reached: attention on 5 consecutive days, enters disposition".to_owned()
        }
        PredictionRule::SixInTen => {
            "already reached: attention on 6 of 10 days, enters disposition".to_owned()
        }
    }
}

fn consecutive_message(rule: PredictionRule, days: u32) -> String {
    let subject = match rule {
        PredictionRule::Clause1Streak => "Clause 1",
        PredictionRule::AnyClauseStreak | PredictionRule::SixInTen => "any clause",
    };
    if days == 1 {
        format!("needs 1 more day of {subject} to enter disposition")
    } else {
        format!("needs {days} more consecutive days of {subject} to enter disposition")
    }
}
