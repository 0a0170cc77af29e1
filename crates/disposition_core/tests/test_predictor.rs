//! Disposition predictor: streak rules, six-in-ten, ranking and urgency.

mod common;

use common::history;
use disposition_core::domain::HistoryWindow;
use disposition_core::predictor::{
    NO_RISK_DAYS, PredictionRule, PredictorConfig, ProbabilityFormula, candidates, predict,
    trailing_streak,
};

fn slack() -> PredictorConfig {
    PredictorConfig {
        probability_formula: ProbabilityFormula::SlackWithinWindow,
        ..PredictorConfig::default()
    }
}

// ─── No risk ────────────────────────────────────────────────────────────

#[test]
fn test_empty_window_is_no_risk() {
    let out = predict(&HistoryWindow::default(), 3, &PredictorConfig::default());
    assert!(out.is_no_risk());
    assert_eq!(out.message, "");
    assert_eq!(out.probability_percent, 0);
    assert_eq!(out.min_days_needed, NO_RISK_DAYS);
}

#[test]
fn test_quiet_window_is_no_risk() {
    let out = predict(&history("........"), 5, &PredictorConfig::default());
    assert!(out.is_no_risk());
    assert!(!out.has_warning());
}

// ─── Streak rules ───────────────────────────────────────────────────────

#[test]
fn test_clause1_streak_already_reached() {
    let out = predict(&history("..111"), 3, &PredictorConfig::default());
    assert_eq!(out.rule, Some(PredictionRule::Clause1Streak));
    assert_eq!(out.probability_percent, 100);
    assert_eq!(out.min_days_needed, 0);
    assert!(out.message.starts_with("already reached"));
}

#[test]
fn test_clause1_one_day_away_truncates_probability() {
    let out = predict(&history("....11"), 3, &PredictorConfig::default());
    assert_eq!(out.rule, Some(PredictionRule::Clause1Streak));
    assert_eq!(out.probability_percent, 66);
    assert_eq!(out.min_days_needed, 1);
    assert_eq!(out.message, "needs 1 more day of Clause 1 to enter disposition");
}

#[test]
fn test_streak_beyond_horizon_is_not_a_candidate() {
    // Any-clause streak of 1 needs 4 more days; horizon 3 cannot reach it.
    let all = candidates(&history("..a"), 3, ProbabilityFormula::default());
    assert!(all.iter().all(|c| c.rule != PredictionRule::AnyClauseStreak));
}

#[test]
fn test_trailing_streak_counts_from_the_end() {
    assert_eq!(trailing_streak([true, false, true, true].into_iter()), 2);
    assert_eq!(trailing_streak([true, true, false].into_iter()), 0);
}

// ─── Six in ten ─────────────────────────────────────────────────────────

#[test]
fn test_six_in_ten_progress_formula_is_default() {
    let out = predict(&history("a.a.a.a.a"), 3, &PredictorConfig::default());
    assert_eq!(out.rule, Some(PredictionRule::SixInTen));
    assert_eq!(out.probability_percent, 83);
    assert_eq!(out.min_days_needed, 1);
    assert_eq!(out.message, "needs 1 more day of any clause to enter disposition");
}

#[test]
fn test_six_in_ten_slack_formula() {
    let out = predict(&history("a.a.a.a.a"), 3, &slack());
    assert_eq!(out.rule, Some(PredictionRule::SixInTen));
    assert_eq!(out.probability_percent, 33);
    assert_eq!(out.message, "needs 2 of the next 3 days on any clause to enter disposition");
    assert_eq!(out.min_days_needed, 1);
}

#[test]
fn test_six_in_ten_already_reached() {
    let out = predict(&history("aa.aa.aa"), 1, &PredictorConfig::default());
    assert_eq!(out.rule, Some(PredictionRule::SixInTen));
    assert_eq!(out.probability_percent, 100);
    assert_eq!(out.min_days_needed, 0);
    assert_eq!(out.message, "already reached: attention on 6 of 10 days, enters disposition");

    let all = candidates(&history("aa.aa.aa"), 3, ProbabilityFormula::default());
    assert!(
        all.iter()
            .filter(|c| c.rule == PredictionRule::SixInTen && c.needed <= 0)
            .all(|c| c.message.starts_with("already reached"))
    );
}

#[test]
fn test_lookahead_capped_at_window_length() {
    let all = candidates(&history("a"), 15, ProbabilityFormula::default());
    assert!(all.iter().all(|c| c.days <= 10));
}

// ─── Ranking and urgency ────────────────────────────────────────────────

#[test]
fn test_any_streak_two_days_away() {
    let out = predict(&history("aaa"), 3, &PredictorConfig::default());
    assert_eq!(out.rule, Some(PredictionRule::AnyClauseStreak));
    assert_eq!(out.probability_percent, 60);
    assert_eq!(out.message, "needs 2 more consecutive days of any clause to enter disposition");
    assert_eq!(out.min_days_needed, 2);
}

#[test]
fn test_any_streak_three_days_away_over_horizon_three() {
    let h = history("........aa");
    let out = predict(&h, 3, &PredictorConfig::default());
    assert_eq!(out.rule, Some(PredictionRule::AnyClauseStreak));
    assert_eq!(out.probability_percent, 40);
    assert_eq!(out.min_days_needed, 3);
    assert_eq!(out.message, "needs 3 more consecutive days of any clause to enter disposition");

    let all = candidates(&h, 3, ProbabilityFormula::default());
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].days, 3);
    assert_eq!(all[0].needed, 3);
}

#[test]
fn test_ranking_prefers_higher_probability() {
    // Six-in-ten needs 3 (50%), clause-1 streak needs 2 (33%).
    let out = predict(&history("aa.1"), 3, &PredictorConfig::default());
    assert_eq!(out.rule, Some(PredictionRule::SixInTen));
    assert_eq!(out.probability_percent, 50);
    assert_eq!(out.message, "needs 3 more consecutive days of any clause to enter disposition");
    assert_eq!(out.min_days_needed, 2);
}

#[test]
fn test_urgency_filter_drops_distant_candidates() {
    let out = predict(&history("aa.1"), 3, &PredictorConfig::urgent_only());
    assert_eq!(out.rule, Some(PredictionRule::Clause1Streak));
    assert_eq!(out.probability_percent, 33);
    assert_eq!(out.message, "needs 2 more consecutive days of Clause 1 to enter disposition");
    assert_eq!(out.min_days_needed, 2);
}

#[test]
fn test_urgency_filter_keeps_real_min_days_when_list_empties() {
    let out = predict(&history("a"), 5, &PredictorConfig::urgent_only());
    assert!(!out.has_warning());
    assert!(!out.is_no_risk());
    assert_eq!(out.message, "");
    assert_eq!(out.probability_percent, 0);
    assert_eq!(out.min_days_needed, 4);
}

#[test]
fn test_probabilities_stay_in_range() {
    for pattern in ["1", "11", "aaaa", "a.a.a.a.a", "aaaaaaaaaa", "1a1a1a"] {
        for formula in [ProbabilityFormula::ProgressTowardSix, ProbabilityFormula::SlackWithinWindow] {
            for c in candidates(&history(pattern), 5, formula) {
                assert!(c.probability <= 100, "{pattern} {c:?}");
            }
        }
    }
}
