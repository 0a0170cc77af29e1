//! Clause-2 exclusion carve-outs.

mod common;

use common::{approx, bars_from_closes, history};
use disposition_core::config::MarketThresholds;
use disposition_core::domain::PriceBar;
use disposition_core::error::EngineError;
use disposition_core::exclusion::{ExclusionHistory, ExclusionResult, evaluate_exclusions};

/// Last six closes `[90 × 5, 95]`: realized 5-day return ≈ 5.5556%.
fn series() -> Vec<PriceBar> {
    let mut closes = vec![50.0];
    closes.extend(std::iter::repeat_n(90.0, 27));
    closes.push(95.0);
    bars_from_closes(&closes, 1000)
}

fn both_flags() -> ExclusionHistory {
    ExclusionHistory {
        clause1_within_lookback: true,
        clause2_disposition_within_lookback: true,
    }
}

#[test]
fn test_not_applicable_without_clause2_risk() {
    let result = evaluate_exclusions(&series(), false, &both_flags(), &MarketThresholds::listed());
    assert_eq!(result, ExclusionResult::NotApplicable);
    assert!(result.lines().is_empty());
}

#[test]
fn test_needs_seven_bars() {
    let bars = bars_from_closes(&[90.0, 90.0, 90.0, 90.0, 90.0, 95.0], 1000);
    let result = evaluate_exclusions(&bars, true, &both_flags(), &MarketThresholds::listed());
    assert_eq!(
        result,
        ExclusionResult::CannotAssess(EngineError::InsufficientData { required: 7, actual: 6 })
    );
    assert_eq!(result.lines().len(), 1);
}

#[test]
fn test_boundaries_listed() {
    let result = evaluate_exclusions(&series(), true, &both_flags(), &MarketThresholds::listed());
    let report = result.report().expect("assessed");
    let realized = 5.0 / 90.0 * 100.0;
    assert!(approx(report.rule_a.boundary_price, 95.0 * (1.0 + (25.0 - realized) / 100.0)));
    assert!(approx(report.rule_b.boundary_price, 95.0 * (1.0 + (10.0 - realized) / 100.0)));
    assert!(approx(report.rule_a.boundary_price, 113.472_222_2));
    assert!(!report.rule_b.fell_today);
}

#[test]
fn test_otc_uses_its_own_return_limit() {
    let result = evaluate_exclusions(&series(), true, &both_flags(), &MarketThresholds::otc());
    let report = result.report().expect("assessed");
    assert_eq!(report.rule_a.return_limit_pct, 27.0);
    assert_eq!(report.rule_b.return_limit_pct, 10.0);
}

#[test]
fn test_rule_a_excludes_below_boundary() {
    let result = evaluate_exclusions(&series(), true, &both_flags(), &MarketThresholds::listed());
    let a = result.report().expect("assessed").rule_a;
    assert!(a.excludes(100.0));
    assert!(!a.excludes(120.0));
    assert!(!a.excludes_on_fall);
}

#[test]
fn test_rule_b_excludes_on_boundary_or_fall() {
    let result = evaluate_exclusions(&series(), true, &both_flags(), &MarketThresholds::listed());
    let b = result.report().expect("assessed").rule_b;
    assert!(b.excludes(99.0));
    assert!(!b.excludes(100.0));
    assert!(b.excludes(94.0));
}

#[test]
fn test_rule_b_today_fall_excludes_any_close() {
    let mut closes: Vec<f64> = vec![90.0; 6];
    closes.push(85.0);
    let bars = bars_from_closes(&closes, 1000);
    let result = evaluate_exclusions(&bars, true, &both_flags(), &MarketThresholds::listed());
    let report = result.report().expect("assessed");
    assert!(report.rule_b.fell_today);
    assert!(report.rule_b_condition_today());
    assert!(report.rule_b.excludes(200.0));
}

#[test]
fn test_flags_off_never_exclude() {
    let history = ExclusionHistory::default();
    let result = evaluate_exclusions(&series(), true, &history, &MarketThresholds::listed());
    let report = result.report().expect("assessed");
    assert!(!report.rule_a.excludes(50.0));
    assert!(!report.rule_b.excludes(50.0));
}

#[test]
fn test_history_from_window_uses_lookback() {
    let cfg = MarketThresholds::listed();
    let outside = ExclusionHistory::from_window(&history(&format!("1{}", ".".repeat(30))), &cfg, false);
    assert!(!outside.clause1_within_lookback);

    let inside = ExclusionHistory::from_window(&history(&format!("1{}", ".".repeat(29))), &cfg, true);
    assert!(inside.clause1_within_lookback);
    assert!(inside.clause2_disposition_within_lookback);
}

#[test]
fn test_lines_render_both_carve_outs() {
    let result = evaluate_exclusions(&series(), true, &both_flags(), &MarketThresholds::listed());
    let lines = result.lines();
    assert_eq!(lines[0], "[clause 2 exclusions]");
    assert_eq!(lines[1], "A. clause 1 within lookback: yes");
    assert_eq!(lines[2], "   and 6-day return < 25% with price < 113.47: excluded");
    assert_eq!(lines[4], "   and 6-day return < 10% with price < 99.22: excluded");
}
