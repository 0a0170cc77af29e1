//! Clause-2 exclusion carve-outs.
//!
//! Evaluated only when the solver flags clause-2 risk. Each carve-out pairs a
//! historical lookback flag with a forward condition on tomorrow's close:
//!
//! - **A**: clause 1 fired within the lookback (30 trading days) and the
//!   6-day return stays below 25% (listed) / 27% (OTC).
//! - **B**: the stock entered disposition via clause 2 within the lookback
//!   (60 trading days) and the 6-day return stays below 10%, or the price
//!   falls day over day.
//!
//! The forward return limit is converted to a boundary price:
//! `boundary = close_T * (1 + (limit - realized) / 100)` where `realized` is
//! the sum of the last 5 daily returns ending today. The evaluator only
//! reports; it never changes disposition status.

use crate::config::MarketThresholds;
use crate::domain::{HistoryWindow, PriceBar};
use crate::error::EngineError;
use crate::threshold::realized_return_sum;

/// Bars needed: today, yesterday, and five returns back.
pub const MIN_EXCLUSION_BARS: usize = 7;

/// Historical lookback flags supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExclusionHistory {
    /// Clause 1 fired within the carve-out A lookback.
    pub clause1_within_lookback: bool,
    /// Entered disposition via clause 2 within the carve-out B lookback.
    pub clause2_disposition_within_lookback: bool,
}

impl ExclusionHistory {
    /// Derive the clause-1 flag from the attention window. The clause-2
    /// disposition flag comes from the disposition announcements, which the
    /// window does not carry.
    pub fn from_window(
        window: &HistoryWindow,
        thresholds: &MarketThresholds,
        clause2_disposition_within_lookback: bool,
    ) -> Self {
        Self {
            clause1_within_lookback: window.clause1_within(thresholds.exclusion_a_lookback_days),
            clause2_disposition_within_lookback,
        }
    }
}

/// One carve-out: historical flag plus the boundary for tomorrow's close.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarveOut {
    pub historical_flag: bool,
    pub boundary_price: f64,
    /// Forward 6-day return limit, percent.
    pub return_limit_pct: f64,
    /// Today's close.
    pub reference_close: f64,
    /// A day-over-day fall alone also excludes (carve-out B).
    pub excludes_on_fall: bool,
    /// Today's close is below yesterday's.
    pub fell_today: bool,
}

impl CarveOut {
    /// Whether a hypothetical `next_close` tomorrow would be excluded.
    pub fn excludes(&self, next_close: f64) -> bool {
        self.historical_flag
            && (next_close < self.boundary_price
                || (self.excludes_on_fall && (self.fell_today || next_close < self.reference_close)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExclusionReport {
    pub rule_a: CarveOut,
    pub rule_b: CarveOut,
}

impl ExclusionReport {
    /// Carve-out B's forward condition as of today's close.
    pub fn rule_b_condition_today(&self) -> bool {
        self.rule_b.reference_close < self.rule_b.boundary_price || self.rule_b.fell_today
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExclusionResult {
    /// No clause-2 risk, nothing to evaluate.
    NotApplicable,
    CannotAssess(EngineError),
    Assessed(ExclusionReport),
}

impl ExclusionResult {
    pub fn report(&self) -> Option<&ExclusionReport> {
        match self {
            ExclusionResult::Assessed(r) => Some(r),
            _ => None,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        match self {
            ExclusionResult::NotApplicable => Vec::new(),
            ExclusionResult::CannotAssess(err) => vec![format!("exclusions not assessed: {err}")],
            ExclusionResult::Assessed(r) => vec![
                "[clause 2 exclusions]".to_owned(),
                format!("A. clause 1 within lookback: {}", yes_no(r.rule_a.historical_flag)),
                format!(
                    "   and 6-day return < {}% with price < {:.2}: excluded",
                    r.rule_a.return_limit_pct, r.rule_a.boundary_price
                ),
                format!(
                    "B. disposition via clause 2 within lookback: {}",
                    yes_no(r.rule_b.historical_flag)
                ),
                format!(
                    "   and 6-day return < {}% with price < {:.2}: excluded",
                    r.rule_b.return_limit_pct, r.rule_b.boundary_price
                ),
                "   or price falling: excluded".to_owned(),
            ],
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

pub fn evaluate_exclusions(
    bars: &[PriceBar],
    clause2_risk: bool,
    history: &ExclusionHistory,
    thresholds: &MarketThresholds,
) -> ExclusionResult {
    if !clause2_risk {
        return ExclusionResult::NotApplicable;
    }
    if bars.len() < MIN_EXCLUSION_BARS {
        return ExclusionResult::CannotAssess(EngineError::InsufficientData {
            required: MIN_EXCLUSION_BARS,
            actual: bars.len(),
        });
    }

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let today = closes[closes.len() - 1];
    let yesterday = closes[closes.len() - 2];
    let realized = match realized_return_sum(&closes, thresholds.return_window_days.saturating_sub(1)) {
        Some(sum) if today > 0.0 => sum,
        _ => return ExclusionResult::CannotAssess(EngineError::NonPositivePrice { price: today }),
    };

    let fell_today = today < yesterday;
    let boundary = |limit_pct: f64| today * (1.0 + (limit_pct - realized) / 100.0);
    let rule_a = CarveOut {
        historical_flag: history.clause1_within_lookback,
        boundary_price: boundary(thresholds.exclusion_a_return_pct),
        return_limit_pct: thresholds.exclusion_a_return_pct,
        reference_close: today,
        excludes_on_fall: false,
        fell_today,
    };
    let rule_b = CarveOut {
        historical_flag: history.clause2_disposition_within_lookback,
        boundary_price: boundary(thresholds.exclusion_b_return_pct),
        return_limit_pct: thresholds.exclusion_b_return_pct,
        reference_close: today,
        excludes_on_fall: true,
        fell_today,
    };

    tracing::debug!(
        "Exclusion realized={:.4} boundary_a={:.2} boundary_b={:.2} hist_a={} hist_b={}",
        realized,
        rule_a.boundary_price,
        rule_b.boundary_price,
        rule_a.historical_flag,
        rule_b.historical_flag
    );
    ExclusionResult::Assessed(ExclusionReport { rule_a, rule_b })
}
