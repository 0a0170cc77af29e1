//! Threshold solver: tomorrow's trigger price for each attention clause.
//!
//! For each clause formula the solver computes the exact closing price,
//! quantized to the legal tick grid, at which the formula fires tomorrow.
//! Targets above today's limit-up price are dropped. Surviving targets are
//! grouped by how close the stock is to disposition:
//!
//! - `needed <= 1` ⇒ enters disposition tomorrow
//! - `needed <= 2` ⇒ one step away
//! - otherwise suppressed
//!
//! Clause 1 is classified with `needed_c1`, clauses 2–6 with `needed_any`.
//! Fewer than [`MIN_BARS`] bars is `InsufficientData`.

pub mod clauses;
pub mod format;
pub mod inverse;

pub use inverse::{
    MAX_TICK_BUMPS, daily_return_pct, realized_return_sum, solve_cumulative_return_target,
    total_return_pct,
};

use crate::config::MarketThresholds;
use crate::domain::PriceBar;
use crate::error::EngineError;

/// Minimum bars before the solver will assess anything.
pub const MIN_BARS: usize = 5;

// ─── Input ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ThresholdInput<'a> {
    /// Ascending by date; the last bar is today.
    pub bars: &'a [PriceBar],
    /// Shares outstanding; 0 means unknown and disables turnover targets.
    pub shares_outstanding: u64,
    /// Clause-1 days still needed for disposition.
    pub needed_c1: u32,
    /// Any-clause days still needed for disposition.
    pub needed_any: u32,
}

// ─── Targets ────────────────────────────────────────────────────────────

/// Where a target price sits relative to today's close.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetStatus {
    /// Tomorrow must close at least `pct` percent higher.
    NeedsRise { pct: f64 },
    /// Already satisfied; tomorrow may drop by `pct` (<= 0) and still trigger.
    CanFall { pct: f64 },
    /// Target lies below tomorrow's limit-down price: triggers regardless.
    MustEnter { limit_down: f64 },
    /// No valuation axis constrains the price (clause 6 only).
    Unconstrained,
}

impl TargetStatus {
    fn classify(target: f64, last_close: f64) -> Self {
        let pct = (target - last_close) / last_close * 100.0;
        if last_close >= target {
            TargetStatus::CanFall { pct }
        } else {
            TargetStatus::NeedsRise { pct }
        }
    }
}

/// Non-price condition attached to a clause.
#[derive(Debug, Clone, PartialEq)]
pub enum SideCondition {
    None,
    /// Clause 3: tomorrow's volume must exceed `required_lots`.
    VolumeSurge { required_lots: u64, met_today: bool },
    /// Clause 3 volume axis needs more history than available.
    VolumeHistoryShort { required: usize, actual: usize },
    /// Turnover requirement; `required_lots == None` means shares outstanding unknown.
    Turnover {
        rate_pct: f64,
        required_lots: Option<u64>,
        floor_lots: Option<u64>,
    },
    /// Clause 5: not derivable from price/volume data.
    BrokerConcentration { pct: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClauseTarget {
    /// Clause number, 1..=6.
    pub clause: u8,
    pub label: String,
    /// Tick-aligned trigger price; `0.0` when [`TargetStatus::Unconstrained`].
    pub target_price: f64,
    pub status: TargetStatus,
    pub side: SideCondition,
}

/// Urgency bucket a target is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetGroup {
    EntersDisposition,
    OneStepAway,
}

impl TargetGroup {
    pub fn for_needed(needed: u32) -> Option<Self> {
        match needed {
            0 | 1 => Some(TargetGroup::EntersDisposition),
            2 => Some(TargetGroup::OneStepAway),
            _ => None,
        }
    }
}

// ─── Result ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdReport {
    pub last_close: f64,
    pub limit_up: f64,
    pub limit_down: f64,
    pub disposition: Vec<ClauseTarget>,
    pub one_step_away: Vec<ClauseTarget>,
    /// Clause 1 fires even at limit-down *and* one more clause-1 day enters
    /// disposition (`needed_c1 <= 1`); the one-step-away group is then
    /// cleared. With `needed_c1 == 2` a below-limit-down clause-1 target is
    /// only reported under one-step-away and this stays `false`.
    pub must_enter: bool,
    /// Clause 2 would put the stock into disposition tomorrow.
    pub clause2_risk: bool,
}

impl ThresholdReport {
    /// Every reported target, disposition group first.
    pub fn targets(&self) -> impl Iterator<Item = &ClauseTarget> {
        self.disposition.iter().chain(self.one_step_away.iter())
    }

    pub fn target_for(&self, clause: u8) -> Option<&ClauseTarget> {
        self.targets().find(|t| t.clause == clause)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ThresholdResult {
    Assessed(ThresholdReport),
    /// Rendered distinctly from "assessed, no risk".
    CannotAssess(EngineError),
}

impl ThresholdResult {
    pub fn clause2_risk(&self) -> bool {
        matches!(self, ThresholdResult::Assessed(r) if r.clause2_risk)
    }

    pub fn report(&self) -> Option<&ThresholdReport> {
        match self {
            ThresholdResult::Assessed(r) => Some(r),
            ThresholdResult::CannotAssess(_) => None,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        match self {
            ThresholdResult::Assessed(r) => format::report_lines(r),
            ThresholdResult::CannotAssess(err) => vec![err.to_string()],
        }
    }
}

// ─── Metrics ────────────────────────────────────────────────────────────

/// Observability counters for the threshold solver. Caller-owned.
#[derive(Debug, Default)]
pub struct SolverMetrics {
    solves_total: u64,
    cannot_assess_total: u64,
    above_limit_up_total: u64,
    bump_total: u64,
    bump_exhausted_total: u64,
}

impl SolverMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn solves_total(&self) -> u64 {
        self.solves_total
    }

    pub fn cannot_assess_total(&self) -> u64 {
        self.cannot_assess_total
    }

    /// Targets dropped for exceeding the limit-up price.
    pub fn above_limit_up_total(&self) -> u64 {
        self.above_limit_up_total
    }

    /// One-tick corrections applied by the return solve.
    pub fn bump_total(&self) -> u64 {
        self.bump_total
    }

    pub fn bump_exhausted_total(&self) -> u64 {
        self.bump_exhausted_total
    }

    pub(crate) fn record_above_limit_up(&mut self) {
        self.above_limit_up_total += 1;
    }

    pub(crate) fn record_bump(&mut self) {
        self.bump_total += 1;
    }

    pub(crate) fn record_bump_exhausted(&mut self) {
        self.bump_exhausted_total += 1;
    }
}

// ─── Solver ─────────────────────────────────────────────────────────────

/// Solve every clause for tomorrow.
pub fn solve_thresholds(
    input: &ThresholdInput<'_>,
    thresholds: &MarketThresholds,
    metrics: &mut SolverMetrics,
) -> ThresholdResult {
    metrics.solves_total += 1;

    let Some(last_bar) = input.bars.last().filter(|_| input.bars.len() >= MIN_BARS) else {
        metrics.cannot_assess_total += 1;
        return ThresholdResult::CannotAssess(EngineError::InsufficientData {
            required: MIN_BARS,
            actual: input.bars.len(),
        });
    };
    let last_close = last_bar.close;
    if !last_close.is_finite() || last_close <= 0.0 {
        metrics.cannot_assess_total += 1;
        return ThresholdResult::CannotAssess(EngineError::NonPositivePrice { price: last_close });
    }

    let ctx = clauses::SolveContext::new(input, thresholds, last_close);
    let mut report = ThresholdReport {
        last_close,
        limit_up: ctx.limit_up,
        limit_down: ctx.limit_down,
        disposition: Vec::new(),
        one_step_away: Vec::new(),
        must_enter: false,
        clause2_risk: false,
    };

    if let Some(t1) = clauses::clause1(&ctx, metrics) {
        if matches!(t1.status, TargetStatus::MustEnter { .. })
            && TargetGroup::for_needed(input.needed_c1) == Some(TargetGroup::EntersDisposition)
        {
            report.must_enter = true;
        }
        place(&mut report, t1, input.needed_c1);
    }
    if let Some(t2) = clauses::clause2(&ctx, metrics) {
        place(&mut report, t2, input.needed_any);
    }
    for target in clauses::short_return_clauses(&ctx, metrics) {
        place(&mut report, target, input.needed_any);
    }
    if let Some(t6) = clauses::clause6(&ctx) {
        place(&mut report, t6, input.needed_any);
    }

    if report.must_enter {
        report.one_step_away.clear();
    }
    report.clause2_risk = report.disposition.iter().any(|t| t.clause == 2);

    tracing::debug!(
        "ThresholdSolve market={} last_close={} limit_up={} disposition={} one_step={} clause2_risk={}",
        thresholds.market.as_str(),
        last_close,
        report.limit_up,
        report.disposition.len(),
        report.one_step_away.len(),
        report.clause2_risk
    );
    ThresholdResult::Assessed(report)
}

fn place(report: &mut ThresholdReport, target: ClauseTarget, needed: u32) {
    match TargetGroup::for_needed(needed) {
        Some(TargetGroup::EntersDisposition) => report.disposition.push(target),
        Some(TargetGroup::OneStepAway) => report.one_step_away.push(target),
        None => tracing::debug!(
            "ThresholdSolve clause={} suppressed needed={}",
            target.clause,
            needed
        ),
    }
}
