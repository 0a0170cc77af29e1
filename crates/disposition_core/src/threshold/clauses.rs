//! Per-clause target formulas.
//!
//! | # | price axis | extra axis |
//! |---|---|---|
//! | 1 | cumulative-return solve (primary, or variant + price delta) | — |
//! | 2 | close vs. close `N-2` bars back, 30/60/90-day windows | — |
//! | 3 | cumulative-return solve | volume surge vs. 60-day average |
//! | 4 | cumulative-return solve | turnover |
//! | 5 | cumulative-return solve | broker concentration (informational) |
//! | 6 | `close * threshold / ratio` on PER and PBR | turnover and volume floor |

use super::inverse::{realized_return_sum, solve_cumulative_return_target};
use super::{ClauseTarget, SideCondition, SolverMetrics, TargetStatus, ThresholdInput};
use crate::config::{Clause1Strategy, MarketThresholds};
use crate::domain::{PriceBar, shares_to_lots_ceil};
use crate::error::{EngineError, RatioAxis};
use crate::tick::{ceil_to_tick, limit_down, limit_up, next_tick_above};

/// Precomputed series shared by every clause.
pub(crate) struct SolveContext<'a> {
    pub input: &'a ThresholdInput<'a>,
    pub cfg: &'a MarketThresholds,
    pub closes: Vec<f64>,
    pub last_close: f64,
    pub limit_up: f64,
    pub limit_down: f64,
}

impl<'a> SolveContext<'a> {
    pub fn new(input: &'a ThresholdInput<'a>, cfg: &'a MarketThresholds, last_close: f64) -> Self {
        Self {
            input,
            cfg,
            closes: input.bars.iter().map(|b| b.close).collect(),
            last_close,
            limit_up: limit_up(last_close),
            limit_down: limit_down(last_close),
        }
    }

    fn last_bar(&self) -> Option<&PriceBar> {
        self.input.bars.last()
    }

    fn market(&self) -> &'static str {
        self.cfg.market.label()
    }

    /// Known daily returns inside the cumulative window (tomorrow excluded).
    fn realized_returns(&self) -> usize {
        self.cfg.return_window_days.saturating_sub(1)
    }

    fn within_limit_up(&self, clause: u8, target: f64, metrics: &mut SolverMetrics) -> bool {
        if target <= self.limit_up {
            return true;
        }
        metrics.record_above_limit_up();
        tracing::debug!(
            "ThresholdSolve clause={} target={} above limit_up={}",
            clause,
            target,
            self.limit_up
        );
        false
    }

    fn return_target(&self, threshold_pct: f64, metrics: &mut SolverMetrics) -> Option<f64> {
        let realized = realized_return_sum(&self.closes, self.realized_returns())?;
        Some(solve_cumulative_return_target(
            realized,
            self.last_close,
            threshold_pct,
            metrics,
        ))
    }
}

// ─── Clause 1 ───────────────────────────────────────────────────────────

pub(crate) fn clause1(ctx: &SolveContext<'_>, metrics: &mut SolverMetrics) -> Option<ClauseTarget> {
    let cfg = ctx.cfg;
    let primary = ctx.return_target(cfg.clause1_return_pct, metrics)?;
    let mut target = primary;
    let mut label = format!(
        "[1] 6-day return > {}% ({})",
        cfg.clause1_return_pct,
        ctx.market()
    );

    if cfg.clause1_strategy == Clause1Strategy::LowerOfBoth {
        let returns = ctx.realized_returns();
        let variant_by_return = ctx.return_target(cfg.clause1_variant_return_pct, metrics)?;
        let reference = ctx.closes[ctx.closes.len() - 1 - returns];
        let variant_by_delta = ceil_to_tick(reference + cfg.clause1_variant_price_delta);
        let variant = variant_by_return.max(variant_by_delta);
        if variant < primary {
            target = variant;
            label = format!(
                "[1-1] 6-day return > {}% + rise >= {} ({})",
                cfg.clause1_variant_return_pct,
                cfg.clause1_variant_price_delta,
                ctx.market()
            );
        }
    }

    if !ctx.within_limit_up(1, target, metrics) {
        return None;
    }
    let status = if target < ctx.limit_down {
        TargetStatus::MustEnter {
            limit_down: ctx.limit_down,
        }
    } else {
        TargetStatus::classify(target, ctx.last_close)
    };
    Some(ClauseTarget {
        clause: 1,
        label,
        target_price: target,
        status,
        side: SideCondition::None,
    })
}

// ─── Clause 2 ───────────────────────────────────────────────────────────

pub(crate) fn clause2(ctx: &SolveContext<'_>, metrics: &mut SolverMetrics) -> Option<ClauseTarget> {
    let floor = next_tick_above(ctx.last_close);
    let mut candidates: Vec<(f64, String)> = Vec::new();

    for rule in &ctx.cfg.clause2_windows {
        let days_ago = rule.days.saturating_sub(2);
        if ctx.closes.len() < days_ago + 1 {
            continue;
        }
        let reference = ctx.closes[ctx.closes.len() - 1 - days_ago];
        let raw = reference * (1.0 + rule.appreciation_pct / 100.0);
        let target = ceil_to_tick(raw).max(floor);
        if ctx.within_limit_up(2, target, metrics) {
            candidates.push((target, format!("[{}d>{}%]", rule.days, rule.appreciation_pct)));
        }
    }

    let min_target = candidates.iter().map(|(t, _)| *t).reduce(f64::min)?;
    let windows: Vec<&str> = candidates
        .iter()
        .filter(|(t, _)| *t == min_target)
        .map(|(_, w)| w.as_str())
        .collect();

    Some(ClauseTarget {
        clause: 2,
        label: format!("[2] long-window appreciation ({}) {}", ctx.market(), windows.join(" ")),
        target_price: min_target,
        status: TargetStatus::classify(min_target, ctx.last_close),
        side: SideCondition::None,
    })
}

// ─── Clauses 3, 4, 5 ────────────────────────────────────────────────────

/// Clauses 3–5 share one return target and differ only in the extra axis.
pub(crate) fn short_return_clauses(
    ctx: &SolveContext<'_>,
    metrics: &mut SolverMetrics,
) -> Vec<ClauseTarget> {
    let cfg = ctx.cfg;
    let Some(target) = ctx.return_target(cfg.short_return_pct, metrics) else {
        return Vec::new();
    };
    if !ctx.within_limit_up(3, target, metrics) {
        return Vec::new();
    }
    let status = TargetStatus::classify(target, ctx.last_close);
    let head = format!("6-day return > {}% ({})", cfg.short_return_pct, ctx.market());

    vec![
        ClauseTarget {
            clause: 3,
            label: format!(
                "[3] {head} + volume > {}x {}-day average",
                cfg.volume_surge_multiple, cfg.volume_average_days
            ),
            target_price: target,
            status,
            side: volume_surge(ctx),
        },
        ClauseTarget {
            clause: 4,
            label: format!("[4] {head} + turnover {}%", cfg.clause4_turnover_pct),
            target_price: target,
            status,
            side: SideCondition::Turnover {
                rate_pct: cfg.clause4_turnover_pct,
                required_lots: turnover_lots(ctx.input.shares_outstanding, cfg.clause4_turnover_pct),
                floor_lots: None,
            },
        },
        ClauseTarget {
            clause: 5,
            label: format!("[5] {head} + broker share > {}%", cfg.broker_concentration_pct),
            target_price: target,
            status,
            side: SideCondition::BrokerConcentration {
                pct: cfg.broker_concentration_pct,
            },
        },
    ]
}

/// Tomorrow's volume needed to exceed the surge multiple of the average
/// over `volume_average_days`, tomorrow included.
fn volume_surge(ctx: &SolveContext<'_>) -> SideCondition {
    let prior_days = ctx.cfg.volume_average_days.saturating_sub(1);
    let bars = ctx.input.bars;
    if bars.len() < prior_days {
        return SideCondition::VolumeHistoryShort {
            required: prior_days,
            actual: bars.len(),
        };
    }
    let prior_sum: u64 = bars[bars.len() - prior_days..].iter().map(|b| b.volume).sum();
    let required_shares = (prior_sum as f64 / ctx.cfg.volume_surge_divisor()).ceil() as u64;
    let met_today = ctx.last_bar().is_some_and(|b| b.volume > required_shares);
    SideCondition::VolumeSurge {
        required_lots: shares_to_lots_ceil(required_shares),
        met_today,
    }
}

/// Lots equal to `rate_pct` of shares outstanding; `None` when unknown.
fn turnover_lots(shares_outstanding: u64, rate_pct: f64) -> Option<u64> {
    if shares_outstanding == 0 {
        return None;
    }
    let shares = (shares_outstanding as f64 * rate_pct / 100.0).ceil() as u64;
    Some(shares_to_lots_ceil(shares))
}

// ─── Clause 6 ───────────────────────────────────────────────────────────

pub(crate) fn clause6(ctx: &SolveContext<'_>) -> Option<ClauseTarget> {
    let cfg = ctx.cfg;
    let bar = ctx.last_bar()?;
    if bar.per.is_none() && bar.pbr.is_none() {
        tracing::debug!("ThresholdSolve clause=6 skipped: no valuation ratios");
        return None;
    }

    let implied = |axis: RatioAxis, ratio: Option<f64>, threshold: f64| match ratio {
        Some(r) if r.is_finite() && r > 0.0 => Some(ctx.last_close * (threshold / r)),
        _ => {
            tracing::debug!("ThresholdSolve clause=6 {}", EngineError::UndefinedRatio { axis });
            None
        }
    };
    let per_target = implied(RatioAxis::Per, bar.per, cfg.per_threshold);
    let pbr_target = implied(RatioAxis::Pbr, bar.pbr, cfg.pbr_threshold);

    let (target, status) = match per_target.into_iter().chain(pbr_target).reduce(f64::min) {
        Some(raw) => {
            let target = ceil_to_tick(raw);
            (target, TargetStatus::classify(target, ctx.last_close))
        }
        None => (0.0, TargetStatus::Unconstrained),
    };

    let reachable = matches!(status, TargetStatus::Unconstrained | TargetStatus::CanFall { .. })
        || target <= ctx.limit_up;
    if !reachable {
        tracing::debug!(
            "ThresholdSolve clause=6 target={} above limit_up={}",
            target,
            ctx.limit_up
        );
        return None;
    }

    Some(ClauseTarget {
        clause: 6,
        label: format!(
            "[6] PER>={}, PBR>={}, turnover >= {}%, volume > {} lots ({})",
            cfg.per_threshold,
            cfg.pbr_threshold,
            cfg.clause6_turnover_pct,
            cfg.clause6_volume_floor_lots,
            ctx.market()
        ),
        target_price: target,
        status,
        side: SideCondition::Turnover {
            rate_pct: cfg.clause6_turnover_pct,
            required_lots: turnover_lots(ctx.input.shares_outstanding, cfg.clause6_turnover_pct),
            floor_lots: Some(cfg.clause6_volume_floor_lots),
        },
    })
}
