//! Cumulative-return inverse solve shared by clauses 1, 3, 4 and 5.
//!
//! The exchange measures an N-day move as the *sum* of daily percentage
//! returns, tomorrow included, rounded to 2 decimals, and the clause fires only
//! when that rounded value is strictly above the threshold.
//!
//! 1. `realized = Σ r_i` over the last `N - 1` known daily returns.
//! 2. `r = T - realized`, `raw = last_close * (1 + r / 100)`.
//! 3. `target = ceil_to_tick(max(raw, 0.01))`. A realized sum more than
//!    100 points above `T` drives `raw` negative; any positive close then
//!    satisfies the threshold, so the lowest legal price is the target.
//! 4. While `round2(realized + (target - last) / last * 100) <= T`, bump one
//!    tick (tick of the current target), at most [`MAX_TICK_BUMPS`] times.
//!
//! Step 4 exists because quantization can land on a price whose return
//! rounds back down onto the threshold (e.g. 25.0048% ⇒ 25.00%).

use super::SolverMetrics;
use crate::tick::{MIN_TICK, ceil_to_tick, round2, tick_size};

/// Upper bound on one-tick corrections after the initial ceil.
pub const MAX_TICK_BUMPS: usize = 10;

/// Daily return from `prev` to `curr`, in percent.
pub fn daily_return_pct(prev: f64, curr: f64) -> f64 {
    (curr - prev) / prev * 100.0
}

/// Sum of the last `returns` daily returns, in percent.
///
/// `None` when fewer than `returns + 1` closes exist or a reference close is
/// not positive.
pub fn realized_return_sum(closes: &[f64], returns: usize) -> Option<f64> {
    if closes.len() < returns + 1 {
        return None;
    }
    let tail = &closes[closes.len() - returns - 1..];
    tail.windows(2).try_fold(0.0, |acc, pair| {
        (pair[0] > 0.0).then(|| acc + daily_return_pct(pair[0], pair[1]))
    })
}

/// Cumulative return if tomorrow closes at `price`.
pub fn total_return_pct(realized_pct: f64, last_close: f64, price: f64) -> f64 {
    realized_pct + daily_return_pct(last_close, price)
}

/// Lowest tick-aligned close for tomorrow whose rounded cumulative return is
/// strictly above `threshold_pct`.
pub fn solve_cumulative_return_target(
    realized_pct: f64,
    last_close: f64,
    threshold_pct: f64,
    metrics: &mut SolverMetrics,
) -> f64 {
    let required_next = threshold_pct - realized_pct;
    let raw = (last_close * (1.0 + required_next / 100.0)).max(MIN_TICK);
    let mut target = ceil_to_tick(raw);

    for attempt in 0..=MAX_TICK_BUMPS {
        let total = total_return_pct(realized_pct, last_close, target);
        if round2(total) > threshold_pct {
            break;
        }
        if attempt == MAX_TICK_BUMPS {
            metrics.record_bump_exhausted();
            tracing::warn!(
                "ReturnSolve bump limit reached threshold={} target={} total={:.4}",
                threshold_pct,
                target,
                total
            );
            break;
        }
        metrics.record_bump();
        target = round2(target + tick_size(target));
        tracing::trace!("ReturnSolve bump target={} total_before={:.4}", target, total);
    }
    target
}
