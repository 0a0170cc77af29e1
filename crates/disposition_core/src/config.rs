//! Per-market clause thresholds.
//!
//! TWSE and TPEx publish the same clause structure with different constants.
//! Every formula in the solver and exclusion evaluator reads its constants
//! from a [`MarketThresholds`] value; nothing is hardcoded at the call site.

use crate::domain::Market;

/// How clause 1's primary and variant targets are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clause1Strategy {
    /// Report the lower of the primary target and the variant target
    /// (variant = max(return-solved price, close 6 bars back + delta)).
    #[default]
    LowerOfBoth,
    /// Report only the primary cumulative-return target.
    PrimaryOnly,
}

/// One long-window appreciation rule of clause 2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LongWindowRule {
    /// Window length in trading days (30, 60, 90).
    pub days: usize,
    /// Appreciation over the window start that triggers, in percent.
    pub appreciation_pct: f64,
}

/// Immutable clause constants for one market.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketThresholds {
    pub market: Market,
    /// Trading days covered by the cumulative-return clauses (tomorrow included).
    pub return_window_days: usize,

    /// Clause 1: cumulative return that triggers on its own.
    pub clause1_return_pct: f64,
    /// Clause 1 variant: lower return paired with an absolute price delta.
    pub clause1_variant_return_pct: f64,
    /// Clause 1 variant: minimum rise over the close `return_window_days` bars back.
    pub clause1_variant_price_delta: f64,
    pub clause1_strategy: Clause1Strategy,

    /// Clause 2 appreciation windows.
    pub clause2_windows: [LongWindowRule; 3],

    /// Clauses 3/4/5: cumulative return paired with a volume-side condition.
    pub short_return_pct: f64,
    /// Clause 3: tomorrow's volume must exceed this multiple of the average.
    pub volume_surge_multiple: f64,
    /// Clause 3: averaging window, tomorrow included.
    pub volume_average_days: usize,
    /// Clause 4: turnover in percent of shares outstanding.
    pub clause4_turnover_pct: f64,
    /// Clause 5: single-broker share of volume, informational only.
    pub broker_concentration_pct: f64,

    /// Clause 6 valuation thresholds.
    pub per_threshold: f64,
    pub pbr_threshold: f64,
    pub clause6_turnover_pct: f64,
    pub clause6_volume_floor_lots: u64,

    /// Clause-2 exclusion A: clause 1 within the lookback and return below this.
    pub exclusion_a_return_pct: f64,
    pub exclusion_a_lookback_days: usize,
    /// Clause-2 exclusion B: clause-2 disposition within the lookback and return below this.
    pub exclusion_b_return_pct: f64,
    pub exclusion_b_lookback_days: usize,
}

impl MarketThresholds {
    pub fn listed() -> Self {
        Self {
            market: Market::Listed,
            return_window_days: 6,
            clause1_return_pct: 32.0,
            clause1_variant_return_pct: 25.0,
            clause1_variant_price_delta: 50.0,
            clause1_strategy: Clause1Strategy::LowerOfBoth,
            clause2_windows: DEFAULT_CLAUSE2_WINDOWS,
            short_return_pct: 25.0,
            volume_surge_multiple: 5.0,
            volume_average_days: 60,
            clause4_turnover_pct: 10.0,
            broker_concentration_pct: 25.0,
            per_threshold: 60.0,
            pbr_threshold: 6.0,
            clause6_turnover_pct: 5.0,
            clause6_volume_floor_lots: 3000,
            exclusion_a_return_pct: 25.0,
            exclusion_a_lookback_days: 30,
            exclusion_b_return_pct: 10.0,
            exclusion_b_lookback_days: 60,
        }
    }

    pub fn otc() -> Self {
        Self {
            market: Market::Otc,
            clause1_return_pct: 30.0,
            clause1_variant_return_pct: 23.0,
            clause1_variant_price_delta: 40.0,
            short_return_pct: 27.0,
            clause4_turnover_pct: 5.0,
            broker_concentration_pct: 20.0,
            per_threshold: 65.0,
            pbr_threshold: 4.0,
            clause6_volume_floor_lots: 2000,
            exclusion_a_return_pct: 27.0,
            ..Self::listed()
        }
    }

    pub fn for_market(market: Market) -> Self {
        match market {
            Market::Listed => Self::listed(),
            Market::Otc => Self::otc(),
        }
    }

    pub fn with_clause1_strategy(mut self, strategy: Clause1Strategy) -> Self {
        self.clause1_strategy = strategy;
        self
    }

    /// Divisor `d` such that "tomorrow's volume > multiple × average over
    /// `volume_average_days` (tomorrow included)" reduces to
    /// `volume > sum(previous days) / d`.
    ///
    /// `V > m (S + V) / n  ⇔  V (n - m) > m S  ⇔  V > S / ((n - m) / m)`;
    /// 60 days and 5× give the exchange's `S / 11`.
    pub fn volume_surge_divisor(&self) -> f64 {
        (self.volume_average_days as f64 - self.volume_surge_multiple) / self.volume_surge_multiple
    }
}

const DEFAULT_CLAUSE2_WINDOWS: [LongWindowRule; 3] = [
    LongWindowRule {
        days: 30,
        appreciation_pct: 100.0,
    },
    LongWindowRule {
        days: 60,
        appreciation_pct: 130.0,
    },
    LongWindowRule {
        days: 90,
        appreciation_pct: 160.0,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surge_divisor_matches_exchange_formula() {
        assert!((MarketThresholds::listed().volume_surge_divisor() - 11.0).abs() < 1e-12);
    }

    #[test]
    fn otc_inherits_shared_constants() {
        let otc = MarketThresholds::otc();
        assert_eq!(otc.return_window_days, 6);
        assert_eq!(otc.clause2_windows, DEFAULT_CLAUSE2_WINDOWS);
        assert_eq!(otc.exclusion_b_return_pct, 10.0);
    }
}
