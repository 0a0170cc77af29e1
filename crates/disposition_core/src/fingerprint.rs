//! Content fingerprint of one evaluation's inputs.
//!
//! `fingerprint = xxhash64(stock_code + history + bars + shares + horizon + predictor + thresholds + clause2_flag)`
//!
//! Every input that can change an evaluation's output is hashed, so a host
//! can key its result cache by content. Prices and ratios enter as integer
//! hundredths and volumes as integer shares; absent ratios get their own
//! marker byte. Threshold constants are hashed by their exact bit patterns.
//! No wall-clock input.

use xxhash_rust::xxh64::xxh64;

use crate::config::{Clause1Strategy, MarketThresholds};
use crate::domain::{HistoryWindow, PriceBar};
use crate::predictor::{PredictorConfig, ProbabilityFormula};

const SEP: u8 = 0xFF;
const ABSENT: u8 = 0x00;
const PRESENT: u8 = 0x01;

#[derive(Debug, Clone)]
pub struct FingerprintInput<'a> {
    pub stock_code: &'a str,
    pub history: &'a HistoryWindow,
    pub bars: &'a [PriceBar],
    pub shares_outstanding: u64,
    /// Prediction lookahead in trading days.
    pub horizon: u32,
    pub predictor: PredictorConfig,
    /// Thresholds in use; also supplies the market.
    pub thresholds: &'a MarketThresholds,
    /// Entered disposition via clause 2 within the carve-out B lookback.
    pub clause2_disposition_within_lookback: bool,
}

/// Value in integer hundredths, rounded half away from zero.
fn hundredths(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

fn push_ratio(buf: &mut Vec<u8>, ratio: Option<f64>) {
    match ratio {
        Some(r) => {
            buf.push(PRESENT);
            buf.extend_from_slice(&hundredths(r).to_le_bytes());
        }
        None => buf.push(ABSENT),
    }
}

fn push_f64(buf: &mut Vec<u8>, value: f64) {
    buf.extend_from_slice(&value.to_bits().to_le_bytes());
}

fn push_count(buf: &mut Vec<u8>, value: usize) {
    buf.extend_from_slice(&(value as u64).to_le_bytes());
}

fn push_thresholds(buf: &mut Vec<u8>, t: &MarketThresholds) {
    buf.extend_from_slice(t.market.as_str().as_bytes());
    buf.push(SEP);
    push_count(buf, t.return_window_days);
    push_f64(buf, t.clause1_return_pct);
    push_f64(buf, t.clause1_variant_return_pct);
    push_f64(buf, t.clause1_variant_price_delta);
    buf.push(match t.clause1_strategy {
        Clause1Strategy::LowerOfBoth => 0,
        Clause1Strategy::PrimaryOnly => 1,
    });
    for rule in &t.clause2_windows {
        push_count(buf, rule.days);
        push_f64(buf, rule.appreciation_pct);
    }
    push_f64(buf, t.short_return_pct);
    push_f64(buf, t.volume_surge_multiple);
    push_count(buf, t.volume_average_days);
    push_f64(buf, t.clause4_turnover_pct);
    push_f64(buf, t.broker_concentration_pct);
    push_f64(buf, t.per_threshold);
    push_f64(buf, t.pbr_threshold);
    push_f64(buf, t.clause6_turnover_pct);
    buf.extend_from_slice(&t.clause6_volume_floor_lots.to_le_bytes());
    push_f64(buf, t.exclusion_a_return_pct);
    push_count(buf, t.exclusion_a_lookback_days);
    push_f64(buf, t.exclusion_b_return_pct);
    push_count(buf, t.exclusion_b_lookback_days);
}

pub fn compute_input_fingerprint(input: &FingerprintInput<'_>) -> u64 {
    let mut buf = Vec::with_capacity(256 + input.history.len() + input.bars.len() * 34);

    buf.extend_from_slice(input.stock_code.as_bytes());
    buf.push(SEP);
    // Two bits per day: clause 1, any clause.
    for day in input.history.days() {
        buf.push((u8::from(day.has_clause1) << 1) | u8::from(day.has_any));
    }
    buf.push(SEP);
    for bar in input.bars {
        buf.extend_from_slice(&hundredths(bar.close).to_le_bytes());
        buf.extend_from_slice(&bar.volume.to_le_bytes());
        push_ratio(&mut buf, bar.per);
        push_ratio(&mut buf, bar.pbr);
    }
    buf.push(SEP);
    buf.extend_from_slice(&input.shares_outstanding.to_le_bytes());
    buf.push(SEP);
    buf.extend_from_slice(&input.horizon.to_le_bytes());
    buf.push(match input.predictor.probability_formula {
        ProbabilityFormula::ProgressTowardSix => 0,
        ProbabilityFormula::SlackWithinWindow => 1,
    });
    buf.push(u8::from(input.predictor.urgency_filter));
    buf.push(SEP);
    push_thresholds(&mut buf, input.thresholds);
    buf.push(SEP);
    buf.push(u8::from(input.clause2_disposition_within_lookback));

    xxh64(&buf, 0)
}

/// Fixed-width lowercase hex.
pub fn format_fingerprint(hash: u64) -> String {
    format!("{hash:016x}")
}
