//! Evaluation pipeline and the JSON-line report a host hands to its UI/cache.
//!
//! One stock, one trading day:
//! `status_counts → predict → solve_thresholds → evaluate_exclusions → fingerprint`.
//!
//! The report is self-describing plain data. Each line is one JSON object,
//! tagged with [`REPORT_SCHEMA_VERSION`]; decoding rejects other versions.

use disposition_core::config::MarketThresholds;
use disposition_core::domain::{HistoryWindow, Market, PriceBar};
use disposition_core::exclusion::{ExclusionHistory, ExclusionResult, evaluate_exclusions};
use disposition_core::fingerprint::{FingerprintInput, compute_input_fingerprint, format_fingerprint};
use disposition_core::predictor::{
    PredictionOutcome, PredictionRule, PredictorConfig, StatusCounts, predict, status_counts,
};
use disposition_core::threshold::{SolverMetrics, ThresholdInput, ThresholdResult, solve_thresholds};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum ReportCodecError {
    #[error("empty report line")]
    EmptyLine,

    #[error("unsupported report schema version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("failed to encode report: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("invalid report line: {0}")]
    Decode(#[source] serde_json::Error),
}

// ─── Report ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionSummary {
    pub message: String,
    pub probability_percent: u8,
    pub min_days_needed: u32,
    /// `clause1_streak`, `any_clause_streak` or `six_in_ten`.
    pub rule: Option<String>,
}

impl From<&PredictionOutcome> for PredictionSummary {
    fn from(outcome: &PredictionOutcome) -> Self {
        Self {
            message: outcome.message.clone(),
            probability_percent: outcome.probability_percent,
            min_days_needed: outcome.min_days_needed,
            rule: outcome.rule.map(|r| rule_name(r).to_owned()),
        }
    }
}

fn rule_name(rule: PredictionRule) -> &'static str {
    match rule {
        PredictionRule::Clause1Streak => "clause1_streak",
        PredictionRule::AnyClauseStreak => "any_clause_streak",
        PredictionRule::SixInTen => "six_in_ten",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub version: u32,
    pub stock_code: String,
    /// `listed` or `otc`.
    pub market: String,
    /// Hex xxh64 of the evaluation inputs.
    pub fingerprint: String,
    pub prediction: PredictionSummary,
    pub needed_c1: u32,
    pub needed_any: u32,
    /// `false` when the solver refused (too few bars, bad close).
    pub assessed: bool,
    pub threshold_lines: Vec<String>,
    pub must_enter: bool,
    pub clause2_risk: bool,
    pub exclusion_lines: Vec<String>,
}

/// Raw inputs for one stock's evaluation.
#[derive(Debug, Clone)]
pub struct EvaluationInput<'a> {
    pub stock_code: &'a str,
    pub history: &'a HistoryWindow,
    /// Ascending by date; the last bar is today.
    pub bars: &'a [PriceBar],
    /// 0 when unknown.
    pub shares_outstanding: u64,
    /// Prediction lookahead in trading days.
    pub horizon: u32,
    /// Entered disposition via clause 2 within the carve-out B lookback.
    pub clause2_disposition_within_lookback: bool,
}

/// Run every evaluator for one stock and collect the result.
pub fn evaluate(
    input: &EvaluationInput<'_>,
    thresholds: &MarketThresholds,
    predictor: &PredictorConfig,
    metrics: &mut SolverMetrics,
) -> EvaluationReport {
    let market: Market = thresholds.market;
    let counts = status_counts(input.history);
    let outcome = predict(input.history, input.horizon as usize, predictor);

    let solved = solve_thresholds(
        &ThresholdInput {
            bars: input.bars,
            shares_outstanding: input.shares_outstanding,
            needed_c1: counts.needed_c1,
            needed_any: counts.needed_any,
        },
        thresholds,
        metrics,
    );
    let history = ExclusionHistory::from_window(
        input.history,
        thresholds,
        input.clause2_disposition_within_lookback,
    );
    let exclusions = evaluate_exclusions(input.bars, solved.clause2_risk(), &history, thresholds);

    let fingerprint = compute_input_fingerprint(&FingerprintInput {
        stock_code: input.stock_code,
        history: input.history,
        bars: input.bars,
        shares_outstanding: input.shares_outstanding,
        horizon: input.horizon,
        predictor: *predictor,
        thresholds,
        clause2_disposition_within_lookback: input.clause2_disposition_within_lookback,
    });

    EvaluationReport::new(
        input.stock_code,
        market,
        fingerprint,
        &outcome,
        counts,
        &solved,
        &exclusions,
    )
}

impl EvaluationReport {
    pub fn new(
        stock_code: &str,
        market: Market,
        fingerprint: u64,
        outcome: &PredictionOutcome,
        counts: StatusCounts,
        solved: &ThresholdResult,
        exclusions: &ExclusionResult,
    ) -> Self {
        let report = solved.report();
        Self {
            version: REPORT_SCHEMA_VERSION,
            stock_code: stock_code.to_owned(),
            market: market.as_str().to_owned(),
            fingerprint: format_fingerprint(fingerprint),
            prediction: PredictionSummary::from(outcome),
            needed_c1: counts.needed_c1,
            needed_any: counts.needed_any,
            assessed: report.is_some(),
            threshold_lines: solved.lines(),
            must_enter: report.is_some_and(|r| r.must_enter),
            clause2_risk: solved.clause2_risk(),
            exclusion_lines: exclusions.lines(),
        }
    }
}

// ─── Codec ──────────────────────────────────────────────────────────────

/// One JSON object, no trailing newline.
pub fn encode_report_line(report: &EvaluationReport) -> Result<String, ReportCodecError> {
    serde_json::to_string(report).map_err(ReportCodecError::Encode)
}

pub fn decode_report_line(line: &str) -> Result<EvaluationReport, ReportCodecError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(ReportCodecError::EmptyLine);
    }
    let report: EvaluationReport =
        serde_json::from_str(trimmed).map_err(ReportCodecError::Decode)?;
    if report.version != REPORT_SCHEMA_VERSION {
        return Err(ReportCodecError::UnsupportedVersion {
            found: report.version,
            expected: REPORT_SCHEMA_VERSION,
        });
    }
    Ok(report)
}
