#![forbid(unsafe_code)]

pub mod config;
pub mod domain;
pub mod error;
pub mod exclusion;
pub mod fingerprint;
pub mod predictor;
pub mod threshold;
pub mod tick;

pub use config::{Clause1Strategy, LongWindowRule, MarketThresholds};
pub use error::{EngineError, RatioAxis};
pub use exclusion::{
    CarveOut, ExclusionHistory, ExclusionReport, ExclusionResult, evaluate_exclusions,
};
pub use fingerprint::{FingerprintInput, compute_input_fingerprint, format_fingerprint};
pub use predictor::{
    PredictionOutcome, PredictionRule, PredictorConfig, ProbabilityFormula, StatusCounts, predict,
    status_counts,
};
pub use threshold::{
    ClauseTarget, SideCondition, SolverMetrics, TargetStatus, ThresholdInput, ThresholdReport,
    ThresholdResult, solve_thresholds,
};
