#![forbid(unsafe_code)]

pub mod config;
pub mod report;

pub use config::{ConfigError, ThresholdOverrides, ThresholdParam, load_thresholds};
pub use report::{
    EvaluationInput, EvaluationReport, ReportCodecError, decode_report_line, encode_report_line,
    evaluate,
};
