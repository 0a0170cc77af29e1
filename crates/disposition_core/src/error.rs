use thiserror::Error;

/// Recoverable conditions raised by the disposition engine.
///
/// None of these are fatal: each evaluator maps them onto a neutral
/// "cannot assess" result that callers render distinctly from "no risk".
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("insufficient data: need at least {required} entries, have {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("unparseable disposition interval '{value}'")]
    UnparseableInterval { value: String },

    #[error("{axis} ratio is missing or non-positive")]
    UndefinedRatio { axis: RatioAxis },

    #[error("clause id {id} is outside 1..=8")]
    InvalidClause { id: u8 },

    #[error("reference price {price} must be positive")]
    NonPositivePrice { price: f64 },
}

/// Fundamental ratio axis used by clause 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatioAxis {
    Per,
    Pbr,
}

impl std::fmt::Display for RatioAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RatioAxis::Per => f.write_str("PER"),
            RatioAxis::Pbr => f.write_str("PBR"),
        }
    }
}
