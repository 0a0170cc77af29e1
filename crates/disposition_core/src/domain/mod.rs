//! Domain types shared by the predictor, solver and exclusion evaluator.

pub mod bar;
pub mod clause;
pub mod history;
pub mod period;

pub use bar::{PriceBar, SHARES_PER_LOT, shares_to_lots_ceil};
pub use clause::{ClauseSet, DailyAttentionRecord, MAX_CLAUSE_ID, Market};
pub use history::{HistoryDay, HistoryWindow};
pub use period::{DispositionPeriod, ROC_YEAR_OFFSET, parse_roc_date, parse_roc_interval};
