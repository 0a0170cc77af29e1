//! Named threshold parameters, market defaults and JSON overrides.
//!
//! Every constant a clause formula reads has a [`ThresholdParam`] row with a
//! snake_case name and a per-market default taken from
//! [`MarketThresholds::for_market`]. A host may override any subset through a
//! JSON object whose keys are those names; omitted keys keep the market
//! default. Overrides that are non-finite, negative, or fractional where a
//! whole count is required are rejected rather than clamped.

use disposition_core::config::{Clause1Strategy, MarketThresholds};
use disposition_core::domain::Market;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every tunable numeric threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThresholdParam {
    ReturnWindowDays,

    // Clause 1
    Clause1ReturnPct,
    Clause1VariantReturnPct,
    Clause1VariantPriceDelta,

    // Clause 2
    Clause2Window30Pct,
    Clause2Window60Pct,
    Clause2Window90Pct,

    // Clauses 3/4/5
    ShortReturnPct,
    VolumeSurgeMultiple,
    VolumeAverageDays,
    Clause4TurnoverPct,
    BrokerConcentrationPct,

    // Clause 6
    PerThreshold,
    PbrThreshold,
    Clause6TurnoverPct,
    Clause6VolumeFloorLots,

    // Clause-2 exclusions
    ExclusionAReturnPct,
    ExclusionALookbackDays,
    ExclusionBReturnPct,
    ExclusionBLookbackDays,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("threshold '{param}' rejected: {reason}")]
    InvalidValue {
        param: &'static str,
        reason: &'static str,
    },

    #[error("thresholds inconsistent: {0}")]
    Inconsistent(String),

    #[error("malformed threshold overrides: {0}")]
    Json(#[from] serde_json::Error),
}

/// Returns the snake_case name used as the JSON override key.
pub fn param_name(param: ThresholdParam) -> &'static str {
    match param {
        ThresholdParam::ReturnWindowDays => "return_window_days",
        ThresholdParam::Clause1ReturnPct => "clause1_return_pct",
        ThresholdParam::Clause1VariantReturnPct => "clause1_variant_return_pct",
        ThresholdParam::Clause1VariantPriceDelta => "clause1_variant_price_delta",
        ThresholdParam::Clause2Window30Pct => "clause2_window30_pct",
        ThresholdParam::Clause2Window60Pct => "clause2_window60_pct",
        ThresholdParam::Clause2Window90Pct => "clause2_window90_pct",
        ThresholdParam::ShortReturnPct => "short_return_pct",
        ThresholdParam::VolumeSurgeMultiple => "volume_surge_multiple",
        ThresholdParam::VolumeAverageDays => "volume_average_days",
        ThresholdParam::Clause4TurnoverPct => "clause4_turnover_pct",
        ThresholdParam::BrokerConcentrationPct => "broker_concentration_pct",
        ThresholdParam::PerThreshold => "per_threshold",
        ThresholdParam::PbrThreshold => "pbr_threshold",
        ThresholdParam::Clause6TurnoverPct => "clause6_turnover_pct",
        ThresholdParam::Clause6VolumeFloorLots => "clause6_volume_floor_lots",
        ThresholdParam::ExclusionAReturnPct => "exclusion_a_return_pct",
        ThresholdParam::ExclusionALookbackDays => "exclusion_a_lookback_days",
        ThresholdParam::ExclusionBReturnPct => "exclusion_b_return_pct",
        ThresholdParam::ExclusionBLookbackDays => "exclusion_b_lookback_days",
    }
}

/// Day counts and lot floors must be whole numbers.
pub fn is_whole_count(param: ThresholdParam) -> bool {
    matches!(
        param,
        ThresholdParam::ReturnWindowDays
            | ThresholdParam::VolumeAverageDays
            | ThresholdParam::Clause6VolumeFloorLots
            | ThresholdParam::ExclusionALookbackDays
            | ThresholdParam::ExclusionBLookbackDays
    )
}

/// Current value of `param` in an assembled threshold set.
pub fn param_value(thresholds: &MarketThresholds, param: ThresholdParam) -> f64 {
    let t = thresholds;
    match param {
        ThresholdParam::ReturnWindowDays => t.return_window_days as f64,
        ThresholdParam::Clause1ReturnPct => t.clause1_return_pct,
        ThresholdParam::Clause1VariantReturnPct => t.clause1_variant_return_pct,
        ThresholdParam::Clause1VariantPriceDelta => t.clause1_variant_price_delta,
        ThresholdParam::Clause2Window30Pct => t.clause2_windows[0].appreciation_pct,
        ThresholdParam::Clause2Window60Pct => t.clause2_windows[1].appreciation_pct,
        ThresholdParam::Clause2Window90Pct => t.clause2_windows[2].appreciation_pct,
        ThresholdParam::ShortReturnPct => t.short_return_pct,
        ThresholdParam::VolumeSurgeMultiple => t.volume_surge_multiple,
        ThresholdParam::VolumeAverageDays => t.volume_average_days as f64,
        ThresholdParam::Clause4TurnoverPct => t.clause4_turnover_pct,
        ThresholdParam::BrokerConcentrationPct => t.broker_concentration_pct,
        ThresholdParam::PerThreshold => t.per_threshold,
        ThresholdParam::PbrThreshold => t.pbr_threshold,
        ThresholdParam::Clause6TurnoverPct => t.clause6_turnover_pct,
        ThresholdParam::Clause6VolumeFloorLots => t.clause6_volume_floor_lots as f64,
        ThresholdParam::ExclusionAReturnPct => t.exclusion_a_return_pct,
        ThresholdParam::ExclusionALookbackDays => t.exclusion_a_lookback_days as f64,
        ThresholdParam::ExclusionBReturnPct => t.exclusion_b_return_pct,
        ThresholdParam::ExclusionBLookbackDays => t.exclusion_b_lookback_days as f64,
    }
}

fn set_param(thresholds: &mut MarketThresholds, param: ThresholdParam, value: f64) {
    let t = thresholds;
    match param {
        ThresholdParam::ReturnWindowDays => t.return_window_days = value as usize,
        ThresholdParam::Clause1ReturnPct => t.clause1_return_pct = value,
        ThresholdParam::Clause1VariantReturnPct => t.clause1_variant_return_pct = value,
        ThresholdParam::Clause1VariantPriceDelta => t.clause1_variant_price_delta = value,
        ThresholdParam::Clause2Window30Pct => t.clause2_windows[0].appreciation_pct = value,
        ThresholdParam::Clause2Window60Pct => t.clause2_windows[1].appreciation_pct = value,
        ThresholdParam::Clause2Window90Pct => t.clause2_windows[2].appreciation_pct = value,
        ThresholdParam::ShortReturnPct => t.short_return_pct = value,
        ThresholdParam::VolumeSurgeMultiple => t.volume_surge_multiple = value,
        ThresholdParam::VolumeAverageDays => t.volume_average_days = value as usize,
        ThresholdParam::Clause4TurnoverPct => t.clause4_turnover_pct = value,
        ThresholdParam::BrokerConcentrationPct => t.broker_concentration_pct = value,
        ThresholdParam::PerThreshold => t.per_threshold = value,
        ThresholdParam::PbrThreshold => t.pbr_threshold = value,
        ThresholdParam::Clause6TurnoverPct => t.clause6_turnover_pct = value,
        ThresholdParam::Clause6VolumeFloorLots => t.clause6_volume_floor_lots = value as u64,
        ThresholdParam::ExclusionAReturnPct => t.exclusion_a_return_pct = value,
        ThresholdParam::ExclusionALookbackDays => t.exclusion_a_lookback_days = value as usize,
        ThresholdParam::ExclusionBReturnPct => t.exclusion_b_return_pct = value,
        ThresholdParam::ExclusionBLookbackDays => t.exclusion_b_lookback_days = value as usize,
    }
}

/// Published default of `param` for `market`.
pub fn market_default(market: Market, param: ThresholdParam) -> f64 {
    param_value(&MarketThresholds::for_market(market), param)
}

/// Expected number of ThresholdParam variants. Update when adding new variants.
pub const EXPECTED_PARAM_COUNT: usize = 20;

/// All known `ThresholdParam` variants, in declaration order.
pub const ALL_PARAMS: &[ThresholdParam] = &[
    ThresholdParam::ReturnWindowDays,
    ThresholdParam::Clause1ReturnPct,
    ThresholdParam::Clause1VariantReturnPct,
    ThresholdParam::Clause1VariantPriceDelta,
    ThresholdParam::Clause2Window30Pct,
    ThresholdParam::Clause2Window60Pct,
    ThresholdParam::Clause2Window90Pct,
    ThresholdParam::ShortReturnPct,
    ThresholdParam::VolumeSurgeMultiple,
    ThresholdParam::VolumeAverageDays,
    ThresholdParam::Clause4TurnoverPct,
    ThresholdParam::BrokerConcentrationPct,
    ThresholdParam::PerThreshold,
    ThresholdParam::PbrThreshold,
    ThresholdParam::Clause6TurnoverPct,
    ThresholdParam::Clause6VolumeFloorLots,
    ThresholdParam::ExclusionAReturnPct,
    ThresholdParam::ExclusionALookbackDays,
    ThresholdParam::ExclusionBReturnPct,
    ThresholdParam::ExclusionBLookbackDays,
];

/// Resolve one threshold.
///
/// - `Some(v)` wins over the market default when finite and non-negative.
/// - Whole-count params reject fractional or zero values.
/// - `None` yields the market default.
pub fn resolve_threshold_value(
    param: ThresholdParam,
    market: Market,
    value: Option<f64>,
) -> Result<f64, ConfigError> {
    let Some(v) = value else {
        return Ok(market_default(market, param));
    };
    let invalid = |reason| ConfigError::InvalidValue {
        param: param_name(param),
        reason,
    };
    if !v.is_finite() {
        return Err(invalid("value is non-finite (NaN or Infinity)"));
    }
    if v < 0.0 {
        return Err(invalid("value is negative"));
    }
    if is_whole_count(param) && (v.fract() != 0.0 || v == 0.0) {
        return Err(invalid("value must be a positive whole number"));
    }
    Ok(v)
}

// ─── Overrides ──────────────────────────────────────────────────────────

/// Serialized form of [`Clause1Strategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Clause1StrategyName {
    LowerOfBoth,
    PrimaryOnly,
}

impl From<Clause1StrategyName> for Clause1Strategy {
    fn from(name: Clause1StrategyName) -> Self {
        match name {
            Clause1StrategyName::LowerOfBoth => Clause1Strategy::LowerOfBoth,
            Clause1StrategyName::PrimaryOnly => Clause1Strategy::PrimaryOnly,
        }
    }
}

/// Partial threshold set; every omitted field keeps the market default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clause1_strategy: Option<Clause1StrategyName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_window_days: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clause1_return_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clause1_variant_return_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clause1_variant_price_delta: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clause2_window30_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clause2_window60_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clause2_window90_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_return_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_surge_multiple: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_average_days: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clause4_turnover_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broker_concentration_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pbr_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clause6_turnover_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clause6_volume_floor_lots: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusion_a_return_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusion_a_lookback_days: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusion_b_return_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusion_b_lookback_days: Option<f64>,
}

impl ThresholdOverrides {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Override for `param`, if present.
    pub fn value(&self, param: ThresholdParam) -> Option<f64> {
        match param {
            ThresholdParam::ReturnWindowDays => self.return_window_days,
            ThresholdParam::Clause1ReturnPct => self.clause1_return_pct,
            ThresholdParam::Clause1VariantReturnPct => self.clause1_variant_return_pct,
            ThresholdParam::Clause1VariantPriceDelta => self.clause1_variant_price_delta,
            ThresholdParam::Clause2Window30Pct => self.clause2_window30_pct,
            ThresholdParam::Clause2Window60Pct => self.clause2_window60_pct,
            ThresholdParam::Clause2Window90Pct => self.clause2_window90_pct,
            ThresholdParam::ShortReturnPct => self.short_return_pct,
            ThresholdParam::VolumeSurgeMultiple => self.volume_surge_multiple,
            ThresholdParam::VolumeAverageDays => self.volume_average_days,
            ThresholdParam::Clause4TurnoverPct => self.clause4_turnover_pct,
            ThresholdParam::BrokerConcentrationPct => self.broker_concentration_pct,
            ThresholdParam::PerThreshold => self.per_threshold,
            ThresholdParam::PbrThreshold => self.pbr_threshold,
            ThresholdParam::Clause6TurnoverPct => self.clause6_turnover_pct,
            ThresholdParam::Clause6VolumeFloorLots => self.clause6_volume_floor_lots,
            ThresholdParam::ExclusionAReturnPct => self.exclusion_a_return_pct,
            ThresholdParam::ExclusionALookbackDays => self.exclusion_a_lookback_days,
            ThresholdParam::ExclusionBReturnPct => self.exclusion_b_return_pct,
            ThresholdParam::ExclusionBLookbackDays => self.exclusion_b_lookback_days,
        }
    }

    /// Market defaults with these overrides applied and validated.
    pub fn apply(&self, market: Market) -> Result<MarketThresholds, ConfigError> {
        let mut thresholds = MarketThresholds::for_market(market);
        for &param in ALL_PARAMS {
            let value = resolve_threshold_value(param, market, self.value(param))?;
            set_param(&mut thresholds, param, value);
        }
        if let Some(strategy) = self.clause1_strategy {
            thresholds = thresholds.with_clause1_strategy(strategy.into());
        }
        check_consistency(&thresholds)?;
        Ok(thresholds)
    }
}

/// Cross-field rules a single-value check cannot see.
fn check_consistency(t: &MarketThresholds) -> Result<(), ConfigError> {
    if t.return_window_days < 2 {
        return Err(ConfigError::Inconsistent(format!(
            "return_window_days {} leaves no realized return",
            t.return_window_days
        )));
    }
    if t.volume_surge_multiple <= 0.0 || t.volume_surge_multiple >= t.volume_average_days as f64 {
        return Err(ConfigError::Inconsistent(format!(
            "volume_surge_multiple {} must lie in (0, volume_average_days {})",
            t.volume_surge_multiple, t.volume_average_days
        )));
    }
    Ok(())
}

/// Parse a JSON override object and build the market's threshold set.
pub fn load_thresholds(market: Market, json: &str) -> Result<MarketThresholds, ConfigError> {
    ThresholdOverrides::from_json(json)?.apply(market)
}
