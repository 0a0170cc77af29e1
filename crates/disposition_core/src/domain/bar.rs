use time::Date;

/// Shares per board lot (張).
pub const SHARES_PER_LOT: u64 = 1000;

/// Daily OHLCV bar with forward-filled valuation ratios.
///
/// `volume` is in shares. `per` / `pbr` are carried forward from the last
/// date the ratio was published; `None` means no ratio has been seen yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: Date,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub per: Option<f64>,
    pub pbr: Option<f64>,
}

impl PriceBar {
    pub fn new(date: Date, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
            per: None,
            pbr: None,
        }
    }

    pub fn with_ratios(mut self, per: Option<f64>, pbr: Option<f64>) -> Self {
        self.per = per;
        self.pbr = pbr;
        self
    }

    /// Volume in whole lots, rounded down.
    pub fn volume_lots(&self) -> u64 {
        self.volume / SHARES_PER_LOT
    }
}

/// Shares to lots, rounding up.
pub fn shares_to_lots_ceil(shares: u64) -> u64 {
    shares.div_ceil(SHARES_PER_LOT)
}
