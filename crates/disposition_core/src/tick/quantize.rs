//! Tick grid quantization for TWSE/TPEx equity prices.
//!
//! The legal price increment depends on the price band:
//!
//! | band            | tick |
//! |-----------------|------|
//! | `[0, 10)`       | 0.01 |
//! | `[10, 50)`      | 0.05 |
//! | `[50, 100)`     | 0.10 |
//! | `[100, 500)`    | 0.50 |
//! | `[500, 1000)`   | 1.00 |
//! | `[1000, ∞)`     | 5.00 |
//!
//! - `ceil_to_tick = ceil((price - ε) / tick) * tick`
//! - `floor_to_tick = floor((price + ε) / tick) * tick`
//! - `limit_up = floor_to_tick(ref * 1.10)`, `limit_down = floor_to_tick(ref * 0.90)`
//!
//! The tick is always looked up at the *raw* (pre-rounding) price. Band edges
//! are multiples of the next band's tick, so a value rounded onto an edge is
//! still on its own grid.
//!
//! All functions are total over positive prices. Callers guard `<= 0`.

/// Absorbs floating-point noise when the input already sits on the grid.
const BOUNDARY_EPS: f64 = 1e-7;

/// Smallest legal price: one tick of the lowest band.
pub const MIN_TICK: f64 = 0.01;

/// Price-band upper bounds paired with the tick used below them.
const TICK_BANDS: &[(f64, f64)] = &[
    (10.0, MIN_TICK),
    (50.0, 0.05),
    (100.0, 0.10),
    (500.0, 0.50),
    (1000.0, 1.00),
];

const TOP_BAND_TICK: f64 = 5.00;

/// Daily price-limit band (±10%).
pub const PRICE_LIMIT_RATIO: f64 = 0.10;

/// Legal tick size for `price`.
pub fn tick_size(price: f64) -> f64 {
    TICK_BANDS
        .iter()
        .find(|(upper, _)| price < *upper)
        .map(|(_, tick)| *tick)
        .unwrap_or(TOP_BAND_TICK)
}

/// Round to two decimals. Every tick is a multiple of 0.01, so this also
/// snaps `steps * tick` products back onto the exact decimal grid.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Smallest tick-aligned price `>= price`.
pub fn ceil_to_tick(price: f64) -> f64 {
    let tick = tick_size(price);
    let steps = ((price - BOUNDARY_EPS) / tick).ceil();
    round2(steps * tick)
}

/// Largest tick-aligned price `<= price`.
pub fn floor_to_tick(price: f64) -> f64 {
    let tick = tick_size(price);
    let steps = ((price + BOUNDARY_EPS) / tick).floor();
    round2(steps * tick)
}

/// One tick above `price`, using the tick of `price` itself.
pub fn next_tick_above(price: f64) -> f64 {
    round2(price + tick_size(price))
}

/// Whether `price` lies on its own tick grid.
pub fn is_on_tick(price: f64) -> bool {
    let tick = tick_size(price);
    let steps = (price / tick).round();
    (steps * tick - price).abs() < BOUNDARY_EPS
}

/// Limit-up price for tomorrow given today's reference close.
pub fn limit_up(ref_close: f64) -> f64 {
    floor_to_tick(ref_close * (1.0 + PRICE_LIMIT_RATIO))
}

/// Limit-down price for tomorrow given today's reference close.
///
/// Rounded down like [`limit_up`], with the tick of the raw `ref * 0.90`.
pub fn limit_down(ref_close: f64) -> f64 {
    floor_to_tick(ref_close * (1.0 - PRICE_LIMIT_RATIO))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_edges_use_upper_band_tick() {
        assert_eq!(tick_size(9.99), 0.01);
        assert_eq!(tick_size(10.0), 0.05);
        assert_eq!(tick_size(50.0), 0.10);
        assert_eq!(tick_size(100.0), 0.50);
        assert_eq!(tick_size(500.0), 1.00);
        assert_eq!(tick_size(1000.0), 5.00);
    }

    #[test]
    fn ceil_of_value_just_below_edge_lands_on_edge() {
        assert_eq!(ceil_to_tick(49.99), 50.0);
        assert_eq!(ceil_to_tick(499.6), 500.0);
        assert!(is_on_tick(ceil_to_tick(999.4)));
    }
}
