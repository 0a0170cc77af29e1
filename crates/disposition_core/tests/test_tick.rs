//! Tick grid, price-limit band and rounding helpers.

use disposition_core::tick::{
    MIN_TICK, ceil_to_tick, floor_to_tick, is_on_tick, limit_down, limit_up, next_tick_above, round2,
    tick_size,
};

// ─── Tick bands ─────────────────────────────────────────────────────────

#[test]
fn test_tick_size_per_band() {
    assert_eq!(tick_size(5.0), 0.01);
    assert_eq!(tick_size(25.0), 0.05);
    assert_eq!(tick_size(75.0), 0.10);
    assert_eq!(tick_size(250.0), 0.50);
    assert_eq!(tick_size(750.0), 1.00);
    assert_eq!(tick_size(2500.0), 5.00);
}

#[test]
fn test_tick_size_band_edge_takes_higher_tick() {
    assert_eq!(tick_size(10.0), 0.05);
    assert_eq!(tick_size(100.0), 0.50);
    assert_eq!(tick_size(1000.0), 5.00);
}

// ─── Ceil / floor ───────────────────────────────────────────────────────

#[test]
fn test_ceil_to_tick_rounds_up_within_band() {
    assert_eq!(ceil_to_tick(136.2), 136.5);
    assert_eq!(ceil_to_tick(127.72), 128.0);
    assert_eq!(ceil_to_tick(12.01), 12.05);
    assert_eq!(ceil_to_tick(1361.0), 1365.0);
}

#[test]
fn test_ceil_to_tick_keeps_on_grid_value() {
    assert_eq!(ceil_to_tick(100.0), 100.0);
    assert_eq!(ceil_to_tick(105.000_000_000_000_01), 105.0);
    assert_eq!(ceil_to_tick(9.99), 9.99);
}

#[test]
fn test_floor_to_tick_rounds_down() {
    assert_eq!(floor_to_tick(137.9), 137.5);
    assert_eq!(floor_to_tick(10.47), 10.45);
    assert_eq!(floor_to_tick(1379.0), 1375.0);
}

#[test]
fn test_quantized_values_lie_on_their_own_grid() {
    for raw in [9.991, 10.02, 49.97, 99.95, 123.45, 499.9, 999.4, 1002.0] {
        assert!(is_on_tick(ceil_to_tick(raw)), "ceil {raw}");
        assert!(is_on_tick(floor_to_tick(raw)), "floor {raw}");
    }
}

#[test]
fn test_quantized_values_stay_within_one_tick() {
    // Guard band of the quantizer.
    const EPS: f64 = 1e-7;
    for k in 0..40_000 {
        let p = 0.01 + f64::from(k) * 0.0737;
        let tick = tick_size(p);
        let floor = floor_to_tick(p);
        let ceil = ceil_to_tick(p);
        assert!(floor <= p + EPS, "p={p} floor={floor}");
        assert!(p - floor < tick, "p={p} floor={floor}");
        assert!(ceil >= p - EPS, "p={p} ceil={ceil}");
        assert!(ceil - p < tick, "p={p} ceil={ceil}");
    }
}

#[test]
fn test_lowest_band_tick_is_min_tick() {
    assert_eq!(tick_size(0.5), MIN_TICK);
    assert_eq!(ceil_to_tick(0.001), MIN_TICK);
}

#[test]
fn test_is_on_tick() {
    assert!(is_on_tick(10.05));
    assert!(!is_on_tick(10.03));
    assert!(is_on_tick(136.5));
    assert!(!is_on_tick(136.2));
}

#[test]
fn test_next_tick_above_crosses_band() {
    assert_eq!(next_tick_above(9.99), 10.0);
    assert_eq!(next_tick_above(10.0), 10.05);
    assert_eq!(next_tick_above(95.0), 95.1);
}

// ─── Price limits ───────────────────────────────────────────────────────

#[test]
fn test_limit_up_and_down() {
    assert_eq!(limit_up(125.0), 137.5);
    assert_eq!(limit_up(100.0), 110.0);
    assert_eq!(limit_down(100.0), 90.0);
    assert_eq!(limit_down(125.0), 112.5);
}

#[test]
fn test_limit_up_uses_tick_of_raw_price() {
    // 9.5 * 1.1 = 10.45 sits in the 0.05 band.
    assert_eq!(limit_up(9.5), 10.45);
    // 111.2 * 0.9 = 100.08, floored on the 0.50 grid.
    assert_eq!(limit_down(111.2), 100.0);
}

#[test]
fn test_round2() {
    assert_eq!(round2(32.021_85), 32.02);
    assert_eq!(round2(25.004_8), 25.0);
}
