pub mod quantize;

pub use quantize::{
    MIN_TICK, PRICE_LIMIT_RATIO, ceil_to_tick, floor_to_tick, is_on_tick, limit_down, limit_up,
    next_tick_above, round2, tick_size,
};
