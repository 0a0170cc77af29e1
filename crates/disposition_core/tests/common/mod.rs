#![allow(dead_code)]

use disposition_core::domain::{HistoryWindow, PriceBar};
use time::{Date, Duration, Month};

/// First trading day used by every synthetic series.
pub fn base_date() -> Date {
    Date::from_calendar_date(2025, Month::March, 3).expect("valid date")
}

/// Bars with the given closes on consecutive days, flat OHLC and fixed volume.
pub fn bars_from_closes(closes: &[f64], volume: u64) -> Vec<PriceBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| PriceBar::new(base_date() + Duration::days(i as i64), c, c, c, c, volume))
        .collect()
}

/// `n` bars all closing at `close`.
pub fn flat_bars(n: usize, close: f64, volume: u64) -> Vec<PriceBar> {
    bars_from_closes(&vec![close; n], volume)
}

/// Parse a compact history pattern, oldest first: `1` clause 1 (implies any),
/// `a` any clause only, `.` quiet.
pub fn history(pattern: &str) -> HistoryWindow {
    let flags: Vec<(bool, bool)> = pattern
        .chars()
        .map(|c| match c {
            '1' => (true, true),
            'a' => (false, true),
            _ => (false, false),
        })
        .collect();
    HistoryWindow::from_flags(&flags)
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
