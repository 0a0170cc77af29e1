//! Days-remaining counters handed to the threshold solver.

mod common;

use common::history;
use disposition_core::domain::HistoryWindow;
use disposition_core::predictor::{StatusCounts, status_counts};

#[test]
fn test_empty_history_defaults() {
    let counts = status_counts(&HistoryWindow::default());
    assert_eq!(counts, StatusCounts { needed_c1: 3, needed_any: 5 });
}

#[test]
fn test_clause1_streak_complete() {
    let counts = status_counts(&history("..111"));
    assert_eq!(counts.needed_c1, 0);
    // Any streak 3 ⇒ 2; six-in-ten with 3 hits ⇒ 3.
    assert_eq!(counts.needed_any, 2);
}

#[test]
fn test_accumulation_path_wins_when_nearer() {
    let counts = status_counts(&history("a.a.a.a.a"));
    assert_eq!(counts.needed_c1, 3);
    assert_eq!(counts.needed_any, 1);
}

#[test]
fn test_accumulation_never_below_one() {
    let counts = status_counts(&history("aaaaaa..."));
    assert_eq!(counts.needed_any, 1);
}

#[test]
fn test_any_streak_complete_reaches_zero() {
    let counts = status_counts(&history("aaaaa"));
    assert_eq!(counts.needed_any, 0);
}
