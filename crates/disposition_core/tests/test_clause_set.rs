//! Clause sets, reason-text extraction and history windows.

mod common;

use common::{base_date, history};
use disposition_core::domain::{ClauseSet, DailyAttentionRecord, HistoryDay, HistoryWindow, Market};
use disposition_core::error::EngineError;

#[test]
fn test_insert_rejects_out_of_range() {
    let mut set = ClauseSet::new();
    assert_eq!(set.insert(0), Err(EngineError::InvalidClause { id: 0 }));
    assert_eq!(set.insert(9), Err(EngineError::InvalidClause { id: 9 }));
    assert!(set.is_empty());
    assert!(set.insert(8).is_ok());
    assert!(set.contains(8));
}

#[test]
fn test_derived_flags() {
    let set = ClauseSet::from_ids(&[3, 1]).expect("valid ids");
    assert!(set.has_clause1());
    assert!(set.has_any());
    assert_eq!(set.len(), 2);
    assert_eq!(set.to_string(), "1,3");

    let empty = ClauseSet::new();
    assert!(!empty.has_clause1());
    assert!(!empty.has_any());
}

#[test]
fn test_from_reason_text() {
    let set = ClauseSet::from_reason_text("連續三個營業日達本公司有價證券交易異常標準第一款、第三款及第6款");
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 3, 6]);
    assert!(ClauseSet::from_reason_text("無").is_empty());
}

#[test]
fn test_history_day_forces_any() {
    assert_eq!(HistoryDay::new(true, false), HistoryDay { has_clause1: true, has_any: true });
    let window = HistoryWindow::from_flags(&[(true, false), (false, false)]);
    assert!(window.days()[0].has_any);
    assert!(!window.days()[1].has_any);
}

#[test]
fn test_window_from_records() {
    let records = vec![
        DailyAttentionRecord::new("2330", Market::Listed, base_date(), ClauseSet::from_ids(&[1]).unwrap()),
        DailyAttentionRecord::new("2330", Market::Listed, base_date(), ClauseSet::new()),
        DailyAttentionRecord::new("2330", Market::Listed, base_date(), ClauseSet::from_ids(&[4]).unwrap()),
    ];
    let window = HistoryWindow::from_records(&records);
    assert_eq!(window, history("1.a"));
}

#[test]
fn test_window_queries() {
    let window = history("1..aa.a");
    assert_eq!(window.any_hits_in_last(4), 3);
    assert!(!window.clause1_within(6));
    assert!(window.clause1_within(7));
    assert_eq!(window.trailing(100).len(), 7);
}
