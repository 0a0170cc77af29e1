//! ROC interval parsing and disposition period queries.

use disposition_core::domain::{DispositionPeriod, parse_roc_date, parse_roc_interval};
use disposition_core::error::EngineError;
use time::{Date, Month};

fn date(y: i32, m: Month, d: u8) -> Date {
    Date::from_calendar_date(y, m, d).expect("valid date")
}

#[test]
fn test_slash_interval() {
    let (start, end) = parse_roc_interval("114/12/22~115/01/06").expect("parses");
    assert_eq!(start, date(2025, Month::December, 22));
    assert_eq!(end, date(2026, Month::January, 6));
}

#[test]
fn test_compact_interval_with_dash() {
    let (start, end) = parse_roc_interval("1141222-1150106").expect("parses");
    assert_eq!(start, date(2025, Month::December, 22));
    assert_eq!(end, date(2026, Month::January, 6));
}

#[test]
fn test_alternate_separators() {
    for sep in ['–', '—', '～'] {
        let raw = format!("114/03/03{sep}114/03/14");
        assert!(parse_roc_interval(&raw).is_ok(), "{raw}");
    }
}

#[test]
fn test_unparseable_interval_is_error() {
    assert_eq!(
        parse_roc_interval("not a date"),
        Err(EngineError::UnparseableInterval { value: "not a date".to_owned() })
    );
}

#[test]
fn test_invalid_calendar_date_is_none() {
    assert_eq!(parse_roc_date("114/02/30"), None);
    assert_eq!(parse_roc_date("114/13/01"), None);
    assert_eq!(parse_roc_date("11412"), None);
}

#[test]
fn test_period_half_parse() {
    let period = DispositionPeriod::from_interval("114/12/22~", "");
    assert_eq!(period.start, Some(date(2025, Month::December, 22)));
    assert_eq!(period.end, None);
    assert!(!period.is_active_on(date(2025, Month::December, 23)));
}

#[test]
fn test_period_is_active_inclusive() {
    let period = DispositionPeriod::from_interval("114/12/22~115/01/06", "");
    assert!(period.is_active_on(date(2025, Month::December, 22)));
    assert!(period.is_active_on(date(2026, Month::January, 6)));
    assert!(!period.is_active_on(date(2026, Month::January, 7)));
    assert!(!period.is_active_on(date(2025, Month::December, 21)));
}

#[test]
fn test_matching_cadence_from_measure_text() {
    let five = DispositionPeriod::from_interval("114/12/22~115/01/06", "以人工管制之撮合終端機執行撮合作業(約每五分鐘撮合一次)");
    assert_eq!(five.matching_interval_minutes(), Some(5));

    let twenty = DispositionPeriod::from_interval("114/12/22~115/01/06", "約每20分鐘撮合一次");
    assert_eq!(twenty.matching_interval_minutes(), Some(20));

    let none = DispositionPeriod::from_interval("114/12/22~115/01/06", "預收款券");
    assert_eq!(none.matching_interval_minutes(), None);
}
