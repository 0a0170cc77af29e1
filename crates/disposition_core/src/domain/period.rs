//! Disposition periods and ROC-calendar interval parsing.
//!
//! Interval strings look like `"114/12/22~115/01/06"` or `"1141222-1150106"`:
//! two ROC dates joined by one of `~ - – — ～`. ROC year + 1911 = Gregorian.
//! A half that cannot be parsed becomes `None`; it never panics.

use std::sync::LazyLock;

use regex::Regex;
use time::{Date, Month};

use crate::error::EngineError;

/// Offset between the ROC (Minguo) calendar and the Gregorian calendar.
pub const ROC_YEAR_OFFSET: i32 = 1911;

const INTERVAL_SEPARATORS: &[char] = &['~', '-', '–', '—', '～'];

static MATCHING_CADENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"約每\s*([0-9０-９一二三四五六七八九十]+)\s*分鐘").expect("cadence pattern is valid")
});

/// An active disposition window and the measure imposed during it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispositionPeriod {
    pub start: Option<Date>,
    pub end: Option<Date>,
    pub measure_text: String,
}

impl DispositionPeriod {
    /// Parse both halves independently; either may come back `None`.
    pub fn from_interval(interval: &str, measure_text: impl Into<String>) -> Self {
        let (start, end) = match interval.split_once(INTERVAL_SEPARATORS) {
            Some((head, tail)) => (parse_roc_date(head), parse_roc_date(tail)),
            None => (parse_roc_date(interval), None),
        };
        if start.is_none() || end.is_none() {
            tracing::debug!("DispositionPeriod partial parse interval={interval:?}");
        }
        Self {
            start,
            end,
            measure_text: measure_text.into(),
        }
    }

    /// `start <= date <= end`. Unknown bounds are never active.
    pub fn is_active_on(&self, date: Date) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start <= date && date <= end,
            _ => false,
        }
    }

    /// Batch-matching cadence in minutes, read from "約每N分鐘撮合一次".
    pub fn matching_interval_minutes(&self) -> Option<u32> {
        let caps = MATCHING_CADENCE.captures(&self.measure_text)?;
        parse_small_number(caps.get(1)?.as_str())
    }
}

/// Parse a full interval; both halves must be valid.
pub fn parse_roc_interval(interval: &str) -> Result<(Date, Date), EngineError> {
    let unparseable = || EngineError::UnparseableInterval {
        value: interval.to_owned(),
    };
    let (head, tail) = interval
        .split_once(INTERVAL_SEPARATORS)
        .ok_or_else(unparseable)?;
    let start = parse_roc_date(head).ok_or_else(unparseable)?;
    let end = parse_roc_date(tail).ok_or_else(unparseable)?;
    Ok((start, end))
}

/// Parse `YYY/MM/DD` or compact `YYYMMDD` into a Gregorian date.
pub fn parse_roc_date(raw: &str) -> Option<Date> {
    let s = raw.trim();
    let (year, month, day) = if s.contains('/') {
        let mut parts = s.split('/');
        let y = parts.next()?.trim().parse::<i32>().ok()?;
        let m = parts.next()?.trim().parse::<u8>().ok()?;
        let d = parts.next()?.trim().parse::<u8>().ok()?;
        if parts.next().is_some() {
            return None;
        }
        (y, m, d)
    } else if s.len() == 7 && s.bytes().all(|b| b.is_ascii_digit()) {
        (
            s[..3].parse::<i32>().ok()?,
            s[3..5].parse::<u8>().ok()?,
            s[5..].parse::<u8>().ok()?,
        )
    } else {
        return None;
    };
    if year <= 0 {
        return None;
    }
    let month = Month::try_from(month).ok()?;
    Date::from_calendar_date(year + ROC_YEAR_OFFSET, month, day).ok()
}

/// Digits (ASCII or fullwidth) or a Chinese numeral below 100.
fn parse_small_number(token: &str) -> Option<u32> {
    if token.chars().all(|c| c.is_ascii_digit() || ('０'..='９').contains(&c)) {
        return token.chars().try_fold(0u32, |acc, c| {
            let digit = c.to_digit(10).or_else(|| Some(c as u32 - '０' as u32))?;
            acc.checked_mul(10)?.checked_add(digit)
        });
    }

    let digit = |c: char| "一二三四五六七八九".chars().position(|d| d == c).map(|i| i as u32 + 1);
    let chars: Vec<char> = token.chars().collect();
    match chars.as_slice() {
        [c] if *c == '十' => Some(10),
        [c] => digit(*c),
        ['十', ones] => Some(10 + digit(*ones)?),
        [tens, '十'] => Some(digit(*tens)? * 10),
        [tens, '十', ones] => Some(digit(*tens)? * 10 + digit(*ones)?),
        _ => None,
    }
}
