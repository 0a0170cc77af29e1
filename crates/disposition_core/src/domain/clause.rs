//! Attention clauses and per-day attention records.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use time::Date;

use crate::error::EngineError;

/// Highest clause number in the attention rulebook.
pub const MAX_CLAUSE_ID: u8 = 8;

static CLAUSE_CITATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"第\s*([一二三四五六七八1-8])\s*款").expect("clause citation pattern is valid")
});

/// Exchange on which the stock trades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Market {
    /// TWSE main board (上市).
    Listed,
    /// TPEx over-the-counter (上櫃).
    Otc,
}

impl Market {
    pub fn label(self) -> &'static str {
        match self {
            Market::Listed => "listed",
            Market::Otc => "OTC",
        }
    }

    /// Stable token used in fingerprints and serialized reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Market::Listed => "listed",
            Market::Otc => "otc",
        }
    }
}

/// Set of clause ids `{1..=8}` cited for a stock on one day.
///
/// A single notice may cite several clauses. Backed by a bitmask, so the
/// set is `Copy` and iteration is always ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ClauseSet {
    bits: u8,
}

impl ClauseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from clause ids, rejecting anything outside `1..=8`.
    pub fn from_ids(ids: &[u8]) -> Result<Self, EngineError> {
        let mut set = Self::new();
        for &id in ids {
            set.insert(id)?;
        }
        Ok(set)
    }

    /// Extract the clauses cited in a notice's reason text.
    ///
    /// Matches `第N款` where `N` is a Chinese numeral 一..八 or an ASCII digit.
    /// Text with no citation yields an empty set.
    pub fn from_reason_text(text: &str) -> Self {
        let mut set = Self::new();
        for caps in CLAUSE_CITATION.captures_iter(text) {
            if let Some(id) = caps.get(1).and_then(|m| numeral_to_clause(m.as_str())) {
                set.bits |= 1 << (id - 1);
            }
        }
        set
    }

    pub fn insert(&mut self, id: u8) -> Result<(), EngineError> {
        if id == 0 || id > MAX_CLAUSE_ID {
            return Err(EngineError::InvalidClause { id });
        }
        self.bits |= 1 << (id - 1);
        Ok(())
    }

    pub fn contains(&self, id: u8) -> bool {
        (1..=MAX_CLAUSE_ID).contains(&id) && self.bits & (1 << (id - 1)) != 0
    }

    pub fn has_clause1(&self) -> bool {
        self.contains(1)
    }

    pub fn has_any(&self) -> bool {
        self.bits != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Clause ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (1..=MAX_CLAUSE_ID).filter(move |id| self.contains(*id))
    }
}

impl fmt::Display for ClauseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.iter().map(|id| id.to_string()).collect();
        f.write_str(&ids.join(","))
    }
}

fn numeral_to_clause(token: &str) -> Option<u8> {
    match token {
        "一" | "1" => Some(1),
        "二" | "2" => Some(2),
        "三" | "3" => Some(3),
        "四" | "4" => Some(4),
        "五" | "5" => Some(5),
        "六" | "6" => Some(6),
        "七" | "7" => Some(7),
        "八" | "8" => Some(8),
        _ => None,
    }
}

/// One stock's attention status on one trading day. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyAttentionRecord {
    pub stock_code: String,
    pub market: Market,
    pub date: Date,
    pub clauses: ClauseSet,
}

impl DailyAttentionRecord {
    pub fn new(stock_code: impl Into<String>, market: Market, date: Date, clauses: ClauseSet) -> Self {
        Self {
            stock_code: stock_code.into(),
            market,
            date,
            clauses,
        }
    }
}
