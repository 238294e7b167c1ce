use serde::{Deserialize, Serialize};

/// Granularity at which time-scoped bits are bucketed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TimeQuantum {
    #[default]
    None,
    Year,
    Month,
    Day,
    Hour,
    YearMonth,
    MonthDay,
    DayHour,
    YearMonthDay,
    MonthDayHour,
    YearMonthDayHour,
}

impl TimeQuantum {
    /// Wire code, empty for `None`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeQuantum::None => "",
            TimeQuantum::Year => "Y",
            TimeQuantum::Month => "M",
            TimeQuantum::Day => "D",
            TimeQuantum::Hour => "H",
            TimeQuantum::YearMonth => "YM",
            TimeQuantum::MonthDay => "MD",
            TimeQuantum::DayHour => "DH",
            TimeQuantum::YearMonthDay => "YMD",
            TimeQuantum::MonthDayHour => "MDH",
            TimeQuantum::YearMonthDayHour => "YMDH",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, TimeQuantum::None)
    }
}

/// Row cache strategy of a frame. `Default` leaves the choice to the server.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CacheType {
    #[default]
    Default,
    Lru,
    Ranked,
}

impl CacheType {
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            CacheType::Default => None,
            CacheType::Lru => Some("lru"),
            CacheType::Ranked => Some("ranked"),
        }
    }
}
