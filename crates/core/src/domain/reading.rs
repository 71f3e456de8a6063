use chrono::{FixedOffset, NaiveDateTime, Timelike};

/// Why the local machine's own time was used instead of the selected zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    NoZoneSelected,
    UnknownZone(String),
    TimestampOutOfRange(i64),
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackReason::NoZoneSelected => write!(f, "no zone selected"),
            FallbackReason::UnknownZone(zone) => write!(f, "unknown zone {}", zone),
            FallbackReason::TimestampOutOfRange(ts) => write!(f, "timestamp {} out of range", ts),
        }
    }
}

/// Which path produced a reading
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadingSource {
    /// Cached server timestamp rendered in the selected zone
    Authoritative,
    /// Selected zone's time of day from the timezone database
    ZoneRules,
    /// The local machine's own clock, unmodified
    LocalMachine(FallbackReason),
}

/// A wall-clock reading for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    pub civil: NaiveDateTime,
    /// UTC offset the civil time is expressed in
    pub offset: FixedOffset,
    pub source: ReadingSource,
}

impl Reading {
    pub fn hour(&self) -> u32 {
        self.civil.hour()
    }

    /// `UTC+01:00` style label
    pub fn offset_label(&self) -> String {
        let total = self.offset.local_minus_utc();
        let sign = if total < 0 { '-' } else { '+' };
        let total = total.abs();
        format!("UTC{}{:02}:{:02}", sign, total / 3600, (total % 3600) / 60)
    }
}
