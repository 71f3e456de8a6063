use serde::{Deserialize, Serialize};

/// Coarse part of the day used for theming
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayPeriod {
    Sunrise,
    Day,
    Sunset,
    Night,
}

impl DayPeriod {
    /// 05-07 sunrise, 08-17 day, 18-19 sunset, anything else night.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=7 => DayPeriod::Sunrise,
            8..=17 => DayPeriod::Day,
            18..=19 => DayPeriod::Sunset,
            _ => DayPeriod::Night,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayPeriod::Sunrise => "sunrise",
            DayPeriod::Day => "day",
            DayPeriod::Sunset => "sunset",
            DayPeriod::Night => "night",
        }
    }
}

impl std::fmt::Display for DayPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Remembers the applied theme so it is only re-applied on a band change
#[derive(Debug, Default, Clone)]
pub struct ThemeTracker {
    current: Option<DayPeriod>,
}

impl ThemeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<DayPeriod> {
        self.current
    }

    /// Returns the period when it differs from the applied one
    pub fn observe(&mut self, period: DayPeriod) -> Option<DayPeriod> {
        if self.current == Some(period) {
            return None;
        }
        self.current = Some(period);
        Some(period)
    }
}
