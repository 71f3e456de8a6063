use chrono::{NaiveDateTime, Timelike};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl std::fmt::Display for Meridiem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Meridiem::Am => write!(f, "AM"),
            Meridiem::Pm => write!(f, "PM"),
        }
    }
}

/// Convert a 24-hour clock hour (0-23) to its 12-hour form (1-12).
pub fn to_12_hour(hour: u32) -> (u32, Meridiem) {
    let hour = hour % 24;
    let meridiem = if hour < 12 { Meridiem::Am } else { Meridiem::Pm };
    let h12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    (h12, meridiem)
}

/// Inverse of [`to_12_hour`].
pub fn from_12_hour(hour: u32, meridiem: Meridiem) -> u32 {
    let base = hour % 12;
    match meridiem {
        Meridiem::Am => base,
        Meridiem::Pm => base + 12,
    }
}

/// Text fields written to the display for one reading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFields {
    pub hours: String,
    pub minutes: String,
    pub seconds: Option<String>,
    pub meridiem: Option<Meridiem>,
    pub date: String,
}

impl DisplayFields {
    pub fn format(civil: &NaiveDateTime, is_24_hour: bool, seconds_visible: bool) -> Self {
        let (hours, meridiem) = if is_24_hour {
            (civil.hour(), None)
        } else {
            let (h12, meridiem) = to_12_hour(civil.hour());
            (h12, Some(meridiem))
        };

        Self {
            hours: format!("{:02}", hours),
            minutes: format!("{:02}", civil.minute()),
            seconds: seconds_visible.then(|| format!("{:02}", civil.second())),
            meridiem,
            date: civil.format("%A, %-d %B %Y").to_string(),
        }
    }

    /// `HH:MM[:SS][ AM|PM]`
    pub fn time_text(&self) -> String {
        let mut text = format!("{}:{}", self.hours, self.minutes);
        if let Some(seconds) = &self.seconds {
            text.push(':');
            text.push_str(seconds);
        }
        if let Some(meridiem) = self.meridiem {
            text.push_str(&format!(" {}", meridiem));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn civil(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 11, 14)
            .and_then(|d| d.and_hms_opt(h, m, s))
            .unwrap()
    }

    #[test]
    fn test_12_hour_round_trip() {
        for hour in 0..24 {
            let (h12, meridiem) = to_12_hour(hour);
            assert!((1..=12).contains(&h12));
            assert_eq!(from_12_hour(h12, meridiem), hour);
        }
    }

    #[test]
    fn test_12_hour_edges() {
        assert_eq!(to_12_hour(0), (12, Meridiem::Am));
        assert_eq!(to_12_hour(11), (11, Meridiem::Am));
        assert_eq!(to_12_hour(12), (12, Meridiem::Pm));
        assert_eq!(to_12_hour(23), (11, Meridiem::Pm));
    }

    #[test]
    fn test_format_24_hour_with_seconds() {
        let fields = DisplayFields::format(&civil(22, 13, 20), true, true);
        assert_eq!(fields.time_text(), "22:13:20");
        assert_eq!(fields.meridiem, None);
        assert_eq!(fields.date, "Tuesday, 14 November 2023");
    }

    #[test]
    fn test_format_12_hour_without_seconds() {
        let fields = DisplayFields::format(&civil(22, 13, 20), false, false);
        assert_eq!(fields.hours, "10");
        assert_eq!(fields.seconds, None);
        assert_eq!(fields.time_text(), "10:13 PM");

        let midnight = DisplayFields::format(&civil(0, 5, 9), false, true);
        assert_eq!(midnight.time_text(), "12:05:09 AM");
    }

    #[test]
    fn test_switching_format_is_idempotent() {
        let t = civil(7, 30, 0);
        let once = DisplayFields::format(&t, true, true);
        let twice = DisplayFields::format(&t, true, true);
        assert_eq!(once, twice);
    }
}
