/// Whether the clock currently holds a server-confirmed timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// No authoritative timestamp; time is derived from the timezone database
    Unsynced,
    /// Ticking forward from the last authoritative timestamp
    Synced,
}

/// The mutable state behind the clock display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockState {
    pub selected_zone: Option<String>,
    /// Last known-correct unix seconds for the selected zone
    pub authoritative_timestamp: Option<i64>,
    pub is_24_hour: bool,
    pub seconds_visible: bool,
    pub tick_sound: bool,
}

impl Default for ClockState {
    fn default() -> Self {
        Self {
            selected_zone: None,
            authoritative_timestamp: None,
            is_24_hour: true,
            seconds_visible: true,
            tick_sound: false,
        }
    }
}

impl ClockState {
    pub fn sync_state(&self) -> SyncState {
        if self.authoritative_timestamp.is_some() {
            SyncState::Synced
        } else {
            SyncState::Unsynced
        }
    }

    /// Switch zones. The cached timestamp belongs to the old zone's
    /// selection and is discarded.
    pub fn select_zone(&mut self, zone: Option<String>) {
        self.selected_zone = zone.filter(|z| !z.trim().is_empty());
        self.authoritative_timestamp = None;
    }

    /// Local extrapolation: one tick is one second.
    pub fn advance(&mut self) {
        if let Some(ts) = self.authoritative_timestamp.as_mut() {
            *ts = ts.saturating_add(1);
        }
    }

    pub fn resync(&mut self, timestamp: i64) {
        self.authoritative_timestamp = Some(timestamp);
    }
}
