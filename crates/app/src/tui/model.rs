use crate::services::clock_service::ServiceUpdate;
use tzclock_core::app::ClockFrame;
use tzclock_core::domain::{ClockState, DayPeriod, TimezoneEntry, ZoneCatalog};

/// The TUI Model - this represents the complete UI state
#[derive(Debug, Default)]
pub struct TuiModel {
    /// Last frame produced by the clock service
    pub frame: Option<ClockFrame>,

    /// Applied theme; only changes when the day-period band changes
    pub theme: Option<DayPeriod>,

    /// Zones offered by the picker
    pub catalog: ZoneCatalog,
    pub zones_loaded: bool,

    pub picker: PickerState,

    /// Mirror of the display settings for the settings panel
    pub settings: SettingsState,

    /// Current view mode
    pub mode: ViewMode,

    /// Whether the application should quit
    pub should_quit: bool,
}

/// Zone picker cursor and type-to-filter text
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PickerState {
    pub cursor: usize,
    pub filter: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsState {
    pub is_24_hour: bool,
    pub seconds_visible: bool,
    pub tick_sound: bool,
}

impl Default for SettingsState {
    fn default() -> Self {
        let state = ClockState::default();
        Self {
            is_24_hour: state.is_24_hour,
            seconds_visible: state.seconds_visible,
            tick_sound: state.tick_sound,
        }
    }
}

/// Different view modes for the TUI
#[derive(Debug, Default, Clone, PartialEq)]
pub enum ViewMode {
    #[default]
    /// The clock face
    Clock,

    /// Choosing a timezone
    ZonePicker,

    /// Display toggles
    Settings,

    /// Help view
    Help,
}

impl TuiModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply what the clock service reported
    pub fn apply_update(&mut self, update: ServiceUpdate) {
        match update {
            ServiceUpdate::Frame(frame) => self.apply_frame(frame),
            ServiceUpdate::Zones(catalog) => {
                self.catalog = catalog;
                self.zones_loaded = true;
                self.clamp_cursor();
            }
            ServiceUpdate::Quit => self.should_quit = true,
            ServiceUpdate::Nothing => {}
        }
    }

    pub fn apply_frame(&mut self, frame: ClockFrame) {
        if let Some(period) = frame.theme_changed {
            self.theme = Some(period);
        }
        self.frame = Some(frame);
    }

    pub fn sync_settings(&mut self, state: &ClockState) {
        self.settings = SettingsState {
            is_24_hour: state.is_24_hour,
            seconds_visible: state.seconds_visible,
            tick_sound: state.tick_sound,
        };
    }

    /// Entry for the zone currently shown, if the catalog knows it
    pub fn current_entry(&self) -> Option<&TimezoneEntry> {
        let zone = self.frame.as_ref()?.zone.as_deref()?;
        self.catalog.find(zone)
    }

    pub fn visible_zones(&self) -> Vec<&TimezoneEntry> {
        self.catalog.filtered(&self.picker.filter)
    }

    pub fn highlighted_zone(&self) -> Option<&TimezoneEntry> {
        self.visible_zones().get(self.picker.cursor).copied()
    }

    /// Open the picker with the current zone highlighted
    pub fn open_picker(&mut self) {
        self.picker.filter.clear();
        let current = self.frame.as_ref().and_then(|f| f.zone.clone());
        self.picker.cursor = current
            .and_then(|zone| self.catalog.entries.iter().position(|e| e.zone == zone))
            .unwrap_or(0);
        self.mode = ViewMode::ZonePicker;
    }

    pub fn picker_up(&mut self) {
        if self.picker.cursor > 0 {
            self.picker.cursor -= 1;
        }
    }

    pub fn picker_down(&mut self) {
        if self.picker.cursor + 1 < self.visible_zones().len() {
            self.picker.cursor += 1;
        }
    }

    pub fn push_filter(&mut self, c: char) {
        self.picker.filter.push(c);
        self.picker.cursor = 0;
    }

    pub fn pop_filter(&mut self) {
        self.picker.filter.pop();
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible_zones().len();
        if self.picker.cursor >= len {
            self.picker.cursor = len.saturating_sub(1);
        }
    }
}
