/// Commands that can be sent to the clock service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Switch the clock to another zone and resync
    SelectZone { zone: String },

    /// Flip between 12-hour and 24-hour display
    ToggleHourFormat,

    /// Show or hide the seconds field
    ToggleSeconds,

    /// Enable or disable the tick sound (persisted)
    ToggleTickSound,

    /// Fetch the zone list again
    ReloadZones,

    /// Quit the application
    Quit,
}
