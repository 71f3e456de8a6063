use super::resolver::resolve_time;
use crate::domain::{ClockState, DayPeriod, DisplayFields, Reading, SyncState, ThemeTracker};
use crate::error::SyncError;
use crate::ports::{Clock, ServerTime};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Everything one tick writes to the display
#[derive(Debug, Clone, PartialEq)]
pub struct ClockFrame {
    pub zone: Option<String>,
    pub reading: Reading,
    pub display: DisplayFields,
    pub period: DayPeriod,
    /// Set only when the day-period band differs from the last frame
    pub theme_changed: Option<DayPeriod>,
    /// Whether the tick sound should play for this frame
    pub chime: bool,
    pub sync: SyncState,
}

/// The render-loop state machine, without timers.
///
/// Owns the [`ClockState`]; the scheduler feeds it ticks and fetch results
/// tagged with a generation, and anything from an older generation (a loop
/// that was cancelled by a zone change) is ignored.
pub struct ClockEngine {
    state: ClockState,
    clock: Arc<dyn Clock>,
    theme: ThemeTracker,
    generation: u64,
}

impl ClockEngine {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_state(clock, ClockState::default())
    }

    pub fn with_state(clock: Arc<dyn Clock>, state: ClockState) -> Self {
        Self {
            state,
            clock,
            theme: ThemeTracker::new(),
            generation: 0,
        }
    }

    pub fn state(&self) -> &ClockState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current_theme(&self) -> Option<DayPeriod> {
        self.theme.current()
    }

    /// Select a zone and forget the cached timestamp.
    /// Returns the new generation for the loops that will serve it.
    pub fn select_zone(&mut self, zone: Option<String>) -> u64 {
        self.state.select_zone(zone);
        self.generation += 1;
        info!(
            "Selected zone {:?} (generation {})",
            self.state.selected_zone, self.generation
        );
        self.generation
    }

    /// Advance one second and produce the next frame
    pub fn tick(&mut self, generation: u64) -> Option<ClockFrame> {
        if generation != self.generation {
            debug!("Ignoring tick from stale generation {}", generation);
            return None;
        }
        self.state.advance();
        let chime = self.state.tick_sound;
        Some(self.frame(chime))
    }

    /// The current frame, without advancing
    pub fn render(&mut self) -> ClockFrame {
        self.frame(false)
    }

    /// Apply the outcome of an authoritative fetch.
    ///
    /// Success replaces the extrapolated timestamp outright. Failure leaves
    /// the cached value (if any) ticking on.
    pub fn apply_time_fetch(
        &mut self,
        generation: u64,
        zone: &str,
        result: &Result<ServerTime, SyncError>,
    ) -> Option<ClockFrame> {
        if generation != self.generation || self.state.selected_zone.as_deref() != Some(zone) {
            debug!("Dropping time for {} from stale generation {}", zone, generation);
            return None;
        }

        match result {
            Ok(server_time) => {
                if let Some(previous) = self.state.authoritative_timestamp {
                    let drift = previous - server_time.timestamp;
                    if drift != 0 {
                        debug!("Resync for {} corrected {}s of drift", zone, drift);
                    }
                }
                self.state.resync(server_time.timestamp);
                Some(self.frame(false))
            }
            Err(e) => {
                warn!("Time sync for {} failed: {}", zone, e);
                None
            }
        }
    }

    pub fn toggle_24_hour(&mut self) -> ClockFrame {
        self.state.is_24_hour = !self.state.is_24_hour;
        self.render()
    }

    pub fn toggle_seconds(&mut self) -> ClockFrame {
        self.state.seconds_visible = !self.state.seconds_visible;
        self.render()
    }

    pub fn set_tick_sound(&mut self, enabled: bool) {
        self.state.tick_sound = enabled;
    }

    fn frame(&mut self, chime: bool) -> ClockFrame {
        let reading = resolve_time(
            self.state.selected_zone.as_deref(),
            self.state.authoritative_timestamp,
            self.clock.as_ref(),
        );
        let display =
            DisplayFields::format(&reading.civil, self.state.is_24_hour, self.state.seconds_visible);
        let period = DayPeriod::from_hour(reading.hour());
        let theme_changed = self.theme.observe(period);

        ClockFrame {
            zone: self.state.selected_zone.clone(),
            reading,
            display,
            period,
            theme_changed,
            chime,
            sync: self.state.sync_state(),
        }
    }
}
