use super::scheduler::{ClockScheduler, TICK_INTERVAL};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tzclock_core::app::{ClockEngine, ClockFrame, Command};
use tzclock_core::domain::{ClockState, Event, ZoneCatalog};
use tzclock_core::ports::{AppConfig, Clock, ConfigStore, TickSound, TimeApi};

/// What the UI needs to do after the service handled something
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceUpdate {
    /// Redraw with this frame
    Frame(ClockFrame),
    /// Replace the zone list
    Zones(ZoneCatalog),
    Quit,
    Nothing,
}

/// Owns the clock engine and the loops feeding it.
///
/// All state changes happen through `handle_command` and `handle_event` on
/// the caller's task; background tasks only produce events.
pub struct ClockService {
    engine: ClockEngine,
    scheduler: ClockScheduler,
    config_store: Arc<dyn ConfigStore>,
    sound: Arc<dyn TickSound>,
    config: AppConfig,
}

impl ClockService {
    pub fn new(
        api: Arc<dyn TimeApi>,
        clock: Arc<dyn Clock>,
        config_store: Arc<dyn ConfigStore>,
        sound: Arc<dyn TickSound>,
        config: AppConfig,
    ) -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let scheduler = ClockScheduler::new(
            api,
            event_tx,
            TICK_INTERVAL,
            Duration::from_secs(config.sync.resync_interval_secs),
        );

        let state = ClockState {
            is_24_hour: config.display.use_24_hour,
            seconds_visible: config.display.show_seconds,
            tick_sound: config.display.tick_sound,
            ..ClockState::default()
        };

        let service = Self {
            engine: ClockEngine::with_state(clock, state),
            scheduler,
            config_store,
            sound,
            config,
        };

        (service, event_rx)
    }

    pub fn engine(&self) -> &ClockEngine {
        &self.engine
    }

    /// Load the zone list and start the clock, on the default zone if one
    /// is configured
    pub fn start(&mut self) -> ClockFrame {
        info!("Starting clock service against {}", self.config.server_url);
        self.scheduler.load_zones();

        match self.config.default_zone.clone() {
            Some(zone) => self.select_zone(zone),
            None => {
                self.scheduler.start_ticking(None, self.engine.generation());
                self.engine.render()
            }
        }
    }

    /// Cancel both loops, forget the cached timestamp, try one fetch and
    /// restart the loops without waiting for it. A blank zone clears the
    /// selection and nothing is fetched for it.
    pub fn select_zone(&mut self, zone: String) -> ClockFrame {
        self.scheduler.stop();
        let zone = Some(zone.trim().to_string()).filter(|z| !z.is_empty());
        let generation = self.engine.select_zone(zone.clone());
        match &zone {
            Some(zone) => self.scheduler.fetch_once(zone.clone(), generation),
            None => warn!("Blank timezone selected, showing local time"),
        }
        self.scheduler.start_ticking(zone, generation);
        self.engine.render()
    }

    pub fn handle_command(&mut self, cmd: Command) -> ServiceUpdate {
        match cmd {
            Command::SelectZone { zone } => ServiceUpdate::Frame(self.select_zone(zone)),
            Command::ToggleHourFormat => ServiceUpdate::Frame(self.engine.toggle_24_hour()),
            Command::ToggleSeconds => ServiceUpdate::Frame(self.engine.toggle_seconds()),
            Command::ToggleTickSound => {
                let enabled = !self.engine.state().tick_sound;
                self.engine.set_tick_sound(enabled);
                self.config.display.tick_sound = enabled;
                info!("Tick sound {}", if enabled { "enabled" } else { "disabled" });
                if let Err(e) = self.persist_tick_sound(enabled) {
                    warn!("Failed to save tick sound setting: {:#}", e);
                }
                ServiceUpdate::Frame(self.engine.render())
            }
            Command::ReloadZones => {
                self.scheduler.load_zones();
                ServiceUpdate::Nothing
            }
            Command::Quit => {
                info!("Quit command received");
                self.shutdown();
                ServiceUpdate::Quit
            }
        }
    }

    pub fn handle_event(&mut self, event: Event) -> ServiceUpdate {
        match event {
            Event::Tick { generation } => match self.engine.tick(generation) {
                Some(frame) => {
                    if frame.chime {
                        self.sound.tick();
                    }
                    ServiceUpdate::Frame(frame)
                }
                None => ServiceUpdate::Nothing,
            },
            Event::TimeFetched {
                generation,
                zone,
                result,
            } => self
                .engine
                .apply_time_fetch(generation, &zone, &result)
                .map_or(ServiceUpdate::Nothing, ServiceUpdate::Frame),
            Event::ZonesLoaded { catalog } => ServiceUpdate::Zones(catalog),
        }
    }

    pub fn shutdown(&mut self) {
        self.scheduler.stop();
    }

    /// Write only the sound flag so CLI overrides never reach the file
    fn persist_tick_sound(&self, enabled: bool) -> Result<()> {
        let mut stored = self.config_store.load()?;
        stored.display.tick_sound = enabled;
        self.config_store.save(&stored)
    }
}
