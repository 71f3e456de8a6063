use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, info, warn};
use tzclock_core::domain::{Event, ZoneCatalog};
use tzclock_core::ports::TimeApi;

/// Each display tick advances the clock by one second
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Drives the clock: a display interval and a resync interval, each a
/// tokio task that only sends events. Whoever owns the engine applies them.
pub struct ClockScheduler {
    api: Arc<dyn TimeApi>,
    event_tx: mpsc::UnboundedSender<Event>,
    tick_interval: Duration,
    resync_interval: Duration,
    tick_task: Option<JoinHandle<()>>,
    resync_task: Option<JoinHandle<()>>,
}

impl ClockScheduler {
    pub fn new(
        api: Arc<dyn TimeApi>,
        event_tx: mpsc::UnboundedSender<Event>,
        tick_interval: Duration,
        resync_interval: Duration,
    ) -> Self {
        Self {
            api,
            event_tx,
            tick_interval,
            resync_interval,
            tick_task: None,
            resync_task: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.tick_task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Start both loops for `generation`, cancelling any that are running.
    /// Without a zone there is nothing to resync against, so only the
    /// display loop runs.
    pub fn start_ticking(&mut self, zone: Option<String>, generation: u64) {
        self.stop();

        let event_tx = self.event_tx.clone();
        let period = self.tick_interval;
        self.tick_task = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if event_tx.send(Event::Tick { generation }).is_err() {
                    // Receiver dropped, stop ticking
                    break;
                }
            }
        }));

        if let Some(zone) = zone {
            let api = self.api.clone();
            let event_tx = self.event_tx.clone();
            let period = self.resync_interval;
            self.resync_task = Some(tokio::spawn(async move {
                let mut interval = interval_at(Instant::now() + period, period);
                loop {
                    interval.tick().await;
                    debug!("Resyncing {}", zone);
                    let result = api.fetch_time(&zone).await;
                    let event = Event::TimeFetched {
                        generation,
                        zone: zone.clone(),
                        result,
                    };
                    if event_tx.send(event).is_err() {
                        break;
                    }
                }
            }));
        }

        info!(
            "Clock loops started (generation {}, tick {:?}, resync {:?})",
            generation, self.tick_interval, self.resync_interval
        );
    }

    /// One authoritative fetch, reported as a `TimeFetched` event
    pub fn fetch_once(&self, zone: String, generation: u64) {
        let api = self.api.clone();
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = api.fetch_time(&zone).await;
            let _ = event_tx.send(Event::TimeFetched {
                generation,
                zone,
                result,
            });
        });
    }

    /// Fetch the zone list, substituting the built-in list on any failure
    pub fn load_zones(&self) {
        let api = self.api.clone();
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            let catalog = match api.fetch_timezones().await {
                Ok(entries) => ZoneCatalog::from_server(entries),
                Err(e) => {
                    warn!("Failed to load timezones, using built-in list: {}", e);
                    ZoneCatalog::fallback()
                }
            };
            info!("{} timezones available ({:?})", catalog.entries.len(), catalog.source);
            let _ = event_tx.send(Event::ZonesLoaded { catalog });
        });
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.tick_task.take() {
            task.abort();
        }
        if let Some(task) = self.resync_task.take() {
            task.abort();
        }
    }
}

impl Drop for ClockScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
