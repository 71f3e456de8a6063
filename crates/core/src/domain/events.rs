use super::zone::ZoneCatalog;
use crate::error::SyncError;
use crate::ports::ServerTime;

/// Events emitted by the scheduler and background fetches
#[derive(Debug, Clone)]
pub enum Event {
    /// One display interval elapsed
    Tick { generation: u64 },

    /// A fetch of the authoritative time finished
    TimeFetched {
        generation: u64,
        zone: String,
        result: Result<ServerTime, SyncError>,
    },

    /// The zone list is available (possibly the built-in fallback)
    ZonesLoaded { catalog: ZoneCatalog },
}
