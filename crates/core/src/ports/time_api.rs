use crate::domain::TimezoneEntry;
use crate::error::SyncError;
use async_trait::async_trait;

/// Parsed `/api/time` response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerTime {
    pub status: Option<String>,
    /// Unix seconds
    pub timestamp: i64,
    pub gmt_offset: Option<i64>,
}

/// Port for the remote time server
#[async_trait]
pub trait TimeApi: Send + Sync {
    /// List the zones the server knows about
    async fn fetch_timezones(&self) -> Result<Vec<TimezoneEntry>, SyncError>;

    /// Authoritative current time for a zone
    async fn fetch_time(&self, zone: &str) -> Result<ServerTime, SyncError>;
}
