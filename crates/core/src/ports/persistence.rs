use anyhow::Result;

/// Configuration store interface
pub trait ConfigStore: Send + Sync {
    /// Load configuration from storage
    fn load(&self) -> Result<AppConfig>;

    /// Save configuration to storage
    fn save(&self, config: &AppConfig) -> Result<()>;
}

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// Application configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AppConfig {
    pub version: u32,
    pub server_url: String,
    #[serde(default)]
    pub default_zone: Option<String>,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub use_24_hour: bool,
    pub show_seconds: bool,
    /// Ring the terminal bell every tick. Persisted whenever toggled.
    pub tick_sound: bool,
}

/// Resync and network settings. The display tick is not configurable:
/// every tick advances the clock by exactly one second.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    pub resync_interval_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server_url: DEFAULT_SERVER_URL.to_string(),
            default_zone: None,
            display: DisplayConfig::default(),
            sync: SyncConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            use_24_hour: true,
            show_seconds: true,
            tick_sound: false,
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            resync_interval_secs: 60,
            request_timeout_secs: 5,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.server_url.trim().is_empty() {
            return Err(crate::error::CoreError::InvalidConfig {
                reason: "server_url must not be empty".to_string(),
            });
        }
        if self.sync.resync_interval_secs == 0 {
            return Err(crate::error::CoreError::InvalidConfig {
                reason: "resync interval must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
