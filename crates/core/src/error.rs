use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;

/// Failures while talking to the time server.
///
/// None of these are fatal: the clock keeps running on its cached
/// timestamp or on the timezone database until the next resync.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server responded with status {0}")]
    Status(u16),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}
