pub mod time;
pub mod time_api;
pub mod persistence;
pub mod sound;

// Re-exports
pub use time::*;
pub use time_api::*;
pub use persistence::*;
pub use sound::*;
