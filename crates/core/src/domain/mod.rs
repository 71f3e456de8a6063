pub mod zone;
pub mod state;
pub mod period;
pub mod format;
pub mod reading;
pub mod events;

// Re-exports for convenience
pub use zone::*;
pub use state::*;
pub use period::*;
pub use format::*;
pub use reading::*;
pub use events::*;
