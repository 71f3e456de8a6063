pub mod commands;
pub mod resolver;
pub mod engine;

// Re-exports
pub use commands::*;
pub use resolver::*;
pub use engine::*;
