//! tzclock Core - Pure clock logic with no I/O
//!
//! This crate contains the time resolution and drift-correction logic,
//! domain types, and ports (interfaces) for tzclock. It has no dependencies
//! on UI frameworks, HTTP clients, or filesystem operations - those are
//! handled by adapters.

pub mod domain;
pub mod ports;
pub mod app;
pub mod error;

// Re-exports for ergonomics
pub use domain::*;
pub use error::*;
