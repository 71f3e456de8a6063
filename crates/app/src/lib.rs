//! tzclock application library
//!
//! This exposes the public API of the tzclock application for testing and external usage.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod runtime;
pub mod services;
pub mod tui;
