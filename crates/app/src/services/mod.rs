pub mod scheduler;
pub mod clock_service;
