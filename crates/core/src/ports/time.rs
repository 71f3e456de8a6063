use chrono::{DateTime, FixedOffset, Local};

/// Clock abstraction for testability
pub trait Clock: Send + Sync {
    /// Current local machine time, carrying the machine's UTC offset
    fn now(&self) -> DateTime<FixedOffset>;
}

/// System clock implementation
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock frozen at one instant
#[derive(Debug, Clone)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}
