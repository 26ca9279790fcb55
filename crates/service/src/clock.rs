use arc_swap::ArcSwap;
use chrono::{DateTime, Duration, Utc};

/// Source of "now" for timestamps and calendar windows.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> { Utc::now() }
}

/// Manually driven clock.
pub struct FixedClock {
    now: ArcSwap<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { now: ArcSwap::from_pointee(at) }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        self.now.store(std::sync::Arc::new(at));
    }

    pub fn advance(&self, by: Duration) {
        let next = *self.now.load_full() + by;
        self.set(next);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> { *self.now.load_full() }
}
