use chrono::{DateTime, Utc};

/// Source of "now" for taps.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock of the machine running the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
