use std::time::{Duration, Instant};

/// A cancellable repeating schedule.
///
/// The ticker never sleeps or spawns anything; the owner polls it with the
/// current instant and gets back the ticks that have come due.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn every(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    /// Drops any pending tick. A cancelled ticker never fires until re-armed.
    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns the instant of the next due tick, if it is not after `now`,
    /// and schedules the following one.
    pub fn poll(&mut self, now: Instant) -> Option<Instant> {
        let due = self.next_due?;
        if due > now {
            return None;
        }
        self.next_due = Some(due + self.period);
        Some(due)
    }
}
