// ticker.rs - fixed-period timer polled from the frame callback
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            next_due: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Number of periods that elapsed since the last poll. Deadlines advance by whole
    /// periods so a slow frame is caught up instead of drifting.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(due) = self.next_due else {
            return 0;
        };
        if now < due {
            return 0;
        }
        let missed = (now - due).as_nanos() / self.period.as_nanos();
        let fired = u32::try_from(missed + 1).unwrap_or(u32::MAX);
        self.next_due = Some(due + self.period * fired);
        fired
    }

    /// Time left until the next firing, `None` while stopped.
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}
