// timeframe.rs - retained-history length, clamped to a stepped range
use crate::config::Config;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeframeBounds {
    pub min_secs: u32,
    pub max_secs: u32,
    pub step_secs: u32,
}

impl TimeframeBounds {
    pub fn from_config(config: &Config) -> Self {
        Self {
            min_secs: config.min_timeframe_secs,
            max_secs: config.max_timeframe_secs,
            step_secs: config.timeframe_step_secs.max(1),
        }
    }

    /// Clamps into `[min, max]` and snaps down onto the step grid anchored at `min`.
    pub fn clamp(&self, secs: u32) -> u32 {
        let clamped = secs.min(self.max_secs).max(self.min_secs);
        let steps = clamped.saturating_sub(self.min_secs) / self.step_secs.max(1);
        self.min_secs + steps * self.step_secs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeframe {
    secs: u32,
    bounds: TimeframeBounds,
}

impl Timeframe {
    pub fn new(secs: u32, bounds: TimeframeBounds) -> Self {
        Self {
            secs: bounds.clamp(secs),
            bounds,
        }
    }

    pub fn secs(&self) -> u32 {
        self.secs
    }

    pub fn bounds(&self) -> TimeframeBounds {
        self.bounds
    }

    /// Returns the value actually applied.
    pub fn set(&mut self, secs: u32) -> u32 {
        self.secs = self.bounds.clamp(secs);
        self.secs
    }

    pub fn increase(&mut self) -> u32 {
        self.set(self.secs.saturating_add(self.bounds.step_secs))
    }

    pub fn decrease(&mut self) -> u32 {
        self.set(self.secs.saturating_sub(self.bounds.step_secs))
    }

    /// Largest value on the step grid, which is below `max_secs` when the range is off-grid.
    pub fn max_reachable(&self) -> u32 {
        self.bounds.clamp(self.bounds.max_secs)
    }

    pub fn can_increase(&self) -> bool {
        self.secs < self.max_reachable()
    }

    pub fn can_decrease(&self) -> bool {
        self.secs > self.bounds.min_secs
    }

    /// Number of samples retained at the given tick period, never zero.
    pub fn capacity(&self, tick_period: Duration) -> usize {
        let tick_ms = tick_period.as_millis().max(1);
        let cap = (self.secs as u128 * 1000) / tick_ms;
        (cap as usize).max(1)
    }

    /// Short label for the history control: minutes below an hour, hours above.
    pub fn label(&self) -> String {
        if self.secs < 3600 {
            format!("{}m", (self.secs as f64 / 60.0).round())
        } else {
            format!("{}h", (self.secs as f64 / 3600.0).round())
        }
    }
}

pub fn format_duration(secs: f64) -> String {
    if secs < 60.0 {
        format!("{}s", secs.round())
    } else if secs < 3600.0 {
        format!("{}m", (secs / 60.0).round())
    } else {
        format!("{}h", (secs / 3600.0).round())
    }
}
