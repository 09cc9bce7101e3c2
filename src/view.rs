// view.rs - telemetry view state driven by the tick timer
use crate::config::Config;
use crate::datawindow::DataWindow;
use crate::error::Result;
use crate::series::Series;
use crate::settings;
use crate::stats::TrafficStats;
use crate::telemetry::{Sample, SampleGenerator};
use crate::ticker::Ticker;
use rand::rngs::StdRng;
use rand::Rng;
use std::time::{Duration, Instant};

/// Owns the sample buffer, the generator and the timer. Everything runs on the UI thread:
/// the frame callback polls the timer and the render path reads the buffer afterwards.
pub struct TelemetryView<R = StdRng> {
    data_window: DataWindow,
    generator: SampleGenerator<R>,
    stats: TrafficStats,
    ticker: Ticker,
    backfill: bool,
}

impl<R: Rng> TelemetryView<R> {
    pub fn new(config: &Config, generator: SampleGenerator<R>) -> Self {
        Self {
            data_window: DataWindow::new(config),
            generator,
            stats: TrafficStats::default(),
            ticker: Ticker::new(config.tick_period()),
            backfill: config.backfill,
        }
    }

    /// Fills the history (if enabled) and starts the timer.
    pub fn start(&mut self, now: Instant, now_ms: i64) {
        if self.backfill && self.data_window.is_empty() {
            let count = self.data_window.capacity();
            let tick_ms = self.tick_ms();
            let history = self.generator.backfill(now_ms, count, tick_ms);
            self.data_window.extend(history);
            log::info!("Backfilled {} samples", count);
        }
        self.ticker.start(now);
        log::info!("Timer started, period {:?}", self.ticker.period());
    }

    pub fn stop(&mut self) {
        if self.ticker.is_running() {
            self.ticker.stop();
            log::info!("Timer stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    fn tick_ms(&self) -> i64 {
        self.ticker.period().as_millis() as i64
    }

    /// Produces one sample stamped `now_ms`, appends it and maybe walks the counters.
    pub fn tick(&mut self, now_ms: i64) -> Sample {
        let sample = self.generator.generate(now_ms);
        let evicted = self.data_window.push(sample);
        self.stats.maybe_update(self.generator.rng());
        log::debug!(
            "tick up {:.1} down {:.1} total {:.1} (len {}, evicted {})",
            sample.upload,
            sample.download,
            sample.total,
            self.data_window.len(),
            evicted.len()
        );
        sample
    }

    /// Runs the ticks that fell due and returns how many ran. Catch-up ticks are
    /// back-dated one period apart; at most one buffer's worth is replayed, older
    /// periods are skipped since they would be evicted at once.
    pub fn poll(&mut self, now: Instant, now_ms: i64) -> u32 {
        let fired = self.ticker.poll(now);
        let cap = u32::try_from(self.data_window.capacity()).unwrap_or(u32::MAX);
        let run = fired.min(cap);
        if fired > run {
            log::warn!(
                "Timer fell behind by {} ticks, skipped {} and replaying {}",
                fired,
                fired - run,
                run
            );
        } else if fired > settings::CATCH_UP_WARN_TICKS {
            log::warn!("Timer fell behind, catching up {} ticks", fired);
        }
        let tick_ms = self.tick_ms();
        for i in (0..run).rev() {
            self.tick(now_ms - i as i64 * tick_ms);
        }
        run
    }

    pub fn until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.ticker.until_next(now)
    }

    pub fn set_timeframe(&mut self, secs: u32) -> u32 {
        let applied = self.data_window.set_timeframe(secs);
        log::info!("Timeframe set to {}s", applied);
        applied
    }

    pub fn increase_timeframe(&mut self) -> u32 {
        let applied = self.data_window.increase_timeframe();
        log::info!("Timeframe increased to {}s", applied);
        applied
    }

    pub fn decrease_timeframe(&mut self) -> u32 {
        let applied = self.data_window.decrease_timeframe();
        log::info!("Timeframe decreased to {}s", applied);
        applied
    }

    pub fn set_view_window(&mut self, start: f64, end: f64) -> (f64, f64) {
        self.data_window.set_view_window(start, end)
    }

    pub fn toggle_series(&mut self, series: Series) -> bool {
        self.data_window.toggle_series(series)
    }

    pub fn toggle_series_named(&mut self, name: &str) -> Result<bool> {
        self.data_window.toggle_series_named(name)
    }

    pub fn data_window(&self) -> &DataWindow {
        &self.data_window
    }

    pub fn data_window_mut(&mut self) -> &mut DataWindow {
        &mut self.data_window
    }

    pub fn stats(&self) -> &TrafficStats {
        &self.stats
    }
}
