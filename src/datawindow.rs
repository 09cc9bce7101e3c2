use crate::config::Config;
use crate::error::Result;
use crate::series::{Series, SeriesVisibility};
use crate::settings::{REFERENCE_FLOOR, REFERENCE_HEADROOM, REFERENCE_STEPS};
use crate::telemetry::Sample;
use crate::timeframe::{Timeframe, TimeframeBounds};
use std::collections::vec_deque;
use std::collections::VecDeque;
use std::time::Duration;

/// Rolling sample buffer plus everything that selects what part of it is drawn.
#[derive(Debug)]
pub struct DataWindow {
    samples: VecDeque<Sample>,
    timeframe: Timeframe,
    tick_period: Duration,
    /// (start, end) in seconds from the start of the timeframe
    view_window: (f64, f64),
    min_window: f64,
    visibility: SeriesVisibility,
    cached_levels: Option<Vec<f64>>,
}

impl DataWindow {
    pub fn new(config: &Config) -> Self {
        let timeframe = Timeframe::new(
            config.initial_timeframe_secs,
            TimeframeBounds::from_config(config),
        );
        let tf = timeframe.secs() as f64;
        let mut data_window = Self {
            samples: VecDeque::with_capacity(timeframe.capacity(config.tick_period())),
            timeframe,
            tick_period: config.tick_period(),
            view_window: (0.0, tf),
            min_window: config.min_window_secs,
            visibility: SeriesVisibility::default(),
            cached_levels: None,
        };
        data_window.set_view_window(tf - config.initial_window_secs, tf);
        data_window
    }

    pub fn capacity(&self) -> usize {
        self.timeframe.capacity(self.tick_period)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> vec_deque::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn newest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    pub fn oldest(&self) -> Option<&Sample> {
        self.samples.front()
    }

    /// Appends one sample and evicts from the front past capacity. Returns the evicted
    /// samples, oldest first.
    pub fn push(&mut self, mut sample: Sample) -> Vec<Sample> {
        if let Some(last) = self.samples.back() {
            if sample.time <= last.time {
                sample.time = last.time + 1;
            }
        }
        self.samples.push_back(sample);
        self.cached_levels = None;
        self.evict()
    }

    pub fn extend(&mut self, samples: impl IntoIterator<Item = Sample>) {
        for sample in samples {
            self.push(sample);
        }
    }

    fn evict(&mut self) -> Vec<Sample> {
        let cap = self.capacity();
        let excess = self.samples.len().saturating_sub(cap);
        self.samples.drain(..excess).collect()
    }

    pub fn timeframe(&self) -> &Timeframe {
        &self.timeframe
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// Applies a new (clamped) timeframe. The view window keeps its width and is anchored
    /// to the new end; a smaller capacity trims the oldest samples right away.
    pub fn set_timeframe(&mut self, secs: u32) -> u32 {
        let width = self.view_window.1 - self.view_window.0;
        let applied = self.timeframe.set(secs);
        self.after_timeframe_change(width);
        applied
    }

    pub fn increase_timeframe(&mut self) -> u32 {
        let width = self.view_window.1 - self.view_window.0;
        let applied = self.timeframe.increase();
        self.after_timeframe_change(width);
        applied
    }

    pub fn decrease_timeframe(&mut self) -> u32 {
        let width = self.view_window.1 - self.view_window.0;
        let applied = self.timeframe.decrease();
        self.after_timeframe_change(width);
        applied
    }

    fn after_timeframe_change(&mut self, width: f64) {
        let tf = self.timeframe.secs() as f64;
        self.set_view_window(tf - width, tf);
        let evicted = self.evict();
        if !evicted.is_empty() {
            log::debug!("Timeframe shrink evicted {} samples", evicted.len());
        }
        self.cached_levels = None;
    }

    pub fn min_window(&self) -> f64 {
        self.min_window
    }

    pub fn view_window(&self) -> (f64, f64) {
        self.view_window
    }

    pub fn view_width(&self) -> f64 {
        self.view_window.1 - self.view_window.0
    }

    /// Clamps into `[0, timeframe]`, orders the edges and widens to the minimum width.
    pub fn set_view_window(&mut self, start: f64, end: f64) -> (f64, f64) {
        let tf = self.timeframe.secs() as f64;
        let min_w = self.min_window.min(tf);
        let start = if start.is_finite() { start } else { 0.0 };
        let end = if end.is_finite() { end } else { tf };

        let (mut start, mut end) = {
            let a = start.clamp(0.0, tf);
            let b = end.clamp(0.0, tf);
            if a <= b { (a, b) } else { (b, a) }
        };
        if end - start < min_w {
            end = start + min_w;
            if end > tf {
                end = tf;
                start = tf - min_w;
            }
        }
        self.set_window_raw(start, end)
    }

    /// Moves the start edge; it stops `min_window` short of the end edge.
    pub fn drag_start(&mut self, pos: f64) -> (f64, f64) {
        let (_, end) = self.view_window;
        let limit = (end - self.min_window).max(0.0);
        let start = if pos.is_finite() { pos.max(0.0).min(limit) } else { self.view_window.0 };
        self.set_window_raw(start, end)
    }

    /// Moves the end edge; it stops `min_window` short of the start edge.
    pub fn drag_end(&mut self, pos: f64) -> (f64, f64) {
        let (start, _) = self.view_window;
        let tf = self.timeframe.secs() as f64;
        let end = if pos.is_finite() {
            pos.max(start + self.min_window).min(tf)
        } else {
            self.view_window.1
        };
        self.set_window_raw(start, end)
    }

    /// Re-centres a window of the current width on `pos`, shifted back inside the timeframe.
    pub fn center_view_window(&mut self, pos: f64) -> (f64, f64) {
        let tf = self.timeframe.secs() as f64;
        let width = self.view_width();
        let half = width / 2.0;
        let pos = if pos.is_finite() { pos } else { tf / 2.0 };
        let mut start = (pos - half).max(0.0);
        let mut end = (pos + half).min(tf);
        if end - start < width {
            if start == 0.0 {
                end = width.min(tf);
            } else {
                start = (tf - width).max(0.0);
            }
        }
        self.set_window_raw(start, end)
    }

    fn set_window_raw(&mut self, start: f64, end: f64) -> (f64, f64) {
        if self.view_window != (start, end) {
            log::debug!("View window {:.1}..{:.1}s", start, end);
            self.view_window = (start, end);
            self.cached_levels = None;
        }
        self.view_window
    }

    /// Index range of the buffer shown in the main chart.
    pub fn visible_range(&self) -> (usize, usize) {
        let tf = self.timeframe.secs() as f64;
        let len = self.samples.len() as f64;
        let (start, end) = self.view_window;
        let start_idx = ((start / tf) * len).floor() as usize;
        let end_idx = ((end / tf) * len).floor() as usize;
        let end_idx = end_idx.min(self.samples.len());
        (start_idx.min(end_idx), end_idx)
    }

    pub fn visible_samples(&self) -> vec_deque::Iter<'_, Sample> {
        let (start, end) = self.visible_range();
        self.samples.range(start..end)
    }

    pub fn visibility(&self) -> &SeriesVisibility {
        &self.visibility
    }

    pub fn is_visible(&self, series: Series) -> bool {
        self.visibility.is_visible(series)
    }

    pub fn toggle_series(&mut self, series: Series) -> bool {
        let shown = self.visibility.toggle(series);
        log::debug!("Series {} {}", series, if shown { "shown" } else { "hidden" });
        self.cached_levels = None;
        shown
    }

    pub fn toggle_series_named(&mut self, name: &str) -> Result<bool> {
        let series: Series = name.parse()?;
        Ok(self.toggle_series(series))
    }

    /// Largest value among the visible series in the visible slice.
    pub fn max_visible_value(&self) -> Option<f64> {
        self.visible_samples()
            .flat_map(|s| self.visibility.visible().map(move |k| s.value(k)))
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
    }

    pub fn reference_levels(&mut self) -> &[f64] {
        if self.cached_levels.is_none() {
            self.cached_levels = Some(reference_levels(self.max_visible_value()));
        }
        self.cached_levels.as_deref().unwrap_or(&[])
    }
}

/// Gridline levels at four equal steps covering the maximum, dropping any that sit
/// 10% or more above it.
pub fn reference_levels(max_visible: Option<f64>) -> Vec<f64> {
    let Some(max) = max_visible else {
        return Vec::new();
    };
    let max_y = max.max(REFERENCE_FLOOR);
    let step = (max_y / REFERENCE_STEPS as f64).ceil();
    (1..=REFERENCE_STEPS)
        .map(|i| step * i as f64)
        .filter(|&level| level < max_y * REFERENCE_HEADROOM)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(tf: u32, step: u32) -> Config {
        Config {
            min_timeframe_secs: tf.min(step),
            max_timeframe_secs: 1_800,
            timeframe_step_secs: step,
            initial_timeframe_secs: tf,
            ..Config::default()
        }
    }

    fn sample(time: i64, v: f64) -> Sample {
        Sample {
            time,
            upload: v,
            download: v / 2.0,
            total: v / 4.0,
        }
    }

    #[test]
    fn default_window_is_last_minute() {
        let dw = DataWindow::new(&Config::default());
        assert_eq!(dw.view_window(), (240.0, 300.0));
        assert_eq!(dw.capacity(), 150);
    }

    #[test]
    fn evicts_oldest_first() {
        let mut dw = DataWindow::new(&config(60, 60));
        for i in 0..30 {
            assert!(dw.push(sample(i * 2_000, 1.0)).is_empty());
        }
        let evicted = dw.push(sample(60_000, 1.0));
        assert_eq!(evicted.len(), 1);
        assert_eq!(evicted[0].time, 0);
        assert_eq!(dw.oldest().unwrap().time, 2_000);
        assert_eq!(dw.len(), 30);
    }

    #[test]
    fn timestamps_stay_strictly_increasing() {
        let mut dw = DataWindow::new(&Config::default());
        dw.push(sample(5_000, 1.0));
        dw.push(sample(5_000, 1.0));
        dw.push(sample(4_000, 1.0));
        let times: Vec<i64> = dw.samples().map(|s| s.time).collect();
        assert_eq!(times, vec![5_000, 5_001, 5_002]);
    }

    #[test]
    fn shrinking_timeframe_trims_history() {
        let mut dw = DataWindow::new(&config(600, 300));
        dw.extend((0..300).map(|i| sample(i * 2_000, 1.0)));
        assert_eq!(dw.len(), 300);
        assert_eq!(dw.set_timeframe(300), 300);
        assert_eq!(dw.len(), 150);
        assert_eq!(dw.oldest().unwrap().time, 150 * 2_000);
        // growing does not resample
        dw.increase_timeframe();
        assert_eq!(dw.len(), 150);
        assert_eq!(dw.capacity(), 300);
    }

    #[test]
    fn timeframe_change_keeps_window_width_at_end() {
        let mut dw = DataWindow::new(&Config::default());
        dw.set_view_window(100.0, 190.0);
        dw.increase_timeframe();
        assert_eq!(dw.view_window(), (510.0, 600.0));
        dw.decrease_timeframe();
        assert_eq!(dw.view_window(), (210.0, 300.0));
    }

    #[test]
    fn view_window_is_normalised() {
        let mut dw = DataWindow::new(&Config::default());
        assert_eq!(dw.set_view_window(-50.0, 400.0), (0.0, 300.0));
        assert_eq!(dw.set_view_window(200.0, 100.0), (100.0, 200.0));
        assert_eq!(dw.set_view_window(100.0, 110.0), (100.0, 130.0));
        assert_eq!(dw.set_view_window(290.0, 300.0), (270.0, 300.0));
        assert_eq!(dw.set_view_window(f64::NAN, f64::NAN), (0.0, 300.0));
    }

    #[test]
    fn drag_handles_cannot_cross() {
        let mut dw = DataWindow::new(&Config::default());
        dw.set_view_window(100.0, 200.0);
        assert_eq!(dw.drag_start(190.0), (170.0, 200.0));
        assert_eq!(dw.drag_start(-10.0), (0.0, 200.0));
        assert_eq!(dw.drag_end(5.0), (0.0, 30.0));
        assert_eq!(dw.drag_end(1_000.0), (0.0, 300.0));
    }

    #[test]
    fn center_keeps_width_inside_timeframe() {
        let mut dw = DataWindow::new(&Config::default());
        dw.set_view_window(0.0, 60.0);
        assert_eq!(dw.center_view_window(150.0), (120.0, 180.0));
        assert_eq!(dw.center_view_window(10.0), (0.0, 60.0));
        assert_eq!(dw.center_view_window(295.0), (240.0, 300.0));
    }

    #[test]
    fn visible_range_maps_seconds_to_indices() {
        let mut dw = DataWindow::new(&Config::default());
        dw.extend((0..150).map(|i| sample(i * 2_000, i as f64)));
        assert_eq!(dw.visible_range(), (120, 150));
        dw.set_view_window(0.0, 150.0);
        assert_eq!(dw.visible_range(), (0, 75));
        assert_eq!(dw.visible_samples().count(), 75);

        let empty = DataWindow::new(&Config::default());
        assert_eq!(empty.visible_range(), (0, 0));
    }

    #[test]
    fn toggling_does_not_touch_samples() {
        let mut dw = DataWindow::new(&Config::default());
        dw.extend((0..40).map(|i| sample(i * 2_000, i as f64)));
        let before: Vec<Sample> = dw.samples().copied().collect();
        dw.toggle_series(Series::Upload);
        dw.toggle_series_named("upload").unwrap();
        assert!(dw.toggle_series_named("latency").is_err());
        let after: Vec<Sample> = dw.samples().copied().collect();
        assert_eq!(before, after);
        assert!(dw.is_visible(Series::Upload));
    }

    #[test]
    fn levels_follow_visible_series_only() {
        let mut dw = DataWindow::new(&Config::default());
        dw.set_view_window(0.0, 300.0);
        dw.extend((0..10).map(|i| sample(i * 2_000, 400.0)));
        assert_eq!(dw.reference_levels(), &[100.0, 200.0, 300.0, 400.0]);
        dw.toggle_series(Series::Upload);
        // download peaks at 200
        assert_eq!(dw.reference_levels(), &[50.0, 100.0, 150.0, 200.0]);
        dw.toggle_series(Series::Download);
        dw.toggle_series(Series::Total);
        assert!(dw.reference_levels().is_empty());
    }

    #[test]
    fn levels_have_a_floor_and_headroom() {
        assert!(reference_levels(None).is_empty());
        assert_eq!(reference_levels(Some(10.0)), vec![13.0, 26.0, 39.0, 52.0]);
        for max in [50.5, 73.3, 99.9, 123.4, 401.0, 599.9] {
            let levels = reference_levels(Some(max));
            let max_y = max.max(REFERENCE_FLOOR);
            assert!(!levels.is_empty());
            assert!(levels.windows(2).all(|w| w[0] < w[1]));
            assert!(levels.iter().all(|&l| l < max_y * REFERENCE_HEADROOM));
        }
    }
}
