//axes_util.rs
use crate::settings;
use chrono::{DateTime, Local};
use eframe::egui;

/// Vertical range of a chart: zero up to the larger of the top reference level and the
/// data maximum, with some headroom.
pub fn value_range(max_value: Option<f64>, levels: &[f64]) -> (f64, f64) {
    let top = levels
        .last()
        .copied()
        .into_iter()
        .chain(max_value)
        .fold(settings::REFERENCE_FLOOR, f64::max);
    (0.0, top * settings::Y_AXIS_HEADROOM)
}

pub fn create_scale_value_fn(range: (f64, f64), rect: egui::Rect) -> impl Fn(f64) -> f32 + Clone {
    let (min_v, max_v) = range;
    let span = (max_v - min_v).max(1e-9);
    let height = rect.height();
    let bottom = rect.bottom();

    move |value: f64| -> f32 { bottom - ((value - min_v) / span) as f32 * height }
}

pub fn create_scale_time_fn(time_range: (i64, i64), rect: egui::Rect) -> impl Fn(i64) -> f32 + Clone {
    let (t0, t1) = time_range;
    let span = (t1 - t0).max(1) as f32;
    let left = rect.left();
    let width = rect.width();

    move |time: i64| -> f32 { left + (time - t0) as f32 / span * width }
}

pub fn format_rate(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        format!("{:.0} KB/s", value)
    } else {
        format!("{:.1} KB/s", value)
    }
}

pub fn format_time(time_ms: i64) -> String {
    DateTime::from_timestamp_millis(time_ms)
        .map(|dt| dt.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string())
}

/// About `target` evenly strided timestamps out of the visible ones.
pub fn x_ticks(times: &[i64], target: usize) -> Vec<i64> {
    if times.len() < target || target == 0 {
        return times.to_vec();
    }
    let stride = times.len() / target;
    times.iter().step_by(stride.max(1)).copied().collect()
}
