// areachart.rs - overlapping area charts of the throughput series
use crate::axes_util;
use crate::drawing_util;
use crate::series::{Series, SeriesVisibility};
use crate::telemetry::Sample;
use eframe::egui;

/// Lazy projection of samples into chart coordinates for one series.
///
/// Cloning the iterator restarts the projection from its first sample, so the same
/// projection can feed the fill, the outline and hit-testing.
#[derive(Clone)]
pub struct Projection<I, X, Y> {
    samples: I,
    series: Series,
    scale_time: X,
    scale_value: Y,
}

impl<'a, I, X, Y> Iterator for Projection<I, X, Y>
where
    I: Iterator<Item = &'a Sample>,
    X: Fn(i64) -> f32,
    Y: Fn(f64) -> f32,
{
    type Item = egui::Pos2;

    fn next(&mut self) -> Option<Self::Item> {
        let sample = self.samples.next()?;
        Some(egui::pos2(
            (self.scale_time)(sample.time),
            (self.scale_value)(sample.value(self.series)),
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.samples.size_hint()
    }
}

pub fn project<'a, I, X, Y>(samples: I, series: Series, scale_time: X, scale_value: Y) -> Projection<I, X, Y>
where
    I: Iterator<Item = &'a Sample> + Clone,
    X: Fn(i64) -> f32 + Clone,
    Y: Fn(f64) -> f32 + Clone,
{
    Projection {
        samples,
        series,
        scale_time,
        scale_value,
    }
}

/// First and last timestamp of a non-empty run of samples.
pub fn time_span<'a>(mut samples: impl Iterator<Item = &'a Sample>) -> Option<(i64, i64)> {
    let first = samples.next()?.time;
    let last = samples.last().map_or(first, |s| s.time);
    Some((first, last))
}

/// Paints every visible series over `rect` scaled to `value_range`.
pub fn draw<'a>(
    painter: &egui::Painter,
    rect: egui::Rect,
    samples: impl Iterator<Item = &'a Sample> + Clone,
    visibility: &SeriesVisibility,
    value_range: (f64, f64),
    stroke_width: f32,
) {
    let Some(span) = time_span(samples.clone()) else {
        return;
    };
    let scale_time = axes_util::create_scale_time_fn(span, rect);
    let scale_value = axes_util::create_scale_value_fn(value_range, rect);
    let baseline = scale_value(0.0).min(rect.bottom());

    for series in Series::PAINT_ORDER {
        if !visibility.is_visible(series) {
            continue;
        }
        let points = project(samples.clone(), series, scale_time.clone(), scale_value.clone());
        painter.extend(drawing_util::area_shapes(
            points,
            baseline,
            series.color(),
            series.fill_alpha(),
            stroke_width,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<Sample> {
        (0..5)
            .map(|i| Sample {
                time: i * 1_000,
                upload: i as f64 * 10.0,
                download: 0.0,
                total: 40.0,
            })
            .collect()
    }

    #[test]
    fn projection_is_restartable() {
        let data = samples();
        let rect = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(400.0, 100.0));
        let span = time_span(data.iter()).unwrap();
        assert_eq!(span, (0, 4_000));
        let proj = project(
            data.iter(),
            Series::Upload,
            axes_util::create_scale_time_fn(span, rect),
            axes_util::create_scale_value_fn((0.0, 40.0), rect),
        );
        let first: Vec<egui::Pos2> = proj.clone().collect();
        let second: Vec<egui::Pos2> = proj.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
        assert_eq!(first[0], egui::pos2(0.0, 100.0));
        assert_eq!(first[4], egui::pos2(400.0, 0.0));
    }

    #[test]
    fn empty_run_has_no_span() {
        let data: Vec<Sample> = Vec::new();
        assert_eq!(time_span(data.iter()), None);
        assert_eq!(time_span(samples()[..1].iter()), Some((0, 0)));
    }

    #[test]
    fn area_needs_two_points() {
        let one = std::iter::once(egui::pos2(1.0, 1.0));
        assert!(drawing_util::area_shapes(one, 10.0, egui::Color32::RED, 0.5, 2.0).is_empty());
        let three = [egui::pos2(0.0, 5.0), egui::pos2(1.0, 4.0), egui::pos2(2.0, 6.0)];
        // two trapezoids and the outline
        assert_eq!(
            drawing_util::area_shapes(three.into_iter(), 10.0, egui::Color32::RED, 0.5, 2.0).len(),
            3
        );
    }
}
