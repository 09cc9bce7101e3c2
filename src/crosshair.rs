// crosshair.rs
use crate::axes::LABEL_COLOR;
use crate::series::{Series, SeriesVisibility};
use crate::axes_util;
use crate::telemetry::Sample;
use eframe::egui;

#[derive(Default)]
pub struct Crosshair {
    cached_key: Option<(i64, SeriesVisibility)>,
    cached_info: Option<Vec<String>>,
}

/// Sample whose timestamp is closest to the cursor x inside `rect`.
pub fn sample_under_cursor<'a>(
    mouse_x: f32,
    rect: egui::Rect,
    samples: impl Iterator<Item = &'a Sample> + Clone,
) -> Option<&'a Sample> {
    let (t0, t1) = crate::areachart::time_span(samples.clone())?;
    let normalized = (mouse_x - rect.left()) / rect.width().max(1.0);
    if !(0.0..=1.0).contains(&normalized) {
        return None;
    }
    let target = t0 + ((t1 - t0) as f64 * normalized as f64).round() as i64;
    samples.min_by_key(|s| (s.time - target).abs())
}

impl Crosshair {
    /// Tooltip lines for a sample: the local time then one line per visible series.
    pub fn sample_info(&mut self, sample: &Sample, visibility: &SeriesVisibility) -> Vec<String> {
        if self.cached_key == Some((sample.time, *visibility)) {
            if let Some(info) = &self.cached_info {
                return info.clone();
            }
        }
        let mut lines = vec![axes_util::format_time(sample.time)];
        lines.extend(
            visibility
                .visible()
                .map(|k| format!("{}: {:.1} KB/s", k.name(), sample.value(k))),
        );
        self.cached_key = Some((sample.time, *visibility));
        self.cached_info = Some(lines.clone());
        lines
    }

    pub fn draw<'a>(
        &mut self,
        painter: &egui::Painter,
        rect: egui::Rect,
        samples: impl Iterator<Item = &'a Sample> + Clone,
        visibility: &SeriesVisibility,
        mouse_pos: egui::Pos2,
    ) {
        let line_color = egui::Color32::from_rgba_unmultiplied(255, 255, 255, 100);
        painter.line_segment(
            [egui::pos2(mouse_pos.x, rect.top()), egui::pos2(mouse_pos.x, rect.bottom())],
            (1.0, line_color),
        );

        let Some(sample) = sample_under_cursor(mouse_pos.x, rect, samples) else {
            return;
        };
        if !visibility.any_visible() {
            return;
        }
        let lines = self.sample_info(sample, visibility);

        let font = egui::FontId::proportional(13.0);
        let line_height = 17.0;
        let width = 170.0;
        let height = line_height * lines.len() as f32 + 12.0;
        let mut origin = mouse_pos + egui::vec2(14.0, 14.0);
        if origin.x + width > rect.right() {
            origin.x = mouse_pos.x - width - 14.0;
        }
        if origin.y + height > rect.bottom() {
            origin.y = (rect.bottom() - height).max(rect.top());
        }
        let box_rect = egui::Rect::from_min_size(origin, egui::vec2(width, height));
        painter.rect_filled(box_rect, 6.0, egui::Color32::from_rgba_unmultiplied(59, 7, 100, 230));

        for (i, line) in lines.iter().enumerate() {
            let pos = box_rect.min + egui::vec2(10.0, 6.0 + i as f32 * line_height);
            let color = match i {
                0 => LABEL_COLOR,
                _ => visibility
                    .visible()
                    .nth(i - 1)
                    .map_or(egui::Color32::WHITE, Series::color),
            };
            painter.text(pos, egui::Align2::LEFT_TOP, line, font.clone(), color);
        }
    }
}
