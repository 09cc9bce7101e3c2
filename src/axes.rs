// axes.rs
use crate::axes_util;
use crate::drawing_util;
use crate::settings;
use crate::telemetry::Sample;
use eframe::egui;

pub const LABEL_COLOR: egui::Color32 = egui::Color32::from_rgb(0xC4, 0xB5, 0xFD);
const GRID_COLOR: egui::Color32 = egui::Color32::from_rgba_premultiplied(43, 46, 51, 102);

/// Y labels and dashed reference lines at `levels`, x labels under the plot.
pub fn draw<'a>(
    painter: &egui::Painter,
    plot_rect: egui::Rect,
    samples: impl Iterator<Item = &'a Sample> + Clone,
    levels: &[f64],
    value_range: (f64, f64),
) {
    let font = egui::FontId::proportional(12.0);
    let scale_value = axes_util::create_scale_value_fn(value_range, plot_rect);

    for &level in levels {
        let y = scale_value(level);
        drawing_util::dashed_hline(painter, y, plot_rect.left(), plot_rect.right(), GRID_COLOR);
        painter.text(
            egui::pos2(plot_rect.left() - 6.0, y),
            egui::Align2::RIGHT_CENTER,
            axes_util::format_rate(level),
            font.clone(),
            LABEL_COLOR,
        );
    }
    painter.text(
        egui::pos2(plot_rect.left() - 6.0, scale_value(0.0)),
        egui::Align2::RIGHT_CENTER,
        axes_util::format_rate(0.0),
        font.clone(),
        LABEL_COLOR,
    );

    let times: Vec<i64> = samples.map(|s| s.time).collect();
    let (Some(&first), Some(&last)) = (times.first(), times.last()) else {
        return;
    };
    let scale_time = axes_util::create_scale_time_fn((first, last), plot_rect);
    for time in axes_util::x_ticks(&times, settings::X_LABEL_TARGET) {
        painter.text(
            egui::pos2(scale_time(time), plot_rect.bottom() + 4.0),
            egui::Align2::CENTER_TOP,
            axes_util::format_time(time),
            font.clone(),
            LABEL_COLOR,
        );
    }
}
