// slider.rs - timeline slider selecting the view window
use crate::datawindow::DataWindow;
use crate::settings;
use crate::timeframe::format_duration;
use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Start,
    End,
}

#[derive(Default)]
pub struct Slider {
    dragging: Option<Handle>,
}

/// Seconds from the start of the timeframe under the screen x, clamped to the track.
pub fn x_to_secs(x: f32, track: egui::Rect, timeframe_secs: f64) -> f64 {
    let fraction = ((x - track.left()) / track.width().max(1.0)).clamp(0.0, 1.0);
    fraction as f64 * timeframe_secs
}

pub fn secs_to_x(secs: f64, track: egui::Rect, timeframe_secs: f64) -> f32 {
    track.left() + (secs / timeframe_secs.max(1e-9)) as f32 * track.width()
}

/// Handle within grabbing distance of `x`; the nearer one wins.
pub fn hit_handle(x: f32, start_x: f32, end_x: f32, radius: f32) -> Option<Handle> {
    let ds = (x - start_x).abs();
    let de = (x - end_x).abs();
    match (ds <= radius, de <= radius) {
        (true, true) if de < ds => Some(Handle::End),
        (true, _) => Some(Handle::Start),
        (false, true) => Some(Handle::End),
        (false, false) => None,
    }
}

/// "Viewing", "Range ... ago" and "Total history" captions.
pub fn captions(data_window: &DataWindow) -> [String; 3] {
    let tf = data_window.timeframe().secs() as f64;
    let (start, end) = data_window.view_window();
    [
        format!("Viewing: {}", format_duration(end - start)),
        format!(
            "Range: {} - {} ago",
            format_duration(tf - end),
            format_duration(tf - start)
        ),
        format!(
            "Total history: {} ({} points)",
            format_duration(tf),
            data_window.len()
        ),
    ]
}

impl Slider {
    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    pub fn show(&mut self, ui: &mut egui::Ui, data_window: &mut DataWindow) {
        let label_color = crate::axes::LABEL_COLOR;
        let [viewing, range, total] = captions(data_window);
        ui.horizontal(|ui| {
            ui.colored_label(label_color, viewing);
            ui.add_space(20.0);
            ui.colored_label(label_color, range);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.colored_label(label_color, total);
            });
        });

        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), settings::SLIDER_HEIGHT),
            egui::Sense::click_and_drag(),
        );
        let radius = settings::SLIDER_HANDLE_RADIUS;
        let track = rect.shrink2(egui::vec2(radius, 0.0));
        let tf = data_window.timeframe().secs() as f64;

        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                let (start, end) = data_window.view_window();
                self.dragging = hit_handle(
                    pos.x,
                    secs_to_x(start, track, tf),
                    secs_to_x(end, track, tf),
                    radius * 1.5,
                );
            }
        }
        if response.dragged() {
            if let (Some(handle), Some(pos)) = (self.dragging, response.interact_pointer_pos()) {
                let secs = x_to_secs(pos.x, track, tf);
                match handle {
                    Handle::Start => data_window.drag_start(secs),
                    Handle::End => data_window.drag_end(secs),
                };
            }
        }
        if response.drag_stopped() {
            self.dragging = None;
        }
        if response.clicked() && !self.is_dragging() {
            if let Some(pos) = response.interact_pointer_pos() {
                data_window.center_view_window(x_to_secs(pos.x, track, tf));
            }
        }

        self.paint(ui.painter(), track, data_window);
    }

    fn paint(&self, painter: &egui::Painter, track: egui::Rect, data_window: &DataWindow) {
        let tf = data_window.timeframe().secs() as f64;
        let (start, end) = data_window.view_window();
        let cy = track.center().y;
        let bar = egui::Rect::from_min_max(egui::pos2(track.left(), cy - 2.0), egui::pos2(track.right(), cy + 2.0));
        painter.rect_filled(bar, 2.0, egui::Color32::from_rgba_unmultiplied(107, 33, 168, 128));

        let x0 = secs_to_x(start, track, tf);
        let x1 = secs_to_x(end, track, tf);
        let selection = egui::Rect::from_min_max(egui::pos2(x0, cy - 2.0), egui::pos2(x1, cy + 2.0));
        painter.rect_filled(selection, 2.0, egui::Color32::from_rgb(0x8B, 0x5C, 0xF6));

        let radius = settings::SLIDER_HANDLE_RADIUS;
        for (x, ring, handle) in [
            (x0, crate::series::Series::Upload.color(), Handle::Start),
            (x1, crate::series::Series::Download.color(), Handle::End),
        ] {
            let r = if self.dragging == Some(handle) { radius * 1.15 } else { radius };
            painter.circle(egui::pos2(x, cy), r, egui::Color32::WHITE, egui::Stroke::new(2.0, ring));
        }
    }
}
