// drawing_util.rs
use eframe::egui::{self, Color32, Pos2, Shape, Stroke};

/// Builds the filled area under a polyline down to `baseline_y` plus the stroked outline.
///
/// The fill is split into one trapezoid per segment because egui only tessellates
/// convex polygons; each trapezoid gets the series color with `alpha`.
///
/// # Arguments
/// * `points` - projected points, left to right.
/// * `baseline_y` - y coordinate of the zero line.
/// * `color` - series color.
/// * `alpha` - fill opacity, 0..1.
pub fn area_shapes(
    points: impl Iterator<Item = Pos2>,
    baseline_y: f32,
    color: Color32,
    alpha: f32,
    stroke_width: f32,
) -> Vec<Shape> {
    let line: Vec<Pos2> = points.collect();
    if line.len() < 2 {
        return Vec::new();
    }

    let fill = color.gamma_multiply(alpha);
    let mut shapes: Vec<Shape> = line
        .windows(2)
        .map(|w| {
            Shape::convex_polygon(
                vec![
                    w[0],
                    w[1],
                    egui::pos2(w[1].x, baseline_y),
                    egui::pos2(w[0].x, baseline_y),
                ],
                fill,
                Stroke::NONE,
            )
        })
        .collect();
    shapes.push(Shape::line(line, Stroke::new(stroke_width, color)));
    shapes
}

pub fn dashed_hline(
    painter: &egui::Painter,
    y: f32,
    left: f32,
    right: f32,
    color: Color32,
) {
    let points = [egui::pos2(left, y), egui::pos2(right, y)];
    painter.extend(Shape::dashed_line(&points, Stroke::new(1.0, color), 3.0, 3.0));
}
