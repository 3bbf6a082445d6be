use std::f32::consts::{PI, TAU};

use egui::{pos2, vec2, Align2, Color32, FontId, Pos2, Response, Sense, Shape, Stroke, Ui};

use crate::theme::ThemeTokens;

/// Polar plot of unit-range values. `axes` pairs a label with a value in `[0, 1]`.
pub fn radar(ui: &mut Ui, axes: &[(String, f64)], tokens: &ThemeTokens, height: f32) -> Response {
    let (rect, response) =
        ui.allocate_exact_size(vec2(ui.available_width(), height), Sense::hover());
    if axes.len() < 3 {
        return response;
    }
    let painter = ui.painter_at(rect.expand(4.0));
    let center = rect.center();
    let radius = (rect.height().min(rect.width()) * 0.5 - 28.0).max(10.0);
    let angle = |index: usize| -PI / 2.0 + TAU * index as f32 / axes.len() as f32;
    let point = |index: usize, fraction: f32| {
        let a = angle(index);
        center + vec2(a.cos(), a.sin()) * radius * fraction
    };

    let grid = Stroke::new(1.0, tokens.grid);
    for ring in [0.25, 0.5, 0.75, 1.0] {
        let points = (0..axes.len()).map(|i| point(i, ring)).collect();
        painter.add(Shape::closed_line(points, grid));
    }
    for (index, (label, _)) in axes.iter().enumerate() {
        painter.line_segment([center, point(index, 1.0)], grid);
        painter.text(
            point(index, 1.0) + vec2(angle(index).cos(), angle(index).sin()) * 16.0,
            Align2::CENTER_CENTER,
            label,
            FontId::proportional(12.0),
            tokens.text_muted,
        );
    }

    let outline: Vec<Pos2> = axes
        .iter()
        .enumerate()
        .map(|(index, (_, value))| point(index, value.clamp(0.0, 1.0) as f32))
        .collect();
    let fill = tokens.accent_hit.gamma_multiply(0.3);
    // Fan triangles keep the fill correct when the outline is concave.
    for index in 0..outline.len() {
        let next = outline[(index + 1) % outline.len()];
        painter.add(Shape::convex_polygon(
            vec![center, outline[index], next],
            fill,
            Stroke::NONE,
        ));
    }
    painter.add(Shape::closed_line(outline.clone(), Stroke::new(3.0, tokens.accent_hit)));
    for vertex in outline {
        painter.circle_filled(vertex, 3.0, tokens.accent_hit);
    }
    response
}

/// Half-circle gauge from 0 to 100 percent.
pub fn gauge(ui: &mut Ui, percent: f64, bar: Color32, tokens: &ThemeTokens, height: f32) -> Response {
    let (rect, response) =
        ui.allocate_exact_size(vec2(ui.available_width(), height), Sense::hover());
    let painter = ui.painter_at(rect);
    let radius = (rect.height() - 24.0).min(rect.width() * 0.5 - 12.0).max(10.0);
    let center = pos2(rect.center().x, rect.top() + radius + 8.0);

    let band = radius * 0.18;
    let steps = [
        (0.0, 0.5, tokens.accent_miss.gamma_multiply(0.2)),
        (0.5, 1.0, tokens.accent_hit.gamma_multiply(0.2)),
    ];
    for (from, to, color) in steps {
        painter.add(Shape::line(
            arc_points(center, radius, from, to),
            Stroke::new(band, color),
        ));
    }
    let fraction = (percent / 100.0).clamp(0.0, 1.0) as f32;
    if fraction > 0.0 {
        painter.add(Shape::line(
            arc_points(center, radius, 0.0, fraction),
            Stroke::new(band * 0.6, bar),
        ));
    }

    painter.text(
        center - vec2(0.0, radius * 0.3),
        Align2::CENTER_CENTER,
        format!("{percent:.0}%"),
        FontId::proportional(36.0),
        bar,
    );
    for (fraction, label) in [(0.0, "0"), (0.5, "50"), (1.0, "100")] {
        let anchor = arc_points(center, radius + band, fraction, fraction)[0];
        painter.text(
            anchor,
            Align2::CENTER_BOTTOM,
            label,
            FontId::proportional(11.0),
            tokens.text_muted,
        );
    }
    response
}

/// Points along the upper half-circle; fraction 0 is the left end, 1 the right.
fn arc_points(center: Pos2, radius: f32, from: f32, to: f32) -> Vec<Pos2> {
    const SEGMENTS: usize = 48;
    (0..=SEGMENTS)
        .map(|step| {
            let fraction = from + (to - from) * step as f32 / SEGMENTS as f32;
            let angle = PI * (1.0 - fraction);
            center + vec2(angle.cos(), -angle.sin()) * radius
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arc_runs_left_to_right_over_the_top() {
        let points = arc_points(pos2(0.0, 0.0), 10.0, 0.0, 1.0);
        let first = points[0];
        let middle = points[points.len() / 2];
        let last = points[points.len() - 1];
        assert!((first.x + 10.0).abs() < 1e-4 && first.y.abs() < 1e-4);
        assert!(middle.x.abs() < 1e-4 && (middle.y + 10.0).abs() < 1e-4);
        assert!((last.x - 10.0).abs() < 1e-4 && last.y.abs() < 1e-3);
    }
}
