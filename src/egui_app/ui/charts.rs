//! Painter-drawn analytics charts.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, Ui, Vec2};

use super::style;

const AXIS_MARGIN: f32 = 34.0;
const LABEL_HEIGHT: f32 = 18.0;

/// Accuracy percentage per feedback event, plotted on a fixed 0-100 axis.
pub fn accuracy_line(ui: &mut Ui, values: &[f64], size: Vec2) {
    let palette = style::palette();
    let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, palette.bg_primary);
    let plot = plot_area(rect);

    for tick in [0.0_f32, 25.0, 50.0, 75.0, 100.0] {
        let y = plot.bottom() - plot.height() * tick / 100.0;
        painter.line_segment(
            [Pos2::new(plot.left(), y), Pos2::new(plot.right(), y)],
            Stroke::new(1.0, palette.grid_soft),
        );
        painter.text(
            Pos2::new(plot.left() - 6.0, y),
            Align2::RIGHT_CENTER,
            format!("{tick:.0}"),
            FontId::proportional(10.0),
            palette.text_muted,
        );
    }

    let points = line_points(values, plot);
    if points.len() > 1 {
        painter.add(Shape::line(points.clone(), Stroke::new(2.0, palette.accent_ice)));
    }
    for point in &points {
        painter.circle_filled(*point, 3.0, palette.accent_ice);
    }
    painter.text(
        Pos2::new(plot.center().x, plot.bottom() + 4.0),
        Align2::CENTER_TOP,
        "Feedback count",
        FontId::proportional(10.0),
        palette.text_muted,
    );

    if let Some(pos) = response.hover_pos() {
        if let Some(index) = nearest_index(&points, pos.x) {
            let tip = format!("#{}: {:.2}%", index + 1, values[index]);
            response.on_hover_text(tip);
        }
    }
}

/// Vertical bars for `(name, count)` pairs, colored by `color_for`.
pub fn bar_chart(
    ui: &mut Ui,
    bars: &[(String, usize)],
    size: Vec2,
    color_for: impl Fn(&str) -> Color32,
) {
    let palette = style::palette();
    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, palette.bg_primary);
    let plot = plot_area(rect);
    painter.line_segment(
        [plot.left_bottom(), plot.right_bottom()],
        Stroke::new(1.0, palette.panel_outline),
    );

    let max = bars.iter().map(|(_, count)| *count).max().unwrap_or(0);
    painter.text(
        Pos2::new(plot.left() - 6.0, plot.top()),
        Align2::RIGHT_CENTER,
        max.to_string(),
        FontId::proportional(10.0),
        palette.text_muted,
    );
    for ((name, count), bar) in bars.iter().zip(bar_rects(bars, plot)) {
        let color = color_for(name);
        painter.rect_filled(bar, 0.0, color);
        if color == Color32::BLACK {
            painter.line_segment(
                [bar.left_top(), bar.right_top()],
                Stroke::new(1.0, palette.text_muted),
            );
        }
        painter.text(
            Pos2::new(bar.center().x, bar.top() - 2.0),
            Align2::CENTER_BOTTOM,
            count.to_string(),
            FontId::proportional(10.0),
            palette.text_primary,
        );
        painter.text(
            Pos2::new(bar.center().x, plot.bottom() + 4.0),
            Align2::CENTER_TOP,
            name,
            FontId::proportional(10.0),
            palette.text_muted,
        );
    }
}

fn plot_area(rect: Rect) -> Rect {
    Rect::from_min_max(
        Pos2::new(rect.left() + AXIS_MARGIN, rect.top() + LABEL_HEIGHT),
        Pos2::new(rect.right() - 8.0, rect.bottom() - LABEL_HEIGHT),
    )
}

fn line_points(values: &[f64], plot: Rect) -> Vec<Pos2> {
    let step = if values.len() > 1 {
        plot.width() / (values.len() - 1) as f32
    } else {
        0.0
    };
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let clamped = value.clamp(0.0, 100.0) as f32;
            let x = if values.len() > 1 {
                plot.left() + step * i as f32
            } else {
                plot.center().x
            };
            Pos2::new(x, plot.bottom() - plot.height() * clamped / 100.0)
        })
        .collect()
}

fn bar_rects(bars: &[(String, usize)], plot: Rect) -> Vec<Rect> {
    let max = bars.iter().map(|(_, count)| *count).max().unwrap_or(0);
    if bars.is_empty() || max == 0 {
        return Vec::new();
    }
    let slot = plot.width() / bars.len() as f32;
    let width = (slot * 0.7).max(1.0);
    bars.iter()
        .enumerate()
        .map(|(i, (_, count))| {
            let height = plot.height() * *count as f32 / max as f32;
            let left = plot.left() + slot * i as f32 + (slot - width) / 2.0;
            Rect::from_min_size(
                Pos2::new(left, plot.bottom() - height),
                egui::vec2(width, height),
            )
        })
        .collect()
}

fn nearest_index(points: &[Pos2], x: f32) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (a.x - x).abs().total_cmp(&(b.x - x).abs()))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plot() -> Rect {
        Rect::from_min_size(Pos2::new(0.0, 0.0), egui::vec2(100.0, 50.0))
    }

    #[test]
    fn line_points_span_width_and_clamp_to_axis() {
        let points = line_points(&[0.0, 50.0, 120.0], plot());
        assert_eq!(points[0], Pos2::new(0.0, 50.0));
        assert_eq!(points[1], Pos2::new(50.0, 25.0));
        assert_eq!(points[2], Pos2::new(100.0, 0.0));
    }

    #[test]
    fn single_point_is_centered() {
        let points = line_points(&[66.67], plot());
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].x, 50.0);
    }

    #[test]
    fn tallest_bar_fills_plot_height() {
        let bars = vec![("happy".to_string(), 4), ("sad".to_string(), 2)];
        let rects = bar_rects(&bars, plot());
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].height(), 50.0);
        assert_eq!(rects[1].height(), 25.0);
        assert!(rects[0].right() <= rects[1].left());
    }

    #[test]
    fn nearest_index_picks_closest_x() {
        let points = line_points(&[10.0, 20.0, 30.0], plot());
        assert_eq!(nearest_index(&points, 70.0), Some(1));
        assert_eq!(nearest_index(&[], 1.0), None);
    }
}
