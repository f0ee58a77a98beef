// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! The magnitude distribution chart
//!

use crate::app_colours::ViewColours;
use crate::consts::{CHART_HEIGHT, CHART_MARGIN};
use eframe::egui::{Align2, FontId, Pos2, Rect, Sense, Shape, Stroke, StrokeKind, Ui, Vec2};
use quake_explorer_core::{MAX_CHARTED_MAGNITUDE, MagnitudeHistogram};

/// Maps magnitudes and counts onto the plot area
#[derive(Debug, Clone, Copy)]
struct ChartScale {
    plot: Rect,
    max_count: usize,
}

impl ChartScale {
    fn x_at(&self, magnitude: f64) -> f32 {
        self.plot.min.x + (magnitude / MAX_CHARTED_MAGNITUDE) as f32 * self.plot.width()
    }

    fn y_at(&self, count: usize) -> f32 {
        // An empty histogram still gets a (flat) y axis
        let max_count = self.max_count.max(1) as f32;
        self.plot.max.y - (count as f32 / max_count) * self.plot.height()
    }

    fn magnitude_at(&self, x: f32) -> f64 {
        let fraction = ((x - self.plot.min.x) / self.plot.width()).clamp(0.0, 1.0);
        fraction as f64 * MAX_CHARTED_MAGNITUDE
    }
}

/// Line chart of the number of quakes per 0.1 magnitude
pub fn draw_magnitude_chart(ui: &mut Ui, histogram: &MagnitudeHistogram, colours: &ViewColours) {
    let size = Vec2::new(ui.available_width(), CHART_HEIGHT);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;
    painter.rect(rect, 0.0, colours.background, Stroke::NONE, StrokeKind::Inside);

    let plot = Rect::from_min_max(
        rect.min + Vec2::splat(CHART_MARGIN),
        rect.max - Vec2::splat(CHART_MARGIN),
    );
    let scale = ChartScale {
        plot,
        max_count: histogram.max_count(),
    };
    let text_colour = ui.visuals().text_color();
    let font = FontId::proportional(10.0);
    let axis = Stroke::new(1.0, colours.grid);

    // x axis (whole magnitudes)
    painter.hline(plot.x_range(), plot.max.y, axis);
    for magnitude in 0..=(MAX_CHARTED_MAGNITUDE as u32) {
        let x = scale.x_at(magnitude as f64);
        painter.vline(x, plot.max.y..=plot.max.y + 4.0, axis);
        painter.text(
            Pos2::new(x, plot.max.y + 5.0),
            Align2::CENTER_TOP,
            magnitude.to_string(),
            font.clone(),
            text_colour,
        );
    }

    // y axis (zero, half way, and the largest count)
    painter.vline(plot.min.x, plot.y_range(), axis);
    let max_count = histogram.max_count();
    let mut y_ticks = vec![0, max_count / 2, max_count];
    y_ticks.dedup();
    for count in y_ticks {
        let y = scale.y_at(count);
        painter.hline(plot.min.x - 4.0..=plot.min.x, y, axis);
        painter.text(
            Pos2::new(plot.min.x - 6.0, y),
            Align2::RIGHT_CENTER,
            count.to_string(),
            font.clone(),
            text_colour,
        );
    }

    let points: Vec<Pos2> = histogram
        .bins()
        .iter()
        .map(|bin| Pos2::new(scale.x_at(bin.magnitude), scale.y_at(bin.count)))
        .collect();
    painter.add(Shape::line(points, Stroke::new(1.5, colours.line)));

    if let Some(pointer) = response.hover_pos() {
        let bin = histogram.nearest_bin(scale.magnitude_at(pointer.x));
        let marker = Pos2::new(scale.x_at(bin.magnitude), scale.y_at(bin.count));
        painter.circle_filled(marker, 4.0, colours.highlight);
        let tooltip = format!("Magnitude: {:.1}\nCount: {}", bin.magnitude, bin.count);
        response.on_hover_ui_at_pointer(|ui| {
            ui.label(tooltip);
        });
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn scale(max_count: usize) -> ChartScale {
        ChartScale {
            plot: Rect::from_min_size(Pos2::new(30.0, 30.0), Vec2::new(500.0, 100.0)),
            max_count,
        }
    }

    #[test]
    fn x_axis() {
        let scale = scale(10);
        assert_eq!(scale.x_at(0.0), 30.0);
        assert_eq!(scale.x_at(10.0), 530.0);
        assert_eq!(scale.x_at(5.0), 280.0);
        assert_eq!(scale.magnitude_at(280.0), 5.0);
        assert_eq!(scale.magnitude_at(0.0), 0.0);
        assert_eq!(scale.magnitude_at(9999.0), 10.0);
    }

    #[test]
    fn y_axis() {
        let scale = scale(10);
        assert_eq!(scale.y_at(0), 130.0);
        assert_eq!(scale.y_at(10), 30.0);
        assert_eq!(scale.y_at(5), 80.0);

        // Nothing counted
        let scale = self::scale(0);
        assert_eq!(scale.y_at(0), 130.0);
    }

    #[test]
    fn hovering_finds_the_bin() {
        let scale = scale(10);
        let histogram = MagnitudeHistogram::from_magnitudes([2.3, 2.3, 2.34, 7.0]);
        let bin = histogram.nearest_bin(scale.magnitude_at(scale.x_at(2.31)));
        assert_eq!(bin.count, 3);
        let bin = histogram.nearest_bin(scale.magnitude_at(scale.x_at(7.0)));
        assert_eq!(bin.count, 1);
    }
}
