// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! The map of (filtered) quakes
//!

use crate::app_colours::ViewColours;
use crate::consts::{GRATICULE_STEP_DEGREES, HOVERED_MARKER_RADIUS, MARKER_RADIUS};
use eframe::egui::{Color32, Pos2, Rect, Sense, Stroke, StrokeKind, Ui, Vec2};
use quake_explorer_core::{Dataset, Quake};
use quake_explorer_timeline::{MagnitudeColourScale, SelectedDateRange};

/// Equirectangular projection of a latitude/longitude onto the rect
pub fn project(latitude: f64, longitude: f64, rect: Rect) -> Pos2 {
    let x = (longitude + 180.0) / 360.0;
    let y = (90.0 - latitude) / 180.0;
    Pos2::new(
        rect.min.x + (x as f32 * rect.width()),
        rect.min.y + (y as f32 * rect.height()),
    )
}

/// The index of the marker nearest the pointer, if any is within `radius`
fn marker_under_pointer(pointer: Pos2, markers: &[Pos2], radius: f32) -> Option<usize> {
    markers
        .iter()
        .enumerate()
        .map(|(index, marker)| (index, marker.distance_sq(pointer)))
        .filter(|(_, distance_sq)| *distance_sq <= radius * radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}

/// The text shown when hovering over a quake's marker
pub fn quake_tooltip(quake: &Quake) -> String {
    let place = quake.place().unwrap_or("Unknown location");
    let depth = match quake.depth() {
        Some(depth) => format!("{depth:.1} km"),
        None => String::from("unknown"),
    };
    format!(
        "Magnitude: {:.1}\nPlace: {place}\nDepth: {depth}\nTime: {}",
        quake.magnitude(),
        quake.time().format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

/// Markers for the quakes in the selected range, coloured by magnitude
#[derive(Debug, Default)]
pub struct MapView {
    /// How the quake magnitudes map onto marker colours
    scale: MagnitudeColourScale,
}

impl MapView {
    /// Call when a new dataset is loaded
    pub fn set_dataset(&mut self, dataset: &Dataset) {
        self.scale = MagnitudeColourScale::from_extent(dataset.magnitude_extent());
    }

    pub fn draw(
        &mut self,
        ui: &mut Ui,
        dataset: &Dataset,
        range: Option<&SelectedDateRange>,
        colours: &ViewColours,
    ) {
        let width = ui.available_width();
        let size = Vec2::new(width, width / 2.0);
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let rect = response.rect;

        painter.rect(rect, 0.0, colours.background, Stroke::NONE, StrokeKind::Inside);
        let grid = Stroke::new(0.5, colours.grid);
        let mut longitude = -180.0;
        while longitude <= 180.0 {
            painter.vline(project(0.0, longitude, rect).x, rect.y_range(), grid);
            longitude += GRATICULE_STEP_DEGREES;
        }
        let mut latitude = -90.0;
        while latitude <= 90.0 {
            painter.hline(rect.x_range(), project(latitude, 0.0, rect).y, grid);
            latitude += GRATICULE_STEP_DEGREES;
        }

        let quakes: Vec<&Quake> = match range {
            Some(range) => dataset.in_range(range).collect(),
            None => dataset.quakes().iter().collect(),
        };
        let markers: Vec<Pos2> = quakes
            .iter()
            .map(|quake| project(quake.latitude(), quake.longitude(), rect))
            .collect();

        let hovered = response
            .hover_pos()
            .and_then(|pointer| marker_under_pointer(pointer, &markers, HOVERED_MARKER_RADIUS));

        let stroke = Stroke::new(0.5, colours.marker_stroke);
        for (quake, marker) in quakes.iter().zip(&markers) {
            let fill: Color32 = self.scale.colour(quake.magnitude()).into();
            painter.circle(*marker, MARKER_RADIUS, fill, stroke);
        }

        // Drawn last so it sits on top
        if let Some(index) = hovered {
            painter.circle(markers[index], HOVERED_MARKER_RADIUS, colours.highlight, stroke);
            let tooltip = quake_tooltip(quakes[index]);
            response.on_hover_ui_at_pointer(|ui| {
                ui.label(tooltip);
            });
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn projection() {
        let rect = Rect::from_min_size(Pos2::new(10.0, 20.0), Vec2::new(360.0, 180.0));
        assert_eq!(project(0.0, 0.0, rect), Pos2::new(190.0, 110.0));
        assert_eq!(project(90.0, -180.0, rect), Pos2::new(10.0, 20.0));
        assert_eq!(project(-90.0, 180.0, rect), Pos2::new(370.0, 200.0));
    }

    #[test]
    fn hover_picks_nearest_marker() {
        let markers = [Pos2::new(0.0, 0.0), Pos2::new(5.0, 0.0), Pos2::new(100.0, 0.0)];
        assert_eq!(marker_under_pointer(Pos2::new(4.0, 0.0), &markers, 4.0), Some(1));
        assert_eq!(marker_under_pointer(Pos2::new(1.0, 1.0), &markers, 4.0), Some(0));
        assert_eq!(marker_under_pointer(Pos2::new(50.0, 0.0), &markers, 4.0), None);
        assert_eq!(marker_under_pointer(Pos2::new(0.0, 0.0), &[], 4.0), None);
    }

    #[test]
    fn tooltip() {
        let time = Utc.with_ymd_and_hms(2024, 3, 5, 6, 7, 8).unwrap();
        let mut quake = Quake::from(time, 38.8, -122.8, 4.5).unwrap();
        assert_eq!(
            quake_tooltip(&quake),
            "Magnitude: 4.5\nPlace: Unknown location\nDepth: unknown\nTime: 2024-03-05 06:07:08 UTC"
        );

        quake.set_place("5 km NW of The Geysers, CA");
        quake.set_depth(2.25).unwrap();
        let tooltip = quake_tooltip(&quake);
        assert!(tooltip.contains("Place: 5 km NW of The Geysers, CA"));
        assert!(tooltip.contains("Depth: 2.2 km") || tooltip.contains("Depth: 2.3 km"));
    }
}
