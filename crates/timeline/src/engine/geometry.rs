// SPDX-License-Identifier: MIT

//!
//! Window geometry
//!

use crate::TrackLayout;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Slack allowed when checking geometry against the track bounds, to absorb
/// float rounding in `left + width`
const GEOMETRY_EPSILON: f64 = 1e-9;

/// The pixel position of the selected window on the track.
///
/// Valid geometry (see [`WindowGeometry::is_valid_for()`]) satisfies:
///
/// - `left >= padding`
/// - `left + width <= track_width + padding`
/// - `width >= handle_width`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowGeometry {
    left: f64,
    width: f64,
}

impl WindowGeometry {
    /// Create geometry if it's valid for the layout
    pub fn from(left: f64, width: f64, layout: &TrackLayout) -> Option<Self> {
        let geometry = WindowGeometry { left, width };
        geometry.is_valid_for(layout).then_some(geometry)
    }

    /// Create geometry, forcing it onto the track.  The width is limited first
    /// (to between the handle width and the track width), then the left edge
    /// is moved so the whole window fits.
    pub fn clamped(left: f64, width: f64, layout: &TrackLayout) -> Self {
        let width = if width.is_nan() {
            layout.handle_width()
        } else {
            width.clamp(layout.handle_width(), layout.track_width())
        };
        let left = if left.is_nan() {
            layout.min_x()
        } else {
            left.clamp(layout.min_x(), layout.max_x() - width)
        };
        WindowGeometry { left, width }
    }

    /// The window's left edge
    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// The window's right edge
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Whether the window sits fully on the track and is at least one handle
    /// wide
    pub fn is_valid_for(&self, layout: &TrackLayout) -> bool {
        self.left.is_finite()
            && self.width.is_finite()
            && self.width >= layout.handle_width()
            && self.left >= layout.min_x() - GEOMETRY_EPSILON
            && self.right() <= layout.max_x() + GEOMETRY_EPSILON
    }

    /// Whether the window's right edge touches the end of the track
    pub fn is_at_end_of(&self, layout: &TrackLayout) -> bool {
        self.right() >= layout.max_x() - GEOMETRY_EPSILON
    }

    /// Map the geometry from one layout onto another, keeping the window at the
    /// same fractions of the track
    pub fn rescaled(&self, from: &TrackLayout, to: &TrackLayout) -> Self {
        let left_fraction = from.fraction_at(self.left);
        let right_fraction = from.fraction_at(self.right());
        let left = to.x_at(left_fraction);
        let right = to.x_at(right_fraction);
        WindowGeometry::clamped(left, right - left, to)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn layout() -> TrackLayout {
        TrackLayout::from(700.0, 50.0, 10.0).unwrap()
    }

    #[test]
    fn from() {
        let layout = layout();
        assert!(WindowGeometry::from(50.0, 200.0, &layout).is_some());
        assert!(WindowGeometry::from(550.0, 200.0, &layout).is_some());
        assert!(WindowGeometry::from(49.0, 200.0, &layout).is_none());
        assert!(WindowGeometry::from(551.0, 200.0, &layout).is_none());
        assert!(WindowGeometry::from(100.0, 9.0, &layout).is_none());
        assert!(WindowGeometry::from(100.0, -20.0, &layout).is_none());
        assert!(WindowGeometry::from(f64::NAN, 20.0, &layout).is_none());
    }

    #[test]
    fn clamped() {
        let layout = layout();
        let geometry = WindowGeometry::clamped(0.0, 200.0, &layout);
        assert_eq!((geometry.left(), geometry.width()), (50.0, 200.0));

        let geometry = WindowGeometry::clamped(700.0, 200.0, &layout);
        assert_eq!((geometry.left(), geometry.right()), (550.0, 750.0));
        assert!(geometry.is_at_end_of(&layout));

        let geometry = WindowGeometry::clamped(100.0, 5000.0, &layout);
        assert_eq!((geometry.left(), geometry.width()), (50.0, 700.0));

        let geometry = WindowGeometry::clamped(100.0, 1.0, &layout);
        assert_eq!(geometry.width(), 10.0);
        assert!(geometry.is_valid_for(&layout));
    }

    #[test]
    fn rescaled() {
        let from = layout();
        let to = TrackLayout::from(350.0, 25.0, 10.0).unwrap();
        let geometry = WindowGeometry::from(400.0, 350.0, &from).unwrap();
        let rescaled = geometry.rescaled(&from, &to);
        assert_eq!((rescaled.left(), rescaled.width()), (200.0, 175.0));
        assert!(rescaled.is_at_end_of(&to));
    }
}
