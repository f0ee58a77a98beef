// SPDX-License-Identifier: MIT

//!
//! Layout params
//!

use crate::{DEFAULT_HANDLE_WIDTH, DEFAULT_PADDING, DEFAULT_TRACK_WIDTH};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Errors that can arise in relation to a [`TrackLayout`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Track width `{0}` must be positive")]
    TrackWidth(f64),

    #[error("Padding `{0}` must not be negative")]
    Padding(f64),

    /// The handle must have some width, and the track must be wide enough to
    /// hold a window made of nothing but handle
    #[error("Handle width `{0}` must be positive and no wider than the track")]
    HandleWidth(f64),
}

/// The fixed pixel dimensions of the track the window is dragged along.
///
/// ```text
/// |<-padding->|<------------ track_width ------------>|<-padding->|
///             [#|    window    |#]
///              ^ handle_width   ^
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedTrackLayout")]
pub struct TrackLayout {
    track_width: f64,
    padding: f64,
    handle_width: f64,
}

#[derive(Deserialize)]
struct UncheckedTrackLayout {
    track_width: f64,
    padding: f64,
    handle_width: f64,
}

impl TryFrom<UncheckedTrackLayout> for TrackLayout {
    type Error = LayoutError;
    fn try_from(value: UncheckedTrackLayout) -> Result<Self, Self::Error> {
        TrackLayout::from(value.track_width, value.padding, value.handle_width)
    }
}

impl Default for TrackLayout {
    fn default() -> Self {
        TrackLayout {
            track_width: DEFAULT_TRACK_WIDTH,
            padding: DEFAULT_PADDING,
            handle_width: DEFAULT_HANDLE_WIDTH,
        }
    }
}

impl TrackLayout {
    /// Create a new [`TrackLayout`] if the result will be valid
    pub fn from(track_width: f64, padding: f64, handle_width: f64) -> Result<Self, LayoutError> {
        if !track_width.is_finite() || track_width <= 0.0 {
            return Err(LayoutError::TrackWidth(track_width));
        }
        if !padding.is_finite() || padding < 0.0 {
            return Err(LayoutError::Padding(padding));
        }
        if !handle_width.is_finite() || handle_width <= 0.0 || handle_width > track_width {
            return Err(LayoutError::HandleWidth(handle_width));
        }
        Ok(TrackLayout {
            track_width,
            padding,
            handle_width,
        })
    }

    pub fn track_width(&self) -> f64 {
        self.track_width
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }

    pub fn handle_width(&self) -> f64 {
        self.handle_width
    }

    /// The smallest x value the window's left edge may take
    pub fn min_x(&self) -> f64 {
        self.padding
    }

    /// The largest x value the window's right edge may take
    pub fn max_x(&self) -> f64 {
        self.track_width + self.padding
    }

    /// The width of the whole surface (track plus padding either side)
    pub fn total_width(&self) -> f64 {
        self.track_width + (2.0 * self.padding)
    }

    /// The fraction of the track at `x` (clamped to `[0, 1]`)
    pub fn fraction_at(&self, x: f64) -> f64 {
        ((x - self.padding) / self.track_width).clamp(0.0, 1.0)
    }

    /// The x value at a fraction of the track
    pub fn x_at(&self, fraction: f64) -> f64 {
        self.padding + (fraction * self.track_width)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from() {
        assert!(TrackLayout::from(700.0, 50.0, 10.0).is_ok());
        assert!(TrackLayout::from(700.0, 0.0, 700.0).is_ok());
        assert_eq!(
            TrackLayout::from(0.0, 50.0, 10.0),
            Err(LayoutError::TrackWidth(0.0))
        );
        assert_eq!(
            TrackLayout::from(700.0, -1.0, 10.0),
            Err(LayoutError::Padding(-1.0))
        );
        assert_eq!(
            TrackLayout::from(700.0, 50.0, 0.0),
            Err(LayoutError::HandleWidth(0.0))
        );
        assert_eq!(
            TrackLayout::from(700.0, 50.0, 701.0),
            Err(LayoutError::HandleWidth(701.0))
        );
        assert!(TrackLayout::from(f64::NAN, 50.0, 10.0).is_err());
    }

    #[test]
    fn positions() {
        let layout = TrackLayout::from(700.0, 50.0, 10.0).unwrap();
        assert_eq!(layout.min_x(), 50.0);
        assert_eq!(layout.max_x(), 750.0);
        assert_eq!(layout.total_width(), 800.0);
        assert_eq!(layout.fraction_at(50.0), 0.0);
        assert_eq!(layout.fraction_at(400.0), 0.5);
        assert_eq!(layout.fraction_at(900.0), 1.0);
        assert_eq!(layout.x_at(0.5), 400.0);
    }

    #[test]
    fn deserialise_validates() {
        let json = r#"{"track_width": 700.0, "padding": 50.0, "handle_width": 10.0}"#;
        assert!(serde_json::from_str::<TrackLayout>(json).is_ok());
        let json = r#"{"track_width": -700.0, "padding": 50.0, "handle_width": 10.0}"#;
        assert!(serde_json::from_str::<TrackLayout>(json).is_err());
    }
}
