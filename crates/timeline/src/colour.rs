// SPDX-License-Identifier: MIT

//!
//! Generate, manipulate, and manage colours used when drawing a timeline (and
//! the views it filters)
//!

use eframe::egui;
use serde::{Deserialize, Serialize};

/// The `Colour` type
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Colour {
    r: u8,
    g: u8,
    b: u8,
}

impl From<Colour> for egui::Color32 {
    fn from(value: Colour) -> Self {
        egui::Color32::from_rgb(value.r, value.g, value.b)
    }
}

impl Colour {
    pub const BLACK: Colour = Colour { r: 0, g: 0, b: 0 };

    /// Create a colour from RGB values
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Colour { r, g, b }
    }

    /// To get RGB as, say, #0affc3 (for CSS)
    pub fn as_hex(&self) -> String {
        // {:02x} means print as hex, requesting 2 chars (pad left with "0" if only 1 char otherwise)
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// The colour `t` of the way from `self` to `other` (`t` clamped to
    /// `[0, 1]`)
    pub fn lerp(&self, other: Colour, t: f64) -> Colour {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Colour::from_rgb(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }
}

/// A linear colour scale over a magnitude domain, from pale blue for the
/// smallest quakes to navy for the largest
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagnitudeColourScale {
    domain: (f64, f64),
    low: Colour,
    high: Colour,
}

impl Default for MagnitudeColourScale {
    fn default() -> Self {
        Self::new(0.0, 10.0)
    }
}

impl MagnitudeColourScale {
    pub const LOW: Colour = Colour::from_rgb(0xe8, 0xf4, 0xf8);
    pub const HIGH: Colour = Colour::from_rgb(0x00, 0x00, 0x80);

    /// Create a scale over `[min, max]` (in either order)
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            domain: (min.min(max), min.max(max)),
            low: Self::LOW,
            high: Self::HIGH,
        }
    }

    /// Create a scale over a dataset's magnitude extent (the default domain if
    /// there isn't one)
    pub fn from_extent(extent: Option<(f64, f64)>) -> Self {
        match extent {
            Some((min, max)) => Self::new(min, max),
            None => Self::default(),
        }
    }

    /// The colour for a magnitude.  Magnitudes outside the domain take the
    /// colour of the nearest end, and a zero-width domain is all `LOW`.
    pub fn colour(&self, magnitude: f64) -> Colour {
        let (min, max) = self.domain;
        let span = max - min;
        if span <= 0.0 || !span.is_finite() {
            return self.low;
        }
        self.low.lerp(self.high, (magnitude - min) / span)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn as_hex() {
        assert_eq!(Colour::from_rgb(10, 255, 195).as_hex(), "#0affc3");
        assert_eq!(Colour::BLACK.as_hex(), "#000000");
    }

    #[test]
    fn lerp() {
        let black = Colour::BLACK;
        let white = Colour::from_rgb(255, 255, 255);
        assert_eq!(black.lerp(white, 0.0), black);
        assert_eq!(black.lerp(white, 1.0), white);
        assert_eq!(black.lerp(white, 0.5), Colour::from_rgb(128, 128, 128));
        assert_eq!(black.lerp(white, 4.0), white);
        assert_eq!(black.lerp(white, f64::NAN), black);
    }

    #[test]
    fn magnitude_scale() {
        let scale = MagnitudeColourScale::new(2.0, 6.0);
        assert_eq!(scale.colour(2.0).as_hex(), "#e8f4f8");
        assert_eq!(scale.colour(6.0).as_hex(), "#000080");
        assert_eq!(scale.colour(-1.0), MagnitudeColourScale::LOW);
        assert_eq!(scale.colour(9.0), MagnitudeColourScale::HIGH);

        let flat = MagnitudeColourScale::from_extent(Some((4.0, 4.0)));
        assert_eq!(flat.colour(4.0), MagnitudeColourScale::LOW);
        assert_eq!(
            MagnitudeColourScale::from_extent(None),
            MagnitudeColourScale::new(0.0, 10.0)
        );
    }
}
