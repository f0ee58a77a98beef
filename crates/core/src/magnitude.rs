// SPDX-License-Identifier: MIT

//!
//! Magnitude distribution
//!

use serde::Serialize;

/// The width of each histogram bin
pub const MAGNITUDE_BIN_WIDTH: f64 = 0.1;

/// The number of bins: `0.0, 0.1, ..., 10.0`
pub const MAGNITUDE_BIN_COUNT: usize = 101;

/// The upper limit of the magnitude axis
pub const MAX_CHARTED_MAGNITUDE: f64 = 10.0;

/// Tolerance used when mapping a magnitude onto a bin, so that e.g. `2.3`
/// (which is `22.999...` once multiplied by 10) lands in the `2.3` bin
const BIN_EPSILON: f64 = 1e-9;

/// A single histogram bin
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MagnitudeBin {
    /// The inclusive lower bound of the bin
    pub magnitude: f64,

    /// The number of quakes with `magnitude <= mag < magnitude + 0.1`
    pub count: usize,
}

/// Counts of quakes per 0.1 magnitude, from 0.0 to 10.0.  Magnitudes outside
/// `[0.0, 10.1)` (e.g. the small negative magnitudes some networks report) are
/// not counted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MagnitudeHistogram {
    bins: Vec<MagnitudeBin>,
}

impl Default for MagnitudeHistogram {
    fn default() -> Self {
        let bins = (0..MAGNITUDE_BIN_COUNT)
            .map(|index| MagnitudeBin {
                magnitude: bin_magnitude(index),
                count: 0,
            })
            .collect();
        MagnitudeHistogram { bins }
    }
}

impl MagnitudeHistogram {
    /// Build a histogram from magnitudes
    pub fn from_magnitudes<I: IntoIterator<Item = f64>>(magnitudes: I) -> Self {
        let mut histogram = Self::default();
        for magnitude in magnitudes {
            if let Some(index) = bin_index(magnitude) {
                histogram.bins[index].count += 1;
            }
        }
        histogram
    }

    pub fn bins(&self) -> &[MagnitudeBin] {
        &self.bins
    }

    /// The count in the bin starting at `magnitude`
    pub fn count_at(&self, magnitude: f64) -> Option<usize> {
        bin_index(magnitude).map(|index| self.bins[index].count)
    }

    /// The largest bin count (`0` when nothing was counted)
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }

    /// The number of quakes counted across all bins
    pub fn total(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).sum()
    }

    /// The bin whose magnitude is closest to `magnitude` (used for hovering)
    pub fn nearest_bin(&self, magnitude: f64) -> MagnitudeBin {
        let index = (magnitude / MAGNITUDE_BIN_WIDTH)
            .round()
            .clamp(0.0, (MAGNITUDE_BIN_COUNT - 1) as f64) as usize;
        self.bins[index]
    }
}

fn bin_magnitude(index: usize) -> f64 {
    // Computed from the index to avoid accumulating float error
    index as f64 / 10.0
}

fn bin_index(magnitude: f64) -> Option<usize> {
    if !magnitude.is_finite() || magnitude < 0.0 {
        return None;
    }
    let index = ((magnitude / MAGNITUDE_BIN_WIDTH) + BIN_EPSILON).floor() as usize;
    (index < MAGNITUDE_BIN_COUNT).then_some(index)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bins() {
        let histogram = MagnitudeHistogram::default();
        assert_eq!(histogram.bins().len(), 101);
        assert_eq!(histogram.bins()[0].magnitude, 0.0);
        assert_eq!(histogram.bins()[23].magnitude, 2.3);
        assert_eq!(histogram.bins()[100].magnitude, 10.0);
        assert_eq!(histogram.max_count(), 0);
    }

    #[test]
    fn from_magnitudes() {
        let histogram =
            MagnitudeHistogram::from_magnitudes([2.3, 2.3, 2.35, 2.39, 2.4, 0.0, 10.05, -0.4, 10.1]);
        assert_eq!(histogram.count_at(2.3), Some(4));
        assert_eq!(histogram.count_at(2.4), Some(1));
        assert_eq!(histogram.count_at(0.0), Some(1));
        assert_eq!(histogram.count_at(10.0), Some(1));
        assert_eq!(histogram.count_at(-0.4), None);
        assert_eq!(histogram.total(), 7);
        assert_eq!(histogram.max_count(), 4);
    }

    #[test]
    fn nearest_bin() {
        let histogram = MagnitudeHistogram::from_magnitudes([4.5]);
        assert_eq!(histogram.nearest_bin(4.53).count, 1);
        assert_eq!(histogram.nearest_bin(4.53).magnitude, 4.5);
        assert_eq!(histogram.nearest_bin(-3.0).magnitude, 0.0);
        assert_eq!(histogram.nearest_bin(42.0).magnitude, 10.0);
    }
}
