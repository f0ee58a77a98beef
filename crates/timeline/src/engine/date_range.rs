// SPDX-License-Identifier: MIT

//!
//! Date range
//!

use crate::{TrackLayout, WindowGeometry};
use chrono::{DateTime, Utc};
use quake_explorer_core::{DateRangeFilter, TimeExtent};
use serde::Serialize;
use std::fmt::{self, Debug, Display};

/// The dates selected by the timeline's window.  Always derived from a
/// [`WindowGeometry`] and a [`TimeExtent`], never set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SelectedDateRange {
    min_date: DateTime<Utc>,
    max_date: DateTime<Utc>,
}

impl SelectedDateRange {
    pub fn min_date(&self) -> DateTime<Utc> {
        self.min_date
    }

    pub fn max_date(&self) -> DateTime<Utc> {
        self.max_date
    }
}

impl Display for SelectedDateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.min_date.format("%Y-%m-%d %H:%M"),
            self.max_date.format("%Y-%m-%d %H:%M")
        )
    }
}

impl DateRangeFilter for SelectedDateRange {
    fn start(&self) -> DateTime<Utc> {
        self.min_date
    }

    fn end(&self) -> DateTime<Utc> {
        self.max_date
    }
}

/// Map the window onto the extent.
///
/// Each window edge is normalised to `[0, 1]` over the track (so a window
/// starting at `padding` starts at `extent.min()` and one ending at
/// `track_width + padding` ends at `extent.max()`), then linearly interpolated
/// into the extent.  A single-instant extent collapses both bounds onto that
/// instant whatever the geometry.
pub fn compute_range(
    geometry: &WindowGeometry,
    extent: &TimeExtent,
    layout: &TrackLayout,
) -> SelectedDateRange {
    let min_fraction = layout.fraction_at(geometry.left());
    let max_fraction = layout.fraction_at(geometry.right());
    SelectedDateRange {
        min_date: extent.at_fraction(min_fraction),
        max_date: extent.at_fraction(max_fraction),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn ymd(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    fn layout() -> TrackLayout {
        TrackLayout::from(700.0, 50.0, 10.0).unwrap()
    }

    fn extent() -> TimeExtent {
        TimeExtent::from(ymd(2024, 1, 1), ymd(2025, 1, 1))
    }

    #[test]
    fn worked_example() {
        let layout = layout();
        let geometry = WindowGeometry::from(50.0, 180.0, &layout).unwrap();
        let range = compute_range(&geometry, &extent(), &layout);
        assert_eq!(range.min_date(), ymd(2024, 1, 1));

        // 180/700 of 366 days
        let span_ms = Duration::days(366).num_milliseconds() as f64;
        let expected = ymd(2024, 1, 1) + Duration::milliseconds((span_ms * 180.0 / 700.0).round() as i64);
        assert_eq!(range.max_date(), expected);
        assert_eq!(range.max_date().date_naive(), ymd(2024, 4, 4).date_naive());
    }

    #[test]
    fn full_track_is_full_extent() {
        let layout = layout();
        let geometry = WindowGeometry::from(50.0, 700.0, &layout).unwrap();
        let range = compute_range(&geometry, &extent(), &layout);
        assert_eq!(range.min_date(), extent().min());
        assert_eq!(range.max_date(), extent().max());
    }

    #[test]
    fn min_never_after_max() {
        let layout = layout();
        for left in (50..=740).step_by(10) {
            for width in (10..=700).step_by(30) {
                let Some(geometry) = WindowGeometry::from(left as f64, width as f64, &layout)
                else {
                    continue;
                };
                let range = compute_range(&geometry, &extent(), &layout);
                assert!(range.min_date() <= range.max_date());
            }
        }
    }

    #[test]
    fn monotonic_in_left() {
        let layout = layout();
        let mut previous: Option<SelectedDateRange> = None;
        for left in 50..=550 {
            let geometry = WindowGeometry::from(left as f64, 200.0, &layout).unwrap();
            let range = compute_range(&geometry, &extent(), &layout);
            if let Some(previous) = previous {
                assert!(range.min_date() > previous.min_date());
                assert!(range.max_date() > previous.max_date());
            }
            previous = Some(range);
        }
    }

    #[test]
    fn single_instant_extent() {
        let layout = layout();
        let instant = ymd(2024, 6, 1);
        let extent = TimeExtent::from(instant, instant);
        let geometry = WindowGeometry::from(300.0, 100.0, &layout).unwrap();
        let range = compute_range(&geometry, &extent, &layout);
        assert_eq!(range.min_date(), instant);
        assert_eq!(range.max_date(), instant);
    }
}
