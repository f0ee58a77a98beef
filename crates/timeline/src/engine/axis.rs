// SPDX-License-Identifier: MIT

//!
//! Time axis ticks
//!

use crate::{AXIS_TICK_FORMAT, MIN_AXIS_TICK_SPACING, TrackLayout};
use chrono::{DateTime, Datelike, TimeZone, Utc};
use quake_explorer_core::TimeExtent;
use serde::Serialize;
use std::fmt::Debug;

/// Average month length in milliseconds (365.2425 / 12 days)
const AVERAGE_MONTH_MS: f64 = 2_629_746_000.0;

/// Month steps tried (in order) before falling back to whole numbers of years
const MONTH_STEPS: [i32; 5] = [1, 2, 3, 6, 12];

/// A labelled tick on the time axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTick {
    /// Position on the track (same coordinates as [`crate::WindowGeometry`])
    pub x: f64,
    pub instant: DateTime<Utc>,
    pub label: String,
}

impl AxisTick {
    fn at(instant: DateTime<Utc>, extent: &TimeExtent, layout: &TrackLayout) -> Self {
        AxisTick {
            x: layout.x_at(extent.fraction_of(instant)),
            instant,
            label: instant.format(AXIS_TICK_FORMAT).to_string(),
        }
    }
}

/// Ticks for the time axis.
///
/// The first and last ticks are always the extent's exact bounds.  Between
/// them are ticks on the first of the month, at a step of months (or years)
/// chosen so they sit at least [`MIN_AXIS_TICK_SPACING`] apart.  The generated
/// tick just before the last one is dropped so its label can't collide with
/// the last label.
pub fn axis_ticks(extent: &TimeExtent, layout: &TrackLayout) -> Vec<AxisTick> {
    let first = AxisTick::at(extent.min(), extent, layout);
    if extent.is_instant() {
        return vec![first];
    }

    let step = month_step(extent, layout);
    let mut ticks = vec![first];

    // Month indices aligned to the step, strictly inside the extent
    let mut index = month_index(extent.min()).div_euclid(step) * step;
    loop {
        index += step;
        let Some(instant) = month_start(index) else {
            break;
        };
        if instant <= extent.min() {
            continue;
        }
        if instant >= extent.max() {
            break;
        }
        ticks.push(AxisTick::at(instant, extent, layout));
    }

    if ticks.len() > 1 {
        ticks.pop();
    }
    ticks.push(AxisTick::at(extent.max(), extent, layout));
    ticks
}

/// The smallest step (in months) that keeps ticks far enough apart
fn month_step(extent: &TimeExtent, layout: &TrackLayout) -> i32 {
    let span_ms = extent.span().num_milliseconds() as f64;
    let month_px = layout.track_width() * AVERAGE_MONTH_MS / span_ms;
    if let Some(step) = MONTH_STEPS
        .into_iter()
        .find(|step| *step as f64 * month_px >= MIN_AXIS_TICK_SPACING)
    {
        return step;
    }
    let years = (MIN_AXIS_TICK_SPACING / (12.0 * month_px)).ceil();
    if years.is_finite() && years < i32::MAX as f64 / 12.0 {
        12 * (years as i32).max(1)
    } else {
        i32::MAX / 2
    }
}

/// Months since year 0
fn month_index(instant: DateTime<Utc>) -> i32 {
    instant.year() * 12 + instant.month0() as i32
}

/// Midnight on the first of the month with the index
fn month_start(index: i32) -> Option<DateTime<Utc>> {
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).single()
}

#[cfg(test)]
mod test {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    fn labels(ticks: &[AxisTick]) -> Vec<&str> {
        ticks.iter().map(|tick| tick.label.as_str()).collect()
    }

    #[test]
    fn one_year() {
        let layout = TrackLayout::from(700.0, 50.0, 10.0).unwrap();
        let extent = TimeExtent::from(ymd(2024, 1, 1), ymd(2025, 1, 1));
        let ticks = axis_ticks(&extent, &layout);

        // Every 2 months, with 11/2024 dropped
        assert_eq!(
            labels(&ticks),
            vec!["01/2024", "03/2024", "05/2024", "07/2024", "09/2024", "01/2025"]
        );
        assert_eq!(ticks.first().unwrap().x, 50.0);
        assert_eq!(ticks.last().unwrap().x, 750.0);
        assert_eq!(ticks.first().unwrap().instant, extent.min());
        assert_eq!(ticks.last().unwrap().instant, extent.max());
    }

    #[test]
    fn ticks_are_ordered_and_spaced() {
        let layout = TrackLayout::from(700.0, 50.0, 10.0).unwrap();
        let extent = TimeExtent::from(ymd(1990, 3, 17), ymd(2024, 8, 2));
        let ticks = axis_ticks(&extent, &layout);
        assert!(ticks.len() >= 2);
        for pair in ticks.windows(2) {
            assert!(pair[0].x < pair[1].x);
        }
        // Generated ticks (not the exact bounds) respect the spacing
        for pair in ticks[1..ticks.len() - 1].windows(2) {
            assert!(pair[1].x - pair[0].x >= MIN_AXIS_TICK_SPACING - 1.0);
        }
    }

    #[test]
    fn short_extent() {
        let layout = TrackLayout::default();
        let extent = TimeExtent::from(ymd(2024, 5, 3), ymd(2024, 5, 20));
        let ticks = axis_ticks(&extent, &layout);
        assert_eq!(labels(&ticks), vec!["05/2024", "05/2024"]);
    }

    #[test]
    fn single_instant() {
        let layout = TrackLayout::default();
        let extent = TimeExtent::from(ymd(2024, 5, 3), ymd(2024, 5, 3));
        let ticks = axis_ticks(&extent, &layout);
        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks[0].x, layout.min_x());
    }
}
