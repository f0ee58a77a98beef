// SPDX-License-Identifier: MIT

//!
//! Range filter callbacks
//!

use crate::SelectedDateRange;
use log::debug;

/// Receives the timeline's selected range every time it changes (on every drag
/// update, at the end of a drag, and on every playback tick).
///
/// Implemented for any `FnMut(&SelectedDateRange)`, so a closure can be passed
/// to [`crate::Timeline::set_filter()`] directly.
pub trait RangeFilter {
    fn filter(&mut self, range: &SelectedDateRange);
}

impl<F> RangeFilter for F
where
    F: FnMut(&SelectedDateRange),
{
    fn filter(&mut self, range: &SelectedDateRange) {
        self(range)
    }
}

/// The filter a timeline starts with.  It only logs the range.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogRangeFilter;

impl RangeFilter for LogRangeFilter {
    fn filter(&mut self, range: &SelectedDateRange) {
        debug!("filter: {range}");
    }
}
