// SPDX-License-Identifier: MIT

//!
//! The time extent of a dataset
//!

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// The earliest and latest instants of a dataset.
///
/// A [`TimeExtent`] always satisfies `min <= max`.  An empty dataset has no
/// extent at all (`Option<TimeExtent>`), rather than an undefined one.
#[derive(derive_more::Display, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[display("{min} to {max}")]
pub struct TimeExtent {
    min: DateTime<Utc>,
    max: DateTime<Utc>,
}

impl TimeExtent {
    /// Create an extent from two instants, in either order
    pub fn from(a: DateTime<Utc>, b: DateTime<Utc>) -> Self {
        TimeExtent {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// The extent covering every instant yielded, or `None` if there are none
    pub fn from_instants<I>(instants: I) -> Option<Self>
    where
        I: IntoIterator<Item = DateTime<Utc>>,
    {
        instants.into_iter().fold(None, |extent, instant| match extent {
            None => Some(TimeExtent {
                min: instant,
                max: instant,
            }),
            Some(TimeExtent { min, max }) => Some(TimeExtent {
                min: min.min(instant),
                max: max.max(instant),
            }),
        })
    }

    pub fn min(&self) -> DateTime<Utc> {
        self.min
    }

    pub fn max(&self) -> DateTime<Utc> {
        self.max
    }

    /// The length of the extent (zero for a single-instant dataset)
    pub fn span(&self) -> Duration {
        self.max - self.min
    }

    /// Whether the extent collapses to a single instant
    pub fn is_instant(&self) -> bool {
        self.min == self.max
    }

    /// Linearly interpolate into the extent.  `fraction` is clamped to
    /// `[0, 1]`, so the result is always within the extent.
    pub fn at_fraction(&self, fraction: f64) -> DateTime<Utc> {
        if self.is_instant() || fraction.is_nan() {
            return self.min;
        }
        let fraction = fraction.clamp(0.0, 1.0);
        let span_ms = self.span().num_milliseconds() as f64;
        let offset_ms = (span_ms * fraction).round() as i64;
        self.min + Duration::milliseconds(offset_ms)
    }

    /// The inverse of [`TimeExtent::at_fraction()`].  A single-instant extent
    /// maps everything to `0`.
    pub fn fraction_of(&self, instant: DateTime<Utc>) -> f64 {
        if self.is_instant() {
            return 0.0;
        }
        let span_ms = self.span().num_milliseconds() as f64;
        let offset_ms = (instant - self.min).num_milliseconds() as f64;
        (offset_ms / span_ms).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    fn ymd(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn from_instants() {
        assert_eq!(TimeExtent::from_instants(Vec::new()), None);

        let extent =
            TimeExtent::from_instants([ymd(2024, 5, 1), ymd(2024, 1, 1), ymd(2024, 9, 1)]).unwrap();
        assert_eq!(extent.min(), ymd(2024, 1, 1));
        assert_eq!(extent.max(), ymd(2024, 9, 1));

        let extent = TimeExtent::from(ymd(2025, 1, 1), ymd(2024, 1, 1));
        assert_eq!(extent.min(), ymd(2024, 1, 1));
    }

    #[test]
    fn at_fraction() {
        let extent = TimeExtent::from(ymd(2024, 1, 1), ymd(2025, 1, 1));
        assert_eq!(extent.at_fraction(0.0), ymd(2024, 1, 1));
        assert_eq!(extent.at_fraction(1.0), ymd(2025, 1, 1));
        assert_eq!(extent.at_fraction(-3.0), ymd(2024, 1, 1));
        assert_eq!(extent.at_fraction(7.0), ymd(2025, 1, 1));

        // 2024 is a leap year, half of 366 days is 183 days
        assert_eq!(extent.at_fraction(0.5), ymd(2024, 7, 2));
        assert_eq!(extent.fraction_of(ymd(2024, 7, 2)), 0.5);
    }

    #[test]
    fn single_instant() {
        let instant = ymd(2024, 6, 1);
        let extent = TimeExtent::from_instants([instant]).unwrap();
        assert!(extent.is_instant());
        assert_eq!(extent.at_fraction(0.3), instant);
        assert_eq!(extent.at_fraction(f64::NAN), instant);
        assert_eq!(extent.fraction_of(instant), 0.0);
    }
}
