// SPDX-License-Identifier: MIT

//!
//! The Quake Explorer dataset
//!

use crate::{MagnitudeHistogram, Quake, TimeExtent};
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::fs::File;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Errors that can arise when loading a [`Dataset`]
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A malformed row, or a row holding an invalid [`Quake`]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// An inclusive date range used to cross-filter the dataset
pub trait DateRangeFilter {
    /// The earliest instant inside the range
    fn start(&self) -> DateTime<Utc>;

    /// The latest instant inside the range
    fn end(&self) -> DateTime<Utc>;

    /// Whether the instant falls inside the range
    fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start() <= instant && instant <= self.end()
    }
}

impl DateRangeFilter for TimeExtent {
    fn start(&self) -> DateTime<Utc> {
        self.min()
    }

    fn end(&self) -> DateTime<Utc> {
        self.max()
    }
}

/// A time ordered collection of [`Quake`]s.
///
/// Once loaded the dataset isn't mutated - collaborators filter it by reading
/// through [`Dataset::in_range()`].
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    quakes: Vec<Quake>,
    extent: Option<TimeExtent>,
}

impl From<Vec<Quake>> for Dataset {
    fn from(mut quakes: Vec<Quake>) -> Self {
        quakes.sort_by_key(|quake| quake.time());
        let extent = TimeExtent::from_instants(quakes.iter().map(Quake::time));
        Dataset { quakes, extent }
    }
}

impl Dataset {
    /// Read quakes from CSV with a header row (USGS catalogue format)
    pub fn from_csv_reader<R: io::Read>(reader: R) -> Result<Self, DatasetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let quakes = csv_reader
            .deserialize::<Quake>()
            .collect::<Result<Vec<_>, _>>()?;
        info!("number of items: {}", quakes.len());
        Ok(Dataset::from(quakes))
    }

    /// Read quakes from a CSV file
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        debug!("Loading dataset from {}", path.display());
        let file = File::open(path)?;
        Self::from_csv_reader(io::BufReader::new(file))
    }

    /// All quakes, earliest first
    pub fn quakes(&self) -> &[Quake] {
        &self.quakes
    }

    pub fn len(&self) -> usize {
        self.quakes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quakes.is_empty()
    }

    /// The dataset's time extent (`None` if the dataset is empty)
    pub fn time_extent(&self) -> Option<TimeExtent> {
        self.extent
    }

    /// The smallest and largest magnitudes (`None` if the dataset is empty)
    pub fn magnitude_extent(&self) -> Option<(f64, f64)> {
        self.quakes.iter().map(Quake::magnitude).fold(None, |acc, mag| {
            Some(match acc {
                None => (mag, mag),
                Some((min, max)) => (min.min(mag), max.max(mag)),
            })
        })
    }

    /// Iterate over the quakes that fall within the range (inclusive)
    pub fn in_range<F: DateRangeFilter>(&self, range: &F) -> impl Iterator<Item = &Quake> {
        let (start, end) = (range.start(), range.end());

        // Sorted by time, so skip straight to the first candidate
        let first = self.quakes.partition_point(|quake| quake.time() < start);
        self.quakes[first..]
            .iter()
            .take_while(move |quake| quake.time() <= end)
    }

    /// Histogram of the magnitudes of the quakes in the range
    pub fn magnitude_histogram_in_range<F: DateRangeFilter>(&self, range: &F) -> MagnitudeHistogram {
        MagnitudeHistogram::from_magnitudes(self.in_range(range).map(Quake::magnitude))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;
    use std::path::PathBuf;

    fn test_data(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("test-data")
            .join(name)
    }

    fn ymd(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn load_valid_csv() {
        let dataset = Dataset::from_csv_path(test_data("quakes.csv")).unwrap();
        assert_eq!(dataset.len(), 8);

        // Sorted on load (the file isn't)
        let times: Vec<_> = dataset.quakes().iter().map(Quake::time).collect();
        let mut sorted = times.clone();
        sorted.sort();
        assert_eq!(times, sorted);

        let extent = dataset.time_extent().unwrap();
        assert_eq!(extent.min(), Utc.with_ymd_and_hms(2024, 1, 1, 0, 3, 21).unwrap());
        assert_eq!(extent.max(), Utc.with_ymd_and_hms(2024, 12, 30, 22, 45, 10).unwrap());

        // Empty optional columns
        let first = &dataset.quakes()[0];
        assert_eq!(first.place(), Some("5 km NW of The Geysers, CA"));
        assert_eq!(first.id(), Some("nc75000001"));
        assert!(dataset.quakes().iter().any(|quake| quake.depth().is_none()));

        assert_eq!(dataset.magnitude_extent(), Some((0.4, 7.1)));
    }

    #[test]
    fn load_invalid_csv() {
        for name in ["invalid_time.csv", "invalid_latitude.csv"] {
            let result = Dataset::from_csv_path(test_data(name));
            assert!(matches!(result, Err(DatasetError::Csv(_))), "{name}");
        }
        let result = Dataset::from_csv_path(test_data("does_not_exist.csv"));
        assert!(matches!(result, Err(DatasetError::Io(_))));
    }

    #[test]
    fn empty_dataset_has_no_extent() {
        let dataset = Dataset::from_csv_reader("time,latitude,longitude,depth,mag\n".as_bytes())
            .unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.time_extent(), None);
        assert_eq!(dataset.magnitude_extent(), None);
    }

    #[test]
    fn in_range() {
        let quakes = (1..=12)
            .map(|month| Quake::from(ymd(2024, month, 1), 0.0, 0.0, month as f64 / 2.0).unwrap())
            .collect::<Vec<_>>();
        let dataset = Dataset::from(quakes);

        // Inclusive at both ends
        let range = TimeExtent::from(ymd(2024, 3, 1), ymd(2024, 5, 1));
        let months: Vec<_> = dataset
            .in_range(&range)
            .map(|quake| quake.time())
            .collect();
        assert_eq!(months, vec![ymd(2024, 3, 1), ymd(2024, 4, 1), ymd(2024, 5, 1)]);

        // Nothing in range
        let range = TimeExtent::from(ymd(2023, 1, 1), ymd(2023, 6, 1));
        assert_eq!(dataset.in_range(&range).count(), 0);

        // Histogram over the filtered records only
        let range = TimeExtent::from(ymd(2024, 1, 1), ymd(2024, 2, 1));
        let histogram = dataset.magnitude_histogram_in_range(&range);
        assert_eq!(histogram.total(), 2);
        assert_eq!(histogram.count_at(0.5), Some(1));
        assert_eq!(histogram.count_at(1.0), Some(1));
    }
}
