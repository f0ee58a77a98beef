// SPDX-License-Identifier: MIT

//!
//! The Quake Explorer earthquake event type
//!

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can arise in relation to a [`Quake`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuakeError {
    /// The latitude must be finite and within `-90..=90`
    #[error("Latitude `{0}` is not allowed")]
    InvalidLatitude(f64),

    /// The longitude must be finite and within `-180..=180`
    #[error("Longitude `{0}` is not allowed")]
    InvalidLongitude(f64),

    /// The magnitude must be finite
    #[error("Magnitude `{0}` is not allowed")]
    InvalidMagnitude(f64),

    /// The depth (if present) must be finite
    #[error("Depth `{0}` is not allowed")]
    InvalidDepth(f64),
}

/// A single earthquake event.
///
/// Field names match the columns of the USGS earthquake catalogue CSV export,
/// apart from `mag` which is exposed as [`Quake::magnitude()`].  Columns the
/// dashboard has no use for are ignored when deserialising.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(try_from = "QuakeRow")]
pub struct Quake {
    /// When the event happened
    time: DateTime<Utc>,

    /// Degrees north
    latitude: f64,

    /// Degrees east
    longitude: f64,

    /// Kilometres below the surface (if known)
    depth: Option<f64>,

    /// The event's magnitude
    #[serde(rename = "mag")]
    magnitude: f64,

    /// Human readable description of where the event happened
    place: Option<String>,

    /// Catalogue ID of the event
    id: Option<String>,
}

/// The unvalidated shape of a row as read from CSV (or JSON)
#[derive(Deserialize)]
struct QuakeRow {
    time: DateTime<Utc>,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    depth: Option<f64>,
    mag: f64,
    #[serde(default)]
    place: Option<String>,
    #[serde(default)]
    id: Option<String>,
}

impl TryFrom<QuakeRow> for Quake {
    type Error = QuakeError;
    fn try_from(row: QuakeRow) -> Result<Self, Self::Error> {
        let mut quake = Quake::from(row.time, row.latitude, row.longitude, row.mag)?;
        if let Some(depth) = row.depth {
            quake.set_depth(depth)?;
        }
        quake.place = row.place.filter(|place| !place.trim().is_empty());
        quake.id = row.id.filter(|id| !id.trim().is_empty());
        Ok(quake)
    }
}

impl Quake {
    /// Create a valid [`Quake`] if it is possible to do so with the values
    /// passed in
    pub fn from(
        time: DateTime<Utc>,
        latitude: f64,
        longitude: f64,
        magnitude: f64,
    ) -> Result<Quake, QuakeError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(QuakeError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(QuakeError::InvalidLongitude(longitude));
        }
        if !magnitude.is_finite() {
            return Err(QuakeError::InvalidMagnitude(magnitude));
        }
        Ok(Quake {
            time,
            latitude,
            longitude,
            depth: None,
            magnitude,
            place: None,
            id: None,
        })
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn depth(&self) -> Option<f64> {
        self.depth
    }

    /// Set the depth (km) if it is valid
    pub fn set_depth(&mut self, depth: f64) -> Result<(), QuakeError> {
        if !depth.is_finite() {
            return Err(QuakeError::InvalidDepth(depth));
        }
        self.depth = Some(depth);
        Ok(())
    }

    pub fn place(&self) -> Option<&str> {
        self.place.as_deref()
    }

    pub fn set_place<S: ToString>(&mut self, place: S) {
        let place = place.to_string();
        self.place = (!place.trim().is_empty()).then_some(place);
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
