//! Coordinate and location sample value types.

use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::{GeoTodoError, Result};

/// A point on the earth's surface in decimal degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    /// Latitude in [-90, 90]
    pub lat: f64,
    /// Longitude in [-180, 180]
    pub lng: f64,
}

impl Coordinate {
    /// Creates a coordinate without range checks.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Creates a coordinate, rejecting non-finite or out-of-range values.
    ///
    /// Used for manual entry; the engine itself never validates.
    pub fn validated(lat: f64, lng: f64) -> Result<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(GeoTodoError::invalid_input("lat")
                .with_reason(format!("{lat} is not a latitude in [-90, 90]")));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(GeoTodoError::invalid_input("lng")
                .with_reason(format!("{lng} is not a longitude in [-180, 180]")));
        }
        Ok(Self { lat, lng })
    }
}

impl FromStr for Coordinate {
    type Err = GeoTodoError;

    /// Parses `"lat,lng"`, with optional whitespace around either part.
    fn from_str(s: &str) -> Result<Self> {
        let (lat, lng) = s.split_once(',').ok_or_else(|| {
            GeoTodoError::invalid_input("coordinate")
                .with_reason(format!("expected 'lat,lng', got '{s}'"))
        })?;

        let parse = |field: &str, value: &str| {
            value.trim().parse::<f64>().map_err(|_| {
                GeoTodoError::invalid_input(field)
                    .with_reason(format!("'{}' is not a number", value.trim()))
            })
        };

        Self::validated(parse("lat", lat)?, parse("lng", lng)?)
    }
}

/// The most recent known device position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LocationSample {
    pub coordinate: Coordinate,
    pub captured_at: Timestamp,
}

impl LocationSample {
    /// Stamps a coordinate with the current time.
    pub fn now(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            captured_at: Timestamp::now(),
        }
    }
}
