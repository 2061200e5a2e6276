//! Place model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Radius used when a place has no usable radius of its own.
pub const DEFAULT_RADIUS_METERS: f64 = 300.0;

/// A named circular geofence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Place {
    /// Opaque identifier assigned by the store
    pub id: String,

    /// Display name of the place
    pub name: String,

    /// Optional street address, display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Center of the geofence. Places without one never match.
    #[serde(default)]
    pub location: Option<Coordinate>,

    /// Radius of the geofence as stored; read it through [`Place::radius`]
    #[serde(default = "default_radius")]
    pub radius_meters: f64,

    /// Timestamp when the place was created (UTC)
    pub created_at: Timestamp,
}

fn default_radius() -> f64 {
    DEFAULT_RADIUS_METERS
}

impl Place {
    /// The radius in meters, falling back to [`DEFAULT_RADIUS_METERS`] when
    /// the stored value is zero, negative or not finite.
    pub fn radius(&self) -> f64 {
        effective_radius(self.radius_meters)
    }
}

/// Sanitizes a raw radius value.
pub fn effective_radius(raw: f64) -> f64 {
    if raw.is_finite() && raw > 0.0 {
        raw
    } else {
        DEFAULT_RADIUS_METERS
    }
}
