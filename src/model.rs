//! Route data model: coordinates, named stops, segments and assembled routes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Clamps latitude into [-90, 90] and wraps longitude into [-180, 180).
    pub fn normalized(self) -> Self {
        let latitude = self.latitude.clamp(-90.0, 90.0);
        let longitude = if (-180.0..180.0).contains(&self.longitude) {
            self.longitude
        } else {
            (self.longitude + 180.0).rem_euclid(360.0) - 180.0
        };
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Linear interpolation in degree space, `t` in [0, 1].
    pub fn interpolate(self, other: Self, t: f64) -> Self {
        Self {
            latitude: self.latitude + (other.latitude - self.latitude) * t,
            longitude: self.longitude + (other.longitude - self.longitude) * t,
        }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

/// A user-supplied location after geocoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedPoint {
    pub name: String,
    pub coordinate: Coordinate,
    /// Provider-native place identifier, when the geocoder that resolved the
    /// point returns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_place_id: Option<String>,
    /// Geocoding stage that produced the coordinate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<GeocodeSource>,
}

impl NamedPoint {
    pub fn new(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            coordinate,
            provider_place_id: None,
            resolved_by: None,
        }
    }

    pub fn with_place_id(mut self, place_id: impl Into<String>) -> Self {
        self.provider_place_id = Some(place_id.into());
        self
    }
}

/// Which stage of the geocoding chain produced a coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeocodeSource {
    Provider(String),
    KnownLocation,
    Default,
}

impl fmt::Display for GeocodeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeocodeSource::Provider(name) => write!(f, "provider {}", name),
            GeocodeSource::KnownLocation => f.write_str("known location"),
            GeocodeSource::Default => f.write_str("default fallback"),
        }
    }
}

/// Where a segment's geometry came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentSource {
    Provider(String),
    StraightLine,
}

/// The routed path between two consecutive stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: NamedPoint,
    pub to: NamedPoint,
    pub path: Vec<Coordinate>,
    pub distance_km: f64,
    pub duration_min: f64,
    pub source: SegmentSource,
}

/// A fully planned multi-stop route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Source, vias in visiting order, destination.
    pub points: Vec<NamedPoint>,
    pub segments: Vec<Segment>,
    /// Rounded to one decimal.
    pub total_distance_km: f64,
    /// Rounded to whole minutes.
    pub total_duration_min: f64,
    pub full_path: Vec<Coordinate>,
}
