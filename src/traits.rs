//! Capability seams for the planner.
//!
//! Geocoding, directions and distance estimation are all pluggable. Concrete
//! HTTP adapters live in their own modules; tests plug in stubs.

use crate::error::ProviderError;
use crate::model::{Coordinate, NamedPoint};

/// A single geocoding query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeocodeRequest<'a> {
    pub query: &'a str,
    /// ISO 3166-1 alpha-2 code to restrict results to, if any.
    pub country_code: Option<&'a str>,
}

/// A successful geocoding lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeHit {
    pub coordinate: Coordinate,
    pub place_id: Option<String>,
}

/// Resolves free text to a coordinate.
pub trait GeocodingProvider: Send + Sync {
    /// Short provider name used in logs and result metadata.
    fn name(&self) -> &str;

    fn geocode(&self, request: &GeocodeRequest<'_>) -> Result<GeocodeHit, ProviderError>;
}

/// One end of a directions request.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub coordinate: Coordinate,
    pub place_id: Option<String>,
}

impl Waypoint {
    /// Builds a waypoint from a named point with its coordinate normalized.
    pub fn from_point(point: &NamedPoint) -> Self {
        Self {
            coordinate: point.coordinate.normalized(),
            place_id: point.provider_place_id.clone(),
        }
    }
}

/// A provider's answer for a single origin/destination pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Directions {
    pub path: Vec<Coordinate>,
    pub distance_km: f64,
    pub duration_min: f64,
}

/// Produces a travel path between two waypoints.
pub trait DirectionsProvider: Send + Sync {
    fn name(&self) -> &str;

    fn route(&self, origin: &Waypoint, destination: &Waypoint) -> Result<Directions, ProviderError>;
}

/// Provides a distance matrix for a set of locations.
///
/// The matrix is indexed by the provided location order.
pub trait DistanceMatrixProvider {
    fn matrix_for(&self, locations: &[Coordinate]) -> Vec<Vec<f64>>;
}
