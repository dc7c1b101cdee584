//! route-planner core
//!
//! Geocodes a start, destination and via-points, orders the vias to minimize
//! straight-line travel, routes each leg through a chain of directions
//! providers and stitches the legs into one route.

pub mod error;
pub mod model;
pub mod traits;
pub mod haversine;
pub mod solver;
pub mod known_locations;
pub mod geocoder;
pub mod segment;
pub mod planner;
pub mod polyline;
pub mod osrm;
pub mod openroute;
pub mod google;
pub mod nominatim;
pub mod config;

pub use error::{ConfigError, PlanError, ProviderError};
pub use model::{Coordinate, GeocodeSource, NamedPoint, Route, Segment, SegmentSource};
pub use planner::RoutePlanner;

/// Plans a route with providers wired from the process environment.
pub fn calculate_route(source: &str, vias: &[String], destination: &str) -> Result<Route, PlanError> {
    let planner = config::PlannerConfig::from_env()
        .and_then(|config| config.build_planner())
        .map_err(|err| PlanError::RouteFailed(err.to_string()))?;
    planner.calculate_route(source, vias, destination)
}
