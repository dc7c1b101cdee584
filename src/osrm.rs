//! OSRM HTTP adapter for point-to-point directions.

use serde::Deserialize;

use crate::error::ProviderError;
use crate::model::Coordinate;
use crate::traits::{Directions, DirectionsProvider, Waypoint};

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.project-osrm.org".to_string(),
            profile: "driving".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    /// Timeouts and user agent come from `client`.
    pub fn new(config: OsrmConfig, client: reqwest::blocking::Client) -> Self {
        Self { config, client }
    }

    fn route_url(&self, origin: Coordinate, destination: Coordinate) -> String {
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?overview=full&geometries=geojson",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            origin.longitude,
            origin.latitude,
            destination.longitude,
            destination.latitude
        )
    }
}

impl DirectionsProvider for OsrmClient {
    fn name(&self) -> &str {
        "osrm"
    }

    fn route(&self, origin: &Waypoint, destination: &Waypoint) -> Result<Directions, ProviderError> {
        let url = self.route_url(origin.coordinate, destination.coordinate);
        let body = self
            .client
            .get(url)
            .send()?
            .error_for_status()?
            .json::<OsrmRouteResponse>()?;

        body.into_directions()
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    /// Meters.
    distance: f64,
    /// Seconds.
    duration: f64,
    geometry: GeoJsonLineString,
}

#[derive(Debug, Deserialize)]
struct GeoJsonLineString {
    /// [lon, lat] pairs.
    coordinates: Vec<[f64; 2]>,
}

impl OsrmRouteResponse {
    fn into_directions(self) -> Result<Directions, ProviderError> {
        if self.code != "Ok" {
            return Err(ProviderError::NoRoute);
        }
        let route = self.routes.into_iter().next().ok_or(ProviderError::NoRoute)?;

        Ok(Directions {
            path: route
                .geometry
                .coordinates
                .into_iter()
                .map(|[lon, lat]| Coordinate::new(lat, lon))
                .collect(),
            distance_km: route.distance / 1000.0,
            duration_min: route.duration / 60.0,
        })
    }
}
