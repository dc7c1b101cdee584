//! Google Maps web-service adapter (geocoding and directions).
//!
//! Geocoding results carry a place id, which the directions request prefers
//! over raw coordinates when both ends have one.

use serde::Deserialize;

use crate::error::ProviderError;
use crate::model::Coordinate;
use crate::polyline::{DEFAULT_PRECISION, Polyline};
use crate::traits::{Directions, DirectionsProvider, GeocodeHit, GeocodeRequest, GeocodingProvider, Waypoint};

#[derive(Debug, Clone)]
pub struct GoogleMapsConfig {
    pub base_url: String,
    pub api_key: String,
}

impl GoogleMapsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: "https://maps.googleapis.com".to_string(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoogleMapsClient {
    config: GoogleMapsConfig,
    client: reqwest::blocking::Client,
}

impl GoogleMapsClient {
    pub fn new(config: GoogleMapsConfig, client: reqwest::blocking::Client) -> Self {
        Self { config, client }
    }

    fn endpoint(&self, service: &str) -> String {
        format!(
            "{}/maps/api/{}/json",
            self.config.base_url.trim_end_matches('/'),
            service
        )
    }
}

/// `place_id:<id>` when available, else `lat,lng`.
fn waypoint_param(waypoint: &Waypoint) -> String {
    match &waypoint.place_id {
        Some(place_id) => format!("place_id:{}", place_id),
        None => format!(
            "{:.6},{:.6}",
            waypoint.coordinate.latitude, waypoint.coordinate.longitude
        ),
    }
}

/// Maps a non-OK status to the matching provider error.
fn status_error(status: &str, message: Option<String>) -> ProviderError {
    match status {
        "ZERO_RESULTS" | "NOT_FOUND" => ProviderError::NotFound,
        other => ProviderError::Unavailable(match message {
            Some(message) => format!("{}: {}", other, message),
            None => other.to_string(),
        }),
    }
}

impl GeocodingProvider for GoogleMapsClient {
    fn name(&self) -> &str {
        "google"
    }

    fn geocode(&self, request: &GeocodeRequest<'_>) -> Result<GeocodeHit, ProviderError> {
        let mut params = vec![
            ("address", request.query.to_string()),
            ("key", self.config.api_key.clone()),
        ];
        if let Some(country_code) = request.country_code {
            params.push(("components", format!("country:{}", country_code)));
        }

        self.client
            .get(self.endpoint("geocode"))
            .query(&params)
            .send()?
            .error_for_status()?
            .json::<GeocodeResponse>()?
            .into_hit()
    }
}

impl DirectionsProvider for GoogleMapsClient {
    fn name(&self) -> &str {
        "google"
    }

    fn route(&self, origin: &Waypoint, destination: &Waypoint) -> Result<Directions, ProviderError> {
        let params = [
            ("origin", waypoint_param(origin)),
            ("destination", waypoint_param(destination)),
            ("mode", "driving".to_string()),
            ("key", self.config.api_key.clone()),
        ];

        let body = self
            .client
            .get(self.endpoint("directions"))
            .query(&params)
            .send()?
            .error_for_status()?
            .json::<DirectionsResponse>()?;

        match body.into_directions() {
            Err(ProviderError::NotFound) => Err(ProviderError::NoRoute),
            other => other,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
    place_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl GeocodeResponse {
    fn into_hit(self) -> Result<GeocodeHit, ProviderError> {
        if self.status != "OK" {
            return Err(status_error(&self.status, self.error_message));
        }
        let result = self.results.into_iter().next().ok_or(ProviderError::NotFound)?;
        Ok(GeocodeHit {
            coordinate: Coordinate::new(result.geometry.location.lat, result.geometry.location.lng),
            place_id: result.place_id,
        })
    }
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<GoogleRoute>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleRoute {
    #[serde(default)]
    legs: Vec<Leg>,
    overview_polyline: OverviewPolyline,
}

#[derive(Debug, Deserialize)]
struct Leg {
    distance: Measure,
    duration: Measure,
}

#[derive(Debug, Deserialize)]
struct Measure {
    value: f64,
}

#[derive(Debug, Deserialize)]
struct OverviewPolyline {
    points: String,
}

impl DirectionsResponse {
    fn into_directions(self) -> Result<Directions, ProviderError> {
        if self.status != "OK" {
            return Err(status_error(&self.status, self.error_message));
        }
        let route = self.routes.into_iter().next().ok_or(ProviderError::NoRoute)?;

        // Meters and seconds, summed over legs.
        let meters: f64 = route.legs.iter().map(|leg| leg.distance.value).sum();
        let seconds: f64 = route.legs.iter().map(|leg| leg.duration.value).sum();
        let path = Polyline::decode(&route.overview_polyline.points, DEFAULT_PRECISION)
            .map_err(|err| ProviderError::InvalidResponse(err.to_string()))?
            .into_points();

        Ok(Directions {
            path,
            distance_km: meters / 1000.0,
            duration_min: seconds / 60.0,
        })
    }
}
