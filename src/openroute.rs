//! OpenRouteService directions adapter.

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::polyline::{DEFAULT_PRECISION, Polyline};
use crate::traits::{Directions, DirectionsProvider, Waypoint};

#[derive(Debug, Clone)]
pub struct OpenRouteConfig {
    pub base_url: String,
    pub profile: String,
    pub api_key: String,
}

impl OpenRouteConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: "https://api.openrouteservice.org".to_string(),
            profile: "driving-car".to_string(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenRouteClient {
    config: OpenRouteConfig,
    client: reqwest::blocking::Client,
}

impl OpenRouteClient {
    pub fn new(config: OpenRouteConfig, client: reqwest::blocking::Client) -> Self {
        Self { config, client }
    }

    fn directions_url(&self) -> String {
        format!(
            "{}/v2/directions/{}/json",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile
        )
    }
}

#[derive(Debug, Serialize)]
struct DirectionsRequest {
    /// [lon, lat] pairs.
    coordinates: [[f64; 2]; 2],
    instructions: bool,
}

impl DirectionsProvider for OpenRouteClient {
    fn name(&self) -> &str {
        "openrouteservice"
    }

    fn route(&self, origin: &Waypoint, destination: &Waypoint) -> Result<Directions, ProviderError> {
        let request = DirectionsRequest {
            coordinates: [
                [origin.coordinate.longitude, origin.coordinate.latitude],
                [destination.coordinate.longitude, destination.coordinate.latitude],
            ],
            instructions: false,
        };

        let response = self
            .client
            .post(self.directions_url())
            .header("Authorization", &self.config.api_key)
            .header("Accept", "application/json, application/geo+json")
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            tracing::debug!("openrouteservice error response ({}): {}", status, text);
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(ProviderError::NoRoute);
            }
            return Err(ProviderError::Unavailable(format!("status {}", status)));
        }

        response.json::<OrsResponse>()?.into_directions()
    }
}

#[derive(Debug, Deserialize)]
struct OrsResponse {
    #[serde(default)]
    routes: Vec<OrsRoute>,
}

#[derive(Debug, Deserialize)]
struct OrsRoute {
    summary: OrsSummary,
    /// Encoded polyline, precision 5.
    geometry: String,
}

#[derive(Debug, Deserialize)]
struct OrsSummary {
    /// Meters. Omitted for zero-length routes.
    #[serde(default)]
    distance: f64,
    /// Seconds.
    #[serde(default)]
    duration: f64,
}

impl OrsResponse {
    fn into_directions(self) -> Result<Directions, ProviderError> {
        let route = self.routes.into_iter().next().ok_or(ProviderError::NoRoute)?;
        let path = Polyline::decode(&route.geometry, DEFAULT_PRECISION)
            .map_err(|err| ProviderError::InvalidResponse(err.to_string()))?
            .into_points();

        Ok(Directions {
            path,
            distance_km: route.summary.distance / 1000.0,
            duration_min: route.summary.duration / 60.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directions_url() {
        let client = OpenRouteClient::new(OpenRouteConfig::new("key"), reqwest::blocking::Client::new());
        assert_eq!(
            client.directions_url(),
            "https://api.openrouteservice.org/v2/directions/driving-car/json"
        );
    }

    #[test]
    fn test_request_body_is_lon_lat() {
        let request = DirectionsRequest {
            coordinates: [[24.9414, 60.1718], [24.9633, 60.3172]],
            instructions: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["coordinates"][0][0], 24.9414);
        assert_eq!(json["instructions"], false);
    }

    #[test]
    fn test_parse_response() {
        let body: OrsResponse = serde_json::from_str(
            r#"{
                "routes": [{
                    "summary": {"distance": 5200.0, "duration": 480.0},
                    "geometry": "_p~iF~ps|U_ulLnnqC_mqNvxq`@",
                    "way_points": [0, 2]
                }],
                "metadata": {}
            }"#,
        )
        .unwrap();

        let directions = body.into_directions().unwrap();
        assert!((directions.distance_km - 5.2).abs() < 1e-9);
        assert!((directions.duration_min - 8.0).abs() < 1e-9);
        assert_eq!(directions.path.len(), 3);
        assert!((directions.path[0].latitude - 38.5).abs() < 1e-9);
        assert!((directions.path[0].longitude - -120.2).abs() < 1e-9);
        assert!((directions.path[2].latitude - 43.252).abs() < 1e-9);
    }

    #[test]
    fn test_parse_bad_geometry() {
        let body: OrsResponse = serde_json::from_str(
            r#"{"routes": [{"summary": {"distance": 1.0, "duration": 1.0}, "geometry": "_p~iF"}]}"#,
        )
        .unwrap();
        assert!(matches!(body.into_directions(), Err(ProviderError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_empty_routes() {
        let body: OrsResponse = serde_json::from_str(r#"{"routes": []}"#).unwrap();
        assert!(matches!(body.into_directions(), Err(ProviderError::NoRoute)));
    }
}
