//! Nominatim (OpenStreetMap) geocoding adapter.

use serde::Deserialize;

use crate::error::ProviderError;
use crate::model::Coordinate;
use crate::traits::{GeocodeHit, GeocodeRequest, GeocodingProvider};

#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub base_url: String,
    pub language: String,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            language: "en".to_string(),
        }
    }
}

/// The HTTP client must carry an identifying `User-Agent`; the public
/// instance rejects anonymous traffic.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    config: NominatimConfig,
    client: reqwest::blocking::Client,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig, client: reqwest::blocking::Client) -> Self {
        Self { config, client }
    }

    fn query_params(&self, request: &GeocodeRequest<'_>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("format", "json".to_string()),
            ("q", request.query.to_string()),
            ("limit", "1".to_string()),
            ("accept-language", self.config.language.clone()),
        ];
        if let Some(country_code) = request.country_code {
            params.push(("countrycodes", country_code.to_string()));
        }
        params
    }
}

impl GeocodingProvider for NominatimClient {
    fn name(&self) -> &str {
        "nominatim"
    }

    fn geocode(&self, request: &GeocodeRequest<'_>) -> Result<GeocodeHit, ProviderError> {
        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        let places = self
            .client
            .get(url)
            .query(&self.query_params(request))
            .send()?
            .error_for_status()?
            .json::<Vec<Place>>()?;

        first_hit(places)
    }
}

#[derive(Debug, Deserialize)]
struct Place {
    /// Nominatim returns coordinates as decimal strings.
    lat: String,
    lon: String,
}

fn first_hit(places: Vec<Place>) -> Result<GeocodeHit, ProviderError> {
    let place = places.into_iter().next().ok_or(ProviderError::NotFound)?;
    let parse = |value: &str| {
        value
            .trim()
            .parse::<f64>()
            .map_err(|err| ProviderError::InvalidResponse(format!("{:?}: {}", value, err)))
    };

    Ok(GeocodeHit {
        coordinate: Coordinate::new(parse(&place.lat)?, parse(&place.lon)?),
        place_id: None,
    })
}
