//! Stub providers that record their calls.

use std::collections::HashMap;
use std::sync::Mutex;

use route_planner::error::ProviderError;
use route_planner::model::Coordinate;
use route_planner::traits::{
    Directions, DirectionsProvider, GeocodeHit, GeocodeRequest, GeocodingProvider, Waypoint,
};

/// Answers exact queries from a table; anything else is `NotFound`.
pub struct StubGeocoder {
    name: &'static str,
    answers: HashMap<String, GeocodeHit>,
    pub calls: Mutex<Vec<(String, Option<String>)>>,
}

impl StubGeocoder {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            answers: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn answer(mut self, query: &str, lat: f64, lng: f64) -> Self {
        self.answers.insert(
            query.to_string(),
            GeocodeHit {
                coordinate: Coordinate::new(lat, lng),
                place_id: None,
            },
        );
        self
    }

    pub fn answer_with_place(mut self, query: &str, lat: f64, lng: f64, place_id: &str) -> Self {
        self.answers.insert(
            query.to_string(),
            GeocodeHit {
                coordinate: Coordinate::new(lat, lng),
                place_id: Some(place_id.to_string()),
            },
        );
        self
    }

    pub fn queries(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl GeocodingProvider for StubGeocoder {
    fn name(&self) -> &str {
        self.name
    }

    fn geocode(&self, request: &GeocodeRequest<'_>) -> Result<GeocodeHit, ProviderError> {
        self.calls.lock().unwrap().push((
            request.query.to_string(),
            request.country_code.map(str::to_string),
        ));
        self.answers
            .get(request.query)
            .cloned()
            .ok_or(ProviderError::NotFound)
    }
}

/// A geocoder that is never available.
pub struct UnavailableGeocoder;

impl GeocodingProvider for UnavailableGeocoder {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn geocode(&self, _request: &GeocodeRequest<'_>) -> Result<GeocodeHit, ProviderError> {
        Err(ProviderError::Unavailable("not loaded".to_string()))
    }
}

/// Returns a fixed answer for every pair and records the waypoints it saw.
pub struct StubDirections {
    name: &'static str,
    answer: Result<Directions, fn() -> ProviderError>,
    pub calls: Mutex<Vec<(Waypoint, Waypoint)>>,
}

impl StubDirections {
    pub fn fixed(name: &'static str, path: Vec<Coordinate>, distance_km: f64, duration_min: f64) -> Self {
        Self {
            name,
            answer: Ok(Directions {
                path,
                distance_km,
                duration_min,
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(name: &'static str, error: fn() -> ProviderError) -> Self {
        Self {
            name,
            answer: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl DirectionsProvider for StubDirections {
    fn name(&self) -> &str {
        self.name
    }

    fn route(&self, origin: &Waypoint, destination: &Waypoint) -> Result<Directions, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((origin.clone(), destination.clone()));
        match &self.answer {
            Ok(directions) => Ok(directions.clone()),
            Err(error) => Err(error()),
        }
    }
}

/// Routes every pair as a three-point path through the midpoint so joints
/// can be checked. Every leg reports 1.0 km and 2.0 min.
pub struct MidpointDirections;

impl DirectionsProvider for MidpointDirections {
    fn name(&self) -> &str {
        "midpoint"
    }

    fn route(&self, origin: &Waypoint, destination: &Waypoint) -> Result<Directions, ProviderError> {
        let mid = origin.coordinate.interpolate(destination.coordinate, 0.5);
        Ok(Directions {
            path: vec![origin.coordinate, mid, destination.coordinate],
            distance_km: 1.0,
            duration_min: 2.0,
        })
    }
}
