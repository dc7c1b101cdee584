//! Geocoding fallback chain.
//!
//! Tries each configured provider step in order, then the known-location
//! table, then a fixed default coordinate. Geocoding therefore never fails;
//! a bad lookup degrades to an approximate position instead of aborting a
//! whole multi-stop plan.

use std::collections::HashSet;
use std::sync::Arc;

use crate::known_locations::KnownLocationTable;
pub use crate::model::GeocodeSource;
use crate::model::Coordinate;
use crate::traits::{GeocodeRequest, GeocodingProvider};

/// Central Helsinki.
pub const DEFAULT_FALLBACK: Coordinate = Coordinate::new(60.1699, 24.9384);

/// City and country appended to short queries to improve hit rates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locality {
    pub city: String,
    pub country: String,
    /// ISO 3166-1 alpha-2 code used for restricted steps.
    pub country_code: String,
}

impl Default for Locality {
    fn default() -> Self {
        Self {
            city: "Helsinki".to_string(),
            country: "Finland".to_string(),
            country_code: "fi".to_string(),
        }
    }
}

impl Locality {
    /// Appends whichever of city and country the query is missing.
    pub fn augment(&self, query: &str) -> String {
        let lower = query.to_lowercase();
        let has_city = lower.contains(&self.city.to_lowercase());
        let has_country = lower.contains(&self.country.to_lowercase());

        match (has_city, has_country) {
            (_, true) => query.to_string(),
            (true, false) => format!("{}, {}", query, self.country),
            (false, false) => format!("{}, {}, {}", query, self.city, self.country),
        }
    }
}

/// How a step phrases the query it sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryForm {
    Verbatim,
    WithLocality,
}

/// One provider attempt in the chain.
#[derive(Clone)]
pub struct GeocodeStep {
    pub provider: Arc<dyn GeocodingProvider>,
    pub form: QueryForm,
    pub restrict_to_country: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeOutcome {
    pub coordinate: Coordinate,
    pub place_id: Option<String>,
    pub source: GeocodeSource,
}

pub struct Geocoder {
    steps: Vec<GeocodeStep>,
    locality: Locality,
    known_locations: KnownLocationTable,
    fallback: Coordinate,
}

impl Default for Geocoder {
    fn default() -> Self {
        Self::new(Locality::default(), KnownLocationTable::helsinki())
    }
}

impl Geocoder {
    /// A geocoder with no provider steps.
    pub fn new(locality: Locality, known_locations: KnownLocationTable) -> Self {
        Self {
            steps: Vec::new(),
            locality,
            known_locations,
            fallback: DEFAULT_FALLBACK,
        }
    }

    pub fn with_step(
        mut self,
        provider: Arc<dyn GeocodingProvider>,
        form: QueryForm,
        restrict_to_country: bool,
    ) -> Self {
        self.steps.push(GeocodeStep {
            provider,
            form,
            restrict_to_country,
        });
        self
    }

    pub fn with_fallback(mut self, fallback: Coordinate) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn steps(&self) -> &[GeocodeStep] {
        &self.steps
    }

    pub fn geocode(&self, location_name: &str) -> GeocodeOutcome {
        let mut attempted: HashSet<(String, String, Option<String>)> = HashSet::new();

        for step in &self.steps {
            let query = match step.form {
                QueryForm::Verbatim => location_name.to_string(),
                QueryForm::WithLocality => self.locality.augment(location_name),
            };
            let country_code = step
                .restrict_to_country
                .then(|| self.locality.country_code.clone());

            let key = (step.provider.name().to_string(), query.clone(), country_code.clone());
            if !attempted.insert(key) {
                tracing::debug!(
                    "skipping repeated {} lookup for {:?}",
                    step.provider.name(),
                    query
                );
                continue;
            }

            let request = GeocodeRequest {
                query: &query,
                country_code: country_code.as_deref(),
            };
            match step.provider.geocode(&request) {
                Ok(hit) if hit.coordinate.is_finite() => {
                    tracing::debug!(
                        "geocoded {:?} via {} to ({:.5}, {:.5})",
                        location_name,
                        step.provider.name(),
                        hit.coordinate.latitude,
                        hit.coordinate.longitude
                    );
                    return GeocodeOutcome {
                        coordinate: hit.coordinate.normalized(),
                        place_id: hit.place_id,
                        source: GeocodeSource::Provider(step.provider.name().to_string()),
                    };
                }
                Ok(_) => {
                    tracing::warn!(
                        "{} returned a non-finite coordinate for {:?}",
                        step.provider.name(),
                        query
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        "{} geocoding failed for {:?}: {}",
                        step.provider.name(),
                        query,
                        err
                    );
                }
            }
        }

        if let Some(coordinate) = self.known_locations.lookup(location_name) {
            tracing::info!("using known location for {:?}", location_name);
            return GeocodeOutcome {
                coordinate,
                place_id: None,
                source: GeocodeSource::KnownLocation,
            };
        }

        tracing::warn!(
            "could not geocode {:?}, falling back to default position",
            location_name
        );
        GeocodeOutcome {
            coordinate: self.fallback,
            place_id: None,
            source: GeocodeSource::Default,
        }
    }
}
