//! Planner configuration and provider wiring.
//!
//! Only providers that are configured are wired in. Keyed services
//! (OpenRouteService, Google) are skipped without a key; the open services
//! can be disabled entirely for offline use.

use std::sync::Arc;
use std::time::Duration;

use crate::error::ConfigError;
use crate::geocoder::{Geocoder, Locality, QueryForm};
use crate::google::{GoogleMapsClient, GoogleMapsConfig};
use crate::known_locations::KnownLocationTable;
use crate::nominatim::{NominatimClient, NominatimConfig};
use crate::openroute::{OpenRouteClient, OpenRouteConfig};
use crate::osrm::{OsrmClient, OsrmConfig};
use crate::planner::RoutePlanner;
use crate::segment::{DEFAULT_JITTER_DEG, SegmentRouter};

#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub openroute: Option<OpenRouteConfig>,
    pub google: Option<GoogleMapsConfig>,
    pub nominatim: NominatimConfig,
    pub osrm: OsrmConfig,
    /// When false, no HTTP providers are wired at all.
    pub network: bool,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub locality: Locality,
    pub jitter_deg: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            openroute: None,
            google: None,
            nominatim: NominatimConfig::default(),
            osrm: OsrmConfig::default(),
            network: true,
            user_agent: concat!("route-planner/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 10,
            locality: Locality::default(),
            jitter_deg: DEFAULT_JITTER_DEG,
        }
    }
}

impl PlannerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from a key lookup, falling back to defaults for
    /// missing or blank values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(api_key) = get("ORS_API_KEY") {
            let mut openroute = OpenRouteConfig::new(api_key);
            if let Some(base_url) = get("ORS_BASE_URL") {
                openroute.base_url = base_url;
            }
            config.openroute = Some(openroute);
        }
        if let Some(api_key) = get("GOOGLE_MAPS_API_KEY") {
            let mut google = GoogleMapsConfig::new(api_key);
            if let Some(base_url) = get("GOOGLE_MAPS_BASE_URL") {
                google.base_url = base_url;
            }
            config.google = Some(google);
        }
        if let Some(base_url) = get("NOMINATIM_BASE_URL") {
            config.nominatim.base_url = base_url;
        }
        if let Some(base_url) = get("OSRM_BASE_URL") {
            config.osrm.base_url = base_url;
        }
        if let Some(profile) = get("OSRM_PROFILE") {
            config.osrm.profile = profile;
        }
        if let Some(user_agent) = get("ROUTE_PLANNER_USER_AGENT") {
            config.user_agent = user_agent;
        }
        if let Some(value) = get("ROUTE_PLANNER_TIMEOUT_SECS") {
            config.timeout_secs = parse_value("ROUTE_PLANNER_TIMEOUT_SECS", &value)?;
        }
        if let Some(city) = get("ROUTE_PLANNER_CITY") {
            config.locality.city = city;
        }
        if let Some(country) = get("ROUTE_PLANNER_COUNTRY") {
            config.locality.country = country;
        }
        if let Some(country_code) = get("ROUTE_PLANNER_COUNTRY_CODE") {
            config.locality.country_code = country_code.to_lowercase();
        }
        if let Some(value) = get("ROUTE_PLANNER_JITTER_DEG") {
            let jitter: f64 = parse_value("ROUTE_PLANNER_JITTER_DEG", &value)?;
            if !jitter.is_finite() || jitter < 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: "ROUTE_PLANNER_JITTER_DEG",
                    value,
                });
            }
            config.jitter_deg = jitter;
        }

        Ok(config)
    }

    /// Wires configured providers into a planner.
    ///
    /// Geocoding: Google (restricted), Nominatim with locality (restricted),
    /// Nominatim verbatim. Directions: OpenRouteService, Google, OSRM.
    pub fn build_planner(&self) -> Result<RoutePlanner, ConfigError> {
        let mut geocoder = Geocoder::new(self.locality.clone(), KnownLocationTable::helsinki());
        let mut router = SegmentRouter::new().with_jitter(self.jitter_deg);

        if self.network {
            let client = reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(self.timeout_secs))
                .user_agent(self.user_agent.clone())
                .build()?;

            let google = self
                .google
                .clone()
                .map(|config| Arc::new(GoogleMapsClient::new(config, client.clone())));
            let nominatim = Arc::new(NominatimClient::new(self.nominatim.clone(), client.clone()));

            if let Some(google) = &google {
                geocoder = geocoder.with_step(google.clone(), QueryForm::Verbatim, true);
            }
            geocoder = geocoder
                .with_step(nominatim.clone(), QueryForm::WithLocality, true)
                .with_step(nominatim, QueryForm::Verbatim, false);

            if let Some(openroute) = &self.openroute {
                router = router.with_provider(Arc::new(OpenRouteClient::new(
                    openroute.clone(),
                    client.clone(),
                )));
            }
            if let Some(google) = google {
                router = router.with_provider(google);
            }
            router = router.with_provider(Arc::new(OsrmClient::new(self.osrm.clone(), client)));
        }

        tracing::debug!(
            "wired {} geocoding steps and {} directions providers",
            geocoder.steps().len(),
            router.providers().len()
        );
        Ok(RoutePlanner::new(geocoder, router))
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_keys() {
        let config = PlannerConfig::from_lookup(lookup(&[])).unwrap();
        assert!(config.openroute.is_none());
        assert!(config.google.is_none());
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.osrm.profile, "driving");
        assert_eq!(config.locality, Locality::default());
        assert_eq!(config.osrm.base_url, "https://router.project-osrm.org");
    }

    #[test]
    fn test_keys_enable_providers() {
        let config = PlannerConfig::from_lookup(lookup(&[
            ("ORS_API_KEY", "ors-key"),
            ("GOOGLE_MAPS_API_KEY", "g-key"),
            ("GOOGLE_MAPS_BASE_URL", "http://localhost:9000"),
        ]))
        .unwrap();
        assert_eq!(config.openroute.unwrap().api_key, "ors-key");
        let google = config.google.unwrap();
        assert_eq!(google.api_key, "g-key");
        assert_eq!(google.base_url, "http://localhost:9000");
    }

    #[test]
    fn test_blank_key_is_ignored() {
        let config = PlannerConfig::from_lookup(lookup(&[("ORS_API_KEY", "  ")])).unwrap();
        assert!(config.openroute.is_none());
    }

    #[test]
    fn test_locality_overrides() {
        let config = PlannerConfig::from_lookup(lookup(&[
            ("ROUTE_PLANNER_CITY", "Tampere"),
            ("ROUTE_PLANNER_COUNTRY_CODE", "FI"),
        ]))
        .unwrap();
        assert_eq!(config.locality.city, "Tampere");
        assert_eq!(config.locality.country, "Finland");
        assert_eq!(config.locality.country_code, "fi");
    }

    #[test]
    fn test_timeout_and_osrm_overrides() {
        let config = PlannerConfig::from_lookup(lookup(&[
            ("ROUTE_PLANNER_TIMEOUT_SECS", "3"),
            ("OSRM_BASE_URL", "http://localhost:5000"),
            ("OSRM_PROFILE", "foot"),
        ]))
        .unwrap();
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.osrm.base_url, "http://localhost:5000");
        assert_eq!(config.osrm.profile, "foot");
        assert!(config.build_planner().is_ok());
    }

    #[test]
    fn test_invalid_numbers_are_errors() {
        let err = PlannerConfig::from_lookup(lookup(&[("ROUTE_PLANNER_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "ROUTE_PLANNER_TIMEOUT_SECS",
                ..
            }
        ));

        let err = PlannerConfig::from_lookup(lookup(&[("ROUTE_PLANNER_JITTER_DEG", "-1")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_wiring_follows_configuration() {
        let config = PlannerConfig::from_lookup(lookup(&[("ORS_API_KEY", "ors-key")])).unwrap();
        let planner = config.build_planner().unwrap();
        let geocoders: Vec<&str> = planner
            .geocoder()
            .steps()
            .iter()
            .map(|step| step.provider.name())
            .collect();
        assert_eq!(geocoders, vec!["nominatim", "nominatim"]);
        let routers: Vec<&str> = planner
            .router()
            .providers()
            .iter()
            .map(|provider| provider.name())
            .collect();
        assert_eq!(routers, vec!["openrouteservice", "osrm"]);
    }

    #[test]
    fn test_offline_wiring_has_no_providers() {
        let config = PlannerConfig {
            network: false,
            ..PlannerConfig::default()
        };
        let planner = config.build_planner().unwrap();
        assert!(planner.geocoder().steps().is_empty());
        assert!(planner.router().providers().is_empty());
    }
}
