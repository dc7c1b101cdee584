//! Real Helsinki area locations for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap.

use route_planner::{Coordinate, NamedPoint};

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    pub fn point(&self) -> NamedPoint {
        NamedPoint::new(self.name, self.coordinate())
    }
}

// ============================================================================
// Landmarks (good for source/destination)
// ============================================================================

pub const CENTRAL_STATION: Location = Location::new("Helsinki Central Station", 60.1718, 24.9414);
pub const AIRPORT: Location = Location::new("Helsinki Airport", 60.3172, 24.9633);
pub const KAMPPI: Location = Location::new("Kamppi Center", 60.1694, 24.9327);
pub const SUOMENLINNA: Location = Location::new("Suomenlinna", 60.1454, 24.9881);
pub const OLYMPIC_STADIUM: Location = Location::new("Olympic Stadium", 60.1841, 24.9256);

// ============================================================================
// Delivery stops around the city
// ============================================================================

pub const STOPS: &[Location] = &[
    Location::new("Hakaniemi Market Hall", 60.1789, 24.9508),
    Location::new("Market Square", 60.1676, 24.9525),
    Location::new("Oodi Library", 60.1738, 24.9381),
    Location::new("Temppeliaukio Church", 60.1730, 24.9250),
    Location::new("Sibelius Monument", 60.1822, 24.9135),
    Location::new("Linnanmaki", 60.1875, 24.9404),
    Location::new("Itakeskus", 60.2107, 25.0808),
    Location::new("Pasila Station", 60.1988, 24.9334),
    Location::new("Arabianranta", 60.2087, 24.9781),
    Location::new("Lauttasaari", 60.1589, 24.8753),
    Location::new("Kallio Church", 60.1841, 24.9494),
    Location::new("Ruoholahti", 60.1636, 24.9146),
];

pub fn stop_points(count: usize) -> Vec<NamedPoint> {
    STOPS.iter().take(count).map(Location::point).collect()
}
