//! Segment routing with provider fallback.
//!
//! Each consecutive pair of stops is routed by the first directions provider
//! that answers with a usable path. When every provider fails the router
//! synthesizes a lightly jittered straight line, so routing a pair never
//! fails.

use std::sync::Arc;

use rand::Rng;

use crate::haversine::haversine_km;
use crate::model::{Coordinate, NamedPoint, Segment, SegmentSource};
use crate::traits::{Directions, DirectionsProvider, Waypoint};

/// Speed assumed for straight-line duration estimates.
pub const FALLBACK_SPEED_KMH: f64 = 50.0;

/// Sub-intervals in a synthetic straight-line path.
pub const FALLBACK_INTERVALS: usize = 5;

/// Maximum perpendicular offset, in degrees, applied to synthetic points.
pub const DEFAULT_JITTER_DEG: f64 = 0.0025;

pub struct SegmentRouter {
    providers: Vec<Arc<dyn DirectionsProvider>>,
    jitter_deg: f64,
}

impl Default for SegmentRouter {
    fn default() -> Self {
        Self {
            providers: Vec::new(),
            jitter_deg: DEFAULT_JITTER_DEG,
        }
    }
}

impl SegmentRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider(mut self, provider: Arc<dyn DirectionsProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Sets the jitter amplitude; zero yields evenly spaced collinear points.
    pub fn with_jitter(mut self, jitter_deg: f64) -> Self {
        self.jitter_deg = jitter_deg.max(0.0);
        self
    }

    pub fn providers(&self) -> &[Arc<dyn DirectionsProvider>] {
        &self.providers
    }

    pub fn route(&self, from: &NamedPoint, to: &NamedPoint) -> Segment {
        self.route_with_rng(from, to, &mut rand::thread_rng())
    }

    pub fn route_with_rng<R: Rng + ?Sized>(
        &self,
        from: &NamedPoint,
        to: &NamedPoint,
        rng: &mut R,
    ) -> Segment {
        let origin = Waypoint::from_point(from);
        let destination = Waypoint::from_point(to);

        for provider in &self.providers {
            match provider.route(&origin, &destination) {
                Ok(directions) => match accept(directions) {
                    Some(directions) => {
                        tracing::debug!(
                            "routed {:?} -> {:?} via {} ({:.2} km)",
                            from.name,
                            to.name,
                            provider.name(),
                            directions.distance_km
                        );
                        return Segment {
                            from: from.clone(),
                            to: to.clone(),
                            path: directions.path,
                            distance_km: directions.distance_km,
                            duration_min: directions.duration_min,
                            source: SegmentSource::Provider(provider.name().to_string()),
                        };
                    }
                    None => tracing::warn!(
                        "{} returned an unusable route for {:?} -> {:?}",
                        provider.name(),
                        from.name,
                        to.name
                    ),
                },
                Err(err) => tracing::warn!(
                    "{} routing failed for {:?} -> {:?}: {}",
                    provider.name(),
                    from.name,
                    to.name,
                    err
                ),
            }
        }

        tracing::warn!(
            "all directions providers failed for {:?} -> {:?}, using straight line",
            from.name,
            to.name
        );
        let directions =
            straight_line(origin.coordinate, destination.coordinate, self.jitter_deg, rng);
        Segment {
            from: from.clone(),
            to: to.clone(),
            path: directions.path,
            distance_km: directions.distance_km,
            duration_min: directions.duration_min,
            source: SegmentSource::StraightLine,
        }
    }
}

/// Normalizes a provider answer, or rejects it if it cannot form a segment.
fn accept(directions: Directions) -> Option<Directions> {
    let valid_numbers = directions.distance_km.is_finite()
        && directions.distance_km >= 0.0
        && directions.duration_min.is_finite()
        && directions.duration_min >= 0.0;
    if !valid_numbers || directions.path.len() < 2 {
        return None;
    }
    if !directions.path.iter().all(Coordinate::is_finite) {
        return None;
    }

    Some(Directions {
        path: directions
            .path
            .into_iter()
            .map(Coordinate::normalized)
            .collect(),
        ..directions
    })
}

/// Synthetic segment: Haversine distance at [`FALLBACK_SPEED_KMH`], with a
/// path of interpolated points offset by up to `jitter_deg / 2` per axis.
pub fn straight_line<R: Rng + ?Sized>(
    from: Coordinate,
    to: Coordinate,
    jitter_deg: f64,
    rng: &mut R,
) -> Directions {
    let distance_km = haversine_km(from, to);
    let duration_min = distance_km / FALLBACK_SPEED_KMH * 60.0;

    let mut path = Vec::with_capacity(FALLBACK_INTERVALS + 1);
    path.push(from);
    for i in 1..FALLBACK_INTERVALS {
        let ratio = i as f64 / FALLBACK_INTERVALS as f64;
        let mut point = from.interpolate(to, ratio);
        if jitter_deg > 0.0 {
            point.latitude += rng.gen_range(-0.5..0.5) * jitter_deg;
            point.longitude += rng.gen_range(-0.5..0.5) * jitter_deg;
        }
        path.push(point.normalized());
    }
    path.push(to);

    Directions {
        path,
        distance_km,
        duration_min,
    }
}
