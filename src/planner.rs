//! Route assembly: geocode, order, route, stitch.

use std::collections::HashMap;

use rayon::prelude::*;

use crate::error::PlanError;
use crate::geocoder::{GeocodeOutcome, Geocoder};
use crate::model::{Coordinate, NamedPoint, Route, Segment};
use crate::segment::SegmentRouter;
use crate::solver::{SolveOptions, order_vias};

pub struct RoutePlanner {
    geocoder: Geocoder,
    router: SegmentRouter,
    options: SolveOptions,
}

impl RoutePlanner {
    pub fn new(geocoder: Geocoder, router: SegmentRouter) -> Self {
        Self {
            geocoder,
            router,
            options: SolveOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SolveOptions) -> Self {
        self.options = options;
        self
    }

    pub fn geocoder(&self) -> &Geocoder {
        &self.geocoder
    }

    pub fn router(&self) -> &SegmentRouter {
        &self.router
    }

    /// Plans a route from `source` through every non-blank via to `destination`.
    ///
    /// Vias are reordered to minimize straight-line travel. Either a complete
    /// route is returned or a single error; partial routes never escape.
    pub fn calculate_route(
        &self,
        source: &str,
        vias: &[String],
        destination: &str,
    ) -> Result<Route, PlanError> {
        if source.trim().is_empty() {
            return Err(PlanError::InvalidInput("source is blank".to_string()));
        }
        if destination.trim().is_empty() {
            return Err(PlanError::InvalidInput("destination is blank".to_string()));
        }

        let via_names: Vec<&str> = vias
            .iter()
            .map(String::as_str)
            .filter(|name| !name.trim().is_empty())
            .collect();

        let resolved = self.geocode_all(source, &via_names, destination);
        let point = |name: &str| -> Result<NamedPoint, PlanError> {
            let outcome = resolved.get(name).ok_or_else(|| {
                PlanError::RouteFailed(format!("no geocoding result for {:?}", name))
            })?;
            Ok(NamedPoint {
                name: name.to_string(),
                coordinate: outcome.coordinate,
                provider_place_id: outcome.place_id.clone(),
                resolved_by: Some(outcome.source.clone()),
            })
        };

        let source_point = point(source)?;
        let destination_point = point(destination)?;
        let via_points = via_names
            .iter()
            .map(|&name| point(name))
            .collect::<Result<Vec<_>, _>>()?;

        let ordered = order_vias(&source_point, via_points, &destination_point, &self.options);

        let mut points = Vec::with_capacity(ordered.len() + 2);
        points.push(source_point);
        points.extend(ordered);
        points.push(destination_point);

        let segments: Vec<Segment> = points
            .par_windows(2)
            .map(|pair| self.router.route(&pair[0], &pair[1]))
            .collect();

        let route = assemble(points, segments)?;
        tracing::info!(
            "planned route with {} stops: {:.1} km, {} min",
            route.points.len(),
            route.total_distance_km,
            route.total_duration_min
        );
        Ok(route)
    }

    /// Geocodes each distinct name once, in parallel.
    fn geocode_all(
        &self,
        source: &str,
        vias: &[&str],
        destination: &str,
    ) -> HashMap<String, GeocodeOutcome> {
        let mut distinct: Vec<&str> = Vec::with_capacity(vias.len() + 2);
        for name in std::iter::once(source)
            .chain(vias.iter().copied())
            .chain(std::iter::once(destination))
        {
            if !distinct.contains(&name) {
                distinct.push(name);
            }
        }

        distinct
            .into_par_iter()
            .map(|name| {
                let outcome = self.geocoder.geocode(name);
                tracing::info!(
                    "resolved {:?} to ({:.5}, {:.5}) via {}",
                    name,
                    outcome.coordinate.latitude,
                    outcome.coordinate.longitude,
                    outcome.source
                );
                (name.to_string(), outcome)
            })
            .collect()
    }
}

/// Stitches segments into a route and totals them.
///
/// The full path is the first segment's path followed by every later
/// segment's path minus its first coordinate, which duplicates the joint.
pub fn assemble(points: Vec<NamedPoint>, segments: Vec<Segment>) -> Result<Route, PlanError> {
    if points.len() < 2 {
        return Err(PlanError::RouteFailed(format!(
            "a route needs at least two points, got {}",
            points.len()
        )));
    }
    if segments.len() != points.len() - 1 {
        return Err(PlanError::RouteFailed(format!(
            "expected {} segments, got {}",
            points.len() - 1,
            segments.len()
        )));
    }

    let mut total_distance_km = 0.0;
    let mut total_duration_min = 0.0;
    let mut full_path: Vec<Coordinate> = Vec::new();

    for (i, segment) in segments.iter().enumerate() {
        if segment.from != points[i] || segment.to != points[i + 1] {
            return Err(PlanError::RouteFailed(format!(
                "segment {} does not join {:?} and {:?}",
                i,
                points[i].name,
                points[i + 1].name
            )));
        }
        if segment.path.len() < 2 {
            return Err(PlanError::RouteFailed(format!(
                "segment {} has a degenerate path",
                i
            )));
        }

        total_distance_km += segment.distance_km;
        total_duration_min += segment.duration_min;

        let skip = if i == 0 { 0 } else { 1 };
        full_path.extend(segment.path.iter().skip(skip).copied());
    }

    Ok(Route {
        points,
        segments,
        total_distance_km: (total_distance_km * 10.0).round() / 10.0,
        total_duration_min: total_duration_min.round(),
        full_path,
    })
}
