//! Route-order optimizer.
//!
//! Orders via-points between a fixed source and a fixed destination so that
//! the total straight-line length of the open path is minimal. Up to
//! [`SolveOptions::exact_limit`] vias are solved exactly by enumerating every
//! permutation in lexicographic index order; larger inputs fall back to a
//! greedy nearest-neighbor walk, which is approximate.

use crate::haversine::HaversineMatrix;
use crate::model::{Coordinate, NamedPoint};
use crate::traits::DistanceMatrixProvider;

#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Largest via count solved by exhaustive search.
    pub exact_limit: usize,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self { exact_limit: 8 }
    }
}

/// Distances between the fixed endpoints and the vias.
#[derive(Debug, Clone)]
struct CostModel {
    from_source: Vec<f64>,
    to_destination: Vec<f64>,
    between: Vec<Vec<f64>>,
}

impl CostModel {
    fn build<M: DistanceMatrixProvider>(
        source: Coordinate,
        vias: &[Coordinate],
        destination: Coordinate,
        matrix_provider: &M,
    ) -> Self {
        let n = vias.len();
        let mut locations = Vec::with_capacity(n + 2);
        locations.push(source);
        locations.extend_from_slice(vias);
        locations.push(destination);

        let matrix = matrix_provider.matrix_for(&locations);

        let from_source = (0..n).map(|i| matrix[0][i + 1]).collect();
        let to_destination = (0..n).map(|i| matrix[i + 1][n + 1]).collect();
        let between = (0..n)
            .map(|i| (0..n).map(|j| matrix[i + 1][j + 1]).collect())
            .collect();

        Self {
            from_source,
            to_destination,
            between,
        }
    }

    fn len(&self) -> usize {
        self.from_source.len()
    }

    /// Total open-path cost of visiting the vias in `order`.
    fn path_cost(&self, order: &[usize]) -> f64 {
        let Some((&first, _)) = order.split_first() else {
            return 0.0;
        };
        let mut cost = self.from_source[first];
        for pair in order.windows(2) {
            cost += self.between[pair[0]][pair[1]];
        }
        cost + self.to_destination[order[order.len() - 1]]
    }
}

/// Orders `vias` between `source` and `destination` using straight-line distance.
pub fn order_vias(
    source: &NamedPoint,
    vias: Vec<NamedPoint>,
    destination: &NamedPoint,
    options: &SolveOptions,
) -> Vec<NamedPoint> {
    order_vias_with(source, vias, destination, &HaversineMatrix, options)
}

/// Orders `vias` using distances from `matrix_provider`.
pub fn order_vias_with<M: DistanceMatrixProvider>(
    source: &NamedPoint,
    vias: Vec<NamedPoint>,
    destination: &NamedPoint,
    matrix_provider: &M,
    options: &SolveOptions,
) -> Vec<NamedPoint> {
    if vias.len() < 2 {
        return vias;
    }

    let coordinates: Vec<Coordinate> = vias.iter().map(|via| via.coordinate).collect();
    let model = CostModel::build(
        source.coordinate,
        &coordinates,
        destination.coordinate,
        matrix_provider,
    );

    let order = if vias.len() <= options.exact_limit {
        exact_order(&model)
    } else {
        tracing::debug!(
            "{} vias exceed exact limit {}, using nearest-neighbor ordering",
            vias.len(),
            options.exact_limit
        );
        nearest_neighbor_order(&model)
    };

    let mut slots: Vec<Option<NamedPoint>> = vias.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|index| slots[index].take())
        .collect()
}

/// Exhaustive search over all permutations of via indices.
///
/// Permutations are generated in lexicographic order and only a strictly
/// cheaper one replaces the incumbent, so ties keep the earliest ordering.
fn exact_order(model: &CostModel) -> Vec<usize> {
    let n = model.len();
    let mut search = ExactSearch {
        model,
        used: vec![false; n],
        current: Vec::with_capacity(n),
        best: (0..n).collect(),
        best_cost: f64::INFINITY,
        evaluated: 0,
    };
    search.extend();

    tracing::debug!(
        "evaluated {} orderings of {} vias, best cost {:.3} km",
        search.evaluated,
        n,
        search.best_cost
    );
    search.best
}

struct ExactSearch<'a> {
    model: &'a CostModel,
    used: Vec<bool>,
    current: Vec<usize>,
    best: Vec<usize>,
    best_cost: f64,
    evaluated: usize,
}

impl ExactSearch<'_> {
    fn extend(&mut self) {
        let n = self.model.len();
        if self.current.len() == n {
            self.evaluated += 1;
            let cost = self.model.path_cost(&self.current);
            if cost < self.best_cost {
                self.best_cost = cost;
                self.best.clone_from(&self.current);
            }
            return;
        }

        for index in 0..n {
            if self.used[index] {
                continue;
            }
            self.used[index] = true;
            self.current.push(index);
            self.extend();
            self.current.pop();
            self.used[index] = false;
        }
    }
}

/// Greedy walk: start at the via nearest the source, then repeatedly take the
/// nearest unvisited via. Ties resolve to the lowest index.
fn nearest_neighbor_order(model: &CostModel) -> Vec<usize> {
    let n = model.len();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);

    let mut current = argmin(model.from_source.iter().copied().enumerate());
    while let Some(index) = current {
        visited[index] = true;
        order.push(index);
        current = argmin(
            model.between[index]
                .iter()
                .copied()
                .enumerate()
                .filter(|(candidate, _)| !visited[*candidate]),
        );
    }

    order
}

fn argmin(candidates: impl Iterator<Item = (usize, f64)>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, distance) in candidates {
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, distance)),
        }
    }
    best.map(|(index, _)| index)
}
