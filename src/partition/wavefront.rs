//! Wavefront expansion from seeds.
//!
//! # Algorithm
//!
//! From every seed, run a Dijkstra-style expansion over the complete graph.
//! Travelling from `u` to `v` costs the step distance (optionally scaled by
//! the mean local dimension of `u` and `v` over 1.5) plus a turning penalty
//! `(1 - cos θ) · step · ½`, where θ is the turn between the edge reaching
//! `u` on its shortest path and the edge `u → v`. Waves therefore prefer
//! straight propagation and slow down in area-filling regions.
//!
//! Arrival times are monotonically non-decreasing in settle order.
//!
//! # Complexity
//!
//! O(k · n² log n) for k seeds.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use crate::distance::DistanceMatrix;
use crate::geometry::{turn_cosine, DimensionMap, DEFAULT_DIMENSION};
use crate::models::Point;

/// Arrival times of every seed's wave at every point.
#[derive(Debug, Clone)]
pub struct WaveField {
    seeds: Vec<usize>,
    arrivals: Vec<Vec<f64>>,
}

impl WaveField {
    /// Expands one wave per seed.
    ///
    /// With `speed` set, step costs are scaled by the dimension map.
    pub fn expand(
        points: &[Point],
        distances: &DistanceMatrix,
        seeds: &[usize],
        speed: Option<&DimensionMap>,
    ) -> Self {
        let arrivals = seeds
            .iter()
            .map(|&seed| expand_one(points, distances, seed, speed))
            .collect();
        Self {
            seeds: seeds.to_vec(),
            arrivals,
        }
    }

    /// Seeds in slot order.
    pub fn seeds(&self) -> &[usize] {
        &self.seeds
    }

    /// Arrival time of the wave in `slot` at `point`.
    #[inline]
    pub fn arrival(&self, slot: usize, point: usize) -> f64 {
        self.arrivals[slot][point]
    }

    /// Arrival times of the wave in `slot`, indexed by point.
    pub fn arrivals(&self, slot: usize) -> &[f64] {
        &self.arrivals[slot]
    }

    /// Arrival times of every wave at `point`, in slot order.
    pub fn arrivals_at(&self, point: usize) -> Vec<f64> {
        self.arrivals.iter().map(|a| a[point]).collect()
    }
}

fn expand_one(
    points: &[Point],
    distances: &DistanceMatrix,
    seed: usize,
    speed: Option<&DimensionMap>,
) -> Vec<f64> {
    let n = distances.size();
    let mut arrival = vec![f64::INFINITY; n];
    let mut predecessor: Vec<Option<usize>> = vec![None; n];
    let mut settled = vec![false; n];
    // Min-heap: earliest arrival first, then lowest point index.
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, usize)>> = BinaryHeap::new();

    arrival[seed] = 0.0;
    heap.push(Reverse((OrderedFloat(0.0), seed)));

    while let Some(Reverse((OrderedFloat(time), u))) = heap.pop() {
        if settled[u] {
            continue;
        }
        settled[u] = true;

        for v in 0..n {
            if settled[v] {
                continue;
            }
            let mut step = distances.get(u, v);
            if let Some(dims) = speed {
                step *= (dims.get(u) + dims.get(v)) / 2.0 / DEFAULT_DIMENSION;
            }
            let penalty = predecessor[u]
                .and_then(|p| turn_cosine(&points[p], &points[u], &points[v]))
                .map_or(0.0, |cos| (1.0 - cos) * step * 0.5);
            let candidate = time + step + penalty;
            if candidate < arrival[v] {
                arrival[v] = candidate;
                predecessor[v] = Some(u);
                heap.push(Reverse((OrderedFloat(candidate), v)));
            }
        }
    }

    arrival
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(points: &[Point]) -> DistanceMatrix {
        DistanceMatrix::from_points(points)
    }

    #[test]
    fn test_straight_line_has_no_penalty() {
        let points: Vec<Point> = (0..5).map(|i| Point::new(i as f64, 0.0)).collect();
        let dm = setup(&points);
        let field = WaveField::expand(&points, &dm, &[0], None);
        for i in 0..5 {
            assert!((field.arrival(0, i) - i as f64).abs() < 1e-9);
        }
    }

    #[test]
    fn test_turns_cost_extra() {
        // 0 -> 1 -> 2 is a right-angle path; 0 -> 2 directly is shorter.
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ];
        let dm = setup(&points);
        let field = WaveField::expand(&points, &dm, &[0], None);
        assert!((field.arrival(0, 2) - 2f64.sqrt()).abs() < 1e-9);
        assert!(field.arrival(0, 2) > field.arrival(0, 1));
    }

    #[test]
    fn test_arrivals_non_negative_and_seed_zero() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 1.0),
            Point::new(-2.0, 4.0),
            Point::new(5.0, 5.0),
        ];
        let dm = setup(&points);
        let field = WaveField::expand(&points, &dm, &[1, 3], None);
        assert_eq!(field.arrival(0, 1), 0.0);
        assert_eq!(field.arrival(1, 3), 0.0);
        for slot in 0..2 {
            assert!(field.arrivals(slot).iter().all(|&t| t.is_finite() && t >= 0.0));
        }
        assert_eq!(field.arrivals_at(2).len(), 2);
    }

    #[test]
    fn test_dimension_slows_waves() {
        let points: Vec<Point> = (0..4).map(|i| Point::new(i as f64, 0.0)).collect();
        let dm = setup(&points);
        let slow = DimensionMap::from_values(vec![2.0; 4]);
        let fast = DimensionMap::from_values(vec![1.0; 4]);
        let a = WaveField::expand(&points, &dm, &[0], Some(&slow));
        let b = WaveField::expand(&points, &dm, &[0], Some(&fast));
        assert!(a.arrival(0, 3) > b.arrival(0, 3));
        assert!((b.arrival(0, 3) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_unscaled_arrival_is_direct_distance() {
        // Any detour is at least as long as the direct step from the seed,
        // which carries no turning penalty.
        let points: Vec<Point> = (0..25)
            .map(|i| {
                let t = i as f64;
                Point::new((t * 1.7).sin() * 10.0 + t * 0.3, (t * 2.3).cos() * 7.0)
            })
            .collect();
        let dm = setup(&points);
        let field = WaveField::expand(&points, &dm, &[4, 17], None);
        for (slot, &seed) in field.seeds().iter().enumerate() {
            for p in 0..points.len() {
                assert!((field.arrival(slot, p) - dm.get(seed, p)).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_equal_arrivals_settle_symmetrically() {
        let points = vec![
            Point::new(-1.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 2.0),
        ];
        let dm = setup(&points);
        let dims = DimensionMap::from_values(vec![1.5, 1.0, 1.5, 2.0]);
        let field = WaveField::expand(&points, &dm, &[1], Some(&dims));
        assert_eq!(field.arrival(0, 0), field.arrival(0, 2));
        assert!(field.arrival(0, 3) > field.arrival(0, 0));
    }

    #[test]
    fn test_coincident_points() {
        let points = vec![Point::new(1.0, 1.0); 3];
        let dm = setup(&points);
        let field = WaveField::expand(&points, &dm, &[0], None);
        assert!(field.arrivals(0).iter().all(|&t| t == 0.0));
    }
}
