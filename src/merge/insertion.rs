//! Cheapest whole-path insertion.
//!
//! # Algorithm
//!
//! The largest path seeds the merged tour. Each round evaluates every
//! remaining path, in both orientations, at every position of the merged
//! tour:
//!
//! ```text
//! before first: d(p.last, m.first)
//! after last:   d(m.last, p.first)
//! splice at i:  d(m[i-1], p.first) + d(p.last, m[i]) - d(m[i-1], m[i])
//! ```
//!
//! after adjustment by every [`MergePenalty`], and splices in the cheapest.
//!
//! # Complexity
//!
//! O(T² · L) for T paths and a merged tour of length L.

use serde::{Deserialize, Serialize};

use super::penalty::MergePenalty;
use crate::distance::DistanceMatrix;

/// Merge settings.
///
/// The dimension-scaling and wavefront pipelines each use one penalty and
/// read `dimension_scale` or `boundary_weight`. The synthesis pipeline
/// combines both penalties with its own, milder pair of weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Also try each path reversed.
    pub allow_reversal: bool,
    /// Divisor of the mean bridge dimension in the dimension penalty.
    pub dimension_scale: f64,
    /// Weight of the wavefront boundary bonus.
    pub boundary_weight: f64,
    /// `dimension_scale` used when both penalties are combined.
    pub synthesis_dimension_scale: f64,
    /// `boundary_weight` used when both penalties are combined.
    pub synthesis_boundary_weight: f64,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            allow_reversal: true,
            dimension_scale: 2.0,
            boundary_weight: 0.1,
            synthesis_dimension_scale: 1.5,
            synthesis_boundary_weight: 0.05,
        }
    }
}

impl MergeConfig {
    pub fn with_allow_reversal(mut self, allow: bool) -> Self {
        self.allow_reversal = allow;
        self
    }

    pub fn with_dimension_scale(mut self, scale: f64) -> Self {
        self.dimension_scale = scale;
        self
    }

    pub fn with_boundary_weight(mut self, weight: f64) -> Self {
        self.boundary_weight = weight;
        self
    }

    pub fn with_synthesis_weights(mut self, dimension_scale: f64, boundary_weight: f64) -> Self {
        self.synthesis_dimension_scale = dimension_scale;
        self.synthesis_boundary_weight = boundary_weight;
        self
    }
}

#[derive(Debug, Clone, Copy)]
struct Insertion {
    path: usize,
    position: usize,
    reversed: bool,
    cost: f64,
}

/// Merges open paths into one tour.
///
/// Empty paths are skipped; if every path is empty the result is empty.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Point;
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::merge::{merge_paths, MergeConfig};
///
/// let points: Vec<Point> = (0..6).map(|i| Point::new(i as f64, 0.0)).collect();
/// let dm = DistanceMatrix::from_points(&points);
/// let tour = merge_paths(&dm, vec![vec![3, 4, 5], vec![0, 1, 2]], &[], &MergeConfig::default());
/// assert_eq!(tour, vec![0, 1, 2, 3, 4, 5]);
/// ```
pub fn merge_paths(
    distances: &DistanceMatrix,
    paths: Vec<Vec<usize>>,
    penalties: &[&dyn MergePenalty],
    config: &MergeConfig,
) -> Vec<usize> {
    let mut remaining: Vec<Vec<usize>> = paths.into_iter().filter(|p| !p.is_empty()).collect();
    if remaining.is_empty() {
        return Vec::new();
    }

    let mut largest = 0;
    for (i, p) in remaining.iter().enumerate() {
        if p.len() > remaining[largest].len() {
            largest = i;
        }
    }
    let mut merged = remaining.remove(largest);

    while !remaining.is_empty() {
        let mut best: Option<Insertion> = None;
        for (pi, path) in remaining.iter().enumerate() {
            let orientations: &[bool] = if config.allow_reversal && path.len() > 1 {
                &[false, true]
            } else {
                &[false]
            };
            for &reversed in orientations {
                let (first, last) = if reversed {
                    (path[path.len() - 1], path[0])
                } else {
                    (path[0], path[path.len() - 1])
                };
                for position in 0..=merged.len() {
                    let cost = insertion_cost(distances, &merged, position, first, last, penalties);
                    let better = match best {
                        None => true,
                        Some(b) => cost < b.cost,
                    };
                    if better {
                        best = Some(Insertion {
                            path: pi,
                            position,
                            reversed,
                            cost,
                        });
                    }
                }
            }
        }

        let Some(choice) = best else { break };
        let mut path = remaining.remove(choice.path);
        if choice.reversed {
            path.reverse();
        }
        log::trace!(
            "merge: splice len={} at={} reversed={} cost={:.4}",
            path.len(),
            choice.position,
            choice.reversed,
            choice.cost
        );
        merged.splice(choice.position..choice.position, path);
    }

    merged
}

fn insertion_cost(
    distances: &DistanceMatrix,
    merged: &[usize],
    position: usize,
    first: usize,
    last: usize,
    penalties: &[&dyn MergePenalty],
) -> f64 {
    let (geom, bridge, touched) = if position == 0 {
        let head = merged[0];
        (distances.get(last, head), [last, head, 0, 0], 2)
    } else if position == merged.len() {
        let tail = merged[merged.len() - 1];
        (distances.get(tail, first), [tail, first, 0, 0], 2)
    } else {
        let a = merged[position - 1];
        let b = merged[position];
        (
            distances.get(a, first) + distances.get(last, b) - distances.get(a, b),
            [a, first, last, b],
            4,
        )
    };

    let cost = penalties
        .iter()
        .fold(geom, |cost, penalty| penalty.adjust(cost, &bridge[..touched]));
    if cost.is_nan() {
        f64::INFINITY
    } else {
        cost
    }
}
