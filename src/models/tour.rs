//! Tour helpers.
//!
//! A tour is a plain `Vec<usize>` holding every point index exactly once and
//! read as a cycle: the successor of the last element is the first.

use super::Point;
use crate::distance::DistanceMatrix;

/// Closed-cycle Euclidean length of `tour` over `points`.
///
/// Returns 0.0 for tours with fewer than two entries.
///
/// # Examples
///
/// ```
/// use u_tsp::models::{tour_length, Point};
///
/// let square = [
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 0.0),
///     Point::new(1.0, 1.0),
///     Point::new(0.0, 1.0),
/// ];
/// assert!((tour_length(&square, &[0, 1, 2, 3]) - 4.0).abs() < 1e-10);
/// assert_eq!(tour_length(&square, &[2]), 0.0);
/// ```
pub fn tour_length(points: &[Point], tour: &[usize]) -> f64 {
    if tour.len() < 2 {
        return 0.0;
    }
    let mut length = 0.0;
    for w in tour.windows(2) {
        length += points[w[0]].distance_to(&points[w[1]]);
    }
    length + points[tour[tour.len() - 1]].distance_to(&points[tour[0]])
}

/// Closed-cycle length of `tour` using precomputed distances.
pub fn cycle_distance(tour: &[usize], distances: &DistanceMatrix) -> f64 {
    if tour.len() < 2 {
        return 0.0;
    }
    let mut length = 0.0;
    for w in tour.windows(2) {
        length += distances.get(w[0], w[1]);
    }
    length + distances.get(tour[tour.len() - 1], tour[0])
}

/// Open-path length of `path` (no closing edge).
pub fn path_distance(path: &[usize], distances: &DistanceMatrix) -> f64 {
    path.windows(2).map(|w| distances.get(w[0], w[1])).sum()
}

/// Returns `true` if `tour` contains each of `0..n` exactly once.
pub fn is_permutation(tour: &[usize], n: usize) -> bool {
    if tour.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &i in tour {
        if i >= n || seen[i] {
            return false;
        }
        seen[i] = true;
    }
    true
}
