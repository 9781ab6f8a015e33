//! Nearest-neighbor tour construction.
//!
//! Builds a tour greedily: starting from `start`, always visit the nearest
//! unvisited point, then close the cycle.
//!
//! # Complexity
//!
//! O(n²) where n = number of points.
//!
//! # Reference
//!
//! The simplest constructive heuristic for the TSP. Tours are typically
//! about 25% above optimal, which makes it the baseline the pipelines are
//! compared against.

use crate::distance::DistanceMatrix;

/// Constructs a tour using the nearest-neighbor heuristic.
///
/// Ties go to the lowest point index. Returns an empty tour for an empty
/// matrix; an out-of-range `start` is replaced by 0.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Point;
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::constructive::nearest_neighbor_tour;
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(3.0, 0.0),
///     Point::new(1.0, 0.0),
///     Point::new(2.0, 0.0),
/// ];
/// let dm = DistanceMatrix::from_points(&points);
/// assert_eq!(nearest_neighbor_tour(&dm, 0), vec![0, 2, 3, 1]);
/// ```
pub fn nearest_neighbor_tour(distances: &DistanceMatrix, start: usize) -> Vec<usize> {
    let n = distances.size();
    if n == 0 {
        return Vec::new();
    }
    let start = if start < n { start } else { 0 };

    let mut visited = vec![false; n];
    visited[start] = true;
    let mut tour = Vec::with_capacity(n);
    tour.push(start);
    let mut current = start;

    loop {
        let mut best: Option<(usize, f64)> = None;
        for i in 0..n {
            if visited[i] {
                continue;
            }
            let d = distances.get(current, i);
            match best {
                Some((_, bd)) if d >= bd => {}
                _ => best = Some((i, d)),
            }
        }

        match best {
            Some((next, _)) => {
                visited[next] = true;
                tour.push(next);
                current = next;
            }
            None => break,
        }
    }

    tour
}
