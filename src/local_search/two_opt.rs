//! 2-opt edge exchange on cyclic tours and open paths.
//!
//! # Algorithm
//!
//! For each pair of non-adjacent edges (t[i], t[i+1]) and (t[j], t[j+1])
//! (indices modulo n), compute the change in length from reversing the
//! segment between them:
//!
//! ```text
//! delta = d(t[i], t[j]) + d(t[i+1], t[j+1]) - d(t[i], t[i+1]) - d(t[j], t[j+1])
//! ```
//!
//! If delta < -tolerance, reverse the segment [i+1..=j]. The tolerance keeps
//! equal-length reconnections from oscillating.
//!
//! # Complexity
//!
//! O(n²) per pass, O(n³) worst case for convergence.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::models::cycle_distance;

/// Default improvement threshold.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Move acceptance rule within a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Improvement {
    /// Apply every improving move as soon as it is found.
    #[default]
    FirstImprovement,
    /// Apply only the single best move of the pass.
    BestImprovement,
}

/// Runs one 2-opt pass over a cyclic tour and returns the number of moves
/// applied.
pub fn two_opt_pass(
    tour: &mut [usize],
    distances: &DistanceMatrix,
    improvement: Improvement,
    tolerance: f64,
) -> usize {
    let n = tour.len();
    if n < 4 {
        return 0;
    }

    match improvement {
        Improvement::FirstImprovement => {
            let mut moves = 0;
            for i in 0..n - 1 {
                for j in i + 2..n {
                    if i == 0 && j == n - 1 {
                        continue;
                    }
                    let delta = two_opt_delta(tour, distances, i, j);
                    if delta < -tolerance {
                        tour[i + 1..=j].reverse();
                        moves += 1;
                        log::trace!("two_opt: move i={i} j={j} delta={delta:.6}");
                    }
                }
            }
            moves
        }
        Improvement::BestImprovement => {
            let mut best: Option<(usize, usize, f64)> = None;
            for i in 0..n - 1 {
                for j in i + 2..n {
                    if i == 0 && j == n - 1 {
                        continue;
                    }
                    let delta = two_opt_delta(tour, distances, i, j);
                    let threshold = best.map_or(-tolerance, |b| b.2);
                    if delta < threshold {
                        best = Some((i, j, delta));
                    }
                }
            }
            match best {
                Some((i, j, delta)) => {
                    tour[i + 1..=j].reverse();
                    log::trace!("two_opt: best move i={i} j={j} delta={delta:.6}");
                    1
                }
                None => 0,
            }
        }
    }
}

/// Distance change of reversing `tour[i+1..=j]` in a cyclic tour.
fn two_opt_delta(tour: &[usize], distances: &DistanceMatrix, i: usize, j: usize) -> f64 {
    let n = tour.len();
    let a = tour[i];
    let b = tour[i + 1];
    let c = tour[j];
    let d = tour[(j + 1) % n];
    distances.get(a, c) + distances.get(b, d) - distances.get(a, b) - distances.get(c, d)
}

/// Applies first-improvement 2-opt to a cyclic tour until no move improves.
///
/// Returns the improved tour and its closed length.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Point;
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::local_search::two_opt_improve;
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 1.0),
///     Point::new(1.0, 0.0),
///     Point::new(0.0, 1.0),
/// ];
/// let dm = DistanceMatrix::from_points(&points);
///
/// // 0 → 1 → 2 → 3 crosses itself twice.
/// let (improved, length) = two_opt_improve(&[0, 1, 2, 3], &dm);
/// assert!((length - 4.0).abs() < 1e-10);
/// assert_eq!(improved.len(), 4);
/// ```
pub fn two_opt_improve(tour: &[usize], distances: &DistanceMatrix) -> (Vec<usize>, f64) {
    let mut current = tour.to_vec();
    while two_opt_pass(
        &mut current,
        distances,
        Improvement::FirstImprovement,
        DEFAULT_TOLERANCE,
    ) > 0
    {}
    let length = cycle_distance(&current, distances);
    (current, length)
}

/// Windowed 2-opt on an open path.
///
/// Only segments shorter than `window` positions are reversed, and
/// `path[0]` never moves, so the global order of the path is kept. Runs
/// at most `passes` passes and returns the number of moves applied.
pub fn window_two_opt(
    path: &mut [usize],
    distances: &DistanceMatrix,
    window: usize,
    passes: usize,
) -> usize {
    let n = path.len();
    if n < 4 {
        return 0;
    }
    let mut moves = 0;
    for _ in 0..passes {
        let mut improved = false;
        for i in 0..n - 2 {
            for j in i + 2..(i + window).min(n) {
                let removed = distances.get(path[i], path[i + 1])
                    + if j + 1 < n {
                        distances.get(path[j], path[j + 1])
                    } else {
                        0.0
                    };
                let added = distances.get(path[i], path[j])
                    + if j + 1 < n {
                        distances.get(path[i + 1], path[j + 1])
                    } else {
                        0.0
                    };
                if added - removed < -DEFAULT_TOLERANCE {
                    path[i + 1..=j].reverse();
                    moves += 1;
                    improved = true;
                }
            }
        }
        if !improved {
            break;
        }
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{path_distance, Point};

    fn unit_square() -> DistanceMatrix {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        DistanceMatrix::from_points(&points)
    }

    fn circle(n: usize) -> DistanceMatrix {
        let points: Vec<Point> = (0..n)
            .map(|i| {
                let a = i as f64 * std::f64::consts::TAU / n as f64;
                Point::new(a.cos(), a.sin())
            })
            .collect();
        DistanceMatrix::from_points(&points)
    }

    #[test]
    fn test_2opt_square_all_shapes() {
        let dm = unit_square();
        // The three distinct cyclic shapes of 4 points.
        for start in [[0, 1, 2, 3], [0, 2, 1, 3], [0, 1, 3, 2]] {
            let (improved, length) = two_opt_improve(&start, &dm);
            assert!((length - 4.0).abs() < 1e-10, "from {start:?}: {length}");
            assert_eq!(improved.len(), 4);
        }
    }

    #[test]
    fn test_2opt_circle_reaches_hull_order() {
        let n = 12;
        let dm = circle(n);
        let scrambled = vec![0, 5, 2, 9, 11, 3, 7, 1, 10, 4, 8, 6];
        let (improved, length) = two_opt_improve(&scrambled, &dm);
        let hull: Vec<usize> = (0..n).collect();
        assert!((length - cycle_distance(&hull, &dm)).abs() < 1e-9);
        // Consecutive tour points are circle neighbors.
        for k in 0..n {
            let a = improved[k];
            let b = improved[(k + 1) % n];
            let gap = (a + n - b) % n;
            assert!(gap == 1 || gap == n - 1, "{improved:?}");
        }
    }

    #[test]
    fn test_best_improvement_applies_one_move() {
        let dm = circle(8);
        let mut tour = vec![0, 4, 1, 5, 2, 6, 3, 7];
        let before = cycle_distance(&tour, &dm);
        let moves = two_opt_pass(&mut tour, &dm, Improvement::BestImprovement, DEFAULT_TOLERANCE);
        assert_eq!(moves, 1);
        assert!(cycle_distance(&tour, &dm) < before);
    }

    #[test]
    fn test_2opt_small_tours_untouched() {
        let dm = unit_square();
        let mut tour = vec![2, 0, 1];
        assert_eq!(
            two_opt_pass(&mut tour, &dm, Improvement::FirstImprovement, DEFAULT_TOLERANCE),
            0
        );
        assert_eq!(tour, vec![2, 0, 1]);
        let (empty, length) = two_opt_improve(&[], &dm);
        assert!(empty.is_empty());
        assert_eq!(length, 0.0);
    }

    #[test]
    fn test_window_keeps_head_and_shortens() {
        let points: Vec<Point> = (0..8).map(|i| Point::new(i as f64, 0.0)).collect();
        let dm = DistanceMatrix::from_points(&points);
        let mut path = vec![0, 2, 1, 3, 5, 4, 6, 7];
        let before = path_distance(&path, &dm);
        let moves = window_two_opt(&mut path, &dm, 5, 3);
        assert!(moves > 0);
        assert_eq!(path[0], 0);
        assert!(path_distance(&path, &dm) < before);
        assert_eq!(path, vec![0, 1, 2, 3, 4, 5, 6, 7]);
    }
}
