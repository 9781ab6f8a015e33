//! Greedy golden-ratio seed selection.
//!
//! # Algorithm
//!
//! 1. The first seed is the point of highest quality (or a caller-supplied
//!    anchor).
//! 2. Each following seed maximizes
//!    `PHI_MAJOR · quality + PHI_MINOR · spread` over the remaining points.
//!
//! Ties go to the lowest point index.
//!
//! # Complexity
//!
//! O(k·n) with the default spread term, O(k·n²) with coverage.

use super::scorer::{SeedScorer, SelectionState};
use crate::distance::DistanceMatrix;
use crate::geometry::{angle_about, angular_difference, GOLDEN_ANGLE, PHI_MAJOR, PHI_MINOR};
use crate::models::{centroid, Point};

/// Default seed count: `sqrt(n)` clamped to `[3, 12]`, never above `n`.
pub fn default_seed_count(n: usize) -> usize {
    let root = (n as f64).sqrt().floor() as usize;
    root.clamp(3, 12).min(n)
}

/// Seed count scaled by the mean local dimension:
/// `sqrt(n) · mean_dimension / 1.5` clamped to `[3, 12]`, never above `n`.
pub fn scaled_seed_count(n: usize, mean_dimension: f64) -> usize {
    let scaled = ((n as f64).sqrt() * mean_dimension / 1.5).floor();
    let scaled = if scaled.is_finite() && scaled > 0.0 {
        scaled as usize
    } else {
        0
    };
    scaled.clamp(3, 12).min(n)
}

/// Selects up to `k` distinct seeds.
///
/// Returns fewer than `k` seeds when the candidates run out.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Point;
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::seeding::{select_seeds, DensityScorer};
///
/// let points: Vec<Point> = (0..20).map(|i| Point::new(i as f64, 0.0)).collect();
/// let dm = DistanceMatrix::from_points(&points);
/// let seeds = select_seeds(&dm, &DensityScorer::new(&dm), 4, None);
/// assert_eq!(seeds.len(), 4);
/// ```
pub fn select_seeds<S: SeedScorer + ?Sized>(
    distances: &DistanceMatrix,
    scorer: &S,
    k: usize,
    anchor: Option<usize>,
) -> Vec<usize> {
    let n = distances.size();
    let k = k.min(n);
    if k == 0 {
        return Vec::new();
    }

    let mut state = SelectionState::new(distances);
    let mut taken = vec![false; n];

    let first = match anchor {
        Some(a) if a < n => a,
        _ => argmax(0..n, |i| scorer.quality(i)).unwrap_or(0),
    };
    state.push(first);
    taken[first] = true;

    while state.chosen().len() < k {
        let next = argmax((0..n).filter(|&i| !taken[i]), |i| {
            PHI_MAJOR * scorer.quality(i) + PHI_MINOR * scorer.spread(i, &state)
        });
        match next {
            Some(i) => {
                state.push(i);
                taken[i] = true;
            }
            None => break,
        }
    }

    state.into_seeds()
}

/// First strictly greatest score; NaN scores never win.
fn argmax(candidates: impl Iterator<Item = usize>, score: impl Fn(usize) -> f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for i in candidates {
        let s = score(i);
        if s.is_nan() {
            if best.is_none() {
                best = Some((i, f64::NEG_INFINITY));
            }
            continue;
        }
        match best {
            Some((_, bs)) if s <= bs => {}
            _ => best = Some((i, s)),
        }
    }
    best.map(|(i, _)| i)
}

/// Anchor point for multi-start run `run`.
///
/// Run 0 has no anchor. Run `r > 0` picks the point whose polar angle
/// around the centroid is closest to `r · GOLDEN_ANGLE`, preferring points
/// farther from the centroid on equal angles.
pub fn golden_angle_anchor(points: &[Point], run: usize) -> Option<usize> {
    if run == 0 || points.is_empty() {
        return None;
    }
    let center = centroid(points);
    let target = (run as f64 * GOLDEN_ANGLE).rem_euclid(std::f64::consts::TAU);

    let mut best: Option<(usize, f64, f64)> = None;
    for (i, p) in points.iter().enumerate() {
        let radius = p.distance_to(&center);
        let gap = angular_difference(angle_about(p, &center), target);
        let better = match best {
            None => true,
            Some((_, bg, br)) => gap < bg || (gap == bg && radius > br),
        };
        if better {
            best = Some((i, gap, radius));
        }
    }
    best.map(|(i, _, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::DimensionMap;
    use crate::seeding::{CoverageScorer, DensityScorer};

    fn two_clusters() -> (Vec<Point>, DistanceMatrix) {
        let mut points = Vec::new();
        for i in 0..5 {
            points.push(Point::new(i as f64 * 0.1, 0.0));
        }
        for i in 0..5 {
            points.push(Point::new(100.0 + i as f64 * 0.1, 0.0));
        }
        let dm = DistanceMatrix::from_points(&points);
        (points, dm)
    }

    #[test]
    fn test_seed_counts() {
        assert_eq!(default_seed_count(1), 1);
        assert_eq!(default_seed_count(4), 3);
        assert_eq!(default_seed_count(100), 10);
        assert_eq!(default_seed_count(10_000), 12);
        assert_eq!(scaled_seed_count(100, 1.5), 10);
        assert_eq!(scaled_seed_count(100, 1.0), 6);
        assert_eq!(scaled_seed_count(400, 2.0), 12);
        assert_eq!(scaled_seed_count(2, 2.0), 2);
    }

    #[test]
    fn test_seeds_are_distinct_and_spread() {
        let (_, dm) = two_clusters();
        let seeds = select_seeds(&dm, &DensityScorer::new(&dm), 3, None);
        assert_eq!(seeds.len(), 3);
        let mut sorted = seeds.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 3);
        // Equal densities: the second seed jumps to the far cluster.
        assert_eq!(seeds[0], 0);
        assert!(seeds[1] >= 5);
    }

    #[test]
    fn test_fewer_seeds_when_exhausted() {
        let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
        let dm = DistanceMatrix::from_points(&points);
        let seeds = select_seeds(&dm, &DensityScorer::new(&dm), 5, None);
        assert_eq!(seeds.len(), 2);
    }

    #[test]
    fn test_anchor_is_first_seed() {
        let (_, dm) = two_clusters();
        let seeds = select_seeds(&dm, &DensityScorer::new(&dm), 3, Some(9));
        assert_eq!(seeds[0], 9);
    }

    #[test]
    fn test_coverage_selection() {
        let (_, dm) = two_clusters();
        let map = DimensionMap::from_values(vec![1.5; 10]);
        let seeds = select_seeds(&dm, &CoverageScorer::new(&map), 2, None);
        assert_eq!(seeds.len(), 2);
        assert!(seeds[1] >= 5);
    }

    #[test]
    fn test_golden_angle_anchor() {
        let points: Vec<Point> = (0..8)
            .map(|i| {
                let a = i as f64 * std::f64::consts::TAU / 8.0;
                Point::new(a.cos(), a.sin())
            })
            .collect();
        assert_eq!(golden_angle_anchor(&points, 0), None);
        // 2.39996 rad is closest to 3·π/4 (point 3).
        assert_eq!(golden_angle_anchor(&points, 1), Some(3));
        assert_eq!(golden_angle_anchor(&[], 1), None);
    }
}
