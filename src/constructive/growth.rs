//! Greedy heading-smooth growth inside a territory.
//!
//! # Algorithm
//!
//! Starting at the seed, repeatedly append the unvisited territory point
//! with the highest score
//!
//! ```text
//! score = w_d / (d / unit) + w_h · heading
//! ```
//!
//! where `d` is the distance from the path end, `unit = max_distance / √n`
//! is the typical point spacing, and `heading` maps the turn cosine into
//! `[0, 1]`. The dimension-aware variant divides `d` by the exploration
//! factor `2 / (dim + 0.5)` of the current point and replaces `heading` by
//! `½ (heading + compatibility)`. Guides add `weight · guide_score`; the
//! crossing search behind each guide snapshot draws from a sampler seeded
//! with `GuideConfig::seed` plus the territory seed.
//!
//! # Complexity
//!
//! O(m²) for a territory of m points.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::guides::{GuideConfig, GuideSnapshot};
use crate::distance::DistanceMatrix;
use crate::geometry::{heading_alignment, DimensionMap, EPSILON, PHI_MAJOR, PHI_MINOR};
use crate::models::Point;

/// Builds an open path through one territory.
pub trait GrowthOrder: Sync {
    /// Returns every point of `territory` exactly once, starting at `seed`
    /// when it belongs to the territory. Empty territories give empty paths.
    fn grow(&self, territory: &[usize], seed: usize) -> Vec<usize>;
}

/// Weights of the distance and heading terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthWeights {
    pub distance: f64,
    pub heading: f64,
}

impl Default for GrowthWeights {
    fn default() -> Self {
        Self {
            distance: PHI_MAJOR,
            heading: PHI_MINOR,
        }
    }
}

/// Greedy growth scored by inverse distance and heading smoothness.
#[derive(Debug, Clone)]
pub struct HeadingGreedy<'a> {
    points: &'a [Point],
    distances: &'a DistanceMatrix,
    weights: GrowthWeights,
    unit: f64,
    dimensions: Option<&'a DimensionMap>,
    guides: Option<GuideConfig>,
}

impl<'a> HeadingGreedy<'a> {
    pub fn new(points: &'a [Point], distances: &'a DistanceMatrix) -> Self {
        let n = distances.size().max(1) as f64;
        let unit = distances.max_distance() / n.sqrt();
        Self {
            points,
            distances,
            weights: GrowthWeights::default(),
            unit: if unit > EPSILON { unit } else { 1.0 },
            dimensions: None,
            guides: None,
        }
    }

    pub fn with_weights(mut self, weights: GrowthWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Switches to dimension-scaled exploration.
    pub fn with_dimensions(mut self, dimensions: &'a DimensionMap) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Adds guide-circle steering.
    pub fn with_guides(mut self, guides: GuideConfig) -> Self {
        self.guides = Some(guides);
        self
    }

    fn score(
        &self,
        prev: Option<usize>,
        current: usize,
        candidate: usize,
        guide: Option<&GuideSnapshot>,
    ) -> f64 {
        let prev_point = prev.map(|p| &self.points[p]);
        let here = &self.points[current];
        let there = &self.points[candidate];
        let heading = heading_alignment(prev_point, here, there);
        let d = self.distances.get(current, candidate) / self.unit;

        let mut score = match self.dimensions {
            Some(dims) => {
                let exploration = 2.0 / (dims.get(current) + 0.5);
                let compat = dims.compatibility(current, candidate);
                self.weights.distance / (d / exploration + EPSILON)
                    + self.weights.heading * 0.5 * (heading + compat)
            }
            None => self.weights.distance / (d + EPSILON) + self.weights.heading * heading,
        };

        if let (Some(snapshot), Some(cfg)) = (guide, self.guides) {
            score += cfg.weight * snapshot.score(prev_point, here, there);
        }
        score
    }
}

impl GrowthOrder for HeadingGreedy<'_> {
    fn grow(&self, territory: &[usize], seed: usize) -> Vec<usize> {
        let start = match territory.iter().position(|&p| p == seed) {
            Some(pos) => pos,
            None if territory.is_empty() => return Vec::new(),
            None => 0,
        };

        let mut path = Vec::with_capacity(territory.len());
        path.push(territory[start]);
        let mut remaining: Vec<usize> = territory
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != start)
            .map(|(_, &p)| p)
            .collect();

        let refresh = self.guides.map_or(0, |g| g.refresh_every.max(1));
        let samples = self.guides.map_or(0, |g| g.crossing_samples);
        // One sampler per territory, keyed by its seed.
        let mut rng = StdRng::seed_from_u64(
            self.guides
                .map_or(0, |g| g.seed)
                .wrapping_add(seed as u64),
        );
        let mut snapshot = self
            .guides
            .map(|_| GuideSnapshot::from_unvisited(self.points, &remaining, samples, &mut rng));
        let mut step = 0usize;

        while !remaining.is_empty() {
            let current = path[path.len() - 1];
            let prev = path.len().checked_sub(2).map(|i| path[i]);

            if refresh > 0 && step > 0 && step % refresh == 0 {
                snapshot = Some(GuideSnapshot::from_unvisited(
                    self.points,
                    &remaining,
                    samples,
                    &mut rng,
                ));
            }

            let mut best = 0;
            let mut best_score = f64::NEG_INFINITY;
            for (i, &candidate) in remaining.iter().enumerate() {
                let s = self.score(prev, current, candidate, snapshot.as_ref());
                if s > best_score {
                    best_score = s;
                    best = i;
                }
            }

            path.push(remaining.remove(best));
            step += 1;
        }

        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::is_permutation;

    fn line_points() -> (Vec<Point>, DistanceMatrix) {
        let points: Vec<Point> = [3.0, 0.0, 2.0, 1.0, 4.0]
            .iter()
            .map(|&x| Point::new(x, 0.0))
            .collect();
        let dm = DistanceMatrix::from_points(&points);
        (points, dm)
    }

    #[test]
    fn test_grows_along_line() {
        let (points, dm) = line_points();
        let growth = HeadingGreedy::new(&points, &dm);
        // Seed at x=0 (index 1) walks 1 -> 3 -> 2 -> 0 -> 4.
        let path = growth.grow(&[0, 1, 2, 3, 4], 1);
        assert_eq!(path, vec![1, 3, 2, 0, 4]);
    }

    #[test]
    fn test_starts_at_seed_and_covers_territory() {
        let (points, dm) = line_points();
        let growth = HeadingGreedy::new(&points, &dm);
        let path = growth.grow(&[4, 0, 2], 2);
        assert_eq!(path[0], 2);
        let mut sorted = path.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 2, 4]);
    }

    #[test]
    fn test_empty_and_missing_seed() {
        let (points, dm) = line_points();
        let growth = HeadingGreedy::new(&points, &dm);
        assert!(growth.grow(&[], 0).is_empty());
        let path = growth.grow(&[3, 4], 0);
        assert_eq!(path[0], 3);
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_heading_breaks_near_ties() {
        // From (1,0) arriving from (0,0): (2,0.0) straight ahead vs (1,-1) turning,
        // both at distance 1. Heading picks straight ahead.
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, -1.0),
            Point::new(2.0, 0.0),
        ];
        let dm = DistanceMatrix::from_points(&points);
        let growth = HeadingGreedy::new(&points, &dm);
        let path = growth.grow(&[0, 1, 2, 3], 0);
        assert_eq!(&path[..3], &[0, 1, 3]);
    }

    #[test]
    fn test_dimension_and_guides_keep_permutation() {
        let points: Vec<Point> = (0..30)
            .map(|i| {
                let a = i as f64 * 0.7;
                Point::new(a.cos() * (1.0 + i as f64 * 0.1), a.sin() * (1.0 + i as f64 * 0.1))
            })
            .collect();
        let dm = DistanceMatrix::from_points(&points);
        let dims = DimensionMap::exact(&dm);
        let growth = HeadingGreedy::new(&points, &dm)
            .with_dimensions(&dims)
            .with_guides(GuideConfig::default().with_refresh_every(3));
        let territory: Vec<usize> = (0..30).collect();
        let path = growth.grow(&territory, 7);
        assert_eq!(path[0], 7);
        assert!(is_permutation(&path, 30));
        assert_eq!(growth.grow(&territory, 7), path);
    }

    #[test]
    fn test_guided_growth_on_large_territory() {
        let points: Vec<Point> = (0..80)
            .map(|i| {
                let t = i as f64;
                Point::new((t * 0.37).sin() * 40.0 + t * 0.5, (t * 0.91).cos() * 30.0)
            })
            .collect();
        let dm = DistanceMatrix::from_points(&points);
        let territory: Vec<usize> = (0..80).collect();
        let guided = HeadingGreedy::new(&points, &dm)
            .with_guides(GuideConfig::default().with_crossing_samples(12).with_seed(5));
        let path = guided.grow(&territory, 11);
        assert_eq!(path[0], 11);
        assert!(is_permutation(&path, 80));
        assert_eq!(guided.grow(&territory, 11), path);
    }
}
