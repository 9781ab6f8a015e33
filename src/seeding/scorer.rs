//! Seed scoring capabilities.

use crate::distance::DistanceMatrix;
use crate::geometry::{density_counts, DimensionMap, EPSILON};

/// Running state of a seed selection: chosen seeds and, for every point,
/// its distance to the nearest chosen seed.
#[derive(Debug, Clone)]
pub struct SelectionState<'a> {
    distances: &'a DistanceMatrix,
    chosen: Vec<usize>,
    nearest: Vec<f64>,
}

impl<'a> SelectionState<'a> {
    pub(crate) fn new(distances: &'a DistanceMatrix) -> Self {
        Self {
            distances,
            chosen: Vec::new(),
            nearest: vec![f64::INFINITY; distances.size()],
        }
    }

    pub(crate) fn push(&mut self, seed: usize) {
        for (p, best) in self.nearest.iter_mut().enumerate() {
            let d = self.distances.get(seed, p);
            if d < *best {
                *best = d;
            }
        }
        self.chosen.push(seed);
    }

    pub(crate) fn into_seeds(self) -> Vec<usize> {
        self.chosen
    }

    /// Seeds chosen so far, in selection order.
    pub fn chosen(&self) -> &[usize] {
        &self.chosen
    }

    /// Distance from `point` to its nearest chosen seed.
    pub fn nearest_seed_distance(&self, point: usize) -> f64 {
        self.nearest[point]
    }

    pub fn distances(&self) -> &DistanceMatrix {
        self.distances
    }

    /// Minimum distance to the chosen seeds, normalized by the largest
    /// pairwise distance. 1.0 before any seed is chosen.
    pub fn separation(&self, candidate: usize) -> f64 {
        if self.chosen.is_empty() {
            return 1.0;
        }
        let max = self.distances.max_distance();
        if max <= EPSILON {
            return 0.0;
        }
        self.nearest[candidate] / max
    }

    /// Fraction of points strictly closer to `candidate` than to any chosen
    /// seed, i.e. the share of the point set this candidate would capture.
    pub fn coverage(&self, candidate: usize) -> f64 {
        let n = self.nearest.len();
        if n == 0 {
            return 0.0;
        }
        let row = self.distances.row(candidate);
        let captured = row
            .iter()
            .zip(&self.nearest)
            .filter(|(d, best)| d < best)
            .count();
        captured as f64 / n as f64
    }
}

/// Scoring capability used by [`select_seeds`](super::select_seeds).
///
/// A candidate's total score is
/// `PHI_MAJOR · quality + PHI_MINOR · spread`.
pub trait SeedScorer {
    /// Intrinsic quality of `point`, normalized to `[0, 1]`.
    fn quality(&self, point: usize) -> f64;

    /// Spread term of `candidate` given the seeds chosen so far, in `[0, 1]`.
    ///
    /// Defaults to the normalized distance to the nearest chosen seed.
    fn spread(&self, candidate: usize, state: &SelectionState<'_>) -> f64 {
        state.separation(candidate)
    }
}

fn normalize_by_max(values: Vec<f64>) -> Vec<f64> {
    let max = values.iter().copied().fold(0.0, f64::max);
    if max <= EPSILON {
        return vec![0.0; values.len()];
    }
    values.into_iter().map(|v| v / max).collect()
}

/// Quality = neighbor count within the median pairwise distance.
#[derive(Debug, Clone)]
pub struct DensityScorer {
    quality: Vec<f64>,
}

impl DensityScorer {
    pub fn new(distances: &DistanceMatrix) -> Self {
        Self {
            quality: normalize_by_max(density_counts(distances)),
        }
    }
}

impl SeedScorer for DensityScorer {
    fn quality(&self, point: usize) -> f64 {
        self.quality[point]
    }
}

/// Quality = local fractal dimension relative to the largest one.
#[derive(Debug, Clone)]
pub struct DimensionScorer {
    quality: Vec<f64>,
}

impl DimensionScorer {
    pub fn new(dimensions: &DimensionMap) -> Self {
        Self {
            quality: normalize_by_max(dimensions.as_slice().to_vec()),
        }
    }
}

impl SeedScorer for DimensionScorer {
    fn quality(&self, point: usize) -> f64 {
        self.quality[point]
    }
}

/// Dimension quality with a spread term that averages separation and the
/// share of points the candidate would newly capture.
#[derive(Debug, Clone)]
pub struct CoverageScorer {
    inner: DimensionScorer,
}

impl CoverageScorer {
    pub fn new(dimensions: &DimensionMap) -> Self {
        Self {
            inner: DimensionScorer::new(dimensions),
        }
    }
}

impl SeedScorer for CoverageScorer {
    fn quality(&self, point: usize) -> f64 {
        self.inner.quality(point)
    }

    fn spread(&self, candidate: usize, state: &SelectionState<'_>) -> f64 {
        0.5 * (state.separation(candidate) + state.coverage(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Point;

    fn line(n: usize) -> DistanceMatrix {
        let points: Vec<Point> = (0..n).map(|i| Point::new(i as f64, 0.0)).collect();
        DistanceMatrix::from_points(&points)
    }

    #[test]
    fn test_state_tracks_nearest_seed() {
        let dm = line(5);
        let mut state = SelectionState::new(&dm);
        assert_eq!(state.separation(3), 1.0);
        state.push(0);
        assert!((state.nearest_seed_distance(3) - 3.0).abs() < 1e-12);
        state.push(4);
        assert!((state.nearest_seed_distance(3) - 1.0).abs() < 1e-12);
        assert!((state.separation(2) - 0.5).abs() < 1e-12);
        assert_eq!(state.chosen(), &[0, 4]);
    }

    #[test]
    fn test_coverage_counts_captured_points() {
        let dm = line(5);
        let mut state = SelectionState::new(&dm);
        state.push(0);
        // Point 4 captures 3 and 4 (3 is at distance 1 < 3); 2 is a tie.
        assert!((state.coverage(4) - 2.0 / 5.0).abs() < 1e-12);
        assert_eq!(state.coverage(0), 0.0);
    }

    #[test]
    fn test_density_scorer_normalized() {
        let dm = line(7);
        let scorer = DensityScorer::new(&dm);
        let q: Vec<f64> = (0..7).map(|i| scorer.quality(i)).collect();
        assert!(q.iter().all(|&v| (0.0..=1.0).contains(&v)));
        assert!((q[3] - 1.0).abs() < 1e-12);
        assert!(q[3] > q[0]);
    }

    #[test]
    fn test_dimension_scorer_prefers_high_dimension() {
        let map = DimensionMap::from_values(vec![1.0, 2.0, 1.5]);
        let scorer = DimensionScorer::new(&map);
        assert!((scorer.quality(1) - 1.0).abs() < 1e-12);
        assert!((scorer.quality(0) - 0.5).abs() < 1e-12);
    }
}
