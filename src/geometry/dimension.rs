//! Local fractal dimension.
//!
//! # Algorithm
//!
//! Around a point, count neighbors within several radii scaled from the
//! largest pairwise distance, then fit a line to `(ln r, ln count)`. The
//! slope approximates how fast the neighborhood fills: ≈1 along curves and
//! sparse chains, ≈2 in area-filling regions. The slope is clamped to
//! `[1, 2]`.
//!
//! Evaluating every point costs O(n²); [`DimensionMap::estimate`] evaluates a
//! random sample exactly and fills the rest by inverse-distance weighting.

use rand::Rng;

use super::density::neighbor_count;
use super::EPSILON;
use crate::distance::DistanceMatrix;

/// Radii used for the estimate, as fractions of the largest pairwise distance.
pub const DIMENSION_RADIUS_FRACTIONS: [f64; 4] = [0.05, 0.1, 0.2, 0.4];

/// Fallback dimension when the fit is undefined (coincident points).
pub const DEFAULT_DIMENSION: f64 = 1.5;

/// Absolute radii for a given largest pairwise distance.
pub fn dimension_radii(max_distance: f64) -> Vec<f64> {
    DIMENSION_RADIUS_FRACTIONS
        .iter()
        .map(|f| f * max_distance)
        .collect()
}

/// Estimates the local fractal dimension around `center`.
///
/// Counts below one are raised to one so the logarithm stays finite. Returns
/// [`DEFAULT_DIMENSION`] if fewer than two positive radii are given.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Point;
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::geometry::{dimension_radii, local_fractal_dimension};
///
/// // 101 evenly spaced points on a line.
/// let points: Vec<Point> = (0..=100).map(|i| Point::new(i as f64, 0.0)).collect();
/// let dm = DistanceMatrix::from_points(&points);
/// let radii = dimension_radii(dm.max_distance());
/// let d = local_fractal_dimension(&dm, 50, &radii);
/// assert!((d - 1.0).abs() < 0.1);
/// ```
pub fn local_fractal_dimension(distances: &DistanceMatrix, center: usize, radii: &[f64]) -> f64 {
    let row = distances.row(center);
    let samples: Vec<(f64, f64)> = radii
        .iter()
        .filter(|&&r| r > EPSILON)
        .map(|&r| {
            let count = neighbor_count(row, r).max(1);
            (r.ln(), (count as f64).ln())
        })
        .collect();

    match fit_slope(&samples) {
        Some(slope) => slope.clamp(1.0, 2.0),
        None => DEFAULT_DIMENSION,
    }
}

/// Least-squares slope of `y` over `x`.
fn fit_slope(samples: &[(f64, f64)]) -> Option<f64> {
    if samples.len() < 2 {
        return None;
    }
    let n = samples.len() as f64;
    let mean_x = samples.iter().map(|s| s.0).sum::<f64>() / n;
    let mean_y = samples.iter().map(|s| s.1).sum::<f64>() / n;
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for &(x, y) in samples {
        sxy += (x - mean_x) * (y - mean_y);
        sxx += (x - mean_x) * (x - mean_x);
    }
    if sxx <= EPSILON {
        return None;
    }
    Some(sxy / sxx)
}

/// Local fractal dimension of every point in a point set.
///
/// Write-once: built at the start of a solve and only read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionMap {
    values: Vec<f64>,
}

impl DimensionMap {
    /// Wraps precomputed per-point dimensions.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Evaluates every point exactly. O(n²).
    pub fn exact(distances: &DistanceMatrix) -> Self {
        let radii = dimension_radii(distances.max_distance());
        let values = (0..distances.size())
            .map(|i| local_fractal_dimension(distances, i, &radii))
            .collect();
        Self { values }
    }

    /// Evaluates `sample_size` random points exactly and interpolates the
    /// rest with inverse-distance weights over the sampled points.
    pub fn estimate<R: Rng + ?Sized>(
        distances: &DistanceMatrix,
        sample_size: usize,
        rng: &mut R,
    ) -> Self {
        let n = distances.size();
        if sample_size >= n {
            return Self::exact(distances);
        }
        if sample_size == 0 {
            return Self {
                values: vec![DEFAULT_DIMENSION; n],
            };
        }

        let radii = dimension_radii(distances.max_distance());
        let sampled = rand::seq::index::sample(rng, n, sample_size).into_vec();
        let mut values = vec![0.0; n];
        let mut is_sampled = vec![false; n];
        for &i in &sampled {
            values[i] = local_fractal_dimension(distances, i, &radii);
            is_sampled[i] = true;
        }

        for i in 0..n {
            if is_sampled[i] {
                continue;
            }
            let mut weight_sum = 0.0;
            let mut acc = 0.0;
            for &s in &sampled {
                let w = 1.0 / (distances.get(i, s) + EPSILON);
                weight_sum += w;
                acc += w * values[s];
            }
            values[i] = acc / weight_sum;
        }

        Self { values }
    }

    /// Dimension at `point`.
    #[inline]
    pub fn get(&self, point: usize) -> f64 {
        self.values[point]
    }

    /// All values, indexed by point.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Number of points covered.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the map covers no points.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Mean dimension ([`DEFAULT_DIMENSION`] when empty).
    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return DEFAULT_DIMENSION;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Largest dimension ([`DEFAULT_DIMENSION`] when empty).
    pub fn max(&self) -> f64 {
        self.values
            .iter()
            .copied()
            .reduce(f64::max)
            .unwrap_or(DEFAULT_DIMENSION)
    }

    /// Compatibility of two points' dimensions in `[0, 1]`:
    /// `1 - |d_a - d_b| / 2`.
    pub fn compatibility(&self, a: usize, b: usize) -> f64 {
        1.0 - (self.values[a] - self.values[b]).abs() / 2.0
    }
}
