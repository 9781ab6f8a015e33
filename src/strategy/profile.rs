//! Coarse dataset statistics for strategy selection.
//!
//! # Multi-scale score
//!
//! For the first 20 points of a random sample, neighbors are counted at
//! radii `{0.05, 0.1, 0.2} × sample_max_distance`. The coefficient of
//! variation of each point's counts measures how much its neighborhood
//! changes with scale; the score is the mean over those points.
//!
//! Neighborhoods that keep filling up as the radius grows (area-filling
//! spread) score high. Neighborhoods that saturate early (tight, isolated
//! clusters) score low.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::kind::Strategy;
use crate::geometry::coefficient_of_variation;
use crate::models::Point;

/// Radius fractions used by the multi-scale score.
pub const PROFILE_RADIUS_FRACTIONS: [f64; 3] = [0.05, 0.1, 0.2];

/// Default score above which a dataset counts as multi-scale.
pub const DEFAULT_MULTI_SCALE_THRESHOLD: f64 = 0.8;

/// Below this many points no profiling is done.
const MIN_PROFILED_POINTS: usize = 20;

/// Number of sampled points whose neighborhoods are scored.
const SCORED_POINTS: usize = 20;

/// Result of [`DatasetProfile::analyze`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatasetProfile {
    /// Mean multi-scale coefficient of variation.
    pub multi_scale_score: f64,
    /// Points actually sampled (0 for small inputs).
    pub sample_size: usize,
}

impl DatasetProfile {
    /// Profiles `points` from a random sample of at most `sample_size`
    /// points. Inputs with fewer than 20 points score 0.
    pub fn analyze<R: Rng + ?Sized>(points: &[Point], sample_size: usize, rng: &mut R) -> Self {
        let n = points.len();
        let sample_size = sample_size.min(n);
        if n < MIN_PROFILED_POINTS || sample_size < 2 {
            return Self {
                multi_scale_score: 0.0,
                sample_size: 0,
            };
        }

        let sample: Vec<Point> = rand::seq::index::sample(rng, n, sample_size)
            .into_iter()
            .map(|i| points[i])
            .collect();

        let mut max_distance: f64 = 0.0;
        for (i, a) in sample.iter().enumerate() {
            for b in &sample[i + 1..] {
                max_distance = max_distance.max(a.distance_to(b));
            }
        }

        let scores: Vec<f64> = sample
            .iter()
            .take(SCORED_POINTS)
            .map(|center| {
                let counts: Vec<f64> = PROFILE_RADIUS_FRACTIONS
                    .iter()
                    .map(|f| {
                        let radius = max_distance * f;
                        sample
                            .iter()
                            .filter(|p| center.distance_to(p) < radius)
                            .count() as f64
                    })
                    .collect();
                coefficient_of_variation(&counts)
            })
            .collect();

        let multi_scale_score = if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        };

        Self {
            multi_scale_score,
            sample_size,
        }
    }

    /// Whether the score exceeds `threshold`.
    pub fn is_multi_scale(&self, threshold: f64) -> bool {
        self.multi_scale_score > threshold
    }

    /// [`Strategy::DimensionScaling`] for multi-scale data, otherwise
    /// [`Strategy::Adaptive`].
    pub fn recommended(&self, threshold: f64) -> Strategy {
        if self.is_multi_scale(threshold) {
            Strategy::DimensionScaling
        } else {
            Strategy::Adaptive
        }
    }
}

/// Resolves [`Strategy::Auto`] by profiling; concrete strategies are
/// returned unchanged without touching `rng`.
pub fn select_strategy<R: Rng + ?Sized>(
    requested: Strategy,
    points: &[Point],
    sample_size: usize,
    threshold: f64,
    rng: &mut R,
) -> Strategy {
    match requested {
        Strategy::Auto => {
            let profile = DatasetProfile::analyze(points, sample_size, rng);
            let chosen = profile.recommended(threshold);
            log::debug!(
                "strategy: profile score={:.3} sample={} -> {chosen}",
                profile.multi_scale_score,
                profile.sample_size
            );
            chosen
        }
        concrete => concrete,
    }
}
