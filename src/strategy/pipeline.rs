//! One construction pass: seeds → territories → paths → merged tour.
//!
//! Each [`Strategy`] binds one capability per stage:
//!
//! - `Adaptive` — [`DensityScorer`], [`NearestSeed`], [`HeadingGreedy`],
//!   plain merge
//! - `DimensionScaling` — [`DimensionScorer`], [`DimensionWeighted`],
//!   dimension-aware [`HeadingGreedy`], [`DimensionPenalty`]
//! - `Wavefront` — [`DensityScorer`], [`WaveArrival`], [`WaveOrder`],
//!   [`WaveBoundaryPenalty`]
//! - `Synthesis` — [`CoverageScorer`], dimension-scaled waves with
//!   [`WaveArrival`] affinity, [`WaveOrder`], both penalties with the
//!   synthesis weights of [`MergeConfig`]
//!
//! `Auto` runs as `Adaptive`; resolve it with
//! [`select_strategy`](super::select_strategy) first.

use super::kind::Strategy;
use crate::constructive::{GrowthOrder, GrowthWeights, GuideConfig, HeadingGreedy, WaveOrder};
use crate::distance::DistanceMatrix;
use crate::geometry::{DimensionMap, DEFAULT_DIMENSION};
use crate::merge::{merge_paths, DimensionPenalty, MergeConfig, MergePenalty, WaveBoundaryPenalty};
use crate::models::{Point, TerritoryMap};
use crate::parallel::map_jobs;
use crate::partition::{partition, DimensionWeighted, NearestSeed, WaveArrival, WaveField};
use crate::seeding::{
    default_seed_count, scaled_seed_count, select_seeds, CoverageScorer, DensityScorer,
    DimensionScorer,
};

/// Seeds and merged, unrefined tour of one construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Construction {
    pub seeds: Vec<usize>,
    pub tour: Vec<usize>,
}

/// A strategy bound to one point set.
///
/// # Examples
///
/// ```
/// use u_tsp::models::{is_permutation, Point};
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::strategy::{Pipeline, Strategy};
///
/// let points: Vec<Point> = (0..30)
///     .map(|i| Point::new((i % 6) as f64, (i / 6) as f64))
///     .collect();
/// let dm = DistanceMatrix::from_points(&points);
/// let built = Pipeline::new(Strategy::Wavefront, &points, &dm).construct(None);
/// assert!(is_permutation(&built.tour, 30));
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline<'a> {
    strategy: Strategy,
    points: &'a [Point],
    distances: &'a DistanceMatrix,
    dimensions: Option<&'a DimensionMap>,
    seed_count: Option<usize>,
    growth: GrowthWeights,
    guides: Option<GuideConfig>,
    merge: MergeConfig,
    parallel: bool,
}

impl<'a> Pipeline<'a> {
    pub fn new(strategy: Strategy, points: &'a [Point], distances: &'a DistanceMatrix) -> Self {
        Self {
            strategy,
            points,
            distances,
            dimensions: None,
            seed_count: None,
            growth: GrowthWeights::default(),
            guides: None,
            merge: MergeConfig::default(),
            parallel: true,
        }
    }

    /// Local dimension map for the dimension-aware strategies. Without it
    /// those strategies see a uniform map at [`DEFAULT_DIMENSION`].
    pub fn with_dimensions(mut self, dimensions: &'a DimensionMap) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Fixes the seed count instead of deriving it from `n`. Zero is
    /// treated as one.
    pub fn with_seed_count(mut self, k: usize) -> Self {
        self.seed_count = Some(k);
        self
    }

    pub fn with_growth(mut self, weights: GrowthWeights) -> Self {
        self.growth = weights;
        self
    }

    /// Adds guide-circle steering to heading-greedy growth.
    pub fn with_guides(mut self, guides: GuideConfig) -> Self {
        self.guides = Some(guides);
        self
    }

    pub fn with_merge(mut self, merge: MergeConfig) -> Self {
        self.merge = merge;
        self
    }

    /// Grows territories concurrently when the `parallel` feature is on.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Builds a tour. `anchor` fixes the first seed.
    pub fn construct(&self, anchor: Option<usize>) -> Construction {
        let n = self.points.len();
        if n == 0 {
            return Construction {
                seeds: Vec::new(),
                tour: Vec::new(),
            };
        }

        let uniform;
        let dims = match self.dimensions {
            Some(d) => d,
            None => {
                uniform = DimensionMap::from_values(vec![DEFAULT_DIMENSION; n]);
                &uniform
            }
        };
        let dm = self.distances;

        let (seeds, tour) = match self.strategy {
            Strategy::Auto | Strategy::Adaptive => {
                let k = self.seed_count_or(|| default_seed_count(n));
                let seeds = select_seeds(dm, &DensityScorer::new(dm), k, anchor);
                let map = partition(n, &seeds, &NearestSeed::new(dm));
                let paths = self.grow(&self.heading_greedy(None), &map);
                (seeds, merge_paths(dm, paths, &[], &self.merge))
            }
            Strategy::DimensionScaling => {
                let k = self.seed_count_or(|| scaled_seed_count(n, dims.mean()));
                let seeds = select_seeds(dm, &DimensionScorer::new(dims), k, anchor);
                let map = partition(n, &seeds, &DimensionWeighted::new(dm, dims));
                let paths = self.grow(&self.heading_greedy(Some(dims)), &map);
                let penalty = DimensionPenalty::new(dims, self.penalty_weights().0);
                (seeds, merge_paths(dm, paths, &[&penalty], &self.merge))
            }
            Strategy::Wavefront => {
                let k = self.seed_count_or(|| default_seed_count(n));
                let seeds = select_seeds(dm, &DensityScorer::new(dm), k, anchor);
                let field = WaveField::expand(self.points, dm, &seeds, None);
                let map = partition(n, &seeds, &WaveArrival::new(&field));
                let paths = self.grow(&WaveOrder::new(&field, dm), &map);
                let boundary = WaveBoundaryPenalty::new(&field, dm, self.penalty_weights().1);
                (seeds, merge_paths(dm, paths, &[&boundary], &self.merge))
            }
            Strategy::Synthesis => {
                let k = self.seed_count_or(|| scaled_seed_count(n, dims.mean()));
                let seeds = select_seeds(dm, &CoverageScorer::new(dims), k, anchor);
                let field = WaveField::expand(self.points, dm, &seeds, Some(dims));
                let map = partition(n, &seeds, &WaveArrival::new(&field).with_affinity(dims));
                let paths = self.grow(&WaveOrder::new(&field, dm), &map);
                let (scale, weight) = self.penalty_weights();
                let penalty = DimensionPenalty::new(dims, scale);
                let boundary = WaveBoundaryPenalty::new(&field, dm, weight);
                let penalties: [&dyn MergePenalty; 2] = [&penalty, &boundary];
                (seeds, merge_paths(dm, paths, &penalties, &self.merge))
            }
        };

        Construction { seeds, tour }
    }

    /// `(dimension_scale, boundary_weight)` for this strategy's merge.
    fn penalty_weights(&self) -> (f64, f64) {
        match self.strategy {
            Strategy::Synthesis => (
                self.merge.synthesis_dimension_scale,
                self.merge.synthesis_boundary_weight,
            ),
            _ => (self.merge.dimension_scale, self.merge.boundary_weight),
        }
    }

    /// Configured seed count, else `default`; never zero.
    fn seed_count_or(&self, default: impl FnOnce() -> usize) -> usize {
        self.seed_count.unwrap_or_else(default).max(1)
    }

    fn heading_greedy<'b>(&'b self, dims: Option<&'b DimensionMap>) -> HeadingGreedy<'b> {
        let mut growth = HeadingGreedy::new(self.points, self.distances).with_weights(self.growth);
        if let Some(d) = dims {
            growth = growth.with_dimensions(d);
        }
        if let Some(guides) = self.guides {
            growth = growth.with_guides(guides);
        }
        growth
    }

    fn grow<G: GrowthOrder>(&self, growth: &G, territories: &TerritoryMap) -> Vec<Vec<usize>> {
        let jobs: Vec<(usize, &[usize])> = territories.iter().collect();
        log::debug!(
            "pipeline.grow: strategy={} territories={}",
            self.strategy,
            jobs.len()
        );
        map_jobs(&jobs, self.parallel, |&(seed, members)| {
            growth.grow(members, seed)
        })
    }
}
