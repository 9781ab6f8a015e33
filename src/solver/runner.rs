//! Solve orchestration: strategy selection, multi-start, refinement.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::config::SolverConfig;
use crate::distance::DistanceMatrix;
use crate::error::{Result, TspError};
use crate::geometry::DimensionMap;
use crate::local_search::{refine, RefineConfig, RefineReport, Termination};
use crate::models::{self, cycle_distance, is_permutation, points_from_coords, Point};
use crate::parallel::map_jobs;
use crate::seeding::golden_angle_anchor;
use crate::strategy::{select_strategy, Pipeline, Strategy};

/// Result of a solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Visiting order, a permutation of `0..n` read as a cycle.
    pub tour: Vec<usize>,

    /// Closed Euclidean length of `tour`.
    pub length: f64,

    /// The pipeline that ran (never `Auto` for `n > 3`).
    pub strategy: Strategy,

    /// Seeds of the winning run. Empty for `n <= 3`.
    pub seeds: Vec<usize>,

    /// Index of the winning multi-start run.
    pub start: usize,

    /// Refinement summary of the winning run.
    pub refine: RefineReport,
}

/// Solves with default settings and returns the tour.
///
/// # Errors
///
/// [`TspError::InvalidInput`] if `points` is empty or holds a non-finite
/// coordinate.
///
/// # Examples
///
/// ```
/// use u_tsp::{solve, tour_length, Strategy};
///
/// let points = [(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (0.0, 1.0)];
/// let tour = solve(&points, Strategy::Auto).unwrap();
/// assert!((tour_length(&points, &tour) - 4.0).abs() < 1e-10);
///
/// // Up to three points come back in input order.
/// assert_eq!(solve(&[(5.0, 5.0), (0.0, 0.0)], Strategy::Adaptive).unwrap(), vec![0, 1]);
/// ```
pub fn solve(points: &[(f64, f64)], strategy: Strategy) -> Result<Vec<usize>> {
    let config = SolverConfig::default().with_strategy(strategy);
    solve_with_config(points, &config).map(|solution| solution.tour)
}

/// Solves raw coordinates with an explicit configuration.
///
/// # Errors
///
/// [`TspError::InvalidInput`] for empty or non-finite input,
/// [`TspError::InvalidConfig`] if `config` fails validation.
pub fn solve_with_config(points: &[(f64, f64)], config: &SolverConfig) -> Result<Solution> {
    let points = points_from_coords(points)?;
    solve_points(&points, config)
}

/// Solves an already validated point set.
///
/// # Errors
///
/// As [`solve_with_config`].
pub fn solve_points(points: &[Point], config: &SolverConfig) -> Result<Solution> {
    config.validate()?;
    let n = points.len();
    if n == 0 {
        return Err(TspError::invalid_input("point set is empty"));
    }
    if let Some(i) = points.iter().position(|p| !p.is_finite()) {
        return Err(TspError::invalid_input(format!(
            "point {i} has non-finite coordinates"
        )));
    }

    if n <= 3 {
        return Ok(identity_solution(points, config.strategy));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let strategy = select_strategy(
        config.strategy,
        points,
        config.profile_samples,
        config.multi_scale_threshold,
        &mut rng,
    );

    let distances = DistanceMatrix::from_points(points);
    let dimensions = strategy
        .uses_dimensions()
        .then(|| DimensionMap::estimate(&distances, config.dimension_samples, &mut rng));

    // Concurrent starts grow their territories sequentially.
    let mut pipeline = Pipeline::new(strategy, points, &distances)
        .with_growth(config.growth)
        .with_merge(config.merge)
        .with_parallel(config.parallel && config.starts == 1);
    if let Some(dims) = &dimensions {
        pipeline = pipeline.with_dimensions(dims);
    }
    if let Some(k) = config.seed_count {
        pipeline = pipeline.with_seed_count(k);
    }
    if let Some(guides) = config.guides {
        pipeline = pipeline.with_guides(guides);
    }

    let runs: Vec<usize> = (0..config.starts).collect();
    let outcomes = map_jobs(&runs, config.parallel, |&run| {
        run_once(&pipeline, points, &distances, &config.refine, run)
    });

    let mut best: Option<Solution> = None;
    for outcome in outcomes {
        let better = match &best {
            None => true,
            Some(b) => outcome.length < b.length,
        };
        if better {
            best = Some(outcome);
        }
    }
    let best = best.ok_or_else(|| TspError::invalid_config("starts must be positive"))?;

    log::info!(
        "solver: done strategy={} n={} starts={} best_start={} len={:.3}",
        strategy,
        n,
        config.starts,
        best.start,
        best.length
    );
    Ok(best)
}

fn run_once(
    pipeline: &Pipeline<'_>,
    points: &[Point],
    distances: &DistanceMatrix,
    refine_config: &RefineConfig,
    run: usize,
) -> Solution {
    let anchor = golden_angle_anchor(points, run);
    let built = pipeline.construct(anchor);
    log::debug!(
        "solver.run: start idx={run} seeds={} constructed={:.3}",
        built.seeds.len(),
        cycle_distance(&built.tour, distances)
    );

    let mut tour = built.tour;
    let report = refine(&mut tour, distances, refine_config);
    debug_assert!(is_permutation(&tour, points.len()));

    Solution {
        length: models::tour_length(points, &tour),
        tour,
        strategy: pipeline.strategy(),
        seeds: built.seeds,
        start: run,
        refine: report,
    }
}

fn identity_solution(points: &[Point], requested: Strategy) -> Solution {
    let tour: Vec<usize> = (0..points.len()).collect();
    let length = models::tour_length(points, &tour);
    Solution {
        tour,
        length,
        strategy: requested,
        seeds: Vec::new(),
        start: 0,
        refine: RefineReport {
            passes: 0,
            two_opt_moves: 0,
            three_opt_moves: 0,
            termination: Termination::Converged,
            length_history: vec![length],
        },
    }
}

/// Closed-cycle Euclidean length of `tour` over raw coordinates.
///
/// Returns 0.0 for tours with fewer than two entries.
///
/// # Panics
///
/// Panics if `tour` holds an index `>= points.len()`. Use
/// [`checked_tour_length`] for untrusted tours.
pub fn tour_length(points: &[(f64, f64)], tour: &[usize]) -> f64 {
    if tour.len() < 2 {
        return 0.0;
    }
    let point = |i: usize| Point::from(points[i]);
    let mut length = 0.0;
    for w in tour.windows(2) {
        length += point(w[0]).distance_to(&point(w[1]));
    }
    length + point(tour[tour.len() - 1]).distance_to(&point(tour[0]))
}

/// Like [`tour_length`], but first checks that `tour` is a permutation of
/// `0..points.len()`.
///
/// # Errors
///
/// [`TspError::InvalidInput`] for any other tour.
pub fn checked_tour_length(points: &[(f64, f64)], tour: &[usize]) -> Result<f64> {
    if !is_permutation(tour, points.len()) {
        return Err(TspError::invalid_input(format!(
            "tour of length {} is not a permutation of 0..{}",
            tour.len(),
            points.len()
        )));
    }
    Ok(tour_length(points, tour))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::{nearest_neighbor_tour, GuideConfig};
    use rand::Rng;

    fn scatter(n: usize, seed: u64) -> Vec<(f64, f64)> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| (rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            solve(&[], Strategy::Auto),
            Err(TspError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_non_finite_input() {
        let points = [(0.0, 0.0), (f64::NAN, 1.0), (2.0, 2.0), (3.0, 0.0)];
        assert!(matches!(
            solve(&points, Strategy::Adaptive),
            Err(TspError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_small_inputs_identity() {
        for n in 1..=3 {
            let points = scatter(n, n as u64);
            for strategy in [Strategy::Auto, Strategy::Synthesis] {
                let tour = solve(&points, strategy).unwrap();
                assert_eq!(tour, (0..n).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn test_unit_square() {
        let points = [(0.0, 0.0), (1.0, 1.0), (0.0, 1.0), (1.0, 0.0)];
        for strategy in Strategy::CONCRETE {
            let tour = solve(&points, strategy).unwrap();
            assert!((tour_length(&points, &tour) - 4.0).abs() < 1e-10, "{strategy}");
        }
    }

    #[test]
    fn test_every_strategy_returns_permutation() {
        let points = scatter(120, 5);
        for strategy in Strategy::CONCRETE.into_iter().chain([Strategy::Auto]) {
            let solution =
                solve_with_config(&points, &SolverConfig::default().with_strategy(strategy))
                    .unwrap();
            assert!(is_permutation(&solution.tour, 120), "{strategy}");
            assert_ne!(solution.strategy, Strategy::Auto);
            assert!((solution.length - tour_length(&points, &solution.tour)).abs() < 1e-9);
            assert!(solution.length <= solution.refine.length_history[0] + 1e-9);
        }
    }

    #[test]
    fn test_beats_nearest_neighbor_on_most_instances() {
        let mut wins = 0;
        for seed in 0..6 {
            let coords = scatter(80, 100 + seed);
            let points = points_from_coords(&coords).unwrap();
            let dm = DistanceMatrix::from_points(&points);
            let baseline = cycle_distance(&nearest_neighbor_tour(&dm, 0), &dm);
            let tour = solve(&coords, Strategy::Auto).unwrap();
            if tour_length(&coords, &tour) <= baseline + 1e-9 {
                wins += 1;
            }
        }
        assert!(wins >= 4, "won {wins} of 6");
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let points = scatter(90, 12);
        let config = SolverConfig::default()
            .with_strategy(Strategy::DimensionScaling)
            .with_seed(3);
        let a = solve_with_config(&points, &config).unwrap();
        let b = solve_with_config(&points, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_multi_start_never_worse_than_first_run() {
        let points = scatter(70, 21);
        let single = solve_with_config(
            &points,
            &SolverConfig::default().with_strategy(Strategy::Adaptive),
        )
        .unwrap();
        let multi = solve_with_config(
            &points,
            &SolverConfig::default()
                .with_strategy(Strategy::Adaptive)
                .with_starts(4),
        )
        .unwrap();
        assert!(multi.length <= single.length + 1e-9);
        assert!(multi.start < 4);
    }

    #[test]
    fn test_guides_and_capped_refinement() {
        let points = scatter(60, 9);
        let config = SolverConfig::default()
            .with_strategy(Strategy::Adaptive)
            .with_guides(GuideConfig::default())
            .with_refine(RefineConfig::default().with_max_two_opt_passes(1).with_three_opt(false));
        let solution = solve_with_config(&points, &config).unwrap();
        assert!(is_permutation(&solution.tour, 60));
        assert!(solution.refine.passes <= 1);
    }

    #[test]
    fn test_invalid_config_surfaces() {
        let points = scatter(10, 1);
        let result = solve_with_config(&points, &SolverConfig::default().with_starts(0));
        assert!(matches!(result, Err(TspError::InvalidConfig(_))));
    }

    #[test]
    fn test_duplicate_points() {
        let mut points = vec![(5.0, 5.0); 6];
        points.extend(scatter(20, 3));
        let tour = solve(&points, Strategy::Wavefront).unwrap();
        assert!(is_permutation(&tour, 26));
    }

    #[test]
    fn test_tour_length_helpers() {
        let square = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        assert!((tour_length(&square, &[0, 1, 2, 3]) - 4.0).abs() < 1e-10);
        assert_eq!(tour_length(&square, &[1]), 0.0);
        assert_eq!(tour_length(&square, &[]), 0.0);
        assert!(checked_tour_length(&square, &[0, 1, 2]).is_err());
        assert!(checked_tour_length(&square, &[0, 1, 1, 3]).is_err());
        let crossed = checked_tour_length(&square, &[0, 2, 1, 3]).unwrap();
        assert!((crossed - (2.0 + 2.0 * 2f64.sqrt())).abs() < 1e-10);
    }
}
