//! Refinement driver: 2-opt to convergence, escalating to 3-opt.
//!
//! ```text
//! TwoOpt ──(pass with moves)──▶ TwoOpt
//!    │ (pass without moves)
//!    ▼
//! ThreeOpt ──(pass with moves)──▶ TwoOpt
//!    │ (pass without moves)
//!    ▼
//! Converged
//! ```
//!
//! Either phase stops early at its pass cap ([`Termination::IterationCapReached`])
//! or when the wall-clock budget runs out ([`Termination::TimeLimit`]). Every
//! applied move strictly shortens the tour, so the best tour seen is always
//! the current one.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::three_opt::three_opt_pass;
use super::two_opt::{two_opt_pass, Improvement, DEFAULT_TOLERANCE};
use crate::distance::DistanceMatrix;
use crate::error::{Result, TspError};
use crate::models::cycle_distance;

/// Local search settings.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_tsp::local_search::{Improvement, RefineConfig};
///
/// let config = RefineConfig::default()
///     .with_improvement(Improvement::BestImprovement)
///     .with_three_opt(false)
///     .with_time_limit(Duration::from_millis(200));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefineConfig {
    pub improvement: Improvement,
    /// Cap on 2-opt passes over the whole run.
    pub max_two_opt_passes: usize,
    /// Escalate to 3-opt once 2-opt converges.
    pub three_opt: bool,
    /// Cap on 3-opt passes over the whole run.
    pub max_three_opt_passes: usize,
    /// Longest segment a 3-opt move may relocate.
    pub three_opt_segment_limit: usize,
    /// A move must shorten the tour by more than this.
    pub tolerance: f64,
    /// Wall-clock budget checked between passes.
    pub time_limit: Option<Duration>,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            improvement: Improvement::FirstImprovement,
            max_two_opt_passes: 1000,
            three_opt: true,
            max_three_opt_passes: 20,
            three_opt_segment_limit: 50,
            tolerance: DEFAULT_TOLERANCE,
            time_limit: None,
        }
    }
}

impl RefineConfig {
    pub fn with_improvement(mut self, improvement: Improvement) -> Self {
        self.improvement = improvement;
        self
    }

    pub fn with_max_two_opt_passes(mut self, n: usize) -> Self {
        self.max_two_opt_passes = n;
        self
    }

    pub fn with_three_opt(mut self, enabled: bool) -> Self {
        self.three_opt = enabled;
        self
    }

    pub fn with_max_three_opt_passes(mut self, n: usize) -> Self {
        self.max_three_opt_passes = n;
        self
    }

    pub fn with_three_opt_segment_limit(mut self, limit: usize) -> Self {
        self.three_opt_segment_limit = limit;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(TspError::invalid_config(format!(
                "tolerance must be finite and non-negative, got {}",
                self.tolerance
            )));
        }
        if self.three_opt && self.three_opt_segment_limit == 0 {
            return Err(TspError::invalid_config(
                "three_opt_segment_limit must be positive when 3-opt is enabled",
            ));
        }
        Ok(())
    }
}

/// Why refinement stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// A full pass of every enabled move type found nothing.
    Converged,
    /// A pass cap was hit while moves were still being found.
    IterationCapReached,
    /// The wall-clock budget ran out.
    TimeLimit,
}

/// Summary of one refinement run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefineReport {
    /// Total passes of either move type.
    pub passes: usize,
    pub two_opt_moves: usize,
    pub three_opt_moves: usize,
    pub termination: Termination,
    /// Tour length before the first pass and after every pass.
    pub length_history: Vec<f64>,
}

impl RefineReport {
    /// Length after the last pass.
    pub fn final_length(&self) -> f64 {
        self.length_history.last().copied().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    TwoOpt,
    ThreeOpt,
}

/// Improves `tour` in place. The result is never longer than the input and
/// is always a permutation of the input.
///
/// # Examples
///
/// ```
/// use u_tsp::models::Point;
/// use u_tsp::distance::DistanceMatrix;
/// use u_tsp::local_search::{refine, RefineConfig, Termination};
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 1.0),
///     Point::new(1.0, 0.0),
///     Point::new(0.0, 1.0),
/// ];
/// let dm = DistanceMatrix::from_points(&points);
/// let mut tour = vec![0, 1, 2, 3];
/// let report = refine(&mut tour, &dm, &RefineConfig::default());
/// assert!((report.final_length() - 4.0).abs() < 1e-10);
/// assert_eq!(report.termination, Termination::Converged);
/// ```
pub fn refine(tour: &mut [usize], distances: &DistanceMatrix, config: &RefineConfig) -> RefineReport {
    let started = Instant::now();
    let mut report = RefineReport {
        passes: 0,
        two_opt_moves: 0,
        three_opt_moves: 0,
        termination: Termination::Converged,
        length_history: vec![cycle_distance(tour, distances)],
    };
    let mut two_opt_passes = 0;
    let mut three_opt_passes = 0;
    let mut phase = Phase::TwoOpt;

    let termination = loop {
        if config.time_limit.is_some_and(|limit| started.elapsed() >= limit) {
            break Termination::TimeLimit;
        }

        match phase {
            Phase::TwoOpt => {
                if two_opt_passes >= config.max_two_opt_passes {
                    break Termination::IterationCapReached;
                }
                let moves = two_opt_pass(tour, distances, config.improvement, config.tolerance);
                two_opt_passes += 1;
                report.two_opt_moves += moves;
                report.passes += 1;
                report.length_history.push(cycle_distance(tour, distances));
                if moves == 0 {
                    if !config.three_opt {
                        break Termination::Converged;
                    }
                    phase = Phase::ThreeOpt;
                }
            }
            Phase::ThreeOpt => {
                if three_opt_passes >= config.max_three_opt_passes {
                    break Termination::IterationCapReached;
                }
                let moves = three_opt_pass(
                    tour,
                    distances,
                    config.three_opt_segment_limit,
                    config.tolerance,
                );
                three_opt_passes += 1;
                report.three_opt_moves += moves;
                report.passes += 1;
                report.length_history.push(cycle_distance(tour, distances));
                if moves == 0 {
                    break Termination::Converged;
                }
                phase = Phase::TwoOpt;
            }
        }
    };

    report.termination = termination;
    log::debug!(
        "refine: done passes={} two_opt={} three_opt={} len={:.3} termination={:?}",
        report.passes,
        report.two_opt_moves,
        report.three_opt_moves,
        report.final_length(),
        report.termination
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{is_permutation, Point};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    fn random_instance(n: usize, seed: u64) -> (DistanceMatrix, Vec<usize>) {
        let mut rng = StdRng::seed_from_u64(seed);
        let points: Vec<Point> = (0..n)
            .map(|_| Point::new(rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
            .collect();
        let mut tour: Vec<usize> = (0..n).collect();
        tour.shuffle(&mut rng);
        (DistanceMatrix::from_points(&points), tour)
    }

    #[test]
    fn test_refine_square_from_every_shape() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        let dm = DistanceMatrix::from_points(&points);
        for start in [[0, 1, 2, 3], [0, 2, 1, 3], [0, 1, 3, 2]] {
            let mut tour = start.to_vec();
            let report = refine(&mut tour, &dm, &RefineConfig::default());
            assert!((cycle_distance(&tour, &dm) - 4.0).abs() < 1e-10, "{start:?}");
            assert_eq!(report.termination, Termination::Converged);
        }
    }

    #[test]
    fn test_history_is_monotone() {
        let (dm, mut tour) = random_instance(60, 3);
        let report = refine(&mut tour, &dm, &RefineConfig::default());
        for w in report.length_history.windows(2) {
            assert!(w[1] <= w[0] + 1e-9);
        }
        assert!(report.final_length() < report.length_history[0]);
        assert!(is_permutation(&tour, 60));
        assert_eq!(report.length_history.len(), report.passes + 1);
    }

    #[test]
    fn test_refine_is_idempotent() {
        let (dm, mut tour) = random_instance(50, 9);
        refine(&mut tour, &dm, &RefineConfig::default());
        let settled = tour.clone();
        let again = refine(&mut tour, &dm, &RefineConfig::default());
        assert_eq!(tour, settled);
        assert_eq!(again.two_opt_moves, 0);
        assert_eq!(again.three_opt_moves, 0);
        assert_eq!(again.termination, Termination::Converged);
    }

    #[test]
    fn test_pass_cap_returns_valid_tour() {
        let (dm, mut tour) = random_instance(80, 5);
        let before = cycle_distance(&tour, &dm);
        let config = RefineConfig::default()
            .with_improvement(Improvement::BestImprovement)
            .with_max_two_opt_passes(2);
        let report = refine(&mut tour, &dm, &config);
        assert_eq!(report.termination, Termination::IterationCapReached);
        assert_eq!(report.two_opt_moves, 2);
        assert!(is_permutation(&tour, 80));
        assert!(cycle_distance(&tour, &dm) < before);
    }

    #[test]
    fn test_zero_time_limit() {
        let (dm, mut tour) = random_instance(30, 1);
        let original = tour.clone();
        let config = RefineConfig::default().with_time_limit(Duration::ZERO);
        let report = refine(&mut tour, &dm, &config);
        assert_eq!(report.termination, Termination::TimeLimit);
        assert_eq!(report.passes, 0);
        assert_eq!(tour, original);
    }

    #[test]
    fn test_two_opt_only_converges() {
        let (dm, mut tour) = random_instance(40, 2);
        let report = refine(&mut tour, &dm, &RefineConfig::default().with_three_opt(false));
        assert_eq!(report.three_opt_moves, 0);
        assert_eq!(report.termination, Termination::Converged);
    }

    #[test]
    fn test_validate() {
        assert!(RefineConfig::default().validate().is_ok());
        assert!(RefineConfig::default().with_tolerance(-1.0).validate().is_err());
        assert!(RefineConfig::default().with_tolerance(f64::NAN).validate().is_err());
        assert!(RefineConfig::default()
            .with_three_opt_segment_limit(0)
            .validate()
            .is_err());
        assert!(RefineConfig::default()
            .with_three_opt(false)
            .with_three_opt_segment_limit(0)
            .validate()
            .is_ok());
    }
}
