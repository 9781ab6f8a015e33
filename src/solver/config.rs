//! Solver configuration.

use serde::{Deserialize, Serialize};

use crate::constructive::{GrowthWeights, GuideConfig};
use crate::error::{Result, TspError};
use crate::local_search::RefineConfig;
use crate::merge::MergeConfig;
use crate::strategy::{Strategy, DEFAULT_MULTI_SCALE_THRESHOLD};

/// Configuration for [`solve_with_config`](super::solve_with_config).
///
/// # Examples
///
/// ```
/// use u_tsp::solver::SolverConfig;
/// use u_tsp::strategy::Strategy;
///
/// let config = SolverConfig::default()
///     .with_strategy(Strategy::Wavefront)
///     .with_starts(4)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Pipeline to run; `Auto` profiles the dataset first.
    pub strategy: Strategy,

    /// Seed for every random sample taken during a solve.
    pub seed: u64,

    /// Number of multi-start runs. Run `r > 0` anchors its first seed at
    /// the golden angle `r · 137.5°` around the centroid.
    pub starts: usize,

    /// Fixed seed count. `None` derives it from `n` (and the mean local
    /// dimension for the dimension-aware pipelines).
    pub seed_count: Option<usize>,

    /// Points whose local dimension is computed exactly; the rest are
    /// interpolated.
    pub dimension_samples: usize,

    /// Sample size for the multi-scale profile.
    pub profile_samples: usize,

    /// Profile score above which `Auto` picks `DimensionScaling`.
    pub multi_scale_threshold: f64,

    pub growth: GrowthWeights,

    /// Guide-circle steering for heading-greedy growth.
    pub guides: Option<GuideConfig>,

    pub merge: MergeConfig,

    pub refine: RefineConfig,

    /// Run independent work concurrently (requires the `parallel` feature).
    pub parallel: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Auto,
            seed: 42,
            starts: 1,
            seed_count: None,
            dimension_samples: 50,
            profile_samples: 100,
            multi_scale_threshold: DEFAULT_MULTI_SCALE_THRESHOLD,
            growth: GrowthWeights::default(),
            guides: None,
            merge: MergeConfig::default(),
            refine: RefineConfig::default(),
            parallel: true,
        }
    }
}

impl SolverConfig {
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_starts(mut self, starts: usize) -> Self {
        self.starts = starts;
        self
    }

    pub fn with_seed_count(mut self, k: usize) -> Self {
        self.seed_count = Some(k);
        self
    }

    pub fn with_dimension_samples(mut self, n: usize) -> Self {
        self.dimension_samples = n;
        self
    }

    pub fn with_profile_samples(mut self, n: usize) -> Self {
        self.profile_samples = n;
        self
    }

    pub fn with_multi_scale_threshold(mut self, threshold: f64) -> Self {
        self.multi_scale_threshold = threshold;
        self
    }

    pub fn with_growth(mut self, growth: GrowthWeights) -> Self {
        self.growth = growth;
        self
    }

    pub fn with_guides(mut self, guides: GuideConfig) -> Self {
        self.guides = Some(guides);
        self
    }

    pub fn with_merge(mut self, merge: MergeConfig) -> Self {
        self.merge = merge;
        self
    }

    pub fn with_refine(mut self, refine: RefineConfig) -> Self {
        self.refine = refine;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.starts == 0 {
            return Err(TspError::invalid_config("starts must be positive"));
        }
        if self.seed_count == Some(0) {
            return Err(TspError::invalid_config("seed_count must be positive"));
        }
        if !self.multi_scale_threshold.is_finite() || self.multi_scale_threshold <= 0.0 {
            return Err(TspError::invalid_config(format!(
                "multi_scale_threshold must be positive, got {}",
                self.multi_scale_threshold
            )));
        }
        check_weight("growth.distance", self.growth.distance)?;
        check_weight("growth.heading", self.growth.heading)?;
        if let Some(guides) = self.guides {
            check_weight("guides.weight", guides.weight)?;
            if guides.refresh_every == 0 {
                return Err(TspError::invalid_config(
                    "guides.refresh_every must be positive",
                ));
            }
        }
        check_scale("merge.dimension_scale", self.merge.dimension_scale)?;
        check_scale(
            "merge.synthesis_dimension_scale",
            self.merge.synthesis_dimension_scale,
        )?;
        check_weight("merge.boundary_weight", self.merge.boundary_weight)?;
        check_weight(
            "merge.synthesis_boundary_weight",
            self.merge.synthesis_boundary_weight,
        )?;
        self.refine.validate()
    }
}

fn check_scale(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TspError::invalid_config(format!(
            "{name} must be positive, got {value}"
        )))
    }
}

fn check_weight(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TspError::invalid_config(format!(
            "{name} must be finite and non-negative, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.strategy, Strategy::Auto);
        assert_eq!(config.seed, 42);
        assert_eq!(config.starts, 1);
        assert!(config.seed_count.is_none());
        assert!((config.multi_scale_threshold - 0.8).abs() < 1e-10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(SolverConfig::default().with_starts(0).validate().is_err());
        assert!(SolverConfig::default().with_seed_count(0).validate().is_err());
        assert!(SolverConfig::default()
            .with_multi_scale_threshold(f64::NAN)
            .validate()
            .is_err());
        assert!(SolverConfig::default()
            .with_growth(GrowthWeights {
                distance: -1.0,
                heading: 0.5,
            })
            .validate()
            .is_err());
        assert!(SolverConfig::default()
            .with_guides(GuideConfig::default().with_refresh_every(0))
            .validate()
            .is_err());
        assert!(SolverConfig::default()
            .with_merge(MergeConfig::default().with_dimension_scale(0.0))
            .validate()
            .is_err());
        assert!(SolverConfig::default()
            .with_merge(MergeConfig::default().with_synthesis_weights(1.5, -0.05))
            .validate()
            .is_err());
        assert!(SolverConfig::default()
            .with_refine(RefineConfig::default().with_tolerance(-1.0))
            .validate()
            .is_err());
    }

    #[test]
    fn test_error_names_field() {
        let err = SolverConfig::default()
            .with_merge(MergeConfig::default().with_boundary_weight(f64::INFINITY))
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("merge.boundary_weight"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SolverConfig =
            serde_json::from_str(r#"{"strategy":"synthesis","starts":3}"#).unwrap();
        assert_eq!(config.strategy, Strategy::Synthesis);
        assert_eq!(config.starts, 3);
        assert_eq!(config.seed, 42);
        assert_eq!(config.refine, RefineConfig::default());
    }
}
