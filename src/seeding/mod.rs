//! Seed selection: choosing the hot spots that anchor growth regions.
//!
//! - [`SeedScorer`] — Quality and spread capability
//! - [`DensityScorer`] — Median-radius neighbor counts
//! - [`DimensionScorer`] — Local fractal dimension
//! - [`CoverageScorer`] — Dimension quality with capture-share spread
//! - [`select_seeds`] — Greedy golden-ratio weighted selection

mod scorer;
mod select;

pub use scorer::{CoverageScorer, DensityScorer, DimensionScorer, SeedScorer, SelectionState};
pub use select::{default_seed_count, golden_angle_anchor, scaled_seed_count, select_seeds};
