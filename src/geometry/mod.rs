//! Geometry kernel: angles, local density, and local fractal dimension.
//!
//! - [`angle`] — Polar angles and heading-smoothness scores
//! - [`crossing`] — Segment crossings and sampled crossing hot spots
//! - [`density`] — Neighbor counts and multi-scale variation
//! - [`dimension`] — Log-log fractal dimension estimate and interpolated map
//!
//! All functions are pure over an immutable point set and distance matrix.
//!
//! # Golden-ratio weights
//!
//! Many scores in this crate combine two competing terms with the
//! complementary weights `φ-1 ≈ 0.618` and `2-φ ≈ 0.382`, which sum to one.

mod angle;
mod crossing;
mod density;
mod dimension;

pub use angle::{angle_about, angular_difference, heading_alignment, turn_cosine};
pub use crossing::{cluster_hot_spots, sampled_crossings, segment_crossing};
pub use density::{coefficient_of_variation, density_counts, neighbor_count};
pub use dimension::{
    dimension_radii, local_fractal_dimension, DimensionMap, DEFAULT_DIMENSION,
    DIMENSION_RADIUS_FRACTIONS,
};

/// The golden ratio φ.
pub const PHI: f64 = 1.618_033_988_749_895;

/// `φ - 1`, the major golden weight.
pub const PHI_MAJOR: f64 = PHI - 1.0;

/// `2 - φ`, the minor golden weight.
pub const PHI_MINOR: f64 = 2.0 - PHI;

/// The golden angle `π(3 - √5)` in radians.
pub const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Guard for divisions by lengths and norms.
pub const EPSILON: f64 = 1e-10;
