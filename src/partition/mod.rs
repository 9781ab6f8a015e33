//! Territory partitioning: a disjoint cover of the point set by seeds.
//!
//! - [`partition`] — Argmin assignment under a [`PartitionWeighting`]
//! - [`NearestSeed`] — Euclidean distance
//! - [`DimensionWeighted`] — Distance scaled by the seed's local dimension
//! - [`WaveArrival`] — First wave arrival from a [`WaveField`]
//! - [`WaveField`] — Per-seed arrival times with turning penalty

mod assign;
mod wavefront;
mod weighting;

pub use assign::partition;
pub use wavefront::WaveField;
pub use weighting::{DimensionWeighted, NearestSeed, PartitionWeighting, WaveArrival};
