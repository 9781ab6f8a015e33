//! Tour merging: stitching territory paths into one cycle.
//!
//! - [`merge_paths`] — Repeated cheapest whole-path insertion
//! - [`MergePenalty`] — Bridge cost adjustment capability
//! - [`DimensionPenalty`] — Prefer bridges through low-dimension regions
//! - [`WaveBoundaryPenalty`] — Prefer bridges where wavefronts meet

mod insertion;
mod penalty;

pub use insertion::{merge_paths, MergeConfig};
pub use penalty::{DimensionPenalty, MergePenalty, WaveBoundaryPenalty};
