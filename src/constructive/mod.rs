//! Tour construction: growing open paths inside territories.
//!
//! - [`GrowthOrder`] — Capability trait for per-territory growth
//! - [`HeadingGreedy`] — Inverse distance plus heading smoothness, with
//!   optional dimension scaling and guide circles, O(m²)
//! - [`WaveOrder`] — Wave arrival order with windowed 2-opt smoothing, O(m log m)
//! - [`nearest_neighbor_tour`] — Full-tour nearest-neighbor baseline, O(n²)

mod growth;
mod guides;
mod nearest_neighbor;
mod wave_order;

pub use growth::{GrowthOrder, GrowthWeights, HeadingGreedy};
pub use guides::{GuideCircle, GuideConfig, GuideSnapshot};
pub use nearest_neighbor::nearest_neighbor_tour;
pub use wave_order::WaveOrder;
