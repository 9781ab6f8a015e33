//! Bridge cost adjustments.

use crate::distance::DistanceMatrix;
use crate::geometry::{coefficient_of_variation, DimensionMap};
use crate::partition::WaveField;

/// Adjusts the geometric insertion cost of a bridge.
///
/// `bridge` lists the points the new edges touch: two for an end insertion,
/// four for a splice.
pub trait MergePenalty {
    fn adjust(&self, cost: f64, bridge: &[usize]) -> f64;
}

/// Scales the cost by the mean local dimension of the bridge over `scale`,
/// so bridges through sparse, curve-like regions are preferred.
#[derive(Debug, Clone, Copy)]
pub struct DimensionPenalty<'a> {
    dimensions: &'a DimensionMap,
    scale: f64,
}

impl<'a> DimensionPenalty<'a> {
    pub fn new(dimensions: &'a DimensionMap, scale: f64) -> Self {
        Self { dimensions, scale }
    }
}

impl MergePenalty for DimensionPenalty<'_> {
    fn adjust(&self, cost: f64, bridge: &[usize]) -> f64 {
        if bridge.is_empty() || self.scale <= 0.0 {
            return cost;
        }
        let mean =
            bridge.iter().map(|&p| self.dimensions.get(p)).sum::<f64>() / bridge.len() as f64;
        cost * mean / self.scale
    }
}

/// Subtracts a bonus for bridges where several wavefronts meet.
///
/// Each bridge point contributes `1 / (1 + cv²)` of its arrival times
/// across all waves, where `cv` is their coefficient of variation. Low
/// variance scores high: a point reached by every front at about the same
/// time sits on a territory boundary, and a point close to one seed but far
/// from the others scores low. The sum is scaled by
/// `weight · max_distance / √n`.
///
/// Point qualities are computed once, when the penalty is built.
#[derive(Debug, Clone)]
pub struct WaveBoundaryPenalty {
    qualities: Vec<f64>,
    scale: f64,
}

impl WaveBoundaryPenalty {
    pub fn new(field: &WaveField, distances: &DistanceMatrix, weight: f64) -> Self {
        let n = distances.size();
        let waves = field.seeds().len();
        let mut times = Vec::with_capacity(waves);
        let qualities = (0..n)
            .map(|point| {
                times.clear();
                times.extend(
                    (0..waves)
                        .map(|slot| field.arrival(slot, point))
                        .filter(|t| t.is_finite()),
                );
                let cv = coefficient_of_variation(&times);
                1.0 / (1.0 + cv * cv)
            })
            .collect();
        Self {
            qualities,
            scale: weight * distances.max_distance() / (n.max(1) as f64).sqrt(),
        }
    }

    /// Boundary quality of a single point in `(0, 1]`.
    #[inline]
    pub fn quality(&self, point: usize) -> f64 {
        self.qualities[point]
    }
}

impl MergePenalty for WaveBoundaryPenalty {
    fn adjust(&self, cost: f64, bridge: &[usize]) -> f64 {
        let bonus: f64 = bridge.iter().map(|&p| self.quality(p)).sum();
        cost - self.scale * bonus
    }
}
