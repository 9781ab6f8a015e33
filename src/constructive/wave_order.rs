//! Growth in wave arrival order.

use super::growth::GrowthOrder;
use crate::distance::DistanceMatrix;
use crate::local_search::window_two_opt;
use crate::partition::WaveField;

/// Orders a territory by the arrival time of its seed's wave, then smooths
/// short-range crossings with a windowed 2-opt over the open path.
#[derive(Debug, Clone)]
pub struct WaveOrder<'a> {
    field: &'a WaveField,
    distances: &'a DistanceMatrix,
    window: usize,
    passes: usize,
}

impl<'a> WaveOrder<'a> {
    pub fn new(field: &'a WaveField, distances: &'a DistanceMatrix) -> Self {
        Self {
            field,
            distances,
            window: 5,
            passes: 3,
        }
    }

    /// Sets the smoothing window (in path positions) and pass count.
    /// A zero window disables smoothing.
    pub fn with_smoothing(mut self, window: usize, passes: usize) -> Self {
        self.window = window;
        self.passes = passes;
        self
    }
}

impl GrowthOrder for WaveOrder<'_> {
    fn grow(&self, territory: &[usize], seed: usize) -> Vec<usize> {
        if territory.is_empty() {
            return Vec::new();
        }
        let slot = self.field.seeds().iter().position(|&s| s == seed);
        let time = |p: usize| match slot {
            Some(slot) => self.field.arrival(slot, p),
            None => self.distances.get(seed, p),
        };

        let mut path = territory.to_vec();
        path.sort_by(|&a, &b| {
            (b == seed)
                .cmp(&(a == seed))
                .then_with(|| time(a).total_cmp(&time(b)))
                .then_with(|| a.cmp(&b))
        });

        if path.len() > 3 && self.window > 0 {
            window_two_opt(&mut path, self.distances, self.window, self.passes);
        }
        path
    }
}
