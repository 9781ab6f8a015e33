//! Partition weighting rules.

use super::wavefront::WaveField;
use crate::distance::DistanceMatrix;
use crate::geometry::{DimensionMap, EPSILON};

/// Cost of assigning a point to a seed; the cheapest seed owns the point.
pub trait PartitionWeighting {
    /// Assignment cost of `point` to the seed `seed` held in `slot`.
    fn cost(&self, point: usize, slot: usize, seed: usize) -> f64;
}

/// Plain Euclidean distance to the seed.
#[derive(Debug, Clone, Copy)]
pub struct NearestSeed<'a> {
    distances: &'a DistanceMatrix,
}

impl<'a> NearestSeed<'a> {
    pub fn new(distances: &'a DistanceMatrix) -> Self {
        Self { distances }
    }
}

impl PartitionWeighting for NearestSeed<'_> {
    fn cost(&self, point: usize, _slot: usize, seed: usize) -> f64 {
        self.distances.get(point, seed)
    }
}

/// Distance divided by `dim(seed) / mean_dim + 0.5`, so seeds in
/// area-filling regions pull harder.
#[derive(Debug, Clone, Copy)]
pub struct DimensionWeighted<'a> {
    distances: &'a DistanceMatrix,
    dimensions: &'a DimensionMap,
    mean: f64,
}

impl<'a> DimensionWeighted<'a> {
    pub fn new(distances: &'a DistanceMatrix, dimensions: &'a DimensionMap) -> Self {
        Self {
            distances,
            dimensions,
            mean: dimensions.mean(),
        }
    }
}

impl PartitionWeighting for DimensionWeighted<'_> {
    fn cost(&self, point: usize, _slot: usize, seed: usize) -> f64 {
        let pull = self.dimensions.get(seed) / (self.mean + EPSILON);
        self.distances.get(point, seed) / (pull + 0.5)
    }
}

/// First wave arrival, optionally divided by the dimension affinity
/// `compatibility(seed, point) + 0.5`.
#[derive(Debug, Clone, Copy)]
pub struct WaveArrival<'a> {
    field: &'a WaveField,
    affinity: Option<&'a DimensionMap>,
}

impl<'a> WaveArrival<'a> {
    pub fn new(field: &'a WaveField) -> Self {
        Self {
            field,
            affinity: None,
        }
    }

    pub fn with_affinity(mut self, dimensions: &'a DimensionMap) -> Self {
        self.affinity = Some(dimensions);
        self
    }
}

impl PartitionWeighting for WaveArrival<'_> {
    fn cost(&self, point: usize, slot: usize, seed: usize) -> f64 {
        let arrival = self.field.arrival(slot, point);
        match self.affinity {
            Some(dims) => arrival / (dims.compatibility(seed, point) + 0.5),
            None => arrival,
        }
    }
}
