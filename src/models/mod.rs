//! Domain model types for Euclidean tour problems.
//!
//! Provides the core data: immutable planar points, tours as cyclic index
//! permutations, and territory maps that split a point set among seeds.

mod point;
mod territory;
mod tour;

pub use point::{centroid, points_from_coords, Point};
pub use territory::TerritoryMap;
pub use tour::{cycle_distance, is_permutation, path_distance, tour_length};
