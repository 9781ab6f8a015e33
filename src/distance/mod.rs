//! Pairwise distances.
//!
//! Provides a dense Euclidean distance matrix shared by every solver stage.

mod matrix;

pub use matrix::DistanceMatrix;
