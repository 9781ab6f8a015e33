//! Solver entry points.
//!
//! A solve runs the construct → partition → grow → merge → refine pipeline:
//!
//! 1. Resolve [`Strategy::Auto`](crate::strategy::Strategy::Auto) from a
//!    dataset profile.
//! 2. Build the distance matrix and, for dimension-aware strategies, the
//!    local dimension map.
//! 3. Run `starts` constructions, each anchored at a golden-angle point,
//!    and refine each with 2-opt / 3-opt.
//! 4. Keep the shortest tour; ties keep the earlier run.
//!
//! Inputs of at most three points return the identity order unchanged.

mod config;
mod runner;

pub use config::SolverConfig;
pub use runner::{checked_tour_length, solve, solve_points, solve_with_config, tour_length, Solution};
