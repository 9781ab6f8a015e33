//! # u-tsp
//!
//! Heuristic solver for the Euclidean traveling salesman problem built on
//! territorial growth: pick seed hot spots, split the points among them,
//! grow a path inside each territory, stitch the paths into one cycle, and
//! polish it with 2-opt / 3-opt.
//!
//! ```
//! use u_tsp::{solve, tour_length, Strategy};
//!
//! let points: Vec<(f64, f64)> = (0..40)
//!     .map(|i| {
//!         let a = i as f64 * std::f64::consts::TAU / 40.0;
//!         (a.cos(), a.sin())
//!     })
//!     .collect();
//! let tour = solve(&points, Strategy::Auto).unwrap();
//! assert_eq!(tour.len(), 40);
//! assert!(tour_length(&points, &tour) < 6.3);
//! ```
//!
//! ## Modules
//!
//! - [`models`] — Points, tour helpers, territory maps
//! - [`distance`] — Dense Euclidean distance matrix
//! - [`geometry`] — Angles, density, local fractal dimension
//! - [`seeding`] — Seed selection (density, dimension, coverage scorers)
//! - [`partition`] — Territory assignment (nearest, dimension-weighted, wavefront)
//! - [`constructive`] — Per-territory growth and the nearest-neighbor baseline
//! - [`merge`] — Cheapest whole-path insertion with bridge penalties
//! - [`local_search`] — 2-opt, bounded 3-opt, refinement driver
//! - [`strategy`] — Strategy names, dataset profiling, pipeline assembly
//! - [`solver`] — Configuration, multi-start orchestration, entry points
//!
//! ## Features
//!
//! - `parallel` — run multi-start constructions and per-territory growth
//!   on the rayon thread pool.

pub mod constructive;
pub mod distance;
pub mod error;
pub mod geometry;
pub mod local_search;
pub mod merge;
pub mod models;
mod parallel;
pub mod partition;
pub mod seeding;
pub mod solver;
pub mod strategy;

pub use error::{Result, TspError};
pub use solver::{checked_tour_length, solve, solve_with_config, tour_length, Solution, SolverConfig};
pub use strategy::Strategy;
