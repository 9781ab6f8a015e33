//! Local search refinement of complete tours.
//!
//! - [`two_opt`] — Cyclic 2-opt edge exchange and windowed 2-opt for open paths
//! - [`three_opt`] — Bounded 3-opt segment reconnection
//! - [`refine`] — 2-opt / 3-opt escalation driver with pass caps and time budget

mod refine;
mod three_opt;
mod two_opt;

pub use refine::{refine, RefineConfig, RefineReport, Termination};
pub use three_opt::{three_opt_improve, three_opt_pass};
pub use two_opt::{two_opt_improve, two_opt_pass, window_two_opt, Improvement, DEFAULT_TOLERANCE};
