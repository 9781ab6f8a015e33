//! Strategy selection and pipeline assembly.
//!
//! - [`Strategy`] — Named seed / partition / growth combinations
//! - [`DatasetProfile`] — Multi-scale density score of a point sample
//! - [`select_strategy`] — Resolves [`Strategy::Auto`]
//! - [`Pipeline`] — Runs one construction for a concrete strategy

mod kind;
mod pipeline;
mod profile;

pub use kind::Strategy;
pub use pipeline::{Construction, Pipeline};
pub use profile::{
    select_strategy, DatasetProfile, DEFAULT_MULTI_SCALE_THRESHOLD, PROFILE_RADIUS_FRACTIONS,
};
