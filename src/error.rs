//! Error type shared by every solver stage.
//!
//! Only structurally invalid input is fatal. Degenerate geometry (coincident
//! points, zero-length edges) is absorbed locally by epsilon-guarded
//! fallbacks, and a refiner that stops at its iteration cap reports that in
//! its [`RefineReport`](crate::local_search::RefineReport) instead of failing.

use thiserror::Error as ThisError;

/// Errors surfaced to callers of the solver.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum TspError {
    /// The point set (or a tour over it) is empty, malformed, or non-finite.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A strategy name did not match any known pipeline.
    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),
    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TspError>;

impl TspError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn unknown_strategy(name: impl Into<String>) -> Self {
        Self::UnknownStrategy(name.into())
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
