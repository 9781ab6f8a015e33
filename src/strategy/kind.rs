//! Strategy names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TspError;

/// Which seed / partition / growth combination to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Profile the dataset and pick [`Strategy::Adaptive`] or
    /// [`Strategy::DimensionScaling`].
    #[default]
    Auto,
    /// Density seeds, nearest-seed territories, heading-greedy growth.
    Adaptive,
    /// Dimension seeds, dimension-weighted territories, dimension-scaled
    /// growth, dimension-penalized merge.
    DimensionScaling,
    /// Density seeds, wave territories, arrival-order growth,
    /// boundary-aware merge.
    Wavefront,
    /// Coverage seeds, dimension-scaled waves with dimension affinity,
    /// arrival-order growth, merge with both penalties.
    Synthesis,
}

impl Strategy {
    /// Every concrete pipeline, excluding [`Strategy::Auto`].
    pub const CONCRETE: [Strategy; 4] = [
        Strategy::Adaptive,
        Strategy::DimensionScaling,
        Strategy::Wavefront,
        Strategy::Synthesis,
    ];

    /// Whether the pipeline reads the local dimension map.
    pub fn uses_dimensions(self) -> bool {
        matches!(self, Strategy::DimensionScaling | Strategy::Synthesis)
    }

    /// Whether the pipeline expands wavefronts.
    pub fn uses_waves(self) -> bool {
        matches!(self, Strategy::Wavefront | Strategy::Synthesis)
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Auto => "auto",
            Strategy::Adaptive => "adaptive",
            Strategy::DimensionScaling => "dimension-scaling",
            Strategy::Wavefront => "wavefront",
            Strategy::Synthesis => "synthesis",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = TspError;

    /// Parses a strategy name, ignoring ASCII case. `_` and `-` are
    /// interchangeable, and `scaling` is accepted for `dimension-scaling`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "auto" => Ok(Strategy::Auto),
            "adaptive" => Ok(Strategy::Adaptive),
            "dimension-scaling" | "dimensionscaling" | "scaling" => {
                Ok(Strategy::DimensionScaling)
            }
            "wavefront" | "wave" => Ok(Strategy::Wavefront),
            "synthesis" => Ok(Strategy::Synthesis),
            _ => Err(TspError::unknown_strategy(s)),
        }
    }
}
