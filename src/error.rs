//! Error types for configuration loading and simulation health checks.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while building or loading [`SimulationParameters`](crate::SimulationParameters).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field lies outside its slider domain.
    #[error("parameter {name} = {value} out of range [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A field is NaN or infinite.
    #[error("parameter {name} is not finite")]
    NonFinite { name: &'static str },

    /// The parameter file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The parameter file is not valid JSON for the parameter set.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub const fn out_of_range(name: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange { name, value, min, max }
    }

    #[must_use]
    pub const fn non_finite(name: &'static str) -> Self {
        Self::NonFinite { name }
    }
}

/// Which of the two trajectories a report refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trajectory {
    Reference,
    Perturbed,
}

impl std::fmt::Display for Trajectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reference => f.write_str("reference"),
            Self::Perturbed => f.write_str("perturbed"),
        }
    }
}

/// Caller-side health report; the stepping path itself never fails.
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    /// A trajectory hit the equations-of-motion singularity; reset required.
    #[error("{trajectory} trajectory became non-finite, reset required")]
    NonFinite { trajectory: Trajectory },
}

/// Result type for configuration operations.
pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
