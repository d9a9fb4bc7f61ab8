//! Error types for rupture-core operations.

use std::fmt;
use thiserror::Error;

/// Result type alias using the rupture-core Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during rupture-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed material database file.
    #[error("parse error: {0}")]
    Parse(String),

    /// Physically invalid parameter combination (negative modulus,
    /// super-shear rupture speed, non-physical Poisson ratio, ...).
    #[error("domain error: {0}")]
    Domain(String),

    /// Evaluation requested at a point where the closed-form field is
    /// undefined (the rupture tip).
    #[error("singular evaluation: {0}")]
    Singularity(String),

    /// I/O errors (material file operations).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Non-fatal numerical diagnostics.
///
/// Warnings are collected during evaluation and returned to the caller
/// alongside results; they are never discarded internally. A warning does not
/// invalidate the accompanying values, but flags reduced confidence.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericalWarning {
    /// The Rayleigh-function denominator |D| fell below the configured
    /// tolerance; stress amplitudes are inflated near the Rayleigh speed.
    NearRayleigh { denominator: f64, tolerance: f64 },

    /// A material block overwrote an earlier block with the same name
    /// (last-wins).
    DuplicateMaterial { name: String },

    /// A field point lies exactly on the branch cut of the cohesive
    /// potential (on-fault, behind the tip); the value is the one-sided
    /// limit from above the fault.
    OnBranchCut { x: f64, y: f64 },
}

impl fmt::Display for NumericalWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericalWarning::NearRayleigh {
                denominator,
                tolerance,
            } => write!(
                f,
                "Rayleigh denominator |D| = {:.3e} below tolerance {:.3e}; \
                 rupture speed is close to the Rayleigh speed",
                denominator.abs(),
                tolerance
            ),
            NumericalWarning::DuplicateMaterial { name } => write!(
                f,
                "duplicate material '{}' overwrites an earlier block (last-wins)",
                name
            ),
            NumericalWarning::OnBranchCut { x, y } => write!(
                f,
                "field point ({:.6e}, {:.6e}) lies on the branch cut; \
                 value is the limit from y -> 0+",
                x, y
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Domain("rupture speed exceeds shear wave speed".into());
        assert!(err.to_string().contains("domain error"));
    }

    #[test]
    fn test_warning_display() {
        let w = NumericalWarning::NearRayleigh {
            denominator: 5e-4,
            tolerance: 1e-3,
        };
        assert!(w.to_string().contains("Rayleigh"));

        let w = NumericalWarning::DuplicateMaterial {
            name: "moving-block".into(),
        };
        assert!(w.to_string().contains("moving-block"));
    }
}
