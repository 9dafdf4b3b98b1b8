//! Error handling logic

use std::fmt;

/// Error types raised by configuration checks and density-matrix validation.
///
/// The stepping operations themselves are total: `next_stress` and `step`
/// never fail. Errors only surface when a caller builds a component from an
/// invalid configuration or explicitly asks for an invariant check.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// A configuration field holds a value the model cannot run with.
    InvalidConfig {
        /// Name of the offending field
        field: &'static str,
        /// InvalidConfig failure message
        message: String,
    },

    /// The trace of a density matrix drifted away from 1.
    TraceViolation {
        /// Observed (real) trace
        trace: f64,
        /// Allowed deviation from 1.0
        tolerance: f64,
    },

    /// A density matrix is no longer equal to its conjugate transpose.
    HermiticityViolation {
        /// Largest element-wise deviation `|rho_ij - conj(rho_ji)|`
        deviation: f64,
        /// Allowed deviation
        tolerance: f64,
    },

    /// A density matrix acquired an eigenvalue below zero.
    PositivityViolation {
        /// Smallest eigenvalue found
        min_eigenvalue: f64,
        /// How far below zero an eigenvalue may sit before it counts
        tolerance: f64,
    },
}

impl SimError {
    pub(crate) fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        SimError::InvalidConfig { field, message: message.into() }
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidConfig { field, message } => {
                write!(f, "Invalid Configuration ({}): {}", field, message)
            }
            SimError::TraceViolation { trace, tolerance } => {
                write!(f, "Trace Violation: trace = {} (deviation > {})", trace, tolerance)
            }
            SimError::HermiticityViolation { deviation, tolerance } => {
                write!(f, "Hermiticity Violation: deviation {:.3e} > {:.3e}", deviation, tolerance)
            }
            SimError::PositivityViolation { min_eigenvalue, tolerance } => {
                write!(f, "Positivity Violation: eigenvalue {:.3e} < -{:.3e}", min_eigenvalue, tolerance)
            }
        }
    }
}

impl std::error::Error for SimError {}
