// src/validation/mod.rs

//! Provides functions to validate `DensityMatrix` invariants.
//!
//! None of these run implicitly during a step. Numerical drift is not a
//! runtime failure of the simulator; these checks exist for tests and for
//! callers that want to audit long runs (see
//! [`FidelityBench::run_checked`](crate::simulation::FidelityBench::run_checked)).

use crate::core::{DEFAULT_TOLERANCE, DensityMatrix, SimError};

/// Checks that the trace of `rho` equals 1 within tolerance.
///
/// # Arguments
/// * `rho` - The `DensityMatrix` to check.
/// * `tolerance` - Allowed deviation from 1.0. Defaults to `DEFAULT_TOLERANCE`.
///
/// # Returns
/// * `Ok(())` if the trace is within tolerance.
/// * `Err(SimError::TraceViolation)` otherwise.
pub fn check_trace(rho: &DensityMatrix, tolerance: Option<f64>) -> Result<(), SimError> {
    let tolerance = tolerance.unwrap_or(DEFAULT_TOLERANCE);
    let trace = rho.trace();
    // Written so that a NaN trace fails the check.
    if (trace - 1.0).abs() <= tolerance {
        Ok(())
    } else {
        Err(SimError::TraceViolation { trace, tolerance })
    }
}

/// Checks that `rho` equals its conjugate transpose within tolerance.
pub fn check_hermiticity(rho: &DensityMatrix, tolerance: Option<f64>) -> Result<(), SimError> {
    let tolerance = tolerance.unwrap_or(DEFAULT_TOLERANCE);
    let deviation = rho.hermiticity_deviation();
    if deviation <= tolerance {
        Ok(())
    } else {
        Err(SimError::HermiticityViolation { deviation, tolerance })
    }
}

/// Checks that no eigenvalue of `rho` lies below `-tolerance`.
pub fn check_positivity(rho: &DensityMatrix, tolerance: Option<f64>) -> Result<(), SimError> {
    let tolerance = tolerance.unwrap_or(DEFAULT_TOLERANCE);
    let [min_eigenvalue, _] = rho.eigenvalues();
    if min_eigenvalue >= -tolerance {
        Ok(())
    } else {
        Err(SimError::PositivityViolation { min_eigenvalue, tolerance })
    }
}

/// Runs every density-matrix check: trace, then Hermiticity, then positivity.
/// The eigenvalue test is only meaningful for a Hermitian matrix, hence the order.
pub fn validate_density_matrix(rho: &DensityMatrix, tolerance: Option<f64>) -> Result<(), SimError> {
    check_trace(rho, tolerance)?;
    check_hermiticity(rho, tolerance)?;
    check_positivity(rho, tolerance)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TargetState;
    use num_complex::Complex;

    fn raw(elements: [[(f64, f64); 2]; 2]) -> DensityMatrix {
        DensityMatrix::from_elements(elements.map(|row| row.map(|(re, im)| Complex::new(re, im))))
    }

    #[test]
    fn target_projector_is_valid() {
        assert!(validate_density_matrix(TargetState::plus().projector(), None).is_ok());
    }

    #[test]
    fn scaled_state_fails_trace() {
        let rho = raw([[(0.6, 0.0), (0.5, 0.0)], [(0.5, 0.0), (0.6, 0.0)]]);
        assert!(matches!(check_trace(&rho, None), Err(SimError::TraceViolation { .. })));
        assert!(check_trace(&rho, Some(0.5)).is_ok());
    }

    #[test]
    fn asymmetric_coherence_fails_hermiticity() {
        let rho = raw([[(0.5, 0.0), (0.4, 0.1)], [(0.4, 0.1), (0.5, 0.0)]]);
        assert!(check_trace(&rho, None).is_ok());
        let err = check_hermiticity(&rho, None).unwrap_err();
        match err {
            SimError::HermiticityViolation { deviation, .. } => assert!((deviation - 0.2).abs() < 1e-12),
            other => panic!("unexpected error {}", other),
        }
    }

    #[test]
    fn oversized_coherence_fails_positivity() {
        // Eigenvalues 0.5 +- 0.7
        let rho = raw([[(0.5, 0.0), (0.7, 0.0)], [(0.7, 0.0), (0.5, 0.0)]]);
        assert!(check_trace(&rho, None).is_ok());
        assert!(check_hermiticity(&rho, None).is_ok());
        match validate_density_matrix(&rho, None) {
            Err(SimError::PositivityViolation { min_eigenvalue, .. }) => {
                assert!((min_eigenvalue + 0.2).abs() < 1e-12)
            }
            other => panic!("expected positivity violation, got {:?}", other),
        }
    }

    #[test]
    fn nan_trace_is_rejected() {
        let rho = raw([[(f64::NAN, 0.0), (0.0, 0.0)], [(0.0, 0.0), (0.5, 0.0)]]);
        assert!(check_trace(&rho, None).is_err());
    }
}
