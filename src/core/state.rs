// src/core/state.rs

use super::operators::{self, Matrix2};
use num_complex::Complex;
use num_traits::Zero;
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

/// Trace drift below this is treated as rounding noise by `renormalize`.
const RESCALE_EPSILON: f64 = 4.0 * f64::EPSILON;

/// A mixed state of a single two-level system.
///
/// Valid density matrices are Hermitian, have unit trace and no negative
/// eigenvalues. Construction from a normalized pure state satisfies all three
/// exactly; the channel and correction maps applied by the simulator preserve
/// them analytically, so only floating-point drift can break them.
/// See [`crate::validation`] for the checks.
#[derive(Debug, Clone, Copy, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct DensityMatrix {
    elements: Matrix2,
}

impl DensityMatrix {
    /// Builds `|psi><psi|` from a pure state's amplitudes.
    /// The amplitudes are taken as given; normalize them first.
    pub fn from_pure(amplitudes: &[Complex<f64>; 2]) -> Self {
        let mut elements = [[Complex::zero(); 2]; 2];
        for (row, a) in amplitudes.iter().enumerate() {
            for (col, b) in amplitudes.iter().enumerate() {
                elements[row][col] = a * b.conj();
            }
        }
        Self { elements }
    }

    /// Wraps raw matrix elements without checking any invariant.
    pub(crate) fn from_elements(elements: Matrix2) -> Self {
        Self { elements }
    }

    /// Read-only access to the matrix elements.
    pub fn elements(&self) -> &Matrix2 {
        &self.elements
    }

    /// Real part of the trace. The imaginary part of a Hermitian trace is zero.
    pub fn trace(&self) -> f64 {
        operators::trace(&self.elements).re
    }

    /// Expectation value `Tr(op * rho)` of a Hermitian observable.
    pub fn expectation(&self, op: &Matrix2) -> f64 {
        operators::trace(&operators::mat_mul(op, &self.elements)).re
    }

    /// Conjugation `op * rho * op†`.
    pub fn conjugated_by(&self, op: &Matrix2) -> Self {
        let left = operators::mat_mul(op, &self.elements);
        Self::from_elements(operators::mat_mul(&left, &operators::dagger(op)))
    }

    /// Convex mixture `(1 - weight) * self + weight * other`.
    /// Stays a valid density matrix for any `weight` in [0, 1].
    pub fn mix(&self, other: &DensityMatrix, weight: f64) -> Self {
        Self::from_elements(operators::linear_combination(
            1.0 - weight,
            &self.elements,
            weight,
            &other.elements,
        ))
    }

    /// Largest element-wise deviation from Hermiticity, `max |rho_ij - conj(rho_ji)|`.
    pub fn hermiticity_deviation(&self) -> f64 {
        let m = &self.elements;
        let off = (m[0][1] - m[1][0].conj()).norm();
        let d0 = m[0][0].im.abs() * 2.0;
        let d1 = m[1][1].im.abs() * 2.0;
        off.max(d0).max(d1)
    }

    /// Eigenvalues in ascending order, computed in closed form for the
    /// Hermitian part of the matrix.
    pub fn eigenvalues(&self) -> [f64; 2] {
        let m = &self.elements;
        let a = m[0][0].re;
        let d = m[1][1].re;
        let b = (m[0][1] + m[1][0].conj()) * 0.5;
        let mean = 0.5 * (a + d);
        let radius = (0.25 * (a - d) * (a - d) + b.norm_sqr()).sqrt();
        [mean - radius, mean + radius]
    }

    /// Purity `Tr(rho^2)`: 1 for pure states, 1/2 for the maximally mixed state.
    pub fn purity(&self) -> f64 {
        operators::trace(&operators::mat_mul(&self.elements, &self.elements)).re
    }

    /// Bloch vector `(<X>, <Y>, <Z>)`.
    pub fn bloch_vector(&self) -> [f64; 3] {
        let m = &self.elements;
        [
            2.0 * m[0][1].re,
            -2.0 * m[0][1].im,
            m[0][0].re - m[1][1].re,
        ]
    }

    /// Symmetrizes the matrix and rescales it to unit trace.
    ///
    /// Returns the trace observed before rescaling so callers can report drift.
    /// Traces within a few ulps of 1 are not rescaled, so a state that is not
    /// evolving stays bit-for-bit fixed. A matrix whose trace is not a positive
    /// finite number is left alone.
    pub fn renormalize(&mut self) -> f64 {
        let m = &mut self.elements;
        let off = (m[0][1] + m[1][0].conj()) * 0.5;
        m[0][1] = off;
        m[1][0] = off.conj();
        m[0][0] = Complex::new(m[0][0].re, 0.0);
        m[1][1] = Complex::new(m[1][1].re, 0.0);

        let tr = m[0][0].re + m[1][1].re;
        if tr.is_finite() && tr > 0.0 && (tr - 1.0).abs() > RESCALE_EPSILON {
            for cell in m.iter_mut().flatten() {
                *cell /= tr;
            }
        }
        tr
    }
}

impl fmt::Display for DensityMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.elements;
        write!(
            f,
            "Rho[[{:.4}, {:.4}], [{:.4}, {:.4}]]",
            m[0][0], m[0][1], m[1][0], m[1][1]
        )
    }
}

/// The fixed pure state the simulator measures fidelity against.
///
/// Fidelity against a pure target reduces to the expectation value of its
/// projector, so the projector is computed once and kept alongside the
/// amplitudes.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetState {
    amplitudes: [Complex<f64>; 2],
    projector: DensityMatrix,
}

impl TargetState {
    /// The equal superposition `|+> = (|0> + |1>) / sqrt(2)`.
    pub fn plus() -> Self {
        let amp = Complex::new(FRAC_1_SQRT_2, 0.0);
        Self::from_amplitudes([amp, amp])
    }

    /// Builds a target from normalized amplitudes.
    pub fn from_amplitudes(amplitudes: [Complex<f64>; 2]) -> Self {
        let projector = DensityMatrix::from_pure(&amplitudes);
        Self { amplitudes, projector }
    }

    pub fn amplitudes(&self) -> &[Complex<f64>; 2] {
        &self.amplitudes
    }

    /// `|psi><psi|`, which doubles as the target density matrix.
    pub fn projector(&self) -> &DensityMatrix {
        &self.projector
    }

    /// `Tr(P_target * rho)`, in [0, 1] for any valid `rho`.
    pub fn fidelity(&self, rho: &DensityMatrix) -> f64 {
        rho.expectation(self.projector.elements())
    }
}

impl Default for TargetState {
    fn default() -> Self {
        Self::plus()
    }
}
