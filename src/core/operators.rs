// src/core/operators.rs

//! 2x2 complex matrix helpers and the single-qubit operators used by the model.
//!
//! A two-level system never needs more than a handful of fixed-size products,
//! so matrices are plain `[[Complex<f64>; 2]; 2]` arrays rather than a general
//! linear-algebra type.

use num_complex::Complex;
use num_traits::{One, Zero};

/// A 2x2 complex matrix, row-major.
pub type Matrix2 = [[Complex<f64>; 2]; 2];

/// The identity operator.
pub fn identity() -> Matrix2 {
    [
        [Complex::one(), Complex::zero()],
        [Complex::zero(), Complex::one()],
    ]
}

/// Pauli-X (bit flip). Used as the alignment measurement axis.
pub fn pauli_x() -> Matrix2 {
    [
        [Complex::zero(), Complex::one()],
        [Complex::one(), Complex::zero()],
    ]
}

/// Pauli-Z (phase flip). The Kraus operator of the dephasing channel.
pub fn pauli_z() -> Matrix2 {
    [
        [Complex::one(), Complex::zero()],
        [Complex::zero(), Complex::new(-1.0, 0.0)],
    ]
}

/// Matrix product `a * b`.
pub fn mat_mul(a: &Matrix2, b: &Matrix2) -> Matrix2 {
    let mut out = [[Complex::zero(); 2]; 2];
    for (row, out_row) in out.iter_mut().enumerate() {
        for (col, cell) in out_row.iter_mut().enumerate() {
            *cell = a[row][0] * b[0][col] + a[row][1] * b[1][col];
        }
    }
    out
}

/// Conjugate transpose `a†`.
pub fn dagger(a: &Matrix2) -> Matrix2 {
    [
        [a[0][0].conj(), a[1][0].conj()],
        [a[0][1].conj(), a[1][1].conj()],
    ]
}

/// Trace of a matrix.
pub fn trace(a: &Matrix2) -> Complex<f64> {
    a[0][0] + a[1][1]
}

/// Element-wise `alpha * a + beta * b`.
pub fn linear_combination(alpha: f64, a: &Matrix2, beta: f64, b: &Matrix2) -> Matrix2 {
    let mut out = [[Complex::zero(); 2]; 2];
    for row in 0..2 {
        for col in 0..2 {
            out[row][col] = a[row][col] * alpha + b[row][col] * beta;
        }
    }
    out
}
