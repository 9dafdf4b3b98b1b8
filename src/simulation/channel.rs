// src/simulation/channel.rs

//! The two state maps the simulator applies each tick.

use crate::core::{DensityMatrix, pauli_z};

/// Phase-flip channel `rho' = (1 - p) * rho + p * Z rho Z`.
///
/// Completely positive and trace preserving for `p` in [0, 1]. On the
/// computational basis it leaves populations alone and scales coherences by
/// `1 - 2p`.
pub fn dephase(rho: &DensityMatrix, noise_strength: f64) -> DensityMatrix {
    let flipped = rho.conjugated_by(&pauli_z());
    rho.mix(&flipped, noise_strength)
}

/// Corrective pull `rho' = (1 - s) * rho + s * P_target`.
///
/// A convex combination of two density matrices, so the result is one too.
pub fn correct(rho: &DensityMatrix, target_projector: &DensityMatrix, strength: f64) -> DensityMatrix {
    rho.mix(target_projector, strength)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TargetState;

    #[test]
    fn dephasing_scales_coherence_by_one_minus_two_p() {
        let rho = *TargetState::plus().projector();
        for p in [0.0, 0.05, 0.15, 0.5, 1.0] {
            let out = dephase(&rho, p);
            let m = out.elements();
            assert!((m[0][1].re - 0.5 * (1.0 - 2.0 * p)).abs() < 1e-12);
            assert!((m[0][0].re - 0.5).abs() < 1e-12);
            assert!((m[1][1].re - 0.5).abs() < 1e-12);
            assert!((out.trace() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn zero_noise_is_exact_identity() {
        let rho = *TargetState::plus().projector();
        assert_eq!(dephase(&rho, 0.0), rho);
    }

    #[test]
    fn correction_moves_toward_target() {
        let target = TargetState::plus();
        let damaged = dephase(target.projector(), 0.15);
        let before = target.fidelity(&damaged);
        let repaired = correct(&damaged, target.projector(), 0.2);
        let after = target.fidelity(&repaired);
        assert!(after > before);
        // F' = 0.8 F + 0.2
        assert!((after - (0.8 * before + 0.2)).abs() < 1e-12);
    }
}
