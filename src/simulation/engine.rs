// src/simulation/engine.rs
use crate::core::constants::simulator_defaults;
use crate::core::{DensityMatrix, SimError, TargetState, pauli_x};
use crate::simulation::StepOutcome;
use crate::simulation::channel::{correct, dephase};
use crate::validation::validate_density_matrix;
use tracing::{debug, trace, warn};

/// Tuning of the noise model and the corrective feedback.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// `noise_strength = stress * noise_scale`; must keep the channel weight in [0, 1].
    pub noise_scale: f64,
    /// Correction fires when the protected fidelity is strictly below this.
    pub correction_threshold: f64,
    /// Weight of the target projector in the corrective pull.
    pub correction_strength: f64,
    /// Hermitize and rescale both states to unit trace at the end of each step.
    pub renormalize: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            noise_scale: simulator_defaults::NOISE_SCALE,
            correction_threshold: simulator_defaults::CORRECTION_THRESHOLD,
            correction_strength: simulator_defaults::CORRECTION_STRENGTH,
            renormalize: true,
        }
    }
}

impl SimulatorConfig {
    pub fn with_noise_scale(mut self, noise_scale: f64) -> Self {
        self.noise_scale = noise_scale;
        self
    }

    pub fn with_correction_threshold(mut self, threshold: f64) -> Self {
        self.correction_threshold = threshold;
        self
    }

    pub fn with_correction_strength(mut self, strength: f64) -> Self {
        self.correction_strength = strength;
        self
    }

    pub fn with_renormalize(mut self, renormalize: bool) -> Self {
        self.renormalize = renormalize;
        self
    }

    /// Every numeric field is a probability-like weight and must lie in [0, 1].
    pub fn validate(&self) -> Result<(), SimError> {
        for (field, value) in [
            ("noise_scale", self.noise_scale),
            ("correction_threshold", self.correction_threshold),
            ("correction_strength", self.correction_strength),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(SimError::invalid_config(field, format!("must lie in [0, 1], got {}", value)));
            }
        }
        Ok(())
    }
}

/// Tracks an unprotected `control` state and a `protected` state, both
/// starting in the target state, under the same stress-driven dephasing.
/// Only `protected` receives the threshold-triggered correction.
///
/// The simulator is a pure synchronous step function: no modes, no terminal
/// state, no I/O. Stress values come from the caller.
#[derive(Debug, Clone)]
pub struct QuantumFidelitySimulator {
    config: SimulatorConfig,
    target: TargetState,
    control: DensityMatrix,
    protected: DensityMatrix,
    correction_count: u64,
    ticks: u64,
}

impl Default for QuantumFidelitySimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl QuantumFidelitySimulator {
    /// Default configuration, target `|+>`.
    pub fn new() -> Self {
        Self::build(SimulatorConfig::default())
    }

    /// # Errors
    /// * `SimError::InvalidConfig` if `config` fails [`SimulatorConfig::validate`].
    pub fn with_config(config: SimulatorConfig) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SimulatorConfig) -> Self {
        let target = TargetState::plus();
        let initial = *target.projector();
        Self {
            config,
            target,
            control: initial,
            protected: initial,
            correction_count: 0,
            ticks: 0,
        }
    }

    /// Advances both states by one tick under the given stress level.
    ///
    /// In order: dephase both states with `p = stress * noise_scale`; read the
    /// protected fidelity; if it is below the threshold, pull the protected
    /// state toward the target and count the correction; renormalize if
    /// configured; measure fidelities and X alignments of both states.
    ///
    /// Out-of-range stress is clamped to [0, 1]; NaN is treated as 0.
    pub fn step(&mut self, stress_level: f64) -> StepOutcome {
        let stress = sanitize_stress(stress_level);
        let noise_strength = stress * self.config.noise_scale;
        self.ticks += 1;

        self.control = dephase(&self.control, noise_strength);
        self.protected = dephase(&self.protected, noise_strength);

        let pre_correction_fidelity = self.target.fidelity(&self.protected);
        let corrected = pre_correction_fidelity < self.config.correction_threshold;
        if corrected {
            self.correction_count += 1;
            self.protected = correct(&self.protected, self.target.projector(), self.config.correction_strength);
            debug!(
                tick = self.ticks,
                pre_correction_fidelity,
                total = self.correction_count,
                "correction applied"
            );
        }

        if self.config.renormalize {
            self.renormalize_states();
        }

        let x = pauli_x();
        let outcome = StepOutcome {
            fidelity_control: self.target.fidelity(&self.control),
            fidelity_protected: self.target.fidelity(&self.protected),
            corrected,
            alignment_control: self.control.expectation(&x),
            alignment_protected: self.protected.expectation(&x),
            pre_correction_fidelity,
            noise_strength,
        };
        trace!(
            tick = self.ticks,
            stress,
            fidelity_control = outcome.fidelity_control,
            fidelity_protected = outcome.fidelity_protected,
            alignment_control = outcome.alignment_control,
            alignment_protected = outcome.alignment_protected,
            "step"
        );
        outcome
    }

    fn renormalize_states(&mut self) {
        for (label, rho) in [("control", &mut self.control), ("protected", &mut self.protected)] {
            let trace_before = rho.renormalize();
            if (trace_before - 1.0).abs() > 1e-12 {
                debug!(state = label, trace_before, "renormalized drifting state");
            }
        }
    }

    /// Number of ticks on which the correction fired. Never decreases.
    pub fn correction_count(&self) -> u64 {
        self.correction_count
    }

    /// Number of `step` calls so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn control(&self) -> &DensityMatrix {
        &self.control
    }

    pub fn protected(&self) -> &DensityMatrix {
        &self.protected
    }

    pub fn target(&self) -> &TargetState {
        &self.target
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Checks trace, Hermiticity and positivity of both states.
    ///
    /// # Errors
    /// The first violated invariant, control state first.
    pub fn check_invariants(&self, tolerance: f64) -> Result<(), SimError> {
        validate_density_matrix(&self.control, Some(tolerance))?;
        validate_density_matrix(&self.protected, Some(tolerance))
    }
}

fn sanitize_stress(stress_level: f64) -> f64 {
    if stress_level.is_nan() {
        warn!("NaN stress level treated as 0");
        return 0.0;
    }
    let clamped = stress_level.clamp(0.0, 1.0);
    if clamped != stress_level {
        trace!(stress_level, clamped, "stress level clamped");
    }
    clamped
}
