//! Default model constants.

/// Stress signal defaults.
pub mod stress_defaults {
    /// Advance of the internal clock per `next_stress` call.
    pub const TIME_INCREMENT: f64 = 0.05;
    /// Amplitude of the `sin(t)` component of the bias.
    pub const SINE_AMPLITUDE: f64 = 0.3;
    /// Amplitude of the `cos(f * t)` component of the bias.
    pub const COSINE_AMPLITUDE: f64 = 0.2;
    /// Frequency multiplier `f` of the cosine component.
    pub const COSINE_FREQUENCY: f64 = 0.5;
    /// Weight of the quasi-periodic bias in the raw stress sum.
    pub const BIAS_WEIGHT: f64 = 0.1;
    /// Constant offset of the raw stress sum.
    pub const BASELINE: f64 = 0.3;
    /// Jitter is drawn uniformly from `[-JITTER_AMPLITUDE, JITTER_AMPLITUDE)`.
    pub const JITTER_AMPLITUDE: f64 = 0.1;
    /// Per-call probability that a stress event fires.
    pub const EVENT_PROBABILITY: f64 = 0.02;
    /// Linear decay of an in-progress stress event per call.
    pub const EVENT_DECAY: f64 = 0.02;
}

/// Simulator defaults.
pub mod simulator_defaults {
    /// `noise_strength = stress * NOISE_SCALE`
    pub const NOISE_SCALE: f64 = 0.15;
    /// Correction fires when the protected fidelity drops strictly below this.
    pub const CORRECTION_THRESHOLD: f64 = 0.90;
    /// Weight of the target projector in the corrective convex pull.
    pub const CORRECTION_STRENGTH: f64 = 0.2;
}

/// Tolerance used by invariant checks unless the caller supplies one.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Number of ticks retained by a default `TickHistory` (the plotting window).
pub const DEFAULT_HISTORY_CAPACITY: usize = 400;
