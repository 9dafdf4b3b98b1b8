// src/stress/generator.rs

use crate::core::SimError;
use crate::core::constants::stress_defaults;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Parameters of the simulated stress signal.
///
/// One call to [`StressSignalGenerator::next_stress`] computes
///
/// ```text
/// t     += time_increment
/// bias   = sine_amplitude * sin(t) + cosine_amplitude * cos(cosine_frequency * t)
/// raw    = baseline + bias_weight * bias + stress_phase + jitter
/// stress = clamp(raw, 0, 1)
/// ```
///
/// where `jitter` is uniform in `[-jitter_amplitude, jitter_amplitude)` and
/// `stress_phase` is the residual of the latest stress event.
#[derive(Debug, Clone, PartialEq)]
pub struct StressConfig {
    pub time_increment: f64,
    pub sine_amplitude: f64,
    pub cosine_amplitude: f64,
    pub cosine_frequency: f64,
    pub bias_weight: f64,
    pub baseline: f64,
    pub jitter_amplitude: f64,
    /// Per-call chance that a stress event fires and resets the phase to 1.
    pub event_probability: f64,
    /// Linear decay of the phase per call while it is positive.
    pub event_decay: f64,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            time_increment: stress_defaults::TIME_INCREMENT,
            sine_amplitude: stress_defaults::SINE_AMPLITUDE,
            cosine_amplitude: stress_defaults::COSINE_AMPLITUDE,
            cosine_frequency: stress_defaults::COSINE_FREQUENCY,
            bias_weight: stress_defaults::BIAS_WEIGHT,
            baseline: stress_defaults::BASELINE,
            jitter_amplitude: stress_defaults::JITTER_AMPLITUDE,
            event_probability: stress_defaults::EVENT_PROBABILITY,
            event_decay: stress_defaults::EVENT_DECAY,
        }
    }
}

impl StressConfig {
    pub fn with_event_probability(mut self, probability: f64) -> Self {
        self.event_probability = probability;
        self
    }

    pub fn with_event_decay(mut self, decay: f64) -> Self {
        self.event_decay = decay;
        self
    }

    pub fn with_jitter_amplitude(mut self, amplitude: f64) -> Self {
        self.jitter_amplitude = amplitude;
        self
    }

    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = baseline;
        self
    }

    /// Checks that every field is finite and within the range the signal needs.
    pub fn validate(&self) -> Result<(), SimError> {
        let fields = [
            ("time_increment", self.time_increment),
            ("sine_amplitude", self.sine_amplitude),
            ("cosine_amplitude", self.cosine_amplitude),
            ("cosine_frequency", self.cosine_frequency),
            ("bias_weight", self.bias_weight),
            ("baseline", self.baseline),
            ("jitter_amplitude", self.jitter_amplitude),
            ("event_probability", self.event_probability),
            ("event_decay", self.event_decay),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(SimError::invalid_config(field, format!("must be finite, got {}", value)));
            }
        }
        for (field, value) in [
            ("time_increment", self.time_increment),
            ("sine_amplitude", self.sine_amplitude),
            ("cosine_amplitude", self.cosine_amplitude),
            ("jitter_amplitude", self.jitter_amplitude),
        ] {
            if value < 0.0 {
                return Err(SimError::invalid_config(field, format!("must be non-negative, got {}", value)));
            }
        }
        if !(0.0..=1.0).contains(&self.event_probability) {
            return Err(SimError::invalid_config(
                "event_probability",
                format!("must lie in [0, 1], got {}", self.event_probability),
            ));
        }
        if self.event_decay <= 0.0 {
            return Err(SimError::invalid_config(
                "event_decay",
                format!("must be positive, got {}", self.event_decay),
            ));
        }
        Ok(())
    }
}

/// Everything computed during one `next_sample` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StressSample {
    /// Clock value after this call's increment.
    pub time_step: f64,
    /// Quasi-periodic bias before weighting.
    pub bias: f64,
    pub jitter: f64,
    /// Whether a new stress event fired on this call.
    pub event_triggered: bool,
    /// Event residual after this call's decay.
    pub stress_phase: f64,
    /// Final output, clamped to [0, 1].
    pub stress: f64,
}

/// Produces a stress level in [0, 1] per call.
///
/// The random source is an explicit, owned dependency: seed it (see
/// [`StressSignalGenerator::seeded`]) to get a reproducible trajectory, or
/// hand in any other [`Rng`].
///
/// # Examples
///
/// ```
/// use qbench::StressSignalGenerator;
///
/// let mut a = StressSignalGenerator::seeded(7);
/// let mut b = StressSignalGenerator::seeded(7);
/// for _ in 0..100 {
///     let s = a.next_stress();
///     assert!((0.0..=1.0).contains(&s));
///     assert_eq!(s, b.next_stress());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct StressSignalGenerator<R = StdRng> {
    config: StressConfig,
    time_step: f64,
    stress_phase: f64,
    rng: R,
}

impl StressSignalGenerator<StdRng> {
    /// Default configuration driven by a `StdRng` seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Default configuration driven by a `StdRng` seeded from the OS.
    pub fn from_os_rng() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }
}

impl<R: Rng> StressSignalGenerator<R> {
    /// Default configuration with a caller-supplied random source.
    pub fn with_rng(rng: R) -> Self {
        Self {
            config: StressConfig::default(),
            time_step: 0.0,
            stress_phase: 0.0,
            rng,
        }
    }

    /// Custom configuration with a caller-supplied random source.
    ///
    /// # Errors
    /// * `SimError::InvalidConfig` if `config` fails [`StressConfig::validate`].
    pub fn with_config(config: StressConfig, rng: R) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            config,
            time_step: 0.0,
            stress_phase: 0.0,
            rng,
        })
    }

    pub fn config(&self) -> &StressConfig {
        &self.config
    }

    /// Internal clock. Grows without bound; only its phase matters.
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Residual magnitude of the in-progress stress event, in [0, 1].
    pub fn stress_phase(&self) -> f64 {
        self.stress_phase
    }

    /// Advances the signal by one tick and returns the clamped stress level.
    pub fn next_stress(&mut self) -> f64 {
        self.next_sample().stress
    }

    /// Advances the signal by one tick and returns the full breakdown.
    ///
    /// Draw order per call is fixed (jitter, then the event trigger) so that a
    /// seeded source always reproduces the same trajectory.
    pub fn next_sample(&mut self) -> StressSample {
        let cfg = &self.config;
        self.time_step += cfg.time_increment;

        let t = self.time_step;
        let bias = cfg.sine_amplitude * t.sin() + cfg.cosine_amplitude * (cfg.cosine_frequency * t).cos();

        // Uniform in [-a, a) from a single [0, 1) draw; no panic when a == 0.
        let jitter = (2.0 * self.rng.random::<f64>() - 1.0) * cfg.jitter_amplitude;

        let event_triggered = self.rng.random::<f64>() < cfg.event_probability;
        if event_triggered {
            self.stress_phase = 1.0;
        }

        if self.stress_phase > 0.0 {
            self.stress_phase = (self.stress_phase - cfg.event_decay).max(0.0);
        }

        let raw = cfg.baseline + cfg.bias_weight * bias + self.stress_phase + jitter;
        StressSample {
            time_step: t,
            bias,
            jitter,
            event_triggered,
            stress_phase: self.stress_phase,
            stress: raw.clamp(0.0, 1.0),
        }
    }
}
