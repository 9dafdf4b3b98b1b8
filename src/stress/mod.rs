// src/stress/mod.rs

//! Sources of the per-tick stress level that drives decoherence.
//!
//! [`StressSignalGenerator`] is the simulated physiological signal. Any other
//! type implementing [`StressSource`] can stand in for it when driving a
//! [`FidelityBench`](crate::simulation::FidelityBench), e.g. [`ScriptedStress`]
//! to replay a recorded or hand-written sequence.

mod generator;

pub use generator::{StressConfig, StressSample, StressSignalGenerator};

#[cfg(test)]
pub(crate) use generator::tests::ScriptedRng;

use rand::Rng;

/// Anything that yields one stress level per tick.
pub trait StressSource {
    /// Returns the stress level for the next tick. Values outside [0, 1] are
    /// tolerated; the simulator clamps them.
    fn next_stress(&mut self) -> f64;
}

impl<R: Rng> StressSource for StressSignalGenerator<R> {
    fn next_stress(&mut self) -> f64 {
        self.next_sample().stress
    }
}

/// Replays a fixed sequence of stress values, cycling when it runs out.
/// An empty sequence yields 0.0 forever.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedStress {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedStress {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self { values: values.into_iter().collect(), cursor: 0 }
    }

    /// The same value on every tick.
    pub fn constant(value: f64) -> Self {
        Self::new([value])
    }
}

impl StressSource for ScriptedStress {
    fn next_stress(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_stress_cycles() {
        let mut source = ScriptedStress::new([0.1, 0.2, 0.3]);
        let seen: Vec<f64> = (0..7).map(|_| source.next_stress()).collect();
        assert_eq!(seen, vec![0.1, 0.2, 0.3, 0.1, 0.2, 0.3, 0.1]);
    }

    #[test]
    fn empty_script_is_silent() {
        let mut source = ScriptedStress::new(Vec::new());
        assert_eq!(source.next_stress(), 0.0);
        assert_eq!(source.next_stress(), 0.0);
    }

    #[test]
    fn generator_is_a_stress_source() {
        fn drain(source: &mut impl StressSource, n: usize) -> Vec<f64> {
            (0..n).map(|_| source.next_stress()).collect()
        }
        let mut via_trait = StressSignalGenerator::seeded(5);
        let mut direct = StressSignalGenerator::seeded(5);
        let expected: Vec<f64> = (0..32).map(|_| direct.next_stress()).collect();
        assert_eq!(drain(&mut via_trait, 32), expected);
    }
}
