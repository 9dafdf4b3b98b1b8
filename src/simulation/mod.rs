// src/simulation/mod.rs

//! Density-matrix decoherence and correction, plus the per-tick driver that
//! feeds it from a stress source.
//!
//! [`QuantumFidelitySimulator`] is the step function. [`FidelityBench`] wires
//! a [`StressSource`] to it in the order every tick needs (query the source,
//! then step the simulator) and optionally keeps a bounded [`TickHistory`]
//! for callers that plot or inspect recent values.

pub mod channel;
mod engine;
mod results;

pub use engine::{QuantumFidelitySimulator, SimulatorConfig};
pub use results::{BenchSummary, StepOutcome, TickHistory, TickRecord};

use crate::core::SimError;
use crate::stress::{StressSignalGenerator, StressSource};
use results::SummaryAccumulator;
use tracing::info;

/// Runs a stress source and a simulator in lockstep.
#[derive(Debug, Clone)]
pub struct FidelityBench<S> {
    source: S,
    simulator: QuantumFidelitySimulator,
    history: Option<TickHistory>,
    accumulator: SummaryAccumulator,
}

impl FidelityBench<StressSignalGenerator> {
    /// Default generator seeded with `seed`, default simulator, no history.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StressSignalGenerator::seeded(seed), QuantumFidelitySimulator::new())
    }
}

impl<S: StressSource> FidelityBench<S> {
    pub fn new(source: S, simulator: QuantumFidelitySimulator) -> Self {
        Self {
            source,
            simulator,
            history: None,
            accumulator: SummaryAccumulator::new(),
        }
    }

    /// Keeps the most recent `capacity` ticks.
    pub fn with_history(mut self, capacity: usize) -> Self {
        self.history = Some(TickHistory::with_capacity(capacity));
        self
    }

    /// Pulls one stress value and steps the simulator with it.
    pub fn tick(&mut self) -> TickRecord {
        let stress = self.source.next_stress();
        let outcome = self.simulator.step(stress);
        let record = TickRecord { tick: self.simulator.ticks(), stress, outcome };

        self.accumulator.record(stress, &outcome);
        if let Some(history) = self.history.as_mut() {
            history.push(record);
        }
        record
    }

    /// Runs `ticks` ticks and returns their records.
    pub fn run(&mut self, ticks: usize) -> Vec<TickRecord> {
        let records: Vec<TickRecord> = (0..ticks).map(|_| self.tick()).collect();
        info!(
            ticks,
            corrections = self.simulator.correction_count(),
            "bench run finished"
        );
        records
    }

    /// Like [`run`](Self::run) but also checks density-matrix invariants after
    /// every tick, stopping at the first violation.
    ///
    /// # Errors
    /// * Any `SimError` reported by [`QuantumFidelitySimulator::check_invariants`].
    pub fn run_checked(&mut self, ticks: usize, tolerance: f64) -> Result<Vec<TickRecord>, SimError> {
        let mut records = Vec::with_capacity(ticks);
        for _ in 0..ticks {
            records.push(self.tick());
            self.simulator.check_invariants(tolerance)?;
        }
        Ok(records)
    }

    pub fn summary(&self) -> BenchSummary {
        self.accumulator.summarize(self.simulator.correction_count())
    }

    pub fn simulator(&self) -> &QuantumFidelitySimulator {
        &self.simulator
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn history(&self) -> Option<&TickHistory> {
        self.history.as_ref()
    }
}
