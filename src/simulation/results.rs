// src/simulation/results.rs
use crate::core::DEFAULT_HISTORY_CAPACITY;
use std::collections::VecDeque;
use std::fmt;

/// What one `step` call measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// `Tr(P_target * control)` after this tick's noise.
    pub fidelity_control: f64,
    /// `Tr(P_target * protected)` after noise and any correction.
    pub fidelity_protected: f64,
    /// Whether the corrective pull fired on this tick.
    pub corrected: bool,
    /// `Tr(X * control)`, in [-1, 1].
    pub alignment_control: f64,
    /// `Tr(X * protected)`, in [-1, 1].
    pub alignment_protected: f64,
    /// Protected fidelity read before the threshold test.
    pub pre_correction_fidelity: f64,
    /// Channel weight applied this tick (`stress * noise_scale`).
    pub noise_strength: f64,
}

impl StepOutcome {
    /// Fidelity advantage of the protected state over the control.
    pub fn gain(&self) -> f64 {
        self.fidelity_protected - self.fidelity_control
    }

    /// `(fidelity_control, fidelity_protected, corrected, alignment_control, alignment_protected)`
    pub fn as_tuple(&self) -> (f64, f64, bool, f64, f64) {
        (
            self.fidelity_control,
            self.fidelity_protected,
            self.corrected,
            self.alignment_control,
            self.alignment_protected,
        )
    }
}

/// One tick of a [`FidelityBench`](super::FidelityBench) run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickRecord {
    /// 1-based tick index.
    pub tick: u64,
    /// Stress level handed to the simulator (before clamping).
    pub stress: f64,
    pub outcome: StepOutcome,
}

/// Bounded FIFO of recent ticks. Oldest records fall off the front once
/// `capacity` is reached.
#[derive(Debug, Clone, PartialEq)]
pub struct TickHistory {
    records: VecDeque<TickRecord>,
    capacity: usize,
}

impl TickHistory {
    /// A capacity of zero is bumped to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { records: VecDeque::with_capacity(capacity), capacity }
    }

    pub fn push(&mut self, record: TickRecord) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<&TickRecord> {
        self.records.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TickRecord> {
        self.records.iter()
    }

    pub fn control_series(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.outcome.fidelity_control).collect()
    }

    pub fn protected_series(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.outcome.fidelity_protected).collect()
    }

    pub fn gain_series(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.outcome.gain()).collect()
    }

    pub fn stress_series(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.stress).collect()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl Default for TickHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

/// Running aggregate over every tick a bench has executed.
///
/// Unlike [`TickHistory`] this does not forget old ticks; it only keeps sums
/// and extremes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchSummary {
    pub ticks: u64,
    pub corrections: u64,
    pub mean_control: f64,
    pub mean_protected: f64,
    pub mean_gain: f64,
    pub min_control: f64,
    pub min_protected: f64,
    pub mean_stress: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SummaryAccumulator {
    ticks: u64,
    sum_control: f64,
    sum_protected: f64,
    sum_stress: f64,
    min_control: f64,
    min_protected: f64,
}

impl SummaryAccumulator {
    pub(crate) fn new() -> Self {
        Self {
            ticks: 0,
            sum_control: 0.0,
            sum_protected: 0.0,
            sum_stress: 0.0,
            min_control: f64::INFINITY,
            min_protected: f64::INFINITY,
        }
    }

    pub(crate) fn record(&mut self, stress: f64, outcome: &StepOutcome) {
        self.ticks += 1;
        self.sum_control += outcome.fidelity_control;
        self.sum_protected += outcome.fidelity_protected;
        self.sum_stress += stress;
        self.min_control = self.min_control.min(outcome.fidelity_control);
        self.min_protected = self.min_protected.min(outcome.fidelity_protected);
    }

    pub(crate) fn summarize(&self, corrections: u64) -> BenchSummary {
        if self.ticks == 0 {
            return BenchSummary {
                ticks: 0,
                corrections,
                mean_control: 1.0,
                mean_protected: 1.0,
                mean_gain: 0.0,
                min_control: 1.0,
                min_protected: 1.0,
                mean_stress: 0.0,
            };
        }
        let n = self.ticks as f64;
        let mean_control = self.sum_control / n;
        let mean_protected = self.sum_protected / n;
        BenchSummary {
            ticks: self.ticks,
            corrections,
            mean_control,
            mean_protected,
            mean_gain: mean_protected - mean_control,
            min_control: self.min_control,
            min_protected: self.min_protected,
            mean_stress: self.sum_stress / n,
        }
    }
}

impl fmt::Display for BenchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bench Summary ({} ticks):", self.ticks)?;
        writeln!(f, "  Control fidelity:   mean {:.3}  min {:.3}", self.mean_control, self.min_control)?;
        writeln!(f, "  Protected fidelity: mean {:.3}  min {:.3}", self.mean_protected, self.min_protected)?;
        writeln!(f, "  Net gain:           {:+.3}", self.mean_gain)?;
        writeln!(f, "  Mean stress:        {:.3}", self.mean_stress)?;
        write!(f, "  Total corrections:  {}", self.corrections)
    }
}
