// tests/simulation_tests.rs

use qbench::{
    FidelityBench, QuantumFidelitySimulator, ScriptedStress, SimError, StepOutcome, StressSignalGenerator,
    validate_density_matrix,
};

const TEST_TOLERANCE: f64 = 1e-9;
const INVARIANT_TOLERANCE: f64 = 1e-6;

// Helper: drive a simulator with a seeded generator and collect every outcome.
fn seeded_run(seed: u64, ticks: usize) -> (QuantumFidelitySimulator, Vec<(f64, StepOutcome)>) {
    let mut generator = StressSignalGenerator::seeded(seed);
    let mut simulator = QuantumFidelitySimulator::new();
    let outcomes = (0..ticks)
        .map(|_| {
            let stress = generator.next_stress();
            (stress, simulator.step(stress))
        })
        .collect();
    (simulator, outcomes)
}

#[test]
fn test_fidelities_stay_in_unit_interval() {
    let (_, outcomes) = seeded_run(7, 5_000);
    for (stress, outcome) in outcomes {
        assert!((0.0..=1.0).contains(&stress));
        for f in [outcome.fidelity_control, outcome.fidelity_protected] {
            assert!(f >= -TEST_TOLERANCE && f <= 1.0 + TEST_TOLERANCE, "fidelity {} out of range", f);
        }
        for a in [outcome.alignment_control, outcome.alignment_protected] {
            assert!(a.abs() <= 1.0 + TEST_TOLERANCE, "alignment {} out of range", a);
        }
    }
}

#[test]
fn test_invariants_hold_after_every_step() -> Result<(), SimError> {
    let mut generator = StressSignalGenerator::seeded(123);
    let mut simulator = QuantumFidelitySimulator::new();
    for _ in 0..10_000 {
        simulator.step(generator.next_stress());
        validate_density_matrix(simulator.control(), Some(INVARIANT_TOLERANCE))?;
        validate_density_matrix(simulator.protected(), Some(INVARIANT_TOLERANCE))?;
    }
    Ok(())
}

#[test]
fn test_correction_count_matches_threshold_crossings() {
    let mut generator = StressSignalGenerator::seeded(31);
    let mut simulator = QuantumFidelitySimulator::new();
    let mut crossings = 0u64;
    for _ in 0..3_000 {
        let before = simulator.correction_count();
        let outcome = simulator.step(generator.next_stress());
        let below = outcome.pre_correction_fidelity < 0.90;
        assert_eq!(outcome.corrected, below);
        assert_eq!(simulator.correction_count() - before, below as u64);
        crossings += below as u64;
    }
    assert_eq!(simulator.correction_count(), crossings);
}

#[test]
fn test_identical_seeds_reproduce_trajectory() {
    let (sim_a, run_a) = seeded_run(2024, 2_000);
    let (sim_b, run_b) = seeded_run(2024, 2_000);
    assert_eq!(run_a, run_b);
    assert_eq!(sim_a.control(), sim_b.control());
    assert_eq!(sim_a.protected(), sim_b.protected());
    assert_eq!(sim_a.correction_count(), sim_b.correction_count());
}

#[test]
fn test_identical_stress_sequence_reproduces_outcomes() {
    let sequence: Vec<f64> = (0..500).map(|i| ((i * 37) % 101) as f64 / 100.0).collect();
    let mut a = QuantumFidelitySimulator::new();
    let mut b = QuantumFidelitySimulator::new();
    for &s in &sequence {
        assert_eq!(a.step(s), b.step(s));
    }
}

#[test]
fn test_zero_stress_is_idempotent() {
    let mut simulator = QuantumFidelitySimulator::new();
    let initial_control = *simulator.control();
    let initial_protected = *simulator.protected();
    for _ in 0..1_000 {
        let outcome = simulator.step(0.0);
        assert!(!outcome.corrected);
        assert_eq!(outcome.noise_strength, 0.0);
    }
    assert_eq!(*simulator.control(), initial_control);
    assert_eq!(*simulator.protected(), initial_protected);
    assert_eq!(simulator.correction_count(), 0);
}

#[test]
fn test_zero_stress_freezes_a_damaged_state() {
    // p = 0.045: fidelity 0.955, above the threshold, so nothing is corrected.
    let mut simulator = QuantumFidelitySimulator::new();
    assert!(!simulator.step(0.3).corrected);
    let control = *simulator.control();
    let protected = *simulator.protected();
    for _ in 0..100 {
        simulator.step(0.0);
    }
    for (after, before) in [(simulator.control(), &control), (simulator.protected(), &protected)] {
        for (a, b) in after.elements().iter().flatten().zip(before.elements().iter().flatten()) {
            assert!((a - b).norm() < 1e-15);
        }
    }
    assert_eq!(simulator.correction_count(), 0);
}

#[test]
fn test_single_full_stress_step_matches_dephasing_formula() {
    let p: f64 = 0.15;
    let mut simulator = QuantumFidelitySimulator::new();
    let outcome = simulator.step(1.0);

    assert!((outcome.noise_strength - p).abs() < TEST_TOLERANCE);
    // One phase-flip application scales the |+> coherence by (1 - 2p).
    assert!((outcome.fidelity_control - (1.0 - p)).abs() < TEST_TOLERANCE);
    assert!((outcome.alignment_control - (1.0 - 2.0 * p)).abs() < TEST_TOLERANCE);

    // 0.85 is already below the 0.90 threshold, so the protected state is corrected.
    assert!((outcome.pre_correction_fidelity - 0.85).abs() < TEST_TOLERANCE);
    assert!(outcome.corrected);
    assert_eq!(simulator.correction_count(), 1);
    assert!((outcome.fidelity_protected - (0.8 * 0.85 + 0.2)).abs() < TEST_TOLERANCE);
}

#[test]
fn test_two_full_stress_steps_reach_1_minus_2p_1_minus_p() {
    let p: f64 = 0.15;
    let mut simulator = QuantumFidelitySimulator::new();
    simulator.step(1.0);
    let outcome = simulator.step(1.0);
    assert!((outcome.fidelity_control - (1.0 - 2.0 * p * (1.0 - p))).abs() < TEST_TOLERANCE);
}

#[test]
fn test_small_stress_does_not_trigger_correction() {
    // p = 0.075 per tick: fidelity 0.925 after one tick, 0.86125 after two.
    let mut simulator = QuantumFidelitySimulator::new();
    let first = simulator.step(0.5);
    assert!(!first.corrected);
    assert_eq!(first.fidelity_control, first.fidelity_protected);
    let second = simulator.step(0.5);
    assert!(second.corrected);
    assert!(second.fidelity_protected > second.fidelity_control);
}

#[test]
fn test_forced_corrections_fire_once_per_tick_and_raise_fidelity() {
    let mut bench = FidelityBench::new(ScriptedStress::constant(1.0), QuantumFidelitySimulator::new());
    for expected_count in 1..=100 {
        let outcome = bench.tick().outcome;
        assert!(outcome.pre_correction_fidelity < 0.90);
        assert!(outcome.corrected);
        assert_eq!(bench.simulator().correction_count(), expected_count);
        assert!(outcome.fidelity_protected > outcome.pre_correction_fidelity);
        assert!(outcome.fidelity_protected < 1.0);
    }
}

#[test]
fn test_protected_never_worse_than_control() {
    let (_, outcomes) = seeded_run(77, 4_000);
    for (_, outcome) in outcomes {
        assert!(outcome.fidelity_protected >= outcome.fidelity_control - TEST_TOLERANCE);
        assert!(outcome.gain() >= -TEST_TOLERANCE);
    }
}
