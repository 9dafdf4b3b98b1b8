//! Runs the stress-driven bench without any rendering and prints the same
//! figures a status panel would show.
//!
//! The logical rate is 30 ticks per second, so 900 ticks is half a minute of
//! simulated wall time. Pass a seed as the first argument to change the run.

use qbench::{FidelityBench, SimError};

const TICKS_PER_SECOND: u64 = 30;
const TOTAL_TICKS: usize = 900;

fn main() -> Result<(), SimError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(2024);

    println!("--- qbench: headless fidelity bench (seed {}) ---", seed);

    let mut bench = FidelityBench::seeded(seed).with_history(400);
    for _ in 0..TOTAL_TICKS {
        let record = bench.tick();
        if record.tick % TICKS_PER_SECOND == 0 {
            let o = record.outcome;
            println!(
                "t={:>3}s  stress {:.3}  control {:.3}  protected {:.3}  gain {:+.3}  corrections {}{}",
                record.tick / TICKS_PER_SECOND,
                record.stress,
                o.fidelity_control,
                o.fidelity_protected,
                o.gain(),
                bench.simulator().correction_count(),
                if o.corrected { "  CORRECTING..." } else { "" },
            );
        }
    }

    bench.simulator().check_invariants(1e-6)?;

    if let Some(history) = bench.history() {
        let gains = history.gain_series();
        let peak = gains.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        println!("\nLast {} ticks: peak gain {:+.3}", history.len(), peak);
    }
    println!("\n{}", bench.summary());
    Ok(())
}
