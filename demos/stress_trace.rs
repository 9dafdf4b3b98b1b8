//! Prints a seeded stress trajectory, marking the ticks where a stress event
//! fires, as a crude text plot.

use qbench::StressSignalGenerator;

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(7);

    println!("--- qbench: stress trace (seed {}) ---", seed);
    let mut generator = StressSignalGenerator::seeded(seed);
    for tick in 1..=300 {
        let sample = generator.next_sample();
        let bar = "#".repeat((sample.stress * 50.0).round() as usize);
        println!(
            "{:>4} t={:>6.2} phase {:.2} {:<50}|{}",
            tick,
            sample.time_step,
            sample.stress_phase,
            bar,
            if sample.event_triggered { " EVENT" } else { "" },
        );
    }
}
