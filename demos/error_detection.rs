//! Parity-check error detection and a prefix code over a noisy binary channel

use quantsim::SimError;
use quantsim::channel::sweep::parity_sweep;
use quantsim::channel::{PrefixCode, simulate_parity_check, simulate_prefix_code};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() -> Result<(), SimError> {
    env_logger::init();
    let mut rng = StdRng::seed_from_u64(quantsim::core::DEFAULT_SEED);

    let report = simulate_parity_check(0.1, 100_000, &mut rng)?;
    println!("Parity check at epsilon = {}:", report.epsilon);
    println!(
        "  4-bit corrupted: {:.2}% (theory {:.2}%)",
        report.plain_corrupted_percent, report.theoretical_plain_corrupted_percent
    );
    println!(
        "  5-bit corrupted: {:.2}% (theory {:.2}%)",
        report.coded_corrupted_percent, report.theoretical_coded_corrupted_percent
    );
    if let Some(detected) = report.detected_percent_of_corrupted {
        println!("  detected among corrupted: {:.2}%", detected);
    }

    println!("\nepsilon   4-bit   5-bit   detected");
    let epsilons: Vec<f64> = (1..=10).map(|i| i as f64 * 0.02).collect();
    for r in parity_sweep(&epsilons, 50_000, 11)? {
        println!(
            "{:>7.2} {:>6.2}% {:>6.2}% {:>9}",
            r.epsilon,
            r.plain_corrupted_percent,
            r.coded_corrupted_percent,
            r.detected_percent_of_corrupted.map_or("n/a".to_string(), |d| format!("{:.2}%", d))
        );
    }

    let code = PrefixCode::truncated_unary();
    println!("\nTruncated unary code, mean length {:.4} bits", code.mean_length());
    let prefix = simulate_prefix_code(0.0, 0.1, 100_000, &mut rng)?;
    println!(
        "  corrupted over Z-channel (e1 = {}): {:.2}% (theory {:.2}%)",
        prefix.epsilon1, prefix.corrupted_percent, prefix.theoretical_corrupted_percent
    );
    Ok(())
}
