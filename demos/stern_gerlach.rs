//! Stern-Gerlach measurement of a single spin-1/2 along z

use quantsim::{Sampler, SimError, Spin, SpinMeasurement, TrialModel};
use num_complex::Complex;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() -> Result<(), SimError> {
    env_logger::init();

    // |psi> = 0.6 |z,+> + 0.8i |z,->
    let measurement = SpinMeasurement::from_amplitudes(Complex::new(0.6, 0.0), Complex::new(0.0, 0.8))?;
    println!("State: {}", measurement.state());
    println!("Theory:\n{}", measurement.theoretical()?);
    println!("  <sigma_z> = {:.4}, std {:.4}", measurement.expectation(), measurement.std_dev());

    let mut rng = StdRng::seed_from_u64(quantsim::core::DEFAULT_SEED);
    for n in [10, 1_000, 100_000] {
        let report = Sampler::new(n).run(&measurement, &mut rng);
        println!("\n{}", report);
        println!(
            "  P(up) observed {:.4} vs {:.4}",
            report.tally().frequency(Spin::Up)?,
            measurement.probability(Spin::Up)
        );
    }
    Ok(())
}
