//! Two-detector statistics for a Bell state and a product state as detector B rotates

use quantsim::experiment::{ExperimentBuilder, run};
use quantsim::measurement::ExchangeEvolution;
use quantsim::{AmplitudeState, SimError, TwoQubitMeasurement};
use std::f64::consts::PI;

fn main() -> Result<(), SimError> {
    env_logger::init();

    let bell = [(1.0, 0.0), (0.0, 0.0), (0.0, 0.0), (1.0, 0.0)];
    let product = [(1.0, 0.0), (1.0, 0.0), (1.0, 0.0), (1.0, 0.0)];

    for (name, amplitudes) in [("Bell |00> + |11>", bell), ("product |+>|+>", product)] {
        println!("=== {} ===", name);
        for degrees in [0.0, 45.0, 90.0, 180.0] {
            let config = ExperimentBuilder::entanglement(amplitudes)
                .angle_degrees(degrees)
                .trials(200_000)
                .seed(7)
                .build()?;
            println!("{}", run(&config)?);
        }
    }

    // Correlation curve <A*B>(alpha) for the Bell state
    let state = AmplitudeState::from_pairs(&bell)?;
    println!("alpha [deg]   <A*B>");
    for step in 0..=12 {
        let degrees = step as f64 * 15.0;
        let theory = TwoQubitMeasurement::from_degrees(state.clone(), degrees)?.expectations()?;
        println!("{:>11.1} {:>7.4}", degrees, theory.product);
    }

    // Exchange coupling turns |01> into a Bell state and back
    println!("\n   t    P(01)   P(10)  concurrence");
    for point in ExchangeEvolution::default().trajectory(4.0 * PI, 400)?.iter().step_by(25) {
        println!("{:>5.2} {:>7.4} {:>7.4} {:>12.4}", point.time, point.p_up_down, point.p_down_up, point.concurrence);
    }
    Ok(())
}
