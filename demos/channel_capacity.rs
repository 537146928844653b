//! Mutual information and capacity of symmetric, Z and asymmetric binary channels

use quantsim::SimError;
use quantsim::channel::sweep::{above_threshold, capacity_map, linspace, symmetric_information_map};
use quantsim::channel::{BinaryChannel, binary_entropy};
use quantsim::core::DEFAULT_TOLERANCE;

fn main() -> Result<(), SimError> {
    env_logger::init();

    println!("epsilon   C(BSC)   1 - H(eps)");
    for epsilon in [0.0, 0.01, 0.05, 0.1, 0.2, 0.3, 0.5] {
        let c = BinaryChannel::symmetric(epsilon)?.capacity(DEFAULT_TOLERANCE)?;
        println!("{:>7.2} {:>8.5} {:>12.5}", epsilon, c.capacity, 1.0 - binary_entropy(epsilon));
    }

    println!("\nZ-channel");
    for epsilon1 in [0.1, 0.25, 0.5, 0.75] {
        let c = BinaryChannel::z_channel(epsilon1)?.capacity(DEFAULT_TOLERANCE)?;
        println!("  e1 = {:.2}: C = {:.5} bits at P(X=0) = {:.4}", epsilon1, c.capacity, c.optimal_prior);
    }

    let grid = linspace(0.0025, 0.5, 200);
    let map = capacity_map(&grid, &grid, DEFAULT_TOLERANCE)?;
    if let Some(best) = map.iter().filter(|p| p.epsilon0 > 0.1 && p.epsilon1 > 0.1).max_by(|a, b| {
        a.capacity.capacity.total_cmp(&b.capacity.capacity)
    }) {
        println!(
            "\nBest cell with both crossovers above 0.1: ({:.4}, {:.4}) -> {:.5} bits",
            best.epsilon0, best.epsilon1, best.capacity.capacity
        );
    }

    let information = symmetric_information_map(&linspace(0.0, 1.0, 101), &linspace(0.0, 0.5, 51))?;
    let useful = above_threshold(&information, 0.5);
    println!("{} of {} (prior, epsilon) cells carry more than 0.5 bits", useful.len(), information.len());
    Ok(())
}
